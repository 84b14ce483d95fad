use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use apimap_analysis::catalog::conventions::builtin_conventions;
use apimap_analysis::catalog::PatternCatalog;
use apimap_analysis::dedup::dedup_records;
use apimap_analysis::extractors::{ClientCallExtractor, Extractor, ServerEndpointExtractor, SpecDocumentExtractor};
use apimap_analysis::literal::braces_to_brackets;
use apimap_analysis::source::SourceFile;
use apimap_analysis::{ApiRecord, HttpMethod, Origin};
use proptest::prelude::*;

const ORIGINS: [Origin; 3] = [Origin::ClientCall, Origin::ServerEndpoint, Origin::SpecDeclaration];

fn record_strategy() -> impl Strategy<Value = ApiRecord> {
    (
        0usize..3,
        0usize..7,
        prop::sample::select(vec!["/a", "/a/{id}", "/b", "https://x.io/c"]),
        prop::sample::select(vec!["a.ts", "b.py"]),
        1u32..4,
        prop::sample::select(vec!["fetch", "axios", "express"]),
    )
        .prop_map(|(origin, method, path, file, line, library)| {
            ApiRecord::new(ORIGINS[origin], HttpMethod::all()[method], path, file, line, library).unwrap()
        })
}

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[b-z][a-z0-9-]{0,7}",
        "\\[[a-z]{1,6}\\]",
        "\\[\\.\\.\\.[a-z]{1,6}\\]",
    ]
}

fn method_name(index: usize) -> &'static str {
    ["get", "post", "put", "delete", "patch", "head", "options"][index]
}

proptest! {
    #[test]
    fn dedup_is_idempotent(mut records in prop::collection::vec(record_strategy(), 0..40)) {
        dedup_records(&mut records);
        let once = records.clone();
        let removed = dedup_records(&mut records);
        prop_assert_eq!(removed, 0);
        prop_assert_eq!(once, records);
    }

    #[test]
    fn dedup_keeps_first_of_each_key(records in prop::collection::vec(record_strategy(), 0..40)) {
        let mut deduped = records.clone();
        dedup_records(&mut deduped);
        let distinct: BTreeSet<_> = records.iter().map(|r| r.dedup_key()).collect();
        prop_assert_eq!(deduped.len(), distinct.len());
        for kept in &deduped {
            let first = records.iter().find(|r| r.dedup_key() == kept.dedup_key()).unwrap();
            prop_assert_eq!(&first.library, &kept.library);
        }
    }

    #[test]
    fn app_router_derivation_is_invertible(
        prefix in prop::sample::select(vec!["", "src/", "apps/web/"]),
        segments in prop::collection::vec(segment_strategy(), 0..5),
    ) {
        let app = builtin_conventions().into_iter().next().unwrap();
        let dirs = segments.join("/");
        let file = if dirs.is_empty() {
            format!("{}app/api/route.ts", prefix)
        } else {
            format!("{}app/api/{}/route.ts", prefix, dirs)
        };
        let derived = app.derive_route(&file).unwrap();
        let expected = if dirs.is_empty() { "/api".to_string() } else { format!("/api/{}", dirs) };
        prop_assert_eq!(braces_to_brackets(&derived), expected);
    }

    #[test]
    fn pages_router_derivation_is_invertible(
        segments in prop::collection::vec(segment_strategy(), 1..5),
    ) {
        let pages = builtin_conventions().into_iter().nth(1).unwrap();
        prop_assume!(segments.last().map(String::as_str) != Some("index"));
        let file = format!("pages/api/{}.ts", segments.join("/"));
        let derived = pages.derive_route(&file).unwrap();
        prop_assert_eq!(braces_to_brackets(&derived), format!("/api/{}", segments.join("/")));
    }

    #[test]
    fn openapi_record_count_matches_method_keys(
        paths in prop::collection::btree_map(
            "/[a-z]{1,8}(/\\{[a-z]{1,5}\\})?",
            prop::collection::btree_set(0usize..7, 0..7),
            0..8,
        ),
        with_parameters in any::<bool>(),
    ) {
        let mut doc_paths = serde_json::Map::new();
        for (path, methods) in &paths {
            let mut item = serde_json::Map::new();
            for m in methods {
                item.insert(method_name(*m).to_string(), serde_json::json!({"summary": "op"}));
            }
            if with_parameters {
                item.insert("parameters".to_string(), serde_json::json!([]));
            }
            doc_paths.insert(path.clone(), serde_json::Value::Object(item));
        }
        let doc = serde_json::json!({"openapi": "3.0.3", "paths": doc_paths});
        let records = SpecDocumentExtractor::new()
            .parse("openapi.json", &doc.to_string())
            .unwrap();

        let expected: usize = paths.values().map(BTreeSet::len).sum();
        prop_assert_eq!(records.len(), expected);
        let pairs: BTreeSet<_> = records.iter().map(|r| (r.path.clone(), r.method)).collect();
        prop_assert_eq!(pairs.len(), expected);
    }

    #[test]
    fn literal_verb_calls_are_found(
        method in 0usize..7,
        path in "/[a-z]{1,10}(/[a-z0-9]{1,6}){0,3}",
        quote in prop::sample::select(vec!['\'', '"', '`']),
    ) {
        let catalog = Arc::new(PatternCatalog::builtin().unwrap());
        let verb = method_name(method);
        let expected = HttpMethod::all()[method];

        let client_src = format!("const r = await axios.{}({q}{}{q});\n", verb, path, q = quote);
        let file = SourceFile::new(Path::new("c.ts"), "c.ts", &client_src);
        let found: Vec<(HttpMethod, String)> = ClientCallExtractor::new(Arc::clone(&catalog))
            .extract(&file)
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        prop_assert!(found.contains(&(expected, path.clone())), "client: {:?}", found);

        let server_src = format!("app.{}({q}{}{q}, handler);\n", verb, path, q = quote);
        let file = SourceFile::new(Path::new("s.js"), "s.js", &server_src);
        let found: Vec<(HttpMethod, String)> = ServerEndpointExtractor::new(catalog)
            .extract(&file)
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        prop_assert!(found.contains(&(expected, path)), "server: {:?}", found);
    }
}
