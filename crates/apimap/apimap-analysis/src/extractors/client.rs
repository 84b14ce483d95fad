//! Call-site extraction for frontend code.

use std::sync::Arc;

use crate::catalog::{Family, PatternCatalog};
use crate::classify::FileClass;
use crate::literal::literal_path;
use crate::record::{ApiRecord, HttpMethod, Origin};
use crate::resolver::ClientResolver;
use crate::source::SourceFile;

use super::Extractor;

/// Finds HTTP calls: aliased client instances first, then every client
/// entry in the catalog.
pub struct ClientCallExtractor {
    catalog: Arc<PatternCatalog>,
}

impl ClientCallExtractor {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }

    fn alias_calls(&self, file: &SourceFile<'_>, records: &mut Vec<ApiRecord>) {
        let aliases = ClientResolver::new(&self.catalog).resolve(file.content);
        let call_pattern = &self.catalog.aliases().call_pattern;

        for caps in call_pattern.captures_iter(file.content) {
            let (Some(alias), Some(method), Some(path)) =
                (caps.name("alias"), caps.name("method"), caps.name("path"))
            else {
                continue;
            };
            let Some(strength) = aliases.lookup(alias.as_str()) else { continue };
            let Some(method) = HttpMethod::parse(method.as_str()) else { continue };
            let Some(raw) = literal_path(path.as_str()) else { continue };

            if let Some(record) = ApiRecord::new(
                Origin::ClientCall,
                method,
                &raw,
                file.relative,
                file.line_of(alias.start()),
                strength.label(),
            ) {
                records.push(record.with_alias(alias.as_str()));
            }
        }
    }
}

impl Extractor for ClientCallExtractor {
    fn id(&self) -> &'static str {
        "client-calls"
    }

    fn classes(&self) -> &'static [FileClass] {
        &[FileClass::Frontend]
    }

    fn extract(&self, file: &SourceFile<'_>) -> Vec<ApiRecord> {
        let mut records = Vec::new();
        self.alias_calls(file, &mut records);

        for entry in self.catalog.entries(Family::Client) {
            if !entry.applies_to(file.content) {
                continue;
            }
            for matcher in entry.matchers() {
                for (offset, hit) in matcher.find_all(file.content, self.catalog.options()) {
                    records.extend(ApiRecord::new(
                        Origin::ClientCall,
                        hit.method,
                        &hit.path,
                        file.relative,
                        file.line_of(offset),
                        entry.library,
                    ));
                }
            }
        }

        if !records.is_empty() {
            tracing::trace!(file = file.relative, count = records.len(), "client calls");
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::dedup::dedup_records;

    fn extract(content: &str) -> Vec<ApiRecord> {
        let extractor = ClientCallExtractor::new(Arc::new(PatternCatalog::builtin().unwrap()));
        let file = SourceFile::new(Path::new("src/app.ts"), "src/app.ts", content);
        extractor.extract(&file)
    }

    fn summary(records: &[ApiRecord]) -> Vec<(String, String, String)> {
        records
            .iter()
            .map(|r| (r.method.to_string(), r.path.clone(), r.library.clone()))
            .collect()
    }

    #[test]
    fn test_axios_verb_call() {
        let records = extract("import axios from 'axios';\naxios.get('/api/users');\n");
        assert_eq!(summary(&records), vec![("GET".into(), "/api/users".into(), "axios".into())]);
        assert_eq!(records[0].source_line, 2);
        assert_eq!(records[0].origin, Origin::ClientCall);
        assert!(records[0].instance_alias.is_none());
    }

    #[test]
    fn test_fetch_with_method_option() {
        let records = extract(
            "await fetch('/api/items');\nawait fetch(`/api/items/${id}`, { method: 'DELETE' });\n",
        );
        assert_eq!(
            summary(&records),
            vec![
                ("GET".into(), "/api/items".into(), "fetch".into()),
                ("DELETE".into(), "/api/items".into(), "fetch".into()),
            ]
        );
    }

    #[test]
    fn test_declared_alias_is_custom_instance() {
        let records = extract(
            "const backend = axios.create({ baseURL: '/v1' });\nbackend.post('/orders', body);\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].library, "custom-instance");
        assert_eq!(records[0].instance_alias.as_deref(), Some("backend"));
        assert_eq!(records[0].method, HttpMethod::Post);
        assert_eq!(records[0].source_line, 2);
    }

    #[test]
    fn test_common_alias_is_http_client() {
        let records = extract("export const load = () => api.put<User>('/profile', data);");
        assert_eq!(summary(&records), vec![("PUT".into(), "/profile".into(), "http-client".into())]);
    }

    #[test]
    fn test_noise_and_unknown_receivers_ignored() {
        let records = extract("console.log('/api/x');\nmap.get('/key');\nstore.get('/cache');\n");
        assert!(records.is_empty());
    }

    #[test]
    fn test_hooks_imply_get() {
        let records = extract(
            "const { data } = useSWR('/api/me', fetcher);\n\
             const q = useQuery(['todos'], () => fetch('/api/todos'));\n\
             const k = useQuery('todos', load);\n",
        );
        let paths: Vec<_> = records.iter().map(|r| (r.library.as_str(), r.path.as_str())).collect();
        assert!(paths.contains(&("swr", "/api/me")));
        assert!(paths.contains(&("react-query", "/api/todos")));
        assert!(records.iter().all(|r| r.method == HttpMethod::Get));
        assert!(!paths.iter().any(|(_, p)| *p == "/todos"));
    }

    #[test]
    fn test_option_objects_with_parenthesised_values() {
        let records = extract(
            "await fetch('/api/orders', { body: JSON.stringify(order), method: 'POST' });\n\
             axios({ data: JSON.stringify(o), method: 'put', url: '/api/o' });\n",
        );
        assert_eq!(
            summary(&records),
            vec![
                ("PUT".into(), "/api/o".into(), "axios".into()),
                ("POST".into(), "/api/orders".into(), "fetch".into()),
            ]
        );
    }

    #[test]
    fn test_hook_fetch_collapses_onto_one_record() {
        let mut records = extract("const q = useQuery(['todos'], () =>\n  fetch('/api/todos'));\n");
        dedup_records(&mut records);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].library, "react-query");
        assert_eq!(records[0].source_line, 2);
    }

    #[test]
    fn test_mutation_fetch_keeps_method_option() {
        let mut records = extract(
            "const save = useMutation({\n  mutationFn: (todo) => fetch('/api/todos', { method: 'POST', body: JSON.stringify(todo) }),\n});\n",
        );
        dedup_records(&mut records);
        assert_eq!(summary(&records), vec![("POST".into(), "/api/todos".into(), "react-query".into())]);
    }

    #[test]
    fn test_broad_names_are_not_client_priors() {
        assert!(extract("request.get('/x');\ninstance.post('/y');\n").is_empty());
        let records = extract("const request = axios.create();\nrequest.get('/x');\n");
        assert_eq!(records[0].library, "custom-instance");
    }

    #[test]
    fn test_absolute_url_kept() {
        let records = extract("axios.get('https://api.example.com/v1/users?page=2')");
        assert_eq!(records[0].path, "https://api.example.com/v1/users");
    }
}
