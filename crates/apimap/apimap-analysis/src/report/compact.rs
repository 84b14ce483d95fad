//! Compact endpoint catalog for downstream consumers.

use apimap_core::types::collections::{BTreeMap, FxHashSet};
use serde::Serialize;

use crate::record::{ApiRecord, HttpMethod, Origin};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactEndpoint {
    pub id: String,
    pub method: HttpMethod,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One entry per distinct `(method, path)`, sorted by path then method.
/// Spec declarations are consulted first for descriptions.
///
/// Ids are unique. When two paths slug to the same id, the later entry in
/// sort order takes the first free `_2`, `_3`, ... suffix.
pub fn compact_endpoints(records: &[ApiRecord]) -> Vec<CompactEndpoint> {
    let mut by_key: BTreeMap<(&str, &str), CompactEndpoint> = BTreeMap::new();
    let spec_first = records
        .iter()
        .filter(|r| r.origin == Origin::SpecDeclaration)
        .chain(records.iter().filter(|r| r.origin != Origin::SpecDeclaration));

    for record in spec_first {
        let entry = by_key
            .entry((record.path.as_str(), record.method.as_str()))
            .or_insert_with(|| CompactEndpoint {
                id: endpoint_id(record.method, &record.path),
                method: record.method,
                path: record.path.clone(),
                description: None,
            });
        if entry.description.is_none() {
            entry.description = record.description.clone().filter(|d| !d.is_empty());
        }
    }
    let mut endpoints: Vec<CompactEndpoint> = by_key.into_values().collect();
    let natural: FxHashSet<String> = endpoints.iter().map(|e| e.id.clone()).collect();
    let mut used = FxHashSet::default();
    for endpoint in &mut endpoints {
        if !used.insert(endpoint.id.clone()) {
            let unique = (2..)
                .map(|n| format!("{}_{}", endpoint.id, n))
                .find(|id| !used.contains(id) && !natural.contains(id))
                .unwrap_or_default();
            used.insert(unique.clone());
            endpoint.id = unique;
        }
    }
    endpoints
}

/// `get_api_users_id` for `GET /api/users/{id}`.
///
/// Braces are dropped, other non-alphanumerics become `_`, runs of `_`
/// collapse, and leading/trailing `_` are trimmed.
pub fn endpoint_id(method: HttpMethod, path: &str) -> String {
    let mut slug = String::with_capacity(path.len());
    for ch in path.chars() {
        match ch {
            '{' | '}' => {}
            c if c.is_ascii_alphanumeric() => slug.push(c.to_ascii_lowercase()),
            _ => {
                if !slug.ends_with('_') {
                    slug.push('_');
                }
            }
        }
    }
    let slug = slug.trim_matches('_');
    let method = method.as_str().to_ascii_lowercase();
    if slug.is_empty() {
        method
    } else {
        format!("{}_{}", method, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(origin: Origin, method: HttpMethod, path: &str, description: Option<&str>) -> ApiRecord {
        ApiRecord::new(origin, method, path, "f.ts", 1, "x")
            .unwrap()
            .with_description(description)
    }

    #[test]
    fn test_endpoint_ids() {
        assert_eq!(endpoint_id(HttpMethod::Get, "/api/users/{id}"), "get_api_users_id");
        assert_eq!(endpoint_id(HttpMethod::Delete, "/"), "delete");
        assert_eq!(endpoint_id(HttpMethod::Post, "/v1/{...slug}/items-x"), "post_v1_slug_items_x");
        assert_eq!(
            endpoint_id(HttpMethod::Get, "https://api.example.com/v2/me"),
            "get_https_api_example_com_v2_me"
        );
    }

    #[test]
    fn test_dedup_by_method_and_path_prefers_spec_description() {
        let records = vec![
            record(Origin::ClientCall, HttpMethod::Get, "/users", None),
            record(Origin::SpecDeclaration, HttpMethod::Get, "/users", Some("List users")),
            record(Origin::ServerEndpoint, HttpMethod::Post, "/users", None),
            record(Origin::ClientCall, HttpMethod::Get, "/accounts", None),
        ];
        let compact = compact_endpoints(&records);
        let keys: Vec<_> = compact.iter().map(|c| (c.method, c.path.as_str())).collect();
        assert_eq!(
            keys,
            vec![
                (HttpMethod::Get, "/accounts"),
                (HttpMethod::Get, "/users"),
                (HttpMethod::Post, "/users"),
            ]
        );
        assert_eq!(compact[1].description.as_deref(), Some("List users"));
        assert_eq!(compact[1].id, "get_users");
        assert_eq!(compact[0].description.as_deref(), Some("x (f.ts)"));
    }

    #[test]
    fn test_colliding_ids_get_suffixes() {
        let records = vec![
            record(Origin::ClientCall, HttpMethod::Get, "/api/users/{id}", None),
            record(Origin::ServerEndpoint, HttpMethod::Get, "/api/users/:id", None),
            record(Origin::ServerEndpoint, HttpMethod::Get, "/api/users/id", None),
        ];
        let compact = compact_endpoints(&records);
        let ids: Vec<_> = compact.iter().map(|e| (e.path.as_str(), e.id.as_str())).collect();
        assert_eq!(
            ids,
            vec![
                ("/api/users/:id", "get_api_users_id"),
                ("/api/users/id", "get_api_users_id_2"),
                ("/api/users/{id}", "get_api_users_id_3"),
            ]
        );
    }
}
