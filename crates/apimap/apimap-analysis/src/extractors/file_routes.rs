//! Convention-based endpoints: the route comes from the file's location,
//! the methods from its exported handlers.

use std::sync::Arc;

use crate::catalog::PatternCatalog;
use crate::classify::FileClass;
use crate::record::{ApiRecord, Origin};
use crate::source::SourceFile;
use crate::walker::to_slash;

use super::Extractor;

pub struct FileRouteExtractor {
    catalog: Arc<PatternCatalog>,
}

impl FileRouteExtractor {
    pub fn new(catalog: Arc<PatternCatalog>) -> Self {
        Self { catalog }
    }
}

impl Extractor for FileRouteExtractor {
    fn id(&self) -> &'static str {
        "file-routes"
    }

    fn classes(&self) -> &'static [FileClass] {
        // Route files may be .jsx/.tsx, which only the frontend class covers.
        &[FileClass::Frontend, FileClass::Backend]
    }

    fn extract(&self, file: &SourceFile<'_>) -> Vec<ApiRecord> {
        let handlers = self.catalog.handlers();
        // Conventions see the whole path so a root inside `app/api` still matches.
        let full = to_slash(file.path);
        for convention in self.catalog.conventions() {
            let Some(route) = convention.derive_route(&full) else { continue };

            let mut hits = handlers.exported_handlers(file.content);
            if hits.is_empty() && convention.method_fallback {
                hits = handlers.dispatched_methods(file.content);
            }
            tracing::trace!(
                file = file.relative,
                library = convention.library,
                route = %route,
                handlers = hits.len(),
                "convention route"
            );
            return hits
                .into_iter()
                .filter_map(|hit| {
                    ApiRecord::new(
                        Origin::ServerEndpoint,
                        hit.method,
                        &route,
                        file.relative,
                        file.line_of(hit.offset),
                        convention.library,
                    )
                })
                .collect();
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::record::HttpMethod;

    fn extract(relative: &str, content: &str) -> Vec<ApiRecord> {
        let extractor = FileRouteExtractor::new(Arc::new(PatternCatalog::builtin().unwrap()));
        let file = SourceFile::new(Path::new(relative), relative, content);
        extractor.extract(&file)
    }

    #[test]
    fn test_get_and_post_share_derived_path() {
        let records = extract(
            "app/api/users/[id]/route.ts",
            "import { NextResponse } from 'next/server';\n\n\
             export async function GET(req: Request) {\n  return NextResponse.json({});\n}\n\n\
             export async function POST(req: Request) {\n  return NextResponse.json({});\n}\n",
        );
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].method, HttpMethod::Get);
        assert_eq!(records[1].method, HttpMethod::Post);
        assert!(records.iter().all(|r| r.path == "/api/users/{id}"));
        assert!(records.iter().all(|r| r.library == "nextjs-api"));
        assert_eq!(records[0].source_line, 3);
        assert_eq!(records[1].source_line, 7);
    }

    #[test]
    fn test_pages_router_fallbacks() {
        let records = extract(
            "pages/api/login.ts",
            "export default async function handler(req, res) {\n  if (req.method !== 'POST') return res.status(405).end();\n}\n",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].method, HttpMethod::Post);
        assert_eq!(records[0].path, "/api/login");

        let records = extract("pages/api/health.js", "export default (req, res) => res.json({ ok: true });");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].method, HttpMethod::Get);
    }

    #[test]
    fn test_app_router_has_no_default_export_fallback() {
        assert!(extract("app/api/x/route.ts", "export default function x() {}").is_empty());
    }

    #[test]
    fn test_anchor_above_the_scan_root() {
        let extractor = FileRouteExtractor::new(Arc::new(PatternCatalog::builtin().unwrap()));
        let content = "export async function GET() {}\n";
        let file = SourceFile::new(Path::new("/work/shop/app/api/users/route.ts"), "users/route.ts", content);
        let records = extractor.extract(&file);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "/api/users");
        assert_eq!(records[0].source_file, "users/route.ts");
    }

    #[test]
    fn test_non_route_files_ignored() {
        assert!(extract("src/lib/api.ts", "export async function GET() {}").is_empty());
    }
}
