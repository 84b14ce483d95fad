//! Built-in catalog entries.
//!
//! Order matters only for attribution: when two entries hit the same line
//! with the same method and path, dedup keeps the earlier one. Narrower,
//! marker-gated entries therefore come before the broad entries they
//! overlap (`react-query` before `fetch`, `hono` before `express`).

use super::{EntrySpec, ExtractRule, Family, MatcherSpec};
use crate::record::HttpMethod;

/// A quoted, double-quoted, or template string literal, quotes included.
pub const LIT: &str = r#"(?:'[^'\n]*'|"[^"\n]*"|`[^`]*`)"#;

/// HTTP verbs as they appear in method names (`get`, `Post`, ...).
pub const VERBS_CI: &str = r"(?i:get|post|put|delete|patch|head|options)";

/// Optional TypeScript type arguments between a callee and `(`.
pub const TYPE_ARGS: &str = r"(?:<[^>()]*>)?\s*";

/// A `fetch(<literal>` call inside a data hook, anchored on `fetch` so the
/// record lands on the same line as the plain `fetch` detector's.
fn inner_fetch() -> String {
    format!(r"\b(?P<anchor>fetch)\s*\(\s*(?P<path>{LIT})\s*(?:,\s*(?P<options>\{{))?")
}

fn m(pattern: String, rule: ExtractRule, default_method: HttpMethod) -> MatcherSpec {
    MatcherSpec { pattern, rule, default_method }
}

/// `<receiver>.<verb>(<literal>` for a fixed receiver alternation.
fn verb_call(receivers: &str) -> String {
    format!(r"\b(?P<anchor>{receivers})\s*\.\s*(?P<method>{VERBS_CI})\s*{TYPE_ARGS}\(\s*(?P<path>{LIT})")
}

/// Like [`verb_call`], but the receiver may not be a member access or a
/// decorator (`@app.get` belongs to the Python frameworks).
fn registration(receivers: &str) -> String {
    format!(r"(?:^|[^@\w$.])(?P<anchor>{receivers})\s*\.\s*(?P<method>{VERBS_CI})\s*\(\s*(?P<path>{LIT})")
}

pub fn entry_specs() -> Vec<EntrySpec> {
    use ExtractRule::*;
    use HttpMethod::Get;
    let fetch_call = inner_fetch();

    vec![
        // ── Client side ──
        EntrySpec {
            library: "axios",
            family: Family::Client,
            marker: Some("axios"),
            matchers: vec![
                m(verb_call("axios"), MethodAndPath, Get),
                m(
                    r"\baxios(?:\s*\.\s*request)?\s*\(\s*(?P<options>\{)".to_string(),
                    OptionsObject,
                    Get,
                ),
            ],
        },
        EntrySpec {
            library: "react-query",
            family: Family::Client,
            marker: Some("useQuery"),
            matchers: vec![
                m(
                    format!(r"\buseQuery\s*{TYPE_ARGS}\(\s*\[?\s*(?P<path>{LIT})"),
                    PathLikeOnly,
                    Get,
                ),
                m(
                    format!(
                        r"\buseQuery\s*{TYPE_ARGS}\(\s*\[[^\]]*\]\s*,\s*(?:async\s*)?\(\s*\)\s*=>\s*{fetch_call}"
                    ),
                    OptionsObject,
                    Get,
                ),
                m(
                    format!(r"\buseQuery\s*{TYPE_ARGS}\(\s*\{{[^}}]*?\bqueryFn\s*:[^}}]*?{fetch_call}"),
                    OptionsObject,
                    Get,
                ),
            ],
        },
        EntrySpec {
            library: "react-query",
            family: Family::Client,
            marker: Some("useMutation"),
            matchers: vec![m(
                format!(r"\buseMutation\s*{TYPE_ARGS}\(\s*\{{[^}}]*?\bmutationFn\s*:[^}}]*?{fetch_call}"),
                OptionsObject,
                Get,
            )],
        },
        EntrySpec {
            library: "fetch",
            family: Family::Client,
            marker: Some("fetch"),
            matchers: vec![m(
                format!(r"\bfetch\s*\(\s*(?P<path>{LIT})\s*(?:,\s*(?P<options>\{{))?"),
                OptionsObject,
                Get,
            )],
        },
        EntrySpec {
            library: "ky",
            family: Family::Client,
            marker: Some("ky"),
            matchers: vec![m(verb_call("ky"), MethodAndPath, Get)],
        },
        EntrySpec {
            library: "got",
            family: Family::Client,
            marker: Some("got"),
            matchers: vec![m(verb_call("got"), MethodAndPath, Get)],
        },
        EntrySpec {
            library: "superagent",
            family: Family::Client,
            marker: Some("superagent"),
            matchers: vec![m(verb_call("superagent"), MethodAndPath, Get)],
        },
        EntrySpec {
            library: "swr",
            family: Family::Client,
            marker: Some("useSWR"),
            matchers: vec![m(
                format!(r"\buseSWR(?:Immutable)?\s*{TYPE_ARGS}\(\s*(?P<path>{LIT})"),
                PathLikeOnly,
                Get,
            )],
        },
        // ── Server side ──
        EntrySpec {
            library: "hono",
            family: Family::Server,
            marker: Some("hono"),
            matchers: vec![m(registration("app|api|route|routes"), MethodAndPath, Get)],
        },
        EntrySpec {
            library: "express",
            family: Family::Server,
            marker: None,
            matchers: vec![
                m(registration("app|router"), MethodAndPath, Get),
                m(
                    format!(
                        r"(?:^|[^@\w$.])(?P<anchor>app|router)\s*\.\s*route\s*\(\s*(?P<path>{LIT})\s*\)\s*\.\s*(?P<method>{VERBS_CI})\s*\("
                    ),
                    MethodAndPath,
                    Get,
                ),
            ],
        },
        EntrySpec {
            library: "fastify",
            family: Family::Server,
            marker: Some("fastify"),
            matchers: vec![
                m(registration("fastify|server"), MethodAndPath, Get),
                m(
                    r"\b(?P<anchor>fastify|server)\s*\.\s*route\s*\(\s*(?P<options>\{)".to_string(),
                    OptionsObject,
                    Get,
                ),
            ],
        },
        EntrySpec {
            library: "fastapi",
            family: Family::Server,
            marker: None,
            matchers: vec![m(
                format!(r"@(?:app|router|api)\s*\.\s*(?P<method>{VERBS_CI})\s*\(\s*(?P<path>{LIT})"),
                MethodAndPath,
                Get,
            )],
        },
        EntrySpec {
            library: "flask",
            family: Family::Server,
            marker: Some("route"),
            matchers: vec![m(
                format!(r"@(?:app|bp|blueprint|\w+_bp)\s*\.\s*route\s*\(\s*(?P<path>{LIT})(?P<options>[^)]*)\)"),
                MethodList,
                Get,
            )],
        },
        EntrySpec {
            library: "nestjs",
            family: Family::Server,
            marker: None,
            matchers: vec![m(
                format!(r"@(?P<method>Get|Post|Put|Delete|Patch|Head|Options)\s*\(\s*(?P<path>{LIT})?\s*\)"),
                OptionalPath,
                Get,
            )],
        },
        EntrySpec {
            library: "spring",
            family: Family::Server,
            marker: Some("Mapping"),
            matchers: vec![m(
                format!(
                    r"@(?P<method>Get|Post|Put|Delete|Patch)Mapping\b(?:\s*\(\s*(?:(?:value|path)\s*=\s*)?\{{?\s*(?P<path>{LIT})?[^)]*\))?"
                ),
                OptionalPath,
                Get,
            )],
        },
    ]
}
