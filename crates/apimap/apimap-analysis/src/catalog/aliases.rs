//! Vocabulary for recognising custom HTTP-client bindings.

use apimap_core::errors::CatalogError;
use regex::Regex;

use super::builtin::{LIT, TYPE_ARGS, VERBS_CI};

/// Names commonly bound to an HTTP client, used even without a declaration.
const COMMON_ALIASES: &[&str] = &[
    "api", "client", "http", "httpClient", "apiClient", "restClient",
    "axiosInstance", "fetcher", "$http", "$axios",
    "$api",
];

/// Global and built-in identifiers that are never client aliases.
const NOISE_IDENTIFIERS: &[&str] = &[
    "console", "math", "json", "object", "array", "promise", "reflect",
    "window", "document", "navigator", "globalthis", "self", "location",
    "history", "localstorage", "sessionstorage", "process", "module",
    "exports", "require", "intl", "date", "number", "string", "map", "set",
    "weakmap", "url", "urlsearchparams", "formdata", "headers", "crypto",
    "performance", "this",
];

/// Libraries whose `create`/`extend` returns a configured client.
const CREATABLE_LIBRARIES: &[&str] = &["axios", "ky", "got", "superagent", "ofetch", "$fetch"];

/// Factory functions that return a configured client.
const CREATOR_FUNCTIONS: &[&str] = &[
    "createClient", "createApiClient", "createHttpClient", "createFetchClient",
    "createAxiosInstance", "createInstance", "wretch",
];

/// A constructed or injected class whose name contains one of these is a client.
const CLASS_KEYWORDS: &[&str] = &["Http", "HTTP", "Api", "API", "Client", "Service"];

const BINDING: &str = r"(?:\b(?:const|let|var)\s+|\bthis\s*\.\s*)";
const IDENT: &str = r"[A-Za-z_$][\w$]*";

#[derive(Debug, Clone)]
pub struct AliasVocabulary {
    common: Vec<String>,
    noise: Vec<String>,
    creatable: Vec<String>,
    creator_functions: Vec<String>,
    class_keywords: Vec<String>,
    /// `<alias>.<verb>(<literal>`; the alias is checked against the set.
    pub(crate) call_pattern: Regex,
    /// `const api = axios.create(`
    pub(crate) create_pattern: Regex,
    /// `const api = new ApiClient(`
    pub(crate) construct_pattern: Regex,
    /// `const api = createClient(`
    pub(crate) factory_pattern: Regex,
    /// `constructor(private http: HttpClient)`
    pub(crate) inject_pattern: Regex,
}

impl AliasVocabulary {
    pub fn builtin() -> Result<Self, CatalogError> {
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| CatalogError::InvalidPattern {
                library: "client-aliases".to_string(),
                message: e.to_string(),
            })
        };
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Ok(Self {
            common: owned(COMMON_ALIASES),
            noise: owned(NOISE_IDENTIFIERS),
            creatable: owned(CREATABLE_LIBRARIES),
            creator_functions: owned(CREATOR_FUNCTIONS),
            class_keywords: owned(CLASS_KEYWORDS),
            call_pattern: compile(format!(
                r"(?:^|[^\w$])(?P<alias>{IDENT})\s*\.\s*(?P<method>{VERBS_CI})\s*{TYPE_ARGS}\(\s*(?P<path>{LIT})"
            ))?,
            create_pattern: compile(format!(
                r"{BINDING}(?P<name>{IDENT})\s*(?::[^=\n]+)?=\s*(?:await\s+)?(?P<lib>{IDENT})\s*\.\s*(?:create|extend)\s*\("
            ))?,
            construct_pattern: compile(format!(
                r"{BINDING}(?P<name>{IDENT})\s*(?::[^=\n]+)?=\s*new\s+(?P<class>{IDENT})"
            ))?,
            factory_pattern: compile(format!(
                r"{BINDING}(?P<name>{IDENT})\s*(?::[^=\n]+)?=\s*(?:await\s+)?(?P<factory>{IDENT})\s*{TYPE_ARGS}\("
            ))?,
            inject_pattern: compile(format!(
                r"\b(?:private|public|protected|readonly)\s+(?:readonly\s+)?(?P<name>{IDENT})\s*:\s*(?P<class>{IDENT})"
            ))?,
        })
    }

    pub fn is_common(&self, name: &str) -> bool {
        self.common.iter().any(|c| c == name)
    }

    /// Built-in/global identifiers, compared case-insensitively.
    pub fn is_noise(&self, name: &str) -> bool {
        let lower = name.to_ascii_lowercase();
        self.noise.iter().any(|n| *n == lower)
    }

    pub fn is_creatable(&self, library: &str) -> bool {
        self.creatable.iter().any(|c| c == library)
    }

    pub fn is_creator_function(&self, name: &str) -> bool {
        self.creator_functions.iter().any(|c| c == name)
    }

    pub fn is_client_class(&self, class_name: &str) -> bool {
        self.class_keywords.iter().any(|k| class_name.contains(k.as_str()))
    }
}
