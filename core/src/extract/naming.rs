#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for deriving exported names from schema keys, parameter
//! names, actor method paths and the document title.

/// Path segment that precedes the method name in actor paths.
pub const METHOD_SEGMENT: &str = "method";

/// Name used when neither tags nor the title yield an actor type.
pub const DEFAULT_ACTOR_NAME: &str = "Actor";

/// Title suffixes stripped (at most one) when deriving the fallback actor name.
const TITLE_SUFFIXES: [&str; 3] = [" API", " Service", " Interface"];

/// Upper-cases the first character, leaving the rest untouched.
///
/// e.g. `userId` -> `UserId`, `get` -> `Get`
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Extracts the raw method name: the path segment following the literal `method` segment.
///
/// e.g. `/{actorId}/method/get` -> `Some("get")`. Returns `None` when the
/// `method` segment is absent or not followed by a non-empty segment.
pub fn method_segment(path: &str) -> Option<&str> {
    let mut parts = path.split('/');
    parts.find(|part| *part == METHOD_SEGMENT)?;
    parts.next().filter(|name| !name.is_empty())
}

/// Derives the exported method name from an actor path.
///
/// e.g. `/actors/CounterActor/{actorId}/method/increment` -> `Increment`
pub fn method_name_from_path(path: &str) -> Option<String> {
    method_segment(path).map(capitalize_first)
}

/// Derives the single actor type used when no operation carries an actor tag.
///
/// Strips one known suffix from the title and removes spaces.
/// e.g. `Widget Service` -> `Widget`, `` -> `Actor`
pub fn fallback_actor_name(title: Option<&str>) -> String {
    let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t,
        None => return DEFAULT_ACTOR_NAME.to_string(),
    };

    let stem = TITLE_SUFFIXES
        .iter()
        .find_map(|suffix| title.strip_suffix(suffix))
        .unwrap_or(title);

    let name: String = stem.chars().filter(|c| *c != ' ').collect();
    if name.is_empty() {
        DEFAULT_ACTOR_NAME.to_string()
    } else {
        name
    }
}

/// Lower-cases an actor type into a package name, appending `suffix` when absent.
///
/// e.g. (`CounterActor`, `actor`) -> `counteractor`, (`Widget`, `actor`) -> `widgetactor`
pub fn package_name(actor_type: &str, suffix: &str) -> String {
    let lower = actor_type.to_lowercase();
    if suffix.is_empty() || lower.ends_with(suffix) {
        lower
    } else {
        format!("{}{}", lower, suffix)
    }
}
