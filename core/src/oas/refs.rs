#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Helpers for turning `$ref` pointers into component names.
//! Only document-local pointers (`#/components/...`) are understood; the
//! generator never fetches external documents.

use percent_encoding::percent_decode_str;

/// Extracts the simple name from a reference string.
/// e.g. `#/components/schemas/User` -> `User`
pub(crate) fn extract_ref_name(ref_loc: &str) -> String {
    let last = ref_loc.rsplit('/').next().unwrap_or(ref_loc);
    decode_pointer_segment(last)
}

/// Extracts a component name from a `$ref` if it points to `#/components/{section}/{name}`.
///
/// Returns `None` for external references and other sections.
pub(crate) fn extract_component_name(ref_str: &str, section: &str) -> Option<String> {
    let pointer = ref_str.strip_prefix('#')?.trim_start_matches('/');
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 || segments[0] != "components" || segments[1] != section {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
