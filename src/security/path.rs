//! Mapping of request paths onto the served directory
//!
//! Request paths are percent-decoded and split into segments; any parent
//! reference rejects the whole request instead of being stripped, so a
//! crafted path can never resolve outside the root.

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};

/// Resolve a raw (still percent-encoded) request path under `root`.
///
/// Returns `None` when the path is not valid UTF-8 after decoding or tries to
/// leave the root.
pub fn resolve_request_path(root: &Path, raw_path: &str) -> Option<PathBuf> {
    let path = raw_path.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8().ok()?;

    let mut resolved = root.to_path_buf();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if !is_safe_segment(segment) {
            log::warn!("Rejected unsafe request path: {}", raw_path);
            return None;
        }
        resolved.push(segment);
    }

    Some(resolved)
}

fn is_safe_segment(segment: &str) -> bool {
    // `warp::fs::dir` refuses these too, so listings and files agree
    !segment.starts_with("..")
        && !segment.contains('\\')
        && !segment.contains('\0')
        // Drive prefixes such as `C:` would replace the root on Windows.
        && !(cfg!(windows) && segment.contains(':'))
}
