//! Directory listing handler
//!
//! Answers requests for directories that have no index file. Everything
//! else is rejected as "not found" so the file route further down the
//! filter chain can try it.

use log::{debug, warn};
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use warp::http::Uri;
use warp::path::FullPath;
use warp::reply::Response;
use warp::{Rejection, Reply};

use crate::constants::INDEX_FILE;
use crate::security::{encode_href, encode_html, resolve_request_path};

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Text shown for the entry: directories end in `/`, symlinks in `@`
    pub fn display_name(&self) -> String {
        if self.is_dir {
            format!("{}/", self.name)
        } else if self.is_symlink {
            format!("{}@", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Relative href for the entry
    pub fn href(&self) -> String {
        let href = encode_href(&self.name);
        if self.is_dir {
            format!("{}/", href)
        } else {
            href
        }
    }
}

/// Serve a listing, or a trailing-slash redirect, for directory requests
pub async fn directory_listing(
    full_path: FullPath,
    query: Option<String>,
    root: Arc<PathBuf>,
) -> Result<Response, Rejection> {
    let raw_path = full_path.as_str();
    let target = resolve_request_path(&root, raw_path).ok_or_else(warp::reject::not_found)?;

    let is_dir = tokio::fs::metadata(&target)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(warp::reject::not_found());
    }

    // Relative links inside a directory only resolve with the trailing slash.
    if !raw_path.ends_with('/') {
        let location = match query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}/?{}", raw_path, query),
            _ => format!("{}/", raw_path),
        };
        let location: Uri = location
            .parse()
            .map_err(|_| warp::reject::not_found())?;
        debug!("Redirecting {} to {}", raw_path, location);
        return Ok(warp::redirect::permanent(location).into_response());
    }

    if has_index(&target).await {
        return Err(warp::reject::not_found());
    }

    let entries = read_entries(&target).await.map_err(|e| {
        warn!("No permission to list directory {}: {}", target.display(), e);
        warp::reject::not_found()
    })?;

    let title = percent_decode_str(raw_path).decode_utf8_lossy();
    Ok(warp::reply::html(render_listing(&title, &entries)).into_response())
}

async fn has_index(dir: &Path) -> bool {
    tokio::fs::metadata(dir.join(INDEX_FILE))
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

/// Read a directory's entries, sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        // The file route refuses any segment starting with `..`
        if name.starts_with("..") {
            continue;
        }
        let is_symlink = entry
            .file_type()
            .await
            .map(|file_type| file_type.is_symlink())
            .unwrap_or(false);
        // Follows symlinks, so a link to a directory lists as a directory.
        let is_dir = tokio::fs::metadata(entry.path())
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false);

        entries.push(ListingEntry {
            name,
            is_dir,
            is_symlink,
        });
    }

    entries.sort_by_key(|entry| entry.name.to_lowercase());
    Ok(entries)
}

/// Render the HTML page for a directory listing
pub fn render_listing(request_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", encode_html(request_path));
    let mut page = String::new();

    page.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", title));
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<h1>{}</h1>\n<hr>\n<ul>\n", title));
    for entry in entries {
        page.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            entry.href(),
            encode_html(&entry.display_name())
        ));
    }
    page.push_str("</ul>\n<hr>\n</body>\n</html>\n");

    page
}
