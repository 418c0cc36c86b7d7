//! Directory loading for markdown profiles
//!
//! Enumerates the direct entries of a directory (non-recursive), parses every
//! markdown file, and returns the resulting id-to-profile mapping. A missing
//! profiles directory is a valid initial state and yields an empty mapping.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::parser;
use super::Profile;

/// Extensions treated as markdown, compared case-insensitively.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// Current time as epoch seconds, used when a file carries no usable mtime.
pub(crate) fn timestamp_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Load every markdown file directly under `path` into a profile mapping.
///
/// Ids are derived from file stems. Two files resolving to the same id
/// (case-variant names, or `a.md` next to `a.markdown`) collide
/// last-write-wins in directory-enumeration order. Individual files that
/// cannot be read are skipped with a warning; they never abort the load.
pub async fn load_directory(path: impl AsRef<Path>) -> HashMap<String, Arc<Profile>> {
    let path = path.as_ref();
    let mut profiles = HashMap::new();

    let mut entries = match tokio::fs::read_dir(path).await {
        Ok(entries) => entries,
        Err(_) => {
            tracing::debug!(
                path = %path.display(),
                "profile directory missing or unreadable, starting empty"
            );
            return profiles;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let file_path = entry.path();
        match entry.file_type().await {
            Ok(file_type) if file_type.is_file() => {}
            _ => continue,
        }
        if !is_markdown(&file_path) {
            continue;
        }
        let id = match file_path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };

        let source = match tokio::fs::read_to_string(&file_path).await {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(
                    path = %file_path.display(),
                    error = %e,
                    "skipping unreadable profile file"
                );
                continue;
            }
        };

        let modified_at = match entry.metadata().await.and_then(|m| m.modified()) {
            Ok(mtime) => mtime
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs_f64())
                .unwrap_or_else(|_| timestamp_now()),
            Err(_) => timestamp_now(),
        };

        let profile = parser::parse(&source, &id, modified_at);
        profiles.insert(id, Arc::new(profile));
    }

    profiles
}
