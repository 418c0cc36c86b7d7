//! 档案层：负责解析 Markdown 档案文件并管理内存中的档案注册表。
//!
//! # Profile Layer
//!
//! This module handles parsing markdown profile documents and managing the
//! in-memory profile registry. A profile is the structured representation of
//! one markdown file: its title, opening description, flat list of sections,
//! and every checklist item found in the document.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`parser`] | Total markdown-to-[`Profile`] parser |
//! | [`loader`] | Directory enumeration and per-file loading |
//! | [`manager`] | Stateful registry with reload and a persisted index |
//! | [`event`] | Reload notification sinks |
//! | [`error`] | Profile-specific error types |
//!
//! ## Example
//!
//! ```rust,no_run
//! use profile_registry::ProfileManager;
//!
//! #[tokio::main]
//! async fn main() -> profile_registry::Result<()> {
//!     let manager = ProfileManager::new("profiles");
//!     manager.initialize().await?;
//!
//!     for summary in manager.list_profiles() {
//!         println!("{}: {} sections", summary.id, summary.section_count);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event;
pub mod loader;
pub mod manager;
pub mod parser;

use serde::{Deserialize, Serialize};

// Re-export main types for convenient access
pub use error::ProfileError;
pub use event::{InMemoryEventSink, NoopEventSink, ProfileEvent, ProfileEventSink};
pub use manager::{ProfileIndex, ProfileManager};
pub use parser::ProfileParser;

/// One heading line plus the body text up to the next heading line of any
/// level. Sections form a flat list in document order, never a tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSection {
    /// Heading text without the leading `#` marks
    pub title: String,
    /// Number of leading `#` marks, 1 through 6
    pub level: u8,
    /// Raw text between this heading and the next, trimmed of surrounding
    /// blank lines
    pub content: String,
}

/// Structured representation of one markdown document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// File base name without extension; unique within a directory
    pub id: String,
    /// Text of the first level-1 heading, falling back to `id`
    pub name: String,
    /// First paragraph of body text under the opening level-1 heading
    pub description: String,
    /// Flat, document-ordered list of sections
    pub sections: Vec<ProfileSection>,
    /// Checklist items normalized to `"[ ] text"` / `"[x] text"`
    pub checklist: Vec<String>,
    /// Unmodified source text
    pub raw_content: String,
    /// Source file modification time, epoch seconds
    pub last_modified: f64,
}

impl Profile {
    /// Derive the summary used for listings and the persisted index.
    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            checklist_count: self.checklist.len(),
            section_count: self.sections.len(),
            last_modified: self.last_modified,
        }
    }
}

/// Listing/index view of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: String,
    pub name: String,
    pub checklist_count: usize,
    pub section_count: usize,
    pub last_modified: f64,
}
