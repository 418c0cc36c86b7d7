//! # profile-registry
//!
//! Markdown 档案解析器与内存档案注册表，负责加载档案目录并维护持久化的摘要索引。
//!
//! A markdown profile parser and in-memory profile registry. The registry
//! loads a directory of markdown documents, extracts a structured
//! representation from each (title, description, ordered sections, checklist
//! items), serves that structure to callers, and keeps a persisted summary
//! index in sync.
//!
//! ## Overview
//!
//! - **Total parsing**: any markdown text parses into a [`Profile`]; there
//!   is no "invalid markdown" error, only degenerate output.
//! - **Wholesale replacement**: load and reload publish a complete fresh
//!   mapping atomically; readers always see a consistent snapshot.
//! - **Persisted index**: every load rewrites a JSON summary index
//!   (`metadata.json` by default) at the root of the managed directory.
//! - **Reload events**: each successful reload pushes a `profiles-reloaded`
//!   event to registered sinks, carrying the fresh summaries.
//!
//! ## Quick Start
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
//!         println!(
//!             "{} — {} sections, {} checklist items",
//!             summary.name, summary.section_count, summary.checklist_count
//!         );
//!     }
//!
//!     if let Some(checklist) = manager.get_profile_checklist("onboarding") {
//!         for item in checklist {
//!             println!("{}", item);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`profile`] | Parser, directory loader, registry, and event sinks |
//! | [`error`] | Unified crate error type |

pub mod error;
pub mod profile;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use profile::event::{InMemoryEventSink, NoopEventSink, ProfileEvent, ProfileEventSink};
pub use profile::manager::{ProfileIndex, ProfileManager, DEFAULT_INDEX_FILE};
pub use profile::parser::{parse, ProfileParser};
pub use profile::{Profile, ProfileError, ProfileSection, ProfileSummary};
