//! Profile subsystem error types

/// Profile subsystem error types
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Failed to write profile index to {path}: {reason}{}", .hint.as_ref().map(|h| format!("\n Hint: {}", h)).unwrap_or_default())]
    IndexWrite {
        path: String,
        reason: String,
        hint: Option<String>,
    },
}
