//! Document load/save collaborator.
//!
//! Dialogs and filesystem access belong to the host. The core only needs the loaded text (to
//! feed the minimal-diff applier and the highlighter) and a way to hand content back for saving.
//! A dismissed dialog is a normal outcome: `Ok(None)` / [`SaveOutcome::Cancelled`].

/// One entry of a picker's file-type filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Human readable description (e.g. `"Python files"`).
    pub description: String,
    /// MIME type.
    pub mime: String,
    /// Extensions including the leading dot.
    pub extensions: Vec<String>,
}

/// Parameters for a load dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadRequest {
    /// File-type filters for pickers that support them.
    pub filters: Vec<FileFilter>,
    /// Comma-separated accept string for plain file inputs.
    pub accept: String,
}

/// A document returned by [`DocumentIo::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    /// File contents.
    pub content: String,
    /// File name as reported by the host.
    pub name: String,
}

/// Parameters for a save dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    /// Text to save.
    pub content: String,
    /// Language id the content is written in.
    pub language: String,
    /// Suggested file name.
    pub suggested_name: String,
    /// File-type filters.
    pub filters: Vec<FileFilter>,
}

/// How a save ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Saved under the given name.
    Saved {
        /// Final file name.
        name: String,
    },
    /// The user dismissed the dialog.
    Cancelled,
}

/// Host-provided load/save operations.
pub trait DocumentIo {
    /// Error type for genuine I/O failures (not cancellation).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Ask the user for a document. `Ok(None)` means the dialog was dismissed.
    fn load(&mut self, request: &LoadRequest) -> Result<Option<LoadedDocument>, Self::Error>;

    /// Save `request.content`.
    fn save(&mut self, request: &SaveRequest) -> Result<SaveOutcome, Self::Error>;
}
