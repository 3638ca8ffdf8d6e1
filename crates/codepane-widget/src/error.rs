use codepane_highlight::GrammarError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors surfaced by [`EditorWidget`](crate::EditorWidget).
pub enum WidgetError {
    #[error("grammar error: {0}")]
    /// The grammar registry could not be built.
    Grammar(#[from] GrammarError),

    #[error("invalid editor options: {0}")]
    /// Editor options failed to parse.
    Options(#[from] serde_yaml::Error),

    #[error("document load failed: {0}")]
    /// The host failed to load a document (cancellation is not an error).
    Load(String),

    #[error("document save failed: {0}")]
    /// The host failed to save a document (cancellation is not an error).
    Save(String),
}
