use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading, compiling, or running a grammar.
pub enum GrammarError {
    #[error("YAML parse error: {0}")]
    /// YAML parsing failed.
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    /// Filesystem I/O failed.
    Io(#[from] std::io::Error),

    #[error("invalid grammar name '{0}'")]
    /// A grammar was registered under an empty or whitespace-only name.
    InvalidName(String),

    #[error("unknown grammar '{0}'")]
    /// An embedded or base grammar reference could not be resolved.
    UnknownGrammar(String),

    #[error("regex compile error for pattern '{pattern}': {message}")]
    /// A pattern in a grammar definition failed to compile.
    RegexCompile {
        /// The pattern source as written in the definition.
        pattern: String,
        /// The compiler error message.
        message: String,
    },

    #[error("pattern '{0}' matches the empty string")]
    /// A region delimiter can match without consuming input.
    EmptyDelimiter(String),

    #[error("grammar nesting deeper than {limit} levels at '{grammar}'")]
    /// Embedded or base grammars nest past the supported depth, usually a cycle.
    EmbedDepthExceeded {
        /// The grammar that would have been entered.
        grammar: String,
        /// The depth limit that was hit.
        limit: usize,
    },
}
