#![warn(missing_docs)]
//! `codepane-highlight` - grammar registry and HTML highlighting for codepane.
//!
//! Grammars are small YAML definitions (comments, strings, numbers, keywords,
//! token rules and delimited regions) compiled to `regex` patterns. A region
//! can hand its content to another grammar, and a grammar can name a `base`
//! grammar for everything it does not match, so markup, template directives
//! and expressions nest freely.
//!
//! ```
//! use codepane_highlight::HighlightPipeline;
//!
//! let pipeline = HighlightPipeline::builtin().unwrap();
//! let out = pipeline.highlight("let x = 1;", "js");
//! assert_eq!(out.language, "javascript");
//! assert!(out.html.contains("<span class=\"hljs-keyword\">let</span>"));
//! ```

mod builtin;
mod compiler;
mod definition;
mod engine;
mod error;
mod pipeline;
mod registry;
mod render;

pub use compiler::{CompiledGrammar, Matcher, MatcherKind};
pub use definition::{BlockComment, GrammarDefinition, Precedence, RegionDefinition, RuleDefinition};
pub use engine::{Highlight, MAX_NESTING, Tokenizer};
pub use error::GrammarError;
pub use pipeline::{HighlightOptions, HighlightPipeline, HighlightedCode};
pub use registry::GrammarRegistry;
pub use render::{escape_html, markup_to_text, scope_classes};
