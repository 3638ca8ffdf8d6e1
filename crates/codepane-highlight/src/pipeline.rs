use crate::compiler::CompiledGrammar;
use crate::engine::{Highlight, Tokenizer};
use crate::error::GrammarError;
use crate::registry::GrammarRegistry;
use crate::render::escape_html;
use codepane_lang::resolve_language_id;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Rendering options for [`HighlightPipeline`].
pub struct HighlightOptions {
    /// Prefix put in front of every token class.
    pub class_prefix: String,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            class_prefix: "hljs-".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of one highlighting request.
pub struct HighlightedCode {
    /// Markup whose text content equals the input; empty for blank input.
    pub html: String,
    /// Grammar that produced the markup, or the requested id when none did.
    pub language: String,
    /// `false` only when a grammar failed while tokenizing.
    pub valid: bool,
}

impl HighlightedCode {
    fn escaped(text: &str, language: &str, valid: bool) -> Self {
        Self {
            html: escape_html(text),
            language: language.to_string(),
            valid,
        }
    }
}

#[derive(Debug, Clone)]
/// Turns source text into highlighted markup.
///
/// Known languages are tokenized with their grammar. Anything else goes
/// through automatic detection; text no grammar recognizes comes back escaped.
/// Highlighting never fails: grammar errors are logged and reported through
/// [`HighlightedCode::valid`].
pub struct HighlightPipeline {
    registry: Arc<GrammarRegistry>,
    options: HighlightOptions,
}

impl HighlightPipeline {
    /// Create a pipeline with default options.
    pub fn new(registry: Arc<GrammarRegistry>) -> Self {
        Self::with_options(registry, HighlightOptions::default())
    }

    /// Create a pipeline with explicit options.
    pub fn with_options(registry: Arc<GrammarRegistry>, options: HighlightOptions) -> Self {
        Self { registry, options }
    }

    /// Create a pipeline over the bundled grammars.
    pub fn builtin() -> Result<Self, GrammarError> {
        Ok(Self::new(Arc::new(GrammarRegistry::with_builtin()?)))
    }

    /// The grammars this pipeline highlights with.
    pub fn registry(&self) -> &GrammarRegistry {
        &self.registry
    }

    /// Rendering options.
    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// Highlights `text` as `language_id`.
    ///
    /// `language_id` may be any alias known to [`codepane_lang::Language`] or
    /// any registered grammar name. Unknown ids fall back to detection.
    pub fn highlight(&self, text: &str, language_id: &str) -> HighlightedCode {
        if text.trim().is_empty() {
            return HighlightedCode {
                html: String::new(),
                language: language_id.to_string(),
                valid: true,
            };
        }

        let resolved = resolve_language_id(language_id);
        if let Some(grammar) = self.registry.get(&resolved) {
            return match self.try_highlight_with(&grammar, text) {
                Ok(highlight) => HighlightedCode {
                    html: highlight.html,
                    language: grammar.name.clone(),
                    valid: true,
                },
                Err(err) => {
                    log::warn!("highlighting as '{}' failed: {err}", grammar.name);
                    HighlightedCode::escaped(text, language_id, false)
                }
            };
        }

        match self.detect(text) {
            Some((grammar, highlight)) => {
                log::trace!(
                    "detected '{}' (relevance {}) for unknown id '{language_id}'",
                    grammar.name,
                    highlight.relevance
                );
                HighlightedCode {
                    html: highlight.html,
                    language: grammar.name.clone(),
                    valid: true,
                }
            }
            None => HighlightedCode::escaped(text, language_id, true),
        }
    }

    /// Highlights `text` with a specific registered grammar, reporting errors.
    pub fn try_highlight(&self, text: &str, grammar: &str) -> Result<Highlight, GrammarError> {
        let grammar = self
            .registry
            .get(grammar)
            .ok_or_else(|| GrammarError::UnknownGrammar(grammar.to_string()))?;
        self.try_highlight_with(&grammar, text)
    }

    /// Best-scoring detectable grammar for `text`.
    ///
    /// Grammars that fail are skipped. Returns `None` when nothing scores above
    /// zero; ties go to the grammar registered first.
    pub fn detect(&self, text: &str) -> Option<(Arc<CompiledGrammar>, Highlight)> {
        let mut best: Option<(Arc<CompiledGrammar>, Highlight)> = None;
        for grammar in self.registry.iter().filter(|g| g.auto_detect) {
            let highlight = match self.try_highlight_with(grammar, text) {
                Ok(highlight) => highlight,
                Err(err) => {
                    log::debug!("skipping '{}' during detection: {err}", grammar.name);
                    continue;
                }
            };
            let better = match &best {
                Some((_, current)) => highlight.relevance > current.relevance,
                None => highlight.relevance > 0,
            };
            if better {
                best = Some((grammar.clone(), highlight));
            }
        }
        best
    }

    /// Names of every grammar a user can pick, sorted.
    pub fn supported_languages(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .registry
            .iter()
            .filter(|g| !g.hidden)
            .map(|g| g.name.clone())
            .collect();
        names.sort();
        names
    }

    fn try_highlight_with(
        &self,
        grammar: &CompiledGrammar,
        text: &str,
    ) -> Result<Highlight, GrammarError> {
        Tokenizer::new(&self.registry, &self.options.class_prefix).highlight(grammar, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pipeline(grammars: &[(&str, &str)]) -> HighlightPipeline {
        let mut registry = GrammarRegistry::new();
        for (name, yaml) in grammars {
            registry.register_yaml(name, yaml).unwrap();
        }
        HighlightPipeline::new(Arc::new(registry))
    }

    #[test]
    fn blank_text_short_circuits() {
        let p = pipeline(&[]);
        assert_eq!(
            p.highlight("  \n\t", "whatever"),
            HighlightedCode {
                html: String::new(),
                language: "whatever".to_string(),
                valid: true,
            }
        );
    }

    #[test]
    fn unknown_id_without_detection_hit_returns_escaped_text() {
        let p = pipeline(&[("demo", "keywords:\n  keyword: [zebra]\n")]);
        let out = p.highlight("<b>", "mystery");
        assert_eq!(out.html, "&lt;b&gt;");
        assert_eq!(out.language, "mystery");
        assert!(out.valid);
    }

    #[test]
    fn detection_picks_highest_relevance_then_registration_order() {
        let p = pipeline(&[
            ("first", "keywords:\n  keyword: [alpha]\n"),
            ("second", "keywords:\n  keyword: [alpha, beta]\n"),
            ("third", "keywords:\n  keyword: [alpha, beta]\n"),
        ]);
        assert_eq!(p.highlight("alpha", "?").language, "first");
        assert_eq!(p.highlight("alpha beta", "?").language, "second");
    }

    #[test]
    fn tokenizer_failure_is_reported_as_invalid() {
        let p = pipeline(&[("broken", "base: missing\n")]);
        let out = p.highlight("a & b", "broken");
        assert_eq!(out.html, "a &amp; b");
        assert_eq!(out.language, "broken");
        assert!(!out.valid);
    }

    #[test]
    fn class_prefix_is_configurable() {
        let mut registry = GrammarRegistry::new();
        registry
            .register_yaml("demo", "keywords:\n  keyword: [let]\n")
            .unwrap();
        let p = HighlightPipeline::with_options(
            Arc::new(registry),
            HighlightOptions {
                class_prefix: "cp-".to_string(),
            },
        );
        assert_eq!(
            p.highlight("let", "demo").html,
            "<span class=\"cp-keyword\">let</span>"
        );
    }

    #[test]
    fn hidden_grammars_are_not_listed() {
        let p = pipeline(&[("b", "name: B\n"), ("helper", "hidden: true\n"), ("a", "name: A\n")]);
        assert_eq!(p.supported_languages(), vec!["a", "b"]);
    }
}
