use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::GrammarError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
/// Raw YAML grammar definition.
///
/// Every pattern is a `regex` crate pattern. A definition only lists what it
/// recognizes; text between matches is rendered by the `base` grammar when one
/// is named, otherwise it is emitted as escaped plain text.
pub struct GrammarDefinition {
    #[serde(default)]
    /// Human-readable name (e.g. `JavaScript`).
    pub name: Option<String>,

    #[serde(default)]
    /// Compile every pattern case-insensitively.
    pub case_insensitive: bool,

    #[serde(default = "default_true")]
    /// Whether the grammar takes part in automatic language detection.
    pub auto_detect: bool,

    #[serde(default)]
    /// Hidden grammars are helpers for other grammars: they are never
    /// auto-detected, never listed, and embed without a language wrapper.
    pub hidden: bool,

    #[serde(default)]
    /// Grammar that renders the text this grammar does not match.
    pub base: Option<String>,

    #[serde(default)]
    /// Patterns that start a comment running to the end of the line.
    pub line_comments: Vec<String>,

    #[serde(default)]
    /// Delimited comments.
    pub block_comments: Vec<BlockComment>,

    #[serde(default)]
    /// String literal patterns.
    pub strings: Vec<String>,

    #[serde(default)]
    /// Number literal pattern.
    pub number: Option<String>,

    #[serde(default)]
    /// Keyword lists keyed by scope (`keyword`, `literal`, `built_in`, ...).
    pub keywords: BTreeMap<String, Vec<String>>,

    #[serde(default = "default_keyword_relevance")]
    /// Relevance contributed by each keyword hit.
    pub keyword_relevance: u32,

    #[serde(default)]
    /// Extra token rules.
    pub rules: Vec<RuleDefinition>,

    #[serde(default)]
    /// Delimited regions, optionally handing their content to another grammar.
    pub regions: Vec<RegionDefinition>,
}

fn default_true() -> bool {
    true
}

fn default_keyword_relevance() -> u32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// A comment with an opening and a closing delimiter.
pub struct BlockComment {
    /// Opening delimiter pattern.
    pub begin: String,
    /// Closing delimiter pattern.
    pub end: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Where a rule sits relative to the built-in token classes.
pub enum Precedence {
    /// Tried after comments, strings, keywords and numbers.
    #[default]
    Normal,
    /// Tried before comments, strings, keywords and numbers.
    High,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// A single token rule.
pub struct RuleDefinition {
    #[serde(rename = "match")]
    /// Pattern to match.
    pub pattern: String,

    #[serde(default)]
    /// Scope applied to the whole match.
    pub scope: Option<String>,

    #[serde(default)]
    /// Scopes applied to individual capture groups.
    pub captures: BTreeMap<usize, String>,

    #[serde(default)]
    /// Relevance contributed by each hit.
    pub relevance: u32,

    #[serde(default)]
    /// Ordering relative to comments, strings, keywords and numbers.
    pub precedence: Precedence,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
/// A delimited region.
///
/// Without `embed` the whole region (delimiters included) is one token. With
/// `embed` the delimiters get `scope` and the content is highlighted by the
/// named grammar. A region whose end never matches runs to the end of input.
pub struct RegionDefinition {
    /// Opening delimiter pattern.
    pub begin: String,
    /// Closing delimiter pattern, searched from the end of the opening match.
    pub end: String,

    #[serde(default)]
    /// Scope for the delimiters (or the whole region without `embed`).
    pub scope: Option<String>,

    #[serde(default)]
    /// Grammar that highlights the region content.
    pub embed: Option<String>,

    #[serde(default)]
    /// Relevance contributed by each region.
    pub relevance: u32,
}

impl GrammarDefinition {
    /// Parses a definition from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, GrammarError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Names of every grammar this definition refers to (`base` and `embed`).
    pub fn referenced_grammars(&self) -> impl Iterator<Item = &str> {
        self.base
            .as_deref()
            .into_iter()
            .chain(self.regions.iter().filter_map(|r| r.embed.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_definition_with_defaults() {
        let def = GrammarDefinition::from_yaml("name: Tiny\n").unwrap();
        assert_eq!(def.name.as_deref(), Some("Tiny"));
        assert!(def.auto_detect);
        assert!(!def.hidden);
        assert_eq!(def.keyword_relevance, 1);
        assert!(def.rules.is_empty());
    }

    #[test]
    fn parses_rules_regions_and_captures() {
        let yaml = r#"
name: Demo
base: html
keywords:
  keyword: [if, else]
rules:
  - match: '\b(def)\s+(\w+)'
    captures: {1: keyword, 2: title.function}
    relevance: 2
    precedence: high
regions:
  - { begin: '<%', end: '%>', scope: tag, embed: ruby }
"#;
        let def = GrammarDefinition::from_yaml(yaml).unwrap();
        assert_eq!(def.keywords["keyword"], vec!["if", "else"]);
        assert_eq!(def.rules[0].precedence, Precedence::High);
        assert_eq!(def.rules[0].captures[&2], "title.function");
        assert_eq!(
            def.referenced_grammars().collect::<Vec<_>>(),
            vec!["html", "ruby"]
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = GrammarDefinition::from_yaml("name: X\ncontexts: {}\n").unwrap_err();
        assert!(matches!(err, GrammarError::Yaml(_)));
    }
}
