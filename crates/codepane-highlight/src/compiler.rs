use crate::definition::{GrammarDefinition, Precedence, RuleDefinition};
use crate::error::GrammarError;
use regex::{Regex, RegexBuilder};

/// Keywords shared by so many languages that a hit says nothing about which
/// one the text is written in. They are still highlighted, but score nothing.
const COMMON_KEYWORDS: &[&str] = &[
    "of", "and", "for", "in", "not", "or", "if", "then", "parent", "list", "value",
];

#[derive(Debug, Clone)]
/// A compiled grammar.
///
/// This is the runtime representation consumed by the tokenizer. Matchers are
/// kept in priority order: when two matchers find a token at the same offset
/// the earlier one wins.
pub struct CompiledGrammar {
    /// Lowercase registry key.
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Whether the grammar takes part in automatic language detection.
    pub auto_detect: bool,
    /// Whether the grammar is an internal helper.
    pub hidden: bool,
    /// Grammar that renders unmatched text, if any.
    pub base: Option<String>,
    /// Matchers in priority order.
    pub matchers: Vec<Matcher>,
}

#[derive(Debug, Clone)]
/// One compiled pattern and what to do with its matches.
pub struct Matcher {
    /// Original pattern source.
    pub source: String,
    /// Compiled pattern.
    pub regex: Regex,
    /// Relevance contributed by each hit.
    pub relevance: u32,
    /// Token or region behavior.
    pub kind: MatcherKind,
}

#[derive(Debug, Clone)]
/// How a matcher turns a match into markup.
pub enum MatcherKind {
    /// A single token.
    Token {
        /// Scope applied to the whole match.
        scope: Option<String>,
        /// Scopes applied to capture groups, ordered by group index.
        captures: Vec<(usize, String)>,
    },
    /// A keyword list; hits on common keywords score zero.
    Keyword {
        /// Scope applied to each keyword.
        scope: String,
    },
    /// A delimited region.
    Region {
        /// Scope for the delimiters, or the whole region without `embed`.
        scope: Option<String>,
        /// Closing delimiter.
        end: Regex,
        /// Grammar that highlights the region content.
        embed: Option<String>,
    },
}

impl CompiledGrammar {
    /// Compiles `definition` under the registry key `name`.
    ///
    /// Every pattern is compiled here, so a grammar that compiles never fails
    /// on a pattern later. Referenced grammars are not resolved; the tokenizer
    /// looks them up when it first needs them.
    pub fn compile(name: &str, definition: GrammarDefinition) -> Result<Self, GrammarError> {
        let case_insensitive = definition.case_insensitive;
        let build = |pattern: &str| compile_pattern(pattern, case_insensitive);

        let mut matchers = Vec::new();

        for region in &definition.regions {
            let begin = build(&region.begin)?;
            if begin.is_match("") {
                return Err(GrammarError::EmptyDelimiter(region.begin.clone()));
            }
            matchers.push(Matcher {
                source: region.begin.clone(),
                regex: begin,
                relevance: region.relevance,
                kind: MatcherKind::Region {
                    scope: region.scope.clone(),
                    end: build(&region.end)?,
                    embed: region.embed.as_ref().map(|e| e.to_ascii_lowercase()),
                },
            });
        }

        let (high, normal): (Vec<&RuleDefinition>, Vec<&RuleDefinition>) = definition
            .rules
            .iter()
            .partition(|rule| rule.precedence == Precedence::High);

        for rule in high {
            matchers.push(compile_rule(rule, case_insensitive)?);
        }

        for comment in &definition.block_comments {
            let begin = build(&comment.begin)?;
            if begin.is_match("") {
                return Err(GrammarError::EmptyDelimiter(comment.begin.clone()));
            }
            matchers.push(Matcher {
                source: comment.begin.clone(),
                regex: begin,
                relevance: 0,
                kind: MatcherKind::Region {
                    scope: Some("comment".to_string()),
                    end: build(&comment.end)?,
                    embed: None,
                },
            });
        }

        for pattern in &definition.line_comments {
            let source = format!("(?:{pattern}).*");
            matchers.push(token(build(&source)?, pattern, "comment"));
        }

        for pattern in &definition.strings {
            matchers.push(token(build(pattern)?, pattern, "string"));
        }

        for (scope, words) in &definition.keywords {
            let mut words: Vec<&str> = words
                .iter()
                .map(String::as_str)
                .filter(|w| !w.is_empty())
                .collect();
            if words.is_empty() {
                continue;
            }
            // Longest first: the regex crate takes the leftmost alternative, not the longest.
            words.sort_by(|a, b| b.len().cmp(&a.len()));
            let alternation = words
                .iter()
                .map(|w| keyword_pattern(w))
                .collect::<Vec<_>>()
                .join("|");
            let source = format!("(?:{alternation})");
            matchers.push(Matcher {
                regex: build(&source)?,
                source,
                relevance: definition.keyword_relevance,
                kind: MatcherKind::Keyword {
                    scope: scope.clone(),
                },
            });
        }

        if let Some(pattern) = &definition.number {
            matchers.push(token(build(pattern)?, pattern, "number"));
        }

        for rule in normal {
            matchers.push(compile_rule(rule, case_insensitive)?);
        }

        let display_name = definition.name.unwrap_or_else(|| name.to_string());
        Ok(Self {
            name: name.to_string(),
            display_name,
            auto_detect: definition.auto_detect && !definition.hidden,
            hidden: definition.hidden,
            base: definition.base.map(|b| b.to_ascii_lowercase()),
            matchers,
        })
    }

    /// Every grammar this one may hand text to.
    pub fn referenced_grammars(&self) -> impl Iterator<Item = &str> {
        self.base
            .as_deref()
            .into_iter()
            .chain(self.matchers.iter().filter_map(|m| match &m.kind {
                MatcherKind::Region { embed, .. } => embed.as_deref(),
                _ => None,
            }))
    }
}

/// `word` escaped, with `\b` on each edge that is a word character.
fn keyword_pattern(word: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pattern = String::new();
    if word.starts_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(word));
    if word.ends_with(is_word) {
        pattern.push_str(r"\b");
    }
    pattern
}

impl Matcher {
    /// Relevance of one hit on `matched`.
    pub(crate) fn relevance_of(&self, matched: &str) -> u32 {
        match self.kind {
            MatcherKind::Keyword { .. }
                if COMMON_KEYWORDS
                    .iter()
                    .any(|k| k.eq_ignore_ascii_case(matched)) =>
            {
                0
            }
            _ => self.relevance,
        }
    }
}

fn token(regex: Regex, source: &str, scope: &str) -> Matcher {
    Matcher {
        source: source.to_string(),
        regex,
        relevance: 0,
        kind: MatcherKind::Token {
            scope: Some(scope.to_string()),
            captures: Vec::new(),
        },
    }
}

fn compile_rule(rule: &RuleDefinition, case_insensitive: bool) -> Result<Matcher, GrammarError> {
    let regex = compile_pattern(&rule.pattern, case_insensitive)?;
    let groups = regex.captures_len();
    let mut captures = Vec::with_capacity(rule.captures.len());
    for (&group, scope) in &rule.captures {
        if group == 0 || group >= groups {
            return Err(GrammarError::RegexCompile {
                pattern: rule.pattern.clone(),
                message: format!("capture group {group} does not exist"),
            });
        }
        captures.push((group, scope.clone()));
    }
    Ok(Matcher {
        source: rule.pattern.clone(),
        regex,
        relevance: rule.relevance,
        kind: MatcherKind::Token {
            scope: rule.scope.clone(),
            captures,
        },
    })
}

fn compile_pattern(pattern: &str, case_insensitive: bool) -> Result<Regex, GrammarError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| GrammarError::RegexCompile {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
