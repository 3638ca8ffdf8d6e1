use crate::compiler::{CompiledGrammar, Matcher, MatcherKind};
use crate::error::GrammarError;
use crate::registry::GrammarRegistry;
use crate::render::{close, open_language, open_scope, push_escaped, push_token};
use regex::Regex;
use std::ops::Range;
use std::sync::Arc;

/// How deep `base` and `embed` references may nest before tokenizing stops.
pub const MAX_NESTING: usize = 16;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Markup and detection score produced for one piece of text.
pub struct Highlight {
    /// Highlighted markup.
    pub html: String,
    /// Sum of the relevance of every match, nested grammars included.
    pub relevance: u32,
}

/// Tokenizes text with a grammar from a registry and renders it as markup.
///
/// Offsets are byte offsets into the input `&str`; every match boundary lands
/// on a char boundary because the patterns operate on UTF-8 text.
pub struct Tokenizer<'a> {
    registry: &'a GrammarRegistry,
    class_prefix: &'a str,
}

#[derive(Debug, Clone)]
enum Slot {
    Unsearched,
    Exhausted,
    At(Range<usize>),
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer resolving nested grammars in `registry`.
    pub fn new(registry: &'a GrammarRegistry, class_prefix: &'a str) -> Self {
        Self {
            registry,
            class_prefix,
        }
    }

    /// Highlights `text` with `grammar`.
    ///
    /// Fails when a nested grammar is missing or nesting exceeds
    /// [`MAX_NESTING`]. The markup of a successful run always decodes back to
    /// exactly `text`.
    pub fn highlight(
        &self,
        grammar: &CompiledGrammar,
        text: &str,
    ) -> Result<Highlight, GrammarError> {
        let mut out = Highlight {
            html: String::with_capacity(text.len() + text.len() / 2),
            relevance: 0,
        };
        self.render(grammar, text, 0, &mut out)?;
        Ok(out)
    }

    fn render(
        &self,
        grammar: &CompiledGrammar,
        text: &str,
        depth: usize,
        out: &mut Highlight,
    ) -> Result<(), GrammarError> {
        let mut slots = vec![Slot::Unsearched; grammar.matchers.len()];
        let mut pos = 0;
        while pos < text.len() {
            let Some((index, found)) = next_match(grammar, text, pos, &mut slots) else {
                break;
            };
            self.render_plain(grammar, &text[pos..found.start], depth, out)?;
            pos = self.render_match(&grammar.matchers[index], text, found, depth, out)?;
        }
        self.render_plain(grammar, &text[pos..], depth, out)
    }

    fn render_plain(
        &self,
        grammar: &CompiledGrammar,
        text: &str,
        depth: usize,
        out: &mut Highlight,
    ) -> Result<(), GrammarError> {
        if text.is_empty() {
            return Ok(());
        }
        match &grammar.base {
            Some(base) => {
                let base = self.resolve(base, depth + 1)?;
                self.render(&base, text, depth + 1, out)
            }
            None => {
                push_escaped(&mut out.html, text);
                Ok(())
            }
        }
    }

    fn render_match(
        &self,
        matcher: &Matcher,
        text: &str,
        found: Range<usize>,
        depth: usize,
        out: &mut Highlight,
    ) -> Result<usize, GrammarError> {
        let matched = &text[found.clone()];
        out.relevance = out.relevance.saturating_add(matcher.relevance_of(matched));

        match &matcher.kind {
            MatcherKind::Keyword { scope } => {
                push_token(&mut out.html, Some(scope), matched, self.class_prefix);
                Ok(found.end)
            }
            MatcherKind::Token { scope, captures } if captures.is_empty() => {
                push_token(&mut out.html, scope.as_deref(), matched, self.class_prefix);
                Ok(found.end)
            }
            MatcherKind::Token { scope, captures } => {
                if let Some(scope) = scope {
                    open_scope(&mut out.html, scope, self.class_prefix);
                }
                self.render_captures(&matcher.regex, captures, text, found.clone(), out);
                if scope.is_some() {
                    close(&mut out.html);
                }
                Ok(found.end)
            }
            MatcherKind::Region { scope, end, embed } => {
                let (content_end, region_end) = match end.find_at(text, found.end) {
                    Some(m) => (m.start(), m.end()),
                    None => (text.len(), text.len()),
                };
                let scope = scope.as_deref();
                let Some(embed) = embed else {
                    push_token(
                        &mut out.html,
                        scope,
                        &text[found.start..region_end],
                        self.class_prefix,
                    );
                    return Ok(region_end);
                };

                let inner = self.resolve(embed, depth + 1)?;
                push_token(&mut out.html, scope, matched, self.class_prefix);
                let content = &text[found.end..content_end];
                if !content.is_empty() {
                    if !inner.hidden {
                        open_language(&mut out.html, &inner.name);
                    }
                    self.render(&inner, content, depth + 1, out)?;
                    if !inner.hidden {
                        close(&mut out.html);
                    }
                }
                push_token(
                    &mut out.html,
                    scope,
                    &text[content_end..region_end],
                    self.class_prefix,
                );
                Ok(region_end)
            }
        }
    }

    fn render_captures(
        &self,
        regex: &Regex,
        captures: &[(usize, String)],
        text: &str,
        found: Range<usize>,
        out: &mut Highlight,
    ) {
        let groups = regex
            .captures_at(text, found.start)
            .filter(|caps| caps.get(0).is_some_and(|m| m.range() == found));
        let Some(groups) = groups else {
            push_escaped(&mut out.html, &text[found]);
            return;
        };

        let mut cursor = found.start;
        for (group, scope) in captures {
            let Some(m) = groups.get(*group) else {
                continue;
            };
            if m.start() < cursor {
                continue;
            }
            push_escaped(&mut out.html, &text[cursor..m.start()]);
            push_token(&mut out.html, Some(scope), m.as_str(), self.class_prefix);
            cursor = m.end();
        }
        push_escaped(&mut out.html, &text[cursor..found.end]);
    }

    fn resolve(&self, name: &str, depth: usize) -> Result<Arc<CompiledGrammar>, GrammarError> {
        if depth > MAX_NESTING {
            return Err(GrammarError::EmbedDepthExceeded {
                grammar: name.to_string(),
                limit: MAX_NESTING,
            });
        }
        self.registry
            .get(name)
            .ok_or_else(|| GrammarError::UnknownGrammar(name.to_string()))
    }
}

/// Earliest match at or after `pos`; ties go to the matcher listed first.
///
/// Each slot caches the matcher's last search. A cached match that still
/// starts at or after `pos` is exactly what a fresh search would return.
fn next_match(
    grammar: &CompiledGrammar,
    text: &str,
    pos: usize,
    slots: &mut [Slot],
) -> Option<(usize, Range<usize>)> {
    let mut best: Option<(usize, Range<usize>)> = None;
    for (index, matcher) in grammar.matchers.iter().enumerate() {
        let slot = &mut slots[index];
        let stale = match slot {
            Slot::Exhausted => continue,
            Slot::At(range) => range.start < pos,
            Slot::Unsearched => true,
        };
        if stale {
            *slot = match find_non_empty(&matcher.regex, text, pos) {
                Some(range) => Slot::At(range),
                None => Slot::Exhausted,
            };
        }
        let Slot::At(range) = slot else {
            continue;
        };
        if best.as_ref().is_none_or(|(_, b)| range.start < b.start) {
            best = Some((index, range.clone()));
        }
    }
    best
}

/// Like [`Regex::find_at`], but skips empty matches so every token consumes input.
fn find_non_empty(regex: &Regex, text: &str, mut from: usize) -> Option<Range<usize>> {
    while from <= text.len() {
        let m = regex.find_at(text, from)?;
        if !m.is_empty() {
            return Some(m.range());
        }
        from = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::markup_to_text;
    use pretty_assertions::assert_eq;

    fn registry(grammars: &[(&str, &str)]) -> GrammarRegistry {
        let mut registry = GrammarRegistry::new();
        for (name, yaml) in grammars {
            registry.register_yaml(name, yaml).unwrap();
        }
        registry
    }

    fn highlight(registry: &GrammarRegistry, name: &str, text: &str) -> Highlight {
        let grammar = registry.get(name).unwrap();
        Tokenizer::new(registry, "hljs-")
            .highlight(&grammar, text)
            .unwrap()
    }

    #[test]
    fn earliest_match_wins_and_ties_go_to_first_matcher() {
        let registry = registry(&[(
            "demo",
            "keywords:\n  keyword: [let]\nrules:\n  - { match: '[a-z]+', scope: variable }\n",
        )]);
        let out = highlight(&registry, "demo", "let x");
        assert_eq!(
            out.html,
            "<span class=\"hljs-keyword\">let</span> <span class=\"hljs-variable\">x</span>"
        );
        assert_eq!(out.relevance, 1);
    }

    #[test]
    fn unmatched_text_is_escaped() {
        let registry = registry(&[("demo", "number: '\\d+'\n")]);
        let out = highlight(&registry, "demo", "a<1>&");
        assert_eq!(out.html, "a&lt;<span class=\"hljs-number\">1</span>&gt;&amp;");
    }

    #[test]
    fn block_comments_run_to_end_when_unterminated() {
        let registry = registry(&[(
            "demo",
            "block_comments:\n  - { begin: '/\\*', end: '\\*/' }\n",
        )]);
        let out = highlight(&registry, "demo", "a /* b\nc");
        assert_eq!(out.html, "a <span class=\"hljs-comment\">/* b\nc</span>");
    }

    #[test]
    fn captures_split_a_match() {
        let registry = registry(&[(
            "demo",
            "rules:\n  - match: '(fn)\\s+(\\w+)'\n    captures: {1: keyword, 2: title.function}\n",
        )]);
        let out = highlight(&registry, "demo", "fn main()");
        assert_eq!(
            out.html,
            "<span class=\"hljs-keyword\">fn</span> <span class=\"hljs-title function_\">main</span>()"
        );
    }

    #[test]
    fn embedded_content_is_wrapped_in_a_language_span() {
        let registry = registry(&[
            (
                "outer",
                "regions:\n  - { begin: '\\{\\{', end: '\\}\\}', scope: punctuation, embed: inner }\n",
            ),
            ("inner", "number: '\\d+'\n"),
        ]);
        let out = highlight(&registry, "outer", "a {{1}} b");
        assert_eq!(
            out.html,
            "a <span class=\"hljs-punctuation\">{{</span><span class=\"language-inner\">\
             <span class=\"hljs-number\">1</span></span><span class=\"hljs-punctuation\">}}</span> b"
        );
    }

    #[test]
    fn base_grammar_renders_the_gaps() {
        let registry = registry(&[
            (
                "template",
                "base: markup\nregions:\n  - { begin: '\\[%', end: '%\\]', scope: template-tag, embed: directive }\n",
            ),
            (
                "markup",
                "rules:\n  - { match: '</?\\w+>', scope: tag, relevance: 1 }\n",
            ),
            ("directive", "keywords:\n  keyword: [GET]\nkeyword_relevance: 10\n"),
        ]);
        let text = "<b>[% GET x %]</b>";
        let out = highlight(&registry, "template", text);
        assert_eq!(markup_to_text(&out.html), text);
        assert!(out.html.starts_with("<span class=\"hljs-tag\">&lt;b&gt;</span>"));
        assert!(out.html.contains("<span class=\"hljs-keyword\">GET</span>"));
        assert_eq!(out.relevance, 12);
    }

    #[test]
    fn unknown_embed_is_an_error() {
        let registry = registry(&[(
            "outer",
            "regions:\n  - { begin: '<<', end: '>>', embed: nowhere }\n",
        )]);
        let grammar = registry.get("outer").unwrap();
        let err = Tokenizer::new(&registry, "hljs-")
            .highlight(&grammar, "x << y >>")
            .unwrap_err();
        assert!(matches!(err, GrammarError::UnknownGrammar(name) if name == "nowhere"));
    }

    #[test]
    fn self_referencing_base_hits_the_nesting_limit() {
        let registry = registry(&[("loop", "base: loop\n")]);
        let grammar = registry.get("loop").unwrap();
        let err = Tokenizer::new(&registry, "hljs-")
            .highlight(&grammar, "anything")
            .unwrap_err();
        assert!(matches!(err, GrammarError::EmbedDepthExceeded { limit: MAX_NESTING, .. }));
    }

    #[test]
    fn empty_matches_are_skipped() {
        let registry = registry(&[("demo", "rules:\n  - { match: 'x*', scope: a }\n")]);
        let out = highlight(&registry, "demo", "ébxx");
        assert_eq!(out.html, "éb<span class=\"hljs-a\">xx</span>");
    }
}
