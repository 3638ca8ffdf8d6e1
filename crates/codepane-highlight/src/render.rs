//! HTML escaping and `<span>` markup helpers.

/// Escapes the five HTML-significant characters `& < > " '`.
///
/// Everything else passes through unchanged, so the escaped text lines up
/// character for character with the original once entities are decoded.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

pub(crate) fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

/// CSS classes for a dotted scope.
///
/// The first segment gets `prefix`; later segments get one trailing underscore
/// per level of nesting, so `title.function` becomes `hljs-title function_`.
pub fn scope_classes(scope: &str, prefix: &str) -> String {
    let mut out = String::new();
    for (depth, part) in scope.split('.').filter(|p| !p.is_empty()).enumerate() {
        if depth == 0 {
            out.push_str(prefix);
            out.push_str(part);
        } else {
            out.push(' ');
            out.push_str(part);
            out.extend(std::iter::repeat_n('_', depth));
        }
    }
    out
}

pub(crate) fn open_scope(out: &mut String, scope: &str, prefix: &str) {
    out.push_str("<span class=\"");
    out.push_str(&scope_classes(scope, prefix));
    out.push_str("\">");
}

pub(crate) fn open_language(out: &mut String, language: &str) {
    out.push_str("<span class=\"language-");
    push_escaped(out, language);
    out.push_str("\">");
}

pub(crate) fn close(out: &mut String) {
    out.push_str("</span>");
}

pub(crate) fn push_token(out: &mut String, scope: Option<&str>, text: &str, prefix: &str) {
    match scope {
        Some(scope) if !text.is_empty() => {
            open_scope(out, scope, prefix);
            push_escaped(out, text);
            close(out);
        }
        _ => push_escaped(out, text),
    }
}

/// Recovers the plain text from highlighted markup.
///
/// Drops every tag and decodes the entities [`escape_html`] produces. For any
/// pipeline output this returns exactly the text that was highlighted.
pub fn markup_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(idx) = rest.find(['<', '&']) {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        if rest.starts_with('<') {
            match rest.find('>') {
                Some(end) => rest = &rest[end + 1..],
                None => {
                    out.push_str(rest);
                    return out;
                }
            }
            continue;
        }
        let decoded = [
            ("&amp;", '&'),
            ("&lt;", '<'),
            ("&gt;", '>'),
            ("&quot;", '"'),
            ("&#x27;", '\''),
        ]
        .into_iter()
        .find(|(entity, _)| rest.starts_with(entity));
        match decoded {
            Some((entity, ch)) => {
                out.push(ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain ünïcode"), "plain ünïcode");
    }

    #[test]
    fn dotted_scopes_expand_to_nested_classes() {
        assert_eq!(scope_classes("keyword", "hljs-"), "hljs-keyword");
        assert_eq!(scope_classes("title.function", "hljs-"), "hljs-title function_");
        assert_eq!(
            scope_classes("title.class.inherited", "cp-"),
            "cp-title class_ inherited__"
        );
    }

    #[test]
    fn markup_to_text_inverts_escaping() {
        let text = "if (a < b && c > \"d\") { 'e' }";
        let mut html = String::new();
        push_token(&mut html, Some("keyword"), "if", "hljs-");
        push_escaped(&mut html, &text[2..]);
        assert_eq!(markup_to_text(&html), text);
    }

    #[test]
    fn empty_tokens_emit_no_span() {
        let mut html = String::new();
        push_token(&mut html, Some("keyword"), "", "hljs-");
        assert_eq!(html, "");
    }
}
