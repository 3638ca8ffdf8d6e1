use crate::error::WidgetError;
use serde::{Deserialize, Serialize};

/// When the Tab key is captured for indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TabCapture {
    /// Tab always indents, caret or selection.
    #[default]
    Always,
    /// Tab indents only a non-empty selection; with a caret it moves focus.
    SelectionOnly,
}

/// Widget configuration.
///
/// Every field has a default, so a YAML document only needs the keys it changes:
///
/// ```
/// use codepane_widget::{EditorOptions, TabCapture};
///
/// let options = EditorOptions::from_yaml("language: python\ntab_capture: selection_only\n").unwrap();
/// assert_eq!(options.language, "python");
/// assert_eq!(options.tab_capture, TabCapture::SelectionOnly);
/// assert!(options.show_line_numbers);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorOptions {
    /// Initial language id (any alias).
    pub language: String,
    /// Text shown while the document is empty.
    pub placeholder: String,
    /// Whether the gutter starts visible.
    pub show_line_numbers: bool,
    /// Name offered by the save dialog; the language extension is added when it has none.
    pub default_filename: Option<String>,
    /// Tab key policy.
    pub tab_capture: TabCapture,
    /// Prefix for highlight token classes.
    pub class_prefix: String,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            language: "javascript".to_string(),
            placeholder: "Enter your code here...".to_string(),
            show_line_numbers: true,
            default_filename: None,
            tab_capture: TabCapture::Always,
            class_prefix: "hljs-".to_string(),
        }
    }
}

impl EditorOptions {
    /// Parse options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, WidgetError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(EditorOptions::from_yaml("{}").unwrap(), EditorOptions::default());
    }

    #[test]
    fn parses_every_field() {
        let yaml = "language: tt2\nplaceholder: Type...\nshow_line_numbers: false\n\
                    default_filename: page\ntab_capture: always\nclass_prefix: cp-\n";
        let options = EditorOptions::from_yaml(yaml).unwrap();
        assert_eq!(options.language, "tt2");
        assert_eq!(options.placeholder, "Type...");
        assert!(!options.show_line_numbers);
        assert_eq!(options.default_filename.as_deref(), Some("page"));
        assert_eq!(options.class_prefix, "cp-");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = EditorOptions::from_yaml("tab_size: 4\n").unwrap_err();
        assert!(matches!(err, WidgetError::Options(_)));
    }
}
