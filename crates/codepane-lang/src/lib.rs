#![warn(missing_docs)]
//! `codepane-lang` - data-driven language tables for `codepane`.
//!
//! This crate intentionally stays lightweight and does **not** depend on the highlighting engine.
//! It maps the many names a host may use for a language (`"C#"`, `"csharp"`, `"cs"`) to one typed
//! [`Language`], knows which grammar identifier the highlighter registers it under, and carries the
//! file-type data (extensions, MIME types) load/save dialogs need.

use std::borrow::Cow;
use std::fmt;

/// A language known to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Java,
    CSharp,
    Cpp,
    C,
    Html,
    Css,
    Json,
    Xml,
    Sql,
    Markdown,
    Bash,
    PowerShell,
    Php,
    Ruby,
    Go,
    Rust,
    Kotlin,
    Swift,
    Dart,
    Scala,
    Yaml,
    Dockerfile,
    Nginx,
    Apache,
    Tt2,
    PlainText,
}

struct LanguageInfo {
    key: &'static str,
    grammar_id: &'static str,
    display_name: &'static str,
    aliases: &'static [&'static str],
    extensions: &'static [&'static str],
    mime_types: &'static [&'static str],
}

impl Language {
    /// Every known language.
    pub const ALL: [Language; 29] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::CSharp,
        Language::Cpp,
        Language::C,
        Language::Html,
        Language::Css,
        Language::Json,
        Language::Xml,
        Language::Sql,
        Language::Markdown,
        Language::Bash,
        Language::PowerShell,
        Language::Php,
        Language::Ruby,
        Language::Go,
        Language::Rust,
        Language::Kotlin,
        Language::Swift,
        Language::Dart,
        Language::Scala,
        Language::Yaml,
        Language::Dockerfile,
        Language::Nginx,
        Language::Apache,
        Language::Tt2,
        Language::PlainText,
    ];

    fn info(self) -> &'static LanguageInfo {
        match self {
            Language::JavaScript => &LanguageInfo {
                key: "javascript",
                grammar_id: "javascript",
                display_name: "JavaScript",
                aliases: &["js", "jsx", "mjs", "cjs"],
                extensions: &[".js"],
                mime_types: &["application/javascript", "text/javascript"],
            },
            Language::TypeScript => &LanguageInfo {
                key: "typescript",
                grammar_id: "typescript",
                display_name: "TypeScript",
                aliases: &["ts", "tsx"],
                extensions: &[".ts"],
                mime_types: &["application/typescript"],
            },
            Language::Python => &LanguageInfo {
                key: "python",
                grammar_id: "python",
                display_name: "Python",
                aliases: &["py"],
                extensions: &[".py"],
                mime_types: &["text/x-python"],
            },
            Language::Java => &LanguageInfo {
                key: "java",
                grammar_id: "java",
                display_name: "Java",
                aliases: &[],
                extensions: &[".java"],
                mime_types: &["text/x-java"],
            },
            Language::CSharp => &LanguageInfo {
                key: "csharp",
                grammar_id: "cs",
                display_name: "C#",
                aliases: &["cs"],
                extensions: &[".cs"],
                mime_types: &["text/x-csharp"],
            },
            Language::Cpp => &LanguageInfo {
                key: "cpp",
                grammar_id: "cpp",
                display_name: "C++",
                aliases: &["cc", "cxx", "hpp"],
                extensions: &[".cpp", ".cc", ".cxx"],
                mime_types: &["text/x-c++"],
            },
            Language::C => &LanguageInfo {
                key: "c",
                grammar_id: "c",
                display_name: "C",
                aliases: &["h"],
                extensions: &[".c"],
                mime_types: &["text/x-c"],
            },
            Language::Html => &LanguageInfo {
                key: "html",
                grammar_id: "html",
                display_name: "HTML",
                aliases: &["htm", "xhtml"],
                extensions: &[".html", ".htm"],
                mime_types: &["text/html"],
            },
            Language::Css => &LanguageInfo {
                key: "css",
                grammar_id: "css",
                display_name: "CSS",
                aliases: &[],
                extensions: &[".css"],
                mime_types: &["text/css"],
            },
            Language::Json => &LanguageInfo {
                key: "json",
                grammar_id: "json",
                display_name: "JSON",
                aliases: &[],
                extensions: &[".json"],
                mime_types: &["application/json"],
            },
            Language::Xml => &LanguageInfo {
                key: "xml",
                grammar_id: "xml",
                display_name: "XML",
                aliases: &["svg"],
                extensions: &[".xml"],
                mime_types: &["application/xml", "text/xml"],
            },
            Language::Sql => &LanguageInfo {
                key: "sql",
                grammar_id: "sql",
                display_name: "SQL",
                aliases: &[],
                extensions: &[".sql"],
                mime_types: &["application/sql"],
            },
            Language::Markdown => &LanguageInfo {
                key: "markdown",
                grammar_id: "markdown",
                display_name: "Markdown",
                aliases: &["md"],
                extensions: &[".md", ".markdown"],
                mime_types: &["text/markdown"],
            },
            Language::Bash => &LanguageInfo {
                key: "bash",
                grammar_id: "bash",
                display_name: "Bash",
                aliases: &["sh", "shell", "zsh"],
                extensions: &[".sh"],
                mime_types: &["application/x-sh"],
            },
            Language::PowerShell => &LanguageInfo {
                key: "powershell",
                grammar_id: "powershell",
                display_name: "PowerShell",
                aliases: &["ps", "ps1", "pwsh"],
                extensions: &[".ps1"],
                mime_types: &["text/plain"],
            },
            Language::Php => &LanguageInfo {
                key: "php",
                grammar_id: "php",
                display_name: "PHP",
                aliases: &[],
                extensions: &[".php"],
                mime_types: &["application/x-php"],
            },
            Language::Ruby => &LanguageInfo {
                key: "ruby",
                grammar_id: "ruby",
                display_name: "Ruby",
                aliases: &["rb"],
                extensions: &[".rb"],
                mime_types: &["text/x-ruby"],
            },
            Language::Go => &LanguageInfo {
                key: "go",
                grammar_id: "go",
                display_name: "Go",
                aliases: &["golang"],
                extensions: &[".go"],
                mime_types: &["text/x-go"],
            },
            Language::Rust => &LanguageInfo {
                key: "rust",
                grammar_id: "rust",
                display_name: "Rust",
                aliases: &["rs"],
                extensions: &[".rs"],
                mime_types: &["text/rust"],
            },
            Language::Kotlin => &LanguageInfo {
                key: "kotlin",
                grammar_id: "kotlin",
                display_name: "Kotlin",
                aliases: &["kt", "kts"],
                extensions: &[".kt"],
                mime_types: &["text/x-kotlin"],
            },
            Language::Swift => &LanguageInfo {
                key: "swift",
                grammar_id: "swift",
                display_name: "Swift",
                aliases: &[],
                extensions: &[".swift"],
                mime_types: &["text/x-swift"],
            },
            Language::Dart => &LanguageInfo {
                key: "dart",
                grammar_id: "dart",
                display_name: "Dart",
                aliases: &[],
                extensions: &[".dart"],
                mime_types: &["application/dart"],
            },
            Language::Scala => &LanguageInfo {
                key: "scala",
                grammar_id: "scala",
                display_name: "Scala",
                aliases: &[],
                extensions: &[".scala"],
                mime_types: &["text/x-scala"],
            },
            Language::Yaml => &LanguageInfo {
                key: "yaml",
                grammar_id: "yaml",
                display_name: "YAML",
                aliases: &["yml"],
                extensions: &[".yml", ".yaml"],
                mime_types: &["application/yaml"],
            },
            Language::Dockerfile => &LanguageInfo {
                key: "dockerfile",
                grammar_id: "dockerfile",
                display_name: "Dockerfile",
                aliases: &["docker"],
                extensions: &[".dockerfile"],
                mime_types: &["text/plain"],
            },
            Language::Nginx => &LanguageInfo {
                key: "nginx",
                grammar_id: "nginx",
                display_name: "Nginx",
                aliases: &["nginxconf"],
                extensions: &[".conf"],
                mime_types: &["text/plain"],
            },
            Language::Apache => &LanguageInfo {
                key: "apache",
                grammar_id: "apache",
                display_name: "Apache",
                aliases: &["apacheconf"],
                extensions: &[".conf"],
                mime_types: &["text/plain"],
            },
            Language::Tt2 => &LanguageInfo {
                key: "tt2",
                grammar_id: "tt2",
                display_name: "Template Toolkit",
                aliases: &["tt", "template-toolkit"],
                extensions: &[".tt2"],
                mime_types: &["text/plain"],
            },
            Language::PlainText => &LanguageInfo {
                key: "plaintext",
                grammar_id: "plaintext",
                display_name: "Plain Text",
                aliases: &["plain", "text", "txt"],
                extensions: &[".txt"],
                mime_types: &["text/plain"],
            },
        }
    }

    /// Look up a language by id, display name or alias, ignoring ASCII case.
    pub fn from_alias(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|lang| {
            let info = lang.info();
            info.key.eq_ignore_ascii_case(name)
                || info.grammar_id.eq_ignore_ascii_case(name)
                || info.display_name.eq_ignore_ascii_case(name)
                || info.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    /// The host-facing identifier (`"csharp"`, `"plaintext"`, ...).
    pub fn key(self) -> &'static str {
        self.info().key
    }

    /// The identifier the highlighter registers this language's grammar under.
    pub fn grammar_id(self) -> &'static str {
        self.info().grammar_id
    }

    /// Human readable name.
    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    /// Extension used when suggesting a file name (with the leading dot).
    pub fn default_extension(self) -> &'static str {
        self.info().extensions[0]
    }

    /// All extensions a file picker should accept for this language.
    pub fn extensions(self) -> &'static [&'static str] {
        self.info().extensions
    }

    /// Primary MIME type.
    pub fn mime_type(self) -> &'static str {
        self.info().mime_types[0]
    }

    /// Every MIME type a file picker should accept, primary first.
    pub fn mime_types(self) -> &'static [&'static str] {
        self.info().mime_types
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Languages offered in the editor's language picker, in display order.
pub fn picker_languages() -> &'static [Language] {
    &[
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Java,
        Language::CSharp,
        Language::Cpp,
        Language::Html,
        Language::Css,
        Language::Json,
        Language::Xml,
        Language::Sql,
        Language::Markdown,
        Language::Bash,
        Language::PowerShell,
        Language::PlainText,
    ]
}

/// Resolve a host language id to a grammar identifier.
///
/// Known names map to their grammar id (`"CSharp"` → `"cs"`, `"plain"` → `"plaintext"`);
/// anything else is returned unchanged so the highlighter can fall back to auto-detection.
pub fn resolve_language_id(id: &str) -> Cow<'_, str> {
    match Language::from_alias(id) {
        Some(language) => Cow::Borrowed(language.grammar_id()),
        None => Cow::Borrowed(id),
    }
}

/// A file-type filter entry for save/open pickers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
    /// `"<Language> files"`.
    pub description: String,
    /// MIME type.
    pub mime: &'static str,
    /// Accepted extensions.
    pub extensions: &'static [&'static str],
}

/// File-type filter for `language_id`; unknown ids get the plain-text entry.
///
/// The description capitalizes the id as given (`"python"` → `"Python files"`).
pub fn file_type_for(language_id: &str) -> FileType {
    let language = Language::from_alias(language_id).unwrap_or(Language::PlainText);
    FileType {
        description: format!("{} files", capitalize(language_id)),
        mime: language.mime_type(),
        extensions: language.extensions(),
    }
}

/// Comma-separated `accept` attribute (extensions, then MIME types) for plain file inputs.
pub fn accept_attribute_for(language_id: &str) -> String {
    let language = Language::from_alias(language_id).unwrap_or(Language::PlainText);
    language
        .extensions()
        .iter()
        .chain(language.mime_types())
        .copied()
        .collect::<Vec<_>>()
        .join(",")
}

/// Suggest a file name for saving.
///
/// A default name that already contains a `.` is used as-is; otherwise the language's extension
/// is appended. Without a default name the result is `code<ext>`.
pub fn suggested_filename(language_id: &str, default_filename: Option<&str>) -> String {
    let extension = Language::from_alias(language_id)
        .unwrap_or(Language::PlainText)
        .default_extension();

    match default_filename.filter(|name| !name.is_empty()) {
        Some(name) if name.contains('.') => name.to_string(),
        Some(name) => format!("{name}{extension}"),
        None => format!("code{extension}"),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
