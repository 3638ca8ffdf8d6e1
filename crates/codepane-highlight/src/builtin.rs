//! Grammars bundled with the crate.
//!
//! Order matters: automatic detection breaks relevance ties in favor of the
//! grammar registered first.

macro_rules! grammar {
    ($name:literal) => {
        ($name, include_str!(concat!("../grammars/", $name, ".yaml")))
    };
}

/// `(registry name, YAML definition)` pairs in registration order.
pub const GRAMMARS: &[(&str, &str)] = &[
    grammar!("plaintext"),
    grammar!("xml-tag"),
    grammar!("css-block"),
    grammar!("javascript"),
    grammar!("typescript"),
    grammar!("python"),
    grammar!("java"),
    grammar!("cs"),
    grammar!("cpp"),
    grammar!("c"),
    grammar!("rust"),
    grammar!("go"),
    grammar!("ruby"),
    grammar!("php-code"),
    grammar!("php"),
    grammar!("json"),
    grammar!("yaml"),
    grammar!("html"),
    grammar!("xml"),
    grammar!("css"),
    grammar!("sql"),
    grammar!("markdown"),
    grammar!("bash"),
    grammar!("powershell"),
    grammar!("kotlin"),
    grammar!("swift"),
    grammar!("dart"),
    grammar!("scala"),
    grammar!("dockerfile"),
    grammar!("nginx"),
    grammar!("apache"),
    grammar!("tt2-pseudoperl"),
    grammar!("tt2"),
];
