use crate::builtin;
use crate::compiler::CompiledGrammar;
use crate::definition::GrammarDefinition;
use crate::error::GrammarError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
/// A name-keyed collection of compiled grammars.
///
/// Names are case-insensitive. Registration order is kept so that automatic
/// detection breaks relevance ties deterministically.
pub struct GrammarRegistry {
    grammars: HashMap<String, Arc<CompiledGrammar>>,
    order: Vec<String>,
}

impl GrammarRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every bundled grammar.
    pub fn with_builtin() -> Result<Self, GrammarError> {
        let mut registry = Self::new();
        for (name, yaml) in builtin::GRAMMARS {
            registry.register_yaml(name, yaml)?;
        }
        Ok(registry)
    }

    /// Compiles `definition` and stores it under `name`.
    ///
    /// Registering an existing name replaces the previous grammar but keeps its
    /// place in the detection order. On error the registry is left untouched.
    pub fn register(
        &mut self,
        name: &str,
        definition: GrammarDefinition,
    ) -> Result<Arc<CompiledGrammar>, GrammarError> {
        let key = normalize(name)?;
        let compiled = Arc::new(CompiledGrammar::compile(&key, definition)?);
        if self
            .grammars
            .insert(key.clone(), compiled.clone())
            .is_some()
        {
            log::debug!("replaced grammar '{key}'");
        } else {
            log::debug!("registered grammar '{key}'");
            self.order.push(key);
        }
        Ok(compiled)
    }

    /// Parses a YAML definition and registers it under `name`.
    pub fn register_yaml(
        &mut self,
        name: &str,
        yaml: &str,
    ) -> Result<Arc<CompiledGrammar>, GrammarError> {
        self.register(name, GrammarDefinition::from_yaml(yaml)?)
    }

    /// Loads a YAML definition from disk and registers it under the file stem.
    pub fn load_from_path(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Arc<CompiledGrammar>, GrammarError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let yaml = std::fs::read_to_string(path)?;
        self.register_yaml(&name, &yaml)
    }

    /// Whether a grammar is registered under `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.grammars.contains_key(&name.trim().to_ascii_lowercase())
    }

    /// Get a compiled grammar by name.
    pub fn get(&self, name: &str) -> Option<Arc<CompiledGrammar>> {
        self.grammars
            .get(&name.trim().to_ascii_lowercase())
            .cloned()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Registered grammars in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompiledGrammar>> {
        self.order.iter().filter_map(|name| self.grammars.get(name))
    }

    /// Number of registered grammars.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Names referenced as `base` or `embed` that are not registered.
    ///
    /// References resolve lazily, so a registry with dangling references is
    /// still usable; highlighting that reaches one reports an error.
    pub fn unresolved_references(&self) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for grammar in self.iter() {
            for reference in grammar.referenced_grammars() {
                if !self.grammars.contains_key(reference) {
                    missing.push((grammar.name.clone(), reference.to_string()));
                }
            }
        }
        missing
    }
}

fn normalize(name: &str) -> Result<String, GrammarError> {
    let key = name.trim().to_ascii_lowercase();
    if key.is_empty() {
        return Err(GrammarError::InvalidName(name.to_string()));
    }
    Ok(key)
}
