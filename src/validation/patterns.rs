//! Compiled pattern cache.

use std::collections::HashMap;

use regex::Regex;

/// Caches compiled field patterns by source text.
///
/// Invalid sources are cached too, so a broken pattern is compiled and
/// logged once rather than on every keystroke.
#[derive(Debug, Default)]
pub struct PatternCache {
    compiled: HashMap<String, Result<Regex, String>>,
}

impl PatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the compiled regex for `source`, or the compile error message
    pub fn get(&mut self, source: &str) -> Result<&Regex, &str> {
        if !self.compiled.contains_key(source) {
            let compiled = Regex::new(source).map_err(|e| {
                log::warn!("Invalid field pattern '{}': {}", source, e);
                e.to_string()
            });
            self.compiled.insert(source.to_string(), compiled);
        }

        match &self.compiled[source] {
            Ok(regex) => Ok(regex),
            Err(message) => Err(message.as_str()),
        }
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}
