use std::collections::BTreeMap;

use crate::error::{CatalogError, Result};

type Constructor<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Maps a case-insensitive discriminator to a constructor.
///
/// Unknown names are always an explicit [`CatalogError::UnknownVariant`].
pub struct Registry<T> {
    kind: &'static str,
    constructors: BTreeMap<String, Constructor<T>>,
}

impl<T> Registry<T> {
    /// `kind` names the family in error messages, e.g. `"notification channel"`.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            constructors: BTreeMap::new(),
        }
    }

    pub fn register(
        mut self,
        name: &str,
        constructor: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        self.constructors
            .insert(normalize(name), Box::new(constructor));
        self
    }

    pub fn create(&self, name: &str) -> Result<T> {
        let key = normalize(name);
        match self.constructors.get(&key) {
            Some(constructor) => {
                tracing::debug!(kind = self.kind, variant = %key, "constructing variant");
                Ok(constructor())
            }
            None => {
                tracing::warn!(kind = self.kind, variant = %name, "unknown variant requested");
                Err(CatalogError::unknown(self.kind, name))
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(&normalize(name))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
