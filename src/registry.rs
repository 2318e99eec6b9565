use crate::{
    builder::Builder,
    function::{Function, FunctionDescription, FunctionMetadata},
    Error, HashMap,
};
use std::{collections::HashSet, sync::Arc};

/// Maps every public function name to its implementation and description.
///
/// Built once at startup, read-only afterwards.
#[derive(Default)]
pub struct Registry {
    functions: HashMap<String, Arc<dyn Function>>,
    descriptions: HashMap<String, FunctionDescription>,
}

impl Registry {
    /// Returns a builder registering the default function families.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Registers one function family.
    ///
    /// Either every name of the family is registered, or none is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFunction`] if a name is already taken.
    pub fn register(&mut self, family: Vec<FunctionMetadata>) -> crate::Result<()> {
        let mut seen = HashSet::new();

        for metadata in &family {
            let name = metadata.name.as_str();

            if self.functions.contains_key(name) || !seen.insert(name) {
                log::debug!("function {name:?} is already registered");
                return Err(Error::DuplicateFunction(name.to_owned()));
            }
        }

        // NOTE: Families share one instance between many names, only describe each once
        let mut described: Vec<*const ()> = vec![];

        for metadata in &family {
            let ptr = Arc::as_ptr(&metadata.function).cast::<()>();
            if described.contains(&ptr) {
                continue;
            }
            described.push(ptr);

            let names = family
                .iter()
                .filter(|other| Arc::ptr_eq(&other.function, &metadata.function))
                .map(|other| other.name.as_str())
                .collect::<Vec<_>>();

            for (name, description) in metadata.function.description() {
                if names.contains(&name.as_str()) {
                    self.descriptions.insert(name, description);
                }
            }
        }

        log::debug!("registering {} functions", family.len());

        for metadata in family {
            log::trace!("registering function {:?}", metadata.name);
            self.functions.insert(metadata.name, metadata.function);
        }

        Ok(())
    }

    /// Looks up a function by public name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.functions.get(name)
    }

    /// Returns `true` if a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.functions.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    /// Description of one public name.
    #[must_use]
    pub fn description(&self, name: &str) -> Option<&FunctionDescription> {
        self.descriptions.get(name)
    }

    /// All descriptions, keyed by public name.
    #[must_use]
    pub fn descriptions(&self) -> &HashMap<String, FunctionDescription> {
        &self.descriptions
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
