//! Class registry: type tag to constructor lookup.
//!
//! A stored mapping names its class under `__class__`. The registry turns
//! that tag back into the right concrete model without any implicit global
//! class table; callers either own a [`ModelRegistry`] or use the
//! process-wide [`ModelRegistry::global`] one, populated with the built-in
//! classes on first use.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::city::City;
use crate::error::{ModelError, ModelResult};
use crate::model::{BaseModel, Model, ModelClass, CLASS_KEY};
use crate::value::{Mapping, Value};

type CreateFn = fn() -> Box<dyn Model>;
type ReconstructFn = fn(Mapping) -> ModelResult<Box<dyn Model>>;

#[derive(Clone, Copy)]
struct ClassEntry {
    create: CreateFn,
    reconstruct: ReconstructFn,
}

fn create_boxed<M: ModelClass>() -> Box<dyn Model> {
    Box::new(M::new())
}

fn reconstruct_boxed<M: ModelClass>(mapping: Mapping) -> ModelResult<Box<dyn Model>> {
    M::from_mapping(mapping).map(|model| Box::new(model) as Box<dyn Model>)
}

static GLOBAL: Lazy<ModelRegistry> = Lazy::new(ModelRegistry::with_defaults);

/// Maps class tags to their constructors.
///
/// # Examples
///
/// ```
/// use hbnb_models::{City, Model, ModelRegistry};
///
/// let registry = ModelRegistry::with_defaults();
/// let city = registry.create("City").unwrap();
///
/// let copy = registry.reconstruct(city.to_mapping()).unwrap();
/// assert!(copy.is::<City>());
/// assert_eq!(copy.id(), city.id());
/// ```
#[derive(Clone, Default)]
pub struct ModelRegistry {
    classes: HashMap<&'static str, ClassEntry>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding `BaseModel` and `City`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<BaseModel>();
        registry.register::<City>();
        registry
    }

    /// The process-wide registry of built-in classes.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Registers `M` under its class tag, replacing any previous entry.
    pub fn register<M: ModelClass>(&mut self) -> &mut Self {
        let entry = ClassEntry {
            create: create_boxed::<M>,
            reconstruct: reconstruct_boxed::<M>,
        };
        if self.classes.insert(M::CLASS_NAME, entry).is_some() {
            debug!(class = M::CLASS_NAME, "replaced registered model class");
        }
        self
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Number of registered classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Registered class tags, sorted.
    #[must_use]
    pub fn class_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn entry(&self, name: &str) -> ModelResult<ClassEntry> {
        self.classes.get(name).copied().ok_or_else(|| {
            debug!(class = name, "lookup of unregistered model class");
            ModelError::UnknownClass {
                name: name.to_string(),
            }
        })
    }

    /// Freshly constructs a model of the named class.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnknownClass` if `name` is not registered.
    pub fn create(&self, name: &str) -> ModelResult<Box<dyn Model>> {
        let entry = self.entry(name)?;
        Ok((entry.create)())
    }

    /// Reconstructs a model, choosing its class from the `__class__` tag.
    ///
    /// # Errors
    ///
    /// - `MissingField` if the mapping has no `__class__` tag.
    /// - `InvalidFieldType` if the tag is not a string.
    /// - `UnknownClass` if the tag names an unregistered class.
    /// - Any reconstruction error of the selected class.
    pub fn reconstruct(&self, mapping: Mapping) -> ModelResult<Box<dyn Model>> {
        let name = match mapping.get(CLASS_KEY) {
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(ModelError::InvalidFieldType {
                    field: CLASS_KEY.to_string(),
                    expected: "string",
                    actual: other.type_name(),
                })
            }
            None => return Err(ModelError::missing(CLASS_KEY)),
        };
        let entry = self.entry(&name)?;
        (entry.reconstruct)(mapping)
    }

    /// Reconstructs a model from a JSON object carrying a `__class__` tag.
    ///
    /// # Errors
    ///
    /// `ModelError::Json` for invalid JSON, otherwise as [`reconstruct`](Self::reconstruct).
    pub fn reconstruct_json(&self, json: &str) -> ModelResult<Box<dyn Model>> {
        let mapping: Mapping = serde_json::from_str(json)?;
        self.reconstruct(mapping)
    }
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("classes", &self.class_names())
            .finish()
    }
}
