//! The `City` model.

use std::any::Any;
use std::fmt;

use tracing::debug;

use crate::error::ModelResult;
use crate::model::{write_model, BaseModel, Model, ModelClass};
use crate::value::{Mapping, Value};

const STATE_ID_KEY: &str = "state_id";
const NAME_KEY: &str = "name";

/// A city, belonging to a state by `state_id`.
///
/// Both declared fields default to the empty string on every fresh instance.
/// Like any other field they take whatever value a mapping or assignment
/// gives them.
///
/// # Examples
///
/// ```
/// use hbnb_models::{City, Model, ModelClass};
///
/// let mut city = City::new();
/// assert_eq!(city.state_id, "");
/// assert_eq!(city.name, "");
///
/// city.name = "Seattle".into();
/// city.touch();
/// assert_eq!(city.to_mapping()["__class__"].as_str(), Some("City"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    base: BaseModel,
    /// Identifier of the state this city belongs to.
    pub state_id: Value,
    /// Display name.
    pub name: Value,
}

impl City {
    /// Creates a fresh city with the given state and name.
    #[must_use]
    pub fn with_fields(state_id: impl Into<Value>, name: impl Into<Value>) -> Self {
        Self {
            base: BaseModel::new(),
            state_id: state_id.into(),
            name: name.into(),
        }
    }
}

impl Default for City {
    fn default() -> Self {
        Self::with_fields("", "")
    }
}

impl Model for City {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn base(&self) -> &BaseModel {
        &self.base
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        &mut self.base
    }

    fn write_declared_fields(&self, mapping: &mut Mapping) {
        mapping.insert(STATE_ID_KEY.to_string(), self.state_id.clone());
        mapping.insert(NAME_KEY.to_string(), self.name.clone());
    }

    fn set_declared_field(&mut self, key: &str, value: Value) -> Option<Value> {
        match key {
            STATE_ID_KEY => self.state_id = value,
            NAME_KEY => self.name = value,
            _ => return Some(value),
        }
        None
    }

    fn declared_field(&self, key: &str) -> Option<Value> {
        match key {
            STATE_ID_KEY => Some(self.state_id.clone()),
            NAME_KEY => Some(self.name.clone()),
            _ => None,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ModelClass for City {
    const CLASS_NAME: &'static str = "City";

    fn new() -> Self {
        Self::default()
    }

    fn from_mapping(mut mapping: Mapping) -> ModelResult<Self> {
        let state_id = mapping.remove(STATE_ID_KEY);
        let name = mapping.remove(NAME_KEY);
        let base = BaseModel::from_fields(mapping)?;

        let city = Self {
            base,
            state_id: state_id.unwrap_or_else(|| Value::from("")),
            name: name.unwrap_or_else(|| Value::from("")),
        };

        debug!(class = Self::CLASS_NAME, id = %city.id(), "reconstructed model");
        Ok(city)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_model(f, self)
    }
}
