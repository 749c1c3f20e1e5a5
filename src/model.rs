//! The base model: identity, timestamp lifecycle, and mapping conversion.
//!
//! Every stored HBnB object carries an `id`, a `created_at` and an
//! `updated_at`. [`BaseModel`] owns that state; concrete classes embed it
//! and expose it through the [`Model`] trait, which supplies the shared
//! behavior (touch, mapping serialization, display) on top.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ModelError, ModelResult};
use crate::time::{format_timestamp, now, parse_timestamp};
use crate::value::{fmt_mapping, Mapping, Value};

/// Reserved mapping key naming the concrete class.
pub const CLASS_KEY: &str = "__class__";
/// Mapping key of the identifier.
pub const ID_KEY: &str = "id";
/// Mapping key of the creation timestamp.
pub const CREATED_AT_KEY: &str = "created_at";
/// Mapping key of the last-update timestamp.
pub const UPDATED_AT_KEY: &str = "updated_at";

const RESERVED_KEYS: [&str; 4] = [CLASS_KEY, ID_KEY, CREATED_AT_KEY, UPDATED_AT_KEY];

/// Returns true if `key` is managed by the base model and cannot be
/// assigned as a free attribute.
#[must_use]
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Model identifier.
///
/// Fresh models get a random UUID v4 in its hyphenated string form.
/// Reconstructed models keep whatever identifier the mapping carried; a
/// non-string identifier is keyed by its rendered form (`42` -> `"42"`).
///
/// # Examples
///
/// ```
/// use hbnb_models::ModelId;
///
/// let id = ModelId::new();
/// assert_eq!(id.as_str().len(), 36);
/// assert_eq!(ModelId::from("123").as_str(), "123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Identifier of a stored value, as shown in the display form.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(s.clone()),
            other => Self(other.to_string()),
        }
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ModelId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for ModelId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

/// Identity and timestamp state shared by every model class.
///
/// `BaseModel` is itself a usable class (type tag `"BaseModel"`). Keys in a
/// reconstruction mapping that no class declares land in
/// [`attributes`](Self::attributes) unchanged.
///
/// # Examples
///
/// ```
/// use hbnb_models::{BaseModel, Model, ModelClass};
///
/// let mut model = BaseModel::new();
/// assert_eq!(model.created_at(), model.updated_at());
///
/// model.touch();
/// let copy = BaseModel::from_mapping(model.to_mapping()).unwrap();
/// assert_eq!(copy.id(), model.id());
/// assert_eq!(copy.updated_at(), model.updated_at());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BaseModel {
    id: ModelId,
    // `id` exactly as stored; a fresh model holds its UUID string here.
    raw_id: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    attributes: Mapping,
}

impl BaseModel {
    /// Builds the base state from a mapping, consuming the reserved keys.
    ///
    /// The type tag is dropped. `id` and every other non-reserved key are
    /// taken as-is, whatever their type.
    ///
    /// # Errors
    ///
    /// - `MissingField` if `id`, `created_at` or `updated_at` is absent.
    /// - `InvalidFieldType` if a timestamp is not a string.
    /// - `MalformedTimestamp` if a timestamp does not match the fixed format.
    pub fn from_fields(mut mapping: Mapping) -> ModelResult<Self> {
        mapping.remove(CLASS_KEY);

        let created_at = take_timestamp(&mut mapping, CREATED_AT_KEY)?;
        let updated_at = take_timestamp(&mut mapping, UPDATED_AT_KEY)?;
        let raw_id = mapping
            .remove(ID_KEY)
            .ok_or_else(|| ModelError::missing(ID_KEY))?;
        let id = ModelId::from_value(&raw_id);

        if updated_at < created_at {
            warn!(
                %id,
                created_at = %format_timestamp(&created_at),
                updated_at = %format_timestamp(&updated_at),
                "reconstructed model was updated before it was created"
            );
        }

        Ok(Self {
            id,
            raw_id,
            created_at,
            updated_at,
            attributes: mapping,
        })
    }

    /// The model identifier.
    #[must_use]
    pub const fn id(&self) -> &ModelId {
        &self.id
    }

    /// The identifier as it appears in the mapping.
    #[must_use]
    pub const fn id_value(&self) -> &Value {
        &self.raw_id
    }

    /// When the model was first created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the model was last touched.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets `updated_at` to the current moment.
    ///
    /// Never moves the timestamp backwards: if the wall clock is behind the
    /// stored `updated_at` (clock skew, or a future value read from a
    /// mapping), the stored value is kept and the time is not refreshed.
    pub fn touch(&mut self) {
        self.updated_at = std::cmp::max(now(), self.updated_at);
    }

    /// Extra fields not declared by any model class.
    #[must_use]
    pub const fn attributes(&self) -> &Mapping {
        &self.attributes
    }

    /// Looks up an extra field.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Assigns an extra field, returning the previous value.
    ///
    /// Does not touch `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ReservedField` for `id`, `created_at`,
    /// `updated_at` and `__class__`.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> ModelResult<Option<Value>> {
        let key = key.into();
        if is_reserved_key(&key) {
            return Err(ModelError::ReservedField { field: key });
        }
        Ok(self.attributes.insert(key, value.into()))
    }

    /// Removes an extra field.
    pub fn remove_attribute(&mut self, key: &str) -> Option<Value> {
        self.attributes.remove(key)
    }

    /// Writes the base fields into `mapping`, timestamps in the fixed format.
    pub fn write_fields(&self, mapping: &mut Mapping) {
        mapping.extend(self.attributes.iter().map(|(k, v)| (k.clone(), v.clone())));
        mapping.insert(ID_KEY.to_string(), self.raw_id.clone());
        mapping.insert(
            CREATED_AT_KEY.to_string(),
            Value::String(format_timestamp(&self.created_at)),
        );
        mapping.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(format_timestamp(&self.updated_at)),
        );
    }
}

fn take_timestamp(mapping: &mut Mapping, key: &str) -> ModelResult<DateTime<Utc>> {
    let value = mapping.remove(key).ok_or_else(|| ModelError::missing(key))?;
    let raw = value.into_string().map_err(|other| ModelError::InvalidFieldType {
        field: key.to_string(),
        expected: "string",
        actual: other.type_name(),
    })?;
    parse_timestamp(key, &raw)
}

/// Shared behavior of every model class.
///
/// Implementors supply the class tag, access to the embedded [`BaseModel`],
/// and their declared fields; everything else is provided. The trait is
/// object safe so the registry can hand back `Box<dyn Model>`.
pub trait Model: fmt::Debug + Send + Sync {
    /// Concrete class tag written under `__class__`.
    fn class_name(&self) -> &'static str;

    /// Shared identity and timestamp state.
    fn base(&self) -> &BaseModel;

    /// Mutable access to the shared state.
    fn base_mut(&mut self) -> &mut BaseModel;

    /// Writes class-declared fields into a mapping.
    fn write_declared_fields(&self, _mapping: &mut Mapping) {}

    /// Assigns a class-declared field.
    ///
    /// Returns `Some(value)` when `key` is not declared, handing the value
    /// back so it can be stored as a free attribute.
    fn set_declared_field(&mut self, _key: &str, value: Value) -> Option<Value> {
        Some(value)
    }

    /// Reads a class-declared field.
    fn declared_field(&self, _key: &str) -> Option<Value> {
        None
    }

    /// The concrete model, for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The concrete model, for mutable downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The model identifier.
    fn id(&self) -> &ModelId {
        self.base().id()
    }

    /// When the model was first created.
    fn created_at(&self) -> DateTime<Utc> {
        self.base().created_at()
    }

    /// When the model was last touched.
    fn updated_at(&self) -> DateTime<Utc> {
        self.base().updated_at()
    }

    /// Refreshes `updated_at`. Field assignment never does this implicitly.
    fn touch(&mut self) {
        self.base_mut().touch();
    }

    /// Looks up a declared field or extra attribute by name.
    fn attribute(&self, key: &str) -> Option<Value> {
        self.declared_field(key)
            .or_else(|| self.base().attribute(key).cloned())
    }

    /// Assigns a field by name, routing declared names to their own field.
    ///
    /// Any value is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::ReservedField` for base-managed keys.
    fn set_attribute(&mut self, key: &str, value: Value) -> ModelResult<()> {
        if is_reserved_key(key) {
            return Err(ModelError::ReservedField {
                field: key.to_string(),
            });
        }
        if let Some(value) = self.set_declared_field(key, value) {
            self.base_mut().set_attribute(key, value)?;
        }
        Ok(())
    }

    /// Field mapping without the type tag, as shown in the display form.
    fn fields(&self) -> Mapping {
        let mut mapping = Mapping::new();
        self.base().write_fields(&mut mapping);
        self.write_declared_fields(&mut mapping);
        mapping
    }

    /// Snapshot of every field plus the `__class__` tag.
    fn to_mapping(&self) -> Mapping {
        let mut mapping = self.fields();
        mapping.insert(
            CLASS_KEY.to_string(),
            Value::String(self.class_name().to_string()),
        );
        mapping
    }

    /// The mapping as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Json` if serialization fails.
    fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(&self.to_mapping())?)
    }
}

impl dyn Model {
    /// Returns the concrete model if it is an `M`.
    #[must_use]
    pub fn downcast_ref<M: Model + 'static>(&self) -> Option<&M> {
        self.as_any().downcast_ref::<M>()
    }

    /// Returns the concrete model mutably if it is an `M`.
    pub fn downcast_mut<M: Model + 'static>(&mut self) -> Option<&mut M> {
        self.as_any_mut().downcast_mut::<M>()
    }

    /// Returns true if the concrete model is an `M`.
    #[must_use]
    pub fn is<M: Model + 'static>(&self) -> bool {
        self.as_any().is::<M>()
    }
}

impl fmt::Display for dyn Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_model(f, self)
    }
}

/// Writes `[<Class>] (<id>) {fields}`.
pub(crate) fn write_model(f: &mut fmt::Formatter<'_>, model: &dyn Model) -> fmt::Result {
    write!(f, "[{}] ({}) ", model.class_name(), model.id())?;
    fmt_mapping(f, &model.fields())
}

/// Constructors of a concrete model class.
pub trait ModelClass: Model + Sized + 'static {
    /// Class tag, identical to what `class_name` returns.
    const CLASS_NAME: &'static str;

    /// Fresh construction: new id, both timestamps set to now.
    fn new() -> Self;

    /// Reconstruction from a serialized mapping.
    ///
    /// # Errors
    ///
    /// Fails without producing a model if `id` or a timestamp is missing,
    /// or a timestamp is malformed.
    fn from_mapping(mapping: Mapping) -> ModelResult<Self>;

    /// Reconstruction from a JSON object.
    ///
    /// # Errors
    ///
    /// `ModelError::Json` for invalid JSON, otherwise as [`from_mapping`](Self::from_mapping).
    fn from_json(json: &str) -> ModelResult<Self> {
        let mapping: Mapping = serde_json::from_str(json)?;
        Self::from_mapping(mapping)
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        let now = now();
        let id = ModelId::new();
        Self {
            raw_id: Value::String(id.to_string()),
            id,
            created_at: now,
            updated_at: now,
            attributes: Mapping::new(),
        }
    }
}

impl Model for BaseModel {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn base(&self) -> &BaseModel {
        self
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl ModelClass for BaseModel {
    const CLASS_NAME: &'static str = "BaseModel";

    fn new() -> Self {
        Self::default()
    }

    fn from_mapping(mapping: Mapping) -> ModelResult<Self> {
        let model = Self::from_fields(mapping)?;
        debug!(class = Self::CLASS_NAME, id = %model.id, "reconstructed model");
        Ok(model)
    }
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_model(f, self)
    }
}
