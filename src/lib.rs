//! # hbnb-models - Entity models for the HBnB data manager
//!
//! Every HBnB object carries a stable identity and a creation/update
//! timestamp pair, and converts to and from a flat field mapping so a
//! storage layer can persist it.
//!
//! ## Core Concepts
//!
//! - **BaseModel**: identity, timestamps, and free-form extra fields
//! - **Model / ModelClass**: the behavior every concrete class shares
//! - **City**: a concrete class with `state_id` and `name`
//! - **ModelRegistry**: resolves the `__class__` tag of a stored mapping
//!
//! ## Usage
//!
//! ```rust
//! use hbnb_models::{City, Model, ModelClass, ModelRegistry};
//!
//! let mut city = City::new();
//! city.name = "Oakland".into();
//! city.touch();
//!
//! let stored = city.to_mapping();
//! let restored = ModelRegistry::global().reconstruct(stored)?;
//! assert_eq!(restored.id(), city.id());
//! assert!(restored.to_string().starts_with("[City] ("));
//! # Ok::<(), hbnb_models::ModelError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod city;
pub mod error;
pub mod model;
pub mod registry;
pub mod time;
pub mod value;

pub use city::City;
pub use error::{ModelError, ModelResult};
pub use model::{BaseModel, Model, ModelClass, ModelId, CLASS_KEY};
pub use registry::ModelRegistry;
pub use time::TIMESTAMP_FORMAT;
pub use value::{Mapping, Value};
