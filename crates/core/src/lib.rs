//! Core types for fixturekit
//!
//! This crate defines the foundational types shared by the comparator and
//! the mock engine:
//! - Value: dynamic object graph node with identity for composites
//! - ClassInfo: class hierarchy, declared fields and field modifiers
//! - ValueType: declared type of fields, parameters and return values
//! - DeepCloner: identity-preserving graph copy
//! - ValueFormatter: bounded, cycle-safe rendering of values
//! - ComparatorModes: leniency flags of a comparison
//! - FixtureConfig: `fixturekit.toml` configuration
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod class;
pub mod clone;
pub mod config;
pub mod error;
pub mod format;
pub mod mode;
pub mod types;
pub mod value;

pub use class::{ClassBuilder, ClassInfo, FieldInfo, ObjectBuilder};
pub use clone::DeepCloner;
pub use config::{FixtureConfig, MockConfig, MockPolicy, ReflectConfig, CONFIG_FILE_NAME};
pub use error::{Error, RaisedError, Result};
pub use format::ValueFormatter;
pub use mode::{ComparatorMode, ComparatorModes, ModeSetting, ModeSettings};
pub use types::ValueType;
pub use value::{EnumValue, Identity, LazyProxy, MapData, ObjectData, SeqKind, Sequence, Value};
