//! Ability Text — compiles card and building abilities into description text.
//!
//! Turns an ordered list of ability records (trigger, target, effect, value)
//! into one canonical, human-readable description using swappable,
//! locale-specific phrase tables.

pub mod core;
pub mod schema;

pub use crate::core::compiler::{compile, DescriptionCompiler};
pub use crate::core::phrases::PhraseTables;
pub use crate::schema::ability::{AbilityRecord, CardCategory, Effect, Target, Trigger};
