//! Record types exchanged with fetchers and presented to subscribers.

mod option;

pub use option::{FieldRef, OptionKey, SelectOption};
