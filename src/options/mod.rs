//! Option collections and the predicates used to filter them locally.

mod filter;
mod guard;
mod set;

pub use filter::KeywordFilter;
pub use guard::SkipGuard;
pub use set::{LabelKey, OptionSet};
