//! Configuration loading and resolution for the `selectable` binary.
//!
//! Values are layered from default config files, explicit `--config` files,
//! `SELECTABLE__*` environment variables and finally CLI flags. `load` returns
//! the validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::ResolvedConfig;
