//! Resolve options: the per-call configuration surface and its JSON loader.

mod io;
mod model;

pub use io::{OPTIONS_PATH_ENV, default_options_path, load_options, load_options_from_path};
pub use model::{ConfigError, ResolveOptions, TypeRef, TypeRefs};
