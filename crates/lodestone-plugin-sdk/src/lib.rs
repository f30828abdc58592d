pub use lodestone_plugin_api::*;

mod errors;
mod ffi_utils;
mod host;
mod lifecycle;
mod macros;
mod metadata;
mod task;

pub use errors::*;
pub use ffi_utils::*;
pub use host::*;
pub use lifecycle::*;
pub use metadata::*;
