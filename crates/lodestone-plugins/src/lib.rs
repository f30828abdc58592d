//! Host-side plugin loading for the Lodestone server.
//!
//! Opens plugin dynamic libraries, hands them a host vtable, validates their
//! metadata, and drives the enable/disable hooks. The server's scheduler and
//! shutdown machinery live elsewhere; this crate only wires plugins to them
//! through [`LdHostVTable`](lodestone_plugin_api::LdHostVTable).

mod error;
mod host;
mod load;
mod util;

pub use error::{Error, Result};
pub use host::default_host_vtable;
pub use load::{
    LoadedPlugin, dynamic_library_ext, find_plugin_libraries, inspect_plugin_library,
    is_dynamic_library_file,
};
