mod module;

pub use module::*;

// Single in-development ABI version (early-stage platform).
// Note: this ABI may change in place during early development.
pub const LODESTONE_PLUGIN_API_VERSION: u32 = 1;
pub const LODESTONE_PLUGIN_ENTRY_SYMBOL: &str = "lodestone_plugin_entry";

// Status codes (non-exhaustive). Plugins may use other non-zero codes, but the SDK uses these.
pub const LD_ERR_INVALID_ARG: i32 = 1;
pub const LD_ERR_UNSUPPORTED: i32 = 2;
pub const LD_ERR_INTERNAL: i32 = 3;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LdVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
    pub reserved: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LdLogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

/// Immutable UTF-8 bytes. Not NUL-terminated.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LdStr {
    pub ptr: *const u8,
    pub len: usize,
}

impl LdStr {
    pub const fn empty() -> Self {
        Self {
            ptr: core::ptr::null(),
            len: 0,
        }
    }
}

// Immutable byte view used across FFI boundaries. Callers are responsible for lifetime validity.
unsafe impl Send for LdStr {}
unsafe impl Sync for LdStr {}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LdStatus {
    /// 0 = OK, non-zero = error.
    pub code: i32,
    /// Optional error message. Ownership follows the callback direction: plugin
    /// hooks return plugin-owned bytes (free via `plugin_free`), host callbacks
    /// return host-owned bytes valid only for the duration of the call.
    pub message: LdStr,
}

impl LdStatus {
    pub const fn ok() -> Self {
        Self {
            code: 0,
            message: LdStr::empty(),
        }
    }
}
