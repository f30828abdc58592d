use core::ffi::c_void;

use lodestone_plugin_api::{LODESTONE_PLUGIN_API_VERSION, LdHostVTable, LdLogLevel, LdStr};

use crate::util;

extern "C" fn default_host_log(_: *mut c_void, level: LdLogLevel, msg: LdStr) {
    let text = unsafe { util::ldstr_to_string_lossy(msg) };
    match level {
        LdLogLevel::Error => tracing::error!(target: "lodestone_plugins::plugin", "{text}"),
        LdLogLevel::Warn => tracing::warn!(target: "lodestone_plugins::plugin", "{text}"),
        LdLogLevel::Info => tracing::info!(target: "lodestone_plugins::plugin", "{text}"),
        LdLogLevel::Debug => tracing::debug!(target: "lodestone_plugins::plugin", "{text}"),
        LdLogLevel::Trace => tracing::trace!(target: "lodestone_plugins::plugin", "{text}"),
    }
}

/// Host vtable for inspection-only loads: plugin logs are bridged to
/// `tracing`, no scheduler and no shutdown capability are offered.
pub fn default_host_vtable() -> LdHostVTable {
    LdHostVTable {
        api_version: LODESTONE_PLUGIN_API_VERSION,
        user_data: core::ptr::null_mut(),
        log_utf8: Some(default_host_log),
        schedule_task: None,
        request_shutdown: None,
    }
}
