use core::ffi::c_void;

use crate::{LdLogLevel, LdStatus, LdStr, LdVersion};

/// One-shot unit of work submitted to the host scheduler.
///
/// Ownership: the host runs `run(data)` exactly once, which consumes `data`.
/// A host that discards a queued task without running it must call
/// `drop_unrun(data)` instead. The two calls are mutually exclusive.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LdTaskRef {
    pub data: *mut c_void,
    pub run: extern "C" fn(data: *mut c_void),
    pub drop_unrun: Option<extern "C" fn(data: *mut c_void)>,
}

// Task payloads must be safe to hand to whatever thread the host scheduler
// picks. The SDK enforces this with a `Send` bound on the captured closure.
unsafe impl Send for LdTaskRef {}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LdHostVTable {
    pub api_version: u32,
    pub user_data: *mut c_void,
    pub log_utf8: Option<extern "C" fn(user_data: *mut c_void, level: LdLogLevel, msg: LdStr)>,
    /// Submit a one-shot deferred task to run on the host's own schedule.
    /// `plugin_id_utf8` identifies the submitting plugin and is only valid for
    /// the duration of the call. Ownership of `task` transfers to the host
    /// regardless of status; a host that rejects the submission must call
    /// `drop_unrun` before returning.
    pub schedule_task: Option<
        extern "C" fn(user_data: *mut c_void, plugin_id_utf8: LdStr, task: LdTaskRef) -> LdStatus,
    >,
    /// Request orderly server shutdown. Idempotent. No parameters, no result.
    pub request_shutdown: Option<extern "C" fn(user_data: *mut c_void)>,
}

// Raw pointers make this not auto-Send/Sync. Host vtable is treated as immutable and requires
// `user_data` to be thread-safe when used across threads.
unsafe impl Send for LdHostVTable {}
unsafe impl Sync for LdHostVTable {}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LdPluginModule {
    pub api_version: u32,
    pub plugin_version: LdVersion,
    /// Optional free hook for plugin-owned UTF-8 bytes returned by plugin hooks.
    pub plugin_free: Option<extern "C" fn(ptr: *mut c_void, len: usize, align: usize)>,
    pub metadata_json_utf8: extern "C" fn() -> LdStr,

    /// Invoked by the host when the plugin transitions to enabled. The host
    /// may enable a plugin more than once; the plugin must tolerate that.
    pub on_enable: extern "C" fn() -> LdStatus,
    pub on_disable: Option<extern "C" fn() -> LdStatus>,
}

pub type LdPluginEntry = unsafe extern "C" fn(host: *const LdHostVTable) -> *const LdPluginModule;
