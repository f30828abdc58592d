use core::sync::atomic::{AtomicPtr, Ordering};
use std::sync::OnceLock;

use crate::task::task_ref_from_closure;
use crate::{LdHostVTable, LdLogLevel, LdStatus, LdStr, SdkError, SdkResult, ldstr_to_str};

static HOST_VTABLE: AtomicPtr<LdHostVTable> = AtomicPtr::new(core::ptr::null_mut());
static PLUGIN_ID: OnceLock<&'static str> = OnceLock::new();

#[doc(hidden)]
pub unsafe fn __set_host_vtable(host: *const LdHostVTable) {
    HOST_VTABLE.store(host as *mut LdHostVTable, Ordering::Release);
}

#[doc(hidden)]
pub fn __set_plugin_id(id: &'static str) {
    let _ = PLUGIN_ID.set(id);
}

/// Plugin id registered by `export_plugin!`. Empty until the entry symbol ran.
pub fn registered_plugin_id() -> &'static str {
    PLUGIN_ID.get().copied().unwrap_or("")
}

/// Log a message to the host, if the host provided a logger.
///
/// This is purely best-effort: if no host logger is present, this is a no-op.
pub fn host_log(level: LdLogLevel, msg: &str) {
    let host = HOST_VTABLE.load(Ordering::Acquire);
    if host.is_null() {
        return;
    }

    // Safety: the host owns the vtable and defines its lifetime.
    let cb = unsafe { (*host).log_utf8 };
    let Some(cb) = cb else {
        return;
    };

    let bytes = msg.as_bytes();
    let st = LdStr {
        ptr: bytes.as_ptr(),
        len: bytes.len(),
    };
    let user_data = unsafe { (*host).user_data };
    cb(user_data, level, st);
}

fn host_status_to_result(operation: &'static str, status: LdStatus) -> SdkResult<()> {
    if status.code == 0 {
        return Ok(());
    }
    // Host status messages are host-owned and only valid during the call, so
    // copy before returning.
    let text = unsafe { ldstr_to_str(&status.message) }
        .map(ToOwned::to_owned)
        .unwrap_or_default();
    let details = if text.is_empty() {
        String::new()
    } else {
        format!(": {text}")
    };
    Err(SdkError::HostOperationFailed {
        operation,
        code: status.code,
        details,
    })
}

/// Submit a one-shot deferred task to the host scheduler.
///
/// The task runs once, asynchronously, on whatever thread or tick the host
/// picks. There is no cancellation handle; a host that drops the task unrun
/// releases the closure without calling it.
pub fn schedule_task<F>(f: F) -> SdkResult<()>
where
    F: FnOnce() + Send + 'static,
{
    let host = HOST_VTABLE.load(Ordering::Acquire);
    if host.is_null() {
        return Err(SdkError::HostUnavailable);
    }
    let cb = unsafe { (*host).schedule_task }
        .ok_or(SdkError::HostCallbackUnavailable("schedule_task"))?;
    let user_data = unsafe { (*host).user_data };

    let plugin_id = registered_plugin_id();
    let id = LdStr {
        ptr: plugin_id.as_ptr(),
        len: plugin_id.len(),
    };
    let status = cb(user_data, id, task_ref_from_closure(f));
    host_status_to_result("schedule_task", status)
}

/// Request orderly shutdown of the host process.
///
/// Fire-and-forget: the host owns what shutdown means and when it happens.
/// Without a host, or with a host that offers no shutdown capability, this is
/// a no-op.
pub fn request_shutdown() {
    let host = HOST_VTABLE.load(Ordering::Acquire);
    if host.is_null() {
        return;
    }
    let cb = unsafe { (*host).request_shutdown };
    let Some(cb) = cb else {
        return;
    };
    let user_data = unsafe { (*host).user_data };
    cb(user_data);
}
