use core::ffi::c_void;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use lodestone_plugin_sdk::{
    LODESTONE_PLUGIN_API_VERSION, LdHostVTable, LdLogLevel, LdStatus, LdStr, LdTaskRef,
    ldstr_to_str, status_ok,
};
use serde_json::Value;

use crate::lodestone_plugin_entry;

#[derive(Default)]
struct RecordingHost {
    scheduled: Mutex<Vec<(String, LdTaskRef)>>,
    shutdowns: AtomicUsize,
}

impl RecordingHost {
    fn scheduled_count(&self) -> usize {
        self.scheduled.lock().expect("scheduled lock").len()
    }

    fn shutdown_count(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    fn run_scheduled(&self, index: usize) {
        let task = self.scheduled.lock().expect("scheduled lock")[index].1;
        (task.run)(task.data);
    }
}

extern "C" fn rec_schedule(
    user_data: *mut c_void,
    plugin_id_utf8: LdStr,
    task: LdTaskRef,
) -> LdStatus {
    let host = unsafe { &*(user_data as *const RecordingHost) };
    let plugin_id = unsafe { ldstr_to_str(&plugin_id_utf8) }
        .unwrap_or("")
        .to_string();
    host.scheduled
        .lock()
        .expect("scheduled lock")
        .push((plugin_id, task));
    status_ok()
}

extern "C" fn rec_shutdown(user_data: *mut c_void) {
    let host = unsafe { &*(user_data as *const RecordingHost) };
    host.shutdowns.fetch_add(1, Ordering::SeqCst);
}

extern "C" fn rec_log(_user_data: *mut c_void, _level: LdLogLevel, _msg: LdStr) {}

/// Installs a fresh recording host and runs the entry symbol, exactly as the
/// server would on load.
fn activate_module() -> (&'static RecordingHost, lodestone_plugin_sdk::LdPluginModule) {
    let host: &'static RecordingHost = Box::leak(Box::new(RecordingHost::default()));
    let vtable: &'static LdHostVTable = Box::leak(Box::new(LdHostVTable {
        api_version: LODESTONE_PLUGIN_API_VERSION,
        user_data: host as *const RecordingHost as *mut c_void,
        log_utf8: Some(rec_log),
        schedule_task: Some(rec_schedule),
        request_shutdown: Some(rec_shutdown),
    }));
    let module_ptr = unsafe { lodestone_plugin_entry(vtable) };
    assert!(!module_ptr.is_null());
    (host, unsafe { *module_ptr })
}

// Host vtable registration is process-global; serialize the tests.
static TEST_GUARD: Mutex<()> = Mutex::new(());

fn guard() -> MutexGuard<'static, ()> {
    TEST_GUARD.lock().unwrap_or_else(|e| e.into_inner())
}

#[test]
fn module_metadata_identifies_the_probe() {
    let _guard = guard();
    let (_host, module) = activate_module();

    assert_eq!(module.api_version, LODESTONE_PLUGIN_API_VERSION);
    let ldstr = (module.metadata_json_utf8)();
    let raw = unsafe { ldstr_to_str(&ldstr) }
        .expect("metadata utf8")
        .to_string();
    let v: Value = serde_json::from_str(&raw).expect("parse metadata");
    assert_eq!(
        v["id"],
        Value::String("dev.lodestone.test.shutdown".to_string())
    );
    assert_eq!(v["api_version"], Value::from(LODESTONE_PLUGIN_API_VERSION));
}

#[test]
fn no_shutdown_is_requested_before_activation() {
    let _guard = guard();
    let (host, _module) = activate_module();

    assert_eq!(host.scheduled_count(), 0);
    assert_eq!(host.shutdown_count(), 0);
}

#[test]
fn activation_submits_exactly_one_deferred_task() {
    let _guard = guard();
    let (host, module) = activate_module();

    assert_eq!((module.on_enable)().code, 0);
    assert_eq!(host.scheduled_count(), 1);
    let submitted_id = host.scheduled.lock().expect("scheduled lock")[0].0.clone();
    assert_eq!(submitted_id, "dev.lodestone.test.shutdown");
    // Shutdown only happens once the host runs the task.
    assert_eq!(host.shutdown_count(), 0);
}

#[test]
fn running_the_task_requests_shutdown_exactly_once() {
    let _guard = guard();
    let (host, module) = activate_module();

    assert_eq!((module.on_enable)().code, 0);
    host.run_scheduled(0);

    assert_eq!(host.shutdown_count(), 1);
    // No further submissions or side effects from the task itself.
    assert_eq!(host.scheduled_count(), 1);
}

#[test]
fn reactivation_submits_one_new_task_per_activation() {
    let _guard = guard();
    let (host, module) = activate_module();

    assert_eq!((module.on_enable)().code, 0);
    assert_eq!((module.on_enable)().code, 0);
    assert_eq!((module.on_enable)().code, 0);
    assert_eq!(host.scheduled_count(), 3);

    for index in 0..3 {
        host.run_scheduled(index);
    }
    assert_eq!(host.shutdown_count(), 3);
}

#[test]
fn end_to_end_activation_then_shutdown() {
    let _guard = guard();
    let (host, module) = activate_module();

    assert_eq!(host.shutdown_count(), 0);
    assert_eq!((module.on_enable)().code, 0);
    assert_eq!(host.scheduled_count(), 1);

    host.run_scheduled(0);
    assert_eq!(host.shutdown_count(), 1);

    let on_disable = module.on_disable.expect("on_disable hook");
    assert_eq!(on_disable().code, 0);
    assert_eq!(host.shutdown_count(), 1);
}
