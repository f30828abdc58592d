use core::ffi::c_void;

use crate::LdTaskRef;

type TaskBox = Box<dyn FnOnce() + Send + 'static>;

/// Wraps a closure into an `LdTaskRef` the host can run exactly once.
///
/// Double-boxed because `dyn FnOnce` is a fat pointer and the ABI carries a
/// single thin `data` pointer.
pub(crate) fn task_ref_from_closure<F>(f: F) -> LdTaskRef
where
    F: FnOnce() + Send + 'static,
{
    let boxed: Box<TaskBox> = Box::new(Box::new(f));
    LdTaskRef {
        data: Box::into_raw(boxed) as *mut c_void,
        run: run_boxed_task,
        drop_unrun: Some(drop_boxed_task),
    }
}

extern "C" fn run_boxed_task(data: *mut c_void) {
    if data.is_null() {
        return;
    }
    // Safety: `data` came from `task_ref_from_closure` and the host calls
    // `run` at most once, so the box is consumed exactly here.
    let task = unsafe { Box::from_raw(data as *mut TaskBox) };
    (*task)();
}

extern "C" fn drop_boxed_task(data: *mut c_void) {
    if data.is_null() {
        return;
    }
    // Safety: `run` and `drop_unrun` are mutually exclusive, so the box is
    // still live and released here without running the closure.
    unsafe { drop(Box::from_raw(data as *mut TaskBox)) };
}
