use lodestone_plugin_api::LdStr;

/// # Safety
///
/// `s.ptr` must point to at least `s.len` readable bytes for the duration of
/// the call.
pub(crate) unsafe fn ldstr_to_string_lossy(s: LdStr) -> String {
    if s.ptr.is_null() || s.len == 0 {
        return String::new();
    }
    let bytes = unsafe { core::slice::from_raw_parts(s.ptr, s.len) };
    String::from_utf8_lossy(bytes).into_owned()
}
