/// Exports a plugin module and the `lodestone_plugin_entry` symbol.
///
/// The lifecycle type is constructed on the first enable and kept for the
/// lifetime of the library; every enable after that re-invokes `on_enable`
/// on the same instance.
#[macro_export]
macro_rules! export_plugin {
    (
        id: $plugin_id:literal,
        name: $plugin_name:literal,
        version: ($vmaj:literal, $vmin:literal, $vpatch:literal),
        lifecycle: $lc_ty:ty
        $(, info_json: $info_json:expr)?
        $(,)?
    ) => {
        const __LD_PLUGIN_ID: &str = $plugin_id;
        const __LD_PLUGIN_NAME: &str = $plugin_name;

        static __LD_LIFECYCLE: std::sync::Mutex<Option<$lc_ty>> = std::sync::Mutex::new(None);

        fn __ld_plugin_metadata_json() -> &'static str {
            static META: std::sync::OnceLock<String> = std::sync::OnceLock::new();
            META.get_or_init(|| {
                $crate::build_plugin_metadata_json_with_info_json(
                    __LD_PLUGIN_ID,
                    __LD_PLUGIN_NAME,
                    $vmaj,
                    $vmin,
                    $vpatch,
                    $crate::__ld_opt_info_json!($($info_json)?),
                )
            })
        }

        extern "C" fn __ld_plugin_metadata_json_utf8() -> $crate::LdStr {
            let s = __ld_plugin_metadata_json();
            $crate::LdStr {
                ptr: s.as_ptr(),
                len: s.len(),
            }
        }

        extern "C" fn __ld_plugin_on_enable() -> $crate::LdStatus {
            let mut slot = match __LD_LIFECYCLE.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    return $crate::status_err_msg(
                        $crate::LD_ERR_INTERNAL,
                        "plugin lifecycle state poisoned",
                    );
                }
            };
            if slot.is_none() {
                match <$lc_ty as $crate::PluginLifecycle>::create() {
                    Ok(instance) => *slot = Some(instance),
                    Err(e) => return $crate::status_err_msg(e.status_code(), &e.to_string()),
                }
            }
            match slot.as_mut() {
                Some(instance) => {
                    match <$lc_ty as $crate::PluginLifecycle>::on_enable(instance) {
                        Ok(()) => $crate::status_ok(),
                        Err(e) => $crate::status_err_msg(e.status_code(), &e.to_string()),
                    }
                }
                None => $crate::status_err($crate::LD_ERR_INTERNAL),
            }
        }

        extern "C" fn __ld_plugin_on_disable() -> $crate::LdStatus {
            let mut slot = match __LD_LIFECYCLE.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    return $crate::status_err_msg(
                        $crate::LD_ERR_INTERNAL,
                        "plugin lifecycle state poisoned",
                    );
                }
            };
            match slot.as_mut() {
                Some(instance) => {
                    match <$lc_ty as $crate::PluginLifecycle>::on_disable(instance) {
                        Ok(()) => $crate::status_ok(),
                        Err(e) => $crate::status_err_msg(e.status_code(), &e.to_string()),
                    }
                }
                // Never enabled; nothing to tear down.
                None => $crate::status_ok(),
            }
        }

        static __LD_PLUGIN_MODULE: $crate::LdPluginModule = $crate::LdPluginModule {
            api_version: $crate::LODESTONE_PLUGIN_API_VERSION,
            plugin_version: $crate::LdVersion {
                major: $vmaj,
                minor: $vmin,
                patch: $vpatch,
                reserved: 0,
            },
            plugin_free: Some($crate::plugin_free),
            metadata_json_utf8: __ld_plugin_metadata_json_utf8,
            on_enable: __ld_plugin_on_enable,
            on_disable: Some(__ld_plugin_on_disable),
        };

        #[unsafe(no_mangle)]
        pub unsafe extern "C" fn lodestone_plugin_entry(
            host: *const $crate::LdHostVTable,
        ) -> *const $crate::LdPluginModule {
            unsafe { $crate::__set_host_vtable(host) };
            $crate::__set_plugin_id(__LD_PLUGIN_ID);
            &__LD_PLUGIN_MODULE
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __ld_opt_info_json {
    () => {
        None
    };
    ($info_json:expr) => {
        Some($info_json)
    };
}
