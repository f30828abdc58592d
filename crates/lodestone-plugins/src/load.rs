use core::ffi::c_void;
use std::path::{Path, PathBuf};

use libloading::{Library, Symbol};
use lodestone_plugin_api::{
    LODESTONE_PLUGIN_API_VERSION, LODESTONE_PLUGIN_ENTRY_SYMBOL, LdHostVTable, LdPluginEntry,
    LdPluginModule, LdStatus,
};
use lodestone_plugin_protocol::PluginMetadata;
use tracing::info;

use crate::host::default_host_vtable;
use crate::util;
use crate::{Error, Result};

pub fn dynamic_library_ext() -> &'static str {
    match std::env::consts::OS {
        "windows" => "dll",
        "linux" => "so",
        "macos" => "dylib",
        _ => "",
    }
}

pub fn is_dynamic_library_file(path: &Path) -> bool {
    let ext = dynamic_library_ext();
    if ext.is_empty() {
        return false;
    }
    path.extension()
        .and_then(|value| value.to_str())
        .map(|value| value.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Collect plugin library candidates under `root`, sorted for determinism.
pub fn find_plugin_libraries(root: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(root.as_ref())
        .follow_links(false)
        .max_depth(8)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if is_dynamic_library_file(path) {
            out.push(path.to_path_buf());
        }
    }
    out.sort();
    out
}

/// A plugin library bound to a host vtable, alive until dropped.
#[derive(Debug)]
pub struct LoadedPlugin {
    metadata: PluginMetadata,
    module: *const LdPluginModule,
    // Field order matters: `_library` must drop before `_host`, since plugin
    // code may still dereference the vtable while the library unloads.
    _library: Library,
    _host: Box<LdHostVTable>,
    path: PathBuf,
}

impl LoadedPlugin {
    /// Open a plugin library, run its entry symbol against `host`, and
    /// validate the module it returns.
    pub fn load(path: impl AsRef<Path>, host: LdHostVTable) -> Result<Self> {
        let path = path.as_ref();

        // SAFETY: loading dynamic libraries and invoking plugin entrypoints is inherently unsafe.
        let library = unsafe { Library::new(path) }?;

        // SAFETY: symbol type matches the current ABI contract.
        let entry: Symbol<LdPluginEntry> = unsafe {
            library
                .get(LODESTONE_PLUGIN_ENTRY_SYMBOL.as_bytes())
                .map_err(|_| Error::MissingEntrySymbol {
                    symbol: LODESTONE_PLUGIN_ENTRY_SYMBOL,
                    path: path.to_path_buf(),
                })?
        };

        let host = Box::new(host);
        // SAFETY: entrypoint is trusted by ABI contract; null/version checked below. The boxed
        // vtable stays at a stable address for as long as the library is loaded.
        let module_ptr = unsafe { (entry)(&*host as *const LdHostVTable) };
        if module_ptr.is_null() {
            return Err(Error::invalid_plugin(format!(
                "plugin `{}` returned null module",
                path.display()
            )));
        }
        // SAFETY: module pointer remains valid while library is loaded.
        let module = unsafe { *module_ptr };
        validate_module(path, &module)?;

        let metadata_json = unsafe { util::ldstr_to_string_lossy((module.metadata_json_utf8)()) };
        let metadata = parse_and_validate_metadata(path, &metadata_json)?;

        info!(
            target: "lodestone_plugins::load",
            plugin_id = %metadata.id,
            plugin_name = %metadata.name,
            path = %path.display(),
            "plugin loaded"
        );

        Ok(Self {
            metadata,
            module: module_ptr,
            _library: library,
            _host: host,
            path: path.to_path_buf(),
        })
    }

    pub fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Invoke the plugin's activation hook.
    pub fn enable(&self) -> Result<()> {
        let module = self.module();
        self.hook_status_to_result("on_enable", (module.on_enable)())
    }

    pub fn disable(&self) -> Result<()> {
        let module = self.module();
        match module.on_disable {
            Some(cb) => self.hook_status_to_result("on_disable", cb()),
            None => Ok(()),
        }
    }

    fn module(&self) -> LdPluginModule {
        // SAFETY: the module stays valid while `library` is loaded.
        unsafe { *self.module }
    }

    fn hook_status_to_result(&self, operation: &'static str, status: LdStatus) -> Result<()> {
        if status.code == 0 {
            return Ok(());
        }
        let message = unsafe { util::ldstr_to_string_lossy(status.message) };
        // Hook status messages are plugin-owned; release them through the
        // module's free hook once copied.
        if let Some(free) = self.module().plugin_free
            && !status.message.ptr.is_null()
            && status.message.len > 0
        {
            free(status.message.ptr as *mut c_void, status.message.len, 1);
        }
        let details = if message.is_empty() {
            format!("code={}", status.code)
        } else {
            format!("code={}: {message}", status.code)
        };
        Err(Error::operation(operation, details))
    }
}

/// Load a plugin just long enough to read its validated metadata.
pub fn inspect_plugin_library(path: impl AsRef<Path>) -> Result<PluginMetadata> {
    let plugin = LoadedPlugin::load(path, default_host_vtable())?;
    Ok(plugin.metadata().clone())
}

pub(crate) fn validate_module(path: &Path, module: &LdPluginModule) -> Result<()> {
    if module.api_version != LODESTONE_PLUGIN_API_VERSION {
        return Err(Error::ApiVersionMismatch {
            path: path.to_path_buf(),
            plugin: module.api_version,
            host: LODESTONE_PLUGIN_API_VERSION,
        });
    }
    Ok(())
}

pub(crate) fn parse_and_validate_metadata(path: &Path, metadata_json: &str) -> Result<PluginMetadata> {
    let metadata: PluginMetadata =
        serde_json::from_str(metadata_json).map_err(|source| Error::MetadataParse {
            path: path.to_path_buf(),
            source,
        })?;
    if metadata.id.trim().is_empty() {
        return Err(Error::invalid_plugin(format!(
            "plugin metadata id is empty at {}",
            path.display()
        )));
    }
    if metadata.api_version != LODESTONE_PLUGIN_API_VERSION {
        return Err(Error::ApiVersionMismatch {
            path: path.to_path_buf(),
            plugin: metadata.api_version,
            host: LODESTONE_PLUGIN_API_VERSION,
        });
    }
    Ok(metadata)
}
