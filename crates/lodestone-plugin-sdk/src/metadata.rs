pub use lodestone_plugin_protocol::{PluginMetadata, PluginMetadataVersion};

pub fn build_plugin_metadata(
    id: impl Into<String>,
    name: impl Into<String>,
    major: u16,
    minor: u16,
    patch: u16,
) -> PluginMetadata {
    PluginMetadata {
        id: id.into(),
        name: name.into(),
        api_version: crate::LODESTONE_PLUGIN_API_VERSION,
        version: PluginMetadataVersion {
            major,
            minor,
            patch,
        },
        info: None,
    }
}

pub fn build_plugin_metadata_json(
    id: impl Into<String>,
    name: impl Into<String>,
    major: u16,
    minor: u16,
    patch: u16,
) -> String {
    let meta = build_plugin_metadata(id, name, major, minor, patch);
    match meta.to_json() {
        Ok(s) => s,
        Err(_) => {
            let id = meta.id.replace('\\', "\\\\").replace('"', "\\\"");
            let name = meta.name.replace('\\', "\\\\").replace('"', "\\\"");
            format!(
                r#"{{"id":"{id}","name":"{name}","api_version":{},"version":{{"major":{},"minor":{},"patch":{}}}}}"#,
                meta.api_version, meta.version.major, meta.version.minor, meta.version.patch
            )
        }
    }
}

pub fn build_plugin_metadata_json_with_info_json(
    id: impl Into<String>,
    name: impl Into<String>,
    major: u16,
    minor: u16,
    patch: u16,
    info_json: Option<&str>,
) -> String {
    let info = info_json.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<serde_json::Value>(trimmed) {
            Ok(v) => Some(v),
            Err(_) => Some(serde_json::Value::String(trimmed.to_string())),
        }
    });
    let mut meta = build_plugin_metadata(id, name, major, minor, patch);
    meta.info = info;
    match meta.to_json() {
        Ok(s) => s,
        Err(_) => build_plugin_metadata_json(
            meta.id,
            meta.name,
            meta.version.major,
            meta.version.minor,
            meta.version.patch,
        ),
    }
}
