//! Serde types exchanged as JSON across the plugin ABI.

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct PluginMetadataVersion {
    pub major: u16,
    pub minor: u16,
    pub patch: u16,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct PluginMetadata {
    pub id: String,
    pub name: String,
    pub api_version: u32,
    pub version: PluginMetadataVersion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<serde_json::Value>,
}

impl PluginMetadata {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_json_omits_absent_info() {
        let meta = PluginMetadata {
            id: "dev.lodestone.test".to_string(),
            name: "Test".to_string(),
            api_version: 1,
            version: PluginMetadataVersion {
                major: 0,
                minor: 1,
                patch: 0,
            },
            info: None,
        };
        let raw = meta.to_json().expect("serialize metadata");
        assert!(!raw.contains("\"info\""));

        let parsed: PluginMetadata = serde_json::from_str(&raw).expect("parse metadata");
        assert_eq!(parsed, meta);
    }
}
