//! JSON runtime configuration for the report tool.
use crate::convert::ConvertParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub svg_out: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            svg_out: None,
            report_json: None,
            pretty: true,
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub params: ConvertParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::RuntimeConfig;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{ "input_path": "in.png" }"#).expect("parse");
        assert!(config.output.pretty);
        assert!(config.output.svg_out.is_none());
        assert!(config.params.group_by_color);
        assert_eq!(config.params.color_tolerance, 0);
    }

    #[test]
    fn params_override_defaults() {
        let config: RuntimeConfig = serde_json::from_str(
            r#"{
                "input_path": "in.png",
                "output": { "svg_out": "out.svg", "report_json": null, "pretty": false },
                "params": { "color_tolerance": 3, "remove_background": true }
            }"#,
        )
        .expect("parse");
        assert!(!config.output.pretty);
        assert_eq!(config.params.color_tolerance, 3);
        assert!(config.params.remove_background);
    }
}
