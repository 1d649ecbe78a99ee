//! Host configuration.
//!
//! The host hands over a JSON snapshot with two string maps. Missing or
//! unparseable entries fall back to defaults; nothing here is fatal.

use lewis_core::Locale;
use lewis_render::BondingStyle;
use serde::Deserialize;
use std::collections::HashMap;

/// Undo depth of the model history.
pub const HISTORY_CAPACITY: usize = 100;

/// Quiet period before a model change is sent to the host.
pub const SYNC_QUIET_PERIOD_MS: f64 = 1000.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("malformed host configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raw configuration as delivered by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostConfiguration {
    pub session_id: Option<String>,
    pub parameters: HashMap<String, String>,
    pub shared_parameters: HashMap<String, String>,
}

impl HostConfiguration {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Editor settings derived from [`HostConfiguration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditorConfig {
    pub bonding_style: BondingStyle,
    pub locale: Locale,
    pub show_info_name: bool,
    pub show_info_order: bool,
    pub highlight_blocks: bool,
}

fn flag(value: Option<&String>) -> bool {
    value.is_some_and(|v| {
        let v = v.trim();
        v.eq_ignore_ascii_case("true") || v == "1"
    })
}

impl EditorConfig {
    pub fn from_host(host: &HostConfiguration) -> Self {
        let bonding_style = match host.shared_parameters.get("BONDING_TYPE") {
            None => BondingStyle::default(),
            Some(raw) => BondingStyle::parse(raw).unwrap_or_else(|| {
                log::warn!("config: unknown BONDING_TYPE {raw:?}, using default");
                BondingStyle::default()
            }),
        };
        let locale = match host.parameters.get("LANGUAGE") {
            None => Locale::default(),
            Some(raw) => Locale::from_tag(raw).unwrap_or_else(|| {
                log::warn!("config: unsupported LANGUAGE {raw:?}, using default");
                Locale::default()
            }),
        };
        Self {
            bonding_style,
            locale,
            show_info_name: flag(host.parameters.get("SHOW_INFO_NAME")),
            show_info_order: flag(host.parameters.get("SHOW_INFO_ORDER")),
            highlight_blocks: flag(host.parameters.get("HIGHLIGHT_BLOCKS")),
        }
    }

    /// Parse the host JSON, falling back to defaults when it is malformed.
    pub fn from_json_or_default(json: &str) -> Self {
        match HostConfiguration::from_json(json) {
            Ok(host) => Self::from_host(&host),
            Err(err) => {
                log::warn!("config: {err}; using defaults");
                Self::default()
            }
        }
    }
}
