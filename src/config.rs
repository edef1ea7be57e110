use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::ToolError;

/// Placeholder shown in the button when no single value applies.
pub static EMPTY_LABEL: &str = "&nbsp;&nbsp;";

/// When the host is told that the option list finished opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HandshakeTiming {
    /// Right after the task which inserted the list.
    Microtask,
    /// After a fixed timer.
    Delay { millis: u32 },
}

impl Default for HandshakeTiming {
    fn default() -> Self {
        Self::Microtask
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolConfig {
    pub handshake: HandshakeTiming,
    /// Inner HTML written into the label for mixed or unknown selections.
    pub empty_label: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            handshake: HandshakeTiming::default(),
            empty_label: EMPTY_LABEL.to_string(),
        }
    }
}

impl ToolConfig {
    pub fn from_json(value: &str) -> Result<Self, ToolError> {
        Ok(serde_json::from_str(value)?)
    }

    /// Reads a plain JS object. `undefined` and `null` give the defaults.
    pub fn from_js(value: &JsValue) -> Result<Self, ToolError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }

        let json = js_sys::JSON::stringify(value)?;

        Self::from_json(&String::from(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = ToolConfig::from_json("{}").unwrap();

        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.handshake, HandshakeTiming::Microtask);
        assert_eq!(config.empty_label, EMPTY_LABEL);
    }

    #[test]
    fn reads_delay_handshake() {
        let config =
            ToolConfig::from_json(r#"{ "handshake": { "type": "delay", "millis": 50 } }"#)
                .unwrap();

        assert_eq!(config.handshake, HandshakeTiming::Delay { millis: 50 });
    }

    #[test]
    fn rejects_unknown_timing() {
        let err = ToolConfig::from_json(r#"{ "handshake": { "type": "never" } }"#).unwrap_err();

        assert!(matches!(err, ToolError::Config(_)));
    }
}
