use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::Result;

bitflags! {
    /// `<font>` attributes allowed through the host's content sanitizer.
    pub struct FontAttributes: u32 {
        const SIZE = 0b0000_0001;
        const FACE = 0b0000_0010;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontRule {
    pub size: bool,
    pub face: bool,
}

impl From<FontAttributes> for FontRule {
    fn from(value: FontAttributes) -> Self {
        Self {
            size: value.contains(FontAttributes::SIZE),
            face: value.contains(FontAttributes::FACE),
        }
    }
}

/// Static sanitizer rules, shaped the way the host expects them: `{ "font": { "size": true, "face": true } }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizerConfig {
    pub font: FontRule,
}

impl SanitizerConfig {
    pub fn new(attributes: FontAttributes) -> Self {
        Self {
            font: attributes.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Plain bools never fail to serialize.
        serde_json::to_value(self).unwrap_or_default()
    }

    pub fn to_js(&self) -> Result<JsValue> {
        js_sys::JSON::parse(&self.to_json().to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn both_attributes() {
        let config = SanitizerConfig::new(FontAttributes::all());

        assert_eq!(config.to_json(), json!({ "font": { "size": true, "face": true } }));
    }

    #[test]
    fn only_size() {
        let config = SanitizerConfig::new(FontAttributes::SIZE);

        assert_eq!(config.to_json(), json!({ "font": { "size": true, "face": false } }));
    }
}
