use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("no global window available")]
    NoWindow,

    #[error("document does not support editing commands")]
    NotHtmlDocument,

    #[error("{0} has not been rendered yet")]
    NotRendered(&'static str),

    #[error("invalid tool configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for ToolError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<ToolError> for JsValue {
    fn from(value: ToolError) -> Self {
        js_sys::Error::new(&value.to_string()).into()
    }
}
