use wasm_bindgen::JsValue;

mod bindings;
pub mod component;
mod config;
pub mod dropdown;
mod error;
mod helper;
pub mod host;
mod sanitize;
pub mod tool;
mod util;

pub type Result<V, E = JsValue> = std::result::Result<V, E>;

pub use bindings::{FontFamilyInlineTool, FontSizeInlineTool};
pub use component::{ComponentFlag, FontFamily, FontSize, FontSizeStep, StyleComponent};
pub use config::{HandshakeTiming, ToolConfig};
pub use dropdown::{Dropdown, Handshake, Label, ToggleEvent};
pub use error::ToolError;
pub use host::{DocumentHost, EditorHost};
pub use sanitize::{FontAttributes, FontRule, SanitizerConfig};
pub use tool::InlineTool;

pub type FontSizeTool = InlineTool<FontSize>;
pub type FontFamilyTool = InlineTool<FontFamily>;
