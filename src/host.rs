use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlDocument, Node, Window};

use crate::{Result, ToolError};

/// Formatting primitives provided by the editing host.
pub trait EditorHost {
    /// Whether `command` is active over the current selection.
    fn query_command_state(&self, command: &str) -> Result<bool>;

    /// Applies `command` with `value` to the current selection.
    fn exec_command(&self, command: &str, value: &str) -> Result<bool>;

    /// Computed value of a style property for `node`. Text nodes resolve through their parent element.
    fn computed_style(&self, node: &Node, property: &str) -> Result<Option<String>>;
}

/// [`EditorHost`] backed by the browser's editing commands.
pub struct DocumentHost {
    document: HtmlDocument,
    window: Window,
}

impl DocumentHost {
    pub fn new() -> Result<Self, ToolError> {
        Self::with_document(gloo_utils::document())
    }

    /// Use a document other than the global one, e.g. one inside an iframe.
    pub fn with_document(document: Document) -> Result<Self, ToolError> {
        let window = document.default_view().ok_or(ToolError::NoWindow)?;

        let document = document
            .dyn_into::<HtmlDocument>()
            .map_err(|_| ToolError::NotHtmlDocument)?;

        Ok(Self { document, window })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl EditorHost for DocumentHost {
    fn query_command_state(&self, command: &str) -> Result<bool> {
        self.document.query_command_state(command)
    }

    fn exec_command(&self, command: &str, value: &str) -> Result<bool> {
        self.document
            .exec_command_with_show_ui_and_value(command, false, value)
    }

    fn computed_style(&self, node: &Node, property: &str) -> Result<Option<String>> {
        let element = match node.dyn_ref::<Element>() {
            Some(element) => Some(element.clone()),
            None => node.parent_element(),
        };

        let Some(element) = element else {
            log::debug!("No element to read {property} from");
            return Ok(None);
        };

        match self.window.get_computed_style(&element)? {
            Some(style) => Ok(Some(style.get_property_value(property)?)),
            None => Ok(None),
        }
    }
}
