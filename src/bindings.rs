//! JS classes for hosts which load the tools from JavaScript.

use js_sys::Function;
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};
use web_sys::{HtmlElement, Range, Selection};

use crate::{
    component::{FontFamily, FontSize},
    dropdown::{toggle_event, ToggleEvent},
    InlineTool, ToolConfig,
};

/// Wraps `value` if it is callable. Anything else is ignored.
fn js_toggle_event(value: JsValue) -> Option<ToggleEvent> {
    let function = value.dyn_into::<Function>().ok()?;

    Some(toggle_event(move |opened| {
        if let Err(e) = function.call1(&JsValue::NULL, &JsValue::from_bool(opened)) {
            log::warn!("Toggle callback threw: {e:?}");
        }
    }))
}

macro_rules! inline_tool_class {
    ($name:ident, $component:ty) => {
        #[wasm_bindgen]
        pub struct $name {
            tool: InlineTool<$component>,
        }

        #[wasm_bindgen]
        impl $name {
            #[wasm_bindgen(constructor)]
            pub fn new(config: JsValue) -> std::result::Result<$name, JsValue> {
                let config = ToolConfig::from_js(&config)?;

                Ok(Self {
                    tool: InlineTool::new(config)?,
                })
            }

            pub fn title() -> String {
                InlineTool::<$component>::title().to_string()
            }

            #[wasm_bindgen(js_name = isInline)]
            pub fn is_inline() -> bool {
                InlineTool::<$component>::is_inline()
            }

            pub fn sanitize() -> std::result::Result<JsValue, JsValue> {
                InlineTool::<$component>::sanitize().to_js()
            }

            pub fn render(&self) -> std::result::Result<HtmlElement, JsValue> {
                self.tool.render()
            }

            #[wasm_bindgen(js_name = checkState)]
            pub fn check_state(&self, selection: &Selection) -> std::result::Result<bool, JsValue> {
                self.tool.check_state(selection)
            }

            pub fn surround(&self, range: &Range) -> std::result::Result<(), JsValue> {
                self.tool.surround(range)
            }

            pub fn clear(&self) -> std::result::Result<(), JsValue> {
                self.tool.clear()
            }

            pub fn toggle(&self, callback: JsValue) -> std::result::Result<(), JsValue> {
                self.tool.toggle(js_toggle_event(callback))
            }

            #[wasm_bindgen(js_name = setOnToggle)]
            pub fn set_on_toggle(&self, callback: JsValue) {
                self.tool.set_on_toggle(js_toggle_event(callback));
            }

            /// Text shown in the button, `undefined` for the empty placeholder.
            #[wasm_bindgen(getter)]
            pub fn label(&self) -> Option<String> {
                self.tool.label().text().map(str::to_string)
            }

            #[wasm_bindgen(getter, js_name = selectedValue)]
            pub fn selected_value(&self) -> Option<String> {
                self.tool.selected_value()
            }

            #[wasm_bindgen(getter, js_name = isOpen)]
            pub fn is_open(&self) -> bool {
                self.tool.is_open()
            }
        }
    };
}

inline_tool_class!(FontSizeInlineTool, FontSize);
inline_tool_class!(FontFamilyInlineTool, FontFamily);
