use js_sys::Function;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::EventTarget;

use crate::Result;

/// Event listener which stays attached while this value is alive.
pub struct ElementEvent {
    element: EventTarget,
    event: &'static str,
    function: Box<dyn AsRef<JsValue>>,
}

impl ElementEvent {
    pub fn listen<C: AsRef<JsValue> + 'static>(
        element: EventTarget,
        event: &'static str,
        function: C,
    ) -> Result<Self> {
        element.add_event_listener_with_callback(event, function.as_ref().unchecked_ref())?;

        Ok(Self {
            element,
            event,
            function: Box::new(function),
        })
    }
}

impl Drop for ElementEvent {
    fn drop(&mut self) {
        let function: &Function = (*self.function).as_ref().unchecked_ref();

        if let Err(e) = self
            .element
            .remove_event_listener_with_callback(self.event, function)
        {
            log::warn!("Unable to remove {} listener: {e:?}", self.event);
        }
    }
}
