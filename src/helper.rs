// Coped from YEW

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget};

/// Whether `element` or one of its ancestors has `class`. Works on detached subtrees too.
pub fn parents_contains_class(element: &Element, class: &str) -> bool {
    let mut current = Some(element.clone());

    while let Some(element) = current {
        if element.class_list().contains(class) {
            return true;
        }

        current = element.parent_element();
    }

    false
}

pub trait TargetCast
where
    Self: AsRef<Event>,
{
    #[inline]
    fn target_dyn_into<T>(&self) -> Option<T>
    where
        T: AsRef<EventTarget> + JsCast,
    {
        self.as_ref()
            .target()
            .and_then(|target| target.dyn_into().ok())
    }
}

impl<E: AsRef<Event>> TargetCast for E {}
