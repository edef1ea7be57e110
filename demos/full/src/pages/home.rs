use std::rc::Rc;

use font_tools::{dropdown::toggle_event, FontFamilyTool, FontSizeTool, ToolConfig};
use gloo_utils::document;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue, UnwrapThrowExt};
use web_sys::{Event, HtmlElement, MouseEvent, Selection};
use yew::{
    function_component,
    functional::{use_mut_ref, use_node_ref},
    html, Callback,
};

struct DemoToolbar {
    size: Rc<FontSizeTool>,
    family: Rc<FontFamilyTool>,

    _on_selection: Closure<dyn FnMut(Event)>,
}

fn current_selection() -> Option<Selection> {
    document()
        .get_selection()
        .unwrap_throw()
        .filter(|v| v.range_count() != 0)
}

fn mount_toolbar(container: HtmlElement) -> Result<DemoToolbar, JsValue> {
    let size = Rc::new(FontSizeTool::new(ToolConfig::default())?);
    let family = Rc::new(FontFamilyTool::new(ToolConfig::default())?);

    container.append_child(&size.render()?)?;
    container.append_child(&family.render()?)?;

    // Only one option list open at a time.
    {
        let family = Rc::downgrade(&family);

        size.set_on_toggle(Some(toggle_event(move |opened| {
            debug!("Font Size opened: {opened}");

            if let Some(family) = family.upgrade().filter(|v| opened && v.is_open()) {
                family.toggle(None).unwrap_throw();
            }
        })));
    }

    {
        let size = Rc::downgrade(&size);

        family.set_on_toggle(Some(toggle_event(move |opened| {
            debug!("Font Family opened: {opened}");

            if let Some(size) = size.upgrade().filter(|v| opened && v.is_open()) {
                size.toggle(None).unwrap_throw();
            }
        })));
    }

    let on_selection = {
        let size = size.clone();
        let family = family.clone();

        Closure::wrap(Box::new(move |_: Event| {
            if let Some(selection) = current_selection() {
                let size_active = size.check_state(&selection).unwrap_throw();
                let family_active = family.check_state(&selection).unwrap_throw();

                debug!(
                    "Selection changed. size: {:?} ({size_active}), family: {:?} ({family_active})",
                    size.label().text(),
                    family.label().text(),
                );
            }
        }) as Box<dyn FnMut(Event)>)
    };

    document().add_event_listener_with_callback(
        "selectionchange",
        on_selection.as_ref().unchecked_ref(),
    )?;

    Ok(DemoToolbar {
        size,
        family,
        _on_selection: on_selection,
    })
}

#[function_component(Home)]
pub fn home() -> Html {
    let node = use_node_ref();
    let toolbar = use_mut_ref(|| Option::<DemoToolbar>::None);

    {
        let node = node.clone();
        let toolbar = toolbar.clone();

        yew_hooks::use_mount(move || {
            let mounted = mount_toolbar(node.cast::<HtmlElement>().unwrap_throw()).unwrap_throw();
            *toolbar.borrow_mut() = Some(mounted);
        });
    }

    let keep_selection = Callback::from(|e: MouseEvent| e.prevent_default());

    let apply = {
        let toolbar = toolbar.clone();

        Callback::from(move |_: MouseEvent| {
            let toolbar = toolbar.borrow();

            let (Some(toolbar), Some(selection)) = (toolbar.as_ref(), current_selection()) else {
                return;
            };

            let range = selection.get_range_at(0).unwrap_throw();

            debug!(
                "Applying size {:?}, family {:?}",
                toolbar.size.selected_value(),
                toolbar.family.selected_value(),
            );

            toolbar.size.surround(&range).unwrap_throw();
            toolbar.family.surround(&range).unwrap_throw();

            toolbar.size.clear().unwrap_throw();
            toolbar.family.clear().unwrap_throw();
        })
    };

    html! {
        <div>
            <h2>{ "Font Tools" }</h2>

            <div class="toolbar" ref={ node } onmousedown={ keep_selection.clone() }></div>
            <button onmousedown={ keep_selection } onclick={ apply }>{ "Apply" }</button>

            <div contenteditable="true">
                <p>{ "Duis ut velit nulla. Morbi luctus mollis nunc, a convallis elit porta tristique." }</p>
                <p style="font-size: 24px">{ "Praesent elementum nec magna quis interdum." }</p>
                <p style="font-family: Georgia, serif">{ "Integer felis enim, scelerisque at dui a, aliquam tempus justo." }</p>
                <p style={ r#"font-family: -apple-system, "Helvetica Neue", sans-serif"# }>{ "Ut sed nibh sit amet ipsum elementum dapibus." }</p>
            </div>
        </div>
    }
}
