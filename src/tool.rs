use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::{prelude::Closure, JsCast};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, MouseEvent, Node, Range, Selection};

use crate::{
    component::StyleComponent,
    config::HandshakeTiming,
    dropdown::{self, toggle_event, Dropdown, Label, OptionEntry, Toggle, ToggleEvent},
    helper::{parents_contains_class, TargetCast},
    host::{DocumentHost, EditorHost},
    sanitize::SanitizerConfig,
    util::ElementEvent,
    Result, ToolConfig, ToolError,
};

pub static LABEL_WRAPPER_CLASS: &str = "button-wrapper-text";
pub static LABEL_CLASS: &str = "selected-font-value";
pub static OPTION_LIST_CLASS: &str = "selection-list";
pub static OPTION_WRAPPER_CLASS: &str = "selection-list-wrapper";
pub static OPTION_CLASS: &str = "selection-list-option";
pub static OPTION_ACTIVE_CLASS: &str = "selection-list-option-active";
pub static VALUE_ATTRIBUTE: &str = "data-value";

type SharedState<C> = Rc<RefCell<ToolState<C>>>;

/// Toolbar button with an option list for one style dimension.
///
/// The host calls [`render`](Self::render) once, [`check_state`](Self::check_state) on every
/// selection change, [`surround`](Self::surround) to commit and [`clear`](Self::clear) to reset.
pub struct InlineTool<C: StyleComponent> {
    state: SharedState<C>,
}

struct ToolState<C: StyleComponent> {
    dropdown: Dropdown<C>,
    config: ToolConfig,
    host: Rc<dyn EditorHost>,
    document: Document,

    // Declared before `nodes`: the list must go before the click closure it uses.
    list: Option<OptionList>,
    nodes: Option<ButtonNodes>,

    /// Passed to `toggle` when the user clicks the button.
    on_toggle: Option<ToggleEvent>,
}

struct ButtonNodes {
    button: HtmlElement,
    label: HtmlElement,

    _on_click: ElementEvent,
    /// Delegated listener, attached to every option list container.
    on_option_click: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for ButtonNodes {
    fn drop(&mut self) {
        self.button.remove();
    }
}

struct OptionList {
    container: HtmlElement,
}

impl Drop for OptionList {
    fn drop(&mut self) {
        self.container.remove();
    }
}

impl<C: StyleComponent> InlineTool<C> {
    pub fn new(config: ToolConfig) -> Result<Self> {
        let host = DocumentHost::new()?;
        let document = host.document().clone();

        Ok(Self::with_host(config, Rc::new(host), document))
    }

    pub fn with_host(config: ToolConfig, host: Rc<dyn EditorHost>, document: Document) -> Self {
        Self {
            state: Rc::new(RefCell::new(ToolState {
                dropdown: Dropdown::new(),
                config,
                host,
                document,
                list: None,
                nodes: None,
                on_toggle: None,
            })),
        }
    }

    pub fn title() -> &'static str {
        C::TITLE
    }

    pub fn is_inline() -> bool {
        C::IS_INLINE
    }

    pub fn sanitize() -> SanitizerConfig {
        C::sanitize()
    }

    /// Registers the observer told about open/close transitions started from the button.
    pub fn set_on_toggle(&self, on_toggle: Option<ToggleEvent>) {
        self.state.borrow_mut().on_toggle = on_toggle;
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().dropdown.is_open()
    }

    pub fn label(&self) -> Label {
        self.state.borrow().dropdown.label().clone()
    }

    pub fn selected_value(&self) -> Option<String> {
        self.state
            .borrow()
            .dropdown
            .selected()
            .map(ToString::to_string)
    }

    /// Builds the button. Later calls return the same element.
    pub fn render(&self) -> Result<HtmlElement> {
        if let Some(nodes) = &self.state.borrow().nodes {
            log::warn!("{} - Already rendered", C::TITLE);
            return Ok(nodes.button.clone());
        }

        let document = self.state.borrow().document.clone();

        let button = create_element(&document, "button", &C::FLAG.into_class_names())?;
        button.set_attribute("type", "button")?;
        button.set_title(C::TITLE);

        let wrapper = create_element(&document, "div", LABEL_WRAPPER_CLASS)?;
        let label = create_element(&document, "div", LABEL_CLASS)?;
        wrapper.append_child(&label)?;
        button.append_child(&wrapper)?;

        let on_click = {
            let state = Rc::downgrade(&self.state);

            let function: Closure<dyn FnMut(MouseEvent)> =
                Closure::new(move |event: MouseEvent| on_button_click(&state, &event));

            ElementEvent::listen(button.clone().unchecked_into(), "click", function)?
        };

        let on_option_click: Closure<dyn FnMut(MouseEvent)> = {
            let state = Rc::downgrade(&self.state);

            Closure::new(move |event: MouseEvent| on_option_click(&state, &event))
        };

        let mut state = self.state.borrow_mut();

        state.nodes = Some(ButtonNodes {
            button: button.clone(),
            label,
            _on_click: on_click,
            on_option_click,
        });

        state.write_label();

        Ok(button)
    }

    /// Opens when closed and given a callback, closes otherwise.
    ///
    /// The callback hears `true` once the list is in the document and `false` when it closes.
    pub fn toggle(&self, on_toggled: Option<ToggleEvent>) -> Result<()> {
        run_toggle(&self.state, on_toggled)
    }

    /// Syncs the button label with the selection and returns whether the command is active.
    pub fn check_state(&self, selection: &Selection) -> Result<bool> {
        let host = self.state.borrow().host.clone();

        let is_active = host.query_command_state(C::COMMAND)?;

        let anchor = computed_style::<C>(&*host, selection.anchor_node())?;
        let focus = computed_style::<C>(&*host, selection.focus_node())?;

        let mut state = self.state.borrow_mut();

        state.dropdown.sync(anchor.as_deref(), focus.as_deref());
        state.write_label();

        Ok(is_active)
    }

    /// Applies the pending value, if any.
    ///
    /// The host places `_range` in the live selection beforehand; the command acts on the selection.
    pub fn surround(&self, _range: &Range) -> Result<()> {
        let (host, pending) = {
            let state = self.state.borrow();
            (state.host.clone(), state.dropdown.pending_command())
        };

        if let Some(pending) = pending {
            pending.apply(&*host)?;
        }

        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let toggle = self.state.borrow_mut().dropdown.clear();

        apply_toggle(&self.state, toggle)
    }
}

impl<C: StyleComponent> ToolState<C> {
    fn insert_list(&mut self, options: &[OptionEntry<C::Value>]) -> Result<()> {
        let Some(nodes) = &self.nodes else {
            return Err(ToolError::NotRendered(C::TITLE).into());
        };

        let container = create_element(&self.document, "div", OPTION_LIST_CLASS)?;
        let wrapper = create_element(&self.document, "div", OPTION_WRAPPER_CLASS)?;

        for option in options {
            let element = create_element(&self.document, "div", OPTION_CLASS)?;
            element.set_attribute(VALUE_ATTRIBUTE, &option.value.to_string())?;

            if let Some(style) = &option.style {
                element.set_attribute("style", style)?;
            }

            if option.active {
                element.class_list().add_1(OPTION_ACTIVE_CLASS)?;
            }

            element.set_text_content(Some(&*option.label));
            wrapper.append_child(&element)?;
        }

        container.append_child(&wrapper)?;
        container.add_event_listener_with_callback(
            "click",
            nodes.on_option_click.as_ref().unchecked_ref(),
        )?;

        nodes.button.append_child(&container)?;

        self.list = Some(OptionList { container });

        Ok(())
    }

    fn write_label(&self) {
        let Some(nodes) = &self.nodes else {
            return;
        };

        match self.dropdown.label() {
            Label::Empty => nodes.label.set_inner_html(&self.config.empty_label),
            Label::Value(value) => nodes.label.set_text_content(Some(value.as_str())),
        }
    }
}

fn create_element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement> {
    let element: HtmlElement = document.create_element(tag)?.unchecked_into();
    element.set_class_name(class);

    Ok(element)
}

fn computed_style<C: StyleComponent>(
    host: &dyn EditorHost,
    node: Option<Node>,
) -> Result<Option<String>> {
    match node {
        Some(node) => host.computed_style(&node, C::STYLE_PROPERTY),
        None => Ok(None),
    }
}

fn on_button_click<C: StyleComponent>(state: &Weak<RefCell<ToolState<C>>>, event: &MouseEvent) {
    // Option clicks bubble up to the button. They are handled by the list.
    if let Some(target) = event.target_dyn_into::<Element>() {
        if parents_contains_class(&target, OPTION_LIST_CLASS) {
            return;
        }
    }

    let Some(state) = state.upgrade() else {
        log::debug!("{} - Button clicked after the tool was dropped", C::TITLE);
        return;
    };

    let on_toggle = state
        .borrow()
        .on_toggle
        .clone()
        .unwrap_or_else(|| toggle_event(|_| {}));

    if let Err(e) = run_toggle(&state, Some(on_toggle)) {
        log::warn!("{} - Unable to toggle: {e:?}", C::TITLE);
    }
}

fn on_option_click<C: StyleComponent>(state: &Weak<RefCell<ToolState<C>>>, event: &MouseEvent) {
    let Some(state) = state.upgrade() else {
        return;
    };

    let raw = event
        .target_dyn_into::<Element>()
        .and_then(|target| target.get_attribute(VALUE_ATTRIBUTE))
        .unwrap_or_default();

    let toggle = state.borrow_mut().dropdown.select(&raw);

    if let Err(e) = apply_toggle(&state, toggle) {
        log::warn!("{} - Unable to close: {e:?}", C::TITLE);
    }
}

fn run_toggle<C: StyleComponent>(state: &SharedState<C>, on_toggled: Option<ToggleEvent>) -> Result<()> {
    let toggle = state.borrow_mut().dropdown.toggle(on_toggled);

    apply_toggle(state, toggle)
}

/// Carries out a [`Toggle`]. No borrow of `state` is held while host callbacks run.
fn apply_toggle<C: StyleComponent>(state: &SharedState<C>, toggle: Toggle<C::Value>) -> Result<()> {
    match toggle {
        Toggle::Open(options) => {
            let inserted = state.borrow_mut().insert_list(&options);

            if let Err(e) = inserted {
                let rollback = state.borrow_mut().dropdown.toggle(None);
                apply_toggle(state, rollback)?;

                return Err(e);
            }

            let timing = state.borrow().config.handshake;
            schedule_opened(Rc::downgrade(state), timing);

            Ok(())
        }

        Toggle::Close { was_open, notify } => {
            let list = state.borrow_mut().list.take();

            if was_open && list.is_none() {
                log::debug!("{} - Closed without an option list", C::TITLE);
            }

            drop(list);

            dropdown::notify(notify, false);

            Ok(())
        }
    }
}

/// Announces the opening after the current task, once the list is part of the document.
fn schedule_opened<C: StyleComponent>(state: Weak<RefCell<ToolState<C>>>, timing: HandshakeTiming) {
    spawn_local(async move {
        if let HandshakeTiming::Delay { millis } = timing {
            TimeoutFuture::new(millis).await;
        }

        let Some(state) = state.upgrade() else {
            return;
        };

        let event = state.borrow().dropdown.opened_event();

        dropdown::notify(event, true);
    });
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::{Cell, RefCell};

    use gloo_utils::document;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    use super::*;
    use crate::component::FontSize;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Default)]
    struct RecordingHost {
        /// Returned by `computed_style`, last entry first.
        styles: RefCell<Vec<String>>,
        commands: RefCell<Vec<(String, String)>>,
        active: Cell<bool>,
    }

    impl EditorHost for RecordingHost {
        fn query_command_state(&self, _command: &str) -> Result<bool> {
            Ok(self.active.get())
        }

        fn exec_command(&self, command: &str, value: &str) -> Result<bool> {
            self.commands
                .borrow_mut()
                .push((command.to_string(), value.to_string()));

            Ok(true)
        }

        fn computed_style(&self, _node: &Node, _property: &str) -> Result<Option<String>> {
            Ok(self.styles.borrow_mut().pop())
        }
    }

    fn recorder() -> (ToggleEvent, Rc<RefCell<Vec<bool>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let event = {
            let calls = calls.clone();
            toggle_event(move |opened| calls.borrow_mut().push(opened))
        };

        (event, calls)
    }

    fn mounted_tool() -> (InlineTool<FontSize>, Rc<RecordingHost>, HtmlElement) {
        let host = Rc::new(RecordingHost::default());
        let tool = InlineTool::<FontSize>::with_host(ToolConfig::default(), host.clone(), document());

        let button = tool.render().unwrap();
        document().body().unwrap().append_child(&button).unwrap();

        (tool, host, button)
    }

    fn find(button: &HtmlElement, selector: &str) -> Option<HtmlElement> {
        button
            .query_selector(selector)
            .unwrap()
            .map(|element| element.unchecked_into())
    }

    fn select_text(text: &str) -> Selection {
        let document = document();

        let span = document.create_element("span").unwrap();
        span.set_text_content(Some(text));
        document.body().unwrap().append_child(&span).unwrap();

        let range = document.create_range().unwrap();
        range.select_node_contents(&span).unwrap();

        let selection = document.get_selection().unwrap().unwrap();
        selection.remove_all_ranges().unwrap();
        selection.add_range(&range).unwrap();

        selection
    }

    /// Lets the spawned open notification run.
    async fn next_tick() {
        TimeoutFuture::new(0).await;
    }

    #[wasm_bindgen_test]
    async fn list_is_in_the_button_before_the_open_notification() {
        let (tool, _host, button) = mounted_tool();
        let (event, calls) = recorder();

        tool.toggle(Some(event)).unwrap();

        assert!(tool.is_open());
        assert!(find(&button, ".selection-list").is_some());
        assert!(calls.borrow().is_empty());

        next_tick().await;
        assert_eq!(*calls.borrow(), [true]);

        tool.toggle(None).unwrap();

        assert!(!tool.is_open());
        assert!(find(&button, ".selection-list").is_none());
        assert_eq!(*calls.borrow(), [true, false]);
    }

    #[wasm_bindgen_test]
    async fn option_click_selects_and_closes() {
        let (tool, host, button) = mounted_tool();
        let (event, calls) = recorder();

        tool.toggle(Some(event)).unwrap();
        next_tick().await;

        find(&button, r#"[data-value="3"]"#).unwrap().click();

        assert_eq!(tool.selected_value().as_deref(), Some("3"));
        assert!(!tool.is_open());
        assert!(find(&button, ".selection-list").is_none());
        assert_eq!(*calls.borrow(), [true, false]);

        tool.surround(&document().create_range().unwrap()).unwrap();
        assert_eq!(
            *host.commands.borrow(),
            [("fontSize".to_string(), "3".to_string())]
        );

        tool.clear().unwrap();
        tool.surround(&document().create_range().unwrap()).unwrap();
        assert_eq!(host.commands.borrow().len(), 1);
    }

    #[wasm_bindgen_test]
    async fn list_background_click_keeps_the_selection() {
        let (tool, _host, button) = mounted_tool();
        let (event, calls) = recorder();

        tool.toggle(Some(event.clone())).unwrap();
        next_tick().await;
        find(&button, r#"[data-value="5"]"#).unwrap().click();

        tool.toggle(Some(event)).unwrap();
        next_tick().await;

        find(&button, ".selection-list-wrapper").unwrap().click();

        assert_eq!(tool.selected_value().as_deref(), Some("5"));
        assert!(!tool.is_open());
        assert!(find(&button, ".selection-list").is_none());
        assert_eq!(*calls.borrow(), [true, false, true, false]);
    }

    #[wasm_bindgen_test]
    async fn button_clicks_toggle_with_the_registered_observer() {
        let (tool, _host, button) = mounted_tool();
        let (event, calls) = recorder();

        tool.set_on_toggle(Some(event));

        button.click();
        assert!(tool.is_open());

        next_tick().await;
        assert_eq!(*calls.borrow(), [true]);

        button.click();
        assert!(!tool.is_open());
        assert_eq!(*calls.borrow(), [true, false]);

        tool.clear().unwrap();
        assert_eq!(*calls.borrow(), [true, false]);
    }

    #[wasm_bindgen_test]
    fn check_state_writes_the_normalized_label() {
        let (tool, host, button) = mounted_tool();
        let selection = select_text("Hello");
        let label = find(&button, ".selected-font-value").unwrap();

        *host.styles.borrow_mut() = vec!["16.5px".to_string(), "16.5px".to_string()];
        host.active.set(true);

        assert!(tool.check_state(&selection).unwrap());
        assert_eq!(label.text_content().as_deref(), Some("16"));
        assert_eq!(tool.label().text(), Some("16"));

        tool.toggle(Some(toggle_event(|_| {}))).unwrap();
        let active = find(&button, ".selection-list-option-active").unwrap();
        assert_eq!(active.get_attribute("data-value").as_deref(), Some("3"));
        tool.toggle(None).unwrap();

        *host.styles.borrow_mut() = vec!["13px".to_string(), "16px".to_string()];
        host.active.set(false);

        assert!(!tool.check_state(&selection).unwrap());
        assert_eq!(label.inner_html(), "&nbsp;&nbsp;");
        assert_eq!(tool.label(), Label::Empty);
    }

    #[wasm_bindgen_test]
    fn toggle_before_render_closes_again() {
        let host = Rc::new(RecordingHost::default());
        let tool = InlineTool::<FontSize>::with_host(ToolConfig::default(), host, document());
        let (event, calls) = recorder();

        assert!(tool.toggle(Some(event)).is_err());
        assert!(!tool.is_open());
        assert_eq!(*calls.borrow(), [false]);
    }
}
