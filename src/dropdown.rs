//! DOM-free state of a single inline tool.
//!
//! [`Dropdown`] decides what happens on each interaction and hands back a [`Toggle`]
//! which the DOM layer carries out. Host callbacks are returned, never invoked here,
//! so the caller can release its borrows first.

use std::{borrow::Cow, cell::RefCell, marker::PhantomData, mem, rc::Rc};

use crate::{component::StyleComponent, host::EditorHost, Result};

pub type ToggleEvent = Rc<RefCell<dyn FnMut(bool)>>;

pub fn toggle_event(func: impl FnMut(bool) + 'static) -> ToggleEvent {
    Rc::new(RefCell::new(func))
}

/// Calls `event` with the new open state. A callback which toggles its own tool again is not re-entered.
pub fn notify(event: Option<ToggleEvent>, opened: bool) {
    let Some(event) = event else {
        return;
    };

    match event.try_borrow_mut() {
        Ok(mut func) => (&mut *func)(opened),
        Err(_) => log::warn!("Toggle callback is already running. Dropping {opened} notification"),
    };
}

/// Single subscriber slot for open/close notifications.
///
/// Subscribing replaces whoever was there before. Earlier subscribers are never notified.
#[derive(Default)]
pub struct Handshake {
    slot: Option<ToggleEvent>,
}

impl Handshake {
    pub fn subscribe(&mut self, event: ToggleEvent) {
        if self.slot.replace(event).is_some() {
            log::debug!("Replacing toggle subscriber");
        }
    }

    pub fn current(&self) -> Option<ToggleEvent> {
        self.slot.clone()
    }

    pub fn take(&mut self) -> Option<ToggleEvent> {
        self.slot.take()
    }
}

/// What the button currently displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Mixed or unknown selection.
    Empty,
    Value(String),
}

impl Label {
    pub fn matches(&self, text: &str) -> bool {
        matches!(self, Self::Value(value) if value == text)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Value(value) => Some(value.as_str()),
        }
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::Empty
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry<V> {
    pub label: Cow<'static, str>,
    pub value: V,
    pub active: bool,
    pub style: Option<String>,
}

pub enum Toggle<V> {
    /// Build and insert these options, then announce the opening once they are in place.
    Open(Vec<OptionEntry<V>>),
    /// Remove the option list (if any) and pass `false` to `notify` before returning.
    Close {
        was_open: bool,
        notify: Option<ToggleEvent>,
    },
}

/// A formatting command waiting to be issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub command: &'static str,
    pub value: String,
}

impl PendingCommand {
    pub fn apply<H: EditorHost + ?Sized>(&self, host: &H) -> Result<bool> {
        log::debug!("{} -> {}", self.command, self.value);

        host.exec_command(self.command, &self.value)
    }
}

pub struct Dropdown<C: StyleComponent> {
    is_open: bool,
    selected: Option<C::Value>,
    label: Label,
    handshake: Handshake,

    _component: PhantomData<C>,
}

impl<C: StyleComponent> Dropdown<C> {
    pub fn new() -> Self {
        Self {
            is_open: false,
            selected: None,
            label: Label::Empty,
            handshake: Handshake::default(),
            _component: PhantomData,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn selected(&self) -> Option<&C::Value> {
        self.selected.as_ref()
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Opens only when closed and given a callback. Everything else closes.
    ///
    /// Closing hands the stored callback out for a `false` notification and empties the slot,
    /// so closing twice notifies once. A new callback passed while open is kept for the next cycle;
    /// the one just notified is not stored again.
    pub fn toggle(&mut self, on_toggled: Option<ToggleEvent>) -> Toggle<C::Value> {
        match on_toggled {
            Some(event) if !self.is_open => {
                log::debug!("{} - Open", C::TITLE);

                self.is_open = true;
                self.handshake.subscribe(event);

                Toggle::Open(self.option_list())
            }

            event => {
                let was_open = mem::take(&mut self.is_open);
                let notify = self.handshake.take();

                if was_open {
                    log::debug!("{} - Close", C::TITLE);
                }

                if let Some(event) = event {
                    let notified = notify.as_ref().map_or(false, |v| Rc::ptr_eq(v, &event));

                    if !notified {
                        self.handshake.subscribe(event);
                    }
                }

                Toggle::Close { was_open, notify }
            }
        }
    }

    /// Subscriber for the deferred "opened" notification. `None` if the list was closed in the meantime.
    pub fn opened_event(&self) -> Option<ToggleEvent> {
        if self.is_open {
            self.handshake.current()
        } else {
            None
        }
    }

    /// Options are active when they match the displayed label or the pending selection.
    pub fn option_list(&self) -> Vec<OptionEntry<C::Value>> {
        C::options()
            .into_iter()
            .map(|option| {
                let active = self.label.matches(&option.label)
                    || self.selected.as_ref() == Some(&option.value);

                OptionEntry {
                    style: C::option_style(&option),
                    label: option.label,
                    value: option.value,
                    active,
                }
            })
            .collect()
    }

    /// An option was clicked. Clicks without a usable value keep the previous selection. Always closes.
    pub fn select(&mut self, raw: &str) -> Toggle<C::Value> {
        match C::parse_value(raw) {
            Some(value) => {
                log::debug!("{} - Selected {value}", C::TITLE);
                self.selected = Some(value);
            }

            None => log::debug!("{} - Click outside of an option", C::TITLE),
        }

        self.toggle(None)
    }

    /// Updates the label from the computed style at both ends of the selection.
    pub fn sync(&mut self, anchor: Option<&str>, focus: Option<&str>) -> &Label {
        self.label = match (anchor, focus) {
            (Some(anchor), Some(focus)) if anchor == focus => Label::Value(C::normalize(anchor)),
            _ => Label::Empty,
        };

        &self.label
    }

    pub fn pending_command(&self) -> Option<PendingCommand> {
        self.selected.as_ref().map(|value| PendingCommand {
            command: C::COMMAND,
            value: value.to_string(),
        })
    }

    /// Closes and forgets the pending selection.
    pub fn clear(&mut self) -> Toggle<C::Value> {
        let toggle = self.toggle(None);

        self.selected = None;

        toggle
    }
}

impl<C: StyleComponent> Default for Dropdown<C> {
    fn default() -> Self {
        Self::new()
    }
}
