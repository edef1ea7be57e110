use std::{borrow::Cow, fmt::Display};

use bitflags::bitflags;

mod font_family;
mod font_size;

pub use font_family::*;
pub use font_size::*;

use crate::sanitize::{FontAttributes, SanitizerConfig};

pub static BUTTON_CLASS: &str = "ce-inline-tool";
pub static BUTTON_MODIFIER_CLASS: &str = "ce-inline-tool--font";

/// One style dimension an inline tool can edit.
pub trait StyleComponent: 'static {
    const TITLE: &'static str;
    const FLAG: ComponentFlag;
    const IS_INLINE: bool = true;

    /// Name of the host formatting command.
    const COMMAND: &'static str;
    /// Computed style property read from the selection.
    const STYLE_PROPERTY: &'static str;

    /// What the user picked from the option list, before it is committed.
    type Value: Clone + PartialEq + Display + 'static;

    fn options() -> Vec<StyleOption<Self::Value>>;

    /// Parses the value attribute of a clicked option. Empty or unknown values give `None`.
    fn parse_value(raw: &str) -> Option<Self::Value>;

    /// Turns a computed style value into the text displayed in the button.
    fn normalize(computed: &str) -> String;

    /// Extra inline style for an option element.
    fn option_style(_option: &StyleOption<Self::Value>) -> Option<String> {
        None
    }

    fn sanitize() -> SanitizerConfig {
        SanitizerConfig::new(FontAttributes::all())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleOption<V> {
    pub label: Cow<'static, str>,
    pub value: V,
}

bitflags! {
    pub struct ComponentFlag: u32 {
        const FONT_SIZE = 0b0000_0001;
        const FONT_FAMILY = 0b0000_0010;
    }
}

impl ComponentFlag {
    pub fn into_class_names(self) -> String {
        let mut classes = vec![BUTTON_CLASS, BUTTON_MODIFIER_CLASS];

        if self.contains(Self::FONT_SIZE) {
            classes.push("ce-font-size-tool");
        }

        if self.contains(Self::FONT_FAMILY) {
            classes.push("ce-font-family-tool");
        }

        classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names() {
        assert_eq!(
            ComponentFlag::FONT_SIZE.into_class_names(),
            "ce-inline-tool ce-inline-tool--font ce-font-size-tool"
        );
        assert_eq!(
            ComponentFlag::FONT_FAMILY.into_class_names(),
            "ce-inline-tool ce-inline-tool--font ce-font-family-tool"
        );
    }

    #[test]
    fn both_tools_allow_size_and_face() {
        let expected = SanitizerConfig::new(FontAttributes::SIZE | FontAttributes::FACE);

        assert_eq!(FontSize::sanitize(), expected);
        assert_eq!(FontFamily::sanitize(), expected);
    }
}
