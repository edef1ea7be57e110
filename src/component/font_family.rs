use std::borrow::Cow;

use crate::ComponentFlag;

use super::{StyleComponent, StyleOption};

pub static FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Arial Black",
    "Arial Narrow",
    "Arial Rounded MT Bold",
    "Avant Garde",
    "Baskerville",
    "Bodoni MT",
    "Book Antiqua",
    "Big Caslon",
    "Calibri",
    "Calisto MT",
    "Cambria",
    "Candara",
    "Century Gothic",
    "Charcoal",
    "Copperplate",
    "Comic Sans MS",
    "Courier New",
    "Didot",
    "Franklin Gothic Medium",
    "Futura",
    "Geneva",
    "Gill Sans",
    "Garamond",
    "Georgia",
    "Goudy Old Style",
    "Hoefler Text",
    "Helvetica",
    "Helvetica Neue",
    "Impact",
    "Lucida Sans Unicode",
    "Lato",
    "Lucida Grande",
    "Lucida Bright",
    "Monaco",
    "Optima",
    "Papyrus",
    "PT Mono",
    "Palatino",
    "Perpetua",
    "Rockwell",
    "Roboto",
    "Rockwell Extra Bold",
    "Segoe UI",
    "Tahoma",
    "Times New Roman",
    "Trebuchet MS",
    "Verdana",
];

pub struct FontFamily;

impl StyleComponent for FontFamily {
    const TITLE: &'static str = "Font Family";
    const FLAG: ComponentFlag = ComponentFlag::FONT_FAMILY;

    const COMMAND: &'static str = "fontName";
    const STYLE_PROPERTY: &'static str = "font-family";

    type Value = String;

    fn options() -> Vec<StyleOption<Self::Value>> {
        FONT_FAMILIES
            .iter()
            .map(|&name| StyleOption {
                label: Cow::Borrowed(name),
                value: name.to_string(),
            })
            .collect()
    }

    fn parse_value(raw: &str) -> Option<Self::Value> {
        let raw = raw.trim();

        if raw.is_empty() {
            None
        } else {
            Some(raw.to_string())
        }
    }

    fn normalize(computed: &str) -> String {
        normalize_font_family(computed).to_string()
    }

    fn option_style(option: &StyleOption<Self::Value>) -> Option<String> {
        Some(format!("font-family:{}", option.value))
    }
}

/// Picks the family name to display out of a computed `font-family` value.
///
/// Branches are checked in order and only one applies:
/// - `"Arial"` starts quoted: the text up to the closing quote.
/// - `-apple-system, "Helvetica Neue", sans-serif` starts with a vendor generic: the first quoted name.
/// - `Georgia, serif` is a plain stack: everything before the first comma.
pub fn normalize_font_family(computed: &str) -> &str {
    if let Some(quoted) = computed.strip_prefix('"') {
        match quoted.find('"') {
            Some(end) => &quoted[..end],
            None => quoted,
        }
    } else if computed.starts_with('-') {
        match first_quoted(computed) {
            Some(name) => name,
            None => before_comma(computed),
        }
    } else {
        before_comma(computed)
    }
}

fn first_quoted(value: &str) -> Option<&str> {
    let start = value.find('"')? + 1;
    let len = value[start..].find('"')?;

    Some(&value[start..start + len])
}

fn before_comma(value: &str) -> &str {
    match value.find(',') {
        Some(comma) => &value[..comma],
        None => value,
    }
}
