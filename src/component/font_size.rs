use std::{borrow::Cow, fmt};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::ComponentFlag;

use super::{StyleComponent, StyleOption};

pub struct FontSize;

impl StyleComponent for FontSize {
    const TITLE: &'static str = "Font Size";
    const FLAG: ComponentFlag = ComponentFlag::FONT_SIZE;

    const COMMAND: &'static str = "fontSize";
    const STYLE_PROPERTY: &'static str = "font-size";

    type Value = FontSizeStep;

    fn options() -> Vec<StyleOption<Self::Value>> {
        FontSizeStep::ALL
            .iter()
            .map(|&step| StyleOption {
                label: Cow::Borrowed(step.label()),
                value: step,
            })
            .collect()
    }

    fn parse_value(raw: &str) -> Option<Self::Value> {
        let value = raw.trim().parse::<u8>().ok()?;

        FontSizeStep::try_from_primitive(value).ok()
    }

    fn normalize(computed: &str) -> String {
        normalize_font_size(computed).to_string()
    }
}

/// The seven `<font size>` steps understood by the `fontSize` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum FontSizeStep {
    XSmall = 1,
    Small,
    Medium,
    Large,
    XLarge,
    XxLarge,
    XxxLarge,
}

impl FontSizeStep {
    pub const ALL: [Self; 7] = [
        Self::XSmall,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::XLarge,
        Self::XxLarge,
        Self::XxxLarge,
    ];

    /// Pixel size the step renders at.
    pub fn label(self) -> &'static str {
        match self {
            Self::XSmall => "10",
            Self::Small => "13",
            Self::Medium => "16",
            Self::Large => "18",
            Self::XLarge => "24",
            Self::XxLarge => "32",
            Self::XxxLarge => "48",
        }
    }
}

impl fmt::Display for FontSizeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// `"16px"` -> `"16"`, `"16.5px"` -> `"16"`.
///
/// Everything from the first `p` is the unit. The remaining number is cut at the decimal point.
pub fn normalize_font_size(computed: &str) -> &str {
    let number = match computed.find('p') {
        Some(unit) => &computed[..unit],
        None => computed,
    };

    match number.find('.') {
        Some(dot) => &number[..dot],
        None => number,
    }
}
