//! Configuration enum types.

use crate::draw::{Color, color::RED};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a named color or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// color = "crimson"
///
/// # Custom RGB color (0-255 per component)
/// color = [255, 102, 178]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color: red, green, blue, yellow, orange, pink, white, black,
    /// crimson, rose, charcoal
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to an opaque [`Color`].
    ///
    /// Unknown color names fall back to red with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::CRIMSON;

    #[test]
    fn named_and_rgb_colors_resolve() {
        assert_eq!(ColorSpec::Name("Crimson".into()).to_color(), CRIMSON);
        assert_eq!(ColorSpec::Rgb([255, 0, 0]).to_color(), RED);
        assert_eq!(ColorSpec::Name("nope".into()).to_color(), RED);
    }

    #[test]
    fn untagged_toml_forms_parse() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: ColorSpec,
        }
        let named: Wrapper = toml::from_str(r#"color = "rose""#).unwrap();
        assert_eq!(named.color, ColorSpec::Name("rose".into()));
        let rgb: Wrapper = toml::from_str("color = [20, 20, 20]").unwrap();
        assert_eq!(rgb.color, ColorSpec::Rgb([20, 20, 20]));
    }
}
