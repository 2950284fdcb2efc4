use palette::{Srgb, Srgba, WithAlpha};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

const GUIDE_ALPHA: f64 = 0.3;
const BACKGROUND_ALPHA: f64 = 0.2;
const BACKGROUND_HOVER_ALPHA: f64 = 0.3;

struct Swatch {
    guide: [Srgb<u8>; 2],
    /// The 500 shade behind the item.
    shade: Srgb<u8>,
    icon: [Srgb<u8>; 2],
}

/// Colour token attached to a navigation item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Cyan,
    Violet,
    Rose,
    Amber,
}

impl ColorTheme {
    /// Theme for the n-th item when none is configured.
    pub fn cycle(index: usize) -> Self {
        let themes: Vec<Self> = Self::iter().collect();
        themes[index % themes.len()]
    }

    fn swatch(&self) -> Swatch {
        match self {
            Self::Cyan => Swatch {
                guide: [Srgb::new(0x22, 0xd3, 0xee), Srgb::new(0x0e, 0xa5, 0xe9)],
                shade: Srgb::new(0x06, 0xb6, 0xd4),
                icon: [Srgb::new(0x3b, 0x82, 0xf6), Srgb::new(0x25, 0x63, 0xeb)],
            },
            Self::Violet => Swatch {
                guide: [Srgb::new(0xa7, 0x8b, 0xfa), Srgb::new(0x8b, 0x5c, 0xf6)],
                shade: Srgb::new(0x8b, 0x5c, 0xf6),
                icon: [Srgb::new(0xa1, 0xa1, 0xaa), Srgb::new(0x52, 0x52, 0x5b)],
            },
            Self::Rose => Swatch {
                guide: [Srgb::new(0xfb, 0x71, 0x85), Srgb::new(0xe1, 0x1d, 0x48)],
                shade: Srgb::new(0xf4, 0x3f, 0x5e),
                icon: [Srgb::new(0xec, 0x48, 0x99), Srgb::new(0xdb, 0x27, 0x77)],
            },
            Self::Amber => Swatch {
                guide: [Srgb::new(0xfc, 0xd3, 0x4d), Srgb::new(0xf5, 0x9e, 0x0b)],
                shade: Srgb::new(0xf5, 0x9e, 0x0b),
                icon: [Srgb::new(0xf9, 0x73, 0x16), Srgb::new(0xea, 0x58, 0x0c)],
            },
        }
    }

    /// Two stops of the orbit guide's linear gradient.
    pub fn guide_gradient(&self) -> [Srgba<f64>; 2] {
        self.swatch()
            .guide
            .map(|stop| stop.into_format::<f64>().with_alpha(GUIDE_ALPHA))
    }

    /// Left-to-right fill of the item's glyph. Only a hovered item gets the
    /// gradient; otherwise the glyph uses the plain label colour.
    pub fn icon_fill(&self, hovered: bool) -> [Srgba<f64>; 2] {
        if !hovered {
            let plain = OverlayColors::default().label_text;
            return [plain, plain];
        }
        self.swatch().icon.map(|stop| stop.into_format::<f64>().with_alpha(1.0))
    }

    pub fn background(&self, hovered: bool) -> Srgba<f64> {
        let shade = self.swatch().shade;
        let alpha = if hovered {
            BACKGROUND_HOVER_ALPHA
        } else {
            BACKGROUND_ALPHA
        };
        shade.into_format::<f64>().with_alpha(alpha)
    }
}

/// Fixed colours of the overlay chrome.
pub struct OverlayColors {
    pub backdrop: Srgba<f64>,
    pub center_circle: Srgba<f64>,
    pub center_border: Srgba<f64>,
    pub compass: Srgba<f64>,
    pub label_background: Srgba<f64>,
    pub label_text: Srgba<f64>,
}

impl Default for OverlayColors {
    fn default() -> Self {
        Self {
            backdrop: Srgba::new(0.0, 0.0, 0.0, 0.8),
            center_circle: Srgba::new(0.0, 0.0, 0.0, 0.8),
            center_border: Srgba::new(1.0, 1.0, 1.0, 0.3),
            compass: Srgba::new(0.753, 0.518, 0.988, 1.0),
            label_background: Srgba::new(0.0, 0.0, 0.0, 0.8),
            label_text: Srgba::new(1.0, 1.0, 1.0, 0.9),
        }
    }
}

/// `#rrggbbaa` form used in serialized frames.
pub fn to_hex(color: Srgba<f64>) -> String {
    let rgb: Srgb<u8> = color.color.into_format();
    let alpha = (color.alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}{:02x}",
        rgb.red, rgb.green, rgb.blue, alpha
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_deserialization() {
        let cases = vec![
            ("\"cyan\"", ColorTheme::Cyan),
            ("\"Violet\"", ColorTheme::Violet),
            ("\"ROSE\"", ColorTheme::Rose),
            ("\"amber\"", ColorTheme::Amber),
        ];

        for (json, expected) in cases {
            let deserialized: ColorTheme = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<ColorTheme>("\"teal\"").is_err());
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&ColorTheme::Rose).unwrap(), "\"rose\"");
        assert_eq!(ColorTheme::Amber.to_string(), "amber");
    }

    #[test]
    fn test_cycle_wraps_around() {
        assert_eq!(ColorTheme::cycle(0), ColorTheme::Cyan);
        assert_eq!(ColorTheme::cycle(3), ColorTheme::Amber);
        assert_eq!(ColorTheme::cycle(5), ColorTheme::Violet);
    }

    #[test]
    fn test_hex_output() {
        let [start, end] = ColorTheme::Cyan.guide_gradient();
        assert_eq!(to_hex(start), "#22d3ee4d");
        assert_eq!(to_hex(end), "#0ea5e94d");
        assert_eq!(to_hex(ColorTheme::Violet.background(true)), "#8b5cf64d");
        assert_eq!(to_hex(ColorTheme::Violet.background(false)), "#8b5cf633");
    }

    #[test]
    fn test_icon_fill_only_on_hover() {
        let [start, end] = ColorTheme::Cyan.icon_fill(true);
        assert_eq!(to_hex(start), "#3b82f6ff");
        assert_eq!(to_hex(end), "#2563ebff");
        assert_eq!(
            ColorTheme::Rose.icon_fill(true).map(to_hex),
            ["#ec4899ff".to_string(), "#db2777ff".to_string()]
        );

        let [plain, same] = ColorTheme::Amber.icon_fill(false);
        assert_eq!(plain, same);
        assert_eq!(plain, OverlayColors::default().label_text);
    }
}
