//! Visual style vocabulary for connections: colors, dash styles and style bits

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Raw connection style bitmask.
    ///
    /// Unknown bits are retained so that callers can carry their own flags
    /// through `set_connection_style` untouched.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ConnectionStyle: u32 {
        /// The edge has a direction; bidirectional is the unmarked default
        const DIRECTED = 1 << 1;
        const DASH = 1 << 2;
        const DOT = 1 << 3;
        const DASH_DOT = 1 << 4;
        /// Curve depth is only meaningful when this bit is set
        const CURVED = 1 << 5;
    }
}

impl ConnectionStyle {
    /// Solid, undirected, straight
    pub const SOLID: ConnectionStyle = ConnectionStyle::empty();

    pub fn is_directed(&self) -> bool {
        self.contains(ConnectionStyle::DIRECTED)
    }

    /// Dash style requested by the style bits, if any
    pub fn line_style(&self) -> Option<LineStyle> {
        if self.contains(ConnectionStyle::DASH_DOT) {
            Some(LineStyle::DashDot)
        } else if self.contains(ConnectionStyle::DASH) {
            Some(LineStyle::Dash)
        } else if self.contains(ConnectionStyle::DOT) {
            Some(LineStyle::Dot)
        } else {
            None
        }
    }
}

/// Stroke pattern of a connection line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl LineStyle {
    /// SVG `stroke-dasharray` value for this pattern
    pub fn dash_array(&self) -> Option<&'static str> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dash => Some("8,4"),
            LineStyle::Dot => Some("2,2"),
            LineStyle::DashDot => Some("8,4,2,4"),
            LineStyle::DashDotDot => Some("8,4,2,4,2,4"),
        }
    }
}

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);
    pub const DARK_BLUE: Color = Color::rgb(1, 70, 122);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        match digits.len() {
            6 => {
                let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
                let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
                let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            3 => {
                let expand = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
