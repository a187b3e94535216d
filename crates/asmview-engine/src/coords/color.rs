use std::str::FromStr;

use image::Rgb;

/// 8-bit RGB color used for overlays and plots.
///
/// Channels are stored in RGB order, so `RED` really is red in the output image.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 160, 0);
    pub const BLUE: Color = Color::new(31, 119, 180);
    pub const GRAY: Color = Color::new(160, 160, 160);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    /// A small repeating palette for multi-series plots.
    pub fn cycle(index: usize) -> Self {
        const PALETTE: [Color; 6] = [
            Color::BLUE,
            Color::new(255, 127, 14),
            Color::new(44, 160, 44),
            Color::new(148, 103, 189),
            Color::new(140, 86, 75),
            Color::new(227, 119, 194),
        ];
        PALETTE[index % PALETTE.len()]
    }
}

impl From<Color> for Rgb<u8> {
    #[inline]
    fn from(c: Color) -> Self {
        c.to_rgb()
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color {0:?}: expected #rrggbb")]
pub struct ParseColorError(String);

/// Parses `#rrggbb` (the leading `#` is optional) or one of a few names.
impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "white" => return Ok(Color::WHITE),
            "black" => return Ok(Color::BLACK),
            "red" => return Ok(Color::RED),
            "green" => return Ok(Color::GREEN),
            "blue" => return Ok(Color::BLUE),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex() {
        assert_eq!("#ff0000".parse::<Color>(), Ok(Color::RED));
        assert_eq!("00ff7f".parse::<Color>(), Ok(Color::new(0, 255, 127)));
        assert_eq!(" White ".parse::<Color>(), Ok(Color::WHITE));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("#ff00".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
        assert!("#ff00é0".parse::<Color>().is_err());
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "mauve".parse::<Color>().unwrap_err();
        assert_eq!(err.to_string(), r#"invalid color "mauve": expected #rrggbb"#);
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn rgb_order_is_preserved() {
        assert_eq!(Color::RED.to_rgb(), Rgb([255, 0, 0]));
    }
}
