/// Fill colors: numeric RGBA values, display colors and color string parsing
use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0},
    combinator::all_consuming,
    multi::separated_list1,
    number::complete::float,
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::{Error, Result};

/// Numeric RGBA fill, channels nominally 0-255
///
/// Channels are left unclamped so lighting can push them out of range.
/// An alpha of `None` (or NaN) means fully opaque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: Option<f32>,
}

impl Fill {
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, alpha: None }
    }

    pub fn rgba(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        Self {
            r,
            g,
            b,
            alpha: Some(alpha),
        }
    }

    /// Build from 3 or 4 channels
    pub fn from_channels(channels: &[f32]) -> Option<Self> {
        match *channels {
            [r, g, b] => Some(Self::rgb(r, g, b)),
            [r, g, b, a] => Some(Self::rgba(r, g, b, a)),
            _ => None,
        }
    }

    /// Multiply the color channels by `factor`; alpha is passed through
    pub fn scale(&self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            alpha: self.alpha,
        }
    }

    /// Alpha with the opaque default applied
    pub fn opacity(&self) -> f32 {
        match self.alpha {
            Some(a) if !a.is_nan() => a,
            _ => 1.0,
        }
    }

    /// Resolve into a displayable color, clamping channels the way a CSS
    /// `rgb()` consumer does
    pub fn resolve(&self) -> Color {
        let channel = |c: f32| if c.is_nan() { 0 } else { c.round().clamp(0.0, 255.0) as u8 };
        Color {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: self.opacity().clamp(0.0, 1.0),
        }
    }
}

/// A resolved color ready for a rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    /// Perceived brightness in [0, 1] (Rec. 601 weights)
    pub fn luminance(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// CSS named colors
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("aqua", [0, 255, 255]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("brown", [165, 42, 42]),
    ("coral", [255, 127, 80]),
    ("crimson", [220, 20, 60]),
    ("cyan", [0, 255, 255]),
    ("darkblue", [0, 0, 139]),
    ("darkgray", [169, 169, 169]),
    ("darkgreen", [0, 100, 0]),
    ("darkgrey", [169, 169, 169]),
    ("darkred", [139, 0, 0]),
    ("deeppink", [255, 20, 147]),
    ("fuchsia", [255, 0, 255]),
    ("gold", [255, 215, 0]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("grey", [128, 128, 128]),
    ("hotpink", [255, 105, 180]),
    ("indigo", [75, 0, 130]),
    ("ivory", [255, 255, 240]),
    ("khaki", [240, 230, 140]),
    ("lavender", [230, 230, 250]),
    ("lightblue", [173, 216, 230]),
    ("lightgray", [211, 211, 211]),
    ("lightgreen", [144, 238, 144]),
    ("lightgrey", [211, 211, 211]),
    ("lime", [0, 255, 0]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("orange", [255, 165, 0]),
    ("orchid", [218, 112, 214]),
    ("pink", [255, 192, 203]),
    ("plum", [221, 160, 221]),
    ("purple", [128, 0, 128]),
    ("red", [255, 0, 0]),
    ("salmon", [250, 128, 114]),
    ("silver", [192, 192, 192]),
    ("skyblue", [135, 206, 235]),
    ("tan", [210, 180, 140]),
    ("teal", [0, 128, 128]),
    ("tomato", [255, 99, 71]),
    ("turquoise", [64, 224, 208]),
    ("violet", [238, 130, 238]),
    ("white", [255, 255, 255]),
    ("yellow", [255, 255, 0]),
];

fn named_color(name: &str) -> Option<Fill> {
    if name.eq_ignore_ascii_case("transparent") {
        return Some(Fill::rgba(0.0, 0.0, 0.0, 0.0));
    }
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, [r, g, b])| Fill::rgb(*r as f32, *g as f32, *b as f32))
}

/// Parse a color string: a CSS color name, `#rgb`, `#rgba`, `#rrggbb`,
/// `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`
pub fn parse_color(input: &str) -> Result<Fill> {
    let trimmed = input.trim();
    if let Some(fill) = named_color(trimmed) {
        return Ok(fill);
    }

    match all_consuming(delimited(multispace0, alt((hex_color, functional_color)), multispace0))(trimmed) {
        Ok((_, fill)) => Ok(fill),
        Err(_) => Err(Error::InvalidColor(input.to_string())),
    }
}

fn hex_color(input: &str) -> IResult<&str, Fill> {
    let (rest, digits) = preceded(char('#'), take_while1(|c: char| c.is_ascii_hexdigit()))(input)?;
    match expand_hex(digits) {
        Some(fill) => Ok((rest, fill)),
        None => Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Verify))),
    }
}

fn expand_hex(digits: &str) -> Option<Fill> {
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    let channels: Vec<u8> = match digits.len() {
        3 | 4 => (0..digits.len()).map(nibble).collect::<Option<Vec<u8>>>()?,
        6 | 8 => (0..digits.len()).step_by(2).map(byte).collect::<Option<Vec<u8>>>()?,
        _ => return None,
    };

    let r = channels[0] as f32;
    let g = channels[1] as f32;
    let b = channels[2] as f32;
    Some(match channels.get(3) {
        Some(a) => Fill::rgba(r, g, b, *a as f32 / 255.0),
        None => Fill::rgb(r, g, b),
    })
}

fn functional_color(input: &str) -> IResult<&str, Fill> {
    let (input, _) = alt((tag_no_case("rgba"), tag_no_case("rgb")))(input)?;
    let (input, _) = preceded(multispace0, char('('))(input)?;
    let (input, channels) = separated_list1(
        preceded(multispace0, char(',')),
        preceded(multispace0, float),
    )(input)?;
    let (rest, _) = preceded(multispace0, char(')'))(input)?;

    if !channels.iter().all(|c| c.is_finite()) {
        return Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Float)));
    }
    match Fill::from_channels(&channels) {
        Some(fill) => Ok((rest, fill)),
        None => Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Count))),
    }
}
