use crate::{Error, Result};
use image::Rgba;

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
];

/// Parse `#RGB`, `#RRGGBB` (the `#` is optional) or a basic colour name into
/// an opaque RGBA value.
pub fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    if let Some((_, [r, g, b])) = NAMED_COLORS.iter().find(|(name, _)| *name == lower) {
        return Ok(Rgba([*r, *g, *b, 255]));
    }

    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid(value));
    }

    let [r, g, b] = match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16).ok_or_else(|| invalid(value))? as u8;
                rgb[i] = v * 17;
            }
            rgb
        }
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid(value));
            [channel(0)?, channel(2)?, channel(4)?]
        }
        _ => return Err(invalid(value)),
    };

    Ok(Rgba([r, g, b, 255]))
}

fn invalid(value: &str) -> Error {
    Error::InvalidParameter(format!("`{value}` is not a colour (expected #RGB, #RRGGBB or a colour name)"))
}
