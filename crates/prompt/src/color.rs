//! Color readability helpers for the change report.
//!
//! Resolved values quote colors in functional notation (`rgb(255, 0, 0)`),
//! which reads poorly in a diff. Occurrences are rewritten to hex, and a
//! translucent color carries its opacity as a percentage note.

use csscolorparser::Color;

/// Parse a CSS `<color>` into 8-bit RGBA channels.
///
/// Supports named colors, hex forms, and functional notations like
/// `rgb()/rgba()`.
pub type Rgba8Tuple = (u8, u8, u8, u8);
#[inline]
pub fn parse_css_color(input: &str) -> Option<Rgba8Tuple> {
    let parsed: Color = input.parse().ok()?;
    let channels = parsed.to_rgba8();
    Some((channels[0], channels[1], channels[2], channels[3]))
}

/// Lowercase `#rrggbb` for three 8-bit channels.
#[inline]
pub fn to_hex(red: u8, green: u8, blue: u8) -> String {
    format!("#{red:02x}{green:02x}{blue:02x}")
}

/// Rewrite one functional color to hex, annotating sub-1 alpha with an
/// opacity percentage. Unparseable input passes through untouched.
fn hex_or_original(functional: &str) -> String {
    let Some((red, green, blue, alpha)) = parse_css_color(functional) else {
        return functional.to_owned();
    };
    let hex = to_hex(red, green, blue);
    if alpha < u8::MAX {
        let percent = (f32::from(alpha) / 255.0 * 100.0).round() as i64;
        format!("{hex} (opacity {percent}%)")
    } else {
        hex
    }
}

/// Clean up a resolved value for the report: every `rgb()`/`rgba()`
/// occurrence becomes hex. Common keywords pass through as-is.
pub fn humanize_value(value: &str) -> String {
    if matches!(value, "" | "none" | "normal" | "auto") {
        return value.to_owned();
    }
    let mut result = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("rgb") {
        let after_keyword = &rest[start + 3..];
        let open_len = if after_keyword.starts_with('(') {
            4
        } else if after_keyword.starts_with("a(") {
            5
        } else {
            // "rgb" as part of some other token; copy it and move on.
            result.push_str(&rest[..start + 3]);
            rest = &rest[start + 3..];
            continue;
        };
        let Some(close_offset) = rest[start + open_len..].find(')') else {
            break;
        };
        let end = start + open_len + close_offset + 1;
        result.push_str(&rest[..start]);
        result.push_str(&hex_or_original(&rest[start..end]));
        rest = &rest[end..];
    }
    result.push_str(rest);
    result
}
