//! Color expression parser.
//!
//! Accepted grammars, tried in order after trimming and lower-casing:
//! - named colors (`white`, `black`, `red`, ...), exact lookup only
//! - hex: `#rgb` or `#rrggbb`
//! - functional: `rgb(r, g, b)`, `rgba(r g b a)`; commas and whitespace both
//!   separate fields, and the optional alpha is validated then dropped

use crate::image_pipeline::color::types::{NAMED_COLORS, RgbColor};
use crate::image_pipeline::common::error::{EditError, Result};

/// Parses a color expression into an [`RgbColor`].
///
/// # Examples
///
/// ```
/// use keycrop_rs::image_pipeline::{parse_color, RgbColor};
///
/// assert_eq!(parse_color("WHITE").unwrap(), RgbColor::new(255, 255, 255));
/// assert_eq!(parse_color("#0f0").unwrap(), RgbColor::new(0, 255, 0));
/// assert_eq!(parse_color("rgb(10 20 30)").unwrap(), RgbColor::new(10, 20, 30));
/// ```
pub fn parse_color(input: &str) -> Result<RgbColor> {
    let normalized = input.trim().to_lowercase();

    if let Some(color) = lookup_named(&normalized) {
        return Ok(color);
    }

    if let Some(digits) = normalized.strip_prefix('#') {
        return parse_hex(digits);
    }

    if normalized.starts_with("rgb") {
        return parse_rgb_function(&normalized);
    }

    Err(EditError::InvalidColorFormat(format!(
        "unrecognized color '{}'",
        input.trim()
    )))
}

/// Returns whether `input` parses as a color. Never fails.
pub fn is_valid_color(input: &str) -> bool {
    parse_color(input).is_ok()
}

fn lookup_named(name: &str) -> Option<RgbColor> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, color)| *color)
}

fn parse_hex(digits: &str) -> Result<RgbColor> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EditError::InvalidColorFormat(format!(
            "invalid hex digits in '#{digits}'"
        )));
    }

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        len => {
            return Err(EditError::InvalidColorFormat(format!(
                "hex color '#{digits}' has {len} digits, expected 3 or 6"
            )));
        }
    };

    let channel = |range: std::ops::Range<usize>| -> Result<u8> {
        u8::from_str_radix(&expanded[range], 16).map_err(|e| {
            EditError::InvalidColorFormat(format!("invalid hex color '#{digits}': {e}"))
        })
    };

    Ok(RgbColor::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn parse_rgb_function(expr: &str) -> Result<RgbColor> {
    let body = expr
        .strip_prefix("rgba(")
        .or_else(|| expr.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| {
            EditError::InvalidColorFormat(format!("malformed color function '{expr}'"))
        })?;

    // `/` lets the space-separated form carry alpha as in `rgb(0 0 0 / 50%)`
    let tokens: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();

    match tokens.len() {
        0..=2 => {
            return Err(EditError::InvalidColorFormat(format!(
                "'{expr}' needs 3 color components, found {}",
                tokens.len()
            )));
        }
        3 | 4 => {}
        n => {
            return Err(EditError::InvalidColorFormat(format!(
                "'{expr}' has {n} components, expected at most 4"
            )));
        }
    }

    let r = parse_channel(tokens[0])?;
    let g = parse_channel(tokens[1])?;
    let b = parse_channel(tokens[2])?;

    if let Some(alpha) = tokens.get(3) {
        parse_alpha(alpha)?;
    }

    Ok(RgbColor::new(r, g, b))
}

fn parse_channel(token: &str) -> Result<u8> {
    let value: f64 = token
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| EditError::InvalidColorFormat(format!("invalid color value '{token}'")))?;

    let rounded = value.round();
    if !(0.0..=255.0).contains(&rounded) {
        return Err(EditError::InvalidColorFormat(format!(
            "color value {token} is out of range 0-255"
        )));
    }

    Ok(rounded as u8)
}

fn parse_alpha(token: &str) -> Result<()> {
    let numeric = token.strip_suffix('%').unwrap_or(token);
    match numeric.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(()),
        _ => Err(EditError::InvalidColorFormat(format!(
            "invalid alpha value '{token}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_are_case_insensitive() {
        let white = RgbColor::new(255, 255, 255);
        assert_eq!(parse_color("white").unwrap(), white);
        assert_eq!(parse_color("WHITE").unwrap(), white);
        assert_eq!(parse_color("  White ").unwrap(), white);
        assert_eq!(parse_color("black").unwrap(), RgbColor::new(0, 0, 0));
        assert_eq!(parse_color("red").unwrap(), RgbColor::new(255, 0, 0));
        assert_eq!(parse_color("green").unwrap(), RgbColor::new(0, 255, 0));
        assert_eq!(parse_color("blue").unwrap(), RgbColor::new(0, 0, 255));
    }

    #[test]
    fn test_named_lookup_is_exact() {
        assert!(parse_color("whit").is_err());
        assert!(parse_color("whitey").is_err());
        assert!(parse_color("light blue").is_err());
    }

    #[test]
    fn test_short_hex_doubles_digits() {
        assert_eq!(parse_color("#fff").unwrap(), RgbColor::new(255, 255, 255));
        assert_eq!(parse_color("#1a2").unwrap(), RgbColor::new(0x11, 0xaa, 0x22));
    }

    #[test]
    fn test_long_hex() {
        assert_eq!(parse_color("#00FF7f").unwrap(), RgbColor::new(0, 255, 127));
    }

    #[test]
    fn test_hex_rejects_other_lengths() {
        for input in ["#", "#f", "#ffff", "#fffff", "#fffffff", "#ffffffff"] {
            assert!(
                matches!(parse_color(input), Err(EditError::InvalidColorFormat(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_hex_rejects_non_hex_digits() {
        assert!(parse_color("#ggg").is_err());
        assert!(parse_color("#+12345").is_err());
    }

    #[test]
    fn test_rgb_with_commas() {
        assert_eq!(parse_color("rgb(255, 128, 0)").unwrap(), RgbColor::new(255, 128, 0));
    }

    #[test]
    fn test_rgb_with_whitespace() {
        assert_eq!(parse_color("rgb(255 128 0)").unwrap(), RgbColor::new(255, 128, 0));
        assert_eq!(parse_color("RGB(  1,2 ,  3 )").unwrap(), RgbColor::new(1, 2, 3));
    }

    #[test]
    fn test_rgb_rounds_fractional_values() {
        assert_eq!(parse_color("rgb(10.4, 10.5, 254.6)").unwrap(), RgbColor::new(10, 11, 255));
    }

    #[test]
    fn test_rgba_alpha_is_ignored() {
        let opaque = parse_color("rgb(12, 34, 56)").unwrap();
        assert_eq!(parse_color("rgba(12, 34, 56, 0)").unwrap(), opaque);
        assert_eq!(parse_color("rgba(12 34 56 0.25)").unwrap(), opaque);
        assert_eq!(parse_color("rgb(12 34 56 / 50%)").unwrap(), opaque);
    }

    #[test]
    fn test_rgba_rejects_non_numeric_alpha() {
        assert!(parse_color("rgba(12, 34, 56, half)").is_err());
    }

    #[test]
    fn test_rgb_requires_three_components() {
        assert!(parse_color("rgb(1, 2)").is_err());
        assert!(parse_color("rgb()").is_err());
        assert!(parse_color("rgb(1, 2, 3, 4, 5)").is_err());
    }

    #[test]
    fn test_rgb_requires_closing_paren() {
        assert!(parse_color("rgb(1, 2, 3").is_err());
        assert!(parse_color("rgb 1 2 3").is_err());
    }

    #[test]
    fn test_out_of_range_names_value() {
        let err = parse_color("rgb(300, 0, 0)").unwrap_err();
        assert!(err.to_string().contains("300"), "{err}");

        let err = parse_color("rgb(0, -5, 0)").unwrap_err();
        assert!(err.to_string().contains("-5"), "{err}");
    }

    #[test]
    fn test_non_numeric_component_names_value() {
        let err = parse_color("rgb(0, abc, 0)").unwrap_err();
        assert!(matches!(err, EditError::InvalidColorFormat(_)));
        assert!(err.to_string().contains("abc"), "{err}");
    }

    #[test]
    fn test_unknown_syntax() {
        assert!(parse_color("").is_err());
        assert!(parse_color("hsl(0, 100%, 50%)").is_err());
        assert!(parse_color("255,255,255").is_err());
    }

    #[test]
    fn test_is_valid_color() {
        assert!(is_valid_color("white"));
        assert!(is_valid_color("#abc"));
        assert!(is_valid_color("rgba(0 0 0 1)"));
        assert!(!is_valid_color("#abcd"));
        assert!(!is_valid_color("rgb(256, 0, 0)"));
        assert!(!is_valid_color("chartreuse-ish"));
    }
}
