//! Value parsing for the editor widgets.
//!
//! The widgets themselves are controlled inputs owned by the panel UI;
//! these helpers are the behavior they share: splitting `12.5px` into
//! number and unit, deciding whether typed text is a bare number (the gate
//! for unit auto-completion), and the unit lists each field offers.
//! Nothing here validates CSS; malformed values flow through verbatim.

/// Units the dimension fields cycle through.
pub const CSS_UNITS: [&str; 10] = [
    "px",
    "em",
    "rem",
    "%",
    "vw",
    "vh",
    "auto",
    "fit-content",
    "max-content",
    "min-content",
];

/// Units for typographic fields like line-height.
pub const TYPO_UNITS: [&str; 5] = ["px", "em", "rem", "%", "normal"];

/// Units for font-size fields.
pub const FONT_SIZE_UNITS: [&str; 6] = ["px", "em", "rem", "%", "vw", "vh"];

/// Unit suffixes recognized when splitting a value.
const LENGTH_UNITS: [&str; 12] = [
    "rem", "vmin", "vmax", "px", "em", "%", "vw", "vh", "ch", "pt", "cm", "mm",
];

/// Keyword "units": whole-value keywords that carry no number.
pub fn is_keyword_unit(token: &str) -> bool {
    matches!(
        token,
        "auto" | "fit-content" | "max-content" | "min-content" | "normal" | "inherit" | "initial"
            | "unset" | "none"
    )
}

/// A value split into numeric part and unit. `number` is `None` when the
/// value is not `<number><unit>` shaped (keywords, multi-part values).
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedValue {
    pub number: Option<f32>,
    pub unit: String,
    pub raw: String,
}

/// Split `12.5px` into number and unit. The unit may be absent; anything
/// else (keywords, lists, functions) parses as no-number.
pub fn parse_value(raw: &str) -> ParsedValue {
    let trimmed = raw.trim();
    let (number_part, unit) = match LENGTH_UNITS
        .iter()
        .find(|unit| trimmed.ends_with(**unit))
    {
        Some(unit) => (
            trimmed[..trimmed.len() - unit.len()].trim_end(),
            (*unit).to_owned(),
        ),
        None => (trimmed, String::new()),
    };
    match number_part.parse::<f32>() {
        Ok(number) => ParsedValue {
            number: Some(number),
            unit,
            raw: raw.to_owned(),
        },
        Err(_) => ParsedValue {
            number: None,
            unit: String::new(),
            raw: raw.to_owned(),
        },
    }
}

/// Whether typed text is a bare number in progress. The empty string and
/// partial input like `-` or `1.` count: the user is mid-keystroke.
pub fn is_numeric_input(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let digits = text
        .strip_prefix(['+', '-'])
        .unwrap_or(text);
    let mut dots = 0;
    for character in digits.chars() {
        if character == '.' {
            dots += 1;
        } else if !character.is_ascii_digit() {
            return false;
        }
    }
    dots <= 1
}

/// The numeric part of a value for focused editing; non-numeric values
/// come back unchanged.
pub fn strip_unit(value: &str) -> String {
    let parsed = parse_value(value);
    match parsed.number {
        Some(number) if !parsed.unit.is_empty() => format_number(number),
        _ => value.to_owned(),
    }
}

/// Re-attach the field's current unit to freshly typed digits. Skipped
/// (the text passes through verbatim) unless the text is a bare number:
/// typing `50%` or `auto` into a px field must not become `50%px`.
pub fn autocomplete_unit(typed: &str, current_unit: &str) -> String {
    if typed.is_empty() || current_unit.is_empty() || !is_numeric_input(typed) {
        return typed.to_owned();
    }
    format!("{typed}{current_unit}")
}

/// Format like the editor displays numbers: no trailing `.0` on integers.
fn format_number(number: f32) -> String {
    if (number - number.trunc()).abs() < f32::EPSILON {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_splits_number_and_unit() {
        let parsed = parse_value("12.5px");
        assert_eq!(parsed.number, Some(12.5));
        assert_eq!(parsed.unit, "px");

        let bare = parse_value("-3");
        assert_eq!(bare.number, Some(-3.0));
        assert_eq!(bare.unit, "");

        let rem = parse_value("2rem");
        assert_eq!(rem.unit, "rem", "rem must not parse as em");
    }

    #[test]
    fn keywords_and_composites_have_no_number() {
        assert_eq!(parse_value("auto").number, None);
        assert_eq!(parse_value("1px solid red").number, None);
        assert_eq!(parse_value("fit-content").number, None);
    }

    #[test]
    fn numeric_input_accepts_partial_typing() {
        assert!(is_numeric_input(""));
        assert!(is_numeric_input("-"));
        assert!(is_numeric_input("1."));
        assert!(is_numeric_input("+12.5"));
        assert!(!is_numeric_input("12px"));
        assert!(!is_numeric_input("auto"));
        assert!(!is_numeric_input("1.2.3"));
    }

    #[test]
    fn strip_unit_keeps_non_numeric_values() {
        assert_eq!(strip_unit("16px"), "16");
        assert_eq!(strip_unit("1.5em"), "1.5");
        assert_eq!(strip_unit("auto"), "auto");
        assert_eq!(strip_unit("12"), "12");
    }

    #[test]
    fn autocompletion_only_fires_on_bare_numbers() {
        assert_eq!(autocomplete_unit("24", "px"), "24px");
        assert_eq!(autocomplete_unit("1.5", "em"), "1.5em");
        assert_eq!(autocomplete_unit("50%", "px"), "50%");
        assert_eq!(autocomplete_unit("auto", "px"), "auto");
        assert_eq!(autocomplete_unit("", "px"), "");
    }
}
