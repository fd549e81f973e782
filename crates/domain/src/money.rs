/// Rendered amount used when there is nothing to format
pub const ZERO_AMOUNT: &str = "$0";

const NO_BREAK_SPACE: char = '\u{a0}';

/// Formats a raw amount as Colombian pesos without decimals, the way the
/// `es-CO` locale renders `COP`: `"1500"` -> `"$ 1.500"` (no-break space).
///
/// Every non digit is dropped first, so `"$150.000"` and `150000` render the
/// same. The digits are grouped as text, amounts of any length keep every
/// digit.
pub fn format_money(raw: Option<&str>) -> String {
    let digits: String = match raw {
        Some(raw) => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        None => return ZERO_AMOUNT.to_string(),
    };
    if digits.is_empty() {
        return ZERO_AMOUNT.to_string();
    }
    let significant = match digits.trim_start_matches('0') {
        "" => "0",
        significant => significant,
    };

    format!("${}{}", NO_BREAK_SPACE, group_thousands(significant))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_garbage_amounts_render_zero() {
        assert_eq!(format_money(None), ZERO_AMOUNT);
        assert_eq!(format_money(Some("")), ZERO_AMOUNT);
        assert_eq!(format_money(Some("abc")), ZERO_AMOUNT);
    }

    #[test]
    fn groups_thousands_without_decimals() {
        assert_eq!(format_money(Some("1500")), "$\u{a0}1.500");
        assert_eq!(format_money(Some("0")), "$\u{a0}0");
        assert_eq!(format_money(Some("999")), "$\u{a0}999");
        assert_eq!(format_money(Some("1000000")), "$\u{a0}1.000.000");
        assert_eq!(format_money(Some("$ 150.000")), "$\u{a0}150.000");
        assert_eq!(format_money(Some("0012")), "$\u{a0}12");
        assert_eq!(format_money(Some("000")), "$\u{a0}0");
    }

    #[test]
    fn amounts_wider_than_any_integer_keep_every_digit() {
        let raw = "123456789012345678901234567890123456789012345";
        assert_eq!(raw.len(), 45);
        assert_eq!(
            format_money(Some(raw)),
            "$\u{a0}123.456.789.012.345.678.901.234.567.890.123.456.789.012.345"
        );
    }
}
