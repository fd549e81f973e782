/// Keeps only the ascii digits of a free-form phone number
pub fn phone_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Finds the 1-based row of a phone number column that refers to the same
/// number as `phone`.
///
/// Numbers are compared digits only and match when either contains the
/// other, which absorbs a missing or extra country code (`573001234567`
/// and `3001234567`). Empty cells are skipped, the first match wins and an
/// empty `phone` never matches.
pub fn find_phone_row<S: AsRef<str>>(column: &[S], phone: &str) -> Option<usize> {
    let target = phone_digits(phone);
    if target.is_empty() {
        return None;
    }

    column
        .iter()
        .map(|cell| phone_digits(cell.as_ref()))
        .position(|cell| !cell.is_empty() && (target.contains(&cell) || cell.contains(&target)))
        .map(|index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting() {
        assert_eq!(phone_digits("+57 (300) 123-4567"), "573001234567");
        assert_eq!(phone_digits("sin numero"), "");
    }

    #[test]
    fn matches_with_and_without_country_code() {
        let column = vec!["Teléfono", "3109998877", "3001234567"];
        assert_eq!(find_phone_row(&column, "573001234567"), Some(3));
        assert_eq!(find_phone_row(&column, "+57 310 999 8877"), Some(2));

        let column = vec!["573001234567"];
        assert_eq!(find_phone_row(&column, "3001234567"), Some(1));
    }

    #[test]
    fn first_match_wins() {
        let column = vec!["", "3001234567", "573001234567"];
        assert_eq!(find_phone_row(&column, "3001234567"), Some(2));
    }

    #[test]
    fn no_match() {
        let column = vec!["Teléfono", "", "3109998877"];
        assert_eq!(find_phone_row(&column, "3001234567"), None);
        assert_eq!(find_phone_row(&column, ""), None);
        assert_eq!(find_phone_row::<&str>(&[], "3001234567"), None);
    }
}
