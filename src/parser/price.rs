use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

// 1-2 digits, an optional decimal separator, then up to two more digits.
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,2}[.,]?[0-9]{0,2}").unwrap());

/// Parse the first number in a price fragment such as `"£3.50 / unit"`.
///
/// A comma is read as a decimal point and a bare trailing separator as `.0`.
/// Only the leftmost number counts, so a per-measure figure placed before the
/// unit price would be picked up instead.
pub fn parse_price(text: &str) -> Option<f64> {
    let matched = PRICE_RE.find(text)?.as_str();
    let mut normalized = matched.replace(',', ".");
    if normalized.ends_with('.') {
        normalized.push('0');
    }
    normalized.parse().ok()
}

/// Like [`parse_price`], but falls back to `0.0` and logs when nothing matches.
pub fn extract_price(text: &str) -> f64 {
    parse_price(text).unwrap_or_else(|| {
        warn!("Unable to find the price in {:?}", text.trim());
        0.0
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_FRAGMENT: &str = "
                 £3.50
                 <abbr title=\"per\">
                  /
                 </abbr>
                 <abbr title=\"unit\">
                  <span class=\"pricePerUnitUnit\">
                   unit
                  </span>
                 </abbr>
";

    #[test]
    fn different_contents_same_price() {
        let cases = [
            "<p class=\"pricePerUnit\">£3.50</p>",
            "£3.50\n / \n unit",
            "$3.50 / unit",
            FULL_FRAGMENT,
        ];
        for case in cases {
            assert_eq!(extract_price(case), 3.5, "failed with {case:?}");
        }
    }

    #[test]
    fn different_numbers() {
        assert_eq!(extract_price("£3.50 / unit"), 3.50);
        assert_eq!(extract_price("£93. / unit"), 93.0);
        assert_eq!(extract_price("£11.2 / unit"), 11.2);
        assert_eq!(extract_price("£56 / unit"), 56.0);
    }

    #[test]
    fn comma_is_decimal_point() {
        assert_eq!(parse_price("3,50 €"), Some(3.5));
        assert_eq!(parse_price("€7,"), Some(7.0));
    }

    #[test]
    fn only_first_number_used() {
        assert_eq!(parse_price("£1.80 / unit £0.36 / 100g"), Some(1.8));
        // The run stops after the trailing digits, separator or not.
        assert_eq!(parse_price("£123.45"), Some(123.0));
    }

    #[test]
    fn three_digit_prices_without_separator() {
        assert_eq!(extract_price("£100 / unit"), 100.0);
        assert_eq!(extract_price("£250\n / \n unit"), 250.0);
        assert_eq!(parse_price("£12.5 / unit"), Some(12.5));
    }

    #[test]
    fn no_digits_defaults_to_zero() {
        assert_eq!(parse_price("£ / unit"), None);
        assert_eq!(extract_price("£ / unit"), 0.0);
        assert_eq!(extract_price(""), 0.0);
    }
}
