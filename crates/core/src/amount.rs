//! Fixed-point formatting for token amounts.
//!
//! Amounts travel through the contract as integers in base units. For display
//! they are shifted left by the asset's decimal count, without any float math:
//! - no rounding, every base unit stays visible;
//! - integers shorter than the decimal count are left-padded with zeros;
//! - user input is filtered to ASCII digits before it is parsed.

use thiserror::Error;

/// Decimal places of the network's base asset.
pub const BASE_DECIMALS: u32 = 9;

/// Display symbol of the network's base asset.
pub const BASE_SYMBOL: &str = "ETH";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("amount contains a non-digit character {0:?}")]
    NonDigit(char),
    #[error("amount does not fit in 64 bits")]
    Overflow,
}

/// Format `value` base units with `decimals` places.
///
/// `format_units(0, 9)` is `"0.000000000"`, `format_units(1, 9)` is
/// `"0.000000001"` and `format_units(1000, 0)` is `"1000"`.
pub fn format_units(value: u64, decimals: u32) -> String {
    format_digits(&value.to_string(), decimals)
}

/// Like [`format_units`] for an arbitrary-length digit string.
///
/// Leading zeros are dropped before shifting. Non-digit input formats as zero.
pub fn format_digits(digits: &str, decimals: u32) -> String {
    let digits = if is_all_digits(digits) {
        digits.trim_start_matches('0')
    } else {
        ""
    };
    let digits = if digits.is_empty() { "0" } else { digits };

    let decimals = decimals as usize;
    if decimals == 0 {
        return digits.to_string();
    }

    let mut out = String::with_capacity(digits.len().max(decimals) + 2);
    if digits.len() <= decimals {
        out.push_str("0.");
        for _ in 0..decimals - digits.len() {
            out.push('0');
        }
        out.push_str(digits);
    } else {
        let (int_part, frac_part) = digits.split_at(digits.len() - decimals);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Drop every character that is not an ASCII digit.
pub fn sanitize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a base-unit amount typed by the user.
pub fn parse_base_units(text: &str) -> Result<u64, AmountError> {
    if text.is_empty() {
        return Err(AmountError::Empty);
    }
    if let Some(c) = text.chars().find(|c| !c.is_ascii_digit()) {
        return Err(AmountError::NonDigit(c));
    }
    text.parse::<u64>().map_err(|_| AmountError::Overflow)
}

/// Preview line shown under amount inputs, e.g. `"≈ 0.000001000 ETH"`.
pub fn preview(text: &str) -> String {
    let safe = if is_all_digits(text) { text } else { "0" };
    format!("≈ {} {}", format_digits(safe, BASE_DECIMALS), BASE_SYMBOL)
}

/// Everything the amount widget renders for one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountDisplay {
    pub label: &'static str,
    pub formatted: String,
    pub raw: String,
    pub symbol: &'static str,
}

impl AmountDisplay {
    pub fn new(label: &'static str, value: u64) -> Self {
        Self {
            label,
            formatted: format_units(value, BASE_DECIMALS),
            raw: value.to_string(),
            symbol: BASE_SYMBOL,
        }
    }

    pub fn value_line(&self) -> String {
        format!("{} {}", self.formatted, self.symbol)
    }

    pub fn base_units_hint(&self) -> String {
        format!("({} base units)", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_renders_full_precision() {
        assert_eq!(format_units(0, 9), "0.000000000");
        assert_eq!(format_units(0, 0), "0");
    }

    #[test]
    fn pads_short_integers() {
        assert_eq!(format_units(1, 9), "0.000000001");
        assert_eq!(format_units(1000, 9), "0.000001000");
        assert_eq!(format_units(123_456_789, 9), "0.123456789");
    }

    #[test]
    fn splits_long_integers() {
        assert_eq!(format_units(1_000_000_000, 9), "1.000000000");
        assert_eq!(format_units(u64::MAX, 9), "18446744073.709551615");
        assert_eq!(format_units(1234, 2), "12.34");
    }

    #[test]
    fn digit_strings_beyond_u64_still_format() {
        assert_eq!(
            format_digits("123456789012345678901234", 9),
            "123456789012345.678901234"
        );
        assert_eq!(format_digits("000500", 3), "0.500");
        assert_eq!(format_digits("12a", 9), "0.000000000");
    }

    #[test]
    fn sanitize_keeps_only_ascii_digits() {
        assert_eq!(sanitize_digits("1,000.5e3"), "100053");
        assert_eq!(sanitize_digits("-42"), "42");
        assert_eq!(sanitize_digits("٣4"), "4");
        assert_eq!(sanitize_digits(""), "");
    }

    #[test]
    fn parse_rejects_anything_but_digits() {
        assert_eq!(parse_base_units("500"), Ok(500));
        assert_eq!(parse_base_units(""), Err(AmountError::Empty));
        assert_eq!(parse_base_units("5 0"), Err(AmountError::NonDigit(' ')));
        assert_eq!(parse_base_units("-1"), Err(AmountError::NonDigit('-')));
        assert_eq!(
            parse_base_units("18446744073709551616"),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn preview_falls_back_to_zero() {
        assert_eq!(preview("1000"), "≈ 0.000001000 ETH");
        assert_eq!(preview(""), "≈ 0.000000000 ETH");
        assert_eq!(preview("1.5"), "≈ 0.000000000 ETH");
    }

    #[test]
    fn display_carries_raw_hint() {
        let d = AmountDisplay::new("Target Goal", 2_500_000_000);
        assert_eq!(d.value_line(), "2.500000000 ETH");
        assert_eq!(d.base_units_hint(), "(2500000000 base units)");
    }

    proptest! {
        #[test]
        fn formatting_preserves_the_digit_sequence(n in any::<u64>(), d in 0u32..30) {
            let formatted = format_units(n, d);
            let stripped: String = formatted.chars().filter(|c| *c != '.').collect();
            let stripped = stripped.trim_start_matches('0');
            let expected = n.to_string();
            let expected = expected.trim_start_matches('0');
            prop_assert_eq!(stripped, expected);
        }

        #[test]
        fn fraction_width_matches_decimals(n in any::<u64>(), d in 1u32..30) {
            let formatted = format_units(n, d);
            let frac = formatted.split('.').nth(1).unwrap();
            prop_assert_eq!(frac.len(), d as usize);
        }
    }
}
