//! Display helpers for addresses and amounts.

use crate::error::SessionError;

/// Decimals of the chain's native currency.
pub const NATIVE_DECIMALS: u32 = 18;

/// Places shown for the native balance.
pub const BALANCE_PLACES: u32 = 4;

/// `0xABCDEF1234567890` → `0xABCD...7890`.
///
/// Input of ten characters or fewer is returned unshortened.
pub fn format_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_owned();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

/// Fixed-point rendering of a smallest-unit amount, rounded half up.
pub fn format_units(amount: u128, decimals: u32, places: u32) -> String {
    let places = places.min(decimals);
    let scale = 10u128.pow(decimals - places);
    let mut scaled = amount / scale;
    if scale > 1 && amount % scale >= scale / 2 {
        scaled += 1;
    }
    if places == 0 {
        return scaled.to_string();
    }
    let unit = 10u128.pow(places);
    format!(
        "{}.{:0width$}",
        scaled / unit,
        scaled % unit,
        width = places as usize
    )
}

/// Staked amounts: whole numbers without a fraction, otherwise up to
/// eight places with trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    let text = format!("{value:.8}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Smallest amount `format_amount` renders as non-zero.
pub const MIN_AMOUNT: f64 = 1e-8;

/// Parses a user-entered token amount. Must be finite and at least
/// `MIN_AMOUNT`, so zero, negatives and amounts too small to display are
/// all rejected.
pub fn parse_amount(input: &str) -> Result<f64, SessionError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| SessionError::InvalidAmount)?;
    if !amount.is_finite() || amount < MIN_AMOUNT {
        return Err(SessionError::InvalidAmount);
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortens_to_first_six_and_last_four() {
        assert_eq!(format_address("0xABCDEF1234567890"), "0xABCD...7890");
        assert_eq!(format_address("0x1234"), "0x1234");
        assert_eq!(format_address(""), "");
    }

    #[test]
    fn converts_wei_to_four_places() {
        assert_eq!(format_units(1_234_500_000_000_000_000, 18, 4), "1.2345");
        assert_eq!(format_units(0, 18, 4), "0.0000");
        assert_eq!(format_units(99_995_000_000_000, 18, 4), "0.0001");
        assert_eq!(format_units(12_345_678_900_000_000_000, 18, 4), "12.3457");
        assert_eq!(format_units(1_500, 3, 0), "2");
    }

    #[test]
    fn formats_staked_amounts() {
        assert_eq!(format_amount(150.0), "150");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(12.5), "12.5");
        assert_eq!(format_amount(0.1 + 0.2), "0.3");
    }

    #[test]
    fn rejects_non_numeric_amounts() {
        for input in ["", "   ", "abc", "12abc", "NaN", "inf", "-5", "0"] {
            assert_eq!(parse_amount(input), Err(SessionError::InvalidAmount), "{input:?}");
        }
        assert_eq!(parse_amount(" 50 "), Ok(50.0));
        assert_eq!(parse_amount("2.5"), Ok(2.5));
    }

    #[test]
    fn accepted_amounts_never_display_as_zero() {
        assert_eq!(parse_amount("0.000000001"), Err(SessionError::InvalidAmount));
        let smallest = parse_amount("0.00000001").unwrap();
        assert_eq!(format_amount(smallest), "0.00000001");
    }
}
