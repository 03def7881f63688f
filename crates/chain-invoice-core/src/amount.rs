use crate::{Field, ValidationError, constants::NATIVE_DECIMALS};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// 10^NATIVE_DECIMALS
const BASE_UNITS_PER_COIN: u128 = 1_000_000_000_000_000_000;

/// An amount of the chain's native coin, stored in base units (10^18 per coin).
///
/// Serialized as a decimal string of base units, since the values exceed what JS numbers can
/// represent exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NativeAmount(u128);

impl NativeAmount {
    pub fn from_base_units(base_units: u128) -> Self {
        Self(base_units)
    }

    /// Parses a user entered decimal amount like "1.5" into base units, without rounding.
    pub fn from_decimal_str(value: &str) -> Result<Self, ValidationError> {
        parse_units(value, NATIVE_DECIMALS).map(Self)
    }

    pub fn base_units(&self) -> u128 {
        self.0
    }

    /// Formats the amount as a decimal coin string, e.g. "1" or "0.25"
    pub fn to_decimal_string(&self) -> String {
        let whole = self.0 / BASE_UNITS_PER_COIN;
        let fraction = self.0 % BASE_UNITS_PER_COIN;
        if fraction == 0 {
            return whole.to_string();
        }
        let fraction = format!("{fraction:0width$}", width = NATIVE_DECIMALS as usize);
        format!("{whole}.{}", fraction.trim_end_matches('0'))
    }
}

impl fmt::Display for NativeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Serialize for NativeAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NativeAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        crate::invoice::deserialize_u128(deserializer).map(Self)
    }
}

fn parse_units(value: &str, decimals: u32) -> Result<u128, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::FieldEmpty(Field::Amount));
    }
    if let Some(rest) = trimmed.strip_prefix('-') {
        if is_plain_decimal(rest) {
            return Err(ValidationError::NegativeAmount);
        }
        return Err(ValidationError::InvalidAmount(trimmed.to_owned()));
    }
    if !is_plain_decimal(trimmed) {
        return Err(ValidationError::InvalidAmount(trimmed.to_owned()));
    }
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    if fraction.len() > decimals as usize {
        return Err(ValidationError::TooManyDecimals(decimals));
    }

    let unit = 10u128
        .checked_pow(decimals)
        .ok_or(ValidationError::AmountOverflow)?;
    let fraction = digits_to_u128(&format!("{fraction:0<width$}", width = decimals as usize))?;
    digits_to_u128(whole)?
        .checked_mul(unit)
        .and_then(|units| units.checked_add(fraction))
        .ok_or(ValidationError::AmountOverflow)
}

/// Parses a plain digit string, empty means zero
fn digits_to_u128(digits: &str) -> Result<u128, ValidationError> {
    if digits.is_empty() {
        return Ok(0);
    }
    // only digits at this point, so the parse can only fail on overflow
    digits
        .parse::<u128>()
        .map_err(|_| ValidationError::AmountOverflow)
}

fn is_plain_decimal(value: &str) -> bool {
    let mut parts = value.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next();
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match fraction {
        None => !whole.is_empty() && digits(whole),
        Some(fraction) => {
            (!whole.is_empty() || !fraction.is_empty()) && digits(whole) && digits(fraction)
        }
    }
}

impl FromStr for NativeAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_decimal_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::whole("1", 1_000_000_000_000_000_000)]
    #[case::zero("0", 0)]
    #[case::fraction("0.5", 500_000_000_000_000_000)]
    #[case::smallest("0.000000000000000001", 1)]
    #[case::full_precision("1.000000000000000001", 1_000_000_000_000_000_001)]
    #[case::trailing_zeros("2.50", 2_500_000_000_000_000_000)]
    #[case::trimmed(" 3 ", 3_000_000_000_000_000_000)]
    #[case::large("1000000", 1_000_000_000_000_000_000_000_000)]
    #[case::leading_dot(".5", 500_000_000_000_000_000)]
    #[case::trailing_dot("7.", 7_000_000_000_000_000_000)]
    fn parses_decimal_into_base_units(#[case] input: &str, #[case] expected: u128) {
        assert_eq!(
            NativeAmount::from_decimal_str(input).unwrap().base_units(),
            expected
        );
    }

    #[rstest]
    #[case::empty("", ValidationError::FieldEmpty(Field::Amount))]
    #[case::blank("   ", ValidationError::FieldEmpty(Field::Amount))]
    #[case::negative("-1", ValidationError::NegativeAmount)]
    #[case::too_precise("0.0000000000000000001", ValidationError::TooManyDecimals(18))]
    #[case::letters("abc", ValidationError::InvalidAmount("abc".to_owned()))]
    #[case::underscore("1_000", ValidationError::InvalidAmount("1_000".to_owned()))]
    #[case::two_dots("1.2.3", ValidationError::InvalidAmount("1.2.3".to_owned()))]
    #[case::only_dot(".", ValidationError::InvalidAmount(".".to_owned()))]
    #[case::exponent("1e18", ValidationError::InvalidAmount("1e18".to_owned()))]
    fn rejects_invalid_amounts(#[case] input: &str, #[case] expected: ValidationError) {
        assert_eq!(NativeAmount::from_decimal_str(input), Err(expected));
    }

    #[rstest]
    #[case::at_2_pow_96("79228162514.264337593543950336", 1 << 96)]
    #[case::above_2_pow_96("79228162514.264337593543950337", (1 << 96) + 1)]
    #[case::large_with_full_precision(
        "100000000000.000000000000000001",
        100_000_000_000_000_000_000_000_000_001
    )]
    #[case::max("340282366920938463463.374607431768211455", u128::MAX)]
    fn parses_up_to_max_base_units(#[case] input: &str, #[case] expected: u128) {
        assert_eq!(
            NativeAmount::from_decimal_str(input).unwrap().base_units(),
            expected
        );
    }

    #[rstest]
    #[case::one_above_max("340282366920938463463.374607431768211456")]
    #[case::whole_part_too_large("340282366920938463464")]
    #[case::digits_beyond_u128("99999999999999999999999999999999999999999")]
    fn rejects_overflow(#[case] input: &str) {
        assert_eq!(
            NativeAmount::from_decimal_str(input),
            Err(ValidationError::AmountOverflow)
        );
    }

    #[rstest]
    #[case::whole(1_000_000_000_000_000_000, "1")]
    #[case::zero(0, "0")]
    #[case::half(500_000_000_000_000_000, "0.5")]
    #[case::smallest(1, "0.000000000000000001")]
    #[case::mixed(12_345_000_000_000_000_000, "12.345")]
    #[case::max(u128::MAX, "340282366920938463463.374607431768211455")]
    fn formats_base_units(#[case] input: u128, #[case] expected: &str) {
        assert_eq!(
            NativeAmount::from_base_units(input).to_decimal_string(),
            expected
        );
    }

    #[rstest]
    #[case("1")]
    #[case("0.1")]
    #[case("123456789.123456789123456789")]
    #[case("0.000000000000000001")]
    #[case("42.000000000000000042")]
    #[case("100000000000.000000000000000001")]
    #[case("340282366920938463463.374607431768211455")]
    fn decimal_round_trip_keeps_value(#[case] input: &str) {
        let amount = NativeAmount::from_decimal_str(input).unwrap();
        assert_eq!(amount.to_decimal_string(), input);
    }

    #[rstest]
    #[case(1)]
    #[case(1 << 96)]
    #[case(100_000_000_000_000_000_000_000_000_001)]
    #[case(u128::MAX)]
    fn base_units_round_trip(#[case] base_units: u128) {
        let formatted = NativeAmount::from_base_units(base_units).to_decimal_string();
        assert_eq!(
            NativeAmount::from_decimal_str(&formatted)
                .unwrap()
                .base_units(),
            base_units
        );
    }

    #[test]
    fn serializes_as_base_unit_string() {
        let amount = NativeAmount::from_decimal_str("1").unwrap();
        assert_eq!(
            serde_json::to_string(&amount).unwrap(),
            r#""1000000000000000000""#
        );
        let back: NativeAmount = serde_json::from_str(r#""1000000000000000000""#).unwrap();
        assert_eq!(back, amount);
        let from_number: NativeAmount = serde_json::from_str("1000").unwrap();
        assert_eq!(from_number.base_units(), 1000);
    }
}
