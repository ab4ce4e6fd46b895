use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// An arbitrary-precision decimal number: `digits * 10^-scale`.
///
/// Every numeric kind the marshaller accepts is funnelled through this type so that
/// 64 and 128 bit integers print exactly and floats print their shortest
/// round-tripping decimal form. The representation is kept normalized (no trailing
/// fractional zeros), so structural equality is numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    digits: BigInt,
    scale: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid decimal number `{0}`")]
pub struct ParseNumberError(pub String);

impl Number {
    pub fn zero() -> Self {
        Number {
            digits: BigInt::zero(),
            scale: 0,
        }
    }

    /// Builds a number from a float. Returns `None` for NaN and the infinities,
    /// which have no decimal representation.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        // Display for floats yields the shortest string that round-trips, without exponent.
        format!("{value}").parse().ok()
    }

    pub fn from_f32(value: f32) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        format!("{value}").parse().ok()
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.scale == 0
    }

    fn normalized(mut self) -> Self {
        let ten = BigInt::from(10);
        while self.scale > 0 && (&self.digits % &ten).is_zero() {
            self.digits /= &ten;
            self.scale -= 1;
        }
        if self.digits.is_zero() {
            self.scale = 0;
        }
        self
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::zero()
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number {
                        digits: BigInt::from(value),
                        scale: 0,
                    }
                }
            }
        )+
    };
}

impl_from_int! {
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
}

impl From<BigInt> for Number {
    fn from(digits: BigInt) -> Self {
        Number { digits, scale: 0 }
    }
}

impl FromStr for Number {
    type Err = ParseNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseNumberError(s.to_string());
        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part
            .chars()
            .chain(frac_part.chars())
            .all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut all_digits = String::with_capacity(int_part.len() + frac_part.len() + 1);
        if negative {
            all_digits.push('-');
        }
        all_digits.push_str(if int_part.is_empty() { "0" } else { int_part });
        all_digits.push_str(frac_part);
        let digits: BigInt = all_digits.parse().map_err(|_| invalid())?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;
        Ok(Number { digits, scale }.normalized())
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.digits);
        }
        let scale = self.scale as usize;
        let mut magnitude = self.digits.abs().to_string();
        if magnitude.len() <= scale {
            let padding = scale + 1 - magnitude.len();
            magnitude.insert_str(0, &"0".repeat(padding));
        }
        let (int_part, frac_part) = magnitude.split_at(magnitude.len() - scale);
        if self.digits.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{int_part}.{frac_part}")
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::Number;

    #[test]
    fn test_integers_are_exact() {
        assert_eq!(Number::from(i64::MAX).to_string(), "9223372036854775807");
        assert_eq!(Number::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Number::from(-42i8).to_string(), "-42");
        assert_eq!(Number::from(0u8).to_string(), "0");
    }

    #[test]
    fn test_floats_use_shortest_decimal() {
        assert_eq!(Number::from_f64(1.5).unwrap().to_string(), "1.5");
        assert_eq!(Number::from_f64(0.1).unwrap().to_string(), "0.1");
        assert_eq!(Number::from_f64(-0.25).unwrap().to_string(), "-0.25");
        assert_eq!(Number::from_f64(3.0).unwrap().to_string(), "3");
        assert_eq!(Number::from_f64(1e-7).unwrap().to_string(), "0.0000001");
        assert_eq!(Number::from_f32(0.1).unwrap().to_string(), "0.1");
    }

    #[test]
    fn test_non_finite_floats_are_rejected() {
        assert!(Number::from_f64(f64::NAN).is_none());
        assert!(Number::from_f64(f64::INFINITY).is_none());
        assert!(Number::from_f32(f32::NEG_INFINITY).is_none());
    }

    #[test]
    fn test_parse_normalizes() {
        let n: Number = "12.500".parse().unwrap();
        assert_eq!(n.to_string(), "12.5");
        assert_eq!(n, "12.5".parse().unwrap());
        assert_eq!("-0.0".parse::<Number>().unwrap(), Number::zero());
        assert_eq!(".5".parse::<Number>().unwrap().to_string(), "0.5");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Number>().is_err());
        assert!("1e5".parse::<Number>().is_err());
        assert!("1.2.3".parse::<Number>().is_err());
        assert!("-".parse::<Number>().is_err());
    }
}
