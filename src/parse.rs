//! Reading range sets and integer literals from text.
//!
//! The range set format is the one produced by `Display`: `{}`, `{!}`, `{z}`,
//! `{?}`, or a comma-separated list of `v` and `lo..hi` components. The
//! braces are optional.

use std::num::IntErrorKind;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::set::RangeSet;
use crate::types::IntTy;

fn parse_bound(token: &str, part: &str, input: &str) -> Result<i64> {
    part.trim().parse().map_err(|_| Error::InvalidComponent {
        token: token.to_string(),
        input: input.to_string(),
    })
}

impl RangeSet {
    /// Reads a range set, attaching `ty` to the result.
    pub fn parse_in(text: &str, ty: IntTy) -> Result<RangeSet> {
        let trimmed = text.trim();
        let inner = match trimmed.strip_prefix('{') {
            Some(rest) => rest.strip_suffix('}').ok_or_else(|| Error::InvalidComponent {
                token: trimmed.to_string(),
                input: text.to_string(),
            })?,
            None => trimmed,
        };
        match inner.trim() {
            "" => return Ok(RangeSet::empty()),
            "!" => return Ok(RangeSet::overflow()),
            "z" => return Ok(RangeSet::division_by_zero()),
            "?" => return Ok(RangeSet::unknown()),
            _ => {}
        }

        let mut intervals = Vec::new();
        for token in inner.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(Error::EmptyComponent(text.to_string()));
            }
            let (from, to) = match token.split_once("..") {
                Some((from, to)) => (parse_bound(token, from, text)?, parse_bound(token, to, text)?),
                None => {
                    let value = parse_bound(token, token, text)?;
                    (value, value)
                }
            };
            if from > to {
                return Err(Error::InvertedRange { from, to });
            }
            intervals.push((from, to));
        }
        Ok(RangeSet::normalize(intervals, ty))
    }

    /// The value of an integer literal such as `42`, `0xFF_u8` or `-1i32`.
    ///
    /// Unsuffixed literals take `default_ty`.
    pub fn from_literal(text: &str, default_ty: IntTy) -> Result<RangeSet> {
        let text = text.trim();
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };
        let literal = IntLiteral::parse(body)?;
        let value = if negative {
            literal.negated_value()
        } else {
            literal.value()
        };
        Ok(RangeSet::constant_in(value, literal.suffix.unwrap_or(default_ty)))
    }
}

impl FromStr for RangeSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RangeSet::parse_in(s, IntTy::default())
    }
}

/// An unsigned integer literal, with its digits decoded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct IntLiteral {
    magnitude: Option<u128>,
    /// The integer kind named by the literal suffix, if any.
    pub suffix: Option<IntTy>,
}

impl IntLiteral {
    /// Decodes decimal, `0x` hex, `0o` octal and `0b` binary literals with
    /// `_` separators and an optional kind suffix.
    pub fn parse(text: &str) -> Result<IntLiteral> {
        let invalid = || Error::InvalidLiteral(text.to_string());
        let (radix, rest) = match text.get(..2) {
            Some("0x") => (16, &text[2..]),
            Some("0o") => (8, &text[2..]),
            Some("0b") => (2, &text[2..]),
            _ => (10, text),
        };
        let (digits, suffix) = match rest.find(|c| c == 'i' || c == 'u') {
            Some(pos) => (&rest[..pos], Some(rest[pos..].parse::<IntTy>()?)),
            None => (rest, None),
        };
        let digits: String = digits.chars().filter(|&c| c != '_').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(invalid());
        }
        let magnitude = match u128::from_str_radix(&digits, radix) {
            Ok(v) => Some(v),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => None,
            Err(_) => return Err(invalid()),
        };
        Ok(IntLiteral { magnitude, suffix })
    }

    /// The value, if it fits the 64-bit window.
    pub fn value(&self) -> Option<i64> {
        self.magnitude.and_then(|v| i64::try_from(v).ok())
    }

    /// The value of the negated literal, if it fits the 64-bit window.
    pub fn negated_value(&self) -> Option<i64> {
        self.magnitude
            .and_then(|v| i128::try_from(v).ok())
            .and_then(|v| i64::try_from(-v).ok())
    }
}

impl FromStr for IntLiteral {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        IntLiteral::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::set::Shape;

    #[test]
    fn test_parse() {
        let check = |text: &str, expected: &str| {
            let set: RangeSet = text.parse().unwrap();
            assert_eq!(set.to_string(), expected, "{:?}", text);
        };
        check("", "{}");
        check("{}", "{}");
        check("!", "{!}");
        check("{z}", "{z}");
        check(" ? ", "{?}");
        check("5", "{5}");
        check("{-5..-3}", "{-5..-3}");
        check("1, 2", "{1, 2}");
        check("1..3, 2..8", "{1..8}");
        check("-2..60, 77, 555", "{-2..60, 77, 555}");
        check("10, 0..5", "{0..5, 10}");
        check("3..3", "{3}");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("abc".parse::<RangeSet>(), Err(Error::InvalidComponent { .. })));
        assert!(matches!("1..x".parse::<RangeSet>(), Err(Error::InvalidComponent { .. })));
        assert!(matches!("{1, 2".parse::<RangeSet>(), Err(Error::InvalidComponent { .. })));
        assert!(matches!(
            "99999999999999999999".parse::<RangeSet>(),
            Err(Error::InvalidComponent { .. })
        ));
        assert_eq!("1,,2".parse::<RangeSet>(), Err(Error::EmptyComponent("1,,2".to_string())));
        assert_eq!(",1".parse::<RangeSet>(), Err(Error::EmptyComponent(",1".to_string())));
        assert_eq!("5..1".parse::<RangeSet>(), Err(Error::InvertedRange { from: 5, to: 1 }));
    }

    #[test]
    fn test_parse_in() {
        let set = RangeSet::parse_in("0..10", IntTy::U8).unwrap();
        assert_eq!(set.ty(), IntTy::U8);
        assert_eq!(set.shape(), Shape::Range(0, 10));
    }

    #[test]
    fn test_round_trip() {
        let values = [
            RangeSet::empty(),
            RangeSet::overflow(),
            RangeSet::division_by_zero(),
            RangeSet::unknown(),
            RangeSet::point(i64::MIN),
            RangeSet::range(-1, 0),
            RangeSet::all(IntTy::I64),
            RangeSet::range(0, 10).without(5).without(7),
        ];
        for set in values {
            assert_eq!(set.to_string().parse::<RangeSet>().unwrap(), set);
        }
    }

    #[test]
    fn test_int_literal() {
        let check = |text: &str, value: Option<i64>, suffix: Option<IntTy>| {
            let lit = IntLiteral::parse(text).unwrap();
            assert_eq!((lit.value(), lit.suffix), (value, suffix), "{:?}", text);
        };
        check("0", Some(0), None);
        check("1_000", Some(1000), None);
        check("0xFF_u8", Some(255), Some(IntTy::U8));
        check("0o17", Some(15), None);
        check("0b1010i16", Some(10), Some(IntTy::I16));
        check("42usize", Some(42), Some(IntTy::USize));
        check("9223372036854775807", Some(i64::MAX), None);
        check("9223372036854775808", None, None);
        check("340282366920938463463374607431768211456", None, None);
        check("18446744073709551615u64", None, Some(IntTy::U64));
    }

    #[test]
    fn test_int_literal_errors() {
        assert_eq!(IntLiteral::parse(""), Err(Error::InvalidLiteral("".to_string())));
        assert_eq!(IntLiteral::parse("0x"), Err(Error::InvalidLiteral("0x".to_string())));
        assert_eq!(IntLiteral::parse("12a"), Err(Error::InvalidLiteral("12a".to_string())));
        assert_eq!(IntLiteral::parse("0b102"), Err(Error::InvalidLiteral("0b102".to_string())));
        assert_eq!(IntLiteral::parse("+5"), Err(Error::InvalidLiteral("+5".to_string())));
        assert_eq!(IntLiteral::parse("5u7"), Err(Error::UnknownIntTy("u7".to_string())));
    }

    #[test]
    fn test_from_literal() {
        let check = |text: &str, ty: IntTy, expected: &str| {
            let set = RangeSet::from_literal(text, ty).unwrap();
            assert_eq!(set.to_string(), expected, "{:?}", text);
        };
        check("42", IntTy::I32, "{42}");
        check("-42", IntTy::I32, "{-42}");
        check("200", IntTy::I8, "{!}");
        check("200u8", IntTy::I8, "{200}");
        check("-5u8", IntTy::I64, "{!}");
        check("-128i8", IntTy::I64, "{-128}");
        check("-9223372036854775808", IntTy::I64, "{-9223372036854775808}");
        check("9223372036854775808", IntTy::I64, "{?}");
        check("18446744073709551615u64", IntTy::I64, "{?}");
        assert_eq!(RangeSet::from_literal("-", IntTy::I64), Err(Error::InvalidLiteral("".to_string())));
    }
}
