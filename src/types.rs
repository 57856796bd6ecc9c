//! Integer kinds and the slice of the type system the range domain cares about.
//!
//! Every integer kind maps to a representable window `[min, max]`. The domain
//! is anchored to signed 64-bit arithmetic, so kinds wider than that window
//! (`u64`, `usize`, `i128`, `u128`) are approximated by `[i64::MIN, i64::MAX]`
//! or `[0, i64::MAX]` and flagged as *large* in the direction where the real
//! type exceeds the window.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A primitive integer kind.
///
/// `isize`/`usize` are treated as 64-bit.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum IntTy {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    ISize,
    USize,
}

impl IntTy {
    /// All integer kinds, signed and unsigned interleaved by width.
    pub const VALUES: [IntTy; 12] = [
        IntTy::I8,
        IntTy::U8,
        IntTy::I16,
        IntTy::U16,
        IntTy::I32,
        IntTy::U32,
        IntTy::I64,
        IntTy::U64,
        IntTy::I128,
        IntTy::U128,
        IntTy::ISize,
        IntTy::USize,
    ];

    /// Returns the source-level name of the kind (`"i8"`, `"usize"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            IntTy::I8 => "i8",
            IntTy::U8 => "u8",
            IntTy::I16 => "i16",
            IntTy::U16 => "u16",
            IntTy::I32 => "i32",
            IntTy::U32 => "u32",
            IntTy::I64 => "i64",
            IntTy::U64 => "u64",
            IntTy::I128 => "i128",
            IntTy::U128 => "u128",
            IntTy::ISize => "isize",
            IntTy::USize => "usize",
        }
    }

    /// Returns the bit width of the kind.
    pub const fn bits(self) -> u32 {
        match self {
            IntTy::I8 | IntTy::U8 => 8,
            IntTy::I16 | IntTy::U16 => 16,
            IntTy::I32 | IntTy::U32 => 32,
            IntTy::I64 | IntTy::U64 | IntTy::ISize | IntTy::USize => 64,
            IntTy::I128 | IntTy::U128 => 128,
        }
    }

    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            IntTy::I8 | IntTy::I16 | IntTy::I32 | IntTy::I64 | IntTy::I128 | IntTy::ISize
        )
    }

    /// Lowest value of the kind representable in the 64-bit window.
    pub const fn min(self) -> i64 {
        match self {
            IntTy::I8 => i8::MIN as i64,
            IntTy::I16 => i16::MIN as i64,
            IntTy::I32 => i32::MIN as i64,
            IntTy::I64 | IntTy::I128 | IntTy::ISize => i64::MIN,
            IntTy::U8 | IntTy::U16 | IntTy::U32 | IntTy::U64 | IntTy::U128 | IntTy::USize => 0,
        }
    }

    /// Highest value of the kind representable in the 64-bit window.
    pub const fn max(self) -> i64 {
        match self {
            IntTy::I8 => i8::MAX as i64,
            IntTy::U8 => u8::MAX as i64,
            IntTy::I16 => i16::MAX as i64,
            IntTy::U16 => u16::MAX as i64,
            IntTy::I32 => i32::MAX as i64,
            IntTy::U32 => u32::MAX as i64,
            IntTy::I64 | IntTy::U64 | IntTy::I128 | IntTy::U128 | IntTy::ISize | IntTy::USize => i64::MAX,
        }
    }

    /// The kind holds values above `i64::MAX`.
    pub const fn is_large_on_top(self) -> bool {
        matches!(self, IntTy::U64 | IntTy::I128 | IntTy::U128 | IntTy::USize)
    }

    /// The kind holds values below `i64::MIN`.
    pub const fn is_large_below(self) -> bool {
        matches!(self, IntTy::I128)
    }

    pub const fn is_large(self) -> bool {
        self.is_large_on_top() || self.is_large_below()
    }

    /// Clamps `value` into the window of the kind.
    pub fn clamp(self, value: i64) -> i64 {
        value.clamp(self.min(), self.max())
    }
}

impl Default for IntTy {
    fn default() -> Self {
        IntTy::I64
    }
}

impl fmt::Display for IntTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IntTy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IntTy::VALUES
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| Error::UnknownIntTy(s.to_string()))
    }
}

/// The type of an expression, as far as the range domain is concerned.
///
/// Only [`Ty::Int`] has a range representation; everything else makes the
/// domain inapplicable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Ty {
    Int(IntTy),
    Float,
    Bool,
    Char,
    Str,
    Other,
}

impl Ty {
    pub fn as_int(&self) -> Option<IntTy> {
        match self {
            Ty::Int(ty) => Some(*ty),
            _ => None,
        }
    }
}

impl From<IntTy> for Ty {
    fn from(ty: IntTy) -> Self {
        Ty::Int(ty)
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int(ty) => write!(f, "{}", ty),
            Ty::Float => f.write_str("f64"),
            Ty::Bool => f.write_str("bool"),
            Ty::Char => f.write_str("char"),
            Ty::Str => f.write_str("str"),
            Ty::Other => f.write_str("_"),
        }
    }
}
