use thiserror::Error;

/// Errors raised while reading range sets, literals and operators from text.
///
/// Operations on [`RangeSet`][crate::set::RangeSet] values never fail: overflow
/// and division by zero are encoded as empty values. Only the textual entry
/// points return this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A component is neither `v` nor `lo..hi`.
    #[error("invalid range set component '{token}' in '{input}'")]
    InvalidComponent { token: String, input: String },

    /// A component list contains an empty entry (`",1"`, `"1,,2"`).
    #[error("empty range set component in '{0}'")]
    EmptyComponent(String),

    /// A range component with its bounds in the wrong order.
    #[error("inverted range {from}..{to}")]
    InvertedRange { from: i64, to: i64 },

    /// An integer literal that cannot be read.
    #[error("invalid integer literal '{0}'")]
    InvalidLiteral(String),

    /// An integer kind name or literal suffix that does not name a kind.
    #[error("unknown integer type '{0}'")]
    UnknownIntTy(String),

    /// An operator token that is not supported by the domain.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

pub type Result<T> = std::result::Result<T, Error>;
