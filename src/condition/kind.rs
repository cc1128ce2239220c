use {
    super::op::{names, ConditionOp},
    serde::Serialize,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The declared value shape of a condition key.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ValueKind {
    Arn,
    Binary,
    Bool,
    Date,
    IpAddress,
    Numeric,
    String,
}

impl ValueKind {
    /// The operator used when a caller does not name one.
    pub fn default_operator(&self) -> ConditionOp {
        match self {
            Self::Arn => names::ArnLike,
            Self::Binary => names::BinaryEquals,
            Self::Bool => names::Bool,
            Self::Date => names::DateEquals,
            Self::IpAddress => names::IpAddress,
            Self::Numeric => names::NumericEquals,
            Self::String => names::StringLike,
        }
    }

    /// Whether `op` can compare values of this kind. `Null` applies to every kind; ARN keys also take string
    /// operators and date keys also take numeric operators (epoch seconds).
    pub fn accepts(&self, op: ConditionOp) -> bool {
        matches!(
            (self, op),
            (_, ConditionOp::Null)
                | (Self::Arn, ConditionOp::Arn(..))
                | (Self::Arn, ConditionOp::String(..))
                | (Self::Binary, ConditionOp::Binary(_))
                | (Self::Bool, ConditionOp::Bool(_))
                | (Self::Date, ConditionOp::Date(..))
                | (Self::Date, ConditionOp::Numeric(..))
                | (Self::IpAddress, ConditionOp::IpAddress(_))
                | (Self::Numeric, ConditionOp::Numeric(..))
                | (Self::String, ConditionOp::String(..))
        )
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Arn => f.write_str("ARN"),
            Self::Binary => f.write_str("Binary"),
            Self::Bool => f.write_str("Bool"),
            Self::Date => f.write_str("Date"),
            Self::IpAddress => f.write_str("IPAddress"),
            Self::Numeric => f.write_str("Numeric"),
            Self::String => f.write_str("String"),
        }
    }
}
