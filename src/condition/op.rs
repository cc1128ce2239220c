use {
    super::variant::Variant,
    crate::GrantError,
    lazy_static::lazy_static,
    log::debug,
    serde::{ser::Serializer, Serialize},
    std::{
        collections::HashMap,
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

const ARN_DISPLAY_NAMES: [&str; 8] = [
    "ArnEquals",
    "ArnEqualsIfExists",
    "ArnNotEquals",
    "ArnNotEqualsIfExists",
    "ArnLike",
    "ArnLikeIfExists",
    "ArnNotLike",
    "ArnNotLikeIfExists",
];

const BINARY_DISPLAY_NAMES: [&str; 2] = ["BinaryEquals", "BinaryEqualsIfExists"];

const BOOL_DISPLAY_NAMES: [&str; 2] = ["Bool", "BoolIfExists"];

const DATE_DISPLAY_NAMES: [&str; 12] = [
    "DateEquals",
    "DateEqualsIfExists",
    "DateNotEquals",
    "DateNotEqualsIfExists",
    "DateLessThan",
    "DateLessThanIfExists",
    "DateGreaterThanEquals",
    "DateGreaterThanEqualsIfExists",
    "DateLessThanEquals",
    "DateLessThanEqualsIfExists",
    "DateGreaterThan",
    "DateGreaterThanIfExists",
];

const IP_ADDRESS_DISPLAY_NAMES: [&str; 4] = ["IpAddress", "IpAddressIfExists", "NotIpAddress", "NotIpAddressIfExists"];

const NULL_DISPLAY_NAME: &str = "Null";

const NUMERIC_DISPLAY_NAMES: [&str; 12] = [
    "NumericEquals",
    "NumericEqualsIfExists",
    "NumericNotEquals",
    "NumericNotEqualsIfExists",
    "NumericLessThan",
    "NumericLessThanIfExists",
    "NumericGreaterThanEquals",
    "NumericGreaterThanEqualsIfExists",
    "NumericLessThanEquals",
    "NumericLessThanEqualsIfExists",
    "NumericGreaterThan",
    "NumericGreaterThanIfExists",
];

const STRING_DISPLAY_NAMES: [&str; 12] = [
    "StringEquals",
    "StringEqualsIfExists",
    "StringNotEquals",
    "StringNotEqualsIfExists",
    "StringEqualsIgnoreCase",
    "StringEqualsIgnoreCaseIfExists",
    "StringNotEqualsIgnoreCase",
    "StringNotEqualsIgnoreCaseIfExists",
    "StringLike",
    "StringLikeIfExists",
    "StringNotLike",
    "StringNotLikeIfExists",
];

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum ArnCmp {
    Equals = 0,
    Like = 4,
}

/// Date and numeric comparisons. `GreaterThan` forms are the negations of the `LessThan` forms.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum OrderedCmp {
    Equals = 0,
    LessThan = 4,
    LessThanEquals = 8,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum StringCmp {
    Equals = 0,
    EqualsIgnoreCase = 4,
    Like = 8,
}

/// An operator for a condition clause.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionOp {
    /// Operators for ARNs.
    Arn(ArnCmp, Variant),

    /// Operators for base64-encoded binary values. Only [Variant::None] and [Variant::IfExists] exist.
    Binary(Variant),

    /// Operators on boolean values. Only [Variant::None] and [Variant::IfExists] exist.
    Bool(Variant),

    Date(OrderedCmp, Variant),

    IpAddress(Variant),

    /// Operator on the presence/absence of a key.
    Null,

    Numeric(OrderedCmp, Variant),

    String(StringCmp, Variant),
}

impl ConditionOp {
    /// The name of the operator in the policy grammar, or `None` for combinations the grammar does not have (such as a
    /// negated `Bool`).
    pub fn display_name(&self) -> Option<&'static str> {
        match self {
            Self::Arn(cmp, variant) => ARN_DISPLAY_NAMES.get(*cmp as usize | variant.as_usize()).copied(),
            Self::Binary(variant) => BINARY_DISPLAY_NAMES.get(variant.as_usize()).copied(),
            Self::Bool(variant) => BOOL_DISPLAY_NAMES.get(variant.as_usize()).copied(),
            Self::Date(cmp, variant) => DATE_DISPLAY_NAMES.get(*cmp as usize | variant.as_usize()).copied(),
            Self::IpAddress(variant) => IP_ADDRESS_DISPLAY_NAMES.get(variant.as_usize()).copied(),
            Self::Null => Some(NULL_DISPLAY_NAME),
            Self::Numeric(cmp, variant) => NUMERIC_DISPLAY_NAMES.get(*cmp as usize | variant.as_usize()).copied(),
            Self::String(cmp, variant) => STRING_DISPLAY_NAMES.get(*cmp as usize | variant.as_usize()).copied(),
        }
    }

    /// Every operator the policy grammar defines.
    pub fn all() -> Vec<ConditionOp> {
        let mut result = Vec::with_capacity(53);
        for variant in Variant::ALL {
            for cmp in [ArnCmp::Equals, ArnCmp::Like] {
                result.push(Self::Arn(cmp, variant));
            }
            for cmp in [OrderedCmp::Equals, OrderedCmp::LessThan, OrderedCmp::LessThanEquals] {
                result.push(Self::Date(cmp, variant));
                result.push(Self::Numeric(cmp, variant));
            }
            for cmp in [StringCmp::Equals, StringCmp::EqualsIgnoreCase, StringCmp::Like] {
                result.push(Self::String(cmp, variant));
            }
            result.push(Self::Binary(variant));
            result.push(Self::Bool(variant));
            result.push(Self::IpAddress(variant));
        }
        result.push(Self::Null);
        result.retain(|op| op.display_name().is_some());
        result.sort();
        result
    }
}

lazy_static! {
    static ref OPS_BY_NAME: HashMap<&'static str, ConditionOp> =
        ConditionOp::all().into_iter().filter_map(|op| op.display_name().map(|name| (name, op))).collect();
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.display_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:?}", self),
        }
    }
}

impl FromStr for ConditionOp {
    type Err = GrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match OPS_BY_NAME.get(s) {
            Some(op) => Ok(*op),
            None => {
                debug!("Unrecognized condition operator: {}", s);
                Err(GrantError::UnsupportedOperator(s.to_string()))
            }
        }
    }
}

impl Serialize for ConditionOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Set qualifiers for multi-valued condition keys.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Quantifier {
    ForAllValues,
    ForAnyValue,
}

impl Display for Quantifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ForAllValues => f.write_str("ForAllValues"),
            Self::ForAnyValue => f.write_str("ForAnyValue"),
        }
    }
}

/// A condition operator as written in a policy: a [ConditionOp] with an optional `ForAllValues:`/`ForAnyValue:`
/// qualifier.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Operator {
    quantifier: Option<Quantifier>,
    op: ConditionOp,
}

impl Operator {
    pub const fn new(op: ConditionOp) -> Self {
        Self {
            quantifier: None,
            op,
        }
    }

    pub const fn for_all_values(op: ConditionOp) -> Self {
        Self {
            quantifier: Some(Quantifier::ForAllValues),
            op,
        }
    }

    pub const fn for_any_value(op: ConditionOp) -> Self {
        Self {
            quantifier: Some(Quantifier::ForAnyValue),
            op,
        }
    }

    #[inline]
    pub fn quantifier(&self) -> Option<Quantifier> {
        self.quantifier
    }

    #[inline]
    pub fn op(&self) -> ConditionOp {
        self.op
    }
}

impl From<ConditionOp> for Operator {
    fn from(op: ConditionOp) -> Self {
        Self::new(op)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.quantifier {
            Some(quantifier) => write!(f, "{}:{}", quantifier, self.op),
            None => write!(f, "{}", self.op),
        }
    }
}

impl FromStr for Operator {
    type Err = GrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (quantifier, name) = match s.split_once(':') {
            Some(("ForAllValues", name)) => (Some(Quantifier::ForAllValues), name),
            Some(("ForAnyValue", name)) => (Some(Quantifier::ForAnyValue), name),
            Some(_) => {
                debug!("Unrecognized set qualifier in condition operator: {}", s);
                return Err(GrantError::UnsupportedOperator(s.to_string()));
            }
            None => (None, s),
        };

        let op = ConditionOp::from_str(name).map_err(|_| GrantError::UnsupportedOperator(s.to_string()))?;

        if quantifier.is_some() && op == ConditionOp::Null {
            debug!("Null cannot take a set qualifier: {}", s);
            return Err(GrantError::UnsupportedOperator(s.to_string()));
        }

        Ok(Self {
            quantifier,
            op,
        })
    }
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

macro_rules! operator_constants {
    ($($name:ident => $value:expr;)*) => {
        $(
            #[doc = concat!("The `", stringify!($name), "` operator.")]
            pub const $name: ConditionOp = $value;
        )*
    };
}

/// Named constants for every [ConditionOp].
#[allow(non_upper_case_globals)]
pub mod names {
    use super::{ArnCmp, ConditionOp, OrderedCmp, StringCmp, Variant};

    operator_constants! {
        ArnEquals => ConditionOp::Arn(ArnCmp::Equals, Variant::None);
        ArnEqualsIfExists => ConditionOp::Arn(ArnCmp::Equals, Variant::IfExists);
        ArnNotEquals => ConditionOp::Arn(ArnCmp::Equals, Variant::Negated);
        ArnNotEqualsIfExists => ConditionOp::Arn(ArnCmp::Equals, Variant::IfExistsNegated);
        ArnLike => ConditionOp::Arn(ArnCmp::Like, Variant::None);
        ArnLikeIfExists => ConditionOp::Arn(ArnCmp::Like, Variant::IfExists);
        ArnNotLike => ConditionOp::Arn(ArnCmp::Like, Variant::Negated);
        ArnNotLikeIfExists => ConditionOp::Arn(ArnCmp::Like, Variant::IfExistsNegated);
        BinaryEquals => ConditionOp::Binary(Variant::None);
        BinaryEqualsIfExists => ConditionOp::Binary(Variant::IfExists);
        Bool => ConditionOp::Bool(Variant::None);
        BoolIfExists => ConditionOp::Bool(Variant::IfExists);
        DateEquals => ConditionOp::Date(OrderedCmp::Equals, Variant::None);
        DateEqualsIfExists => ConditionOp::Date(OrderedCmp::Equals, Variant::IfExists);
        DateNotEquals => ConditionOp::Date(OrderedCmp::Equals, Variant::Negated);
        DateNotEqualsIfExists => ConditionOp::Date(OrderedCmp::Equals, Variant::IfExistsNegated);
        DateLessThan => ConditionOp::Date(OrderedCmp::LessThan, Variant::None);
        DateLessThanIfExists => ConditionOp::Date(OrderedCmp::LessThan, Variant::IfExists);
        DateGreaterThanEquals => ConditionOp::Date(OrderedCmp::LessThan, Variant::Negated);
        DateGreaterThanEqualsIfExists => ConditionOp::Date(OrderedCmp::LessThan, Variant::IfExistsNegated);
        DateLessThanEquals => ConditionOp::Date(OrderedCmp::LessThanEquals, Variant::None);
        DateLessThanEqualsIfExists => ConditionOp::Date(OrderedCmp::LessThanEquals, Variant::IfExists);
        DateGreaterThan => ConditionOp::Date(OrderedCmp::LessThanEquals, Variant::Negated);
        DateGreaterThanIfExists => ConditionOp::Date(OrderedCmp::LessThanEquals, Variant::IfExistsNegated);
        IpAddress => ConditionOp::IpAddress(Variant::None);
        IpAddressIfExists => ConditionOp::IpAddress(Variant::IfExists);
        NotIpAddress => ConditionOp::IpAddress(Variant::Negated);
        NotIpAddressIfExists => ConditionOp::IpAddress(Variant::IfExistsNegated);
        Null => ConditionOp::Null;
        NumericEquals => ConditionOp::Numeric(OrderedCmp::Equals, Variant::None);
        NumericEqualsIfExists => ConditionOp::Numeric(OrderedCmp::Equals, Variant::IfExists);
        NumericNotEquals => ConditionOp::Numeric(OrderedCmp::Equals, Variant::Negated);
        NumericNotEqualsIfExists => ConditionOp::Numeric(OrderedCmp::Equals, Variant::IfExistsNegated);
        NumericLessThan => ConditionOp::Numeric(OrderedCmp::LessThan, Variant::None);
        NumericLessThanIfExists => ConditionOp::Numeric(OrderedCmp::LessThan, Variant::IfExists);
        NumericGreaterThanEquals => ConditionOp::Numeric(OrderedCmp::LessThan, Variant::Negated);
        NumericGreaterThanEqualsIfExists => ConditionOp::Numeric(OrderedCmp::LessThan, Variant::IfExistsNegated);
        NumericLessThanEquals => ConditionOp::Numeric(OrderedCmp::LessThanEquals, Variant::None);
        NumericLessThanEqualsIfExists => ConditionOp::Numeric(OrderedCmp::LessThanEquals, Variant::IfExists);
        NumericGreaterThan => ConditionOp::Numeric(OrderedCmp::LessThanEquals, Variant::Negated);
        NumericGreaterThanIfExists => ConditionOp::Numeric(OrderedCmp::LessThanEquals, Variant::IfExistsNegated);
        StringEquals => ConditionOp::String(StringCmp::Equals, Variant::None);
        StringEqualsIfExists => ConditionOp::String(StringCmp::Equals, Variant::IfExists);
        StringNotEquals => ConditionOp::String(StringCmp::Equals, Variant::Negated);
        StringNotEqualsIfExists => ConditionOp::String(StringCmp::Equals, Variant::IfExistsNegated);
        StringEqualsIgnoreCase => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::None);
        StringEqualsIgnoreCaseIfExists => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExists);
        StringNotEqualsIgnoreCase => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::Negated);
        StringNotEqualsIgnoreCaseIfExists => ConditionOp::String(StringCmp::EqualsIgnoreCase, Variant::IfExistsNegated);
        StringLike => ConditionOp::String(StringCmp::Like, Variant::None);
        StringLikeIfExists => ConditionOp::String(StringCmp::Like, Variant::IfExists);
        StringNotLike => ConditionOp::String(StringCmp::Like, Variant::Negated);
        StringNotLikeIfExists => ConditionOp::String(StringCmp::Like, Variant::IfExistsNegated);
    }
}
