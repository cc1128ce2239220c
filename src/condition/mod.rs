mod kind;
pub mod op;
mod value;
mod variant;

pub use {
    kind::ValueKind,
    op::{ArnCmp, ConditionOp, Operator, OrderedCmp, Quantifier, StringCmp},
    value::ConditionValue,
    variant::Variant,
};
use {
    crate::{serutil::StringList, GrantError},
    log::debug,
    serde::{ser::Serializer, Serialize},
    std::{collections::BTreeMap, str::FromStr},
};

/// Condition keys and their values under a single operator.
pub type ConditionMap = BTreeMap<String, StringList>;

/// One key/operator/value-set entry of a statement's condition block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionClause {
    key: String,
    operator: Operator,
    values: Vec<String>,
}

impl ConditionClause {
    /// Create a clause with an explicit operator.
    ///
    /// # Errors
    ///
    /// [GrantError::InvalidCondition] if `key` is empty or `values` yields nothing.
    pub fn new<K, I, V>(key: K, operator: Operator, values: I) -> Result<Self, GrantError>
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        let key = key.into();
        if key.is_empty() {
            debug!("Condition clause has an empty key");
            return Err(GrantError::InvalidCondition(key));
        }

        let values: Vec<String> = values.into_iter().map(|v| v.into().into_string()).collect();
        if values.is_empty() {
            debug!("Condition clause {} {} has no values", operator, key);
            return Err(GrantError::InvalidCondition(key));
        }

        Ok(Self {
            key,
            operator,
            values,
        })
    }

    /// Build a clause for a key of the given [ValueKind].
    ///
    /// `operator` is parsed from its policy-grammar name (`StringEquals`, `ForAnyValue:StringLike`, ...). When it is
    /// `None`, the kind's default operator is used.
    ///
    /// # Errors
    ///
    /// * [GrantError::UnsupportedOperator] if the operator name is unknown or cannot compare values of `kind`.
    /// * [GrantError::InvalidCondition] if `values` is empty.
    pub fn build<K, I, V>(key: K, kind: ValueKind, operator: Option<&str>, values: I) -> Result<Self, GrantError>
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        let operator = match operator {
            Some(name) => Operator::from_str(name)?,
            None => Operator::new(kind.default_operator()),
        };

        Self::for_kind(key, kind, operator, values)
    }

    /// Like [ConditionClause::build] with an already-typed operator.
    pub fn for_kind<K, I, V>(key: K, kind: ValueKind, operator: Operator, values: I) -> Result<Self, GrantError>
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        if !kind.accepts(operator.op()) {
            let key = key.into();
            debug!("Operator {} cannot be used with {} key {}", operator, kind, key);
            return Err(GrantError::UnsupportedOperator(format!("{} for {} key {}", operator, kind, key)));
        }

        Self::new(key, operator, values)
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Shorthand for [ConditionClause::build].
pub fn build_clause<K, I, V>(key: K, kind: ValueKind, operator: Option<&str>, values: I) -> Result<ConditionClause, GrantError>
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<ConditionValue>,
{
    ConditionClause::build(key, kind, operator, values)
}

/// The condition block of a statement: operator, then key, then value set.
///
/// A (key, operator) pair appears at most once; inserting it again replaces the earlier value set.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Condition {
    map: BTreeMap<Operator, ConditionMap>,
}

impl Condition {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a clause, returning the value set it replaced, if any.
    pub fn insert(&mut self, clause: ConditionClause) -> Option<StringList> {
        let ConditionClause {
            key,
            operator,
            values,
        } = clause;
        self.map.entry(operator).or_default().insert(key, StringList::from(values))
    }

    pub fn remove(&mut self, operator: &Operator, key: &str) -> Option<StringList> {
        let keys = self.map.get_mut(operator)?;
        let result = keys.remove(key);
        if keys.is_empty() {
            self.map.remove(operator);
        }
        result
    }

    #[inline]
    pub fn get(&self, operator: &Operator) -> Option<&ConditionMap> {
        self.map.get(operator)
    }

    pub fn get_values(&self, operator: &Operator, key: &str) -> Option<&StringList> {
        self.map.get(operator).and_then(|keys| keys.get(key))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The number of (operator, key) clauses.
    pub fn len(&self) -> usize {
        self.map.values().map(BTreeMap::len).sum()
    }

    #[inline]
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        self.map.keys()
    }

    /// Every clause as (operator, key, values).
    pub fn clauses(&self) -> impl Iterator<Item = (&Operator, &str, &StringList)> {
        self.map.iter().flat_map(|(op, keys)| keys.iter().map(move |(key, values)| (op, key.as_str(), values)))
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}
