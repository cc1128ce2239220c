use {
    crate::{display_json, GrantError, Statement},
    derive_builder::Builder,
    log::{debug, trace},
    serde::{
        ser::{SerializeMap, Serializer},
        Serialize,
    },
    std::{
        collections::HashSet,
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Policy language versions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PolicyVersion {
    V2008_10_17,
    V2012_10_17,
}

impl Default for PolicyVersion {
    fn default() -> Self {
        Self::V2012_10_17
    }
}

impl Display for PolicyVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::V2008_10_17 => f.write_str("2008-10-17"),
            Self::V2012_10_17 => f.write_str("2012-10-17"),
        }
    }
}

impl FromStr for PolicyVersion {
    type Err = GrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2008-10-17" => Ok(Self::V2008_10_17),
            "2012-10-17" => Ok(Self::V2012_10_17),
            _ => {
                debug!("Unknown policy version: {}", s);
                Err(GrantError::InvalidPolicyVersion(s.to_string()))
            }
        }
    }
}

impl Serialize for PolicyVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A policy document: a version, an optional identifier, and the statements it is composed of.
///
/// Statement ids must be unique within a policy; statements without one are unconstrained.
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct Policy {
    /// Policy variables such as `${aws:username}` in resource ARNs require `2012-10-17`, the default.
    #[builder(setter(into), default)]
    version: PolicyVersion,

    /// Some services require this element and impose their own uniqueness rules on it.
    #[builder(setter(into, strip_option), default)]
    id: Option<String>,

    #[builder(setter(into), default)]
    statements: Vec<Statement>,
}

impl PolicyBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(statements) = &self.statements {
            if let Some(sid) = first_duplicate_sid(statements) {
                return Err(format!("Duplicate statement id: {}", sid));
            }
        }
        Ok(())
    }
}

fn first_duplicate_sid(statements: &[Statement]) -> Option<&str> {
    let mut seen = HashSet::new();
    statements.iter().filter_map(Statement::sid).find(|sid| !seen.insert(*sid))
}

impl Policy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    #[inline]
    pub fn version(&self) -> PolicyVersion {
        self.version
    }

    #[inline]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn set_version(&mut self, version: PolicyVersion) -> &mut Self {
        self.version = version;
        self
    }

    pub fn set_id<S: Into<String>>(&mut self, id: S) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// Append a statement.
    ///
    /// # Errors
    ///
    /// [GrantError::DuplicateSid] if the statement's id is already used in this policy. The policy is unchanged.
    pub fn push<S: Into<Statement>>(&mut self, statement: S) -> Result<&mut Self, GrantError> {
        let statement = statement.into();
        if let Some(sid) = statement.sid() {
            if self.statements.iter().any(|existing| existing.sid() == Some(sid)) {
                debug!("Policy already has a statement with Sid {}", sid);
                return Err(GrantError::DuplicateSid(sid.to_string()));
            }
        }

        self.statements.push(statement);
        Ok(self)
    }

    /// Fold together statements that differ only in their actions.
    ///
    /// A statement without a Sid is merged into the first earlier Sid-less statement with the same effect, resources,
    /// conditions and element inversion; its actions are appended in order. Statements with a Sid are left alone, as
    /// are `NotAction` statements: the union of two exclusion lists excludes more than either statement did.
    pub fn merge_compatible(&mut self) -> &mut Self {
        let mut merged: Vec<Statement> = Vec::with_capacity(self.statements.len());

        for statement in self.statements.drain(..) {
            if statement.sid().is_none() && !statement.is_not_action() {
                if let Some(target) = merged.iter_mut().find(|m| m.sid().is_none() && m.same_scope(&statement)) {
                    trace!("Merging {} actions into an earlier statement", statement.actions().len());
                    target.add_actions(statement.actions().iter().cloned());
                    continue;
                }
            }
            merged.push(statement);
        }

        self.statements = merged;
        self
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        state.serialize_entry("Version", &self.version)?;
        if let Some(id) = &self.id {
            state.serialize_entry("Id", id)?;
        }
        state.serialize_entry("Statement", &self.statements)?;
        state.end()
    }
}

display_json!(Policy);
