use {
    crate::GrantError,
    log::debug,
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The resources a statement applies to: everything (`*`) or one resolved ARN.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Resource {
    Any,
    Arn(String),
}

impl Resource {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl FromStr for Resource {
    type Err = GrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" {
            return Ok(Self::Any);
        }

        let parts = s.splitn(6, ':');
        if parts.count() != 6 || !s.starts_with("arn:") {
            debug!("Failed to parse resource as ARN: {}", s);
            return Err(GrantError::TemplateError(s.to_string()));
        }

        Ok(Self::Arn(s.to_string()))
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Arn(arn) => f.write_str(arn),
        }
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How [Statement::set_resource_scope][crate::Statement::set_resource_scope] combines new scopes with the existing
/// ones.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ScopeMode {
    /// Discard the current scopes and install the new set.
    Replace,

    /// Union the new scopes into the current set.
    Append,
}

impl Default for ScopeMode {
    fn default() -> Self {
        Self::Replace
    }
}
