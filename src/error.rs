use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GrantError {
    /// An action identifier is not of the form `service:ActionName`.
    InvalidActionFormat(String),

    /// An ARN template requires a placeholder the caller did not supply.
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    /// An ARN template in the static data is malformed.
    TemplateError(String),

    /// A condition clause was given no values.
    InvalidCondition(String),

    /// A condition operator is unknown or does not apply to the key's value kind.
    UnsupportedOperator(String),

    /// The static service table contradicts itself.
    CatalogueInconsistency(String),

    UnknownService(String),
    UnknownAction(String),
    UnknownResourceType(String),
    UnknownConditionKey(String),

    /// Two statements in one policy share a Sid.
    DuplicateSid(String),

    InvalidPolicyVersion(String),
}

impl Display for GrantError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidActionFormat(action) => write!(f, "Invalid action format: {}", action),
            Self::MissingPlaceholder {
                template,
                placeholder,
            } => write!(f, "Missing value for placeholder {} in ARN template {}", placeholder, template),
            Self::TemplateError(template) => write!(f, "Malformed ARN template: {}", template),
            Self::InvalidCondition(key) => write!(f, "Invalid condition: {}", key),
            Self::UnsupportedOperator(operator) => write!(f, "Unsupported condition operator: {}", operator),
            Self::CatalogueInconsistency(detail) => write!(f, "Catalogue inconsistency: {}", detail),
            Self::UnknownService(prefix) => write!(f, "Unknown service: {}", prefix),
            Self::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            Self::UnknownResourceType(resource_type) => write!(f, "Unknown resource type: {}", resource_type),
            Self::UnknownConditionKey(key) => write!(f, "Unknown condition key: {}", key),
            Self::DuplicateSid(sid) => write!(f, "Duplicate statement id: {}", sid),
            Self::InvalidPolicyVersion(version) => write!(f, "Invalid policy version: {}", version),
        }
    }
}

impl Error for GrantError {}
