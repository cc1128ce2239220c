use crate::{condop, ConditionKeyDef, Operator, ValueKind};

/// The global `aws:` condition keys every service accepts.
pub static GLOBAL_CONDITION_KEYS: &[ConditionKeyDef] = &[
    ConditionKeyDef::new("aws:CalledVia", ValueKind::String)
        .with_operator(Operator::for_any_value(condop::StringEquals)),
    ConditionKeyDef::new("aws:CalledViaFirst", ValueKind::String),
    ConditionKeyDef::new("aws:CalledViaLast", ValueKind::String),
    ConditionKeyDef::new("aws:CurrentTime", ValueKind::Date).with_operator(Operator::new(condop::DateLessThanEquals)),
    ConditionKeyDef::new("aws:EpochTime", ValueKind::Date).with_operator(Operator::new(condop::DateLessThanEquals)),
    ConditionKeyDef::new("aws:MultiFactorAuthAge", ValueKind::Numeric)
        .with_operator(Operator::new(condop::NumericLessThan)),
    ConditionKeyDef::new("aws:MultiFactorAuthPresent", ValueKind::Bool),
    ConditionKeyDef::new("aws:PrincipalAccount", ValueKind::String),
    ConditionKeyDef::new("aws:PrincipalArn", ValueKind::Arn),
    ConditionKeyDef::new("aws:PrincipalOrgID", ValueKind::String),
    ConditionKeyDef::new("aws:PrincipalOrgPaths", ValueKind::String),
    ConditionKeyDef::new("aws:PrincipalTag/${TagKey}", ValueKind::String),
    ConditionKeyDef::new("aws:PrincipalType", ValueKind::String),
    ConditionKeyDef::new("aws:Referer", ValueKind::String),
    ConditionKeyDef::new("aws:RequestedRegion", ValueKind::String),
    ConditionKeyDef::new("aws:RequestTag/${TagKey}", ValueKind::String),
    ConditionKeyDef::new("aws:ResourceTag/${TagKey}", ValueKind::String),
    ConditionKeyDef::new("aws:SecureTransport", ValueKind::Bool),
    ConditionKeyDef::new("aws:SourceAccount", ValueKind::String),
    ConditionKeyDef::new("aws:SourceArn", ValueKind::Arn),
    ConditionKeyDef::new("aws:SourceIp", ValueKind::IpAddress),
    ConditionKeyDef::new("aws:SourceVpc", ValueKind::String),
    ConditionKeyDef::new("aws:SourceVpce", ValueKind::String),
    ConditionKeyDef::new("aws:TagKeys", ValueKind::String),
    ConditionKeyDef::new("aws:TokenIssueTime", ValueKind::Date)
        .with_operator(Operator::new(condop::DateGreaterThanEquals)),
    ConditionKeyDef::new("aws:UserAgent", ValueKind::String),
    ConditionKeyDef::new("aws:userid", ValueKind::String),
    ConditionKeyDef::new("aws:username", ValueKind::String),
    ConditionKeyDef::new("aws:ViaAWSService", ValueKind::Bool),
    ConditionKeyDef::new("aws:VpcSourceIp", ValueKind::IpAddress),
];

/// Find the global key definition matching `key`, including parameterized tag keys.
pub fn global_condition_key(key: &str) -> Option<&'static ConditionKeyDef> {
    GLOBAL_CONDITION_KEYS.iter().find(|def| def.matches(key))
}
