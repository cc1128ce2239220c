#![warn(clippy::all)]

//! Assemble AWS IAM policy statements from declarative per-service tables.
//!
//! A [Statement] accumulates actions, resource scopes and condition clauses and renders them in the policy grammar.
//! [ServiceStatement] layers a [ServiceTable] over it so that action names, resource types (with their ARN templates)
//! and condition keys are checked against the service's declarations. [Policy] composes statements into a document.

pub(crate) mod access_level;
pub(crate) mod action;
pub(crate) mod arn;
pub(crate) mod catalogue;
pub(crate) mod condition;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod global;
pub(crate) mod policy;
pub(crate) mod resource;
pub(crate) mod service;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    access_level::{AccessLevel, AccessLevelIndex},
    action::Action,
    arn::{resolve as resolve_arn, ArnDefaults, ArnDefaultsBuilder, ArnDefaultsBuilderError, ArnTemplate, ArnValues},
    catalogue::{
        ActionDef, ActionResourceDef, Catalogue, ConditionKeyDef, ResourceTypeDef, ServiceCatalogue, ServiceTable,
    },
    condition::{
        build_clause, op::names as condop, ArnCmp, Condition, ConditionClause, ConditionMap, ConditionOp,
        ConditionValue, Operator, OrderedCmp, Quantifier, StringCmp, ValueKind, Variant,
    },
    effect::Effect,
    error::GrantError,
    global::{global_condition_key, GLOBAL_CONDITION_KEYS},
    policy::{Policy, PolicyBuilder, PolicyBuilderError, PolicyVersion},
    resource::{Resource, ScopeMode},
    serutil::StringList,
    service::ServiceStatement,
    statement::{Statement, StatementDocument},
};
