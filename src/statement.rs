use {
    crate::{display_json, serutil::StringList, Action, Condition, ConditionClause, Effect, GrantError, Resource, ScopeMode},
    log::{trace, warn},
    serde::{
        ser::{SerializeMap, Serializer},
        Serialize,
    },
    std::str::FromStr,
};

/// An access-control statement under construction.
///
/// Actions and resources keep their insertion order and hold no duplicates. Conditions are keyed by (operator, key);
/// adding a clause for a pair that is already present replaces its values.
///
/// Every mutator either applies its whole effect or, on error, leaves the statement untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Statement {
    sid: Option<String>,
    effect: Effect,
    actions: Vec<Action>,
    resources: Vec<Resource>,
    condition: Condition,
    not_action: bool,
    not_resource: bool,
}

impl Statement {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `action` as `service:ActionName` and add it to the action set.
    ///
    /// # Errors
    ///
    /// [GrantError::InvalidActionFormat] if `action` is not a well-formed qualified action.
    pub fn add_action(&mut self, action: &str) -> Result<&mut Self, GrantError> {
        let action = Action::from_str(action)?;
        Ok(self.push_action(action))
    }

    /// Add an already-validated action. Adding an action that is already present does nothing.
    pub fn push_action(&mut self, action: Action) -> &mut Self {
        if !self.actions.contains(&action) {
            trace!("Adding action {}", action);
            self.actions.push(action);
        }
        self
    }

    pub fn add_actions<I: IntoIterator<Item = Action>>(&mut self, actions: I) -> &mut Self {
        for action in actions {
            self.push_action(action);
        }
        self
    }

    /// Install resource scopes. [ScopeMode::Replace] discards the current set first; [ScopeMode::Append] unions the
    /// new scopes into it.
    ///
    /// A wildcard is never dropped in favor of concrete ARNs or the other way around. A set holding both is logged.
    pub fn set_resource_scope<I: IntoIterator<Item = Resource>>(&mut self, scopes: I, mode: ScopeMode) -> &mut Self {
        if mode == ScopeMode::Replace {
            trace!("Replacing resource scopes {:?}", self.resources);
            self.resources.clear();
        }

        for scope in scopes {
            if !self.resources.contains(&scope) {
                self.resources.push(scope);
            }
        }

        if self.resources.len() > 1 && self.resources.iter().any(Resource::is_any) {
            warn!("Statement resource scope mixes \"*\" with concrete ARNs: {:?}", self.resources);
        }

        self
    }

    /// Parse `arn` and append it to the resource scopes.
    ///
    /// # Errors
    ///
    /// [GrantError::TemplateError] if `arn` is neither `*` nor a six-part ARN.
    pub fn add_resource(&mut self, arn: &str) -> Result<&mut Self, GrantError> {
        let resource = Resource::from_str(arn)?;
        Ok(self.set_resource_scope([resource], ScopeMode::Append))
    }

    /// Scope the statement to every resource, replacing any concrete ARNs.
    pub fn on_all_resources(&mut self) -> &mut Self {
        self.set_resource_scope([Resource::Any], ScopeMode::Replace)
    }

    /// Add a condition clause, replacing the values of an existing clause with the same key and operator.
    pub fn add_condition(&mut self, clause: ConditionClause) -> &mut Self {
        trace!("Adding condition {} {} {:?}", clause.operator(), clause.key(), clause.values());
        if let Some(previous) = self.condition.insert(clause) {
            trace!("Replaced condition values {:?}", previous);
        }
        self
    }

    #[inline]
    pub fn set_effect(&mut self, effect: Effect) -> &mut Self {
        self.effect = effect;
        self
    }

    #[inline]
    pub fn allow(&mut self) -> &mut Self {
        self.set_effect(Effect::Allow)
    }

    #[inline]
    pub fn deny(&mut self) -> &mut Self {
        self.set_effect(Effect::Deny)
    }

    pub fn set_sid<S: Into<String>>(&mut self, sid: S) -> &mut Self {
        self.sid = Some(sid.into());
        self
    }

    pub fn clear_sid(&mut self) -> &mut Self {
        self.sid = None;
        self
    }

    /// Render the action set as `NotAction` instead of `Action`.
    #[inline]
    pub fn set_not_action(&mut self, not_action: bool) -> &mut Self {
        self.not_action = not_action;
        self
    }

    /// Render the resource scopes as `NotResource` instead of `Resource`.
    #[inline]
    pub fn set_not_resource(&mut self, not_resource: bool) -> &mut Self {
        self.not_resource = not_resource;
        self
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[inline]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    #[inline]
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    #[inline]
    pub fn is_not_action(&self) -> bool {
        self.not_action
    }

    #[inline]
    pub fn is_not_resource(&self) -> bool {
        self.not_resource
    }

    pub fn has_action(&self, action: &Action) -> bool {
        self.actions.contains(action)
    }

    /// Whether this statement and `other` are identical apart from their action sets.
    pub(crate) fn same_scope(&self, other: &Self) -> bool {
        self.sid == other.sid
            && self.effect == other.effect
            && self.not_action == other.not_action
            && self.not_resource == other.not_resource
            && self.resources == other.resources
            && self.condition == other.condition
    }

    /// Produce the declarative form of the statement. The statement itself is not modified.
    pub fn to_document(&self) -> StatementDocument {
        let resource = if self.resources.is_empty() || self.resources == [Resource::Any] {
            StringList::Single("*".to_string())
        } else {
            StringList::List(self.resources.iter().map(Resource::to_string).collect())
        };

        StatementDocument {
            sid: self.sid.clone(),
            effect: self.effect,
            not_action: self.not_action,
            action: self.actions.iter().map(Action::to_string).collect(),
            not_resource: self.not_resource,
            resource,
            condition: if self.condition.is_empty() {
                None
            } else {
                Some(self.condition.clone())
            },
        }
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

display_json!(Statement);

/// The rendered form of a [Statement]:
/// `{"Sid"?, "Effect", "Action" | "NotAction", "Resource" | "NotResource", "Condition"?}`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatementDocument {
    sid: Option<String>,
    effect: Effect,
    not_action: bool,
    action: Vec<String>,
    not_resource: bool,
    resource: StringList,
    condition: Option<Condition>,
}

impl StatementDocument {
    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    #[inline]
    pub fn action(&self) -> &[String] {
        &self.action
    }

    #[inline]
    pub fn resource(&self) -> &StringList {
        &self.resource
    }

    #[inline]
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }
}

impl From<&Statement> for StatementDocument {
    fn from(statement: &Statement) -> Self {
        statement.to_document()
    }
}

impl Serialize for StatementDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_map(None)?;
        if let Some(sid) = &self.sid {
            state.serialize_entry("Sid", sid)?;
        }
        state.serialize_entry("Effect", &self.effect)?;
        state.serialize_entry(if self.not_action { "NotAction" } else { "Action" }, &self.action)?;
        state.serialize_entry(if self.not_resource { "NotResource" } else { "Resource" }, &self.resource)?;
        if let Some(condition) = &self.condition {
            state.serialize_entry("Condition", condition)?;
        }
        state.end()
    }
}

display_json!(StatementDocument);
