use {
    crate::{
        AccessLevel, Action, ArnDefaults, ArnValues, ConditionClause, ConditionValue, Effect, GrantError, Operator,
        Resource, ScopeMode, ServiceCatalogue, Statement, StatementDocument,
    },
    chrono::{DateTime, Utc},
    log::{debug, trace},
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// A statement builder bound to one service's catalogue.
///
/// This is the single data-driven stand-in for a per-service builder: action names, resource types and condition keys
/// are checked against the [ServiceCatalogue] before they reach the underlying [Statement].
///
/// ```
/// # use scratchstack_grant::*;
/// static SNS: ServiceTable = ServiceTable {
///     prefix: "sns",
///     actions: &[ActionDef {
///         name: "Publish",
///         access_level: AccessLevel::Write,
///         resource_types: &[ActionResourceDef { name: "topic", required: true, condition_keys: &[] }],
///         condition_keys: &[],
///     }],
///     resource_types: &[ResourceTypeDef {
///         name: "topic",
///         arn: "arn:${Partition}:sns:${Region}:${Account}:${TopicName}",
///         condition_keys: &[],
///     }],
///     condition_keys: &[],
/// };
///
/// let catalogue = Catalogue::load([&SNS]).unwrap();
/// let mut statement = catalogue.statement("sns").unwrap();
/// statement.to("Publish").unwrap().on("topic", &ArnValues::new().with("TopicName", "alerts")).unwrap();
/// assert_eq!(
///     serde_json::to_string(&statement).unwrap(),
///     r#"{"Effect":"Allow","Action":["sns:Publish"],"Resource":["arn:aws:sns:*:*:alerts"]}"#
/// );
/// ```
#[derive(Clone, Debug)]
pub struct ServiceStatement<'a> {
    service: &'a ServiceCatalogue,
    defaults: ArnDefaults,
    statement: Statement,
}

impl<'a> ServiceStatement<'a> {
    pub fn new(service: &'a ServiceCatalogue) -> Self {
        Self {
            service,
            defaults: ArnDefaults::default(),
            statement: Statement::new(),
        }
    }

    /// Use `defaults` for placeholders that [ServiceStatement::on] is not given.
    pub fn with_defaults(mut self, defaults: ArnDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[inline]
    pub fn service(&self) -> &'a ServiceCatalogue {
        self.service
    }

    #[inline]
    pub fn defaults(&self) -> &ArnDefaults {
        &self.defaults
    }

    /// Add the named action of this service.
    ///
    /// # Errors
    ///
    /// [GrantError::UnknownAction] if the catalogue does not list `action`.
    pub fn to(&mut self, action: &str) -> Result<&mut Self, GrantError> {
        if self.service.action(action).is_none() {
            debug!("Service {} has no action {}", self.service.prefix(), action);
            return Err(GrantError::UnknownAction(format!("{}:{}", self.service.prefix(), action)));
        }

        self.statement.push_action(Action::new(self.service.prefix(), action)?);
        Ok(self)
    }

    /// Add every action of this service.
    pub fn all_actions(&mut self) -> &mut Self {
        self.statement.add_actions(self.service.action_refs().iter().cloned());
        self
    }

    /// Add every action at `level`.
    pub fn all_actions_of_level(&mut self, level: AccessLevel) -> &mut Self {
        self.statement.add_actions(self.service.actions_for_level(level).iter().cloned());
        self
    }

    #[inline]
    pub fn all_list_actions(&mut self) -> &mut Self {
        self.all_actions_of_level(AccessLevel::List)
    }

    #[inline]
    pub fn all_read_actions(&mut self) -> &mut Self {
        self.all_actions_of_level(AccessLevel::Read)
    }

    #[inline]
    pub fn all_write_actions(&mut self) -> &mut Self {
        self.all_actions_of_level(AccessLevel::Write)
    }

    #[inline]
    pub fn all_permission_management_actions(&mut self) -> &mut Self {
        self.all_actions_of_level(AccessLevel::PermissionsManagement)
    }

    #[inline]
    pub fn all_tagging_actions(&mut self) -> &mut Self {
        self.all_actions_of_level(AccessLevel::Tagging)
    }

    /// Add every action whose name matches a `*`/`?` glob. The actions are expanded individually rather than added as
    /// a wildcard.
    pub fn all_matching_actions(&mut self, pattern: &str) -> &mut Self {
        let matched: Vec<Action> =
            self.service.matching_actions(pattern).iter().filter_map(|def| self.action_ref(def.name)).collect();
        trace!("Pattern {} matched {} actions of {}", pattern, matched.len(), self.service.prefix());
        self.statement.add_actions(matched);
        self
    }

    fn action_ref(&self, name: &str) -> Option<Action> {
        self.service.action_refs().iter().find(|action| action.action() == name).cloned()
    }

    /// Scope the statement to a resource of `resource_type`, resolving its ARN template with `values` and this
    /// statement's defaults. Repeated calls accumulate resources.
    ///
    /// # Errors
    ///
    /// * [GrantError::UnknownResourceType] if the catalogue has no such resource type.
    /// * [GrantError::MissingPlaceholder] if `values` lacks a resource-specific placeholder.
    pub fn on(&mut self, resource_type: &str, values: &ArnValues) -> Result<&mut Self, GrantError> {
        let template = self.service.arn_template(resource_type).ok_or_else(|| {
            debug!("Service {} has no resource type {}", self.service.prefix(), resource_type);
            GrantError::UnknownResourceType(format!("{}:{}", self.service.prefix(), resource_type))
        })?;

        let arn = template.resolve(values, &self.defaults)?;
        let resource = Resource::from_str(&arn)?;
        self.statement.set_resource_scope([resource], ScopeMode::Append);
        Ok(self)
    }

    /// Scope the statement to an already-formed ARN.
    pub fn on_arn(&mut self, arn: &str) -> Result<&mut Self, GrantError> {
        self.statement.add_resource(arn)?;
        Ok(self)
    }

    pub fn on_all_resources(&mut self) -> &mut Self {
        self.statement.on_all_resources();
        self
    }

    /// The service-qualified form of a condition key: keys without a `:` get this service's prefix.
    pub fn qualify_key(&self, key: &str) -> String {
        if key.contains(':') {
            key.to_string()
        } else {
            format!("{}:{}", self.service.prefix(), key)
        }
    }

    /// Add a condition on `key`, a key of this service or a global `aws:` key. The value kind and default operator
    /// come from the key's declaration.
    ///
    /// # Errors
    ///
    /// * [GrantError::UnknownConditionKey] if the key is not declared.
    /// * [GrantError::UnsupportedOperator] if `operator` is unknown or does not apply to the key's kind.
    /// * [GrantError::InvalidCondition] if `values` is empty.
    pub fn if_key<I, V>(&mut self, key: &str, values: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        let operator = match operator {
            Some(name) => Some(Operator::from_str(name)?),
            None => None,
        };
        self.if_key_with(key, values, operator)
    }

    /// Like [ServiceStatement::if_key] with an already-typed operator.
    pub fn if_key_with<I, V>(&mut self, key: &str, values: I, operator: Option<Operator>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        let key = self.qualify_key(key);
        let def = self.service.condition_key(&key).ok_or_else(|| {
            debug!("Service {} does not declare condition key {}", self.service.prefix(), key);
            GrantError::UnknownConditionKey(key.clone())
        })?;

        let operator = operator.unwrap_or_else(|| def.operator());
        let clause = ConditionClause::for_kind(key, def.kind, operator, values)?;
        self.statement.add_condition(clause);
        Ok(self)
    }

    /// Condition on a boolean key. `None` means `true`.
    pub fn if_bool(&mut self, key: &str, value: Option<bool>) -> Result<&mut Self, GrantError> {
        self.if_key(key, [value.unwrap_or(true)], None)
    }

    pub fn if_aws_called_via<I, V>(&mut self, services: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key("aws:CalledVia", services, operator)
    }

    pub fn if_aws_current_time(&mut self, time: DateTime<Utc>, operator: Option<&str>) -> Result<&mut Self, GrantError> {
        self.if_key("aws:CurrentTime", [time], operator)
    }

    pub fn if_aws_epoch_time(&mut self, seconds: i64, operator: Option<&str>) -> Result<&mut Self, GrantError> {
        self.if_key("aws:EpochTime", [seconds], operator)
    }

    pub fn if_aws_multi_factor_auth_age(&mut self, seconds: u64, operator: Option<&str>) -> Result<&mut Self, GrantError> {
        self.if_key("aws:MultiFactorAuthAge", [seconds], operator)
    }

    pub fn if_aws_multi_factor_auth_present(&mut self, value: Option<bool>) -> Result<&mut Self, GrantError> {
        self.if_bool("aws:MultiFactorAuthPresent", value)
    }

    pub fn if_aws_secure_transport(&mut self, value: Option<bool>) -> Result<&mut Self, GrantError> {
        self.if_bool("aws:SecureTransport", value)
    }

    pub fn if_aws_via_aws_service(&mut self, value: Option<bool>) -> Result<&mut Self, GrantError> {
        self.if_bool("aws:ViaAWSService", value)
    }

    pub fn if_aws_principal_arn<I, V>(&mut self, arns: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key("aws:PrincipalArn", arns, operator)
    }

    pub fn if_aws_source_arn<I, V>(&mut self, arns: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key("aws:SourceArn", arns, operator)
    }

    pub fn if_aws_source_ip<I, V>(&mut self, networks: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key("aws:SourceIp", networks, operator)
    }

    pub fn if_aws_requested_region<I, V>(&mut self, regions: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key("aws:RequestedRegion", regions, operator)
    }

    pub fn if_aws_principal_tag<I, V>(&mut self, tag: &str, values: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key(&format!("aws:PrincipalTag/{}", tag), values, operator)
    }

    pub fn if_aws_request_tag<I, V>(&mut self, tag: &str, values: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key(&format!("aws:RequestTag/{}", tag), values, operator)
    }

    pub fn if_aws_resource_tag<I, V>(&mut self, tag: &str, values: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key(&format!("aws:ResourceTag/{}", tag), values, operator)
    }

    pub fn if_aws_tag_keys<I, V>(&mut self, keys: I, operator: Option<&str>) -> Result<&mut Self, GrantError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        self.if_key("aws:TagKeys", keys, operator)
    }

    /// The condition keys that apply to `action` of this service.
    pub fn condition_keys_for(&self, action: &str) -> Result<Vec<&'static str>, GrantError> {
        self.service.condition_keys_for(action)
    }

    #[inline]
    pub fn set_effect(&mut self, effect: Effect) -> &mut Self {
        self.statement.set_effect(effect);
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
        self.statement.set_sid(sid);
        self
    }

    /// Render the actions as `NotAction`.
    pub fn not_action(&mut self) -> &mut Self {
        self.statement.set_not_action(true);
        self
    }

    /// Render the resources as `NotResource`.
    pub fn not_resource(&mut self) -> &mut Self {
        self.statement.set_not_resource(true);
        self
    }

    #[inline]
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    #[inline]
    pub fn statement_mut(&mut self) -> &mut Statement {
        &mut self.statement
    }

    #[inline]
    pub fn into_statement(self) -> Statement {
        self.statement
    }

    #[inline]
    pub fn to_document(&self) -> StatementDocument {
        self.statement.to_document()
    }
}

impl Serialize for ServiceStatement<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.statement.serialize(serializer)
    }
}

impl Display for ServiceStatement<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.statement, f)
    }
}

impl From<ServiceStatement<'_>> for Statement {
    fn from(statement: ServiceStatement<'_>) -> Self {
        statement.into_statement()
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            AccessLevel, ActionDef, ActionResourceDef, ArnDefaults, ArnValues, Catalogue, ConditionKeyDef, GrantError,
            ResourceTypeDef, ServiceTable, Statement, ValueKind,
        },
        chrono::{TimeZone, Utc},
        indoc::indoc,
        pretty_assertions::assert_eq,
    };

    const TOPIC: ActionResourceDef = ActionResourceDef {
        name: "topic",
        required: true,
        condition_keys: &[],
    };

    static SNS: ServiceTable = ServiceTable {
        prefix: "sns",
        actions: &[
            ActionDef {
                name: "AddPermission",
                access_level: AccessLevel::PermissionsManagement,
                resource_types: &[TOPIC],
                condition_keys: &[],
            },
            ActionDef {
                name: "GetTopicAttributes",
                access_level: AccessLevel::Read,
                resource_types: &[TOPIC],
                condition_keys: &[],
            },
            ActionDef {
                name: "ListTopics",
                access_level: AccessLevel::List,
                resource_types: &[],
                condition_keys: &[],
            },
            ActionDef {
                name: "Publish",
                access_level: AccessLevel::Write,
                resource_types: &[TOPIC],
                condition_keys: &[],
            },
            ActionDef {
                name: "Subscribe",
                access_level: AccessLevel::Write,
                resource_types: &[TOPIC],
                condition_keys: &["sns:Endpoint", "sns:Protocol"],
            },
            ActionDef {
                name: "TagResource",
                access_level: AccessLevel::Tagging,
                resource_types: &[ActionResourceDef {
                    name: "topic",
                    required: false,
                    condition_keys: &[],
                }],
                condition_keys: &["aws:RequestTag/${TagKey}", "aws:TagKeys"],
            },
        ],
        resource_types: &[ResourceTypeDef {
            name: "topic",
            arn: "arn:${Partition}:sns:${Region}:${Account}:${TopicName}",
            condition_keys: &[],
        }],
        condition_keys: &[
            ConditionKeyDef::new("sns:Endpoint", ValueKind::String),
            ConditionKeyDef::new("sns:Protocol", ValueKind::String),
        ],
    };

    fn catalogue() -> Catalogue {
        Catalogue::load([&SNS]).unwrap()
    }

    #[test_log::test]
    fn test_actions_and_resources() {
        let catalogue = catalogue();
        let mut statement = catalogue.statement("sns").unwrap();
        statement
            .to("Publish")
            .unwrap()
            .to("Publish")
            .unwrap()
            .on("topic", &ArnValues::new().with("TopicName", "alerts"))
            .unwrap()
            .on("topic", &ArnValues::new().with("TopicName", "audit").region("us-east-1").account("123456789012"))
            .unwrap();

        assert_eq!(
            statement.to_string(),
            indoc! {r#"
            {
                "Effect": "Allow",
                "Action": [
                    "sns:Publish"
                ],
                "Resource": [
                    "arn:aws:sns:*:*:alerts",
                    "arn:aws:sns:us-east-1:123456789012:audit"
                ]
            }"#}
        );
    }

    #[test_log::test]
    fn test_unknown_names_leave_statement_untouched() {
        let catalogue = catalogue();
        let mut statement = catalogue.statement("sns").unwrap();
        statement.to("Publish").unwrap();
        let before = statement.statement().clone();

        assert_eq!(statement.to("Frobnicate").unwrap_err(), GrantError::UnknownAction("sns:Frobnicate".to_string()));
        assert_eq!(
            statement.on("queue", &ArnValues::new()).unwrap_err(),
            GrantError::UnknownResourceType("sns:queue".to_string())
        );
        assert_eq!(
            statement.on("topic", &ArnValues::new()).unwrap_err(),
            GrantError::MissingPlaceholder {
                template: "arn:${Partition}:sns:${Region}:${Account}:${TopicName}".to_string(),
                placeholder: "TopicName".to_string(),
            }
        );
        assert_eq!(
            statement.if_key("Colour", ["blue"], None).unwrap_err(),
            GrantError::UnknownConditionKey("sns:Colour".to_string())
        );
        assert_eq!(
            statement.if_key("Protocol", Vec::<String>::new(), None).unwrap_err(),
            GrantError::InvalidCondition("sns:Protocol".to_string())
        );
        assert_eq!(
            statement.if_key("aws:SourceIp", ["10.0.0.0/8"], Some("StringLike")).unwrap_err(),
            GrantError::UnsupportedOperator("StringLike for IPAddress key aws:SourceIp".to_string())
        );
        assert_eq!(statement.statement(), &before);
    }

    #[test_log::test]
    fn test_bulk_selection() {
        let catalogue = catalogue();

        let mut statement = catalogue.statement("sns").unwrap();
        statement.all_write_actions();
        let names: Vec<String> = statement.statement().actions().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["sns:Publish", "sns:Subscribe"]);

        statement.all_matching_actions("*topic*");
        let names: Vec<String> = statement.statement().actions().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["sns:Publish", "sns:Subscribe", "sns:GetTopicAttributes", "sns:ListTopics"]);

        let mut statement = catalogue.statement("sns").unwrap();
        statement.all_actions();
        assert_eq!(statement.statement().actions().len(), 6);

        let mut statement = catalogue.statement("sns").unwrap();
        statement.all_list_actions().all_read_actions().all_permission_management_actions().all_tagging_actions();
        let names: Vec<String> = statement.statement().actions().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["sns:ListTopics", "sns:GetTopicAttributes", "sns:AddPermission", "sns:TagResource"]);
    }

    #[test_log::test]
    fn test_conditions() {
        let catalogue = catalogue();
        let mut statement = catalogue.statement("sns").unwrap();
        statement
            .to("Subscribe")
            .unwrap()
            .if_key("Protocol", ["https"], None)
            .unwrap()
            .if_key("sns:Endpoint", ["https://example.com/*", "https://example.org/*"], None)
            .unwrap()
            .if_aws_secure_transport(None)
            .unwrap()
            .if_aws_called_via(["cloudformation.amazonaws.com"], None)
            .unwrap()
            .if_aws_current_time(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(), None)
            .unwrap()
            .if_aws_multi_factor_auth_age(3600, None)
            .unwrap()
            .if_aws_resource_tag("Team", ["infra"], Some("StringEquals"))
            .unwrap();

        assert_eq!(
            statement.to_string(),
            indoc! {r#"
            {
                "Effect": "Allow",
                "Action": [
                    "sns:Subscribe"
                ],
                "Resource": "*",
                "Condition": {
                    "Bool": {
                        "aws:SecureTransport": "true"
                    },
                    "DateLessThanEquals": {
                        "aws:CurrentTime": "2030-01-01T00:00:00.000Z"
                    },
                    "NumericLessThan": {
                        "aws:MultiFactorAuthAge": "3600"
                    },
                    "StringEquals": {
                        "aws:ResourceTag/Team": "infra"
                    },
                    "StringLike": {
                        "sns:Endpoint": [
                            "https://example.com/*",
                            "https://example.org/*"
                        ],
                        "sns:Protocol": "https"
                    },
                    "ForAnyValue:StringEquals": {
                        "aws:CalledVia": "cloudformation.amazonaws.com"
                    }
                }
            }"#}
        );
    }

    #[test_log::test]
    fn test_misc_global_helpers() {
        let catalogue = catalogue();
        let mut statement = catalogue.statement("sns").unwrap();
        statement
            .to("TagResource")
            .unwrap()
            .if_aws_multi_factor_auth_present(Some(false))
            .unwrap()
            .if_aws_via_aws_service(None)
            .unwrap()
            .if_aws_epoch_time(1_700_000_000, Some("NumericGreaterThan"))
            .unwrap()
            .if_aws_principal_arn(["arn:aws:iam::123456789012:role/*"], None)
            .unwrap()
            .if_aws_source_arn(["arn:aws:s3:::bucket"], Some("ArnEquals"))
            .unwrap()
            .if_aws_source_ip(["192.0.2.0/24"], None)
            .unwrap()
            .if_aws_requested_region(["us-east-1", "eu-west-1"], Some("StringEquals"))
            .unwrap()
            .if_aws_principal_tag("Dept", ["eng"], None)
            .unwrap()
            .if_aws_request_tag("Owner", ["${aws:username}"], None)
            .unwrap()
            .if_aws_tag_keys(["Owner", "Dept"], Some("ForAllValues:StringEquals"))
            .unwrap();

        let condition = statement.statement().condition();
        assert_eq!(condition.len(), 10);
        let rendered: Vec<String> = condition.clauses().map(|(op, key, _)| format!("{} {}", op, key)).collect();
        assert_eq!(
            rendered,
            vec![
                "ArnEquals aws:SourceArn",
                "ArnLike aws:PrincipalArn",
                "Bool aws:MultiFactorAuthPresent",
                "Bool aws:ViaAWSService",
                "IpAddress aws:SourceIp",
                "NumericGreaterThan aws:EpochTime",
                "StringEquals aws:RequestedRegion",
                "StringLike aws:PrincipalTag/Dept",
                "StringLike aws:RequestTag/Owner",
                "ForAllValues:StringEquals aws:TagKeys",
            ]
        );
    }

    #[test_log::test]
    fn test_effect_sid_and_inversion() {
        let catalogue = catalogue().with_defaults(ArnDefaults::builder().region("eu-west-1").build().unwrap());
        let mut statement = catalogue.statement("sns").unwrap();
        statement
            .set_sid("NoTopicAdmin")
            .deny()
            .to("AddPermission")
            .unwrap()
            .on("topic", &ArnValues::new().with("TopicName", "billing"))
            .unwrap()
            .not_resource();

        assert_eq!(statement.defaults().region(), "eu-west-1");
        assert_eq!(
            serde_json::to_string(&statement).unwrap(),
            r#"{"Sid":"NoTopicAdmin","Effect":"Deny","Action":["sns:AddPermission"],"NotResource":["arn:aws:sns:eu-west-1:*:billing"]}"#
        );

        statement.allow().not_action().on_all_resources();
        let statement: Statement = statement.into();
        assert_eq!(
            serde_json::to_string(&statement).unwrap(),
            r#"{"Sid":"NoTopicAdmin","Effect":"Allow","NotAction":["sns:AddPermission"],"NotResource":"*"}"#
        );
    }

    #[test_log::test]
    fn test_condition_keys_for() {
        let catalogue = catalogue();
        let statement = catalogue.statement("sns").unwrap();
        assert_eq!(statement.condition_keys_for("Subscribe").unwrap(), vec!["sns:Endpoint", "sns:Protocol"]);
        assert_eq!(
            statement.condition_keys_for("TagResource").unwrap(),
            vec!["aws:RequestTag/${TagKey}", "aws:TagKeys"]
        );
        assert_eq!(statement.qualify_key("Protocol"), "sns:Protocol");
        assert_eq!(statement.qualify_key("aws:TagKeys"), "aws:TagKeys");
    }
}
