use {
    crate::{
        action::action_glob, global::global_condition_key, AccessLevel, AccessLevelIndex, Action, ArnDefaults,
        ArnTemplate, GrantError, Operator, ServiceStatement, Statement, ValueKind,
    },
    log::{debug, trace},
    std::collections::{BTreeMap, BTreeSet, HashMap, HashSet},
};

/// A condition key declared by a service, or one of the global `aws:` keys.
///
/// Keys ending in `/${Name}` are parameterized; `aws:ResourceTag/${TagKey}` matches `aws:ResourceTag/Team`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConditionKeyDef {
    pub key: &'static str,
    pub kind: ValueKind,

    /// Overrides the kind's default operator.
    pub default_operator: Option<Operator>,
}

impl ConditionKeyDef {
    pub const fn new(key: &'static str, kind: ValueKind) -> Self {
        Self {
            key,
            kind,
            default_operator: None,
        }
    }

    pub const fn with_operator(self, operator: Operator) -> Self {
        Self {
            default_operator: Some(operator),
            ..self
        }
    }

    /// The operator used when the caller does not name one.
    pub fn operator(&self) -> Operator {
        self.default_operator.unwrap_or_else(|| Operator::new(self.kind.default_operator()))
    }

    /// The fixed part of a parameterized key, up to and including the `/`.
    fn parameter_prefix(&self) -> Option<&'static str> {
        let start = self.key.find("/${")?;
        if self.key.ends_with('}') {
            Some(&self.key[..=start])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_parameterized(&self) -> bool {
        self.parameter_prefix().is_some()
    }

    pub fn matches(&self, key: &str) -> bool {
        match self.parameter_prefix() {
            Some(prefix) => key.len() > prefix.len() && key.starts_with(prefix),
            None => key == self.key,
        }
    }
}

/// A resource type an action can be scoped to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionResourceDef {
    pub name: &'static str,
    pub required: bool,
    pub condition_keys: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ActionDef {
    pub name: &'static str,
    pub access_level: AccessLevel,
    pub resource_types: &'static [ActionResourceDef],
    pub condition_keys: &'static [&'static str],
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ResourceTypeDef {
    pub name: &'static str,
    pub arn: &'static str,
    pub condition_keys: &'static [&'static str],
}

/// The declarative description of one service: its actions, resource types and condition keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ServiceTable {
    pub prefix: &'static str,
    pub actions: &'static [ActionDef],
    pub resource_types: &'static [ResourceTypeDef],
    pub condition_keys: &'static [ConditionKeyDef],
}

/// A [ServiceTable] that has passed the load-time consistency checks, with its derived indexes.
#[derive(Clone, Debug)]
pub struct ServiceCatalogue {
    table: &'static ServiceTable,
    access_levels: AccessLevelIndex,
    actions: HashMap<&'static str, &'static ActionDef>,
    action_refs: Vec<Action>,
    arn_templates: HashMap<&'static str, ArnTemplate>,
}

impl ServiceCatalogue {
    /// Validate `table` and build its indexes.
    ///
    /// # Errors
    ///
    /// * [GrantError::CatalogueInconsistency] if the prefix is malformed, an action or resource type is listed twice,
    ///   an action refers to an undeclared resource type, or a condition key is referenced without being declared.
    /// * [GrantError::TemplateError] if a resource type's ARN template is malformed.
    pub fn load(table: &'static ServiceTable) -> Result<Self, GrantError> {
        let prefix = table.prefix;
        if Action::new(prefix, "Check").is_err() {
            debug!("Service table has a malformed prefix: {:?}", prefix);
            return Err(GrantError::CatalogueInconsistency(format!("malformed service prefix {:?}", prefix)));
        }

        let access_levels = AccessLevelIndex::build(prefix, table.actions.iter().map(|a| (a.name, a.access_level)))?;
        let action_refs = table.actions.iter().map(|a| Action::new(prefix, a.name)).collect::<Result<Vec<_>, _>>()?;

        let mut declared_keys = HashSet::new();
        for def in table.condition_keys {
            let (namespace, _) = def.key.split_once(':').unwrap_or(("", def.key));
            if namespace != prefix && namespace != "aws" {
                debug!("Service {} declares foreign condition key {}", prefix, def.key);
                return Err(GrantError::CatalogueInconsistency(format!("foreign condition key {}", def.key)));
            }
            if !declared_keys.insert(def.key) {
                debug!("Service {} declares condition key {} twice", prefix, def.key);
                return Err(GrantError::CatalogueInconsistency(format!("duplicate condition key {}", def.key)));
            }
        }

        let check_key = |key: &str, owner: &str| -> Result<(), GrantError> {
            if declared_keys.contains(key) || global_condition_key(key).is_some() {
                Ok(())
            } else {
                debug!("{} refers to undeclared condition key {}", owner, key);
                Err(GrantError::CatalogueInconsistency(format!("{} refers to undeclared condition key {}", owner, key)))
            }
        };

        let mut arn_templates = HashMap::with_capacity(table.resource_types.len());
        for resource_type in table.resource_types {
            let template = ArnTemplate::new(resource_type.arn)?;
            if arn_templates.insert(resource_type.name, template).is_some() {
                debug!("Service {} declares resource type {} twice", prefix, resource_type.name);
                return Err(GrantError::CatalogueInconsistency(format!(
                    "duplicate resource type {}:{}",
                    prefix, resource_type.name
                )));
            }
            for key in resource_type.condition_keys {
                check_key(key, &format!("resource type {}:{}", prefix, resource_type.name))?;
            }
        }

        let mut actions = HashMap::with_capacity(table.actions.len());
        for action in table.actions {
            let owner = format!("action {}:{}", prefix, action.name);
            for resource in action.resource_types {
                if !arn_templates.contains_key(resource.name) {
                    debug!("{} refers to undeclared resource type {}", owner, resource.name);
                    return Err(GrantError::CatalogueInconsistency(format!(
                        "{} refers to undeclared resource type {}",
                        owner, resource.name
                    )));
                }
                for key in resource.condition_keys {
                    check_key(key, &owner)?;
                }
            }
            for key in action.condition_keys {
                check_key(key, &owner)?;
            }
            actions.insert(action.name, action);
        }

        trace!("Loaded catalogue for {}: {} actions, {} resource types", prefix, actions.len(), arn_templates.len());

        Ok(Self {
            table,
            access_levels,
            actions,
            action_refs,
            arn_templates,
        })
    }

    #[inline]
    pub fn prefix(&self) -> &'static str {
        self.table.prefix
    }

    #[inline]
    pub fn table(&self) -> &'static ServiceTable {
        self.table
    }

    #[inline]
    pub fn access_levels(&self) -> &AccessLevelIndex {
        &self.access_levels
    }

    #[inline]
    pub fn action(&self, name: &str) -> Option<&'static ActionDef> {
        self.actions.get(name).copied()
    }

    /// Every action in table order.
    pub fn actions(&self) -> impl Iterator<Item = &'static ActionDef> {
        self.table.actions.iter()
    }

    /// Every action as a qualified [Action], in table order.
    #[inline]
    pub fn action_refs(&self) -> &[Action] {
        &self.action_refs
    }

    pub fn resource_type(&self, name: &str) -> Option<&'static ResourceTypeDef> {
        self.table.resource_types.iter().find(|rt| rt.name == name)
    }

    #[inline]
    pub fn arn_template(&self, resource_type: &str) -> Option<&ArnTemplate> {
        self.arn_templates.get(resource_type)
    }

    /// Look up a condition key among the service's own keys, then the global ones.
    pub fn condition_key(&self, key: &str) -> Option<&'static ConditionKeyDef> {
        self.table.condition_keys.iter().find(|def| def.matches(key)).or_else(|| global_condition_key(key))
    }

    #[inline]
    pub fn actions_for_level(&self, level: AccessLevel) -> &[Action] {
        self.access_levels.actions_for_level(level)
    }

    #[inline]
    pub fn level_for_action(&self, action: &Action) -> Option<AccessLevel> {
        self.access_levels.level_for_action(action)
    }

    /// Actions whose names match a `*`/`?` glob, case-insensitively, in table order.
    pub fn matching_actions(&self, pattern: &str) -> Vec<&'static ActionDef> {
        match action_glob(pattern) {
            Some(re) => self.table.actions.iter().filter(|action| re.is_match(action.name)).collect(),
            None => Vec::new(),
        }
    }

    /// The condition keys that apply to `action`: its own keys, then the keys of each resource type it can be scoped
    /// to. Duplicates are dropped.
    ///
    /// # Errors
    ///
    /// [GrantError::UnknownAction] if the service has no such action.
    pub fn condition_keys_for(&self, action: &str) -> Result<Vec<&'static str>, GrantError> {
        let def = self.action(action).ok_or_else(|| {
            debug!("Service {} has no action {}", self.prefix(), action);
            GrantError::UnknownAction(format!("{}:{}", self.prefix(), action))
        })?;

        let resource_keys = def.resource_types.iter().flat_map(|resource| {
            let declared = self.resource_type(resource.name).map(|rt| rt.condition_keys).unwrap_or(&[]);
            resource.condition_keys.iter().chain(declared.iter())
        });

        let mut result: Vec<&'static str> = Vec::new();
        for key in def.condition_keys.iter().chain(resource_keys) {
            if !result.contains(key) {
                result.push(*key);
            }
        }

        Ok(result)
    }
}

/// The loaded service catalogues, keyed by service prefix.
///
/// Read-only once loaded; a shared reference can serve any number of statements being built concurrently.
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    services: BTreeMap<&'static str, ServiceCatalogue>,
    defaults: ArnDefaults,
}

impl Catalogue {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every table, failing on the first inconsistent one.
    pub fn load<I: IntoIterator<Item = &'static ServiceTable>>(tables: I) -> Result<Self, GrantError> {
        let mut catalogue = Self::new();
        for table in tables {
            catalogue.register(table)?;
        }
        Ok(catalogue)
    }

    /// Load and add one service.
    ///
    /// # Errors
    ///
    /// Any [ServiceCatalogue::load] error, or [GrantError::CatalogueInconsistency] if the prefix is already
    /// registered.
    pub fn register(&mut self, table: &'static ServiceTable) -> Result<&ServiceCatalogue, GrantError> {
        if self.services.contains_key(table.prefix) {
            debug!("Service {} is already registered", table.prefix);
            return Err(GrantError::CatalogueInconsistency(format!("duplicate service {}", table.prefix)));
        }

        let service = ServiceCatalogue::load(table)?;
        Ok(self.services.entry(table.prefix).or_insert(service))
    }

    /// Replace the ARN defaults handed to new statements.
    pub fn with_defaults(mut self, defaults: ArnDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    #[inline]
    pub fn defaults(&self) -> &ArnDefaults {
        &self.defaults
    }

    #[inline]
    pub fn service(&self, prefix: &str) -> Option<&ServiceCatalogue> {
        self.services.get(prefix)
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceCatalogue> {
        self.services.values()
    }

    /// Start a statement for `prefix` using this catalogue's defaults.
    ///
    /// # Errors
    ///
    /// [GrantError::UnknownService] if no table is registered for `prefix`.
    pub fn statement(&self, prefix: &str) -> Result<ServiceStatement<'_>, GrantError> {
        match self.service(prefix) {
            Some(service) => Ok(ServiceStatement::new(service).with_defaults(self.defaults.clone())),
            None => {
                debug!("No catalogue registered for service {}", prefix);
                Err(GrantError::UnknownService(prefix.to_string()))
            }
        }
    }

    /// # Errors
    ///
    /// [GrantError::UnknownService] if no table is registered for `service`.
    pub fn actions_for_level(&self, service: &str, level: AccessLevel) -> Result<&[Action], GrantError> {
        self.service(service)
            .map(|catalogue| catalogue.actions_for_level(level))
            .ok_or_else(|| GrantError::UnknownService(service.to_string()))
    }

    /// # Errors
    ///
    /// * [GrantError::UnknownService] if no table is registered for the action's service.
    /// * [GrantError::UnknownAction] if the service has no such action.
    pub fn level_for_action(&self, action: &Action) -> Result<AccessLevel, GrantError> {
        let service =
            self.service(action.service()).ok_or_else(|| GrantError::UnknownService(action.service().to_string()))?;
        service.level_for_action(action).ok_or_else(|| GrantError::UnknownAction(action.to_string()))
    }

    /// The access levels `statement` grants across every registered service. Wildcard actions are expanded against
    /// the catalogue; actions of unregistered services are ignored. A `NotAction` statement grants the levels of every
    /// catalogued action its list does not cover.
    pub fn levels_granted(&self, statement: &Statement) -> BTreeSet<AccessLevel> {
        self.services
            .values()
            .flat_map(|service| {
                let index = service.access_levels();
                if statement.is_not_action() {
                    index.levels_excluding(statement.actions())
                } else {
                    index.levels_granted(statement.actions())
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{ActionDef, ActionResourceDef, Catalogue, ConditionKeyDef, ResourceTypeDef, ServiceCatalogue, ServiceTable},
        crate::{condop, AccessLevel, Action, GrantError, Operator, Statement, ValueKind},
        pretty_assertions::assert_eq,
        std::{collections::BTreeSet, str::FromStr},
    };

    const THING: ActionResourceDef = ActionResourceDef {
        name: "thing",
        required: true,
        condition_keys: &[],
    };

    static SVC: ServiceTable = ServiceTable {
        prefix: "svc",
        actions: &[
            ActionDef {
                name: "ListThings",
                access_level: AccessLevel::List,
                resource_types: &[],
                condition_keys: &[],
            },
            ActionDef {
                name: "ReadThing",
                access_level: AccessLevel::Read,
                resource_types: &[THING],
                condition_keys: &["svc:Version"],
            },
            ActionDef {
                name: "TagThing",
                access_level: AccessLevel::Tagging,
                resource_types: &[ActionResourceDef {
                    name: "thing",
                    required: true,
                    condition_keys: &["aws:RequestTag/${TagKey}", "aws:TagKeys"],
                }],
                condition_keys: &[],
            },
        ],
        resource_types: &[ResourceTypeDef {
            name: "thing",
            arn: "arn:${Partition}:svc:${Region}:${Account}:thing/${ThingId}",
            condition_keys: &["aws:ResourceTag/${TagKey}"],
        }],
        condition_keys: &[ConditionKeyDef::new("svc:Version", ValueKind::Numeric)],
    };

    static BAD_RESOURCE_REF: ServiceTable = ServiceTable {
        prefix: "bad",
        actions: &[ActionDef {
            name: "ReadWidget",
            access_level: AccessLevel::Read,
            resource_types: &[ActionResourceDef {
                name: "widget",
                required: true,
                condition_keys: &[],
            }],
            condition_keys: &[],
        }],
        resource_types: &[],
        condition_keys: &[],
    };

    static BAD_KEY_REF: ServiceTable = ServiceTable {
        prefix: "bad",
        actions: &[ActionDef {
            name: "ReadWidget",
            access_level: AccessLevel::Read,
            resource_types: &[],
            condition_keys: &["bad:Colour"],
        }],
        resource_types: &[],
        condition_keys: &[],
    };

    static BAD_TEMPLATE: ServiceTable = ServiceTable {
        prefix: "bad",
        actions: &[],
        resource_types: &[ResourceTypeDef {
            name: "widget",
            arn: "arn:${Partition}:bad:::widget/${WidgetId",
            condition_keys: &[],
        }],
        condition_keys: &[],
    };

    static SHORT_TEMPLATE: ServiceTable = ServiceTable {
        prefix: "bad",
        actions: &[],
        resource_types: &[ResourceTypeDef {
            name: "widget",
            arn: "arn:${Partition}:bad:widget/${WidgetId}",
            condition_keys: &[],
        }],
        condition_keys: &[],
    };

    static DUPLICATE_ACTION: ServiceTable = ServiceTable {
        prefix: "bad",
        actions: &[
            ActionDef {
                name: "ReadWidget",
                access_level: AccessLevel::Read,
                resource_types: &[],
                condition_keys: &[],
            },
            ActionDef {
                name: "ReadWidget",
                access_level: AccessLevel::List,
                resource_types: &[],
                condition_keys: &[],
            },
        ],
        resource_types: &[],
        condition_keys: &[],
    };

    #[test_log::test]
    fn test_condition_key_def() {
        let tag = ConditionKeyDef::new("aws:ResourceTag/${TagKey}", ValueKind::String);
        assert!(tag.is_parameterized());
        assert!(tag.matches("aws:ResourceTag/Team"));
        assert!(!tag.matches("aws:ResourceTag/"));
        assert!(!tag.matches("aws:RequestTag/Team"));
        assert_eq!(tag.operator(), Operator::new(condop::StringLike));

        let called_via = ConditionKeyDef::new("aws:CalledVia", ValueKind::String)
            .with_operator(Operator::for_any_value(condop::StringEquals));
        assert!(!called_via.is_parameterized());
        assert!(called_via.matches("aws:CalledVia"));
        assert!(!called_via.matches("aws:CalledViaFirst"));
        assert_eq!(called_via.operator().to_string(), "ForAnyValue:StringEquals");
    }

    #[test_log::test]
    fn test_load_and_lookup() {
        let svc = ServiceCatalogue::load(&SVC).unwrap();
        assert_eq!(svc.prefix(), "svc");
        assert_eq!(svc.action("ReadThing").unwrap().access_level, AccessLevel::Read);
        assert!(svc.action("readthing").is_none());
        assert_eq!(svc.actions().count(), 3);
        let refs: Vec<String> = svc.action_refs().iter().map(ToString::to_string).collect();
        assert_eq!(refs, vec!["svc:ListThings", "svc:ReadThing", "svc:TagThing"]);
        assert_eq!(svc.arn_template("thing").unwrap().placeholders(), vec!["ThingId", "Partition", "Region", "Account"]);
        assert!(svc.resource_type("widget").is_none());

        assert_eq!(svc.condition_key("svc:Version").unwrap().kind, ValueKind::Numeric);
        assert_eq!(svc.condition_key("aws:SourceIp").unwrap().kind, ValueKind::IpAddress);
        assert!(svc.condition_key("svc:Colour").is_none());

        let names: Vec<&str> = svc.matching_actions("*thing").iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["ReadThing", "TagThing"]);
        assert!(svc.matching_actions("Delete*").is_empty());

        let lists: Vec<String> = svc.actions_for_level(AccessLevel::List).iter().map(ToString::to_string).collect();
        assert_eq!(lists, vec!["svc:ListThings"]);
        assert_eq!(svc.level_for_action(&Action::from_str("svc:TagThing").unwrap()), Some(AccessLevel::Tagging));
    }

    #[test_log::test]
    fn test_condition_keys_for() {
        let svc = ServiceCatalogue::load(&SVC).unwrap();
        assert_eq!(svc.condition_keys_for("ReadThing").unwrap(), vec!["svc:Version", "aws:ResourceTag/${TagKey}"]);
        assert_eq!(
            svc.condition_keys_for("TagThing").unwrap(),
            vec!["aws:RequestTag/${TagKey}", "aws:TagKeys", "aws:ResourceTag/${TagKey}"]
        );
        assert!(svc.condition_keys_for("ListThings").unwrap().is_empty());
        assert_eq!(svc.condition_keys_for("Frob").unwrap_err(), GrantError::UnknownAction("svc:Frob".to_string()));
    }

    #[test_log::test]
    fn test_inconsistent_tables() {
        assert_eq!(
            ServiceCatalogue::load(&BAD_RESOURCE_REF).unwrap_err(),
            GrantError::CatalogueInconsistency(
                "action bad:ReadWidget refers to undeclared resource type widget".to_string()
            )
        );
        assert_eq!(
            ServiceCatalogue::load(&BAD_KEY_REF).unwrap_err(),
            GrantError::CatalogueInconsistency(
                "action bad:ReadWidget refers to undeclared condition key bad:Colour".to_string()
            )
        );
        assert_eq!(
            ServiceCatalogue::load(&BAD_TEMPLATE).unwrap_err(),
            GrantError::TemplateError("arn:${Partition}:bad:::widget/${WidgetId".to_string())
        );
        assert_eq!(
            ServiceCatalogue::load(&SHORT_TEMPLATE).unwrap_err(),
            GrantError::TemplateError("arn:${Partition}:bad:widget/${WidgetId}".to_string())
        );
        assert_eq!(
            ServiceCatalogue::load(&DUPLICATE_ACTION).unwrap_err(),
            GrantError::CatalogueInconsistency("duplicate action bad:ReadWidget".to_string())
        );
    }

    #[test_log::test]
    fn test_registry() {
        let catalogue = Catalogue::load([&SVC]).unwrap();
        assert_eq!(catalogue.services().count(), 1);
        assert!(catalogue.service("svc").is_some());

        let mut again = catalogue.clone();
        assert_eq!(again.register(&SVC).unwrap_err(), GrantError::CatalogueInconsistency("duplicate service svc".to_string()));

        let reads: Vec<String> =
            catalogue.actions_for_level("svc", AccessLevel::Read).unwrap().iter().map(ToString::to_string).collect();
        assert_eq!(reads, vec!["svc:ReadThing"]);
        assert_eq!(
            catalogue.actions_for_level("nope", AccessLevel::Read).unwrap_err(),
            GrantError::UnknownService("nope".to_string())
        );
        assert_eq!(catalogue.level_for_action(&Action::from_str("svc:ReadThing").unwrap()).unwrap(), AccessLevel::Read);
        assert_eq!(
            catalogue.level_for_action(&Action::from_str("svc:Frob").unwrap()).unwrap_err(),
            GrantError::UnknownAction("svc:Frob".to_string())
        );
        assert!(matches!(catalogue.statement("nope"), Err(GrantError::UnknownService(_))));

        let mut statement = Statement::new();
        statement.add_action("svc:Read*").unwrap().add_action("svc:TagThing").unwrap().add_action("ec2:RunInstances").unwrap();
        let expected: BTreeSet<AccessLevel> = [AccessLevel::Read, AccessLevel::Tagging].into_iter().collect();
        assert_eq!(catalogue.levels_granted(&statement), expected);

        let mut inverted = Statement::new();
        inverted.add_action("svc:ReadThing").unwrap().set_not_action(true);
        let expected: BTreeSet<AccessLevel> = [AccessLevel::List, AccessLevel::Tagging].into_iter().collect();
        assert_eq!(catalogue.levels_granted(&inverted), expected);
    }
}
