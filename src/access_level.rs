use {
    crate::{action::action_glob, Action, GrantError},
    log::debug,
    regex::Regex,
    serde::{ser::Serializer, Serialize},
    std::{
        collections::{BTreeMap, BTreeSet, HashMap},
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// The coarse permission category assigned to every action in a service catalogue.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum AccessLevel {
    List,
    Read,
    Write,
    PermissionsManagement,
    Tagging,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 5] =
        [Self::List, Self::Read, Self::Write, Self::PermissionsManagement, Self::Tagging];
}

impl Display for AccessLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::List => f.write_str("List"),
            Self::Read => f.write_str("Read"),
            Self::Write => f.write_str("Write"),
            Self::PermissionsManagement => f.write_str("Permissions management"),
            Self::Tagging => f.write_str("Tagging"),
        }
    }
}

impl FromStr for AccessLevel {
    type Err = GrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "List" => Ok(Self::List),
            "Read" => Ok(Self::Read),
            "Write" => Ok(Self::Write),
            "Permissions management" | "PermissionsManagement" => Ok(Self::PermissionsManagement),
            "Tagging" => Ok(Self::Tagging),
            _ => {
                debug!("Unknown access level: {}", s);
                Err(GrantError::CatalogueInconsistency(format!("unknown access level {}", s)))
            }
        }
    }
}

impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read-only mapping between a service's actions and their access levels.
///
/// Each bucket keeps the order in which the actions were supplied.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLevelIndex {
    service: String,
    by_level: BTreeMap<AccessLevel, Vec<Action>>,
    by_name: HashMap<String, AccessLevel>,
}

impl AccessLevelIndex {
    /// Build the index for `service` from (action name, level) pairs.
    ///
    /// # Errors
    ///
    /// [GrantError::CatalogueInconsistency] if an action name is malformed or appears more than once.
    pub fn build<'a, I>(service: &str, entries: I) -> Result<Self, GrantError>
    where
        I: IntoIterator<Item = (&'a str, AccessLevel)>,
    {
        let mut by_level: BTreeMap<AccessLevel, Vec<Action>> = BTreeMap::new();
        let mut by_name = HashMap::new();

        for (name, level) in entries {
            let action = Action::new(service, name).map_err(|e| {
                debug!("Catalogue for {} has a malformed action {}: {}", service, name, e);
                GrantError::CatalogueInconsistency(format!("malformed action {}:{}", service, name))
            })?;

            if action.is_pattern() {
                debug!("Catalogue for {} lists a wildcard action {}", service, name);
                return Err(GrantError::CatalogueInconsistency(format!("wildcard action {}", action)));
            }

            if let Some(existing) = by_name.insert(name.to_string(), level) {
                debug!("Catalogue for {} lists {} under both {} and {}", service, name, existing, level);
                return Err(GrantError::CatalogueInconsistency(format!("duplicate action {}", action)));
            }

            by_level.entry(level).or_default().push(action);
        }

        Ok(Self {
            service: service.to_string(),
            by_level,
            by_name,
        })
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The actions at `level`, in catalogue order.
    pub fn actions_for_level(&self, level: AccessLevel) -> &[Action] {
        self.by_level.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The level of `action`, or `None` if the action belongs to another service or is not catalogued.
    pub fn level_for_action(&self, action: &Action) -> Option<AccessLevel> {
        if action.service() != self.service {
            return None;
        }
        self.level_for_name(action.action())
    }

    #[inline]
    pub fn level_for_name(&self, action_name: &str) -> Option<AccessLevel> {
        self.by_name.get(action_name).copied()
    }

    /// The levels with at least one action.
    pub fn levels(&self) -> impl Iterator<Item = AccessLevel> + '_ {
        self.by_level.keys().copied()
    }

    /// The levels reached by `actions`, expanding wildcard actions against the catalogue.
    pub fn levels_granted<'a, I>(&self, actions: I) -> BTreeSet<AccessLevel>
    where
        I: IntoIterator<Item = &'a Action>,
    {
        let matchers = self.matchers(actions);
        self.levels_where(|name| matchers.iter().any(|re| re.is_match(name)))
    }

    /// The levels reached by a `NotAction` list: every catalogued action that none of `actions` covers.
    pub fn levels_excluding<'a, I>(&self, actions: I) -> BTreeSet<AccessLevel>
    where
        I: IntoIterator<Item = &'a Action>,
    {
        let matchers = self.matchers(actions);
        self.levels_where(|name| !matchers.iter().any(|re| re.is_match(name)))
    }

    fn matchers<'a, I>(&self, actions: I) -> Vec<Regex>
    where
        I: IntoIterator<Item = &'a Action>,
    {
        actions
            .into_iter()
            .filter(|action| action.service() == self.service)
            .filter_map(|action| action_glob(action.action()))
            .collect()
    }

    fn levels_where<F: Fn(&str) -> bool>(&self, covered: F) -> BTreeSet<AccessLevel> {
        self.by_level
            .iter()
            .filter(|(_, bucket)| bucket.iter().any(|candidate| covered(candidate.action())))
            .map(|(level, _)| *level)
            .collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
