use {
    crate::GrantError,
    log::debug,
    regex::{Regex, RegexBuilder},
    serde::{ser::Serializer, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// A fully-qualified permission identifier, `service:ActionName`.
///
/// Only the structure is checked here. Whether the action actually exists in a service's catalogue is the
/// concern of [ServiceStatement][crate::ServiceStatement].
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Action {
    service: String,
    action: String,
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, GrantError> {
        let service = service.into();
        let action = action.into();

        if service.is_empty() {
            debug!("Action '{service}:{action}' has an empty service.");
            return Err(GrantError::InvalidActionFormat(format!("{}:{}", service, action)));
        }

        if action.is_empty() {
            debug!("Action '{service}:{action}' has an empty action name.");
            return Err(GrantError::InvalidActionFormat(format!("{}:{}", service, action)));
        }

        if !service.is_ascii() || !action.is_ascii() {
            debug!("Action '{service}:{action}' is not ASCII.");
            return Err(GrantError::InvalidActionFormat(format!("{}:{}", service, action)));
        }

        for (i, c) in service.bytes().enumerate() {
            if !c.is_ascii_alphanumeric() && !(i > 0 && i < service.len() - 1 && (c == b'-' || c == b'_')) {
                debug!("Action '{service}:{action}' has an invalid service.");
                return Err(GrantError::InvalidActionFormat(format!("{}:{}", service, action)));
            }
        }

        for (i, c) in action.bytes().enumerate() {
            if !c.is_ascii_alphanumeric()
                && c != b'*'
                && c != b'?'
                && !(i > 0 && i < action.len() - 1 && (c == b'-' || c == b'_'))
            {
                debug!("Action '{service}:{action}' has an invalid action name.");
                return Err(GrantError::InvalidActionFormat(format!("{}:{}", service, action)));
            }
        }

        Ok(Self {
            service,
            action,
        })
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    #[inline]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Whether the action name contains `*` or `?` wildcards.
    #[inline]
    pub fn is_pattern(&self) -> bool {
        self.action.contains(|c: char| c == '*' || c == '?')
    }
}

/// Convert a `*`/`?` glob into an anchored regex.
pub(crate) fn regex_from_glob(s: &str) -> RegexBuilder {
    let mut pattern = String::with_capacity(2 + s.len());
    pattern.push('^');

    for c in s.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            _ => pattern.push_str(&regex::escape(&String::from(c))),
        }
    }
    pattern.push('$');
    RegexBuilder::new(&pattern)
}

/// Compile an action-name glob once for repeated, case-insensitive matching. `None` if the pattern cannot be
/// compiled; such a pattern matches nothing.
pub(crate) fn action_glob(pattern: &str) -> Option<Regex> {
    match regex_from_glob(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            debug!("Unable to compile action glob {}: {}", pattern, e);
            None
        }
    }
}

impl FromStr for Action {
    type Err = GrantError;

    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = v.split(':').collect();
        if parts.len() != 2 {
            debug!("Action '{v}' is not of the form service:ActionName.");
            return Err(GrantError::InvalidActionFormat(v.to_string()));
        }

        Action::new(parts[0], parts[1])
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}:{}", self.service, self.action)
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::action_glob,
        crate::Action,
        pretty_assertions::{assert_eq, assert_ne},
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_eq() {
        let a1a = Action::new("s1", "a1").unwrap();
        let a1b = Action::from_str("s1:a1").unwrap();
        let a2 = Action::new("s2", "a1").unwrap();
        let a3 = Action::new("s1", "a2").unwrap();

        assert_eq!(a1a, a1b);
        assert_eq!(a1a, a1a.clone());
        assert_ne!(a1a, a2);
        assert_ne!(a1a, a3);
        assert_eq!(a1a.to_string(), "s1:a1");
        assert_eq!(serde_json::to_string(&a1a).unwrap(), r#""s1:a1""#);
    }

    #[test_log::test]
    fn test_bad_strings() {
        assert_eq!(Action::from_str("").unwrap_err().to_string(), "Invalid action format: ");
        assert_eq!(Action::from_str("ReadThing").unwrap_err().to_string(), "Invalid action format: ReadThing");
        assert_eq!(Action::from_str("*").unwrap_err().to_string(), "Invalid action format: *");
        assert_eq!(Action::from_str("ec2:").unwrap_err().to_string(), "Invalid action format: ec2:");
        assert_eq!(
            Action::from_str(":DescribeInstances").unwrap_err().to_string(),
            "Invalid action format: :DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2:Describe:Instances").unwrap_err().to_string(),
            "Invalid action format: ec2:Describe:Instances"
        );
        assert_eq!(Action::from_str("ec2:ðŸ¦€").unwrap_err().to_string(), "Invalid action format: ec2:ðŸ¦€");
        assert_eq!(
            Action::from_str("-ec2:DescribeInstances").unwrap_err().to_string(),
            "Invalid action format: -ec2:DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2_:DescribeInstances").unwrap_err().to_string(),
            "Invalid action format: ec2_:DescribeInstances"
        );
        assert_eq!(
            Action::from_str("ec2:DescribeInstances-").unwrap_err().to_string(),
            "Invalid action format: ec2:DescribeInstances-"
        );

        let action = Action::from_str("e_c-2:De-scribe_Instances").unwrap();
        assert_eq!(action.service(), "e_c-2");
        assert_eq!(action.action(), "De-scribe_Instances");
        assert!(!action.is_pattern());
    }

    #[test_log::test]
    fn test_patterns() {
        let get_any = Action::from_str("s3:Get*").unwrap();
        assert!(get_any.is_pattern());
        let re = action_glob(get_any.action()).unwrap();
        assert!(re.is_match("GetObject"));
        assert!(re.is_match("getobjectacl"));
        assert!(!re.is_match("PutObject"));

        let list = action_glob("List?ucket").unwrap();
        assert!(list.is_match("ListBucket"));
        assert!(!list.is_match("ListBuckets"));

        let exact = Action::from_str("s3:GetObject").unwrap();
        assert!(!exact.is_pattern());
        let re = action_glob(exact.action()).unwrap();
        assert!(re.is_match("GetObject"));
        assert!(!re.is_match("GetObjectAcl"));

        let dotted = action_glob("Describe*.v2").unwrap();
        assert!(dotted.is_match("DescribeThings.v2"));
        assert!(!dotted.is_match("DescribeThingsXv2"));

        let describe = action_glob("describe?").unwrap();
        for name in ["DescribeA", "describeb", "DESCRIBEC"] {
            assert!(describe.is_match(name), "{}", name);
        }
        assert!(!describe.is_match("DescribeAB"));
    }
}
