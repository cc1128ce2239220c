use {
    crate::{from_str_json, GrantError},
    derive_builder::Builder,
    lazy_static::lazy_static,
    log::{debug, trace},
    regex::Regex,
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

lazy_static! {
    static ref PLACEHOLDER_NAME: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

const PARTITION: &str = "Partition";
const REGION: &str = "Region";
const ACCOUNT: &str = "Account";
const ACCOUNT_ID: &str = "AccountId";

/// Process-level fallbacks for the standard ARN placeholders.
///
/// These apply whenever an [ArnValues] does not supply `${Partition}`, `${Region}` or `${Account}` (also spelled
/// `${AccountId}`) explicitly. The defaults are `aws`, `*` and `*`.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[builder(default, setter(into))]
#[serde(default, deny_unknown_fields, rename_all = "PascalCase")]
pub struct ArnDefaults {
    partition: String,
    region: String,
    account: String,
}

impl ArnDefaults {
    pub fn builder() -> ArnDefaultsBuilder {
        ArnDefaultsBuilder::default()
    }

    #[inline]
    pub fn partition(&self) -> &str {
        &self.partition
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[inline]
    pub fn account(&self) -> &str {
        &self.account
    }

    fn for_standard(&self, name: &str) -> Option<&str> {
        match name {
            PARTITION => Some(&self.partition),
            REGION => Some(&self.region),
            ACCOUNT | ACCOUNT_ID => Some(&self.account),
            _ => None,
        }
    }
}

impl Default for ArnDefaults {
    fn default() -> Self {
        Self {
            partition: "aws".to_string(),
            region: "*".to_string(),
            account: "*".to_string(),
        }
    }
}

from_str_json!(ArnDefaults);

/// Caller-supplied placeholder values, keyed by placeholder name without the `${}` wrapper.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ArnValues {
    values: BTreeMap<String, String>,
}

impl ArnValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.set(name, value);
        self
    }

    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn partition<V: Into<String>>(self, value: V) -> Self {
        self.with(PARTITION, value)
    }

    pub fn region<V: Into<String>>(self, value: V) -> Self {
        self.with(REGION, value)
    }

    pub fn account<V: Into<String>>(self, value: V) -> Self {
        self.with(ACCOUNT, value)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            ACCOUNT | ACCOUNT_ID => self.get(name).or_else(|| self.get(ACCOUNT)).or_else(|| self.get(ACCOUNT_ID)),
            _ => self.get(name),
        }
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ArnValues {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (name, value) in iter {
            result.set(name, value);
        }
        result
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn segments(template: &str) -> Result<Vec<Segment<'_>>, GrantError> {
    let mut result = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        if start > 0 {
            result.push(Segment::Literal(&rest[..start]));
        }

        let after = &rest[start + 2..];
        let end = match after.find('}') {
            Some(end) => end,
            None => {
                debug!("ARN template {} has an unterminated placeholder", template);
                return Err(GrantError::TemplateError(template.to_string()));
            }
        };

        let name = &after[..end];
        if !PLACEHOLDER_NAME.is_match(name) {
            debug!("ARN template {} has an invalid placeholder name: {:?}", template, name);
            return Err(GrantError::TemplateError(template.to_string()));
        }

        result.push(Segment::Placeholder(name));
        rest = &after[end + 1..];
    }

    if !rest.is_empty() {
        result.push(Segment::Literal(rest));
    }

    Ok(result)
}

#[inline]
fn is_standard(name: &str) -> bool {
    matches!(name, PARTITION | REGION | ACCOUNT | ACCOUNT_ID)
}

/// An ARN format string with `${Name}` placeholders, as declared for a resource type in a service table.
///
/// Templates are validated when constructed; [ArnTemplate::resolve] can only fail for missing caller input.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ArnTemplate {
    template: String,
    placeholders: Vec<String>,
}

impl ArnTemplate {
    pub fn new<S: Into<String>>(template: S) -> Result<Self, GrantError> {
        let template = template.into();
        if template != "*" {
            if !template.starts_with("arn:") {
                debug!("ARN template {} does not start with arn:", template);
                return Err(GrantError::TemplateError(template));
            }

            // arn:partition:service:region:account:resource
            if template.splitn(6, ':').count() < 6 {
                debug!("ARN template {} has fewer than six colon-separated parts", template);
                return Err(GrantError::TemplateError(template));
            }
        }

        let mut placeholders = Vec::new();
        for segment in segments(&template)? {
            if let Segment::Placeholder(name) = segment {
                if !placeholders.iter().any(|p| p == name) {
                    placeholders.push(name.to_string());
                }
            }
        }

        Ok(Self {
            template,
            placeholders,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Placeholder names in the order a caller supplies them: resource-specific identifiers first, in template order,
    /// followed by the standard `Partition`, `Region` and `Account` placeholders that have defaults.
    pub fn placeholders(&self) -> Vec<&str> {
        let (standard, specific): (Vec<&str>, Vec<&str>) =
            self.placeholders.iter().map(String::as_str).partition(|name| is_standard(name));
        specific.into_iter().chain(standard).collect()
    }

    /// Placeholders that have no default and must be supplied by the caller.
    pub fn required_placeholders(&self) -> Vec<&str> {
        self.placeholders.iter().map(String::as_str).filter(|name| !is_standard(name)).collect()
    }

    pub fn resolve(&self, values: &ArnValues, defaults: &ArnDefaults) -> Result<String, GrantError> {
        resolve(&self.template, values, defaults)
    }
}

impl Display for ArnTemplate {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.template)
    }
}

/// Substitute every `${Name}` placeholder in `template`.
///
/// Explicit values win over `defaults`. Only `Partition`, `Region` and `Account`/`AccountId` have defaults; any other
/// placeholder without a value yields [GrantError::MissingPlaceholder]. Values are inserted verbatim, so IAM policy
/// variables such as `${aws:username}` may be passed through as values.
pub fn resolve(template: &str, values: &ArnValues, defaults: &ArnDefaults) -> Result<String, GrantError> {
    let mut result = String::with_capacity(template.len() + 16);

    for segment in segments(template)? {
        match segment {
            Segment::Literal(literal) => result.push_str(literal),
            Segment::Placeholder(name) => {
                let value = match values.lookup(name).or_else(|| defaults.for_standard(name)) {
                    Some(value) => value,
                    None => {
                        debug!("No value supplied for placeholder {} in {}", name, template);
                        return Err(GrantError::MissingPlaceholder {
                            template: template.to_string(),
                            placeholder: name.to_string(),
                        });
                    }
                };
                result.push_str(value);
            }
        }
    }

    trace!("Resolved {} to {}", template, result);
    Ok(result)
}
