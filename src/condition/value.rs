use {
    chrono::{DateTime, SecondsFormat, Utc},
    ipnet::IpNet,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        net::IpAddr,
    },
};

/// One literal in a condition clause's value set.
///
/// The policy grammar accepts booleans and numbers either bare or as strings; they are always rendered as strings
/// here so output is uniform. Dates become ISO 8601 with millisecond precision, IP networks CIDR notation, and binary
/// values base64.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ConditionValue(String);

impl ConditionValue {
    pub fn binary<B: AsRef<[u8]>>(bytes: B) -> Self {
        Self(base64::encode(bytes))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for ConditionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<String> for ConditionValue {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<&String> for ConditionValue {
    fn from(v: &String) -> Self {
        Self(v.clone())
    }
}

impl From<&str> for ConditionValue {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<bool> for ConditionValue {
    fn from(v: bool) -> Self {
        Self(v.to_string())
    }
}

macro_rules! from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ConditionValue {
                fn from(v: $t) -> Self {
                    Self(v.to_string())
                }
            }
        )*
    };
}

from_number!(i32, i64, u32, u64, usize, f64);

impl From<DateTime<Utc>> for ConditionValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self(v.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<IpNet> for ConditionValue {
    fn from(v: IpNet) -> Self {
        Self(v.to_string())
    }
}

impl From<IpAddr> for ConditionValue {
    fn from(v: IpAddr) -> Self {
        Self(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::ConditionValue,
        chrono::{TimeZone, Utc},
        ipnet::IpNet,
        pretty_assertions::assert_eq,
        std::{net::IpAddr, str::FromStr},
    };

    #[test_log::test]
    fn test_conversions() {
        assert_eq!(ConditionValue::from("infra").as_str(), "infra");
        assert_eq!(ConditionValue::from(true).as_str(), "true");
        assert_eq!(ConditionValue::from(3600u32).as_str(), "3600");
        assert_eq!(ConditionValue::from(-1i64).as_str(), "-1");
        assert_eq!(ConditionValue::from(1.5f64).as_str(), "1.5");
        assert_eq!(
            ConditionValue::from(Utc.with_ymd_and_hms(2020, 4, 1, 0, 0, 0).unwrap()).as_str(),
            "2020-04-01T00:00:00.000Z"
        );
        assert_eq!(ConditionValue::from(IpNet::from_str("10.0.0.0/8").unwrap()).as_str(), "10.0.0.0/8");
        assert_eq!(ConditionValue::from(IpAddr::from_str("192.0.2.1").unwrap()).as_str(), "192.0.2.1");
        assert_eq!(ConditionValue::binary(b"hello").to_string(), "aGVsbG8=");
        assert_eq!(ConditionValue::from("x".to_string()).into_string(), "x");
    }
}
