use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capability required by the time endpoint.
pub const GET_TIME: &str = "get_time";

/// Set of capability names granted by a token.
///
/// Carried on the wire as one whitespace-separated string (`"get_time"`),
/// checked in memory by exact membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Privileges(BTreeSet<String>);

impl Privileges {
    pub fn contains(&self, capability: &str) -> bool {
        self.0.contains(capability)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Privileges {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Privileges(iter.into_iter().map(Into::into).collect())
    }
}

impl From<String> for Privileges {
    fn from(raw: String) -> Self {
        raw.split_whitespace().collect()
    }
}

impl From<&str> for Privileges {
    fn from(raw: &str) -> Self {
        raw.split_whitespace().collect()
    }
}

impl From<Privileges> for String {
    fn from(privileges: Privileges) -> Self {
        privileges.iter().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub user: String,
    pub privileges: Privileges,
}

impl TokenClaims {
    pub fn new(user: impl Into<String>, privileges: impl Into<Privileges>) -> Self {
        TokenClaims {
            user: user.into(),
            privileges: privileges.into(),
        }
    }
}
