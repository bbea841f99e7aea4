use serde::{Deserialize, Serialize};

/// identifier of a fare zone, the "Shortname" of the zone in the source dataset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ZoneId {
    fn from(value: &str) -> Self {
        ZoneId(value.to_string())
    }
}

impl From<String> for ZoneId {
    fn from(value: String) -> Self {
        ZoneId(value)
    }
}
