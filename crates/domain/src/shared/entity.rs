use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt::Display, str::FromStr};
use uuid::Uuid;

pub trait Entity {
    fn id(&self) -> &ID;
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

/// Opaque identifier of a stored entity.
///
/// Identifiers are never parsed or validated, stores written by older
/// deployments contain ids like `rec_1700000000000` and those must keep
/// working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ID(String);

impl ID {
    /// Generates a new unique id with the given prefix, e.g. `rec_3f2a...`
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}_{}", prefix, Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ID {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ID {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl FromStr for ID {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let id1 = ID::generate("rec");
        let id2 = ID::generate("rec");
        assert!(id1.as_str().starts_with("rec_"));
        assert_ne!(id1, id2);
    }

    #[test]
    fn legacy_ids_are_kept_verbatim() {
        let id: ID = "rec_1700000000000".parse().unwrap();
        assert_eq!(id.to_string(), "rec_1700000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rec_1700000000000\"");
    }
}
