use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ModelError, ModelResult};

/// Directory group a user belongs to.
///
/// Two groups are equal when their identifiers are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Group(String);

impl Group {
    /// Create a group, trimming the identifier.
    ///
    /// Fails when the identifier is empty after trimming.
    pub fn new(id: impl AsRef<str>) -> ModelResult<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ModelError::InvalidGroup("group id must not be empty".into()));
        }
        Ok(Self(id.to_string()))
    }

    /// Group identifier.
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Group {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Group> for String {
    fn from(g: Group) -> Self {
        g.0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
