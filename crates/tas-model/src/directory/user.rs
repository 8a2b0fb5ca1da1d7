use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Attributes, Group, ModelError, ModelResult};

/// Normalized directory user.
///
/// Invariants (enforced by every constructor and mutator, including deserialization):
/// - `id` is non-empty and trimmed;
/// - `groups` and `skills` hold no duplicates and no empty entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawUser", rename_all = "camelCase")]
pub struct User {
    id: String,
    groups: BTreeSet<Group>,
    skills: BTreeSet<String>,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    attributes: Attributes,
}

impl User {
    /// Create a user with no groups, skills or attributes.
    pub fn new(id: impl AsRef<str>) -> ModelResult<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(ModelError::InvalidUser("user id must not be empty".into()));
        }
        Ok(Self {
            id: id.to_string(),
            groups: BTreeSet::new(),
            skills: BTreeSet::new(),
            attributes: Attributes::default(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn groups(&self) -> &BTreeSet<Group> {
        &self.groups
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns `true` if the user belongs to the given group.
    pub fn is_member_of(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g.id() == group)
    }

    /// Add a group membership.
    ///
    /// The value is trimmed; blank values are ignored. Returns `true` if the set changed.
    pub fn add_group(&mut self, group: &str) -> bool {
        match Group::new(group) {
            Ok(g) => self.groups.insert(g),
            Err(_) => false,
        }
    }

    /// Add a skill.
    ///
    /// The value is trimmed; blank values are ignored. Returns `true` if the set changed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        self.skills.insert(skill.to_string())
    }

    /// Builder-style variant of [`User::add_group`].
    pub fn with_group(mut self, group: &str) -> Self {
        self.add_group(group);
        self
    }

    /// Builder-style variant of [`User::add_skill`].
    pub fn with_skill(mut self, skill: &str) -> Self {
        self.add_skill(skill);
        self
    }

    /// Attach a free-form attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key, value);
        self
    }
}

/// Unvalidated wire form of [`User`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    id: String,
    #[serde(default)]
    groups: Vec<String>,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    attributes: Attributes,
}

impl TryFrom<RawUser> for User {
    type Error = ModelError;
    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let mut user = User::new(&raw.id)?;
        for g in &raw.groups {
            user.add_group(g);
        }
        for s in &raw.skills {
            user.add_skill(s);
        }
        user.attributes = raw.attributes;
        Ok(user)
    }
}
