use tas_core::LabelValueExtractor;
use tas_model::{DataType, LABEL_SKILLS, LabelSource, LabelValues};

/// User `SKILLS` extractor reading the skills loaded from the `user_skill` table.
///
/// Overrides the built-in attribute based extractor for users.
#[derive(Debug, Clone, Copy, Default)]
pub struct DbUserSkillsExtractor;

impl DbUserSkillsExtractor {
    pub const PRIORITY: i32 = 2;
}

impl LabelValueExtractor for DbUserSkillsExtractor {
    fn name(&self) -> &str {
        "db-user-skills"
    }

    fn data_type(&self) -> DataType {
        DataType::User
    }

    fn label_name(&self) -> &str {
        LABEL_SKILLS
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn extract(&self, source: LabelSource<'_>) -> Option<LabelValues> {
        match source {
            LabelSource::User(user) if !user.skills().is_empty() => Some(user.skills().clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tas_core::{ExtractorRef, ExtractorRegistry};
    use tas_model::User;

    #[test]
    fn overrides_attribute_based_default() {
        let reg = ExtractorRegistry::with_defaults(vec![
            Arc::new(DbUserSkillsExtractor) as ExtractorRef
        ])
        .unwrap();

        let user = User::new("u1")
            .unwrap()
            .with_skill("java")
            .with_attribute("skills", "cobol");

        let skills = reg.extract(LABEL_SKILLS, &user).unwrap();
        assert_eq!(skills.into_iter().collect::<Vec<_>>(), vec!["java"]);
    }

    #[test]
    fn user_without_skills_has_no_value() {
        let user = User::new("u1").unwrap();
        assert!(DbUserSkillsExtractor.extract(LabelSource::User(&user)).is_none());
    }
}
