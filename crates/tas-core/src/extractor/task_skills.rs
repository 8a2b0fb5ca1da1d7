use tas_model::{DataType, INPUT_SKILLS, LABEL_SKILLS, LabelSource, LabelValues};

use crate::extractor::{
    LabelValueExtractor,
    values::{collect_json, non_empty},
};

/// Task `SKILLS` extractor taking the `skills` input as a single value.
///
/// Overrides the built-in comma-splitting extractor for tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskSkillsExtractor;

impl TaskSkillsExtractor {
    pub const PRIORITY: i32 = 5;
}

impl LabelValueExtractor for TaskSkillsExtractor {
    fn name(&self) -> &str {
        "task-skills"
    }

    fn data_type(&self) -> DataType {
        DataType::Task
    }

    fn label_name(&self) -> &str {
        LABEL_SKILLS
    }

    fn priority(&self) -> i32 {
        Self::PRIORITY
    }

    fn extract(&self, source: LabelSource<'_>) -> Option<LabelValues> {
        let LabelSource::Task(task) = source else {
            return None;
        };
        let mut out = LabelValues::new();
        collect_json(task.input(INPUT_SKILLS)?, None, &mut out);
        non_empty(out)
    }
}
