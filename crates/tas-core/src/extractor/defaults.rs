use std::sync::Arc;

use tas_model::{DataType, DefaultLabel, LabelSource, LabelValues};

use crate::extractor::{
    ExtractorRef, LabelValueExtractor,
    values::{collect_json, non_empty, split_delimited},
};

/// Priority of the built-in extractors; anything above overrides them.
pub const DEFAULT_PRIORITY: i32 = 0;

/// Built-in extractor reading a comma-separated field.
///
/// For tasks the field is a task input variable, for users it is a user attribute.
#[derive(Debug, Clone)]
pub struct DelimitedValueExtractor {
    name: String,
    data_type: DataType,
    label: &'static str,
    field: &'static str,
    delimiter: char,
}

impl DelimitedValueExtractor {
    /// Built-in extractor for a default label on the given data type.
    pub fn for_label(data_type: DataType, label: DefaultLabel) -> Self {
        Self {
            name: format!("default-{}-{}", data_type, label.source_key()),
            data_type,
            label: label.name(),
            field: label.source_key(),
            delimiter: ',',
        }
    }
}

impl LabelValueExtractor for DelimitedValueExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn data_type(&self) -> DataType {
        self.data_type
    }

    fn label_name(&self) -> &str {
        self.label
    }

    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    fn extract(&self, source: LabelSource<'_>) -> Option<LabelValues> {
        let mut out = LabelValues::new();
        match source {
            LabelSource::Task(task) if self.data_type == DataType::Task => {
                collect_json(task.input(self.field)?, Some(self.delimiter), &mut out);
            }
            LabelSource::User(user) if self.data_type == DataType::User => {
                split_delimited(user.attributes().get(self.field)?, self.delimiter, &mut out);
            }
            _ => return None,
        }
        non_empty(out)
    }
}

/// Built-in extractors for every default label on every data type.
pub fn default_extractors() -> Vec<ExtractorRef> {
    [DataType::Task, DataType::User]
        .into_iter()
        .flat_map(|dt| {
            DefaultLabel::ALL
                .into_iter()
                .map(move |label| Arc::new(DelimitedValueExtractor::for_label(dt, label)) as ExtractorRef)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tas_model::{TaskData, User};

    #[test]
    fn task_skills_are_split_on_commas() {
        let ex = DelimitedValueExtractor::for_label(DataType::Task, DefaultLabel::Skills);
        let task = TaskData::new(1, "t").with_input("skills", "java, rust ,");

        let values = ex.extract(LabelSource::Task(&task)).unwrap();
        assert_eq!(values.into_iter().collect::<Vec<_>>(), vec!["java", "rust"]);
        assert_eq!(ex.name(), "default-task-skills");
        assert_eq!(ex.priority(), DEFAULT_PRIORITY);
    }

    #[test]
    fn user_affinities_come_from_attributes() {
        let ex = DelimitedValueExtractor::for_label(DataType::User, DefaultLabel::Affinities);
        let user = User::new("u1")
            .unwrap()
            .with_attribute("affinities", "night-shift");

        let values = ex.extract(LabelSource::User(&user)).unwrap();
        assert!(values.contains("night-shift"));
    }

    #[test]
    fn missing_or_blank_field_is_no_value() {
        let ex = DelimitedValueExtractor::for_label(DataType::Task, DefaultLabel::Skills);
        let empty = TaskData::new(1, "t");
        let blank = TaskData::new(2, "t").with_input("skills", " , ");

        assert!(ex.extract(LabelSource::Task(&empty)).is_none());
        assert!(ex.extract(LabelSource::Task(&blank)).is_none());
    }

    #[test]
    fn other_data_type_is_no_value() {
        let ex = DelimitedValueExtractor::for_label(DataType::Task, DefaultLabel::Skills);
        let user = User::new("u1").unwrap().with_attribute("skills", "java");
        assert!(ex.extract(LabelSource::User(&user)).is_none());
    }

    #[test]
    fn defaults_cover_every_pair_once() {
        let all = default_extractors();
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|e| e.priority() == DEFAULT_PRIORITY));
    }
}
