use crate::{DataType, TaskData, User};

/// Borrowed record handed to label extractors.
///
/// The variant fixes the [`DataType`] the record is matched against.
#[derive(Debug, Clone, Copy)]
pub enum LabelSource<'a> {
    Task(&'a TaskData),
    User(&'a User),
}

impl LabelSource<'_> {
    pub fn data_type(&self) -> DataType {
        match self {
            LabelSource::Task(_) => DataType::Task,
            LabelSource::User(_) => DataType::User,
        }
    }
}

impl<'a> From<&'a TaskData> for LabelSource<'a> {
    fn from(task: &'a TaskData) -> Self {
        LabelSource::Task(task)
    }
}

impl<'a> From<&'a User> for LabelSource<'a> {
    fn from(user: &'a User) -> Self {
        LabelSource::User(user)
    }
}
