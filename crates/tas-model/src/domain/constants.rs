//! Well-known label names and the record fields they are computed from.

/// Label carrying the skills of a user or the skills a task requires.
pub const LABEL_SKILLS: &str = "SKILLS";

/// Label carrying affinities (soft matching hints) of a user or task.
pub const LABEL_AFFINITIES: &str = "AFFINITIES";

/// Task input / user attribute holding skills.
pub const INPUT_SKILLS: &str = "skills";

/// Task input / user attribute holding affinities.
pub const INPUT_AFFINITIES: &str = "affinities";

/// Labels the host understands out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultLabel {
    Skills,
    Affinities,
}

impl DefaultLabel {
    /// All default labels, in declaration order.
    pub const ALL: [DefaultLabel; 2] = [DefaultLabel::Skills, DefaultLabel::Affinities];

    /// Label name as registered in the extractor registry.
    pub const fn name(&self) -> &'static str {
        match self {
            DefaultLabel::Skills => LABEL_SKILLS,
            DefaultLabel::Affinities => LABEL_AFFINITIES,
        }
    }

    /// Task input / user attribute the built-in extractors read.
    pub const fn source_key(&self) -> &'static str {
        match self {
            DefaultLabel::Skills => INPUT_SKILLS,
            DefaultLabel::Affinities => INPUT_AFFINITIES,
        }
    }
}
