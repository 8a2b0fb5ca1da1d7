use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserSystemError {
    #[error("unable to locate backing store '{locator}': {reason}")]
    Connection { locator: String, reason: String },

    #[error("{operation} failed{}: {reason}", target_suffix(.target))]
    Query {
        operation: &'static str,
        target: Option<String>,
        reason: String,
    },

    #[error("users initialization failed: {0}")]
    Initialization(String),

    #[error("user system is not started")]
    NotStarted,

    #[error("duplicate user system: service named '{name}' is already registered")]
    DuplicateService { name: String },
}

impl UserSystemError {
    /// Query failure without a specific target.
    pub fn query(operation: &'static str, reason: impl ToString) -> Self {
        Self::Query {
            operation,
            target: None,
            reason: reason.to_string(),
        }
    }

    /// Query failure for a specific identifier.
    pub fn query_for(operation: &'static str, target: &str, reason: impl ToString) -> Self {
        Self::Query {
            operation,
            target: Some(target.to_string()),
            reason: reason.to_string(),
        }
    }
}

fn target_suffix(target: &Option<String>) -> String {
    match target {
        Some(t) => format!(" for '{t}'"),
        None => String::new(),
    }
}
