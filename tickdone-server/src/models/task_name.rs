//! Task name validation
//!
//! A task name must carry at least ten characters once surrounding
//! whitespace is ignored. The name is stored exactly as submitted.

use super::ValidationError;

/// Minimum length of a trimmed task name, in characters
pub const MIN_TASK_NAME_LEN: usize = 10;

/// Validated task name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskName(String);

impl TaskName {
    /// Create a new task name, validating its trimmed length.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Example
    /// ```
    /// use tickdone_server::models::TaskName;
    ///
    /// assert!(TaskName::new("Write integration tests").is_ok());
    /// assert!(TaskName::new("short").is_err());
    /// assert!(TaskName::new("   padded   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().chars().count() < MIN_TASK_NAME_LEN {
            return Err(ValidationError::TaskNameTooShort {
                min: MIN_TASK_NAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the task name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
