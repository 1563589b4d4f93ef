//! Task status and priority enums.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a task.
///
/// Every move between two distinct
/// states is legal, including the reset back to `Open`. Who may move a
/// task is decided by the command handlers, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::Open, TaskStatus::InProgress, TaskStatus::Completed];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "OPEN",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        }
    }
}

impl StateMachine for TaskStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        self != target
    }

    fn valid_transitions(&self) -> Vec<Self> {
        Self::ALL.into_iter().filter(|s| s != self).collect()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(TaskStatus::Open),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(TaskPriority::Low),
            "MEDIUM" => Ok(TaskPriority::Medium),
            "HIGH" => Ok(TaskPriority::High),
            other => Err(ValidationError::invalid_format(
                "priority",
                format!("unknown priority '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_distinct_pair_is_a_legal_transition() {
        for from in TaskStatus::ALL {
            for to in TaskStatus::ALL {
                assert_eq!(from.can_transition_to(&to), from != to, "{from} -> {to}");
            }
        }
    }

    #[test]
    fn reset_to_open_is_allowed_from_completed() {
        assert_eq!(
            TaskStatus::Completed.transition_to(TaskStatus::Open),
            Ok(TaskStatus::Open)
        );
    }

    #[test]
    fn no_status_is_terminal() {
        for status in TaskStatus::ALL {
            assert!(!status.is_terminal());
            assert_eq!(status.valid_transitions().len(), 2);
        }
    }

    #[test]
    fn status_uses_screaming_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            r#""IN_PROGRESS""#
        );
        let parsed: TaskStatus = serde_json::from_str(r#""COMPLETED""#).unwrap();
        assert_eq!(parsed, TaskStatus::Completed);
    }

    #[test]
    fn from_str_matches_serde_names() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        assert!("DONE".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!("HIGH".parse::<TaskPriority>().unwrap(), TaskPriority::High);
    }
}
