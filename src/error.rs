//! Crate error type
//!
//! Gameplay itself never fails; these cover configuration, lifecycle misuse
//! and corrupted state caught before a tick runs.

use thiserror::Error;

use crate::sim::SessionPhase;

#[derive(Debug, Error)]
pub enum GameError {
    /// A lifecycle action was requested from a phase that doesn't allow it
    #[error("cannot {action} while session is {from:?}")]
    InvalidTransition {
        from: SessionPhase,
        action: &'static str,
    },
    /// A tuning value is outside its allowed range
    #[error("invalid tuning value `{field}`: {reason}")]
    InvalidTuning { field: &'static str, reason: String },
    /// Tuning JSON could not be parsed
    #[error("failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),
    /// Simulation state failed its pre-tick consistency check
    #[error("inconsistent game state: {0}")]
    InconsistentState(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_problem() {
        let err = GameError::InvalidTransition {
            from: SessionPhase::Running,
            action: "start",
        };
        assert_eq!(err.to_string(), "cannot start while session is Running");

        let err = GameError::InvalidTuning {
            field: "projectile_step",
            reason: "must be positive and finite".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid tuning value `projectile_step`: must be positive and finite"
        );
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = GameError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
