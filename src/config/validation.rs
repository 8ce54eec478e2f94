//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (grace period > 0)
//! - Reject signal sets that could never initiate shutdown
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CoordinatorConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::fmt;

use crate::config::schema::CoordinatorConfig;
use crate::lifecycle::TerminationSignal;

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoSignals,
    DuplicateSignal(TerminationSignal),
    ZeroGracePeriod,
    EmptyLogFilter,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoSignals => write!(f, "signals.watch must not be empty"),
            ValidationError::DuplicateSignal(s) => {
                write!(f, "signals.watch lists {} more than once", s)
            }
            ValidationError::ZeroGracePeriod => {
                write!(f, "drain.grace_period_secs must be greater than 0")
            }
            ValidationError::EmptyLogFilter => {
                write!(f, "observability.log_filter must not be empty")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_config(config: &CoordinatorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.signals.watch.is_empty() {
        errors.push(ValidationError::NoSignals);
    }

    let mut seen = HashSet::new();
    for signal in &config.signals.watch {
        if !seen.insert(*signal) {
            errors.push(ValidationError::DuplicateSignal(*signal));
        }
    }

    if config.drain.grace_period_secs == 0 {
        errors.push(ValidationError::ZeroGracePeriod);
    }

    if config.observability.log_filter.trim().is_empty() {
        errors.push(ValidationError::EmptyLogFilter);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&CoordinatorConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = CoordinatorConfig::default();
        config.signals.watch = vec![];
        config.drain.grace_period_secs = 0;
        config.observability.log_filter = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NoSignals,
                ValidationError::ZeroGracePeriod,
                ValidationError::EmptyLogFilter,
            ]
        );
    }

    #[test]
    fn flags_duplicates() {
        let mut config = CoordinatorConfig::default();
        config.signals.watch = vec![
            TerminationSignal::Terminate,
            TerminationSignal::Interrupt,
            TerminationSignal::Terminate,
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateSignal(TerminationSignal::Terminate)]
        );
    }
}
