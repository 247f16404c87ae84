use dpm_core::CoreError;
use dpm_decision::DecisionError;
use dpm_steering::SteeringError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("decision tree selects {0:?} but no behavior is registered under that name")]
    MissingBehavior(String),

    #[error("decision error: {0}")]
    Decision(#[from] DecisionError),

    #[error("steering error: {0}")]
    Steering(#[from] SteeringError),
}

pub type SimResult<T> = Result<T, SimError>;
