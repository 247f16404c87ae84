use dpm_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SteeringError {
    #[error("invalid steering configuration: {0}")]
    Config(String),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type SteeringResult<T> = Result<T, SteeringError>;
