use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Routine failed: {0}")]
    RoutineFailure(String),
}

impl RoutineError {
    pub fn failure(details: impl Into<String>) -> Self {
        RoutineError::RoutineFailure(details.into())
    }
}

/// A unit of work the binary can run end to end.
#[async_trait::async_trait]
pub trait Routine: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> error_stack::Result<(), RoutineError>;
}
