/// Failure of a calculation-job preparation
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    /// The declared inputs can never produce a valid job; no retry.
    #[error("input validation failed: {0}")]
    InputValidation(String),
    /// A collaborator (folder, sandbox) failed.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PrepareError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InputValidation(message.into())
    }

    pub fn is_input_validation(&self) -> bool {
        matches!(self, Self::InputValidation(_))
    }
}
