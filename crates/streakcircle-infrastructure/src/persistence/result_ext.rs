use streakcircle_domain::shared::DomainError;

/// Extension trait for mapping storage errors into `DomainError`
pub trait ResultExt<T, E> {
    /// Convert error to DomainError::Repository
    /// Usage: `result.to_repo_err()?`
    fn to_repo_err(self) -> Result<T, DomainError>;

    /// Convert error to DomainError::Repository, prefixed with what was being done
    fn with_repo_context(self, context: &str) -> Result<T, DomainError>;

    /// Convert error to DomainError::Infrastructure
    fn to_infra_err(self) -> Result<T, DomainError>;
}

impl<T, E: std::fmt::Display> ResultExt<T, E> for Result<T, E> {
    fn to_repo_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(e.to_string()))
    }

    fn with_repo_context(self, context: &str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Repository(format!("{context}: {e}")))
    }

    fn to_infra_err(self) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(e.to_string()))
    }
}
