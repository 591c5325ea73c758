use std::fmt;

use crate::domain::{Parameter, ParameterPage, PathQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    ParameterNotFound(String),
    ParameterVersionNotFound(String),
    InvalidNextToken(String),
    RequestFailed(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParameterNotFound(msg) => write!(f, "Parameter not found: {}", msg),
            Self::ParameterVersionNotFound(msg) => {
                write!(f, "Parameter version not found: {}", msg)
            }
            Self::InvalidNextToken(msg) => write!(f, "Invalid continuation token: {}", msg),
            Self::RequestFailed(msg) => write!(f, "Parameter store request failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Read access to a remote parameter store.
#[async_trait::async_trait]
pub trait ParameterStore: Send + Sync {
    /// `Ok(None)` means the store answered but carried no parameter in the response.
    async fn get_parameter(
        &self,
        name: &str,
        with_decryption: bool,
    ) -> Result<Option<Parameter>, StoreError>;

    async fn get_parameters_by_path(&self, query: PathQuery)
    -> Result<ParameterPage, StoreError>;
}
