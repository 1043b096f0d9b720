use thiserror::Error;

#[derive(Debug, Error)]
pub enum DukaError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error("internal: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DukaError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::DuplicateKey(_) => 409,
            Self::Unauthorized(_) => 401,
            Self::InvalidInput(_) => 400,
            Self::Upstream(_) => 502,
            Self::Internal(_) => 500,
        }
    }
}
