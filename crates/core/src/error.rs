use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid user id: {0}")]
    InvalidUserId(String),

    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
