use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("exam id must not be blank: {0:?}")]
    InvalidExamId(String),
    #[error("unknown language code: {0}")]
    UnknownLanguage(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
