use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid page id '{0}': expected a non-empty run of ASCII digits")]
    InvalidPageId(String),
    #[error("unknown display type '{0}'")]
    UnknownDisplayType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
