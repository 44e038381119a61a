use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LoadError {
    #[error("unknown item type '{0}'")]
    UnknownItem(String),

    #[error("invalid dimensions '{0}', expected LxW")]
    InvalidDimensions(String),

    #[error("invalid quantity in '{0}'")]
    InvalidQuantity(String),

    #[error("invalid item '{0}', expected NAME:qty or LxW:qty")]
    InvalidLine(String),
}
