//! Error types for `docflow-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "invalid delivery_method {0:?}: allowed values are \"email\" and \"mail\""
  )]
  InvalidDeliveryMethod(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
