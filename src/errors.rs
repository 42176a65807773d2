use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuxSimError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Output matrix shape mismatch: {0}")]
    ShapeMismatch(String),
}
