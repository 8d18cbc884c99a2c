//! Domain errors for the tube construction engine.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error(
        "at least one of {{atolx, rtolx}} and one of {{atoly, rtoly}} must be positive"
    )]
    BadTolerance,
    #[error("reference curve has fewer than two distinct points")]
    DegenerateReference,
    #[error("{side:?} envelope has zero points after loop removal")]
    EmptyEnvelope { side: crate::side::Side },
    #[error("loop remover asked to delete a range outside the array: {detail}")]
    InvalidRange { detail: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
