use lifts_core::LiftsError;
use lifts_proto::ProtoError;
use lifts_world::BuildError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] LiftsError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Proto(#[from] ProtoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
