use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store is full: capacity of {0} bars reached")]
    CapacityExceeded(usize),

    #[error("Store rejected the write: {0}")]
    WriteRejected(String),
}
