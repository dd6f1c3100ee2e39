use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Invalid time interval '{0}', expected one of 1min, 5min, 15min, 1hour, 1day, 1week, 1month")]
    InvalidInterval(String),
}
