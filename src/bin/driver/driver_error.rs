use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("input file {} does not exist", .0.display())]
    InputFileDoesNotExist(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
