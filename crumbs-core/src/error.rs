use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrumbsError {
    #[error("Could not determine the home directory of the current user")]
    HomeDirUnavailable,
}

pub type Result<T> = std::result::Result<T, CrumbsError>;
