use crate::get_data::FetchError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Invalid result limit: \"{0}\". Expected a non-negative number or \"all\"")]
    InvalidLimit(String),
    #[error("No {field} selected")]
    IncompleteForm { field: &'static str },
    #[error("`{value}` is not one of the available {field} options")]
    UnknownOption { field: &'static str, value: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
