use crate::error::GantryError;

pub type GantryResult<T> = Result<T, GantryError>;
