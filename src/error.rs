//! Result codes of the list, the cache and the orange record.
//!
//! Every fallible operation of the crate returns one of these errors to its
//! immediate caller. Nothing is logged or retried on failure, and a failed
//! operation leaves the structure it was called on untouched.

use thiserror::Error;

pub type ListResult<T> = Result<T, ListError>;
pub type CacheResult<T> = Result<T, CacheError>;
pub type OrangeResult<T> = Result<T, OrangeError>;

/// Failures of [`List`](crate::List) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// The deep copy of an element could not be allocated.
    #[error("out of memory while copying an element")]
    OutOfMemory,
    /// A cursor-relative operation was called while the internal cursor does
    /// not point at an element.
    #[error("the list cursor does not point at an element")]
    InvalidCurrent,
}

/// Failures of [`Cache`](crate::Cache) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("illegal argument")]
    IllegalArgument,
    #[error("out of memory")]
    OutOfMemory,
    #[error("cell {index} is out of range for a cache of {capacity} cells")]
    OutOfRange { index: usize, capacity: usize },
    #[error("cell {index} holds no elements")]
    NoElementsInCell { index: usize },
}

impl From<ListError> for CacheError {
    fn from(err: ListError) -> Self {
        match err {
            ListError::OutOfMemory => CacheError::OutOfMemory,
            ListError::InvalidCurrent => CacheError::IllegalArgument,
        }
    }
}

/// Failures of [`Orange`](crate::Orange) construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OrangeError {
    #[error("orange size {0} is outside 1..={}", crate::orange::ORANGE_MAX_SIZE)]
    InvalidSize(u16),
    #[error("month {0} is outside 1..=12")]
    InvalidMonth(u8),
    #[error("selling price must be positive, got {0}")]
    InvalidPrice(i32),
    #[error("an orange must accept at least one food company, got {0}")]
    InvalidCompanyCapacity(i32),
    #[error("food company names cannot be empty")]
    EmptyCompanyName,
    #[error("all {capacity} food company slots are taken")]
    CompanyListFull { capacity: usize },
}
