//! Domain error taxonomy.
//!
//! Ownership mismatches deliberately surface as [`Error::NotFound`]: a row
//! belonging to another user must be indistinguishable from an absent row,
//! so existence never leaks across accounts.

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Errors returned by the liftlog service operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The target row does not exist or does not belong to the acting user.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A supplied foreign id fails existence or consistency checks.
    #[error("invalid {entity} reference: {id}")]
    InvalidReference { entity: &'static str, id: i64 },

    /// A supplied value is out of range or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A duplicate or concurrent modification was detected.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A delete was blocked by a restrict-rule dependent, or the store
    /// rejected a write that would have violated referential integrity.
    #[error("integrity violation: {0}")]
    IntegrityViolation(String),

    /// Connectivity, timeout, or any other storage-level failure. Eligible
    /// for bounded retry at the storage-access layer only.
    #[error("storage failure")]
    Store(#[source] sqlx::Error),
}

impl Error {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    pub(crate) fn invalid_ref(entity: &'static str, id: i64) -> Self {
        Self::InvalidReference { entity, id }
    }
}

impl From<sqlx::Error> for Error {
    /// Classify constraint violations reported by the store at write or
    /// commit time; everything else is a storage failure.
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            match db.kind() {
                ErrorKind::UniqueViolation => return Self::Conflict(db.message().to_owned()),
                ErrorKind::ForeignKeyViolation => {
                    return Self::IntegrityViolation(db.message().to_owned());
                }
                ErrorKind::CheckViolation => return Self::InvalidArgument(db.message().to_owned()),
                _ => {}
            }
        }
        Self::Store(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let e = Error::not_found("workout plan", 7);
        assert_eq!(e.to_string(), "workout plan 7 not found");
    }

    #[test]
    fn non_database_errors_map_to_store() {
        let e: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(e, Error::Store(_)));
    }
}
