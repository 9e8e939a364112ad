pub mod catalog_repo;
pub mod contact_repo;
pub mod models;
pub mod order_repo;
pub mod stats_repo;

#[cfg(test)]
pub(crate) mod test_support;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(kind, info) => {
                let detail = info.constraint_name().unwrap_or("unnamed constraint");
                match kind {
                    DatabaseErrorKind::ForeignKeyViolation => {
                        log::warn!("Foreign key violation on {}", detail);
                        DomainError::Integrity(
                            "referenced record is missing or still in use".to_string(),
                        )
                    }
                    DatabaseErrorKind::UniqueViolation => {
                        log::warn!("Unique violation on {}", detail);
                        DomainError::Integrity("duplicate record".to_string())
                    }
                    DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation => {
                        log::warn!("Constraint violation on {}", detail);
                        DomainError::Integrity("value violates a storage constraint".to_string())
                    }
                    _ => DomainError::Internal(info.message().to_string()),
                }
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
