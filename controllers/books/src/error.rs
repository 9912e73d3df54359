use anyhow::Error;
use controller::error::ErrorKind;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Turn constraint violations reported by PostgreSQL into an [`ErrorKind`],
/// anything else is passed through untouched
pub fn from_diesel(err: DieselError) -> Error {
    match err {
        DieselError::DatabaseError(kind, info) => {
            let reason = info.details().unwrap_or_else(|| info.message()).to_string();

            let mapped = match kind {
                DatabaseErrorKind::UniqueViolation => ErrorKind::DuplicateKey(reason),
                DatabaseErrorKind::ForeignKeyViolation => ErrorKind::MissingReference(reason),
                DatabaseErrorKind::NotNullViolation => ErrorKind::MissingValue(reason),
                DatabaseErrorKind::CheckViolation => ErrorKind::CheckFailed(reason),
                kind => return DieselError::DatabaseError(kind, info).into(),
            };

            log::warn!("Constraint violated: {}", mapped);
            mapped.into()
        }

        err => err.into(),
    }
}
