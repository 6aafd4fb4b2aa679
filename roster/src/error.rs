use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A lookup came back empty. The message names the identity the caller
    /// asked for and is rendered verbatim to clients.
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] sea_orm::DbErr),
    /// A stored document no longer decodes into its domain shape.
    #[error("corrupt {collection} record for {id}: {message}")]
    Corrupt {
        collection: &'static str,
        id: String,
        message: String,
    },
}

impl Error {
    pub fn employee_not_found(employee_id: &str) -> Self {
        Self::NotFound(format!("Invalid employeeId: {}", employee_id))
    }

    pub fn compensation_not_found(employee_id: &str) -> Self {
        Self::NotFound(format!(
            "Compensation not found for employee: {}",
            employee_id
        ))
    }

    pub(crate) fn corrupt(
        collection: &'static str,
        id: &str,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Corrupt {
            collection,
            id: id.to_string(),
            message: err.to_string(),
        }
    }
}
