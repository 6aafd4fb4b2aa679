use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Compensation;
use crate::store;

/// Compensation history operations. Records are append-only; lookups return
/// the most recently effective record.
#[derive(Clone)]
pub struct CompensationService {
    db: DatabaseConnection,
}

impl CompensationService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append a compensation record. The embedded employee reference is
    /// stored as supplied and never checked against the directory, so
    /// compensation may be recorded ahead of the employee record itself.
    pub async fn create(&self, compensation: Compensation) -> Result<Compensation> {
        debug!(
            employee_id = %compensation.employee.employee_id,
            effective_date = %compensation.effective_date,
            "creating compensation record"
        );
        store::insert_compensation(&self.db, compensation).await
    }

    /// Latest compensation for an employee: the highest effective date wins,
    /// with ties going to the most recently inserted record.
    pub async fn find_by_employee_id(&self, employee_id: &str) -> Result<Compensation> {
        debug!(employee_id, "looking up latest compensation");
        store::find_latest_compensation_by_employee_id(&self.db, employee_id)
            .await?
            .ok_or_else(|| Error::compensation_not_found(employee_id))
    }
}
