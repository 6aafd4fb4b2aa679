use sea_orm::DatabaseConnection;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{Employee, EmployeeInput, ReportingStructure};
use crate::store;

/// Employee directory operations over the backing store.
#[derive(Clone)]
pub struct EmployeeService {
    db: DatabaseConnection,
}

impl EmployeeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Persist a new employee under a freshly assigned identity. Whatever
    /// identity the caller may have had in mind is discarded; the returned
    /// record carries the authoritative one.
    pub async fn create(&self, input: EmployeeInput) -> Result<Employee> {
        let employee = input.into_employee(Uuid::new_v4().to_string());
        debug!(employee_id = %employee.employee_id, "creating employee");
        store::insert_employee(&self.db, employee).await
    }

    pub async fn read(&self, employee_id: &str) -> Result<Employee> {
        debug!(employee_id, "reading employee");
        store::find_employee_by_id(&self.db, employee_id)
            .await?
            .ok_or_else(|| Error::employee_not_found(employee_id))
    }

    /// Full overwrite keyed on the embedded identity. Writing an identity
    /// nobody has seen yet creates the record; there is no prior-existence
    /// check.
    pub async fn update(&self, employee: Employee) -> Result<Employee> {
        debug!(employee_id = %employee.employee_id, "updating employee");
        store::save_employee(&self.db, employee).await
    }

    /// Count every position in the reporting tree under an employee.
    ///
    /// Each node is re-read from the store; embedded direct-report entries
    /// contribute nothing but their identity. The first read that fails
    /// aborts the whole computation, so a dangling reference anywhere in the
    /// tree surfaces as `NotFound` naming that reference. The hierarchy is
    /// assumed finite: a cyclic chain of direct reports will not terminate.
    /// An identity listed under several managers is counted once per listing.
    pub async fn reporting_structure(&self, employee_id: &str) -> Result<ReportingStructure> {
        let root = self.read(employee_id).await?;
        let mut pending = direct_report_ids(&root);
        let mut number_of_reports: u64 = 0;
        while let Some(id) = pending.pop() {
            let report = self.read(&id).await?;
            number_of_reports += 1;
            pending.extend(direct_report_ids(&report));
        }
        debug!(employee_id, number_of_reports, "resolved reporting structure");
        Ok(ReportingStructure {
            employee: root,
            number_of_reports,
        })
    }
}

fn direct_report_ids(employee: &Employee) -> Vec<String> {
    employee
        .direct_reports
        .as_ref()
        .map(|reports| reports.iter().map(|r| r.employee_id.clone()).collect())
        .unwrap_or_default()
}
