use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An employee record as stored and served. The identity is assigned by the
/// server on creation and immutable afterwards; every other field is carried
/// through untouched.
///
/// Entries in `direct_reports` are employee references: the identity must be
/// present, anything else is optional. Clients may send identity-only stubs
/// or denormalized copies; the stored list is returned as supplied, and only
/// the identities are consulted when the reporting tree is walked. An absent
/// list and an empty list are kept distinct.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub direct_reports: Option<Vec<Employee>>,
}

/// Request payload for creating or updating an employee. Carries no identity:
/// creation assigns one, updates take it from the request path. An identity
/// field in the payload is an unknown key and ignored.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub direct_reports: Option<Vec<Employee>>,
}

impl EmployeeInput {
    pub fn into_employee(self, employee_id: String) -> Employee {
        Employee {
            employee_id,
            first_name: self.first_name,
            last_name: self.last_name,
            position: self.position,
            department: self.department,
            direct_reports: self.direct_reports,
        }
    }
}

/// One compensation record. The employee reference is stored exactly as
/// supplied; the salary is an exact decimal and crosses the wire as a plain
/// JSON number without float rounding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compensation {
    pub employee: Employee,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub salary: Decimal,
    pub effective_date: NaiveDate,
}

/// Derived view of an employee's full reporting tree. Never persisted;
/// computed from the store on every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingStructure {
    pub employee: Employee,
    pub number_of_reports: u64,
}
