//! Record store over the two backing tables. Conversion between domain
//! values and rows lives here: the direct-report list and the embedded
//! employee reference travel as JSON documents, the salary as its decimal
//! literal.

use chrono::Utc;
use entity::{compensation, employee};
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::error::{Error, Result};
use crate::model::{Compensation, Employee};

pub async fn insert_employee(db: &DatabaseConnection, record: Employee) -> Result<Employee> {
    let active = employee_active_model(&record)?;
    employee::Entity::insert(active)
        .exec_without_returning(db)
        .await?;
    Ok(record)
}

pub async fn find_employee_by_id(
    db: &DatabaseConnection,
    employee_id: &str,
) -> Result<Option<Employee>> {
    match employee::Entity::find_by_id(employee_id).one(db).await? {
        Some(row) => decode_employee(row).map(Some),
        None => Ok(None),
    }
}

/// Full-overwrite save keyed on the identity. Unknown identities insert,
/// known ones replace every mutable column.
pub async fn save_employee(db: &DatabaseConnection, record: Employee) -> Result<Employee> {
    let active = employee_active_model(&record)?;
    employee::Entity::insert(active)
        .on_conflict(
            OnConflict::column(employee::Column::EmployeeId)
                .update_columns([
                    employee::Column::FirstName,
                    employee::Column::LastName,
                    employee::Column::Position,
                    employee::Column::Department,
                    employee::Column::DirectReports,
                    employee::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(record)
}

pub async fn insert_compensation(
    db: &DatabaseConnection,
    record: Compensation,
) -> Result<Compensation> {
    let employee_id = record.employee.employee_id.clone();
    let document = serde_json::to_value(&record.employee)
        .map_err(|err| Error::corrupt("compensation", &employee_id, err))?;
    let active = compensation::ActiveModel {
        employee_id: Set(employee_id),
        employee: Set(document),
        salary: Set(record.salary.to_string()),
        effective_date: Set(record.effective_date),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    compensation::Entity::insert(active)
        .exec_without_returning(db)
        .await?;
    Ok(record)
}

/// Most recently effective compensation record for an employee. Records
/// sharing an effective date resolve to the latest inserted one.
pub async fn find_latest_compensation_by_employee_id(
    db: &DatabaseConnection,
    employee_id: &str,
) -> Result<Option<Compensation>> {
    let row = compensation::Entity::find()
        .filter(compensation::Column::EmployeeId.eq(employee_id))
        .order_by_desc(compensation::Column::EffectiveDate)
        .order_by_desc(compensation::Column::Seq)
        .one(db)
        .await?;
    match row {
        Some(row) => decode_compensation(row).map(Some),
        None => Ok(None),
    }
}

fn employee_active_model(record: &Employee) -> Result<employee::ActiveModel> {
    let direct_reports = record
        .direct_reports
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|err| Error::corrupt("employee", &record.employee_id, err))?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    Ok(employee::ActiveModel {
        employee_id: Set(record.employee_id.clone()),
        first_name: Set(record.first_name.clone()),
        last_name: Set(record.last_name.clone()),
        position: Set(record.position.clone()),
        department: Set(record.department.clone()),
        direct_reports: Set(direct_reports),
        created_at: Set(now),
        updated_at: Set(now),
    })
}

fn decode_employee(row: employee::Model) -> Result<Employee> {
    let direct_reports = match row.direct_reports {
        Some(doc) => serde_json::from_value(doc)
            .map_err(|err| Error::corrupt("employee", &row.employee_id, err))?,
        None => None,
    };
    Ok(Employee {
        employee_id: row.employee_id,
        first_name: row.first_name,
        last_name: row.last_name,
        position: row.position,
        department: row.department,
        direct_reports,
    })
}

fn decode_compensation(row: compensation::Model) -> Result<Compensation> {
    let employee = serde_json::from_value(row.employee)
        .map_err(|err| Error::corrupt("compensation", &row.employee_id, err))?;
    let salary = row
        .salary
        .parse::<Decimal>()
        .map_err(|err| Error::corrupt("compensation", &row.employee_id, err))?;
    Ok(Compensation {
        employee,
        salary,
        effective_date: row.effective_date,
    })
}
