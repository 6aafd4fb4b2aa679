//! Demo employee directory: a five-person org chart plus one compensation
//! history, for local poking and the seed tests. Loading is idempotent.

use anyhow::Result;
use chrono::NaiveDate;
use platform_db::DbPool;
use roster::model::{Compensation, Employee};
use roster::store;
use rust_decimal::Decimal;
use tracing::info;

const LENNON_ID: &str = "16a596ae-edd3-4847-99fe-c4518e82c86f";
const MCCARTNEY_ID: &str = "b7839309-3348-463b-a7e3-5de1c168beb3";
const STARR_ID: &str = "03aa1462-ffa9-4978-901b-7c001562cf6f";
const BEST_ID: &str = "62c1084e-6e34-4630-93fd-9153afb65309";
const HARRISON_ID: &str = "c0c2293d-16bd-4383-8236-fa38491c185c";

pub async fn load_demo_directory(db: &DbPool) -> Result<()> {
    for record in demo_employees() {
        store::save_employee(db, record).await?;
    }
    // Compensation rows are append-only, so only seed them once.
    if store::find_latest_compensation_by_employee_id(db, LENNON_ID)
        .await?
        .is_none()
    {
        for record in demo_compensation() {
            store::insert_compensation(db, record).await?;
        }
    }
    info!("demo employee directory seeded");
    Ok(())
}

fn demo_employees() -> Vec<Employee> {
    vec![
        lennon(),
        employee(MCCARTNEY_ID, "Paul", "McCartney", "Developer I", None),
        employee(
            STARR_ID,
            "Ringo",
            "Starr",
            "Developer V",
            Some(vec![stub(BEST_ID), stub(HARRISON_ID)]),
        ),
        employee(BEST_ID, "Pete", "Best", "Developer II", None),
        employee(HARRISON_ID, "George", "Harrison", "Developer III", None),
    ]
}

fn lennon() -> Employee {
    employee(
        LENNON_ID,
        "John",
        "Lennon",
        "Development Manager",
        Some(vec![stub(MCCARTNEY_ID), stub(STARR_ID)]),
    )
}

fn demo_compensation() -> Vec<Compensation> {
    vec![
        Compensation {
            employee: lennon(),
            salary: Decimal::new(180_000, 0),
            effective_date: seed_date(2021, 3, 1),
        },
        Compensation {
            employee: lennon(),
            salary: Decimal::new(200_000, 0),
            effective_date: seed_date(2022, 3, 1),
        },
    ]
}

fn employee(
    id: &str,
    first: &str,
    last: &str,
    position: &str,
    direct_reports: Option<Vec<Employee>>,
) -> Employee {
    Employee {
        employee_id: id.to_string(),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        position: Some(position.to_string()),
        department: Some("Engineering".to_string()),
        direct_reports,
    }
}

fn stub(id: &str) -> Employee {
    Employee {
        employee_id: id.to_string(),
        first_name: None,
        last_name: None,
        position: None,
        department: None,
        direct_reports: None,
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}
