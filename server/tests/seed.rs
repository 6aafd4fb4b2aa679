use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use platform_db::DatabaseSettings;
use roster::{CompensationService, EmployeeService};
use roster_server::seed;
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, PaginatorTrait};

const LENNON_ID: &str = "16a596ae-edd3-4847-99fe-c4518e82c86f";

#[tokio::test]
async fn demo_directory_seeds_and_reseeds_cleanly() {
    let db = platform_db::connect(&DatabaseSettings::new("sqlite::memory:"))
        .await
        .unwrap();
    Migrator::up(&db, None).await.unwrap();

    seed::load_demo_directory(&db).await.unwrap();
    // A second run must overwrite employees in place and add nothing.
    seed::load_demo_directory(&db).await.unwrap();

    let employees = EmployeeService::new(db.clone());
    let lennon = employees.read(LENNON_ID).await.unwrap();
    assert_eq!(lennon.first_name.as_deref(), Some("John"));
    assert_eq!(lennon.last_name.as_deref(), Some("Lennon"));
    assert_eq!(lennon.position.as_deref(), Some("Development Manager"));
    assert_eq!(lennon.department.as_deref(), Some("Engineering"));

    let structure = employees.reporting_structure(LENNON_ID).await.unwrap();
    assert_eq!(structure.number_of_reports, 4);

    let compensation = CompensationService::new(db.clone());
    let latest = compensation.find_by_employee_id(LENNON_ID).await.unwrap();
    assert_eq!(latest.salary, Decimal::new(200_000, 0));
    assert_eq!(
        latest.effective_date,
        NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
    );

    let rows = entity::compensation::Entity::find().count(&db).await.unwrap();
    assert_eq!(rows, 2);
}
