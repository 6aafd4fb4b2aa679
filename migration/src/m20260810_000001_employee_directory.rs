use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Employee {
    Table,
    EmployeeId,
    FirstName,
    LastName,
    Position,
    Department,
    DirectReports,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Compensation {
    Table,
    Seq,
    EmployeeId,
    Employee,
    Salary,
    EffectiveDate,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::EmployeeId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employee::FirstName).string_len(128))
                    .col(ColumnDef::new(Employee::LastName).string_len(128))
                    .col(ColumnDef::new(Employee::Position).string_len(256))
                    .col(ColumnDef::new(Employee::Department).string_len(128))
                    .col(ColumnDef::new(Employee::DirectReports).json())
                    .col(
                        ColumnDef::new(Employee::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employee::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Compensation::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Compensation::Seq)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Compensation::EmployeeId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Compensation::Employee).json().not_null())
                    .col(
                        ColumnDef::new(Compensation::Salary)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Compensation::EffectiveDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Compensation::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_compensation_employee_date")
                    .table(Compensation::Table)
                    .col(Compensation::EmployeeId)
                    .col(Compensation::EffectiveDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Compensation::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await?;
        Ok(())
    }
}
