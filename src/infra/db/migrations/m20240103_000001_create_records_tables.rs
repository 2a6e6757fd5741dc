//! Migration: Create customers, payroll and billing tables.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Customers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Customers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Customers::Name).string().not_null())
                    .col(ColumnDef::new(Customers::Email).string().not_null())
                    .col(ColumnDef::new(Customers::Phone).string().not_null().default(""))
                    .col(ColumnDef::new(Customers::Address).string().not_null().default(""))
                    .col(version_column(Customers::Version))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payroll::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payroll::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payroll::EmployeeId).big_integer().not_null())
                    .col(ColumnDef::new(Payroll::Amount).double().not_null())
                    .col(ColumnDef::new(Payroll::Date).date().not_null())
                    .col(version_column(Payroll::Version))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payroll_employee_id")
                            .from(Payroll::Table, Payroll::EmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Billing::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Billing::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Billing::CustomerId).big_integer().not_null())
                    .col(ColumnDef::new(Billing::Amount).double().not_null())
                    .col(ColumnDef::new(Billing::Date).date().not_null())
                    .col(version_column(Billing::Version))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_billing_customer_id")
                            .from(Billing::Table, Billing::CustomerId)
                            .to(Customers::Table, Customers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Billing::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payroll::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await
    }
}

fn version_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).integer().not_null().default(1).to_owned()
}

#[derive(Iden)]
enum Customers {
    Table,
    Id,
    CreatedAt,
    Name,
    Email,
    Phone,
    Address,
    Version,
}

#[derive(Iden)]
enum Payroll {
    Table,
    Id,
    EmployeeId,
    Amount,
    Date,
    Version,
}

#[derive(Iden)]
enum Billing {
    Table,
    Id,
    CustomerId,
    Amount,
    Date,
    Version,
}
