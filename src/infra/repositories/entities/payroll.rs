use sea_orm::entity::prelude::*;

use crate::domain::Payroll;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payroll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub employee_id: i64,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub date: Date,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::EmployeeId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Payroll {
    fn from(model: Model) -> Self {
        Payroll {
            id: model.id,
            employee_id: model.employee_id,
            amount: model.amount,
            date: model.date,
            version: model.version,
        }
    }
}
