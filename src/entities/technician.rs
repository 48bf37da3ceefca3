use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "technicians")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::job_technician::Entity")]
    JobTechnician,
}

impl Related<super::job_technician::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobTechnician.def()
    }
}

impl Related<super::maintenance_job::Entity> for Entity {
    fn to() -> RelationDef {
        super::job_technician::Relation::MaintenanceJob.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::job_technician::Relation::Technician.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
