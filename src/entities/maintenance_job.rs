use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Persisted maintenance job row.
///
/// `status` stays a plain string column; the canonical label mapping lives
/// in `models::JobStatus` and is applied at the service boundary.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_jobs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub equipment: String,
    pub company: String,
    pub plane: String,
    pub status: String,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
    pub anomaly: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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

impl Related<super::technician::Entity> for Entity {
    fn to() -> RelationDef {
        super::job_technician::Relation::Technician.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::job_technician::Relation::MaintenanceJob.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
