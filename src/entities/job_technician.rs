use sea_orm::entity::prelude::*;

/// Link row for the job/technician many-to-many relation. Membership is
/// replaced wholesale on job updates, never merged.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "job_technicians")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub job_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub technician_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::maintenance_job::Entity",
        from = "Column::JobId",
        to = "super::maintenance_job::Column::Id",
        on_delete = "Cascade"
    )]
    MaintenanceJob,
    #[sea_orm(
        belongs_to = "super::technician::Entity",
        from = "Column::TechnicianId",
        to = "super::technician::Column::Id",
        on_delete = "Cascade"
    )]
    Technician,
}

impl Related<super::maintenance_job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceJob.def()
    }
}

impl Related<super::technician::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Technician.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
