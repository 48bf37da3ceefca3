use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_technicians_table::Migration),
            Box::new(m20240101_000002_create_maintenance_jobs_table::Migration),
            Box::new(m20240101_000003_create_job_technicians_table::Migration),
        ]
    }
}

mod m20240101_000001_create_technicians_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_technicians_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Technicians::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Technicians::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Technicians::Name)
                                .string_len(100)
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Technicians::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Technicians {
        Table,
        Id,
        Name,
    }
}

mod m20240101_000002_create_maintenance_jobs_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_maintenance_jobs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MaintenanceJobs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MaintenanceJobs::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(MaintenanceJobs::Equipment)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaintenanceJobs::Company)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaintenanceJobs::Plane)
                                .string_len(100)
                                .not_null(),
                        )
                        .col(ColumnDef::new(MaintenanceJobs::Status).string().not_null())
                        .col(ColumnDef::new(MaintenanceJobs::Notes).string_len(500))
                        .col(
                            ColumnDef::new(MaintenanceJobs::Anomaly)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaintenanceJobs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(MaintenanceJobs::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_maintenance_jobs_status")
                        .table(MaintenanceJobs::Table)
                        .col(MaintenanceJobs::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_maintenance_jobs_created_at")
                        .table(MaintenanceJobs::Table)
                        .col(MaintenanceJobs::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MaintenanceJobs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum MaintenanceJobs {
        Table,
        Id,
        Equipment,
        Company,
        Plane,
        Status,
        Notes,
        Anomaly,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_job_technicians_table {
    use sea_orm_migration::prelude::*;

    use super::m20240101_000001_create_technicians_table::Technicians;
    use super::m20240101_000002_create_maintenance_jobs_table::MaintenanceJobs;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_job_technicians_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(JobTechnicians::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(JobTechnicians::JobId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(JobTechnicians::TechnicianId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(JobTechnicians::JobId)
                                .col(JobTechnicians::TechnicianId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_technicians_job_id")
                                .from(JobTechnicians::Table, JobTechnicians::JobId)
                                .to(MaintenanceJobs::Table, MaintenanceJobs::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_job_technicians_technician_id")
                                .from(JobTechnicians::Table, JobTechnicians::TechnicianId)
                                .to(Technicians::Table, Technicians::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(JobTechnicians::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum JobTechnicians {
        Table,
        JobId,
        TechnicianId,
    }
}
