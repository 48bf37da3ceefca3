use crate::{
    entities::{job_technician, maintenance_job, technician},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tracing::info;

/// Inserts the demo fixture on an empty database.
///
/// Safe to call on every startup; does nothing once any technician or job
/// exists.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), ServiceError> {
    let technicians_present = technician::Entity::find().count(db).await? > 0;
    let jobs_present = maintenance_job::Entity::find().count(db).await? > 0;
    if technicians_present || jobs_present {
        return Ok(());
    }

    let names = ["Juan Perez", "Carlos Gomez", "Lucia Martinez", "Sofia Ruiz"];
    let mut technicians = Vec::with_capacity(names.len());
    for name in names {
        let model = technician::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        technicians.push(model);
    }

    let now = Utc::now();
    let jobs: [(&str, &str, &str, &str, &str, bool, &[usize]); 3] = [
        (
            "Boeing 737",
            "Aerolineas Argentinas",
            "LV-FUA",
            "Pendiente",
            "Revision general previa a vuelo",
            false,
            &[0, 1],
        ),
        (
            "Airbus A320",
            "LATAM",
            "CC-BFQ",
            "EnProceso",
            "Cambio de filtro hidraulico",
            true,
            &[2],
        ),
        (
            "Embraer 190",
            "Flybondi",
            "LV-HKA",
            "Completado",
            "Inspeccion de cabina completa",
            false,
            &[3],
        ),
    ];

    for (equipment, company, plane, status, notes, anomaly, assigned) in jobs {
        let job = maintenance_job::ActiveModel {
            equipment: Set(equipment.to_string()),
            company: Set(company.to_string()),
            plane: Set(plane.to_string()),
            status: Set(status.to_string()),
            notes: Set(Some(notes.to_string())),
            anomaly: Set(anomaly),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;

        for &idx in assigned {
            job_technician::ActiveModel {
                job_id: Set(job.id),
                technician_id: Set(technicians[idx].id),
            }
            .insert(db)
            .await?;
        }
    }

    info!("seeded demo data");
    Ok(())
}
