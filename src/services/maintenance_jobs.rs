//! Maintenance job registry: lifecycle mutations and the
//! filter/sort/paginate listing pipeline.

use crate::{
    db::DbPool,
    entities::{job_technician, maintenance_job, technician},
    errors::ServiceError,
    models::{JobFilter, JobListQuery, JobStatus, SortDir, SortField},
    services::technicians::{resolve_technicians, TechnicianResponse},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Wire representation of a maintenance job with its technician set expanded
/// to `{id, name}` pairs.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: i32,
    pub equipment: String,
    pub company: String,
    pub plane: String,
    pub status: JobStatus,
    pub notes: Option<String>,
    pub anomaly: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub technicians: Vec<TechnicianResponse>,
}

/// One result page of the job listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedJobs {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub items: Vec<JobResponse>,
}

/// Validated input for job creation and full replacement.
#[derive(Debug, Clone)]
pub struct JobInput {
    pub equipment: String,
    pub company: String,
    pub plane: String,
    pub technician_ids: Vec<i32>,
    pub status: JobStatus,
    pub notes: Option<String>,
    pub anomaly: bool,
}

/// A job may only be Completado when its notes carry real content.
fn check_completion_rule(status: JobStatus, notes: Option<&str>) -> Result<(), ServiceError> {
    if status == JobStatus::Completed && notes.map_or(true, |n| n.trim().is_empty()) {
        return Err(ServiceError::Validation(
            "Notes are required when status is Completado.".to_string(),
        ));
    }
    Ok(())
}

/// Case-insensitive substring predicate over a text column.
fn contains_ci(column: maintenance_job::Column, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", term.to_lowercase());
    Expr::expr(Func::lower(Expr::col((maintenance_job::Entity, column)))).like(pattern)
}

/// Translates the filter specification into storage predicates. Present
/// filters AND-compose; the free-text search is a nested OR over the text
/// columns, additive to the field-specific filters.
fn filter_condition(filter: &JobFilter) -> Condition {
    use maintenance_job::Column;

    let mut condition = Condition::all();
    if let Some(status) = filter.status {
        condition = condition.add(Column::Status.eq(status.as_str()));
    }
    if let Some(company) = &filter.company {
        condition = condition.add(contains_ci(Column::Company, company));
    }
    if let Some(plane) = &filter.plane {
        condition = condition.add(contains_ci(Column::Plane, plane));
    }
    if let Some(equipment) = &filter.equipment {
        condition = condition.add(contains_ci(Column::Equipment, equipment));
    }
    if let Some(anomaly) = filter.anomaly {
        condition = condition.add(Column::Anomaly.eq(anomaly));
    }
    if let Some(term) = &filter.search {
        condition = condition.add(
            Condition::any()
                .add(contains_ci(Column::Equipment, term))
                .add(contains_ci(Column::Company, term))
                .add(contains_ci(Column::Plane, term))
                .add(contains_ci(Column::Notes, term)),
        );
    }
    condition
}

fn sort_column(field: SortField) -> maintenance_job::Column {
    use maintenance_job::Column;

    match field {
        SortField::Id => Column::Id,
        SortField::Equipment => Column::Equipment,
        SortField::Company => Column::Company,
        SortField::Plane => Column::Plane,
        SortField::Status => Column::Status,
        SortField::CreatedAt => Column::CreatedAt,
        SortField::UpdatedAt => Column::UpdatedAt,
    }
}

fn to_response(
    job: maintenance_job::Model,
    mut technicians: Vec<technician::Model>,
) -> Result<JobResponse, ServiceError> {
    technicians.sort_by_key(|t| t.id);
    let status = JobStatus::from_stored(&job.status)?;

    Ok(JobResponse {
        id: job.id,
        equipment: job.equipment,
        company: job.company,
        plane: job.plane,
        status,
        notes: job.notes,
        anomaly: job.anomaly,
        created_at: job.created_at,
        updated_at: job.updated_at,
        technicians: technicians.into_iter().map(Into::into).collect(),
    })
}

async fn link_technicians<C: ConnectionTrait>(
    conn: &C,
    job_id: i32,
    technicians: &[technician::Model],
) -> Result<(), ServiceError> {
    if technicians.is_empty() {
        return Ok(());
    }

    let links = technicians.iter().map(|t| job_technician::ActiveModel {
        job_id: Set(job_id),
        technician_id: Set(t.id),
    });
    job_technician::Entity::insert_many(links).exec(conn).await?;
    Ok(())
}

/// Owns job records, their lifecycle status and their technician membership.
#[derive(Clone)]
pub struct MaintenanceJobService {
    db: Arc<DbPool>,
}

impl MaintenanceJobService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Creates a job. Technician resolution and the insert share one
    /// transaction so a concurrent technician delete cannot leave a
    /// dangling membership.
    #[instrument(skip(self, input), fields(equipment = %input.equipment))]
    pub async fn create(&self, input: JobInput) -> Result<JobResponse, ServiceError> {
        check_completion_rule(input.status, input.notes.as_deref())?;

        let txn = self.db.begin().await?;

        let (technicians, missing) = resolve_technicians(&txn, &input.technician_ids).await?;
        if !missing.is_empty() {
            return Err(ServiceError::MissingTechnicians(missing));
        }

        let now = Utc::now();
        let job = maintenance_job::ActiveModel {
            equipment: Set(input.equipment),
            company: Set(input.company),
            plane: Set(input.plane),
            status: Set(input.status.as_str().to_string()),
            notes: Set(input.notes),
            anomaly: Set(input.anomaly),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        link_technicians(&txn, job.id, &technicians).await?;
        txn.commit().await?;

        info!(job_id = job.id, "maintenance job created");
        to_response(job, technicians)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<JobResponse>, ServiceError> {
        let Some(job) = maintenance_job::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let technicians = job
            .find_related(technician::Entity)
            .order_by_asc(technician::Column::Id)
            .all(&*self.db)
            .await?;

        to_response(job, technicians).map(Some)
    }

    /// Full replacement of all mutable fields. The technician membership is
    /// replaced wholesale: technicians absent from the new list are unlinked.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: JobInput) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let job = maintenance_job::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Maintenance job {id} not found")))?;

        check_completion_rule(input.status, input.notes.as_deref())?;

        let (technicians, missing) = resolve_technicians(&txn, &input.technician_ids).await?;
        if !missing.is_empty() {
            return Err(ServiceError::MissingTechnicians(missing));
        }

        let mut active: maintenance_job::ActiveModel = job.into();
        active.equipment = Set(input.equipment);
        active.company = Set(input.company);
        active.plane = Set(input.plane);
        active.status = Set(input.status.as_str().to_string());
        active.notes = Set(input.notes);
        active.anomaly = Set(input.anomaly);
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        job_technician::Entity::delete_many()
            .filter(job_technician::Column::JobId.eq(id))
            .exec(&txn)
            .await?;
        link_technicians(&txn, id, &technicians).await?;

        txn.commit().await?;
        info!(job_id = id, "maintenance job updated");
        Ok(())
    }

    /// Status-only update. The completion rule is evaluated against the
    /// job's stored notes; this operation accepts no replacement notes.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: i32, status: JobStatus) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let job = maintenance_job::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Maintenance job {id} not found")))?;

        check_completion_rule(status, job.notes.as_deref())?;

        let mut active: maintenance_job::ActiveModel = job.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;
        info!(job_id = id, new_status = status.as_str(), "job status updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let job = maintenance_job::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Maintenance job {id} not found")))?;

        job_technician::Entity::delete_many()
            .filter(job_technician::Column::JobId.eq(id))
            .exec(&txn)
            .await?;
        job.delete(&txn).await?;

        txn.commit().await?;
        info!(job_id = id, "maintenance job deleted");
        Ok(())
    }

    /// Filter, sort and paginate jobs. The total is counted over the
    /// filtered pre-pagination set; technician sets are batch-loaded through
    /// the link table.
    #[instrument(skip(self))]
    pub async fn list(&self, query: JobListQuery) -> Result<PagedJobs, ServiceError> {
        let mut select = maintenance_job::Entity::find().filter(filter_condition(&query.filter));

        let column = sort_column(query.sort_field);
        select = match query.sort_dir {
            SortDir::Asc => select.order_by_asc(column),
            SortDir::Desc => select.order_by_desc(column),
        };
        if query.sort_field != SortField::Id {
            // deterministic tie-break
            select = select.order_by_asc(maintenance_job::Column::Id);
        }

        let paginator = select.paginate(&*self.db, query.page_size);
        let total = paginator.num_items().await?;
        let jobs = paginator.fetch_page(query.page - 1).await?;

        let technician_sets = jobs
            .load_many_to_many(technician::Entity, job_technician::Entity, &*self.db)
            .await?;

        let items = jobs
            .into_iter()
            .zip(technician_sets)
            .map(|(job, technicians)| to_response(job, technicians))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            total,
            page = query.page,
            returned = items.len(),
            "maintenance jobs listed"
        );

        Ok(PagedJobs {
            page: query.page,
            page_size: query.page_size,
            total,
            items,
        })
    }

    /// Unpaginated listing of jobs in exactly the given status.
    #[instrument(skip(self))]
    pub async fn by_status(&self, status: JobStatus) -> Result<Vec<JobResponse>, ServiceError> {
        let jobs = maintenance_job::Entity::find()
            .filter(maintenance_job::Column::Status.eq(status.as_str()))
            .order_by_asc(maintenance_job::Column::Id)
            .all(&*self.db)
            .await?;

        let technician_sets = jobs
            .load_many_to_many(technician::Entity, job_technician::Entity, &*self.db)
            .await?;

        jobs.into_iter()
            .zip(technician_sets)
            .map(|(job, technicians)| to_response(job, technicians))
            .collect()
    }
}
