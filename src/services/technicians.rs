use crate::{
    db::DbPool,
    entities::{job_technician, technician},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

/// Wire representation of a technician.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TechnicianResponse {
    pub id: i32,
    pub name: String,
}

impl From<technician::Model> for TechnicianResponse {
    fn from(model: technician::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

/// Partitions the requested ids into found technicians and missing ids.
///
/// Duplicate ids are collapsed before resolution, preserving first-occurrence
/// order for the missing list. Generic over the connection so the job
/// registry can resolve inside its own transaction.
pub async fn resolve_technicians<C: ConnectionTrait>(
    conn: &C,
    technician_ids: &[i32],
) -> Result<(Vec<technician::Model>, Vec<i32>), ServiceError> {
    let mut ids: Vec<i32> = Vec::with_capacity(technician_ids.len());
    for id in technician_ids {
        if !ids.contains(id) {
            ids.push(*id);
        }
    }
    if ids.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let found = technician::Entity::find()
        .filter(technician::Column::Id.is_in(ids.clone()))
        .order_by_asc(technician::Column::Id)
        .all(conn)
        .await?;

    let missing: Vec<i32> = ids
        .into_iter()
        .filter(|id| !found.iter().any(|t| t.id == *id))
        .collect();

    Ok((found, missing))
}

/// Owns technician identity records and name lookups.
#[derive(Clone)]
pub struct TechnicianService {
    db: Arc<DbPool>,
}

impl TechnicianService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<TechnicianResponse>, ServiceError> {
        let technicians = technician::Entity::find()
            .order_by_asc(technician::Column::Id)
            .all(&*self.db)
            .await?;
        Ok(technicians.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<TechnicianResponse>, ServiceError> {
        Ok(technician::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .map(Into::into))
    }

    #[instrument(skip(self, name))]
    pub async fn create(&self, name: String) -> Result<TechnicianResponse, ServiceError> {
        let model = technician::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(technician_id = model.id, "technician created");
        Ok(model.into())
    }

    #[instrument(skip(self, name))]
    pub async fn update(&self, id: i32, name: String) -> Result<(), ServiceError> {
        let existing = technician::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Technician {id} not found")))?;

        let mut active: technician::ActiveModel = existing.into();
        active.name = Set(name);
        active.update(&*self.db).await?;

        info!(technician_id = id, "technician updated");
        Ok(())
    }

    /// Removes the technician together with all of its job memberships.
    /// The jobs themselves are left untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;

        let existing = technician::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Technician {id} not found")))?;

        job_technician::Entity::delete_many()
            .filter(job_technician::Column::TechnicianId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;

        txn.commit().await?;
        info!(technician_id = id, "technician deleted");
        Ok(())
    }
}
