use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_database::{DeleteAck, InsertAck, Query, SupabaseClient};
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, Doctor};

const DOCTORS_TABLE: &str = "doctors";

pub struct DoctorService<'a> {
    store: &'a SupabaseClient,
}

impl<'a> DoctorService<'a> {
    pub fn new(store: &'a SupabaseClient) -> Self {
        Self { store }
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, AppError> {
        Ok(self.store.select(DOCTORS_TABLE, &Query::new().order("name")).await?)
    }

    pub async fn create_doctor(&self, request: CreateDoctorRequest) -> Result<InsertAck, AppError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Missing required doctor fields: {}",
                missing.join(", ")
            )));
        }

        debug!("Creating doctor record for {}", request.email);

        let rows: Vec<Doctor> = self
            .store
            .insert(
                DOCTORS_TABLE,
                json!({
                    "name": request.name,
                    "email": request.email,
                    "specialty": request.specialty,
                    "image": request.image
                }),
            )
            .await?;

        let doctor = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Database("Store returned no doctor row".to_string()))?;

        Ok(InsertAck::inserted(doctor.id))
    }

    pub async fn delete_doctor(&self, id: Uuid) -> Result<DeleteAck, AppError> {
        let removed: Vec<Doctor> = self
            .store
            .delete(DOCTORS_TABLE, &Query::new().eq("id", &id.to_string()))
            .await?;

        debug!("Deleted {} doctor record(s) for {}", removed.len(), id);
        Ok(DeleteAck::deleted(removed.len()))
    }
}
