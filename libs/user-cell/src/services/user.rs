use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use shared_database::{InsertAck, Query, SupabaseClient, UpdateAck};
use shared_models::auth::Role;
use shared_models::error::AppError;

use crate::models::{CreateUserRequest, UserRecord};

const USERS_TABLE: &str = "users";

pub struct UserService<'a> {
    store: &'a SupabaseClient,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a SupabaseClient) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        Ok(self.store.select(USERS_TABLE, &Query::new()).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self
            .store
            .select_one(USERS_TABLE, &Query::new().eq("email", email))
            .await?)
    }

    pub async fn is_admin(&self, email: &str) -> Result<bool, AppError> {
        let user = self.find_by_email(email).await?;
        Ok(Role::from_record(user.as_ref().and_then(|u| u.role.as_deref())).is_admin())
    }

    /// Register a user. Re-registering an existing email is acknowledged
    /// without creating a second record.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<InsertAck, AppError> {
        if request.email.trim().is_empty() {
            return Err(AppError::ValidationError("email is required".to_string()));
        }

        debug!("Registering user {}", request.email);

        let rows: Vec<UserRecord> = self
            .store
            .insert_ignoring_duplicates(
                USERS_TABLE,
                json!({ "name": request.name, "email": request.email }),
                "email",
            )
            .await?;

        Ok(match rows.into_iter().next() {
            Some(user) => InsertAck::inserted(user.id),
            None => InsertAck::ignored(),
        })
    }

    /// Grant the admin role to user `id`, creating a bare record when none
    /// exists.
    pub async fn make_admin(&self, id: Uuid) -> Result<UpdateAck, AppError> {
        let id_filter = Query::new().eq("id", &id.to_string());
        let existing: Option<UserRecord> = self.store.select_one(USERS_TABLE, &id_filter).await?;

        match existing {
            Some(user) if Role::from_record(user.role.as_deref()).is_admin() => {
                debug!("User {} is already an admin", id);
                Ok(UpdateAck {
                    acknowledged: true,
                    matched_count: 1,
                    modified_count: 0,
                    upserted_id: None,
                })
            }
            Some(_) => {
                let updated: Vec<UserRecord> = self
                    .store
                    .update(USERS_TABLE, &id_filter, json!({ "role": "admin" }))
                    .await?;
                debug!("Promoted user {} to admin", id);
                Ok(UpdateAck {
                    acknowledged: true,
                    matched_count: updated.len() as u64,
                    modified_count: updated.len() as u64,
                    upserted_id: None,
                })
            }
            None => {
                let _: Vec<UserRecord> = self
                    .store
                    .insert(USERS_TABLE, json!({ "id": id, "role": "admin" }))
                    .await?;
                debug!("Created admin record {}", id);
                Ok(UpdateAck {
                    acknowledged: true,
                    matched_count: 0,
                    modified_count: 0,
                    upserted_id: Some(id),
                })
            }
        }
    }
}
