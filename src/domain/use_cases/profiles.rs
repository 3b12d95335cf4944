use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::identity::Identity,
    entities::profile::{ProfileCreatedResponse, ProfileForm, ProfileRecord},
    errors::{AppError, FieldError},
    repositories::profile::ProfileRepository,
};

pub struct ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub profile_repo: R,
}

impl<R> ProfileHandler<R>
where
    R: ProfileRepository,
{
    pub fn new(profile_repo: R) -> Self {
        ProfileHandler { profile_repo }
    }

    /// Publishes a new profile. The owner is always the acting identity,
    /// whatever the client tried to send.
    pub async fn publish(
        &self,
        form: &ProfileForm,
        identity: &Identity,
    ) -> Result<ProfileCreatedResponse, AppError> {
        form.validate()?;
        ensure_has_content(form)?;

        let insert = form.prepare_for_insert(&identity.user_id);
        let id = self.profile_repo.create_profile(&insert).await?;

        tracing::info!(profile_id = %id, owner = %identity.user_id, "profile published");

        Ok(ProfileCreatedResponse {
            id,
            message: "CV published successfully".to_string(),
        })
    }

    /// Overwrites an existing profile in full, keeping its identifier.
    /// Only the owner or the admin identity may update; a stale
    /// `expected_revision` is a conflict and nothing is written.
    pub async fn update(
        &self,
        id: Uuid,
        form: &ProfileForm,
        expected_revision: Option<i64>,
        identity: &Identity,
    ) -> Result<ProfileRecord, AppError> {
        form.validate()?;
        ensure_has_content(form)?;

        let current = self
            .profile_repo
            .get_profile_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))?;

        if !identity.can_edit(&current.owner_id) {
            return Err(AppError::ForbiddenAccess);
        }

        if let Some(revision) = expected_revision {
            if revision != current.revision {
                return Err(AppError::Conflict(
                    "Profile was changed by another save since it was loaded".to_string(),
                ));
            }
        }

        let insert = form.prepare_for_insert(&identity.user_id);
        let updated = self
            .profile_repo
            .update_profile(id, current.revision, &insert)
            .await?;

        tracing::info!(profile_id = %id, owner = %identity.user_id, "profile updated");

        Ok(updated)
    }

    /// Every stored profile, in store-defined order. An empty collection is
    /// not an error.
    pub async fn list(&self) -> Result<Vec<ProfileRecord>, AppError> {
        self.profile_repo.list_profiles().await
    }
}

fn ensure_has_content(form: &ProfileForm) -> Result<(), AppError> {
    if form.has_content() {
        Ok(())
    } else {
        Err(AppError::ValidationError(vec![FieldError {
            field: "form".to_string(),
            message: "Please fill out at least one field to publish your CV".to_string(),
        }]))
    }
}
