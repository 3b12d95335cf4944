use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    entities::profile::{ProfileInsert, ProfileRecord},
    errors::AppError,
    repositories::sqlx_repo::SqlxProfileRepo,
};

/// Gateway to the shared profile collection. One flat document per profile;
/// identifiers are store-assigned and stable across updates.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;

    async fn count_profiles(&self) -> Result<u64, AppError>;

    /// Creates a new document and returns its store-assigned identifier.
    async fn create_profile(&self, insert: &ProfileInsert) -> Result<Uuid, AppError>;

    async fn get_profile_by_id(&self, id: Uuid) -> Result<Option<ProfileRecord>, AppError>;

    /// Full-field overwrite conditional on the revision stamp; a record
    /// changed underneath the caller is a conflict, not a silent clobber.
    async fn update_profile(
        &self,
        id: Uuid,
        current_revision: i64,
        insert: &ProfileInsert,
    ) -> Result<ProfileRecord, AppError>;

    /// Every document in the collection, store-defined order.
    async fn list_profiles(&self) -> Result<Vec<ProfileRecord>, AppError>;
}

impl SqlxProfileRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProfileRepo { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn count_profiles(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;

        Ok(count as u64)
    }

    async fn create_profile(&self, insert: &ProfileInsert) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO profiles (
                owner_id,
                name,
                contact,
                summary,
                experience_text,
                education,
                skills,
                experience,
                profession,
                expertise,
                additional_info
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(&insert.owner_id)
        .bind(&insert.name)
        .bind(&insert.contact)
        .bind(&insert.summary)
        .bind(&insert.experience_text)
        .bind(&insert.education)
        .bind(&insert.skills)
        .bind(&insert.experience)
        .bind(&insert.profession)
        .bind(&insert.expertise)
        .bind(&insert.additional_info)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(id)
    }

    async fn get_profile_by_id(&self, id: Uuid) -> Result<Option<ProfileRecord>, AppError> {
        sqlx::query_as::<_, ProfileRecord>("SELECT * FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        current_revision: i64,
        insert: &ProfileInsert,
    ) -> Result<ProfileRecord, AppError> {
        let updated = sqlx::query_as::<_, ProfileRecord>(
            r#"
            UPDATE profiles
            SET
                owner_id = $1,
                name = $2,
                contact = $3,
                summary = $4,
                experience_text = $5,
                education = $6,
                skills = $7,
                experience = $8,
                profession = $9,
                expertise = $10,
                additional_info = $11,
                revision = revision + 1,
                updated_at = NOW()
            WHERE id = $12 AND revision = $13
            RETURNING *
            "#,
        )
        .bind(&insert.owner_id)
        .bind(&insert.name)
        .bind(&insert.contact)
        .bind(&insert.summary)
        .bind(&insert.experience_text)
        .bind(&insert.education)
        .bind(&insert.skills)
        .bind(&insert.experience)
        .bind(&insert.profession)
        .bind(&insert.expertise)
        .bind(&insert.additional_info)
        .bind(id)
        .bind(current_revision)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;

        updated.ok_or_else(|| {
            AppError::Conflict("Profile was changed by another save since it was loaded".to_string())
        })
    }

    async fn list_profiles(&self) -> Result<Vec<ProfileRecord>, AppError> {
        sqlx::query_as::<_, ProfileRecord>("SELECT * FROM profiles")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)
    }
}
