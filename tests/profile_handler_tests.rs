use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use cvbank_backend::{
    entities::identity::Identity,
    entities::profile::{ProfileForm, ProfileInsert, ProfileRecord},
    errors::AppError,
    repositories::profile::ProfileRepository,
    use_cases::profiles::ProfileHandler,
};

mock! {
    pub ProfileRepo {}

    #[async_trait]
    impl ProfileRepository for ProfileRepo {
        async fn check_connection(&self) -> Result<(), AppError>;
        async fn count_profiles(&self) -> Result<u64, AppError>;
        async fn create_profile(&self, insert: &ProfileInsert) -> Result<Uuid, AppError>;
        async fn get_profile_by_id(&self, id: Uuid) -> Result<Option<ProfileRecord>, AppError>;
        async fn update_profile(
            &self,
            id: Uuid,
            current_revision: i64,
            insert: &ProfileInsert,
        ) -> Result<ProfileRecord, AppError>;
        async fn list_profiles(&self) -> Result<Vec<ProfileRecord>, AppError>;
    }
}

fn user(id: &str) -> Identity {
    Identity { user_id: id.to_string(), is_admin: false }
}

fn admin() -> Identity {
    Identity { user_id: "admin_456".to_string(), is_admin: true }
}

fn filled_form() -> ProfileForm {
    ProfileForm {
        name: "Ada Lovelace".to_string(),
        contact: "ada@example.com".to_string(),
        summary: "Analytical engine programmer".to_string(),
        profession: vec!["IT".to_string()],
        ..ProfileForm::default()
    }
}

fn stored_record(owner: &str, revision: i64) -> ProfileRecord {
    let now = Utc::now();
    ProfileRecord {
        id: Uuid::new_v4(),
        owner_id: owner.to_string(),
        name: "Ada Lovelace".to_string(),
        contact: "ada@example.com".to_string(),
        summary: String::new(),
        experience_text: String::new(),
        education: String::new(),
        skills: String::new(),
        experience: vec![],
        profession: vec!["IT".to_string()],
        expertise: vec![],
        additional_info: vec![],
        revision,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn publish_stamps_owner_and_discards_blank_info_entries() {
    let mut repo = MockProfileRepo::new();
    let new_id = Uuid::new_v4();

    repo.expect_create_profile()
        .withf(|insert: &ProfileInsert| {
            insert.owner_id == "user_1"
                && insert.additional_info
                    == vec!["Certified X".to_string(), "Award Y".to_string()]
        })
        .times(1)
        .returning(move |_| Ok(new_id));

    let handler = ProfileHandler::new(repo);

    let form = ProfileForm {
        additional_info: vec![
            String::new(),
            "Certified X".to_string(),
            "   ".to_string(),
            "Award Y".to_string(),
        ],
        ..filled_form()
    };

    let created = handler.publish(&form, &user("user_1")).await.unwrap();

    assert_eq!(created.id, new_id);
    assert_eq!(created.message, "CV published successfully");
}

#[tokio::test]
async fn empty_submission_is_rejected_before_any_store_call() {
    // No expectations: any repository call would panic the mock.
    let repo = MockProfileRepo::new();
    let handler = ProfileHandler::new(repo);

    let form = ProfileForm {
        additional_info: vec![String::new(), "   ".to_string()],
        ..ProfileForm::default()
    };

    let err = handler.publish(&form, &user("user_1")).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn unknown_categorical_value_is_rejected() {
    let repo = MockProfileRepo::new();
    let handler = ProfileHandler::new(repo);

    let form = ProfileForm {
        profession: vec!["Astrology".to_string()],
        ..filled_form()
    };

    let err = handler.publish(&form, &user("user_1")).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let mut repo = MockProfileRepo::new();
    let record = stored_record("someone_else", 0);
    let id = record.id;

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let handler = ProfileHandler::new(repo);

    let err = handler
        .update(id, &filled_form(), None, &user("user_1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ForbiddenAccess));
}

#[tokio::test]
async fn admin_can_update_any_profile_and_owner_is_restamped() {
    let mut repo = MockProfileRepo::new();
    let record = stored_record("user_1", 3);
    let id = record.id;
    let mut updated = record.clone();
    updated.owner_id = "admin_456".to_string();
    updated.revision = 4;

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(record.clone())));
    repo.expect_update_profile()
        .withf(move |got_id, revision, insert| {
            *got_id == id && *revision == 3 && insert.owner_id == "admin_456"
        })
        .times(1)
        .returning(move |_, _, _| Ok(updated.clone()));

    let handler = ProfileHandler::new(repo);

    let result = handler
        .update(id, &filled_form(), Some(3), &admin())
        .await
        .unwrap();
    assert_eq!(result.owner_id, "admin_456");
    assert_eq!(result.revision, 4);
}

#[tokio::test]
async fn resubmitting_unchanged_fields_writes_the_same_document() {
    let mut repo = MockProfileRepo::new();
    let stored = stored_record("user_1", 2);
    let id = stored.id;
    let form = ProfileForm::from(&stored);

    let expected_insert = ProfileInsert {
        owner_id: stored.owner_id.clone(),
        name: stored.name.clone(),
        contact: stored.contact.clone(),
        summary: stored.summary.clone(),
        experience_text: stored.experience_text.clone(),
        education: stored.education.clone(),
        skills: stored.skills.clone(),
        experience: stored.experience.clone(),
        profession: stored.profession.clone(),
        expertise: stored.expertise.clone(),
        additional_info: stored.additional_info.clone(),
    };
    let written = {
        let mut w = stored.clone();
        w.revision = 3;
        w
    };

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_profile()
        .withf(move |got_id, revision, insert| {
            *got_id == id && *revision == 2 && *insert == expected_insert
        })
        .times(1)
        .returning(move |_, _, _| Ok(written.clone()));

    let handler = ProfileHandler::new(repo);

    let result = handler
        .update(id, &form, Some(2), &user("user_1"))
        .await
        .unwrap();

    // Only the metadata moved; every editable field round-tripped intact.
    assert_eq!(result.revision, 3);
    assert_eq!(ProfileForm::from(&result), form);
}

#[tokio::test]
async fn stale_revision_is_a_conflict_and_nothing_is_written() {
    let mut repo = MockProfileRepo::new();
    let record = stored_record("user_1", 2);
    let id = record.id;

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(record.clone())));

    let handler = ProfileHandler::new(repo);

    let err = handler
        .update(id, &filled_form(), Some(1), &user("user_1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn update_of_missing_profile_is_not_found() {
    let mut repo = MockProfileRepo::new();
    repo.expect_get_profile_by_id().returning(|_| Ok(None));

    let handler = ProfileHandler::new(repo);

    let err = handler
        .update(Uuid::new_v4(), &filled_form(), None, &user("user_1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn empty_collection_lists_as_empty_not_as_error() {
    let mut repo = MockProfileRepo::new();
    repo.expect_list_profiles().returning(|| Ok(vec![]));

    let handler = ProfileHandler::new(repo);

    let listed = handler.list().await.unwrap();
    assert!(listed.is_empty());
}
