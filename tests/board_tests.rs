use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use cvbank_backend::{
    constants::UNSPECIFIED_GROUP,
    entities::board::{FormState, GroupBy, Listing},
    entities::identity::Identity,
    entities::profile::{ProfileForm, ProfileInsert, ProfileRecord},
    errors::AppError,
    repositories::profile::ProfileRepository,
    use_cases::board::{build_listing, BoardHandler},
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

fn board(repo: MockProfileRepo) -> BoardHandler<MockProfileRepo> {
    BoardHandler::new(ProfileHandler::new(repo))
}

fn user(id: &str) -> Identity {
    Identity { user_id: id.to_string(), is_admin: false }
}

fn admin() -> Identity {
    Identity { user_id: "admin_456".to_string(), is_admin: true }
}

fn record(owner: &str, name: &str, profession: &[&str]) -> ProfileRecord {
    let now = Utc::now();
    ProfileRecord {
        id: Uuid::new_v4(),
        owner_id: owner.to_string(),
        name: name.to_string(),
        contact: String::new(),
        summary: String::new(),
        experience_text: String::new(),
        education: String::new(),
        skills: String::new(),
        experience: vec![],
        profession: profession.iter().map(|p| p.to_string()).collect(),
        expertise: vec![],
        additional_info: vec![],
        revision: 0,
        created_at: now,
        updated_at: now,
    }
}

// --- Form state machine ---

#[test]
fn composing_starts_with_one_blank_info_slot() {
    let state = FormState::composing();
    assert_eq!(state.draft().additional_info, vec![String::new()]);
}

#[test]
fn add_info_block_appends_a_slot_in_both_states() {
    let composing = FormState::composing().add_info_block();
    assert_eq!(composing.draft().additional_info.len(), 2);

    let editing = FormState::Editing {
        profile_id: Uuid::new_v4(),
        revision: 1,
        draft: ProfileForm::blank(),
    };
    assert_eq!(editing.add_info_block().draft().additional_info.len(), 2);
}

#[tokio::test]
async fn begin_edit_by_owner_captures_revision_and_prefills_draft() {
    let mut repo = MockProfileRepo::new();
    let mut stored = record("user_1", "Ada", &["IT"]);
    stored.revision = 5;
    stored.additional_info = vec!["Certified X".to_string()];
    let id = stored.id;
    let expected_draft = ProfileForm::from(&stored);

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let state = board(repo).begin_edit(id, &user("user_1")).await.unwrap();

    match state {
        FormState::Editing { profile_id, revision, draft } => {
            assert_eq!(profile_id, id);
            assert_eq!(revision, 5);
            assert_eq!(draft, expected_draft);
        }
        other => panic!("expected Editing state, got {:?}", other),
    }
}

#[tokio::test]
async fn begin_edit_fills_a_blank_slot_when_record_has_no_additional_info() {
    let mut repo = MockProfileRepo::new();
    let stored = record("user_1", "Ada", &[]);
    let id = stored.id;

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let state = board(repo).begin_edit(id, &user("user_1")).await.unwrap();
    assert_eq!(state.draft().additional_info, vec![String::new()]);
}

#[tokio::test]
async fn begin_edit_by_stranger_is_forbidden() {
    let mut repo = MockProfileRepo::new();
    let stored = record("user_1", "Ada", &["IT"]);
    let id = stored.id;

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let err = board(repo).begin_edit(id, &user("user_2")).await.unwrap_err();
    assert!(matches!(err, AppError::ForbiddenAccess));
}

#[tokio::test]
async fn begin_edit_by_admin_is_allowed() {
    let mut repo = MockProfileRepo::new();
    let stored = record("user_1", "Ada", &["IT"]);
    let id = stored.id;

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(stored.clone())));

    let state = board(repo).begin_edit(id, &admin()).await.unwrap();
    assert!(matches!(state, FormState::Editing { .. }));
}

#[tokio::test]
async fn submit_while_composing_publishes_and_resets_the_form() {
    let mut repo = MockProfileRepo::new();
    let new_id = Uuid::new_v4();

    repo.expect_create_profile()
        .withf(|insert: &ProfileInsert| insert.owner_id == "user_1")
        .times(1)
        .returning(move |_| Ok(new_id));

    let state = FormState::Composing {
        draft: ProfileForm {
            name: "Ada".to_string(),
            ..ProfileForm::default()
        },
    };

    let outcome = board(repo).submit(&state, &user("user_1")).await.unwrap();

    assert_eq!(outcome.profile_id, new_id);
    assert_eq!(outcome.state, FormState::composing());
}

#[tokio::test]
async fn submit_while_editing_updates_with_the_captured_revision() {
    let mut repo = MockProfileRepo::new();
    let stored = record("user_1", "Ada", &["IT"]);
    let id = stored.id;
    let updated = record("user_1", "Ada Lovelace", &["IT"]);

    repo.expect_get_profile_by_id()
        .returning(move |_| Ok(Some(stored.clone())));
    repo.expect_update_profile()
        .withf(move |got_id, revision, _| *got_id == id && *revision == 0)
        .times(1)
        .returning(move |_, _, _| Ok(updated.clone()));

    let state = FormState::Editing {
        profile_id: id,
        revision: 0,
        draft: ProfileForm {
            name: "Ada Lovelace".to_string(),
            ..ProfileForm::default()
        },
    };

    let outcome = board(repo).submit(&state, &user("user_1")).await.unwrap();

    assert_eq!(outcome.message, "CV updated successfully");
    assert_eq!(outcome.state, FormState::composing());
}

#[tokio::test]
async fn submitting_an_empty_draft_never_reaches_the_store() {
    let repo = MockProfileRepo::new();

    let err = board(repo)
        .submit(&FormState::composing(), &user("user_1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

// --- Grouped listing ---

#[test]
fn ungrouped_listing_has_exactly_one_entry_per_profile() {
    let records = vec![
        record("user_1", "Ada", &["IT", "Finance"]),
        record("user_2", "Grace", &["IT"]),
    ];

    match build_listing(records, GroupBy::None, &user("user_1")) {
        Listing::Flat { profiles } => assert_eq!(profiles.len(), 2),
        other => panic!("expected flat listing, got {:?}", other),
    }
}

#[test]
fn multi_valued_profile_appears_in_every_matching_group() {
    let records = vec![
        record("user_1", "Ada", &["IT", "Finance"]),
        record("user_2", "Grace", &["IT"]),
    ];

    let listing = build_listing(records, GroupBy::Profession, &user("user_1"));
    let groups = match listing {
        Listing::Grouped { groups, .. } => groups,
        other => panic!("expected grouped listing, got {:?}", other),
    };

    let it = groups.iter().find(|g| g.key == "IT").unwrap();
    let finance = groups.iter().find(|g| g.key == "Finance").unwrap();
    assert_eq!(it.count, 2);
    assert_eq!(finance.count, 1);
    assert_eq!(finance.profiles[0].record.name, "Ada");
}

#[test]
fn profiles_without_values_land_in_the_unspecified_bucket_only() {
    let records = vec![
        record("user_1", "Ada", &[]),
        record("user_2", "Grace", &["HR"]),
    ];

    let listing = build_listing(records, GroupBy::Profession, &user("user_1"));
    let groups = match listing {
        Listing::Grouped { groups, .. } => groups,
        other => panic!("expected grouped listing, got {:?}", other),
    };

    assert_eq!(groups.len(), 2);
    let unspecified = groups.iter().find(|g| g.key == UNSPECIFIED_GROUP).unwrap();
    assert_eq!(unspecified.count, 1);
    assert_eq!(unspecified.profiles[0].record.name, "Ada");

    // Ada appears nowhere else.
    let hr = groups.iter().find(|g| g.key == "HR").unwrap();
    assert!(hr.profiles.iter().all(|p| p.record.name != "Ada"));
}

#[test]
fn edit_affordance_follows_ownership_and_admin_status() {
    let records = vec![record("user_1", "Ada", &["IT"])];

    let as_owner = build_listing(records.clone(), GroupBy::None, &user("user_1"));
    let as_stranger = build_listing(records.clone(), GroupBy::None, &user("user_2"));
    let as_admin = build_listing(records, GroupBy::None, &admin());

    let can_edit = |listing: &Listing| match listing {
        Listing::Flat { profiles } => profiles[0].can_edit,
        _ => unreachable!(),
    };

    assert!(can_edit(&as_owner));
    assert!(!can_edit(&as_stranger));
    assert!(can_edit(&as_admin));
}
