use uuid::Uuid;

use crate::{
    constants::UNSPECIFIED_GROUP,
    entities::board::{
        BoardView, FormState, GroupBy, Listing, ProfileGroup, ProfileView, SubmitOutcome,
    },
    entities::identity::Identity,
    entities::profile::{ProfileForm, ProfileRecord},
    errors::AppError,
    repositories::profile::ProfileRepository,
    use_cases::profiles::ProfileHandler,
};

/// Presentation layer over the profile store: the two-state form machine
/// plus the grouped listing view.
pub struct BoardHandler<R>
where
    R: ProfileRepository,
{
    pub profiles: ProfileHandler<R>,
}

impl<R> BoardHandler<R>
where
    R: ProfileRepository,
{
    pub fn new(profiles: ProfileHandler<R>) -> Self {
        BoardHandler { profiles }
    }

    /// Composing -> Editing. Only the owner or the admin identity may edit
    /// a record; everyone else is rejected before any state changes.
    pub async fn begin_edit(
        &self,
        profile_id: Uuid,
        viewer: &Identity,
    ) -> Result<FormState, AppError> {
        let record = self
            .profiles
            .profile_repo
            .get_profile_by_id(profile_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", profile_id)))?;

        if !viewer.can_edit(&record.owner_id) {
            return Err(AppError::ForbiddenAccess);
        }

        let mut draft = ProfileForm::from(&record);
        if draft.additional_info.is_empty() {
            // The edit view always shows at least one editable slot.
            draft.additional_info.push(String::new());
        }

        Ok(FormState::Editing {
            profile_id,
            revision: record.revision,
            draft,
        })
    }

    /// Validates and persists the draft. Composing publishes a new record,
    /// Editing overwrites the selected one; both return to a blank
    /// Composing state on success. On failure the caller still holds the
    /// submitted state, so the form keeps its entered values.
    pub async fn submit(
        &self,
        state: &FormState,
        viewer: &Identity,
    ) -> Result<SubmitOutcome, AppError> {
        match state {
            FormState::Composing { draft } => {
                let created = self.profiles.publish(draft, viewer).await?;
                Ok(SubmitOutcome {
                    profile_id: created.id,
                    message: created.message,
                    state: FormState::composing(),
                })
            }
            FormState::Editing { profile_id, revision, draft } => {
                let updated = self
                    .profiles
                    .update(*profile_id, draft, Some(*revision), viewer)
                    .await?;
                Ok(SubmitOutcome {
                    profile_id: updated.id,
                    message: "CV updated successfully".to_string(),
                    state: FormState::composing(),
                })
            }
        }
    }

    /// The render step: echoes the form state back alongside the full
    /// listing, grouped when requested.
    pub async fn view(
        &self,
        form: FormState,
        group_by: GroupBy,
        viewer: &Identity,
    ) -> Result<BoardView, AppError> {
        let records = self.profiles.list().await?;
        let listing = build_listing(records, group_by, viewer);
        Ok(BoardView { form, listing })
    }
}

/// Partitions the records for display. With grouping active a profile
/// appears once per value it holds in the grouping field; records with no
/// value land in the single "Not specified" bucket. Group keys keep
/// first-seen order, matching the store-defined listing order.
pub fn build_listing(
    records: Vec<ProfileRecord>,
    group_by: GroupBy,
    viewer: &Identity,
) -> Listing {
    if group_by == GroupBy::None {
        let profiles = records
            .into_iter()
            .map(|record| ProfileView::new(record, viewer))
            .collect();
        return Listing::Flat { profiles };
    }

    let mut groups: Vec<ProfileGroup> = Vec::new();

    for record in records {
        let values = group_by.values_of(&record);
        let keys: Vec<String> = if values.is_empty() {
            vec![UNSPECIFIED_GROUP.to_string()]
        } else {
            values.to_vec()
        };

        for key in keys {
            let view = ProfileView::new(record.clone(), viewer);
            match groups.iter_mut().find(|group| group.key == key) {
                Some(group) => group.profiles.push(view),
                None => groups.push(ProfileGroup {
                    key,
                    count: 0,
                    profiles: vec![view],
                }),
            }
        }
    }

    for group in &mut groups {
        group.count = group.profiles.len();
    }

    Listing::Grouped { field: group_by, groups }
}
