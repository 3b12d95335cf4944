use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::identity::Identity;
use crate::entities::profile::{ProfileForm, ProfileRecord};

/// Serializable state of the profile form. Passed into and returned from
/// every presentation call; the server holds no session state of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FormState {
    /// Blank form, eligible to create.
    Composing { draft: ProfileForm },
    /// Form pre-filled from a stored record, eligible to update. The
    /// revision is captured when editing begins so a stale form cannot
    /// silently overwrite a newer save.
    Editing {
        profile_id: Uuid,
        revision: i64,
        draft: ProfileForm,
    },
}

impl Default for FormState {
    fn default() -> Self {
        FormState::composing()
    }
}

impl FormState {
    pub fn composing() -> Self {
        FormState::Composing { draft: ProfileForm::blank() }
    }

    /// Appends one more editable additional-info slot without submitting.
    /// Valid in both states.
    pub fn add_info_block(self) -> Self {
        match self {
            FormState::Composing { mut draft } => {
                draft.additional_info.push(String::new());
                FormState::Composing { draft }
            }
            FormState::Editing { profile_id, revision, mut draft } => {
                draft.additional_info.push(String::new());
                FormState::Editing { profile_id, revision, draft }
            }
        }
    }

    pub fn draft(&self) -> &ProfileForm {
        match self {
            FormState::Composing { draft } => draft,
            FormState::Editing { draft, .. } => draft,
        }
    }
}

/// Grouping selector for the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    #[display("none")]
    None,
    #[display("experience")]
    Experience,
    #[display("profession")]
    Profession,
    #[display("expertise")]
    Expertise,
}

impl GroupBy {
    /// The values a record holds in the selected grouping field. Empty for
    /// `None`.
    pub fn values_of<'a>(&self, record: &'a ProfileRecord) -> &'a [String] {
        match self {
            GroupBy::None => &[],
            GroupBy::Experience => &record.experience,
            GroupBy::Profession => &record.profession,
            GroupBy::Expertise => &record.expertise,
        }
    }
}

/// One profile as shown to a viewer, with the edit affordance resolved
/// against the viewer's identity.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub record: ProfileRecord,
    pub can_edit: bool,
}

impl ProfileView {
    pub fn new(record: ProfileRecord, viewer: &Identity) -> Self {
        let can_edit = viewer.can_edit(&record.owner_id);
        ProfileView { record, can_edit }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileGroup {
    pub key: String,
    pub count: usize,
    pub profiles: Vec<ProfileView>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Flat { profiles: Vec<ProfileView> },
    Grouped { field: GroupBy, groups: Vec<ProfileGroup> },
}

/// Full render of the board: the (possibly unchanged) form state plus the
/// listing of every stored profile.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub form: FormState,
    pub listing: Listing,
}

/// Result of a successful submit: the id that was written and the reset
/// form state.
#[derive(Debug, Serialize)]
pub struct SubmitOutcome {
    pub profile_id: Uuid,
    pub message: String,
    pub state: FormState,
}
