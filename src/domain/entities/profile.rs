use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::constants::{EXPERIENCE_OPTIONS, EXPERTISE_OPTIONS, PROFESSION_OPTIONS};

/// The editable CV form as submitted by a client. Owner and identifier are
/// never part of the form: the owner is stamped server-side and the
/// identifier is assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(max = 200, message = "Name is too long"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 200, message = "Contact information is too long"))]
    pub contact: String,

    #[serde(default)]
    #[validate(length(max = 10000, message = "Summary is too long"))]
    pub summary: String,

    #[serde(default)]
    #[validate(length(max = 10000, message = "Work experience is too long"))]
    pub experience_text: String,

    #[serde(default)]
    #[validate(length(max = 10000, message = "Education is too long"))]
    pub education: String,

    #[serde(default)]
    #[validate(length(max = 10000, message = "Skills are too long"))]
    pub skills: String,

    #[serde(default)]
    #[validate(custom(function = "validate_experience_values"))]
    pub experience: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_profession_values"))]
    pub profession: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_expertise_values"))]
    pub expertise: Vec<String>,

    #[serde(default)]
    pub additional_info: Vec<String>,
}

fn validate_experience_values(values: &[String]) -> Result<(), ValidationError> {
    validate_membership(values, EXPERIENCE_OPTIONS)
}

fn validate_profession_values(values: &[String]) -> Result<(), ValidationError> {
    validate_membership(values, PROFESSION_OPTIONS)
}

fn validate_expertise_values(values: &[String]) -> Result<(), ValidationError> {
    validate_membership(values, EXPERTISE_OPTIONS)
}

fn validate_membership(values: &[String], options: &[&str]) -> Result<(), ValidationError> {
    match values.iter().find(|v| !options.contains(&v.as_str())) {
        Some(unknown) => {
            let mut error = ValidationError::new("unknown_option");
            error.message =
                Some(format!("'{}' is not one of the allowed options", unknown).into());
            Err(error)
        }
        None => Ok(()),
    }
}

impl ProfileForm {
    /// A fresh form with the single empty additional-info slot the compose
    /// view starts with.
    pub fn blank() -> Self {
        ProfileForm {
            additional_info: vec![String::new()],
            ..ProfileForm::default()
        }
    }

    /// The additional-info entries that would actually be persisted.
    pub fn cleaned_additional_info(&self) -> Vec<String> {
        self.additional_info
            .iter()
            .filter(|entry| !entry.trim().is_empty())
            .cloned()
            .collect()
    }

    /// A submission is accepted only when at least one field carries
    /// content.
    pub fn has_content(&self) -> bool {
        let scalars = [
            &self.name,
            &self.contact,
            &self.summary,
            &self.experience_text,
            &self.education,
            &self.skills,
        ];

        scalars.iter().any(|field| !field.trim().is_empty())
            || !self.cleaned_additional_info().is_empty()
    }

    pub fn prepare_for_insert(&self, owner_id: &str) -> ProfileInsert {
        ProfileInsert {
            owner_id: owner_id.to_string(),
            name: self.name.clone(),
            contact: self.contact.clone(),
            summary: self.summary.clone(),
            experience_text: self.experience_text.clone(),
            education: self.education.clone(),
            skills: self.skills.clone(),
            experience: self.experience.clone(),
            profession: self.profession.clone(),
            expertise: self.expertise.clone(),
            additional_info: self.cleaned_additional_info(),
        }
    }
}

/// What the gateway writes: the full field set with the owner already
/// stamped and blank additional-info entries already discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInsert {
    pub owner_id: String,
    pub name: String,
    pub contact: String,
    pub summary: String,
    pub experience_text: String,
    pub education: String,
    pub skills: String,
    pub experience: Vec<String>,
    pub profession: Vec<String>,
    pub expertise: Vec<String>,
    pub additional_info: Vec<String>,
}

/// One stored profile document, identifier attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileRecord {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub contact: String,
    pub summary: String,
    pub experience_text: String,
    pub education: String,
    pub skills: String,
    pub experience: Vec<String>,
    pub profession: Vec<String>,
    pub expertise: Vec<String>,
    pub additional_info: Vec<String>,
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ProfileRecord> for ProfileForm {
    fn from(record: &ProfileRecord) -> Self {
        ProfileForm {
            name: record.name.clone(),
            contact: record.contact.clone(),
            summary: record.summary.clone(),
            experience_text: record.experience_text.clone(),
            education: record.education.clone(),
            skills: record.skills.clone(),
            experience: record.experience.clone(),
            profession: record.profession.clone(),
            expertise: record.expertise.clone(),
            additional_info: record.additional_info.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileCreatedResponse {
    pub id: Uuid,
    pub message: String,
}
