use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Fixed option lists for the multi-select profile fields. Values submitted
/// outside these lists are rejected.
pub const EXPERIENCE_OPTIONS: &[&str] = &["5 Years", "10 Years", "15 Years", "20+ Years"];
pub const PROFESSION_OPTIONS: &[&str] = &["Finance", "Marketing", "Supply Chain", "IT", "HR"];
pub const EXPERTISE_OPTIONS: &[&str] = &[
    "Data Analytics",
    "Leadership",
    "Python",
    "Project Management",
    "UI/UX",
];

/// Group bucket for profiles carrying no value in the grouping field.
pub const UNSPECIFIED_GROUP: &str = "Not specified";
