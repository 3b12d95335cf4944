pub mod board;
pub mod extractors;
pub mod profiles;
