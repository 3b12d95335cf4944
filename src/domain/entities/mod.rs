pub mod board;
pub mod identity;
pub mod profile;
