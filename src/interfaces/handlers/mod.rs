pub mod board;
pub mod home;
pub mod profiles;
pub mod system;
