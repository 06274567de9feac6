pub mod role;
pub mod user_activity;
