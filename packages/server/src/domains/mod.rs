pub mod auth;
pub mod departments;
pub mod records;
pub mod users;
