pub mod codes;
pub mod models;

pub use codes::department_code;
pub use models::Department;
