pub mod jwt;
pub mod password;

mod login;

pub use jwt::{Claims, JwtService};
pub use login::{login, LoginInput, LoginResponse};
