pub mod auth;
pub mod password;
pub mod users;

pub use auth::AuthService;
pub use password::PasswordService;
pub use users::UserRepository;
