pub mod auth;
pub mod otp;
pub mod token;

pub use auth::AuthService;
pub use otp::OtpService;
pub use token::TokenService;
