//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod current_user;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod token_service;
pub mod verify_email;

// Re-exports
pub use authenticate::{AuthenticateUseCase, CurrentUser};
pub use config::AuthConfig;
pub use current_user::CurrentUserUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh_token::RefreshTokenUseCase;
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use token_service::{Claims, TokenKind, TokenPair, TokenService};
pub use verify_email::VerifyEmailUseCase;
