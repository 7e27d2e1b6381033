mod credentials;
mod login;
mod token;

pub use credentials::Credentials;
pub use login::{AuthError, authenticate};
pub use token::SessionToken;
