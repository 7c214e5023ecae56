pub mod credentials;
pub mod store;

pub use credentials::{Credentials, validate_login};
pub use store::{Session, SessionStore};
