pub mod error;
pub mod form;
pub mod service;

pub use error::ContactError;
pub use form::{ContactForm, MIN_MESSAGE_LEN};
pub use service::ContactService;
