pub mod store;

pub use store::{ContactedSnapshot, ContactedStore};
