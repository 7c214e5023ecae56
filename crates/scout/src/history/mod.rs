pub mod store;

pub use store::{MessageHistory, MessageRecord};
