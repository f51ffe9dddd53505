//! Inbound messages and their read state.

mod model;
mod store;

pub use model::{Attachment, Message, MessageId, Sender};
pub use store::MessageStore;
