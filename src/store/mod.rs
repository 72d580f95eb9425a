//! Store Lambda: writes posted messages to the message table

pub mod dynamo;
pub mod handler;

pub use dynamo::{DynamoMessageStore, MessageStore, NewMessage, parse_message};
pub use handler::StoreService;
