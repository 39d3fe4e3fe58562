pub mod chat_input;
pub mod markdown_message;
pub mod message_list;
pub mod refresh;
