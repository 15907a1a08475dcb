//! Conversation state and the question/answer exchange loop

mod conversation;

pub use conversation::*;
