//! Terminal presentation
//!
//! Theme handling, markdown rendering for assistant answers, and the
//! interactive chat view.

mod chat;
pub mod markdown;
mod theme;

pub use chat::*;
pub use theme::*;
