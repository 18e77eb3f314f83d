//! API handlers.

pub mod admin;
pub mod chats;
pub mod credits;
pub mod health;
pub mod memories;
pub mod themes;
