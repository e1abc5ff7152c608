//! REST handlers, grouped by concern.

pub mod account;
pub mod character;
pub mod chat;
