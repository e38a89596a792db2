//! Data models shared across layers

pub mod author;
pub mod book;
pub mod loan;
pub mod user;
