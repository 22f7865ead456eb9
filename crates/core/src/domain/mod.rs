pub mod chat;
pub mod workout;
