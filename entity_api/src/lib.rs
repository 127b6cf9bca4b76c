pub use entity::{meetings, translations, users, Id};

pub mod error;
pub mod meeting;
pub mod translation;
pub mod user;
