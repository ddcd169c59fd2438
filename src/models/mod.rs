//! Data models for Shelfmark

pub mod book;
pub mod mapping;
pub mod person;

// Re-export commonly used types
pub use book::{Book, BookDto, BookOrder, PageRequest};
pub use person::{Person, PersonDto};
