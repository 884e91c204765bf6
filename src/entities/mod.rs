//! Entities module - authors, their courses, and author collections

pub mod macros;

pub mod author;
pub mod author_collection;
pub mod course;
pub mod module;

pub use author::{Author, AuthorDto, AuthorFullDto};
pub use course::{Course, CourseDto};
pub use module::CatalogModule;
