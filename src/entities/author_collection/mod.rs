//! Author collection module

pub mod descriptor;
pub mod handlers;

pub use descriptor::AuthorCollectionDescriptor;
