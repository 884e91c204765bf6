//! Core module containing the resource-shaping primitives

pub mod error;
pub mod extractors;
pub mod field;
pub mod link;
pub mod mapping;
pub mod module;
pub mod page;
pub mod query;
pub mod service;
pub mod shape;
pub mod sort;
pub mod store;
pub mod validation;

pub use error::{LibraryError, LibraryResult};
pub use field::{FieldDescriptor, FieldValue};
pub use link::{Link, LinkedCollectionResource};
pub use mapping::{PropertyMapping, PropertyMappingRegistry, PropertyMappingValue};
pub use module::Module;
pub use page::{Page, paginate};
pub use query::{AuthorsQuery, AuthorsResourceParameters, PaginationMeta};
pub use service::LibraryRepository;
pub use shape::{FieldSet, Shape, ShapeExt, Shapeable, ShapedRecord, shape_many, shape_one};
pub use sort::ResolvedOrdering;
pub use store::{AuthorFilter, Filter, QueryableStore, Sortable};
