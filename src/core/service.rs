//! Repository trait for authors and their courses

use crate::core::page::{Page, page_offset};
use crate::core::sort::ResolvedOrdering;
use crate::core::store::AuthorFilter;
use crate::entities::author::Author;
use crate::entities::course::Course;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage for the author catalog
///
/// Implementations own filtering, ordering and windowing so that a page can
/// be produced without loading the whole catalog. Orderings arrive already
/// translated to storage columns; an unknown column is an error, never a
/// silent no-op.
#[async_trait]
pub trait LibraryRepository: Send + Sync {
    /// Number of authors matching `filter`
    async fn count_authors(&self, filter: &AuthorFilter) -> Result<usize>;

    /// One window of the filtered, ordered author list
    async fn fetch_authors(
        &self,
        filter: &AuthorFilter,
        ordering: &ResolvedOrdering,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Author>>;

    /// Get an author by ID
    async fn get_author(&self, author_id: &Uuid) -> Result<Option<Author>>;

    /// Authors for every ID that exists, in the order of `author_ids`
    async fn get_authors_by_ids(&self, author_ids: &[Uuid]) -> Result<Vec<Author>>;

    async fn author_exists(&self, author_id: &Uuid) -> Result<bool>;

    /// Store a new author together with its courses
    async fn add_author(&self, author: Author) -> Result<Author>;

    /// Delete an author and its courses; `false` when it did not exist
    async fn delete_author(&self, author_id: &Uuid) -> Result<bool>;

    /// Courses of one author, in insertion order
    async fn get_courses(&self, author_id: &Uuid) -> Result<Vec<Course>>;

    async fn get_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<Option<Course>>;

    /// Attach a course to an existing author
    async fn add_course(&self, author_id: &Uuid, course: Course) -> Result<Course>;

    /// Replace the course with the same ID, or attach it when there is none
    ///
    /// Returns `true` when the course was created.
    async fn upsert_course(&self, author_id: &Uuid, course: Course) -> Result<bool>;

    async fn delete_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<bool>;

    /// Count, then fetch one page of authors
    async fn get_author_page(
        &self,
        filter: &AuthorFilter,
        ordering: &ResolvedOrdering,
        page_number: usize,
        page_size: usize,
    ) -> Result<Page<Author>> {
        let total_count = self.count_authors(filter).await?;
        let items = self
            .fetch_authors(
                filter,
                ordering,
                page_offset(page_number, page_size),
                page_size,
            )
            .await?;
        Ok(Page::from_window(items, total_count, page_number, page_size))
    }
}
