//! In-memory implementation of LibraryRepository for testing and development

use crate::core::error::StorageError;
use crate::core::service::LibraryRepository;
use crate::core::sort::ResolvedOrdering;
use crate::core::store::{AuthorFilter, Filter, QueryableStore};
use crate::entities::author::Author;
use crate::entities::course::Course;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory author catalog
///
/// Authors keep their insertion order, which is the order of an unsorted
/// listing. Courses live inside their author. Uses RwLock for thread-safe
/// access.
#[derive(Clone, Default)]
pub struct InMemoryLibraryRepository {
    authors: Arc<RwLock<IndexMap<Uuid, Author>>>,
}

impl InMemoryLibraryRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the demo catalog
    pub fn with_seed_data() -> Result<Self> {
        let repository = Self::new();
        {
            let mut authors = repository
                .authors
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
            for author in seed_authors()? {
                authors.insert(author.id, author);
            }
        }
        Ok(repository)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, IndexMap<Uuid, Author>>> {
        self.authors
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, IndexMap<Uuid, Author>>> {
        self.authors
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }
}

impl QueryableStore<Author> for InMemoryLibraryRepository {
    type Filter = AuthorFilter;

    fn list_all(&self) -> Result<Vec<Author>, StorageError> {
        let authors = self.authors.read().map_err(|e| StorageError::QueryError {
            message: format!("Failed to acquire read lock: {}", e),
        })?;
        Ok(authors.values().cloned().collect())
    }
}

#[async_trait]
impl LibraryRepository for InMemoryLibraryRepository {
    async fn count_authors(&self, filter: &AuthorFilter) -> Result<usize> {
        let authors = self.read()?;
        Ok(authors.values().filter(|author| filter.matches(author)).count())
    }

    async fn fetch_authors(
        &self,
        filter: &AuthorFilter,
        ordering: &ResolvedOrdering,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Author>> {
        let ordered = self.query(filter, ordering)?;
        Ok(ordered.into_iter().skip(offset).take(limit).collect())
    }

    async fn get_author(&self, author_id: &Uuid) -> Result<Option<Author>> {
        Ok(self.read()?.get(author_id).cloned())
    }

    async fn get_authors_by_ids(&self, author_ids: &[Uuid]) -> Result<Vec<Author>> {
        let authors = self.read()?;
        Ok(author_ids
            .iter()
            .filter_map(|id| authors.get(id).cloned())
            .collect())
    }

    async fn author_exists(&self, author_id: &Uuid) -> Result<bool> {
        Ok(self.read()?.contains_key(author_id))
    }

    async fn add_author(&self, mut author: Author) -> Result<Author> {
        for course in &mut author.courses {
            course.author_id = author.id;
        }

        let mut authors = self.write()?;
        authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn delete_author(&self, author_id: &Uuid) -> Result<bool> {
        Ok(self.write()?.shift_remove(author_id).is_some())
    }

    async fn get_courses(&self, author_id: &Uuid) -> Result<Vec<Course>> {
        Ok(self
            .read()?
            .get(author_id)
            .map(|author| author.courses.clone())
            .unwrap_or_default())
    }

    async fn get_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<Option<Course>> {
        Ok(self.read()?.get(author_id).and_then(|author| {
            author
                .courses
                .iter()
                .find(|course| &course.id == course_id)
                .cloned()
        }))
    }

    async fn add_course(&self, author_id: &Uuid, mut course: Course) -> Result<Course> {
        let mut authors = self.write()?;
        let author = authors
            .get_mut(author_id)
            .ok_or_else(|| anyhow!("Author {} not found", author_id))?;

        course.author_id = *author_id;
        author.courses.push(course.clone());
        Ok(course)
    }

    async fn upsert_course(&self, author_id: &Uuid, mut course: Course) -> Result<bool> {
        let mut authors = self.write()?;
        let author = authors
            .get_mut(author_id)
            .ok_or_else(|| anyhow!("Author {} not found", author_id))?;

        course.author_id = *author_id;
        match author.courses.iter_mut().find(|existing| existing.id == course.id) {
            Some(existing) => {
                *existing = course;
                Ok(false)
            }
            None => {
                author.courses.push(course);
                Ok(true)
            }
        }
    }

    async fn delete_course(&self, author_id: &Uuid, course_id: &Uuid) -> Result<bool> {
        let mut authors = self.write()?;
        let Some(author) = authors.get_mut(author_id) else {
            return Ok(false);
        };

        let before = author.courses.len();
        author.courses.retain(|course| &course.id != course_id);
        Ok(author.courses.len() != before)
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow!("Invalid seed date {}-{}-{}", year, month, day))
}

fn seed_authors() -> Result<Vec<Author>> {
    let seeds = [
        ("Berry", "Griffin Beak Eldritch", (1650, 7, 23), "Ships", &[
            ("Commandeering a Ship Without Getting Caught", "Commandeering a ship in rough waters isn't easy. Learn how to do it without getting caught."),
            ("Overthrowing Mutiny", "In this course, the author provides tips to avoid, or, if needed, overthrow pirate mutiny."),
        ][..]),
        ("Nancy", "Swashbuckler Rye", (1668, 5, 21), "Rum", &[
            ("Avoiding Brawls While Drinking as Much Rum as You Desire", "Every good pirate loves rum, but it also has a tendency to get you into trouble."),
        ][..]),
        ("Eli", "Ivory Bones Sweet", (1701, 12, 16), "Singing", &[
            ("Singalong Pirate Hits", "In this course you'll learn how to sing all-time favourite pirate songs without sounding like you actually know the words or how to hold a note."),
        ][..]),
        ("Arnold", "The Unseen Stafford", (1702, 3, 6), "Singing", &[][..]),
        ("Seabury", "Toxic Reyson", (1690, 11, 23), "Maps", &[][..]),
        ("Rushing", "Buttler", (1723, 4, 4), "Rum", &[][..]),
    ];

    seeds
        .into_iter()
        .map(|(first_name, last_name, (year, month, day), category, courses)| -> Result<Author> {
            let mut author = Author::new(first_name, last_name, seed_date(year, month, day)?, category);
            author.courses = courses
                .iter()
                .map(|(title, description)| {
                    Course::new(author.id, *title, Some((*description).to_string()))
                })
                .collect();
            Ok(author)
        })
        .collect()
}
