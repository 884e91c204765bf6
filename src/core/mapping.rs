//! Property mapping registry
//!
//! A property mapping translates the public field names clients sort by into
//! the storage-layer columns that back them. `Name` on an author projection is
//! really `FirstName, LastName` in storage; `Age` is `DateOfBirth` with the
//! direction inverted (older means an earlier birth date).
//!
//! Mappings are registered per `(projection, entity)` type pair once, at
//! start-up, and the registry is immutable afterwards.

use crate::core::error::MappingError;
use std::any::{TypeId, type_name};
use std::collections::HashMap;

/// Storage-side target of one public field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMappingValue {
    destination_fields: Vec<String>,
    revert_direction: bool,
}

impl PropertyMappingValue {
    /// Map to one or more storage columns, keeping the requested direction
    pub fn new<I, S>(destination_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            destination_fields: destination_fields.into_iter().map(Into::into).collect(),
            revert_direction: false,
        }
    }

    /// Map to one or more storage columns, inverting the requested direction
    pub fn reverted<I, S>(destination_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            revert_direction: true,
            ..Self::new(destination_fields)
        }
    }

    pub fn destination_fields(&self) -> &[String] {
        &self.destination_fields
    }

    pub fn revert_direction(&self) -> bool {
        self.revert_direction
    }
}

/// Case-insensitive table from public field name to its storage mapping
#[derive(Debug, Clone, Default)]
pub struct PropertyMapping {
    /// Keyed by the lowercased public name; holds the declared name too
    entries: HashMap<String, (String, PropertyMappingValue)>,
}

impl PropertyMapping {
    /// Build a mapping, rejecting empty destinations and case-insensitive duplicates
    pub fn new<I, S>(entries: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (S, PropertyMappingValue)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (field, value) in entries {
            let field = field.into();
            if value.destination_fields.is_empty() {
                return Err(MappingError::EmptyDestination { field });
            }
            let key = field.to_lowercase();
            if map.contains_key(&key) {
                return Err(MappingError::DuplicateField { field });
            }
            map.insert(key, (field, value));
        }
        Ok(Self { entries: map })
    }

    /// Look up a public field name, ignoring case
    pub fn get(&self, field: &str) -> Option<&PropertyMappingValue> {
        self.entries
            .get(&field.to_lowercase())
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Declared public field names, in no particular order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registry of property mappings keyed by `(source, destination)` type pair
///
/// Built through [`PropertyMappingRegistryBuilder`] and then shared read-only
/// (typically behind an `Arc` in the server host).
#[derive(Debug, Default)]
pub struct PropertyMappingRegistry {
    mappings: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl PropertyMappingRegistry {
    pub fn builder() -> PropertyMappingRegistryBuilder {
        PropertyMappingRegistryBuilder::default()
    }

    /// Get the mapping registered for `<TSource, TDestination>`
    pub fn get_mapping<TSource: 'static, TDestination: 'static>(
        &self,
    ) -> Result<&PropertyMapping, MappingError> {
        self.mappings
            .get(&(TypeId::of::<TSource>(), TypeId::of::<TDestination>()))
            .ok_or(MappingError::NotFound {
                source_type: short_type_name::<TSource>(),
                destination_type: short_type_name::<TDestination>(),
            })
    }

    /// Sort gate against the registered mapping for `<TSource, TDestination>`
    ///
    /// An empty expression is valid without consulting the registry.
    pub fn valid_mapping_exists_for<TSource: 'static, TDestination: 'static>(
        &self,
        sort_expression: &str,
    ) -> Result<bool, MappingError> {
        if sort_expression.trim().is_empty() {
            return Ok(true);
        }
        let mapping = self.get_mapping::<TSource, TDestination>()?;
        Ok(crate::core::sort::is_valid_sort_expression(
            sort_expression,
            mapping,
        ))
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Mutable collector used while modules register their mappings
#[derive(Debug, Default)]
pub struct PropertyMappingRegistryBuilder {
    mappings: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl PropertyMappingRegistryBuilder {
    /// Register (or replace) the mapping for `<TSource, TDestination>`
    pub fn register<TSource: 'static, TDestination: 'static>(
        &mut self,
        mapping: PropertyMapping,
    ) -> &mut Self {
        tracing::debug!(
            source = short_type_name::<TSource>(),
            destination = short_type_name::<TDestination>(),
            fields = mapping.len(),
            "registering property mapping"
        );
        self.mappings
            .insert((TypeId::of::<TSource>(), TypeId::of::<TDestination>()), mapping);
        self
    }

    pub fn build(self) -> PropertyMappingRegistry {
        PropertyMappingRegistry {
            mappings: self.mappings,
        }
    }
}

/// `type_name` without the module path
fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
