//! Data shaping
//!
//! Shaping returns only the fields a client asked for (`?fields=id,name`).
//! Projection types describe their public fields once through a
//! [`FieldDescriptor`] table ([`Shape`]); anything that can list and read its
//! fields by position ([`Shapeable`]) can be shaped, including an already
//! shaped [`ShapedRecord`].
//!
//! Field lists are resolved once per call into a [`FieldSet`] and then applied
//! to every element.

use crate::core::error::ShapingError;
use crate::core::field::{FieldDescriptor, FieldValue};
use crate::core::link::Link;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A projection type with a static public field table
///
/// Implemented through [`impl_shape!`](crate::impl_shape), which also
/// implements [`Shapeable`].
pub trait Shape: Sized + 'static {
    /// Type name used in error messages
    fn type_name() -> &'static str;

    /// Public fields in declaration order
    fn descriptors() -> &'static [FieldDescriptor<Self>];
}

/// Anything whose fields can be listed and read by position
///
/// Positions must be stable for every value that is shaped with the same
/// [`FieldSet`]: always true for [`Shape`] types, and true for records shaped
/// in one call.
pub trait Shapeable {
    /// Type name used in error messages
    fn source_name(&self) -> &str;

    /// Public field names in declaration order
    fn field_names(&self) -> Vec<&str>;

    /// Read the field at `position` in [`field_names`](Self::field_names)
    fn field_at(&self, position: usize) -> Option<FieldValue>;
}

/// Split a field list on commas, trimming each token
fn field_tokens(fields: &str) -> impl Iterator<Item = &str> {
    fields.split(',').map(str::trim)
}

fn is_blank(fields: Option<&str>) -> bool {
    fields.is_none_or(|f| f.trim().is_empty())
}

/// Field gate: does `T` expose every field in `fields`?
///
/// Matching ignores case. A blank list is valid and means "all fields".
/// Sort suffixes such as ` desc` are not stripped; this checks shape fields,
/// not sort fields.
pub fn has_fields<T: Shape>(fields: &str) -> bool {
    if fields.trim().is_empty() {
        return true;
    }

    field_tokens(fields).all(|token| T::descriptors().iter().any(|d| d.matches(token)))
}

/// A resolved field selection: positions into the source's field list plus the
/// declared names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(usize, String)>,
}

impl FieldSet {
    /// Resolve `fields` against `source`'s field list
    ///
    /// A blank list selects every field in declaration order. Otherwise the
    /// requested order is kept, names are normalized to their declared case,
    /// and repeated names collapse to their first occurrence.
    pub fn resolve<S: Shapeable + ?Sized>(
        source: &S,
        fields: Option<&str>,
    ) -> Result<Self, ShapingError> {
        let available = source.field_names();

        let Some(fields) = fields.filter(|_| !is_blank(fields)) else {
            return Ok(Self {
                entries: available
                    .iter()
                    .enumerate()
                    .map(|(position, name)| (position, (*name).to_string()))
                    .collect(),
            });
        };

        let mut entries: Vec<(usize, String)> = Vec::new();
        for token in field_tokens(fields) {
            let position = available
                .iter()
                .position(|name| name.eq_ignore_ascii_case(token))
                .ok_or_else(|| ShapingError::UnknownField {
                    field: token.to_string(),
                    source_type: source.source_name().to_string(),
                })?;

            if !entries.iter().any(|(p, _)| *p == position) {
                entries.push((position, available[position].to_string()));
            }
        }

        Ok(Self { entries })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply this selection to one source value
    pub fn apply<S: Shapeable + ?Sized>(&self, source: &S) -> Result<ShapedRecord, ShapingError> {
        let mut fields = IndexMap::with_capacity(self.entries.len());
        for (position, name) in &self.entries {
            let value = source
                .field_at(*position)
                .ok_or_else(|| ShapingError::UnknownField {
                    field: name.clone(),
                    source_type: source.source_name().to_string(),
                })?;
            fields.insert(name.clone(), value);
        }

        Ok(ShapedRecord {
            source_name: source.source_name().to_string(),
            fields,
            links: None,
        })
    }
}

/// A loosely-typed response record holding only the selected fields
///
/// Serializes as a flat JSON object in field order, followed by `links` when
/// links were attached. The field map is fixed at construction; links can only
/// be attached by consuming the record.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedRecord {
    source_name: String,
    fields: IndexMap<String, FieldValue>,
    links: Option<Vec<Link>>,
}

impl ShapedRecord {
    /// Field value by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn links(&self) -> Option<&[Link]> {
        self.links.as_deref()
    }

    /// Attach hypermedia links
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.links = Some(links);
        self
    }
}

impl Shapeable for ShapedRecord {
    fn source_name(&self) -> &str {
        &self.source_name
    }

    fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn field_at(&self, position: usize) -> Option<FieldValue> {
        self.fields
            .get_index(position)
            .map(|(_, value)| value.clone())
    }
}

impl Serialize for ShapedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.links.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        if let Some(links) = &self.links {
            map.serialize_entry("links", links)?;
        }
        map.end()
    }
}

/// Shape a single instance
///
/// Fails with [`ShapingError::NullSource`] when `source` is absent and with
/// [`ShapingError::UnknownField`] when a requested field does not exist.
pub fn shape_one<S: Shapeable>(
    source: Option<&S>,
    fields: Option<&str>,
) -> Result<ShapedRecord, ShapingError> {
    let source = source.ok_or(ShapingError::NullSource {
        source_type: std::any::type_name::<S>(),
    })?;
    FieldSet::resolve(source, fields)?.apply(source)
}

/// Shape a sequence, resolving the field list once
///
/// An empty sequence returns immediately without resolving the field list, so
/// an unknown field never fails an empty result set.
pub fn shape_many<S: Shapeable>(
    source: Option<&[S]>,
    fields: Option<&str>,
) -> Result<Vec<ShapedRecord>, ShapingError> {
    let source = source.ok_or(ShapingError::NullSource {
        source_type: std::any::type_name::<S>(),
    })?;

    let Some(first) = source.first() else {
        return Ok(Vec::new());
    };

    let field_set = FieldSet::resolve(first, fields)?;
    source.iter().map(|item| field_set.apply(item)).collect()
}

/// Method-style shaping for values that are known to be present
pub trait ShapeExt: Shapeable + Sized {
    fn shape(&self, fields: Option<&str>) -> Result<ShapedRecord, ShapingError> {
        shape_one(Some(self), fields)
    }
}

impl<S: Shapeable> ShapeExt for S {}
