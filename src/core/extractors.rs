//! Axum extractors and request decoding helpers
//!
//! This module turns raw request parts into typed values:
//! - entity ids and id lists from path segments
//! - the representation a client asked for through `Accept`
//! - the payload kind a client sent through `Content-Type`

use crate::core::error::{LibraryError, RequestError};
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use uuid::Uuid;

/// Parse an entity id path segment
pub fn parse_entity_id(raw: &str) -> Result<Uuid, RequestError> {
    Uuid::parse_str(raw.trim()).map_err(|_| RequestError::InvalidEntityId { id: raw.to_string() })
}

/// Parse an id list segment such as `(id1,id2)`
///
/// Surrounding parentheses are optional. Empty entries are skipped, and an
/// empty list is rejected.
pub fn parse_id_list(raw: &str) -> Result<Vec<Uuid>, RequestError> {
    let inner = raw.trim();
    let inner = inner.strip_prefix('(').unwrap_or(inner);
    let inner = inner.strip_suffix(')').unwrap_or(inner);

    let ids = inner
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_entity_id)
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(RequestError::InvalidEntityId { id: raw.to_string() });
    }
    Ok(ids)
}

/// A parsed `type/subtype[+suffix]` media range, parameters dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub main_type: String,
    pub subtype: String,
    pub suffix: Option<String>,
}

impl MediaType {
    /// Parse one media range, ignoring parameters such as `q` or `charset`
    pub fn parse(raw: &str) -> Result<Self, RequestError> {
        let invalid = || RequestError::InvalidMediaType {
            value: raw.to_string(),
        };

        let essence = raw.split(';').next().unwrap_or_default().trim();
        let (main_type, full_subtype) = essence.split_once('/').ok_or_else(invalid)?;

        let is_token = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+*".contains(c))
        };
        if !is_token(main_type) || !is_token(full_subtype) {
            return Err(invalid());
        }

        let (subtype, suffix) = match full_subtype.rsplit_once('+') {
            Some((subtype, suffix)) if !subtype.is_empty() && !suffix.is_empty() => {
                (subtype, Some(suffix.to_ascii_lowercase()))
            }
            Some(_) => return Err(invalid()),
            None => (full_subtype, None),
        };

        Ok(Self {
            main_type: main_type.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            suffix,
        })
    }

    pub fn is_wildcard(&self) -> bool {
        self.main_type == "*" || self.subtype == "*"
    }

    /// Is this `application/json` or an `application/*+json` vendor type?
    pub fn is_json(&self) -> bool {
        self.main_type == "application"
            && (self.subtype == "json" || self.suffix.as_deref() == Some("json"))
    }

    pub fn essence(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}/{}+{}", self.main_type, self.subtype, suffix),
            None => format!("{}/{}", self.main_type, self.subtype),
        }
    }
}

/// Author projection selected by the `Accept` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorRepresentation {
    /// `AuthorDto`: name and age derived from storage columns
    #[default]
    Friendly,
    /// `AuthorFullDto`: storage columns as they are
    Full,
}

/// What the client accepts for an author resource
///
/// Only the first media range of `Accept` is considered. A missing header or a
/// wildcard range means plain JSON without links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedMediaType {
    pub representation: AuthorRepresentation,
    pub include_links: bool,
    /// Value for the response `Content-Type`
    pub content_type: String,
}

impl Default for AcceptedMediaType {
    fn default() -> Self {
        Self {
            representation: AuthorRepresentation::Friendly,
            include_links: false,
            content_type: "application/json".to_string(),
        }
    }
}

impl AcceptedMediaType {
    pub const HATEOAS: &'static str = "application/vnd.marvin.hateoas+json";
    pub const AUTHOR_FULL: &'static str = "application/vnd.marvin.author.full+json";
    pub const AUTHOR_FULL_HATEOAS: &'static str = "application/vnd.marvin.author.full.hateoas+json";
    pub const AUTHOR_FRIENDLY: &'static str = "application/vnd.marvin.author.friendly+json";
    pub const AUTHOR_FRIENDLY_HATEOAS: &'static str =
        "application/vnd.marvin.author.friendly.hateoas+json";

    /// Negotiate from a raw `Accept` header value
    pub fn negotiate(accept: Option<&str>) -> Result<Self, RequestError> {
        let Some(accept) = accept.map(str::trim).filter(|a| !a.is_empty()) else {
            return Ok(Self::default());
        };

        let first = accept.split(',').next().unwrap_or_default();
        let media_type = MediaType::parse(first)?;

        if media_type.is_wildcard() {
            return Ok(Self::default());
        }

        let not_acceptable = || RequestError::NotAcceptable {
            value: media_type.essence(),
        };

        if !media_type.is_json() {
            return Err(not_acceptable());
        }

        let include_links = media_type.subtype.ends_with("hateoas");
        let primary = media_type
            .subtype
            .strip_suffix("hateoas")
            .map(|p| p.strip_suffix('.').unwrap_or(p))
            .unwrap_or(&media_type.subtype);

        let representation = match primary {
            "json" | "vnd.marvin" | "vnd.marvin.author.friendly" => AuthorRepresentation::Friendly,
            "vnd.marvin.author.full" => AuthorRepresentation::Full,
            _ => return Err(not_acceptable()),
        };

        Ok(Self {
            representation,
            include_links,
            content_type: media_type.essence(),
        })
    }
}

impl<S> FromRequestParts<S> for AcceptedMediaType
where
    S: Send + Sync,
{
    type Rejection = LibraryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = header_str(&parts.headers, header::ACCEPT.as_str())?;
        Ok(Self::negotiate(accept)?)
    }
}

/// Author payload kind selected by the `Content-Type` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorCreationKind {
    /// `application/json` or `application/vnd.marvin.authorforcreation+json`
    Standard,
    /// `application/vnd.marvin.authorforcreationwithdateofdeath+json`
    WithDateOfDeath,
}

impl AuthorCreationKind {
    pub const STANDARD: &'static str = "application/vnd.marvin.authorforcreation+json";
    pub const WITH_DATE_OF_DEATH: &'static str =
        "application/vnd.marvin.authorforcreationwithdateofdeath+json";

    pub fn from_content_type(content_type: Option<&str>) -> Result<Self, RequestError> {
        let unsupported = |value: &str| RequestError::UnsupportedMediaType {
            value: value.to_string(),
        };

        let raw = content_type.unwrap_or_default();
        let media_type = MediaType::parse(raw).map_err(|_| unsupported(raw))?;

        match media_type.essence().as_str() {
            "application/json" | Self::STANDARD => Ok(Self::Standard),
            Self::WITH_DATE_OF_DEATH => Ok(Self::WithDateOfDeath),
            other => Err(unsupported(other)),
        }
    }
}

impl<S> FromRequestParts<S> for AuthorCreationKind
where
    S: Send + Sync,
{
    type Rejection = LibraryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = header_str(&parts.headers, header::CONTENT_TYPE.as_str())?;
        Ok(Self::from_content_type(content_type)?)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, RequestError> {
    headers
        .get(name)
        .map(|value| {
            value.to_str().map_err(|_| RequestError::InvalidMediaType {
                value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
            })
        })
        .transpose()
}
