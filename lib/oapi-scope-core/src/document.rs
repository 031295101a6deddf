//! The canonical document model.
//!
//! The top level of a document is a closed set of [`Section`]s: a key the filter
//! does not know is rejected when the document is built, so every section is
//! handled explicitly by the filter.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::FilterError;

/// HTTP verbs that introduce an operation inside a path item.
const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Map from URL path to [`PathItem`], in document order.
pub type Paths = IndexMap<String, PathItem>;

/// Map from security scheme name to required roles or scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// A canonical API description document.
///
/// # Example
///
/// ```rust
/// use oapi_scope_core::{Document, Section};
/// use serde_json::json;
///
/// let document = Document::try_from(json!({
///     "openapi": "3.0.3",
///     "paths": {
///         "/api/integrations/v1.0/webhooks": {
///             "get": { "tags": ["integrations"] }
///         }
///     }
/// }))?;
///
/// assert_eq!(document.sections().len(), 2);
/// assert!(matches!(document.sections()[0], Section::OpenApi(_)));
/// # Ok::<(), oapi_scope_core::FilterError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    /// Creates a document from already parsed sections.
    #[must_use]
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// The sections, in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Consumes the document and returns its sections.
    #[must_use]
    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    /// The `paths` section, if present.
    #[must_use]
    pub fn paths(&self) -> Option<&Paths> {
        self.sections.iter().find_map(|section| match section {
            Section::Paths(paths) => Some(paths),
            _ => None,
        })
    }
}

impl TryFrom<Value> for Document {
    type Error = FilterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(root) = value else {
            return Err(FilterError::NotAnObject);
        };

        let sections = root
            .into_iter()
            .map(|(key, value)| Section::parse(key, value))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { sections })
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            match section {
                Section::OpenApi(value)
                | Section::Info(value)
                | Section::Servers(value)
                | Section::Components(value) => map.serialize_entry(section.key(), value)?,
                Section::Tags(tags) => map.serialize_entry(section.key(), tags)?,
                Section::Paths(paths) => map.serialize_entry(section.key(), paths)?,
            }
        }
        map.end()
    }
}

/// A top-level section of a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    /// The `openapi` version field.
    OpenApi(Value),
    /// The `info` object.
    Info(Value),
    /// The `servers` array.
    Servers(Value),
    /// The `tags` array.
    Tags(Vec<Tag>),
    /// The `paths` object.
    Paths(Paths),
    /// The `components` object.
    Components(Value),
}

impl Section {
    /// The top-level key of this section.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::OpenApi(_) => "openapi",
            Self::Info(_) => "info",
            Self::Servers(_) => "servers",
            Self::Tags(_) => "tags",
            Self::Paths(_) => "paths",
            Self::Components(_) => "components",
        }
    }

    fn parse(key: String, value: Value) -> Result<Self, FilterError> {
        let section = match key.as_str() {
            "openapi" => Self::OpenApi(value),
            "info" => Self::Info(value),
            "servers" => Self::Servers(value),
            "components" => Self::Components(value),
            "tags" => Self::Tags(parse_content("tags", value)?),
            "paths" => Self::Paths(parse_content("paths", value)?),
            _ => return Err(FilterError::UnknownDocumentElement { key }),
        };
        Ok(section)
    }
}

fn parse_content<T>(section: &'static str, value: Value) -> Result<T, FilterError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_path_to_error::deserialize(value)
        .map_err(|source| FilterError::MalformedSection { section, source })
}

/// An entry of the `tags` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    /// The tag name.
    pub name: String,
    /// Every other field, kept as is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    /// Creates a tag with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// An HTTP-verb scoped operation.
///
/// Only `tags` and `security` are typed; every other field is kept as is.
/// Fields are written back in the order they were read, fields set
/// afterwards come last.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Operation {
    /// Tags of the operation.
    pub tags: Option<Vec<String>>,
    /// Security requirements, any of which grants access.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Every other field, kept as is.
    pub extra: Map<String, Value>,
    key_order: Vec<String>,
}

impl Operation {
    /// Sets the tags of the operation.
    #[must_use]
    pub fn with_tags<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the security requirements of the operation.
    #[must_use]
    pub fn with_security(mut self, security: Vec<SecurityRequirement>) -> Self {
        self.security = Some(security);
        self
    }

    /// Returns `true` if the operation carries the given tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_deref()
            .is_some_and(|tags| tags.iter().any(|it| it == tag))
    }

    fn is_present(&self, key: &str) -> bool {
        match key {
            TAGS => self.tags.is_some(),
            SECURITY => self.security.is_some(),
            _ => self.extra.contains_key(key),
        }
    }

    fn serialized_keys(&self) -> Vec<&str> {
        let read = self.key_order.iter().map(String::as_str);
        let added = [TAGS, SECURITY]
            .into_iter()
            .chain(self.extra.keys().map(String::as_str))
            .filter(|key| !self.key_order.iter().any(|known| known.as_str() == *key));

        read.chain(added)
            .filter(|key| self.is_present(key))
            .collect()
    }
}

const TAGS: &str = "tags";
const SECURITY: &str = "security";

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let keys = self.serialized_keys();
        let mut map = serializer.serialize_map(Some(keys.len()))?;
        for key in keys {
            match key {
                TAGS => map.serialize_entry(key, &self.tags)?,
                SECURITY => map.serialize_entry(key, &self.security)?,
                _ => map.serialize_entry(key, &self.extra.get(key))?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Operation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OperationVisitor)
    }
}

struct OperationVisitor;

impl<'de> Visitor<'de> for OperationVisitor {
    type Value = Operation;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an OpenAPI operation object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut operation = Operation::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                TAGS => operation.tags = map.next_value()?,
                SECURITY => operation.security = map.next_value()?,
                _ => {
                    let value = map.next_value()?;
                    operation.extra.insert(key.clone(), value);
                }
            }
            operation.key_order.push(key);
        }
        Ok(operation)
    }
}

/// An entry of a [`PathItem`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathItemEntry {
    /// An operation, keyed by HTTP verb.
    Operation(Operation),
    /// A field shared by all operations (`summary`, `parameters`, ...).
    Shared(Value),
}

/// The operations available on a single path, plus their shared fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    entries: IndexMap<String, PathItemEntry>,
}

impl PathItem {
    /// Creates an empty path item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation for the given HTTP verb.
    #[must_use]
    pub fn with_operation(mut self, method: impl Into<String>, operation: Operation) -> Self {
        self.entries
            .insert(method.into(), PathItemEntry::Operation(operation));
        self
    }

    /// Adds a field shared by all operations.
    #[must_use]
    pub fn with_shared(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), PathItemEntry::Shared(value));
        self
    }

    /// Iterates over `(verb, operation)` pairs, in document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, &Operation)> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            PathItemEntry::Operation(operation) => Some((key.as_str(), operation)),
            PathItemEntry::Shared(_) => None,
        })
    }

    /// Looks up the operation of an HTTP verb, ignoring case.
    #[must_use]
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        self.operations()
            .find(|(verb, _)| verb.eq_ignore_ascii_case(method))
            .map(|(_, operation)| operation)
    }

    /// Returns a copy holding only the operations matching the predicate.
    ///
    /// Shared fields are kept. Returns `None` when no operation survives.
    #[must_use]
    pub fn retain_operations(&self, keep: impl Fn(&Operation) -> bool) -> Option<Self> {
        let entries = self
            .entries
            .iter()
            .filter(|(_, entry)| match entry {
                PathItemEntry::Operation(operation) => keep(operation),
                PathItemEntry::Shared(_) => true,
            })
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect::<IndexMap<_, _>>();

        let result = Self { entries };
        let has_operation = result.operations().next().is_some();
        has_operation.then_some(result)
    }

    /// Returns a copy where every operation went through `transform`.
    #[must_use]
    pub fn map_operations(&self, transform: impl Fn(&Operation) -> Operation) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(key, entry)| {
                let entry = match entry {
                    PathItemEntry::Operation(operation) => {
                        PathItemEntry::Operation(transform(operation))
                    }
                    PathItemEntry::Shared(value) => PathItemEntry::Shared(value.clone()),
                };
                (key.clone(), entry)
            })
            .collect();

        Self { entries }
    }
}

impl Serialize for PathItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PathItemVisitor)
    }
}

struct PathItemVisitor;

impl<'de> Visitor<'de> for PathItemVisitor {
    type Value = PathItem;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an OpenAPI path item object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = IndexMap::with_capacity(map.size_hint().unwrap_or_default());
        while let Some(key) = map.next_key::<String>()? {
            let entry = if is_http_method(&key) {
                PathItemEntry::Operation(map.next_value()?)
            } else {
                PathItemEntry::Shared(map.next_value()?)
            };
            entries.insert(key, entry);
        }
        Ok(PathItem { entries })
    }
}

fn is_http_method(key: &str) -> bool {
    HTTP_METHODS
        .iter()
        .any(|method| method.eq_ignore_ascii_case(key))
}
