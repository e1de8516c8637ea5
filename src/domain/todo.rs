//! Todo domain model.
//!
//! This module contains the todo record, its store-assigned identifier,
//! the insert/patch value types, and the connection status reported by
//! the store's liveness probe.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// =============================================================================
// Identifier
// =============================================================================

/// Unique identifier for a todo record.
///
/// This is a newtype wrapper around the store's native `ObjectId`. The
/// external representation (URLs, JSON) is the 24-character hex string;
/// [`TodoId::parse`] is the explicit translation step back from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Creates a `TodoId` from an existing `ObjectId`.
    #[must_use]
    pub const fn from_object_id(id: ObjectId) -> Self {
        Self(id)
    }

    /// Returns the inner `ObjectId`.
    #[must_use]
    pub const fn as_object_id(&self) -> ObjectId {
        self.0
    }

    /// Generates a new `TodoId`.
    ///
    /// Object ids embed the creation time, so ids generated later compare
    /// greater than earlier ones.
    #[must_use]
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses the external string form of an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TodoIdError::Malformed`] when the input is not a valid
    /// 24-character hex object id. Malformed ids coming in from URLs must
    /// be rejected here, never passed through to the store.
    pub fn parse(value: &str) -> Result<Self, TodoIdError> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| TodoIdError::Malformed {
                value: value.to_owned(),
            })
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.to_hex())
    }
}

// The raw ObjectId serde representation is extended JSON (`{"$oid": ...}`);
// the API wants the plain hex string, so (de)serialization goes through it.
impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Error returned when an external identifier cannot be translated into
/// the store's native form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TodoIdError {
    /// The input is not a valid 24-character hex object id.
    #[error("malformed todo identifier {value:?}: expected a 24-character hex string")]
    Malformed {
        /// The rejected input.
        value: String,
    },
}

// =============================================================================
// Todo Record
// =============================================================================

/// A single todo record.
///
/// Serialization of this type is the JSON API shape: the identifier as a
/// hex string, timestamps in RFC 3339, `updated_at` omitted until the
/// record has been mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identifier, immutable once assigned.
    pub id: TodoId,
    /// Task name.
    pub name: String,
    /// Task description.
    pub description: String,
    /// Completion flag, flipped only by an explicit update.
    pub completed: bool,
    /// Set on insert, never changed afterwards.
    pub created_at: DateTime<Utc>,
    /// Set on every mutation, absent until the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Address of the client that created the record.
    pub ip_address: String,
}

/// The insert-side value: everything the caller supplies for a new record.
///
/// The store supplies the identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    /// Task name, validated non-empty by the handler layer.
    pub name: String,
    /// Task description, validated non-empty by the handler layer.
    pub description: String,
    /// Address of the submitting client.
    pub ip_address: String,
}

impl NewTodo {
    /// Materializes the full record with a store-assigned identifier and
    /// creation time. Completion starts false.
    #[must_use]
    pub fn into_todo(self, id: TodoId, created_at: DateTime<Utc>) -> Todo {
        Todo {
            id,
            name: self.name,
            description: self.description,
            completed: false,
            created_at,
            updated_at: None,
            ip_address: self.ip_address,
        }
    }
}

/// A partial update over a todo record.
///
/// Absent fields are left untouched. Applying a patch always stamps
/// `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoPatch {
    /// New task name, if changed.
    pub name: Option<String>,
    /// New task description, if changed.
    pub description: Option<String>,
    /// New completion flag, if changed.
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// A patch that only changes the completion flag.
    #[must_use]
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }

    /// Returns `true` when the patch carries no field changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Applies the patch in place and stamps `updated_at`.
    pub fn apply(self, todo: &mut Todo, at: DateTime<Utc>) {
        if let Some(name) = self.name {
            todo.name = name;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        todo.updated_at = Some(at);
    }
}

// =============================================================================
// Connection Status
// =============================================================================

/// Result of the store's liveness probe.
///
/// Recomputed on demand and never cached beyond the call that computed
/// it, so the value can flip between two observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// The last probe reached the store.
    Connected,
    /// No client handle exists, or the last probe failed.
    Disconnected,
}

impl ConnectionStatus {
    /// Returns `true` when the store was reachable at probe time.
    #[must_use]
    pub const fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns the lowercase label used in responses and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for ConnectionStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
