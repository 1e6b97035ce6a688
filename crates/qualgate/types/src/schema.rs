//! Record format versioning.
//!
//! Every top-level record serialises a literal `schema` number. Consumers
//! reject numbers they do not know instead of guessing compatibility, so the
//! `Deserialize` impl fails on anything other than [`CURRENT_SCHEMA`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TypesError, TypesResult};

/// The only record format this engine reads and writes.
pub const CURRENT_SCHEMA: u32 = 1;

/// The `schema` tag of a top-level record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SchemaVersion(u32);

impl SchemaVersion {
    pub const V1: SchemaVersion = SchemaVersion(CURRENT_SCHEMA);

    /// Accept a raw schema number, rejecting unknown versions.
    pub fn parse(raw: u32) -> TypesResult<Self> {
        if raw == CURRENT_SCHEMA {
            Ok(Self(raw))
        } else {
            Err(TypesError::UnsupportedSchema(raw))
        }
    }

    pub fn number(self) -> u32 {
        self.0
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::V1
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schema-{}", self.0)
    }
}

impl Serialize for SchemaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u32::deserialize(deserializer)?;
        SchemaVersion::parse(raw).map_err(serde::de::Error::custom)
    }
}
