//! Rows materialized from a chat store.

/// A stored blob: opaque id plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    id: String,
    data: Vec<u8>,
}

impl Blob {
    /// Build a blob row.
    pub fn new(id: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }

    /// Blob id as stored.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw blob bytes; empty for a NULL column.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A `meta` table row. The value is kept as stored, whatever its encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaRow {
    key: String,
    value: Vec<u8>,
}

impl MetaRow {
    /// Build a meta row.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Meta key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored value bytes.
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}
