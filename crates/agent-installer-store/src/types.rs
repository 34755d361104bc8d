//! Records exchanged with the store.

/// A named asset file: a path relative to the asset directory and its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Path relative to the store root, `/`-separated.
    pub filename: String,
    /// File contents.
    pub data: Vec<u8>,
}

impl File {
    /// Create a file record.
    #[must_use]
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}
