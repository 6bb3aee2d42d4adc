use thiserror::Error;

/// Schema-level failures while turning a source file into a [`Dataset`].
///
/// I/O and format errors from the underlying readers are carried by
/// `anyhow` context in the loader; these variants describe data that was
/// readable but does not fit the penguin schema.
///
/// [`Dataset`]: super::model::Dataset
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("unknown species '{0}' (expected Adelie, Chinstrap or Gentoo)")]
    UnknownSpecies(String),

    #[error("column '{column}': '{value}' is not a number")]
    BadNumber { column: String, value: String },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedType { column: String, data_type: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
