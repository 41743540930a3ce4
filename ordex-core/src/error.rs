use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The field resolved, but its declared type has no natural ordering.
    #[error("Field `{field}` of type `{type_name}` cannot be used as a sort key")]
    IncomparableField {
        field: String,
        type_name: &'static str,
    },

    #[error("Invalid sort configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SortError {
    fn from(err: toml::de::Error) -> Self {
        SortError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SortError>;
