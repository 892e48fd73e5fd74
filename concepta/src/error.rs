use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("context has no incidence table")]
    Empty,

    #[error("context table is missing a property header row")]
    MissingHeader,

    #[error("row '{label}' has {found} cells, expected {expected}")]
    RowWidth {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("unrecognized cell {content:?} for object '{label}', property '{property}'")]
    BadCell {
        label: String,
        property: String,
        content: String,
    },

    #[error("duplicate object label '{0}'")]
    DuplicateObject(String),

    #[error("duplicate property name '{0}'")]
    DuplicateProperty(String),

    #[error("malformed cxt context: {0}")]
    BadCxt(String),

    #[error("unknown property name '{0}'")]
    UnknownProperty(String),
}

pub type ContextResult<T> = Result<T, ContextError>;
