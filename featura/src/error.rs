use concepta::ContextError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatError {
    /// A configured property name is empty or a signed payload carries a sign.
    #[error("inappropriate feature name: {0:?}")]
    InvalidFeatureName(String),

    /// Sign-stripped property names overlap as substrings; lists every pair.
    #[error("feature names in substring relation: {0:?}")]
    AmbiguousFeatureNames(Vec<(String, String)>),

    /// A query string contains text no known feature name accounts for.
    #[error("unmatched feature splitting {input:?}, known features: {known:?}")]
    UnmatchedFeatureText { input: String, known: Vec<String> },

    /// The context cannot refer to each of its objects individually.
    #[error("context does not allow to refer to each individual object: {context}")]
    NotAtomic { context: String },

    /// A syntactically valid combination resolved to the infimum.
    #[error("{input:?} is not a valid feature set in {system}")]
    InvalidCombination { input: String, system: String },

    /// No feature system is registered under the given key.
    #[error("no feature system registered under key {0:?}")]
    UnknownSystem(String),

    #[error(transparent)]
    Context(#[from] ContextError),
}

pub type FeatResult<T> = Result<T, FeatError>;
