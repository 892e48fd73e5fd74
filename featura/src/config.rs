//! Configuration records describing one feature system.

use serde::{Deserialize, Serialize};

pub use concepta::ContextFormat;

/// Everything needed to build one [`FeatureSystem`](crate::FeatureSystem).
///
/// A `Config` is a plain record: layered definition files and inheritance are
/// resolved by outer tooling, which hands the finished record to
/// [`FeatureSystem::new`](crate::FeatureSystem::new).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Registry key; keyed systems are built at most once per process.
    #[serde(default)]
    pub key: Option<String>,
    /// Context description in the format named by `format`.
    pub context: String,
    #[serde(default)]
    pub format: ContextFormat,
    /// Alternative registry keys for the same system.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Key of a parent definition, interpreted by outer configuration layers.
    #[serde(default)]
    pub inherits: Option<String>,
    /// Render feature sets with their full intent instead of the minimal
    /// generator.
    #[serde(default)]
    pub str_maximal: bool,
    #[serde(default)]
    pub description: String,
}

impl Config {
    /// An anonymous configuration for the given context text.
    pub fn new(context: impl Into<String>) -> Config {
        Config {
            key: None,
            context: context.into().trim().to_string(),
            format: ContextFormat::default(),
            aliases: Vec::new(),
            inherits: None,
            str_maximal: false,
            description: String::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Config {
        self.key = Some(key.into());
        self
    }

    pub fn with_format(mut self, format: ContextFormat) -> Config {
        self.format = format;
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Config
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Config {
        self.description = description.into().trim().to_string();
        self
    }

    pub fn with_str_maximal(mut self, str_maximal: bool) -> Config {
        self.str_maximal = str_maximal;
        self
    }

    /// The key followed by the aliases: every name this system registers under.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.key
            .as_deref()
            .into_iter()
            .chain(self.aliases.iter().map(String::as_str))
    }
}
