//! Serde representations for systems and feature sets.
//!
//! A keyed system serializes to its bare key string and deserializes by
//! lookup in the process-wide [`Registry`]; a keyless system serializes to
//! its inline [`Config`]. A feature set serializes to its system reference
//! plus its minimal feature notation, which survives round trips because
//! keyed systems resolve to the shared instance.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Config;
use crate::registry::Registry;
use crate::set::FeatureSet;
use crate::system::FeatureSystem;

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SystemRef {
    Key(String),
    Inline(Config),
}

impl SystemRef {
    fn of(system: &FeatureSystem) -> SystemRef {
        match system.key() {
            Some(key) => SystemRef::Key(key.to_string()),
            None => SystemRef::Inline(system.config().clone()),
        }
    }

    fn resolve<E: DeError>(self) -> Result<FeatureSystem, E> {
        let result = match self {
            SystemRef::Key(key) => Registry::global().resolve(&key),
            SystemRef::Inline(config) => FeatureSystem::new(config),
        };
        result.map_err(E::custom)
    }
}

impl Serialize for FeatureSystem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SystemRef::of(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FeatureSystem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<FeatureSystem, D::Error> {
        SystemRef::deserialize(deserializer)?.resolve()
    }
}

#[derive(Serialize, Deserialize)]
struct SetRepr {
    system: SystemRef,
    features: String,
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SetRepr {
            system: SystemRef::of(&self.system()),
            features: self.minimal_string().to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FeatureSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<FeatureSet, D::Error> {
        let repr = SetRepr::deserialize(deserializer)?;
        let system: FeatureSystem = repr.system.resolve()?;
        system
            .resolve_lenient(&repr.features)
            .map_err(D::Error::custom)
    }
}
