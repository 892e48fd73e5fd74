mod common;

use common::{GENDER, PLURAL};
use featura::{Config, FeatureSet, FeatureSystem, Registry};
use pretty_assertions::assert_eq;
use serde_json::json;

// Keys are namespaced per test: the global registry is shared process state.

#[test]
fn keyed_systems_are_built_once() {
    let config = Config::new(PLURAL).with_key("reg-once");
    let one = FeatureSystem::new(config.clone()).unwrap();
    let other = FeatureSystem::new(config).unwrap();
    assert_eq!(one, other);
    assert_eq!(one.resolve("1sg").unwrap(), other.resolve("1sg").unwrap());
    assert_eq!(Registry::global().get("reg-once").unwrap(), one);
}

#[test]
fn aliases_resolve_to_the_same_instance() {
    let config = Config::new(GENDER)
        .with_key("reg-alias")
        .with_aliases(["reg-alias-gender", "reg-alias-square"]);
    let system = FeatureSystem::new(config).unwrap();
    for name in ["reg-alias", "reg-alias-gender", "reg-alias-square"] {
        assert_eq!(Registry::global().get(name).unwrap(), system);
    }
    assert!(Registry::global().get("reg-alias-unknown").is_none());
    assert!(Registry::global().resolve("reg-alias-unknown").is_err());
}

#[test]
fn keyless_systems_stay_private() {
    let one = FeatureSystem::new(Config::new(PLURAL)).unwrap();
    let other = FeatureSystem::new(Config::new(PLURAL)).unwrap();
    assert_ne!(one, other);
    assert_eq!(one.key(), None);
}

#[test]
fn local_registries_are_isolated() {
    let registry = Registry::new();
    let config = Config::new(GENDER).with_key("reg-local");
    let one = registry.get_or_create(config.clone()).unwrap();
    let other = registry.get_or_create(config).unwrap();
    assert_eq!(one, other);
    assert!(Registry::global().get("reg-local").is_none());

    let fresh = Registry::default();
    assert!(fresh.get("reg-local").is_none());
}

#[test]
fn keyed_systems_serialize_to_their_key() {
    let system = FeatureSystem::new(Config::new(PLURAL).with_key("reg-serde")).unwrap();
    assert_eq!(serde_json::to_value(&system).unwrap(), json!("reg-serde"));

    let restored: FeatureSystem = serde_json::from_value(json!("reg-serde")).unwrap();
    assert_eq!(restored, system);

    let missing = serde_json::from_value::<FeatureSystem>(json!("reg-serde-missing"));
    assert!(missing.is_err());
}

#[test]
fn feature_sets_round_trip_through_their_key() {
    let system = FeatureSystem::new(Config::new(PLURAL).with_key("reg-serde-set")).unwrap();
    let first_singular = system.resolve("1sg").unwrap();

    let value = serde_json::to_value(&first_singular).unwrap();
    assert_eq!(
        value,
        json!({"system": "reg-serde-set", "features": "+1 +sg"})
    );
    let restored: FeatureSet = serde_json::from_value(value).unwrap();
    assert_eq!(restored, first_singular);

    // the infimum survives because deserialization is lenient
    let infimum = system.infimum();
    let value = serde_json::to_value(&infimum).unwrap();
    let restored: FeatureSet = serde_json::from_value(value).unwrap();
    assert_eq!(restored, infimum);
}

#[test]
fn keyless_systems_serialize_inline() {
    let system = FeatureSystem::new(Config::new(GENDER)).unwrap();
    let value = serde_json::to_value(&system).unwrap();
    assert_eq!(value["context"], json!(GENDER.trim()));
    assert_eq!(value["format"], json!("table"));

    // an inline config builds a fresh, equivalent instance
    let restored: FeatureSystem = serde_json::from_value(value).unwrap();
    assert_ne!(restored, system);
    assert_eq!(restored.len(), system.len());

    let set = system.resolve("+male").unwrap();
    let value = serde_json::to_value(&set).unwrap();
    let restored: FeatureSet = serde_json::from_value(value).unwrap();
    assert_ne!(restored, set);
    assert_eq!(restored.minimal_string(), "+male");
    assert_eq!(restored.index(), set.index());
}
