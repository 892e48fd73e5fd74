#![allow(dead_code)]

use featura::{Config, FeatureSystem};

/// Person/number paradigm with six fully specified pronoun slots.
pub const PLURAL: &str = "
    |+1|-1|+2|-2|+3|-3|+sg|+pl|-sg|-pl|
  1s| X|  |  | X|  | X|  X|   |   |  X|
  1p| X|  |  | X|  | X|   |  X|  X|   |
  2s|  | X| X|  |  | X|  X|   |   |  X|
  2p|  | X| X|  |  | X|   |  X|  X|   |
  3s|  | X|  | X| X|  |  X|   |   |  X|
  3p|  | X|  | X| X|  |   |  X|  X|   |
";

/// Binary gender/age square: four objects, four signed properties.
pub const GENDER: &str = "
     |+male|-male|+adult|-adult|
  man|    X|     |     X|      |
woman|     |    X|     X|      |
  boy|    X|     |      |     X|
 girl|     |    X|      |     X|
";

/// A fresh anonymous person/number system (22 feature sets, 6 atoms).
pub fn plural() -> FeatureSystem {
    FeatureSystem::new(Config::new(PLURAL)).unwrap()
}

/// A fresh anonymous gender/age system (10 feature sets, 4 atoms).
pub fn gender() -> FeatureSystem {
    FeatureSystem::new(Config::new(GENDER)).unwrap()
}

pub fn strings(sets: &[featura::FeatureSet]) -> Vec<&str> {
    sets.iter().map(|s| s.minimal_string()).collect()
}
