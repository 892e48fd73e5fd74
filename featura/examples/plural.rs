//! Walk through a person/number feature system.
//!
//! Run with `cargo run --example plural`.

use featura::{Config, FeatResult, FeatureSystem};

const PLURAL: &str = "
    |+1|-1|+2|-2|+3|-3|+sg|+pl|-sg|-pl|
  1s| X|  |  | X|  | X|  X|   |   |  X|
  1p| X|  |  | X|  | X|   |  X|  X|   |
  2s|  | X| X|  |  | X|  X|   |   |  X|
  2p|  | X| X|  |  | X|   |  X|  X|   |
  3s|  | X|  | X| X|  |  X|   |   |  X|
  3p|  | X|  | X| X|  |   |  X|  X|   |
";

fn main() -> FeatResult<()> {
    let config = Config::new(PLURAL)
        .with_key("plural")
        .with_description("Plural pronoun paradigm");
    let system = FeatureSystem::new(config)?;
    println!("{system}");

    let first_singular = system.resolve("1sg")?;
    println!("'1sg' resolves to {first_singular}");
    println!("  full intent: [{}]", first_singular.maximal_string());
    println!("  denotes: [{}]", first_singular.extent_string());

    println!("  generalizations:");
    for set in first_singular.upset() {
        println!("    {set}");
    }

    let first = system.resolve("+1")?;
    let singular = system.resolve("+sg")?;
    println!("{first} ^ {singular} = {}", &first ^ &singular);
    println!("{first_singular} % {singular} = {}", &first_singular % &singular);

    let speaker_or_hearer = system.join(&[first.clone(), system.resolve("+2")?]);
    println!("join of +1 and +2 = {speaker_or_hearer}");

    println!("all {} feature sets:", system.len());
    for set in system.iter() {
        println!("  {set}");
    }
    Ok(())
}
