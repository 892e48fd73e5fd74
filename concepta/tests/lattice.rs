use concepta::{Context, ContextError, ContextFormat, Lattice};
use pretty_assertions::assert_eq;

const GENDER: &str = "
     |+male|-male|+adult|-adult|
  man|    X|     |     X|      |
woman|     |    X|     X|      |
  boy|    X|     |      |     X|
 girl|     |    X|      |     X|
";

// Concept indices in shortlex extent order:
//   0 {}  1 {man}  2 {woman}  3 {boy}  4 {girl}
//   5 {man woman} (+adult)  6 {man boy} (+male)
//   7 {woman girl} (-male)  8 {boy girl} (-adult)
//   9 {man woman boy girl}
fn gender() -> Lattice {
    Context::from_str(GENDER, ContextFormat::Table)
        .unwrap()
        .lattice()
}

fn extent(lattice: &Lattice, index: usize) -> Vec<usize> {
    lattice.concept(index).extent().iter().collect()
}

#[test]
fn concepts_in_shortlex_order() {
    let lattice = gender();
    assert_eq!(lattice.len(), 10);
    assert!(!lattice.is_empty());

    let extents: Vec<Vec<usize>> = (0..lattice.len()).map(|i| extent(&lattice, i)).collect();
    assert_eq!(
        extents,
        vec![
            vec![],
            vec![0],
            vec![1],
            vec![2],
            vec![3],
            vec![0, 1],
            vec![0, 2],
            vec![1, 3],
            vec![2, 3],
            vec![0, 1, 2, 3],
        ]
    );
    for (i, concept) in lattice.concepts().enumerate() {
        assert_eq!(concept.index(), i);
    }
}

#[test]
fn extremes_and_atoms() {
    let lattice = gender();
    assert_eq!(lattice.infimum().index(), 0);
    assert_eq!(lattice.supremum().index(), 9);
    assert_eq!(lattice.atoms(), &[1, 2, 3, 4]);
    // atoms below -male: woman and girl
    assert_eq!(lattice.concept(7).atoms(), &[2, 4]);
    assert_eq!(lattice.supremum().atoms(), &[1, 2, 3, 4]);
}

#[test]
fn minimal_generators() {
    let lattice = gender();
    let minimal: Vec<Vec<usize>> = (0..lattice.len())
        .map(|i| lattice.concept(i).minimal().to_vec())
        .collect();
    assert_eq!(
        minimal,
        vec![
            vec![0, 1], // +male -male: the least inconsistent pair
            vec![0, 2], // +male +adult
            vec![1, 2], // -male +adult
            vec![0, 3], // +male -adult
            vec![1, 3], // -male -adult
            vec![2],    // +adult
            vec![0],    // +male
            vec![1],    // -male
            vec![3],    // -adult
            vec![],     // the supremum carries no information
        ]
    );
}

#[test]
fn intents_close_over_extents() {
    let lattice = gender();
    // {man}: +male and +adult
    let intent: Vec<usize> = lattice.concept(1).intent().iter().collect();
    assert_eq!(intent, vec![0, 2]);
    // the infimum entails everything
    let intent: Vec<usize> = lattice.infimum().intent().iter().collect();
    assert_eq!(intent, vec![0, 1, 2, 3]);
    assert!(lattice.supremum().intent().is_empty());
}

#[test]
fn covers() {
    let lattice = gender();
    assert_eq!(lattice.infimum().upper_neighbors(), &[1, 2, 3, 4]);
    assert_eq!(lattice.concept(1).upper_neighbors(), &[5, 6]);
    assert_eq!(lattice.concept(6).upper_neighbors(), &[9]);
    assert_eq!(lattice.supremum().upper_neighbors(), &[] as &[usize]);

    assert_eq!(lattice.supremum().lower_neighbors(), &[5, 6, 7, 8]);
    assert_eq!(lattice.concept(5).lower_neighbors(), &[1, 2]);
    assert_eq!(lattice.concept(1).lower_neighbors(), &[0]);
    assert_eq!(lattice.infimum().lower_neighbors(), &[] as &[usize]);
}

#[test]
fn subsumption() {
    let lattice = gender();
    // +male subsumes {man}
    assert!(lattice.subsumes(6, 1));
    assert!(!lattice.subsumes(1, 6));
    assert!(lattice.subsumes(6, 6));
    assert!(!lattice.properly_subsumes(6, 6));
    assert!(lattice.properly_subsumes(9, 0));
    // +male and +adult are incomparable
    assert!(!lattice.subsumes(6, 5));
    assert!(!lattice.subsumes(5, 6));
}

#[test]
fn joins_and_meets() {
    let lattice = gender();
    // closest generalization of man and woman is +adult
    assert_eq!(lattice.join([1, 2]), 5);
    // closest specialization of +male and +adult is man
    assert_eq!(lattice.meet([6, 5]), 1);
    // man and girl share no property
    assert_eq!(lattice.join([1, 4]), 9);
    assert_eq!(lattice.meet([1, 4]), 0);
    // bounds over the empty selection
    assert_eq!(lattice.join(std::iter::empty()), 0);
    assert_eq!(lattice.meet(std::iter::empty()), 9);
    // single and idempotent arguments
    assert_eq!(lattice.join([6]), 6);
    assert_eq!(lattice.meet([6, 6]), 6);
}

#[test]
fn upsets_ascend_by_index() {
    let lattice = gender();
    let upset: Vec<usize> = lattice.upset(1).collect();
    assert_eq!(upset, vec![1, 5, 6, 9]);
    let upset: Vec<usize> = lattice.upset(9).collect();
    assert_eq!(upset, vec![9]);
    assert_eq!(lattice.upset(0).count(), 10);
}

#[test]
fn downsets_descend_by_extent_size() {
    let lattice = gender();
    // +male, then its two instances, then the infimum
    assert_eq!(lattice.downset(6), vec![6, 1, 3, 0]);
    assert_eq!(lattice.downset(0), vec![0]);
    // full downset of the supremum: sizes 4, 2, 2, 2, 2, 1, 1, 1, 1, 0
    assert_eq!(lattice.downset(9), vec![9, 5, 6, 7, 8, 1, 2, 3, 4, 0]);
}

#[test]
fn upset_and_downset_unions_deduplicate() {
    let lattice = gender();
    assert_eq!(lattice.upset_union([1, 2]), vec![1, 2, 5, 6, 7, 9]);
    assert_eq!(lattice.downset_union([6, 5]), vec![0, 1, 2, 3, 5, 6]);
    assert_eq!(lattice.upset_union(std::iter::empty()), Vec::<usize>::new());
}

#[test]
fn concept_lookup_by_properties() {
    let lattice = gender();
    assert_eq!(lattice.concept_by_properties(["+male"]).unwrap(), 6);
    assert_eq!(
        lattice.concept_by_properties(["+male", "+adult"]).unwrap(),
        1
    );
    // order does not matter, the closure does
    assert_eq!(
        lattice.concept_by_properties(["+adult", "+male"]).unwrap(),
        1
    );
    // contradictory selections close to the infimum
    assert_eq!(
        lattice.concept_by_properties(["+male", "-male"]).unwrap(),
        0
    );
    let empty: [&str; 0] = [];
    assert_eq!(lattice.concept_by_properties(empty).unwrap(), 9);
    assert!(matches!(
        lattice.concept_by_properties(["spam"]),
        Err(ContextError::UnknownProperty(name)) if name == "spam"
    ));
}
