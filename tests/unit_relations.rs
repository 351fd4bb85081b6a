//! Unit tests for relation construction and the allegory operations,
//! exercised through both storage forms.

use relalg::laws::{converse_involution_witness, equality_witness, inclusion_witness};
use relalg::{describe, BitStore, Finite, PairStore, Rel, RelError, RelStorage};

fn cycle<S: RelStorage>(carrier: &Finite<u32>) -> Rel<u32, u32, S> {
    let n = carrier.len() as u32;
    Rel::from_fn(carrier, carrier, |x, y| (x + 1) % n == *y)
}

#[test]
fn inclusion_witness_reports_the_exact_gap() {
    let a = Finite::new(vec![1, 2, 3]);
    let b = Finite::new(vec!['a', 'b', 'c']);
    let r = Rel::<_, _, PairStore>::from_pairs(&a, &b, &[(1, 'a'), (2, 'b')]).unwrap();
    let s = Rel::<_, _, PairStore>::from_pairs(&a, &b, &[(1, 'a'), (2, 'b'), (3, 'c')]).unwrap();

    // R ⊆ S holds
    assert!(inclusion_witness(&s, &r).unwrap().is_ok());

    // S ⊆ R fails precisely at (3, 'c')
    let check = inclusion_witness(&r, &s).unwrap();
    assert!(check.is_fail());
    assert_eq!(check.witness().unwrap().missing, vec![(3, 'c')]);
    assert_eq!(
        describe(check.witness().unwrap()),
        "pairs missing from the right side: [(3, 'c')]"
    );
}

#[test]
fn converse_is_involutive_on_the_three_cycle() {
    let a = Finite::new(vec![0u32, 1, 2]);
    let r = Rel::<_, _, PairStore>::from_pairs(&a, &a, &[(0, 1), (1, 2), (2, 0)]).unwrap();
    assert_eq!(r.converse().converse(), r);
    assert!(converse_involution_witness(&r).unwrap().is_ok());

    let rb = r.to_bits();
    assert_eq!(rb.converse().converse().to_pairs(), r.to_pairs());
}

#[test]
fn meet_and_join_are_idempotent() {
    let a = Finite::new(0..5u32);
    let r = cycle::<PairStore>(&a);
    assert_eq!(r.meet(&r).unwrap(), r);
    assert_eq!(r.join(&r).unwrap(), r);

    let rb = cycle::<BitStore>(&a);
    assert!(equality_witness(&rb.meet(&rb).unwrap(), &rb).unwrap().is_ok());
    assert!(equality_witness(&rb.join(&rb).unwrap(), &rb).unwrap().is_ok());
}

#[test]
fn identity_laws_hold_in_both_forms() {
    let a = Finite::new(0..7u32);

    let r = cycle::<PairStore>(&a);
    let id = Rel::<_, _, PairStore>::identity(&a);
    assert_eq!(id.compose(&r).unwrap(), r);
    assert_eq!(r.compose(&id).unwrap(), r);

    let rb = cycle::<BitStore>(&a);
    let idb = Rel::<_, _, BitStore>::identity(&a);
    assert_eq!(idb.compose(&rb).unwrap().to_pairs(), rb.to_pairs());
    assert_eq!(rb.compose(&idb).unwrap().to_pairs(), rb.to_pairs());
}

#[test]
fn both_forms_reject_mismatched_carriers() {
    let a = Finite::new(0..3u32);
    let a2 = Finite::new(0..3u32);

    let r = cycle::<PairStore>(&a);
    let s = cycle::<PairStore>(&a2);
    assert!(matches!(r.meet(&s), Err(RelError::CarrierMismatch { .. })));
    assert!(matches!(
        r.compose(&s),
        Err(RelError::CarrierMismatch { .. })
    ));

    let rb = cycle::<BitStore>(&a);
    let sb = cycle::<BitStore>(&a2);
    assert!(matches!(rb.join(&sb), Err(RelError::CarrierMismatch { .. })));
}

#[test]
fn invalid_pairs_are_rejected_at_construction() {
    let a = Finite::new(0..3u32);
    let b = Finite::new(0..3u32);
    let err = Rel::<_, _, BitStore>::from_pairs(&a, &b, &[(0, 0), (5, 1)]);
    assert!(matches!(err, Err(RelError::InvalidPair { .. })));
}

#[test]
fn storage_conversion_round_trips() {
    let a = Finite::new(0..70u32);
    let b = Finite::new(0..70u32);
    // sparse pattern crossing word boundaries
    let r = Rel::<_, _, PairStore>::from_fn(&a, &b, |x, y| (x * 7 + 3) % 70 == *y);
    let rb = r.to_bits();
    assert_eq!(rb.to_pairs(), r.to_pairs());
    assert_eq!(rb.to_pair_form(), r);
}

#[test]
fn composition_agrees_across_forms_on_dense_relations() {
    let a = Finite::new(0..65u32);
    let r = Rel::<_, _, PairStore>::from_fn(&a, &a, |x, y| (x + y) % 3 == 0);
    let s = Rel::<_, _, PairStore>::from_fn(&a, &a, |x, y| x % 5 == y % 5);

    let pair_result = r.compose(&s).unwrap();
    let bit_result = r.to_bits().compose(&s.to_bits()).unwrap();
    assert_eq!(bit_result.to_pairs(), pair_result.to_pairs());
}

#[test]
fn full_relation_is_the_top_of_the_lattice() {
    let a = Finite::new(0..5u32);
    let r = cycle::<PairStore>(&a);
    let top = Rel::<_, _, PairStore>::full(&a, &a);

    assert!(r.is_subset_of(&top).unwrap());
    assert_eq!(top.meet(&r).unwrap(), r);
    assert_eq!(top.join(&r).unwrap(), top);
    assert_eq!(top.len(), a.len() * a.len());
}

#[test]
fn has_is_false_outside_the_carriers() {
    let a = Finite::new(vec![1u32, 2]);
    let r = Rel::<_, _, PairStore>::from_pairs(&a, &a, &[(1, 2)]).unwrap();
    assert!(r.has(&1, &2));
    assert!(!r.has(&2, &1));
    assert!(!r.has(&9, &2));
}
