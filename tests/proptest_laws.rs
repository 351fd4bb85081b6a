//! Property tests for the allegory and adjunction laws, all of which must
//! report `LawCheck::Ok` on arbitrary finite inputs.


use generators::{arb_composable_triple, arb_rel_shape, carrier, rel_from_indices, subset_from_mask};
use proptest::prelude::*;
use relalg::laws::{
    compose_assoc_witness, converse_involution_witness, equality_witness,
    exists_preimage_adjunction_witness, inclusion_witness, left_residual_adjunction_witness,
    modular_law_witness, preimage_forall_adjunction_witness, right_residual_adjunction_witness,
    wp_composition_witness, wp_sp_adjunction_witness,
};
use relalg::{BitStore, FinFun, PairStore, Rel};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// `(r;s);t = r;(s;t)` in both storage forms
    #[test]
    fn composition_is_associative((r, s, t) in arb_composable_triple(1..8)) {
        let a = carrier(r.rows);
        let b = carrier(r.cols);
        let c = carrier(s.cols);
        let d = carrier(t.cols);

        let rp = rel_from_indices::<PairStore>(&a, &b, &r.pairs);
        let sp = rel_from_indices::<PairStore>(&b, &c, &s.pairs);
        let tp = rel_from_indices::<PairStore>(&c, &d, &t.pairs);
        prop_assert!(compose_assoc_witness(&rp, &sp, &tp).unwrap().is_ok());

        let rb = rel_from_indices::<BitStore>(&a, &b, &r.pairs);
        let sb = rel_from_indices::<BitStore>(&b, &c, &s.pairs);
        let tb = rel_from_indices::<BitStore>(&c, &d, &t.pairs);
        prop_assert!(compose_assoc_witness(&rb, &sb, &tb).unwrap().is_ok());
    }

    /// `(r†)† = r`
    #[test]
    fn converse_is_involutive(shape in arb_rel_shape(1..70)) {
        let a = carrier(shape.rows);
        let b = carrier(shape.cols);
        let r = rel_from_indices::<BitStore>(&a, &b, &shape.pairs);
        prop_assert!(converse_involution_witness(&r).unwrap().is_ok());
    }

    /// `r ∧ r = r` and `r ∨ r = r`
    #[test]
    fn meet_join_idempotent(shape in arb_rel_shape(1..20)) {
        let a = carrier(shape.rows);
        let b = carrier(shape.cols);
        let r = rel_from_indices::<PairStore>(&a, &b, &shape.pairs);
        prop_assert!(equality_witness(&r.meet(&r).unwrap(), &r).unwrap().is_ok());
        prop_assert!(equality_witness(&r.join(&r).unwrap(), &r).unwrap().is_ok());
    }

    /// Meet and join are commutative
    #[test]
    fn meet_join_commutative(
        shape in arb_rel_shape(1..20),
        extra in proptest::collection::vec(any::<(prop::sample::Index, prop::sample::Index)>(), 0..20),
    ) {
        let a = carrier(shape.rows);
        let b = carrier(shape.cols);
        let other: Vec<(usize, usize)> = extra
            .iter()
            .map(|(i, j)| (i.index(shape.rows), j.index(shape.cols)))
            .collect();
        let r = rel_from_indices::<PairStore>(&a, &b, &shape.pairs);
        let s = rel_from_indices::<PairStore>(&a, &b, &other);
        prop_assert!(equality_witness(&r.meet(&s).unwrap(), &s.meet(&r).unwrap()).unwrap().is_ok());
        prop_assert!(equality_witness(&r.join(&s).unwrap(), &s.join(&r).unwrap()).unwrap().is_ok());
    }

    /// A relation is always included in its join with anything, and the
    /// inclusion witness on the reverse direction is minimal and sorted
    #[test]
    fn inclusion_witness_is_minimal(
        shape in arb_rel_shape(1..12),
        extra in proptest::collection::vec(any::<(prop::sample::Index, prop::sample::Index)>(), 0..20),
    ) {
        let a = carrier(shape.rows);
        let b = carrier(shape.cols);
        let other: Vec<(usize, usize)> = extra
            .iter()
            .map(|(i, j)| (i.index(shape.rows), j.index(shape.cols)))
            .collect();
        let r = rel_from_indices::<PairStore>(&a, &b, &shape.pairs);
        let s = rel_from_indices::<PairStore>(&a, &b, &other);
        let joined = r.join(&s).unwrap();

        prop_assert!(inclusion_witness(&joined, &r).unwrap().is_ok());

        match inclusion_witness(&r, &joined).unwrap() {
            relalg::LawCheck::Ok => prop_assert!(joined.is_subset_of(&r).unwrap()),
            relalg::LawCheck::Fail(w) => {
                // exactly the pairs of the join absent from r, in order
                let expected: Vec<(u32, u32)> = joined
                    .to_pairs()
                    .into_iter()
                    .filter(|(x, y)| !r.has(x, y))
                    .collect();
                prop_assert_eq!(w.missing, expected);
            }
        }
    }

    /// `p ⊆ wp(r, q) ⟺ sp(p, r) ⊆ q`
    #[test]
    fn wp_sp_adjunction(n in 1usize..8, pairs_seed in any::<u64>(), p_mask in any::<u64>(), q_mask in any::<u64>()) {
        let a = carrier(n);
        let pairs: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| (0..n).map(move |j| (i, j)))
            .filter(|(i, j)| (pairs_seed >> ((i * n + j) % 64)) & 1 == 1)
            .collect();
        let r = rel_from_indices::<PairStore>(&a, &a, &pairs);
        let p = subset_from_mask(&a, p_mask);
        let q = subset_from_mask(&a, q_mask);
        prop_assert!(wp_sp_adjunction_witness(&p, &r, &q).unwrap().is_ok());
    }

    /// `wp(r1;r2, q) = wp(r1, wp(r2, q))`
    #[test]
    fn wp_composes(n in 1usize..8, s1 in any::<u64>(), s2 in any::<u64>(), q_mask in any::<u64>()) {
        let a = carrier(n);
        let dense = |seed: u64| -> Vec<(usize, usize)> {
            (0..n)
                .flat_map(|i| (0..n).map(move |j| (i, j)))
                .filter(|(i, j)| (seed >> ((i * n + j) % 64)) & 1 == 1)
                .collect()
        };
        let r1 = rel_from_indices::<PairStore>(&a, &a, &dense(s1));
        let r2 = rel_from_indices::<PairStore>(&a, &a, &dense(s2));
        let q = subset_from_mask(&a, q_mask);
        prop_assert!(wp_composition_witness(&r1, &r2, &q).unwrap().is_ok());
    }

    /// Both residual adjunctions hold for arbitrary r, s, t
    #[test]
    fn residual_adjunctions((r, s, _) in arb_composable_triple(1..7), t_extra in proptest::collection::vec(any::<(prop::sample::Index, prop::sample::Index)>(), 0..20)) {
        let a = carrier(r.rows);
        let b = carrier(r.cols);
        let c = carrier(s.cols);
        let t_pairs: Vec<(usize, usize)> = t_extra
            .iter()
            .map(|(i, j)| (i.index(r.rows), j.index(s.cols)))
            .collect();

        let rp = rel_from_indices::<PairStore>(&a, &b, &r.pairs);
        let sp = rel_from_indices::<PairStore>(&b, &c, &s.pairs);
        let tp = rel_from_indices::<PairStore>(&a, &c, &t_pairs);

        prop_assert!(left_residual_adjunction_witness(&rp, &sp, &tp).unwrap().is_ok());
        prop_assert!(right_residual_adjunction_witness(&rp, &sp, &tp).unwrap().is_ok());
    }

    /// The modular law `r;s ∧ t ⊆ (r ∧ t;s†);s` holds for arbitrary inputs
    #[test]
    fn modular_law((r, s, _) in arb_composable_triple(1..7), t_extra in proptest::collection::vec(any::<(prop::sample::Index, prop::sample::Index)>(), 0..20)) {
        let a = carrier(r.rows);
        let b = carrier(r.cols);
        let c = carrier(s.cols);
        let t_pairs: Vec<(usize, usize)> = t_extra
            .iter()
            .map(|(i, j)| (i.index(r.rows), j.index(s.cols)))
            .collect();

        let rp = rel_from_indices::<BitStore>(&a, &b, &r.pairs);
        let sp = rel_from_indices::<BitStore>(&b, &c, &s.pairs);
        let tp = rel_from_indices::<BitStore>(&a, &c, &t_pairs);
        prop_assert!(modular_law_witness(&rp, &sp, &tp).unwrap().is_ok());
    }

    /// `exists_along ⊣ preimage ⊣ forall_along`
    #[test]
    fn galois_adjunctions(
        n in 1usize..10,
        m in 1usize..6,
        fun_seed in any::<u64>(),
        p_mask in any::<u64>(),
        q_mask in any::<u64>(),
    ) {
        let a = carrier(n);
        let b = carrier(m);
        let f = FinFun::new(&a, &b, |x| {
            let shift = (*x as u64 % 8) * 8;
            (((fun_seed >> shift) as usize) % m) as u32
        })
        .unwrap();
        let p = subset_from_mask(&a, p_mask);
        let q = subset_from_mask(&b, q_mask);

        prop_assert!(exists_preimage_adjunction_witness(&f, &p, &q).unwrap().is_ok());
        prop_assert!(preimage_forall_adjunction_witness(&f, &q, &p).unwrap().is_ok());
    }

    /// The function graph composes like the function: graph(f);graph(g)
    /// has exactly one successor per source element
    #[test]
    fn function_graphs_are_total_and_univalent(n in 1usize..10, m in 1usize..6, fun_seed in any::<u64>()) {
        let a = carrier(n);
        let b = carrier(m);
        let f = FinFun::new(&a, &b, |x| {
            let shift = (*x as u64 % 8) * 8;
            (((fun_seed >> shift) as usize) % m) as u32
        })
        .unwrap();
        let g = f.graph::<PairStore>();
        prop_assert_eq!(g.len(), n);
        // univalent: g†;g ⊆ id
        let id = Rel::<_, _, PairStore>::identity(&b);
        prop_assert!(g.converse().compose(&g).unwrap().is_subset_of(&id).unwrap());
    }
}
