use proptest::prelude::*;
use slvm_core::BitSet;

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn count_matches_bits(bits in proptest::collection::vec(any::<bool>(), 0..200)) {
        let set: BitSet = bits.iter().copied().collect();
        prop_assert_eq!(set.len(), bits.len());
        prop_assert_eq!(set.count_ones(), bits.iter().filter(|b| **b).count());
        let ones: Vec<usize> = set.iter_ones().collect();
        let expected: Vec<usize> = bits.iter().enumerate().filter(|(_, b)| **b).map(|(i, _)| i).collect();
        prop_assert_eq!(ones, expected);
    }

    #[test]
    fn double_invert_is_identity(bits in proptest::collection::vec(any::<bool>(), 1..150)) {
        let set: BitSet = bits.iter().copied().collect();
        let mut inv = set.clone();
        inv.invert();
        prop_assert_eq!(inv.count_ones(), bits.len() - set.count_ones());
        inv.invert();
        prop_assert_eq!(inv, set);
    }

    #[test]
    fn subtract_then_union_restores(a in proptest::collection::vec(any::<bool>(), 70), b in proptest::collection::vec(any::<bool>(), 70)) {
        let a: BitSet = a.into_iter().collect();
        let b: BitSet = b.into_iter().collect();
        let mut both = a.clone();
        both.intersect_with(&b);
        let mut only_a = a.clone();
        only_a.subtract_with(&b);
        only_a.union_with(&both);
        prop_assert_eq!(only_a, a);
    }
}
