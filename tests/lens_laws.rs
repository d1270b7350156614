//! Property-based tests for the optic laws.
//!
//! Lenses are checked against GetPut/PutGet/PutPut, isos against the two
//! round-trip laws. The library documents the laws without enforcing them;
//! these properties pin down that the optics shipped here do obey them.

use imago::lens;
use imago::optics::{at, find, FunctionIso, Iso, Lens};
use proptest::prelude::*;

#[derive(Clone, PartialEq, Debug)]
struct Point {
    x: i32,
    y: i32,
}

proptest! {
    /// GetPut: setting back what was read is a no-op.
    #[test]
    fn prop_field_lens_get_put(x: i32, y: i32) {
        let point = Point { x, y };
        let x_lens = lens!(Point, x);
        let current = x_lens.get(&point);
        prop_assert_eq!(x_lens.set(point.clone(), current), point);
    }

    /// PutGet: reading after a set yields the set value.
    #[test]
    fn prop_field_lens_put_get(x: i32, y: i32, value: i32) {
        let x_lens = lens!(Point, x);
        let updated = x_lens.set(Point { x, y }, value);
        prop_assert_eq!(x_lens.get(&updated), value);
    }

    /// PutPut: of two consecutive sets, the last wins.
    #[test]
    fn prop_field_lens_put_put(x: i32, y: i32, first: i32, second: i32) {
        let x_lens = lens!(Point, x);
        let twice = x_lens.set(x_lens.set(Point { x, y }, first), second);
        let once = x_lens.set(Point { x, y }, second);
        prop_assert_eq!(twice, once);
    }

    /// Composed lenses preserve the laws of their parts.
    #[test]
    fn prop_composed_lens_put_get(x: i32, y: i32, value: i32) {
        #[derive(Clone, PartialEq, Debug)]
        struct Wrapper { point: Point }

        let composed = lens!(Wrapper, point).compose(lens!(Point, y));
        let updated = composed.set(Wrapper { point: Point { x, y } }, value);
        prop_assert_eq!(composed.get(&updated), value);
    }

    /// GetPut for the positional vector lens, over in-bounds indices.
    #[test]
    fn prop_vec_at_get_put(
        vector in proptest::collection::vec(any::<i32>(), 1..8),
        index_seed: usize,
    ) {
        let index = index_seed % vector.len();
        let lens = at::<i32>(index);
        let current = lens.get(&vector);
        prop_assert_eq!(lens.set(vector.clone(), current), vector);
    }

    /// PutGet for the positional vector lens.
    #[test]
    fn prop_vec_at_put_get(
        vector in proptest::collection::vec(any::<i32>(), 1..8),
        index_seed: usize,
        value: i32,
    ) {
        let index = index_seed % vector.len();
        let lens = at::<i32>(index);
        let updated = lens.set(vector, value);
        prop_assert_eq!(lens.get(&updated), value);
    }

    /// The positional setter touches nothing but its own index.
    #[test]
    fn prop_vec_at_set_preserves_other_elements(
        vector in proptest::collection::vec(any::<i32>(), 1..8),
        index_seed: usize,
        value: i32,
    ) {
        let index = index_seed % vector.len();
        let updated = at(index).set(vector.clone(), value);
        prop_assert_eq!(updated.len(), vector.len());
        for (position, element) in updated.iter().enumerate() {
            if position != index {
                prop_assert_eq!(element, &vector[position]);
            }
        }
    }

    /// PutGet for the predicate lens: after a set, the first match is the
    /// written value.
    #[test]
    fn prop_vec_find_put_get(
        mut vector in proptest::collection::vec(0_i32..100, 1..8),
        value in 100_i32..200,
    ) {
        // Guarantee at least one match for the precondition.
        vector[0] = 50;
        let lens = find(|element: &i32| *element >= 50);
        let updated = lens.set(vector, value);
        prop_assert_eq!(lens.get(&updated), value);
    }

    /// Iso round-trip: reverse_get(get(s)) == s.
    #[test]
    fn prop_iso_get_reverse_get(value: i64) {
        let shifted = FunctionIso::new(
            |number: i64| number.wrapping_add(1000),
            |number: i64| number.wrapping_sub(1000),
        );
        prop_assert_eq!(shifted.reverse_get(shifted.get(value)), value);
    }

    /// Iso round-trip: get(reverse_get(a)) == a.
    #[test]
    fn prop_iso_reverse_get_get(value: i64) {
        let shifted = FunctionIso::new(
            |number: i64| number.wrapping_add(1000),
            |number: i64| number.wrapping_sub(1000),
        );
        prop_assert_eq!(shifted.get(shifted.reverse_get(value)), value);
    }

    /// A reversed iso still satisfies the round-trip laws.
    #[test]
    fn prop_reversed_iso_round_trip(value: i64) {
        let shifted = FunctionIso::new(
            |number: i64| number.wrapping_add(1000),
            |number: i64| number.wrapping_sub(1000),
        );
        let reversed = shifted.reverse();
        prop_assert_eq!(reversed.reverse_get(reversed.get(value)), value);
    }
}
