//! Integration tests for the copy-on-write binary heap.

use rstest::rstest;

use arbor::domain::{ByKey, Heap, HeapConfig, Natural, Reversed};

#[test]
fn given_inserts_when_deleting_min_repeatedly_then_ascending() {
    // Arrange
    let heap = Heap::new().insert(5).insert(3).insert(8).insert(1);

    // Act
    let (a, heap) = heap.delete_min();
    let (b, heap) = heap.delete_min();
    let (c, heap) = heap.delete_min();
    let (d, heap) = heap.delete_min();

    // Assert
    assert_eq!([a, b, c, d], [Some(1), Some(3), Some(5), Some(8)]);
    assert!(heap.is_empty());
}

#[rstest]
#[case(vec![], 0)]
#[case(vec![1], 1)]
#[case(vec![4, 4, 4], 2)]
#[case(vec![9, -3, 7, 0, 2, 2, 11, -8], 5)]
#[case((0..100).rev().collect(), 100)]
fn given_n_inserts_and_m_deletes_when_measuring_then_size_is_difference(
    #[case] values: Vec<i64>,
    #[case] deletes: usize,
) {
    // Arrange
    let n = values.len();
    let mut heap: Heap<i64> = values.into_iter().collect();

    // Act
    let mut popped = Vec::new();
    for _ in 0..deletes {
        popped.extend(heap.pop());
    }

    // Assert
    assert_eq!(heap.len(), n - deletes);
    assert!(popped.windows(2).all(|w| w[0] <= w[1]));
    heap.validate().unwrap();
}

#[test]
fn given_shared_heap_when_popping_clone_then_original_keeps_its_elements() {
    // Arrange
    let original: Heap<i32> = [3, 1, 2].into_iter().collect();
    let mut copy = original.clone();

    // Act
    assert_eq!(copy.pop(), Some(1));
    copy.push(0);

    // Assert
    assert_eq!(original.len(), 3);
    assert_eq!(original.peek(), Some(&1));
    assert_eq!(original.clone().into_sorted_vec(), vec![1, 2, 3]);
    assert_eq!(copy.into_sorted_vec(), vec![0, 2, 3]);
}

#[test]
fn given_empty_heap_when_peeking_and_deleting_then_nothing_and_unchanged() {
    let heap: Heap<i32> = Heap::new();
    assert_eq!(heap.peek(), None);
    let (min, heap) = heap.delete_min();
    assert_eq!(min, None);
    assert_eq!(heap.len(), 0);
}

#[rstest]
#[case(1, 4, &[1, 2, 4, 6, 9, 13])]
#[case(4, 1024, &[4, 8, 16])]
#[case(1, 1, &[1, 2, 3, 4])]
fn given_growth_policy_when_overflowing_then_capacity_follows_it(
    #[case] initial_capacity: usize,
    #[case] growth_threshold: usize,
    #[case] expected: &[usize],
) {
    // Arrange
    let config = HeapConfig {
        initial_capacity,
        growth_threshold,
    };
    let mut heap = Heap::with_config(Natural, config);
    let mut seen = Vec::new();

    // Act
    for value in 0..expected[expected.len() - 1] {
        heap.push(value);
        if seen.last() != Some(&heap.capacity()) {
            seen.push(heap.capacity());
        }
    }

    // Assert
    assert_eq!(seen, expected);
}

#[test]
fn given_injected_orders_when_draining_then_order_decides() {
    let values = ["ccc", "a", "bb", "dddd"];

    let by_len = Heap::from_values(values, ByKey::new(|s: &&str| s.len()));
    assert_eq!(by_len.into_sorted_vec(), vec!["a", "bb", "ccc", "dddd"]);

    let reversed = Heap::from_values(values, Reversed(Natural));
    assert_eq!(reversed.into_sorted_vec(), vec!["dddd", "ccc", "bb", "a"]);
}
