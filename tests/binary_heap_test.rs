use naive_many_to_many::utils::binary_heap::{HeapElement, MinBinaryHeap};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Ord, PartialOrd)]
pub struct MinElement {
    pub value: usize,
    pub unique_id: usize
}

impl HeapElement for MinElement {

    fn unique_index(&self) -> usize {
        self.unique_id
    }
}

#[test]
fn insert_pop_test() {
    let mut min_heap = MinBinaryHeap::new(10);

    min_heap.insert(MinElement {value: 10, unique_id: 0});
    min_heap.insert(MinElement {value: 8, unique_id: 1});
    min_heap.insert(MinElement {value: 12, unique_id: 2});
    min_heap.insert(MinElement {value: 7, unique_id: 3});

    assert_eq!(min_heap.len(), 4);
    assert_eq!(min_heap.get_min(), Some(&MinElement {value: 7, unique_id: 3}));

    assert_eq!(min_heap.pop(), Some(MinElement {value: 7, unique_id: 3}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 8, unique_id: 1}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 10, unique_id: 0}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 12, unique_id: 2}));
    assert_eq!(min_heap.pop(), None);
    assert!(min_heap.is_empty());
}

#[test]
fn decrease_test() {
    let mut min_heap = MinBinaryHeap::new(10);
    min_heap.insert(MinElement {value: 10, unique_id: 0});
    min_heap.insert(MinElement {value: 8, unique_id: 1});
    min_heap.insert(MinElement {value: 12, unique_id: 2});
    min_heap.insert(MinElement {value: 7, unique_id: 3});

    min_heap.decrease(MinElement {value: 4, unique_id: 2});

    assert_eq!(min_heap.len(), 4);
    assert_eq!(min_heap.pop(), Some(MinElement {value: 4, unique_id: 2}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 7, unique_id: 3}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 8, unique_id: 1}));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 10, unique_id: 0}));
}

#[test]
fn insert_or_decrease_test() {
    let mut min_heap = MinBinaryHeap::new(5);

    min_heap.insert_or_decrease(MinElement {value: 9, unique_id: 4});
    min_heap.insert_or_decrease(MinElement {value: 5, unique_id: 1});
    min_heap.insert_or_decrease(MinElement {value: 3, unique_id: 4});

    assert_eq!(min_heap.len(), 2);
    assert!(min_heap.contains_unique_index(4));
    assert!(!min_heap.contains_unique_index(0));

    assert_eq!(min_heap.pop(), Some(MinElement {value: 3, unique_id: 4}));
    assert!(!min_heap.contains_unique_index(4));
    assert_eq!(min_heap.pop(), Some(MinElement {value: 5, unique_id: 1}));
}

#[test]
fn clear_test() {
    let mut min_heap = MinBinaryHeap::new(4);
    for unique_id in 0..4 {
        min_heap.insert(MinElement {value: 10 - unique_id, unique_id});
    }

    min_heap.clear();
    assert!(min_heap.is_empty());

    // all unique indices are free again
    for unique_id in 0..4 {
        assert!(!min_heap.contains_unique_index(unique_id));
    }

    min_heap.insert(MinElement {value: 1, unique_id: 2});
    assert_eq!(min_heap.pop(), Some(MinElement {value: 1, unique_id: 2}));
}
