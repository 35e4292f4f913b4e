use linked_bst::error::BstError;
use linked_bst::linked::LinkedBst;

fn owned(items: Vec<&i32>) -> Vec<i32> {
    items.into_iter().copied().collect()
}

#[test]
fn search_in_mixed_insertion_order() {
    let tree: LinkedBst<i32> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();

    assert_eq!(tree.find(&4), Some(&4));
    assert_eq!(tree.find(&6), None);
    assert_eq!(owned(tree.inorder()), vec![1, 3, 4, 5, 7, 8, 9]);
}

#[test]
fn ascending_insertion_degenerates_until_rebalanced() {
    let mut tree: LinkedBst<i32> = [1, 2, 3, 4, 5].into_iter().collect();
    assert_eq!(tree.height(), 4);

    tree.rebalance();
    assert_eq!(tree.height(), 2);
    assert_eq!(owned(tree.inorder()), vec![1, 2, 3, 4, 5]);
}

#[test]
fn neighbours() {
    let tree: LinkedBst<i32> = [1, 3, 5, 7, 9].into_iter().collect();

    assert_eq!(tree.successor(&5), Some(&7));
    assert_eq!(tree.predecessor(&5), Some(&3));
    assert_eq!(tree.successor(&9), None);
    assert_eq!(tree.predecessor(&1), None);
}

#[test]
fn removal() {
    let mut empty: LinkedBst<i32> = LinkedBst::new();
    assert_eq!(empty.remove(&5), Err(BstError::NotFound));

    let mut tree: LinkedBst<i32> = [1, 3, 5].into_iter().collect();
    assert_eq!(tree.remove(&5), Ok(5));
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.find(&5), None);
}

#[test]
fn not_found_message() {
    assert_eq!(BstError::NotFound.to_string(), "item not found in tree");
}

#[test]
fn add_then_remove_everything_in_another_order() {
    let items = [50, 20, 80, 10, 30, 70, 90, 20, 60, 40];
    let mut tree: LinkedBst<i32> = items.into_iter().collect();
    assert_eq!(tree.len(), items.len());

    let mut order = items;
    order.sort_unstable_by(|a, b| b.cmp(a));
    for item in order {
        assert_eq!(tree.remove(&item), Ok(item));
    }

    assert!(tree.is_empty());
    assert_eq!(tree.height(), -1);
    assert_eq!(tree.iter().count(), 0);
}

#[test]
fn extend_keeps_adding() {
    let mut tree: LinkedBst<&str> = ["pear", "apple"].into_iter().collect();
    tree.extend(["zucchini", "fig"]);

    assert_eq!(tree.len(), 4);
    assert_eq!(
        tree.inorder(),
        vec![&"apple", &"fig", &"pear", &"zucchini"]
    );
    assert_eq!(tree.range_find(&"b", &"q"), vec![&"fig", &"pear"]);
    assert!(tree.contains(&"fig"));
}

#[test]
fn iterating_by_reference() {
    let tree: LinkedBst<i32> = [2, 1, 3].into_iter().collect();

    let mut seen = Vec::new();
    for item in &tree {
        seen.push(*item);
    }
    assert_eq!(seen, vec![2, 1, 3]);
}
