//! Integration tests for Order.

use ordvec::compare::{PartialOrder, compare_strings};
use ordvec::{Direction, Order};
use rstest::rstest;

#[rstest]
#[case(Direction::Ascending, vec![33, 34, 34, 34, 35, 36], Some(1))]
#[case(Direction::Descending, vec![36, 35, 34, 34, 34, 33], Some(2))]
fn test_add_and_first_index_of(
    #[case] direction: Direction,
    #[case] expected: Vec<i32>,
    #[case] first_34: Option<usize>,
) {
    let order = Order::new(direction);
    assert_eq!(order.add([33, 36, 34, 34, 34, 35]), 6);

    assert_eq!(order.to_vec(), expected);
    assert_eq!(order.first_index_of(&34), first_34);
    assert_eq!(order.first_index_of(&37), None);
    assert!(!order.contains(&32));
}

#[rstest]
fn test_direction_from_polarity() {
    let direction = Direction::try_from(-1).unwrap();
    let order = Order::new(direction);
    order.add([1, 3, 2]);
    assert_eq!(order.to_vec(), vec![3, 2, 1]);
}

#[rstest]
fn test_float_order_with_partial_comparator() {
    let order = Order::with_comparator(PartialOrder, Direction::Ascending);
    order.add([2.5, -1.0, 0.25]);
    assert_eq!(order.to_vec(), vec![-1.0, 0.25, 2.5]);
    assert_eq!(order.first_index_of(&0.25), Some(1));
}

#[rstest]
fn test_string_order_with_free_function_comparator() {
    let order = Order::with_comparator(compare_strings::<String>, Direction::Descending);
    order.add(["pear".to_string(), "apple".to_string(), "fig".to_string()]);
    assert_eq!(order.to_vec(), vec!["pear", "fig", "apple"]);
}

#[rstest]
fn test_adding_after_merge_keeps_result_sorted() {
    let left: Order<i32> = [1, 4, 7].into_iter().collect();
    let right: Order<i32> = [2, 5, 8].into_iter().collect();
    let merged = left.merge(&right);
    merged.add([6, 0, 9]);
    assert_eq!(merged.to_vec(), vec![0, 1, 2, 4, 5, 6, 7, 8, 9]);
}

#[rstest]
fn test_combine_of_descending_with_duplicates() {
    let left = Order::descending();
    left.add([9, 9, 5, 1]);
    let right = Order::descending();
    right.add([9, 6, 5, 5]);

    let combined = left.combine(&right);
    assert_eq!(combined.to_vec(), vec![9, 6, 5, 1]);
    assert_eq!(combined.direction(), Direction::Descending);
}

#[rstest]
fn test_remove_then_lookup() {
    let order: Order<i32> = [5, 1, 3, 3].into_iter().collect();
    assert_eq!(order.remove(1), Ok(3));
    assert_eq!(order.first_index_of(&3), Some(1));
    assert_eq!(order.to_vec(), vec![1, 3, 5]);
}

#[rstest]
fn test_first_and_last_follow_direction() {
    let order = Order::descending();
    order.add([2, 8, 5]);
    assert_eq!(order.first(), Ok(8));
    assert_eq!(order.last(), Ok(2));
}
