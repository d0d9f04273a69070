use club_core::view::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

fn numbers(n: usize) -> Vec<usize> {
    (0..n).collect()
}

fn page_of(paginator: &Paginator<usize>) -> Vec<usize> {
    paginator.paged_items().into_iter().copied().collect()
}

// ===== Slicing =====

#[test]
fn test_twenty_five_items_three_pages() {
    let mut paginator = Paginator::new(numbers(25)).with_items_per_page(10);

    assert_eq!(paginator.total_pages(), 3);
    assert_eq!(page_of(&paginator), (0..10).collect::<Vec<_>>());

    paginator.go_to_page(3);
    assert_eq!(page_of(&paginator), vec![20, 21, 22, 23, 24]);
    assert_eq!(paginator.items_on_current_page(), 5);
}

#[test]
fn test_empty_dataset() {
    let paginator: Paginator<usize> = Paginator::new(Vec::new());

    assert_eq!(paginator.total_pages(), 0);
    assert_eq!(paginator.total_items(), 0);
    assert!(paginator.paged_items().is_empty());
    assert_eq!(paginator.first_item_index(), 1);
    assert_eq!(paginator.last_item_index(), 0);
}

#[test]
fn test_display_indices() {
    let mut paginator = Paginator::new(numbers(25)).with_items_per_page(10);
    assert_eq!((paginator.first_item_index(), paginator.last_item_index()), (1, 10));

    paginator.go_to_page(3);
    assert_eq!((paginator.first_item_index(), paginator.last_item_index()), (21, 25));
}

// ===== Navigation =====

#[test]
fn test_next_page_clamps_at_last() {
    let mut paginator = Paginator::new(numbers(25)).with_items_per_page(10);
    for _ in 0..10 {
        paginator.next_page();
    }
    assert_eq!(paginator.current_page(), 3);
    assert!(!paginator.has_next());
}

#[test]
fn test_previous_page_clamps_at_first() {
    let mut paginator = Paginator::new(numbers(25)).with_items_per_page(10);
    paginator.go_to_page(2);
    paginator.previous_page();
    paginator.previous_page();
    assert_eq!(paginator.current_page(), 1);
    assert!(!paginator.has_previous());
}

#[rstest]
#[case(0)]
#[case(4)]
#[case(100)]
fn test_go_to_page_out_of_range_is_noop(#[case] target: usize) {
    let mut paginator = Paginator::new(numbers(25)).with_items_per_page(10);
    paginator.go_to_page(2);
    paginator.go_to_page(target);
    assert_eq!(paginator.current_page(), 2);
}

#[test]
fn test_set_current_page_clamps() {
    let mut paginator = Paginator::new(numbers(25)).with_items_per_page(10);
    paginator.set_current_page(99);
    assert_eq!(paginator.current_page(), 3);
    paginator.set_current_page(0);
    assert_eq!(paginator.current_page(), 1);
}

// ===== Filtering =====

fn starts_with_filter(item: &String, term: &str) -> bool {
    item.starts_with(term)
}

fn names() -> Vec<String> {
    ["ana", "andres", "bruno", "beto", "carla", "camilo", "anibal"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_filter_preserves_order() {
    let paginator = Paginator::new(names())
        .with_filter(starts_with_filter)
        .with_search_term("an");

    let filtered: Vec<&str> = paginator.filtered_items().map(String::as_str).collect();
    assert_eq!(filtered, vec!["ana", "andres", "anibal"]);
}

#[test]
fn test_without_filter_search_term_is_ignored() {
    let paginator = Paginator::new(names()).with_search_term("zzz");
    assert_eq!(paginator.total_items(), 7);
}

#[test]
fn test_narrowing_search_resets_to_first_page() {
    let mut paginator = Paginator::new(names())
        .with_items_per_page(2)
        .with_filter(starts_with_filter);
    paginator.go_to_page(3);
    assert_eq!(paginator.current_page(), 3);

    paginator.set_search_term("b");
    assert_eq!(paginator.current_page(), 1);
    assert_eq!(paginator.total_items(), 2);
}

#[test]
fn test_new_data_resets_to_first_page() {
    let mut paginator = Paginator::new(numbers(30)).with_items_per_page(10);
    paginator.go_to_page(3);

    paginator.set_items(numbers(40));
    assert_eq!(paginator.current_page(), 1);
}

#[test]
fn test_same_count_keeps_page() {
    let mut paginator = Paginator::new(numbers(30)).with_items_per_page(10);
    paginator.go_to_page(2);

    paginator.set_items((100..130).collect());
    assert_eq!(paginator.current_page(), 2);
    assert_eq!(page_of(&paginator)[0], 110);
}

#[test]
fn test_removing_filter_resets_when_count_changes() {
    let mut paginator = Paginator::new(numbers(30))
        .with_items_per_page(5)
        .with_filter(|n: &usize, _: &str| n % 3 == 0);
    paginator.go_to_page(2);

    paginator.set_filter(None);
    assert_eq!(paginator.current_page(), 1);
    assert_eq!(paginator.total_items(), 30);
}

// ===== Properties =====

proptest! {
    #[test]
    fn test_pages_reconstruct_filtered_items(
        len in 1usize..200,
        per_page in 1usize..30,
        modulus in 1usize..5,
    ) {
        let mut paginator = Paginator::new(numbers(len))
            .with_items_per_page(per_page)
            .with_filter(move |n: &usize, _: &str| n % modulus == 0);

        let expected: Vec<usize> = paginator.filtered_items().copied().collect();
        let mut collected = Vec::new();

        for page in 1..=paginator.total_pages() {
            paginator.go_to_page(page);
            let items = page_of(&paginator);
            prop_assert!(items.len() <= per_page);
            collected.extend(items);
        }

        prop_assert_eq!(collected, expected);
    }

    #[test]
    fn test_out_of_range_never_moves(len in 0usize..100, per_page in 1usize..20, target in 0usize..50) {
        let mut paginator = Paginator::new(numbers(len)).with_items_per_page(per_page);
        paginator.go_to_page(target);
        if target == 0 || target > paginator.total_pages() {
            prop_assert_eq!(paginator.current_page(), 1);
        } else {
            prop_assert_eq!(paginator.current_page(), target);
        }
    }
}
