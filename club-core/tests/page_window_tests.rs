use club_core::view::{generate_window, PageEntry, MAX_VISIBLE_PAGES};
use pretty_assertions::assert_eq;
use rstest::rstest;

const E: PageEntry = PageEntry::Ellipsis;

fn p(n: usize) -> PageEntry {
    PageEntry::Page(n)
}

fn pages(ns: &[usize]) -> Vec<PageEntry> {
    ns.iter().copied().map(p).collect()
}

#[rstest]
#[case(0, 0)]
#[case(1, 0)]
#[case(1, 1)]
fn test_single_page_has_no_window(#[case] current: usize, #[case] total: usize) {
    assert!(generate_window(current, total).is_empty());
}

#[rstest]
#[case(2, 3, &[1, 2, 3])]
#[case(1, 2, &[1, 2])]
#[case(5, 5, &[1, 2, 3, 4, 5])]
#[case(1, 5, &[1, 2, 3, 4, 5])]
fn test_small_totals_list_every_page(#[case] current: usize, #[case] total: usize, #[case] expected: &[usize]) {
    assert_eq!(generate_window(current, total), pages(expected));
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn test_near_start(#[case] current: usize) {
    assert_eq!(
        generate_window(current, 10),
        vec![p(1), p(2), p(3), p(4), E, p(10)]
    );
}

#[rstest]
#[case(8)]
#[case(9)]
#[case(10)]
fn test_near_end(#[case] current: usize) {
    assert_eq!(
        generate_window(current, 10),
        vec![p(1), E, p(7), p(8), p(9), p(10)]
    );
}

#[rstest]
#[case(4, vec![p(1), E, p(3), p(4), p(5), E, p(10)])]
#[case(5, vec![p(1), E, p(4), p(5), p(6), E, p(10)])]
#[case(7, vec![p(1), E, p(6), p(7), p(8), E, p(10)])]
fn test_middle(#[case] current: usize, #[case] expected: Vec<PageEntry>) {
    assert_eq!(generate_window(current, 10), expected);
}

#[test]
fn test_six_pages_boundaries() {
    // With six pages, page 3 is still "start" and page 4 is already "end".
    assert_eq!(generate_window(3, 6), vec![p(1), p(2), p(3), p(4), E, p(6)]);
    assert_eq!(generate_window(4, 6), vec![p(1), E, p(3), p(4), p(5), p(6)]);
}

#[test]
fn test_seven_pages_has_single_middle_page() {
    assert_eq!(
        generate_window(4, 7),
        vec![p(1), E, p(3), p(4), p(5), E, p(7)]
    );
    assert_eq!(generate_window(5, 7), vec![p(1), E, p(4), p(5), p(6), p(7)]);
}

#[rstest]
#[case(0, vec![p(1), p(2), p(3), p(4), E, p(10)])]
#[case(42, vec![p(1), E, p(7), p(8), p(9), p(10)])]
fn test_out_of_range_current_is_clamped(#[case] current: usize, #[case] expected: Vec<PageEntry>) {
    assert_eq!(generate_window(current, 10), expected);
}

#[test]
fn test_never_more_than_five_numbers() {
    for total in 0..40 {
        for current in 0..=total + 1 {
            let numbers = generate_window(current, total)
                .iter()
                .filter(|e| !e.is_ellipsis())
                .count();
            assert!(numbers <= MAX_VISIBLE_PAGES, "current={current} total={total}");
        }
    }
}

#[test]
fn test_current_page_always_visible() {
    for total in 2..40 {
        for current in 1..=total {
            let window = generate_window(current, total);
            assert!(
                window.iter().any(|e| e.is_current(current)),
                "current={current} total={total}"
            );
        }
    }
}
