//! Client-side pagination over an in-memory list.
//!
//! [`Paginator`] owns a dataset, an optional search predicate and the current
//! page. Every derived value (filtered view, page slice, display indices) is
//! computed from that state; navigation never fails, out-of-range requests are
//! clamped or ignored.

use std::fmt;

/// Number of items shown per page when the caller does not choose one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Predicate deciding whether an item matches the current search term.
pub type FilterFn<T> = Box<dyn Fn(&T, &str) -> bool + Send + Sync>;

pub struct Paginator<T> {
    items: Vec<T>,
    items_per_page: usize,
    filter: Option<FilterFn<T>>,
    search_term: String,
    /// Indices into `items` that pass the filter, in original order.
    filtered: Vec<usize>,
    current_page: usize,
}

impl<T> Paginator<T> {
    /// Creates a paginator over `items` with the default page size and no filter.
    pub fn new(items: Vec<T>) -> Self {
        let mut paginator = Self {
            items,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            filter: None,
            search_term: String::new(),
            filtered: Vec::new(),
            current_page: 1,
        };
        paginator.refilter();
        paginator
    }

    /// Sets the page size. Zero is treated as one.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
        self
    }

    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T, &str) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self.refilter();
        self.current_page = 1;
        self
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self.refilter();
        self.current_page = 1;
        self
    }

    /// Replaces the dataset.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refresh();
    }

    /// Replaces (or removes) the filter predicate.
    pub fn set_filter(&mut self, filter: Option<FilterFn<T>>) {
        self.filter = filter;
        self.refresh();
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.refresh();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `ceil(filtered / items_per_page)`, zero for an empty view.
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.items_per_page)
    }

    pub fn total_items(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered_items(&self) -> impl Iterator<Item = &T> + '_ {
        self.filtered.iter().map(move |&i| &self.items[i])
    }

    /// Items on the current page.
    pub fn paged_items(&self) -> Vec<&T> {
        self.page_indices().iter().map(|&i| &self.items[i]).collect()
    }

    /// Consumes the paginator, returning the owned items of the current page.
    pub fn into_paged_items(self) -> Vec<T> {
        let (start, end) = self.page_bounds();
        let mut wanted = self.filtered[start..end].iter().copied().peekable();
        let mut page = Vec::with_capacity(end - start);

        for (index, item) in self.items.into_iter().enumerate() {
            match wanted.peek() {
                Some(&next) if next == index => {
                    page.push(item);
                    wanted.next();
                }
                Some(_) => {}
                None => break,
            }
        }

        page
    }

    pub fn items_on_current_page(&self) -> usize {
        let (start, end) = self.page_bounds();
        end - start
    }

    /// One-based index of the first item on the current page.
    pub fn first_item_index(&self) -> usize {
        (self.current_page - 1) * self.items_per_page + 1
    }

    /// One-based index of the last item on the current page.
    pub fn last_item_index(&self) -> usize {
        (self.current_page * self.items_per_page).min(self.filtered.len())
    }

    pub fn next_page(&mut self) {
        self.current_page = (self.current_page + 1).min(self.total_pages()).max(1);
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1).max(1);
    }

    /// Moves to `page` when it is within `1..=total_pages`; otherwise does nothing.
    pub fn go_to_page(&mut self, page: usize) {
        if page >= 1 && page <= self.total_pages() {
            self.current_page = page;
        }
    }

    /// Direct setter, clamped into the valid range.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages().max(1));
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    fn refresh(&mut self) {
        let before = self.filtered.len();
        self.refilter();
        if self.filtered.len() != before {
            self.current_page = 1;
        }
    }

    fn refilter(&mut self) {
        self.filtered = match &self.filter {
            Some(filter) => self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| filter(item, &self.search_term))
                .map(|(i, _)| i)
                .collect(),
            None => (0..self.items.len()).collect(),
        };
    }

    fn page_bounds(&self) -> (usize, usize) {
        let len = self.filtered.len();
        let start = ((self.current_page - 1) * self.items_per_page).min(len);
        let end = (start + self.items_per_page).min(len);
        (start, end)
    }

    fn page_indices(&self) -> &[usize] {
        let (start, end) = self.page_bounds();
        &self.filtered[start..end]
    }
}

impl<T: fmt::Debug> fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("items", &self.items.len())
            .field("items_per_page", &self.items_per_page)
            .field("has_filter", &self.filter.is_some())
            .field("search_term", &self.search_term)
            .field("total_items", &self.filtered.len())
            .field("current_page", &self.current_page)
            .finish()
    }
}
