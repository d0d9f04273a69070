//! Compact page-number strip for pagination controls.
//!
//! At most [`MAX_VISIBLE_PAGES`] numeric entries are produced; skipped ranges
//! collapse into [`PageEntry::Ellipsis`].

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;

pub const MAX_VISIBLE_PAGES: usize = 5;

const ELLIPSIS: &str = "...";

/// One slot in the page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageEntry {
    Page(usize),
    Ellipsis,
}

impl PageEntry {
    pub fn page(&self) -> Option<usize> {
        match self {
            PageEntry::Page(n) => Some(*n),
            PageEntry::Ellipsis => None,
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageEntry::Ellipsis)
    }

    /// True for the numeric entry that should be highlighted.
    pub fn is_current(&self, current_page: usize) -> bool {
        self.page() == Some(current_page)
    }
}

impl fmt::Display for PageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageEntry::Page(n) => write!(f, "{}", n),
            PageEntry::Ellipsis => f.write_str(ELLIPSIS),
        }
    }
}

// Pages serialize as bare numbers and the marker as "...".
impl Serialize for PageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageEntry::Page(n) => serializer.serialize_u64(*n as u64),
            PageEntry::Ellipsis => serializer.serialize_str(ELLIPSIS),
        }
    }
}

impl<'de> Deserialize<'de> for PageEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = PageEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a page number or \"{}\"", ELLIPSIS)
            }

            fn visit_u64<E: de::Error>(self, n: u64) -> Result<PageEntry, E> {
                Ok(PageEntry::Page(n as usize))
            }

            fn visit_i64<E: de::Error>(self, n: i64) -> Result<PageEntry, E> {
                usize::try_from(n)
                    .map(PageEntry::Page)
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(n), &self))
            }

            fn visit_str<E: de::Error>(self, s: &str) -> Result<PageEntry, E> {
                if s == ELLIPSIS {
                    Ok(PageEntry::Ellipsis)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(s), &self))
                }
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

/// Builds the window for `current_page` out of `total_pages`.
///
/// Returns an empty window when there is at most one page. `current_page` is
/// clamped into `1..=total_pages` first. Branches are checked in order:
/// everything fits, near the start (`current <= 3`), near the end
/// (`current >= total - 2`), middle.
pub fn generate_window(current_page: usize, total_pages: usize) -> Vec<PageEntry> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total_pages);

    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(PageEntry::Page).collect();
    }

    let mut window = Vec::with_capacity(MAX_VISIBLE_PAGES + 2);

    if current <= 3 {
        window.extend((1..=4).map(PageEntry::Page));
        window.push(PageEntry::Ellipsis);
        window.push(PageEntry::Page(total_pages));
    } else if current >= total_pages - 2 {
        window.push(PageEntry::Page(1));
        window.push(PageEntry::Ellipsis);
        window.extend((total_pages - 3..=total_pages).map(PageEntry::Page));
    } else {
        window.push(PageEntry::Page(1));
        window.push(PageEntry::Ellipsis);
        window.extend((current - 1..=current + 1).map(PageEntry::Page));
        window.push(PageEntry::Ellipsis);
        window.push(PageEntry::Page(total_pages));
    }

    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_numbers_and_marker() {
        let json = serde_json::to_string(&generate_window(1, 10)).unwrap();
        assert_eq!(json, r#"[1,2,3,4,"...",10]"#);
    }

    #[test]
    fn test_parses_back() {
        let entries: Vec<PageEntry> = serde_json::from_str(r#"[1,"...",7]"#).unwrap();
        assert_eq!(entries, vec![PageEntry::Page(1), PageEntry::Ellipsis, PageEntry::Page(7)]);
        assert!(serde_json::from_str::<PageEntry>(r#""..""#).is_err());
    }

    #[test]
    fn test_is_current() {
        assert!(PageEntry::Page(3).is_current(3));
        assert!(!PageEntry::Page(2).is_current(3));
        assert!(!PageEntry::Ellipsis.is_current(3));
    }
}
