//! String comparison strategies used to order catalog output.
//!
//! The catalog never hard-codes an ordering: `CatalogBuilder` takes a
//! [`Comparator`] so that the same input produces byte-identical `.pot`
//! files regardless of platform.

use std::{cell::RefCell, cmp::Ordering};

use feruca::Collator;
use serde::{Deserialize, Serialize};

/// Comparison function used to sort context names and message texts.
pub type Comparator = fn(&str, &str) -> Ordering;

/// Natural reading order for catalog text, using the Unicode Collation
/// Algorithm with the CLDR root collation.
///
/// Accented letters sort next to their base letter (`"éclair"` before
/// `"zebra"`) and case only breaks ties, lowercase first. Strings that
/// collate equal fall back to byte order.
///
/// ```
/// use std::cmp::Ordering;
/// use glotx::core::catalog::locale_compare;
///
/// assert_eq!(locale_compare("apple", "Banana"), Ordering::Less);
/// assert_eq!(locale_compare("éclair", "zebra"), Ordering::Less);
/// assert_eq!(locale_compare("a", "A"), Ordering::Less);
/// assert_eq!(locale_compare("", "a"), Ordering::Less);
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    // The collator keeps a lookup cache, one per thread
    COLLATOR.with_borrow_mut(|collator| collator.collate(a, b))
}

thread_local! {
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Raw Unicode code point order.
pub fn code_point_compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Sort order selectable from the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Locale,
    CodePoint,
}

impl SortOrder {
    pub fn comparator(self) -> Comparator {
        match self {
            SortOrder::Locale => locale_compare,
            SortOrder::CodePoint => code_point_compare,
        }
    }
}
