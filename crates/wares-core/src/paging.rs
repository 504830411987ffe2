//! Paginated list queries and their validated form.
//!
//! `ListQuery::parse` is the single entry point turning raw (string) sort and
//! filter inputs into typed values. Anything outside the allow-lists is
//! rejected here, before any SQL text exists.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::Item;
use crate::enums::{ItemColumn, SortOrder, UnknownIdentifier};

/// A validated list query: page and size are positive, sort and filter
/// identifiers come from the column allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort_by: ItemColumn,
    pub sort_order: SortOrder,
    /// Equality filter: column plus the value to bind. No range or partial
    /// matching.
    pub filter: Option<(ItemColumn, String)>,
}

impl ListQuery {
    /// Validate raw list inputs.
    ///
    /// `sort_by`/`sort_order` default to `id ASC` when absent, matching the
    /// serving defaults. A filter key without a value (or vice versa) is
    /// rejected rather than silently ignored.
    ///
    /// # Errors
    ///
    /// Returns `ListQueryError` if the page or page size is zero, an
    /// identifier is outside the allow-list, or the filter is half-specified.
    pub fn parse(
        page: u32,
        page_size: u32,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
        filter_key: Option<&str>,
        filter_value: Option<&str>,
    ) -> Result<Self, ListQueryError> {
        if page < 1 {
            return Err(ListQueryError::InvalidPage(page));
        }
        if page_size < 1 {
            return Err(ListQueryError::InvalidPageSize(page_size));
        }

        let sort_by = match sort_by {
            Some(s) => s.parse()?,
            None => ItemColumn::Id,
        };
        let sort_order = match sort_order {
            Some(s) => s.parse()?,
            None => SortOrder::Asc,
        };

        let filter = match (filter_key, filter_value) {
            (Some(key), Some(value)) => Some((key.parse()?, value.to_string())),
            (None, None) => None,
            _ => return Err(ListQueryError::IncompleteFilter),
        };

        Ok(Self {
            page,
            page_size,
            sort_by,
            sort_order,
            filter,
        })
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

/// Rejected list input. All variants are validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListQueryError {
    #[error("page must be >= 1, got {0}")]
    InvalidPage(u32),

    #[error("page size must be >= 1, got {0}")]
    InvalidPageSize(u32),

    #[error(transparent)]
    UnknownIdentifier(#[from] UnknownIdentifier),

    #[error("filter key and filter value must be supplied together")]
    IncompleteFilter,
}

/// One page of items plus the counts needed for pagination controls.
///
/// `total_items` counts every row matching the filter, ignoring pagination;
/// `total_pages` is `ceil(total_items / page_size)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
}

impl ItemPage {
    /// Assemble a page from a row slice and the unpaginated match count.
    #[must_use]
    pub fn new(items: Vec<Item>, query: &ListQuery, total_items: u64) -> Self {
        Self {
            items,
            current_page: query.page,
            total_pages: total_items.div_ceil(u64::from(query.page_size)),
            total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_defaults_to_id_asc() {
        let query = ListQuery::parse(1, 10, None, None, None, None).unwrap();
        assert_eq!(query.sort_by, ItemColumn::Id);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert_eq!(query.filter, None);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn parse_rejects_zero_page() {
        assert_eq!(
            ListQuery::parse(0, 10, None, None, None, None),
            Err(ListQueryError::InvalidPage(0))
        );
        assert_eq!(
            ListQuery::parse(1, 0, None, None, None, None),
            Err(ListQueryError::InvalidPageSize(0))
        );
    }

    #[test]
    fn parse_rejects_unknown_sort_column() {
        let result = ListQuery::parse(1, 10, Some("rowid"), None, None, None);
        assert!(matches!(
            result,
            Err(ListQueryError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn parse_rejects_unknown_filter_key() {
        let result = ListQuery::parse(1, 10, None, None, Some("owner"), Some("ada"));
        assert!(matches!(
            result,
            Err(ListQueryError::UnknownIdentifier(_))
        ));
    }

    #[test]
    fn parse_rejects_half_specified_filter() {
        let result = ListQuery::parse(1, 10, None, None, Some("name"), None);
        assert_eq!(result, Err(ListQueryError::IncompleteFilter));
    }

    #[test]
    fn offset_advances_with_page() {
        let query = ListQuery::parse(3, 25, None, None, None, None).unwrap();
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn page_math_rounds_up() {
        let query = ListQuery::parse(2, 5, None, None, None, None).unwrap();
        let page = ItemPage::new(Vec::new(), &query, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.current_page, 2);
    }

    #[test]
    fn page_serializes_camel_case() {
        let query = ListQuery::parse(1, 10, None, None, None, None).unwrap();
        let page = ItemPage::new(Vec::new(), &query, 0);
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["currentPage"], 1);
        assert_eq!(value["totalPages"], 0);
        assert_eq!(value["totalItems"], 0);
    }
}
