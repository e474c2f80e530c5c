//! Search engine
//!
//! Filters, orders and paginates the dataset for a validated
//! [`SearchRequest`]. Every search works on its own copy of the matching
//! records, so concurrent searches never observe each other.

use std::cmp::Ordering;
use tracing::debug;

use crate::dataset::Dataset;
use crate::types::{OrderBy, OrderField, SearchRequest, SearchResult, UserRecord, MAX_PAGE_SIZE};

/// Executes searches against an immutable dataset
#[derive(Debug, Clone)]
pub struct SearchEngine {
    dataset: Dataset,
    max_page_size: usize,
}

impl SearchEngine {
    /// Create an engine capped at [`MAX_PAGE_SIZE`] records per page
    pub fn new(dataset: Dataset) -> Self {
        Self::with_page_size(dataset, MAX_PAGE_SIZE)
    }

    /// Create an engine with a custom page-size cap (at least 1)
    pub fn with_page_size(dataset: Dataset, max_page_size: usize) -> Self {
        Self {
            dataset,
            max_page_size: max_page_size.max(1),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn max_page_size(&self) -> usize {
        self.max_page_size
    }

    /// Run a search
    pub fn search(&self, request: &SearchRequest) -> SearchResult {
        let mut matched: Vec<UserRecord> = self
            .dataset
            .records()
            .iter()
            .filter(|user| user.matches(&request.query))
            .cloned()
            .collect();

        sort_users(&mut matched, request.order_field, request.order_by);

        let total = matched.len();
        let limit = request.limit.min(self.max_page_size);
        let has_next_page = total > request.offset.saturating_add(limit);

        let users: Vec<UserRecord> = matched
            .into_iter()
            .skip(request.offset)
            .take(limit)
            .collect();

        debug!(
            query = %request.query,
            total,
            returned = users.len(),
            has_next_page,
            "Search executed"
        );

        SearchResult {
            users,
            has_next_page,
            total: Some(total),
        }
    }
}

fn compare_by(field: OrderField, a: &UserRecord, b: &UserRecord) -> Ordering {
    match field {
        OrderField::Id => a.id.cmp(&b.id),
        OrderField::Age => a.age.cmp(&b.age),
        OrderField::Name | OrderField::Unset => a.name.cmp(&b.name),
    }
}

/// Stable sort; equal keys keep their current relative order
fn sort_users(users: &mut [UserRecord], field: OrderField, order: OrderBy) {
    match order {
        OrderBy::AsIs => {}
        OrderBy::Asc => users.sort_by(|a, b| compare_by(field, a, b)),
        OrderBy::Desc => users.sort_by(|a, b| compare_by(field, b, a)),
    }
}
