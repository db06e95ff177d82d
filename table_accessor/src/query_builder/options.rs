use crate::query_builder::filter::QueryFilter;
use crate::query_builder::ordering::SortOrder;

/// Filter, sort and pagination options for `retrieve`
///
/// `limit` falls back to the accessor's configured default (1000 unless
/// configured otherwise) and `skip` to 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub find: Vec<QueryFilter>,
    pub sort: Vec<(String, SortOrder)>,
    pub limit: Option<i64>,
    pub skip: Option<i64>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter condition (combined with AND)
    pub fn filter(mut self, filter: QueryFilter) -> Self {
        self.find.push(filter);
        self
    }

    pub fn filters(mut self, filters: Vec<QueryFilter>) -> Self {
        self.find.extend(filters);
        self
    }

    pub fn order_by(mut self, field: &str, order: SortOrder) -> Self {
        self.sort.push((field.to_string(), order));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }
}
