use std::str::FromStr;

use uuid::Uuid;

/// Which publication states a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishedFilter {
    /// Only published posts. Used whenever the caller does not ask otherwise.
    #[default]
    Published,
    Unpublished,
    All,
}

impl PublishedFilter {
    pub fn matches(&self, published: bool) -> bool {
        match self {
            PublishedFilter::Published => published,
            PublishedFilter::Unpublished => !published,
            PublishedFilter::All => true,
        }
    }
}

impl FromStr for PublishedFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(PublishedFilter::Published),
            "false" => Ok(PublishedFilter::Unpublished),
            "all" => Ok(PublishedFilter::All),
            other => Err(format!("expected true, false or all, got `{other}`")),
        }
    }
}

/// Filters and paging for a post listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub published: PublishedFilter,
    pub category: Option<Uuid>,
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
}

impl PostQuery {
    pub const DEFAULT_LIMIT: u64 = 10;
    pub const MAX_LIMIT: u64 = 100;
    /// Largest row offset the store accepts (a signed 64-bit `OFFSET`).
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// Rows skipped before this page. Saturates instead of overflowing.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Whether `page` and `limit` address a row offset the store can seek to.
    pub fn offset_in_range(&self) -> bool {
        self.page
            .saturating_sub(1)
            .checked_mul(self.limit)
            .is_some_and(|offset| offset <= Self::MAX_OFFSET)
    }
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            published: PublishedFilter::default(),
            category: None,
            search: None,
            page: 1,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// One page of a listing plus the size of the full result set.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items.
    pub fn pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }
}
