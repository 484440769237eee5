//! The query orchestrator: a state machine over the active filter.
//!
//! A [`BrowseSession`] owns the accumulated result list and pagination
//! counters for whatever filter is active, and guarantees that the
//! last-issued filter's response wins. Work is split into a
//! [`BrowseSession::begin_refresh`] / [`BrowseSession::apply`] pair so a
//! caller that releases its lock across the network await can still have
//! stale responses discarded: every begin bumps a generation counter, and
//! apply ignores any ticket whose generation is no longer current. The async
//! convenience methods ([`BrowseSession::refresh`],
//! [`BrowseSession::load_more`]) use the same pair internally.

use offcat_core::{FilterState, PageEnvelope, Product};

use crate::client::OffClient;
use crate::error::UpstreamError;

/// What a completed upstream query produced.
#[derive(Debug)]
pub enum QueryOutcome {
    /// Barcode lookup: zero or one item, pagination meaningless.
    Single(Option<Product>),
    /// Any listing query.
    Listing(PageEnvelope),
}

/// How to fold a listing outcome into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApplyMode {
    Replace,
    Append,
}

/// Token for one in-flight query. Carries the filter and page to fetch so
/// the caller can run the request without re-reading session state.
#[derive(Debug)]
pub struct QueryTicket {
    generation: u64,
    filter: FilterState,
    page: u32,
    mode: ApplyMode,
}

impl QueryTicket {
    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The 1-based page this ticket should fetch.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Session state for the list/detail UI: active filter, accumulated items,
/// and pagination counters.
#[derive(Debug)]
pub struct BrowseSession {
    client: OffClient,
    page_size: u32,
    filter: FilterState,
    products: Vec<Product>,
    count: u64,
    page: u32,
    page_count: u32,
    loading: bool,
    generation: u64,
}

impl BrowseSession {
    #[must_use]
    pub fn new(client: OffClient, page_size: u32) -> Self {
        Self {
            client,
            page_size,
            filter: FilterState::None,
            products: Vec::new(),
            count: 0,
            page: 0,
            page_count: 0,
            loading: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Items accumulated so far, in arrival order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a load-more would do anything right now.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.loading && !self.filter.is_barcode() && self.page < self.page_count
    }

    /// Re-resolves the active filter from raw inputs (Barcode > Name >
    /// Category > None). The change takes effect on the next refresh;
    /// any in-flight query is implicitly superseded.
    pub fn set_filter_inputs(&mut self, barcode: &str, name: &str, category: &str) {
        self.set_filter(FilterState::resolve(barcode, name, category));
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.generation += 1;
    }

    /// Starts a fresh query for the current filter, superseding anything in
    /// flight. The caller runs the query for `ticket.filter()` at
    /// `ticket.page()` and hands the outcome back to [`BrowseSession::apply`].
    pub fn begin_refresh(&mut self) -> QueryTicket {
        self.begin(1, ApplyMode::Replace)
    }

    /// Starts a load-more for the next page, or `None` when it would be a
    /// no-op: a query is already in flight, the barcode filter is active, or
    /// the last page has been reached.
    pub fn begin_load_more(&mut self) -> Option<QueryTicket> {
        if !self.has_more() {
            return None;
        }
        Some(self.begin(self.page + 1, ApplyMode::Append))
    }

    fn begin(&mut self, page: u32, mode: ApplyMode) -> QueryTicket {
        self.generation += 1;
        self.loading = true;
        QueryTicket {
            generation: self.generation,
            filter: self.filter.clone(),
            page,
            mode,
        }
    }

    /// Folds a completed query into the session. Returns `false` (and changes
    /// nothing) when the ticket has been superseded by a newer begin or
    /// filter edit.
    pub fn apply(&mut self, ticket: &QueryTicket, outcome: QueryOutcome) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale query response"
            );
            return false;
        }
        self.loading = false;

        match outcome {
            QueryOutcome::Single(found) => {
                self.products = found.into_iter().collect();
                self.count = self.products.len() as u64;
                self.page = 1;
                // 0 or 1 item either way; has_more stays false.
                self.page_count = u32::from(!self.products.is_empty());
            }
            QueryOutcome::Listing(env) => {
                match ticket.mode {
                    ApplyMode::Replace => self.products = env.products,
                    ApplyMode::Append => self.products.extend(env.products),
                }
                self.count = env.count;
                // Track the page the server actually returned, not the one
                // requested: some backends clamp out-of-range pages.
                self.page = env.page;
                self.page_count = env.page_count;
            }
        }
        true
    }

    /// Marks a failed query as finished without touching the result state.
    pub fn abort(&mut self, ticket: &QueryTicket) {
        if ticket.generation == self.generation {
            self.loading = false;
        }
    }

    /// Issues exactly one upstream query for the current filter and replaces
    /// the result list with page 1.
    ///
    /// # Errors
    ///
    /// Propagates [`UpstreamError`] from the gateway; the session keeps its
    /// previous results on failure.
    pub async fn refresh(&mut self) -> Result<(), UpstreamError> {
        let ticket = self.begin_refresh();
        match self.run(&ticket).await {
            Ok(outcome) => {
                self.apply(&ticket, outcome);
                Ok(())
            }
            Err(e) => {
                self.abort(&ticket);
                Err(e)
            }
        }
    }

    /// Fetches the next page and appends it, preserving arrival order.
    /// Returns `Ok(false)` when load-more is currently a no-op.
    ///
    /// # Errors
    ///
    /// Propagates [`UpstreamError`] from the gateway.
    pub async fn load_more(&mut self) -> Result<bool, UpstreamError> {
        let Some(ticket) = self.begin_load_more() else {
            return Ok(false);
        };
        match self.run(&ticket).await {
            Ok(outcome) => Ok(self.apply(&ticket, outcome)),
            Err(e) => {
                self.abort(&ticket);
                Err(e)
            }
        }
    }

    /// Runs the single upstream query a ticket stands for.
    async fn run(&self, ticket: &QueryTicket) -> Result<QueryOutcome, UpstreamError> {
        let page = ticket.page;
        match &ticket.filter {
            FilterState::Barcode(code) => self
                .client
                .product_by_barcode(code)
                .await
                .map(QueryOutcome::Single),
            FilterState::Name(query) => self
                .client
                .search_products(query, page, self.page_size)
                .await
                .map(QueryOutcome::Listing),
            FilterState::Category(label) => self
                .client
                .products_by_category(label, page, self.page_size)
                .await
                .map(QueryOutcome::Listing),
            FilterState::None => self
                .client
                .popular_products(page, self.page_size)
                .await
                .map(QueryOutcome::Listing),
        }
    }
}
