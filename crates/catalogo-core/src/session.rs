//! Browse session: the fetched record list, the user's filter/page state, and
//! the derived view recomputed from both.
//!
//! Every filter and page-size setter resets the page index to 1 in the same
//! call. Only [`Session::set_page`] and [`Session::navigate`] move the index
//! otherwise.

use thiserror::Error;
use tracing::{debug, warn};

use crate::asset::AssetRecord;
use crate::criteria::{self, FilterCriteria, YesNoFilter};
use crate::facets::{self, Facet};
use crate::group::{self, DomainGroups};
use crate::pager::{self, PageNav, PageRange, PageSize};
use crate::stats::{self, TypeCounts};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StateError {
    #[error("fetch already resolved")]
    AlreadyResolved,
}

/// Lifecycle of the one-shot catalog fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Pending,
    Ready(Vec<AssetRecord>),
    Failed(String),
}

impl FetchState {
    /// Move out of `Pending`. A resolved state never changes again.
    pub fn resolve(&mut self, outcome: Result<Vec<AssetRecord>, String>) -> Result<(), StateError> {
        if !matches!(self, FetchState::Pending) {
            warn!("ignoring second fetch resolution");
            return Err(StateError::AlreadyResolved);
        }
        *self = match outcome {
            Ok(records) => FetchState::Ready(records),
            Err(message) => FetchState::Failed(message),
        };
        Ok(())
    }

    /// Records when ready, otherwise an empty slice.
    pub fn records(&self) -> &[AssetRecord] {
        match self {
            FetchState::Ready(records) => records,
            FetchState::Pending | FetchState::Failed(_) => &[],
        }
    }

    /// Look up a record by its identity key.
    pub fn find(&self, id: &str) -> Option<&AssetRecord> {
        self.records().iter().find(|asset| asset.id == id)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Per-type counts; empty unless the fetch succeeded.
    pub fn stats(&self) -> TypeCounts {
        match self {
            FetchState::Ready(records) => stats::aggregate_by_type(records),
            FetchState::Pending | FetchState::Failed(_) => TypeCounts::new(),
        }
    }
}

/// Filter and pagination selections made by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    pub criteria: FilterCriteria,
    pub page: usize,
    pub page_size: PageSize,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

/// Everything the presentation layer reads, computed from scratch.
#[derive(Debug)]
pub struct CatalogView<'a> {
    pub filtered_count: usize,
    pub page: usize,
    pub page_size: PageSize,
    pub total_pages: usize,
    pub range: PageRange,
    /// Current page grouped by domain, sections in render order.
    pub groups: Vec<(String, Vec<&'a AssetRecord>)>,
    pub asset_types: Vec<String>,
    pub statuses: Vec<String>,
    pub stats: TypeCounts,
    pub has_filters: bool,
}

/// One catalog session: a single fetch plus the user's browse state.
#[derive(Debug, Default)]
pub struct Session {
    fetch: FetchState,
    browse: BrowseState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    pub fn resolve(&mut self, outcome: Result<Vec<AssetRecord>, String>) -> Result<(), StateError> {
        self.fetch.resolve(outcome)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.browse.criteria
    }

    pub fn page(&self) -> usize {
        self.browse.page
    }

    pub fn page_size(&self) -> PageSize {
        self.browse.page_size
    }

    // ── Criteria mutations (each resets the page) ──

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.browse.criteria.query = query.into();
        self.reset_page();
    }

    pub fn set_archetype(&mut self, filter: YesNoFilter) {
        self.browse.criteria.archetype = filter;
        self.reset_page();
    }

    pub fn set_ci_cd(&mut self, filter: YesNoFilter) {
        self.browse.criteria.ci_cd = filter;
        self.reset_page();
    }

    pub fn set_asset_type(&mut self, asset_type: Option<String>) {
        self.browse.criteria.asset_type = asset_type;
        self.reset_page();
    }

    pub fn set_status(&mut self, status: Option<String>) {
        self.browse.criteria.status = status;
        self.reset_page();
    }

    /// Replace all criteria at once.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.browse.criteria = criteria;
        self.reset_page();
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub fn set_page_size(&mut self, size: PageSize) {
        self.browse.page_size = size;
        self.reset_page();
    }

    // ── Page moves ──

    /// Jump to a 1-based page. Not clamped; an out-of-range page shows nothing.
    pub fn set_page(&mut self, page: usize) {
        self.browse.page = page;
    }

    pub fn navigate(&mut self, nav: PageNav) {
        let total = pager::total_pages(self.filtered().len(), self.browse.page_size);
        self.browse.page = nav.apply(self.browse.page, total);
    }

    fn reset_page(&mut self) {
        if self.browse.page != 1 {
            debug!(from = self.browse.page, "criteria changed, resetting page");
        }
        self.browse.page = 1;
    }

    // ── Derived data ──

    /// Records matching the current criteria, in fetch order.
    pub fn filtered(&self) -> Vec<&AssetRecord> {
        criteria::filter(self.fetch.records(), &self.browse.criteria)
    }

    /// Current page grouped by domain (unordered buckets).
    pub fn page_groups(&self) -> DomainGroups<'_> {
        let filtered = self.filtered();
        let page = pager::paginate(&filtered, self.browse.page, self.browse.page_size);
        group::group_by_domain(page.items.iter().copied())
    }

    pub fn view(&self) -> CatalogView<'_> {
        let records = self.fetch.records();
        let filtered = self.filtered();
        let page = pager::paginate(&filtered, self.browse.page, self.browse.page_size);
        let groups = group::sorted_groups(group::group_by_domain(page.items.iter().copied()));

        CatalogView {
            filtered_count: filtered.len(),
            page: self.browse.page,
            page_size: self.browse.page_size,
            total_pages: page.total_pages,
            range: page.range(),
            groups,
            asset_types: facets::distinct_values(records, Facet::AssetType),
            statuses: facets::distinct_values(records, Facet::Status),
            stats: self.fetch.stats(),
            has_filters: self.browse.criteria.is_active(),
        }
    }
}
