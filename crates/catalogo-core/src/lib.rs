//! Core catalog pipeline: record model, filtering, grouping, pagination,
//! stats and facets. Pure and synchronous; no I/O.

pub mod asset;
pub mod collate;
pub mod criteria;
pub mod facets;
pub mod group;
pub mod pager;
pub mod session;
pub mod stats;

pub use asset::{AssetRecord, DebtBreakdown, DebtTier, Hosting, TechnicalDebt};
pub use criteria::{CriteriaError, FilterCriteria, YesNoFilter};
pub use facets::Facet;
pub use group::{NO_DOMAIN, group_by_domain};
pub use pager::{Page, PageNav, PageRange, PageSize, paginate};
pub use session::{BrowseState, CatalogView, FetchState, Session, StateError};
pub use stats::{TypeCounts, aggregate_by_type};
