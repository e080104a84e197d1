//! Client / REQ / talent reference data.
//!
//! The catalog is read-only for the whole form session: it is loaded once and
//! then only queried, so it can be shared freely (`&T`, `Arc<T>`).

pub mod ids;
pub mod lookup;
pub mod model;

pub use ids::{ClientId, ReqId, TalentId};
pub use lookup::{CatalogLookup, StaticCatalog};
pub use model::{Client, ReqCatalogEntry, TalentCatalogEntry};
