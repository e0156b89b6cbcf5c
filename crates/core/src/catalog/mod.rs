//! CSV asset catalog: the only place raw text becomes [`Asset`](crate::domain::asset::Asset)s.

pub mod reader;
pub mod types;

pub use reader::{load_assets, parse_assets};
pub use types::{CatalogLoad, RowError};
