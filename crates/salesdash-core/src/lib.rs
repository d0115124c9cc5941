//! Sales & inventory reporting engine.
//!
//! The engine is a forward-only pipeline of pure functions:
//!
//! ```text
//! filter -> aggregate -> derive (summary, kpi, health) -> insights
//! ```
//!
//! Every stage operates on in-memory data supplied by the caller and is
//! recomputed in full on each selection change. Loading spreadsheets and
//! rendering results are left to the adapters (`salesdash-cli`,
//! `salesdash-bindings`).

pub mod aggregate;
pub mod error;
pub mod export;
pub mod filter;
pub mod health;
pub mod insights;
pub mod kpi;
pub mod receivables;
pub mod records;
pub mod report;
pub mod summary;
pub mod trend;
pub mod types;

pub use error::SalesDashError;
pub use types::*;

/// Standard result type for all salesdash operations
pub type SalesDashResult<T> = Result<T, SalesDashError>;
