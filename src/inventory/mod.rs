//! Asset inventory management.
//!
//! Assets are loaded once at startup, either from the built-in sample list or
//! from an inventory file. YAML is the default file format:
//! ```yaml
//! base_currency: USD # Prices below are in this currency
//! assets:
//!   - type: laptop # or `phone`
//!     brand: Dell
//!     model: XPS 13
//!     price: 1200
//!     purchased: 2019-10-15
//!     country: USA # Optional, the office holding the asset
//! ```

mod builder;

mod display;

mod models;
pub use models::*;

mod office;
pub use office::*;

mod query;
pub use query::*;

mod repository;
pub use repository::*;

pub mod source;
