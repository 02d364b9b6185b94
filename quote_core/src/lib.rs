//! # quote_core - Fabrication Quoting Engine
//!
//! `quote_core` is the computational heart of the quoting tool for custom
//! aluminum window and door fabrication. Given material catalogs, product
//! recipes, and measured openings, it expands each opening into profile
//! cuts, glass panes, and accessories, prices the lot, and lays raw
//! material out on stock bars and sheets. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Never breaks the preview**: the pricing pipeline coerces bad or
//!   incomplete input to zero-cost contributions instead of erroring
//! - **Rich Errors**: the boundary helpers that do fail return structured
//!   error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::catalog::{Catalogs, GlobalConfig};
//! use quote_core::pricing::{price_composite, PricingContext};
//! use quote_core::quote::{Composition, MeasurementModule, QuoteItem};
//!
//! let catalogs = Catalogs::default();
//! let config = GlobalConfig::default();
//! let ctx = PricingContext {
//!     catalogs: &catalogs,
//!     recipes: &[],
//!     config: &config,
//!     bead_style: None,
//! };
//!
//! let item = QuoteItem::new(
//!     1200.0,
//!     1100.0,
//!     Composition::single(MeasurementModule::new(0, 0, "r-fixed")),
//! );
//! let pricing = price_composite(&item, &ctx);
//!
//! // Empty catalogs: the item previews at zero instead of failing.
//! assert_eq!(pricing.final_price, 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Material records, lookup, and glazing-stack helpers
//! - [`recipe`] - Product recipes: parametric cut and accessory templates
//! - [`quote`] - Quote, item, module, and glazing types
//! - [`formula`] - The restricted `W`/`H` arithmetic evaluator
//! - [`geometry`] - Module grid sizing and coupling deductions
//! - [`expansion`] - Recipe expansion into cuts, panes, and accessories
//! - [`pricing`] - Cost aggregation over items and sets
//! - [`cutlist`] - Flattening priced items into optimizer inputs
//! - [`optimize`] - Bar (1-D) and sheet (2-D) stock layout
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod cutlist;
pub mod errors;
pub mod expansion;
pub mod formula;
pub mod geometry;
pub mod optimize;
pub mod pricing;
pub mod quote;
pub mod recipe;

// Re-export commonly used types at crate root for convenience
pub use errors::{QuoteError, QuoteResult};
pub use pricing::{price_and_update, price_composite, ItemPricing, PricingContext};
pub use quote::{Composition, Glazing, MeasurementModule, Quote, QuoteItem};
pub use recipe::{OpeningType, ProductRecipe};
