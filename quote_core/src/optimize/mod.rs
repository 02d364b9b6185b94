//! # Cut Optimization
//!
//! Turns the flat cut and pane lists extracted from quote items into
//! stock-layout plans: how many bars and sheets to buy and where each cut
//! lands on them.
//!
//! Both optimizers are deterministic greedy heuristics, deliberately —
//! optimal cutting-stock is NP-hard and a shop wants a stable, fast,
//! good-enough plan on every recalculation:
//!
//! - [`bar`] — first-fit-decreasing 1-D packing for aluminum bars
//! - [`sheet`] — shelf packing for glass and panel sheets

pub mod bar;
pub mod sheet;

pub use bar::{optimize_bars, Bar, BarCut, BarPlan, PlacedCut, DEFAULT_BAR_LENGTH_MM};
pub use sheet::{
    optimize_sheets, PlacedPiece, Sheet, SheetPiece, SheetPlan, DEFAULT_SHEET_HEIGHT_MM,
    DEFAULT_SHEET_WIDTH_MM,
};
