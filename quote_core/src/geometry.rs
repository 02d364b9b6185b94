//! # Module Geometry Resolver
//!
//! Turns a `QuoteItem`'s grid of modules into concrete per-module cut
//! dimensions. Column widths and row heights come from the item's total
//! size split by the ratio arrays; modules that share an interior edge
//! with a neighbor each give up half the coupling deduction on that edge,
//! so a pair of coupled modules always sums back to the raw span minus
//! exactly one deduction.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::Catalogs;
//! use quote_core::geometry::GridLayout;
//! use quote_core::quote::{Composition, MeasurementModule, QuoteItem};
//!
//! let composition = Composition {
//!     modules: vec![
//!         MeasurementModule::new(0, 0, "r-1"),
//!         MeasurementModule::new(1, 0, "r-1"),
//!     ],
//!     col_ratios: vec![1.0, 1.0],
//!     row_ratios: vec![1.0],
//!     coupling_deduction_mm: 40.0,
//!     manual_dims: false,
//! };
//! let item = QuoteItem::new(3000.0, 1200.0, composition);
//!
//! let layout = GridLayout::resolve(&item, &Catalogs::default()).unwrap();
//! let (w, _) = layout.module_size(&item.composition.modules[0]);
//! assert_eq!(w, 1480.0); // 1500 - 40/2 on the shared edge
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::Catalogs;
use crate::quote::{MeasurementModule, QuoteItem};

/// Inclusive grid extents of a module set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl GridBounds {
    /// Bounds of a module list; `None` when the list is empty.
    pub fn from_modules(modules: &[MeasurementModule]) -> Option<GridBounds> {
        let first = modules.first()?;
        let mut bounds = GridBounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for m in &modules[1..] {
            bounds.min_x = bounds.min_x.min(m.x);
            bounds.max_x = bounds.max_x.max(m.x);
            bounds.min_y = bounds.min_y.min(m.y);
            bounds.max_y = bounds.max_y.max(m.y);
        }
        Some(bounds)
    }

    pub fn cols(&self) -> usize {
        (self.max_x - self.min_x + 1) as usize
    }

    pub fn rows(&self) -> usize {
        (self.max_y - self.min_y + 1) as usize
    }
}

/// Resolved grid geometry for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub bounds: GridBounds,

    /// Raw column widths before coupling deductions (mm)
    pub col_widths: Vec<f64>,

    /// Raw row heights before coupling deductions (mm)
    pub row_heights: Vec<f64>,

    /// Effective coupling deduction shared across interior edges (mm)
    pub coupling_deduction_mm: f64,
}

impl GridLayout {
    /// Resolve the grid for an item. `None` when the module list is empty
    /// (the aggregator turns that into a zero breakdown).
    ///
    /// The deduction is the selected coupling profile's thickness when one
    /// is chosen and resolves, else the composition's base constant.
    pub fn resolve(item: &QuoteItem, catalogs: &Catalogs) -> Option<GridLayout> {
        let composition = &item.composition;
        let bounds = GridBounds::from_modules(&composition.modules)?;

        let coupling_deduction_mm = item
            .coupling_profile_id
            .as_deref()
            .and_then(|id| catalogs.profile(id))
            .map(|p| p.thickness_mm)
            .unwrap_or(composition.coupling_deduction_mm);

        Some(GridLayout {
            bounds,
            col_widths: split_by_ratios(item.width_mm, &composition.col_ratios, bounds.cols()),
            row_heights: split_by_ratios(item.height_mm, &composition.row_ratios, bounds.rows()),
            coupling_deduction_mm,
        })
    }

    /// Effective cut width and height of one module.
    ///
    /// Half the coupling deduction comes off each interior shared edge;
    /// boundary edges are untouched, so a single-column grid never loses
    /// width. Positive manual overrides win outright.
    pub fn module_size(&self, module: &MeasurementModule) -> (f64, f64) {
        let width = match module.manual_width_mm {
            Some(w) if w > 0.0 => w,
            _ => {
                let col = (module.x.saturating_sub(self.bounds.min_x)) as usize;
                let raw = self.col_widths.get(col).copied().unwrap_or(0.0);
                let half = self.coupling_deduction_mm / 2.0;
                let left = if module.x > self.bounds.min_x { half } else { 0.0 };
                let right = if module.x < self.bounds.max_x { half } else { 0.0 };
                (raw - left - right).max(0.0)
            }
        };

        let height = match module.manual_height_mm {
            Some(h) if h > 0.0 => h,
            _ => {
                let row = (module.y.saturating_sub(self.bounds.min_y)) as usize;
                let raw = self.row_heights.get(row).copied().unwrap_or(0.0);
                let half = self.coupling_deduction_mm / 2.0;
                let top = if module.y > self.bounds.min_y { half } else { 0.0 };
                let bottom = if module.y < self.bounds.max_y { half } else { 0.0 };
                (raw - top - bottom).max(0.0)
            }
        };

        (width, height)
    }
}

/// Split a total span across `count` tracks proportionally to the ratios.
/// A short, empty, or zero-sum ratio array degrades to an equal split so
/// no division can blow up mid-edit.
fn split_by_ratios(total: f64, ratios: &[f64], count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    let degenerate = ratios.len() < count || ratios.iter().take(count).any(|r| !r.is_finite());
    let sum: f64 = ratios.iter().take(count).map(|r| r.max(0.0)).sum();
    if degenerate || sum <= 0.0 || !sum.is_finite() {
        return vec![total / count as f64; count];
    }
    ratios
        .iter()
        .take(count)
        .map(|r| total * r.max(0.0) / sum)
        .collect()
}
