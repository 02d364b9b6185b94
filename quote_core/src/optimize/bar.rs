//! First-fit-decreasing packing of profile cuts onto stock bars.
//!
//! Cuts are grouped per profile, sorted longest-first, and each one goes
//! into the first open bar it fits on (used + cut + kerf ≤ stock length),
//! opening a new bar otherwise. Deterministic and fast; not optimal.
//!
//! Miter angles ride along for the layout rendering but never affect
//! packing feasibility — a 45° end consumes the same bar length.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalogs;
use crate::recipe::CutAngle;

/// Stock bar length assumed when the profile record has none.
pub const DEFAULT_BAR_LENGTH_MM: f64 = 6000.0;

/// One required cut, flattened to a single piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarCut {
    pub profile_id: String,

    /// Supplier code, used as the plan heading
    pub code: String,

    /// Required length including any kerf padding the extractor applied (mm)
    pub length_mm: f64,

    /// Originating item code, shown on the layout
    pub origin: String,

    pub angle_start: CutAngle,
    pub angle_end: CutAngle,
}

/// A cut placed on a bar, in saw order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedCut {
    pub length_mm: f64,
    pub origin: String,
    pub angle_start: CutAngle,
    pub angle_end: CutAngle,
}

/// One stock bar and what comes off it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Bar {
    pub cuts: Vec<PlacedCut>,

    /// Σ(cut + kerf) (mm)
    pub used_mm: f64,

    /// Stock length minus used (mm)
    pub scrap_mm: f64,
}

/// Layout plan for one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPlan {
    pub profile_id: String,
    pub code: String,
    pub stock_length_mm: f64,
    pub bars: Vec<Bar>,

    /// Cuts longer than the stock bar; they need special ordering and
    /// are reported instead of being forced into an infeasible layout.
    pub oversized: Vec<BarCut>,
}

impl BarPlan {
    /// Number of stock bars to buy.
    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    /// Total scrap across all bars (mm).
    pub fn total_scrap_mm(&self) -> f64 {
        self.bars.iter().map(|b| b.scrap_mm).sum()
    }
}

/// Pack cuts onto stock bars, one plan per distinct profile.
///
/// Plans come out in first-seen profile order; within a plan the cuts are
/// placed longest-first, so the whole result is deterministic for a given
/// input order.
pub fn optimize_bars(cuts: &[BarCut], catalogs: &Catalogs, kerf_mm: f64) -> Vec<BarPlan> {
    let kerf = kerf_mm.max(0.0);
    let mut plans: Vec<BarPlan> = Vec::new();

    for cut in cuts {
        if cut.length_mm <= 0.0 {
            continue;
        }
        if !plans.iter().any(|p| p.profile_id == cut.profile_id) {
            let stock = catalogs
                .profile(&cut.profile_id)
                .map(|p| p.bar_length_mm)
                .filter(|l| *l > 0.0)
                .unwrap_or(DEFAULT_BAR_LENGTH_MM);
            plans.push(BarPlan {
                profile_id: cut.profile_id.clone(),
                code: cut.code.clone(),
                stock_length_mm: stock,
                bars: Vec::new(),
                oversized: Vec::new(),
            });
        }
    }

    for plan in &mut plans {
        let mut group: Vec<&BarCut> = cuts
            .iter()
            .filter(|c| c.profile_id == plan.profile_id && c.length_mm > 0.0)
            .collect();
        group.sort_by(|a, b| b.length_mm.total_cmp(&a.length_mm));

        for cut in group {
            let needed = cut.length_mm + kerf;
            if needed > plan.stock_length_mm {
                plan.oversized.push(cut.clone());
                continue;
            }

            let target = plan
                .bars
                .iter_mut()
                .find(|bar| bar.used_mm + needed <= plan.stock_length_mm);
            let bar = match target {
                Some(bar) => bar,
                None => {
                    plan.bars.push(Bar::default());
                    plan.bars.last_mut().expect("bar just pushed")
                }
            };
            bar.cuts.push(PlacedCut {
                length_mm: cut.length_mm,
                origin: cut.origin.clone(),
                angle_start: cut.angle_start,
                angle_end: cut.angle_end,
            });
            bar.used_mm += needed;
        }

        for bar in &mut plan.bars {
            bar.scrap_mm = plan.stock_length_mm - bar.used_mm;
        }
    }

    plans
}
