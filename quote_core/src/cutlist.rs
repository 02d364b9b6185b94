//! # Cut-list Extraction
//!
//! Flattens priced quote items into the raw inputs the optimizers need:
//! every profile cut (recipe cuts, coupling mullions, perimeter trim) as
//! individual `BarCut`s, and every glazed or panel pane as a `SheetPiece`.
//! Louver slat panes produce profile cuts, not sheet pieces.
//!
//! Extraction reuses the same expansion the pricing pass runs, so a cut
//! sheet always matches the priced breakdown.

use crate::expansion::{expand_module, Pane, PaneInfill, ProfileCut};
use crate::geometry::GridLayout;
use crate::optimize::{BarCut, SheetPiece};
use crate::pricing::{coupling_cuts, tapajuntas_cuts, PricingContext};
use crate::quote::QuoteItem;
use crate::recipe::ProductRecipe;

/// All profile cuts one item needs: module recipe cuts plus the
/// item-level coupling mullions and trim runs.
pub fn item_cuts(item: &QuoteItem, ctx: &PricingContext) -> Vec<ProfileCut> {
    let Some(layout) = GridLayout::resolve(item, ctx.catalogs) else {
        return Vec::new();
    };

    let mut cuts = Vec::new();
    for module in &item.composition.modules {
        let Some(recipe) = ProductRecipe::find(ctx.recipes, &module.recipe_id) else {
            continue;
        };
        let (w, h) = layout.module_size(module);
        let expansion = expand_module(
            module,
            recipe,
            w,
            h,
            &item.extras,
            item.quantity,
            &ctx.expansion(),
        );
        cuts.extend(expansion.cuts);
    }
    cuts.extend(coupling_cuts(item, &layout, ctx));
    cuts.extend(tapajuntas_cuts(item, &layout, ctx));
    cuts
}

/// All pane rectangles one item needs, across its modules.
pub fn item_panes(item: &QuoteItem, ctx: &PricingContext) -> Vec<Pane> {
    let Some(layout) = GridLayout::resolve(item, ctx.catalogs) else {
        return Vec::new();
    };

    let mut panes = Vec::new();
    for module in &item.composition.modules {
        let Some(recipe) = ProductRecipe::find(ctx.recipes, &module.recipe_id) else {
            continue;
        };
        let (w, h) = layout.module_size(module);
        let expansion = expand_module(
            module,
            recipe,
            w,
            h,
            &item.extras,
            item.quantity,
            &ctx.expansion(),
        );
        panes.extend(expansion.panes);
    }
    panes
}

/// Label shown on layouts for cuts and pieces from this item.
fn origin_label(item: &QuoteItem) -> String {
    if item.label.is_empty() {
        let id = item.id.to_string();
        id[..8.min(id.len())].to_string()
    } else {
        item.label.clone()
    }
}

/// Flatten items into individual bar-packer cuts. A `ProfileCut` with
/// quantity N becomes N identical `BarCut`s; fractional quantities round
/// to the nearest whole cut.
pub fn bar_cuts(items: &[QuoteItem], ctx: &PricingContext) -> Vec<BarCut> {
    let mut out = Vec::new();
    for item in items {
        let origin = origin_label(item);
        for cut in item_cuts(item, ctx) {
            if cut.length_mm <= 0.0 {
                continue;
            }
            let count = cut.quantity.round().max(0.0) as usize;
            for _ in 0..count {
                out.push(BarCut {
                    profile_id: cut.profile_id.clone(),
                    code: cut.code.clone(),
                    length_mm: cut.length_mm,
                    origin: origin.clone(),
                    angle_start: cut.angle_start,
                    angle_end: cut.angle_end,
                });
            }
        }
    }
    out
}

/// Flatten items into sheet-packer pieces: glazed and panel panes,
/// repeated per item quantity. Slat panes are skipped (their material is
/// already in the bar cuts).
pub fn sheet_pieces(items: &[QuoteItem], ctx: &PricingContext) -> Vec<SheetPiece> {
    let mut out = Vec::new();
    for item in items {
        let origin = origin_label(item);
        for pane in item_panes(item, ctx) {
            if matches!(pane.infill, PaneInfill::Slats { .. }) {
                continue;
            }
            if pane.width_mm <= 0.0 || pane.height_mm <= 0.0 {
                continue;
            }
            for _ in 0..item.quantity.max(1) {
                out.push(SheetPiece {
                    spec: pane.spec.clone(),
                    width_mm: pane.width_mm,
                    height_mm: pane.height_mm,
                    origin: origin.clone(),
                    glass_id: pane.glass_id.clone(),
                });
            }
        }
    }
    out
}
