//! # Price Aggregation
//!
//! Single-pass aggregation over a `QuoteItem`: resolve the module grid,
//! expand every module's recipe, then add the item-level material that no
//! single module owns — coupling mullions between grid neighbors and the
//! perimeter trim (tapajuntas) with its miter allowances and set-surplus
//! cuts. Labor is a percentage markup on material.
//!
//! Pure computation: no state, no errors. Incomplete configurations price
//! at zero rather than failing, so the live preview never breaks.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::{Catalogs, GlobalConfig};
//! use quote_core::pricing::{price_composite, PricingContext};
//! use quote_core::quote::{Composition, MeasurementModule, QuoteItem};
//!
//! let config = GlobalConfig::default();
//! let catalogs = Catalogs::default();
//! let ctx = PricingContext {
//!     catalogs: &catalogs,
//!     recipes: &[],
//!     config: &config,
//!     bead_style: None,
//! };
//!
//! // Unknown recipe: the item previews at zero instead of failing.
//! let item = QuoteItem::new(
//!     1000.0,
//!     1000.0,
//!     Composition::single(MeasurementModule::new(0, 0, "r-unknown")),
//! );
//! let pricing = price_composite(&item, &ctx);
//! assert_eq!(pricing.final_price, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::{AluminumProfile, Catalogs, GlazingBeadStyle, GlobalConfig};
use crate::expansion::{expand_module, ExpansionContext, Pane, ProfileCut};
use crate::geometry::GridLayout;
use crate::quote::{CostBreakdown, ItemExtras, MeasurementModule, QuoteItem, TrimSides};
use crate::recipe::{CutAngle, ProductRecipe};

/// Role label attached to coupling mullion cuts.
pub const COUPLING_ROLE: &str = "Tubo de acople";

/// Role label attached to perimeter trim cuts.
pub const TAPAJUNTAS_ROLE: &str = "Tapajuntas";

/// Adjacent-module size mismatches below this are noise, not a trim step.
pub const TRIM_SURPLUS_THRESHOLD_MM: f64 = 5.0;

/// Read-only inputs shared by every pricing call.
#[derive(Debug, Clone, Copy)]
pub struct PricingContext<'a> {
    pub catalogs: &'a Catalogs<'a>,
    pub recipes: &'a [ProductRecipe],
    pub config: &'a GlobalConfig,
    pub bead_style: Option<GlazingBeadStyle>,
}

impl<'a> PricingContext<'a> {
    pub(crate) fn expansion(&self) -> ExpansionContext<'a> {
        ExpansionContext {
            catalogs: self.catalogs,
            config: self.config,
            bead_style: self.bead_style,
        }
    }
}

/// Result of pricing one item (or one module in isolation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemPricing {
    pub breakdown: CostBreakdown,

    /// Material plus labor
    pub final_price: f64,

    /// Pane geometry across all modules, for previews and reports
    pub panes: Vec<Pane>,
}

impl ItemPricing {
    /// The zero breakdown returned for incomplete configurations.
    pub fn zero() -> Self {
        ItemPricing::default()
    }
}

/// Price one module in isolation against explicit cut dimensions.
///
/// This is the live single-opening preview path; grid concerns (coupling
/// mullions, set surplus) don't apply, but perimeter trim does when the
/// extras ask for it.
pub fn price_module(
    module: &MeasurementModule,
    recipe: &ProductRecipe,
    width_mm: f64,
    height_mm: f64,
    treatment_id: Option<&str>,
    extras: &ItemExtras,
    item_qty: u32,
    ctx: &PricingContext,
) -> ItemPricing {
    let expansion = expand_module(
        module,
        recipe,
        width_mm,
        height_mm,
        extras,
        item_qty,
        &ctx.expansion(),
    );

    let mut weight = expansion.alu_weight_kg();
    if extras.tapajuntas {
        if let Some(profile) = trim_profile(recipe, ctx.catalogs) {
            let runs = trim_runs(
                width_mm,
                height_mm,
                &extras.tapajuntas_sides,
                profile,
                item_qty as f64,
            );
            weight += runs.iter().map(|c| c.weight_kg).sum::<f64>();
        }
    }

    finish(
        weight,
        expansion.glass_cost,
        expansion.acc_cost,
        expansion.panes,
        treatment_id,
        ctx,
    )
}

/// Price a whole item: every grid module, coupling mullions, perimeter
/// trim. Returns the zero breakdown when the module set is empty.
pub fn price_composite(item: &QuoteItem, ctx: &PricingContext) -> ItemPricing {
    let Some(layout) = GridLayout::resolve(item, ctx.catalogs) else {
        return ItemPricing::zero();
    };

    let mut weight = 0.0;
    let mut glass_cost = 0.0;
    let mut acc_cost = 0.0;
    let mut panes = Vec::new();

    for module in &item.composition.modules {
        let Some(recipe) = ProductRecipe::find(ctx.recipes, &module.recipe_id) else {
            continue;
        };
        let (w, h) = layout.module_size(module);
        let expansion =
            expand_module(module, recipe, w, h, &item.extras, item.quantity, &ctx.expansion());
        weight += expansion.alu_weight_kg();
        glass_cost += expansion.glass_cost;
        acc_cost += expansion.acc_cost;
        panes.extend(expansion.panes);
    }

    for cut in coupling_cuts(item, &layout, ctx) {
        weight += cut.weight_kg;
    }
    for cut in tapajuntas_cuts(item, &layout, ctx) {
        weight += cut.weight_kg;
    }

    finish(
        weight,
        glass_cost,
        acc_cost,
        panes,
        item.treatment_id.as_deref(),
        ctx,
    )
}

/// Price a whole item and write the result back onto it.
pub fn price_and_update(item: &mut QuoteItem, ctx: &PricingContext) {
    let pricing = price_composite(item, ctx);
    item.calculated_cost = pricing.final_price;
    item.breakdown = Some(pricing.breakdown);
}

/// Close the breakdown: aluminum money from weight, labor from material.
fn finish(
    weight: f64,
    glass_cost: f64,
    acc_cost: f64,
    panes: Vec<Pane>,
    treatment_id: Option<&str>,
    ctx: &PricingContext,
) -> ItemPricing {
    let treatment_kg = treatment_id
        .and_then(|id| ctx.catalogs.treatment(id))
        .map(|t| t.price_kg)
        .unwrap_or(0.0);

    let alu_cost = weight * (ctx.config.aluminum_price_kg + treatment_kg);
    let material_cost = alu_cost + glass_cost + acc_cost;
    let labor_cost = material_cost * ctx.config.labor_pct / 100.0;

    ItemPricing {
        breakdown: CostBreakdown {
            alu_cost,
            glass_cost,
            acc_cost,
            labor_cost,
            material_cost,
            total_weight_kg: weight,
        },
        final_price: material_cost + labor_cost,
        panes,
    }
}

fn make_cut(
    profile: &AluminumProfile,
    role: &str,
    length_mm: f64,
    quantity: f64,
    angle_start: CutAngle,
    angle_end: CutAngle,
) -> ProfileCut {
    ProfileCut {
        profile_id: profile.id.clone(),
        code: profile.code.clone(),
        role: role.to_string(),
        length_mm,
        quantity,
        angle_start,
        angle_end,
        weight_kg: (length_mm / 1000.0) * profile.weight_kg_m * quantity,
    }
}

/// Coupling mullion cuts for a set: one per pair of grid-adjacent
/// modules, as long as the shorter of the two shared edges.
///
/// Material needs a resolvable coupling profile (the item's, falling back
/// to the first module's recipe default); the geometric deduction applies
/// either way through the layout.
pub fn coupling_cuts(item: &QuoteItem, layout: &GridLayout, ctx: &PricingContext) -> Vec<ProfileCut> {
    if !item.composition.is_set() {
        return Vec::new();
    }
    let Some(profile) = coupling_profile(item, ctx) else {
        return Vec::new();
    };

    let modules = &item.composition.modules;
    let qty = item.quantity as f64;
    let mut cuts = Vec::new();

    for (i, a) in modules.iter().enumerate() {
        let (wa, ha) = layout.module_size(a);
        for b in &modules[i + 1..] {
            let (wb, hb) = layout.module_size(b);
            // Vertical mullion between horizontal neighbors.
            if b.y == a.y && (b.x == a.x + 1 || a.x == b.x + 1) {
                let length = ha.min(hb);
                if length > 0.0 {
                    cuts.push(make_cut(
                        profile,
                        COUPLING_ROLE,
                        length,
                        qty,
                        CutAngle::Square,
                        CutAngle::Square,
                    ));
                }
            }
            // Horizontal mullion between vertical neighbors.
            if b.x == a.x && (b.y == a.y + 1 || a.y == b.y + 1) {
                let length = wa.min(wb);
                if length > 0.0 {
                    cuts.push(make_cut(
                        profile,
                        COUPLING_ROLE,
                        length,
                        qty,
                        CutAngle::Square,
                        CutAngle::Square,
                    ));
                }
            }
        }
    }

    cuts
}

fn coupling_profile<'a>(item: &QuoteItem, ctx: &PricingContext<'a>) -> Option<&'a AluminumProfile> {
    let from_item = item
        .coupling_profile_id
        .as_deref()
        .and_then(|id| ctx.catalogs.profile(id));
    if from_item.is_some() {
        return from_item;
    }
    item.composition
        .modules
        .first()
        .and_then(|m| ProductRecipe::find(ctx.recipes, &m.recipe_id))
        .and_then(|r| r.coupling_profile_id.as_deref())
        .and_then(|id| ctx.catalogs.profile(id))
}

/// Perimeter trim cuts for an item: the four side runs (when active) with
/// miter allowances, plus set-surplus cuts over uneven coupling lines.
pub fn tapajuntas_cuts(
    item: &QuoteItem,
    layout: &GridLayout,
    ctx: &PricingContext,
) -> Vec<ProfileCut> {
    if !item.extras.tapajuntas {
        return Vec::new();
    }
    let Some(profile) = item
        .composition
        .modules
        .first()
        .and_then(|m| ProductRecipe::find(ctx.recipes, &m.recipe_id))
        .and_then(|r| trim_profile(r, ctx.catalogs))
    else {
        return Vec::new();
    };

    let qty = item.quantity as f64;
    let mut cuts = trim_runs(
        item.width_mm,
        item.height_mm,
        &item.extras.tapajuntas_sides,
        profile,
        qty,
    );
    if item.composition.is_set() {
        cuts.extend(trim_surplus(item, layout, profile, qty));
    }
    cuts
}

fn trim_profile<'a>(
    recipe: &ProductRecipe,
    catalogs: &Catalogs<'a>,
) -> Option<&'a AluminumProfile> {
    recipe
        .tapajuntas_profile_id
        .as_deref()
        .and_then(|id| catalogs.profile(id))
}

/// The four side runs. A horizontal run grows by the trim thickness for
/// each active vertical side at its ends (45° miters), and vice versa.
fn trim_runs(
    width_mm: f64,
    height_mm: f64,
    sides: &TrimSides,
    profile: &AluminumProfile,
    qty: f64,
) -> Vec<ProfileCut> {
    let t = profile.thickness_mm;
    let mut cuts = Vec::new();

    let miter = |active: bool| if active { CutAngle::Miter } else { CutAngle::Square };
    let allowance = |active: bool| if active { t } else { 0.0 };

    let horizontal = width_mm + allowance(sides.left) + allowance(sides.right);
    let vertical = height_mm + allowance(sides.top) + allowance(sides.bottom);

    if sides.top && horizontal > 0.0 {
        cuts.push(make_cut(
            profile,
            TAPAJUNTAS_ROLE,
            horizontal,
            qty,
            miter(sides.left),
            miter(sides.right),
        ));
    }
    if sides.bottom && horizontal > 0.0 {
        cuts.push(make_cut(
            profile,
            TAPAJUNTAS_ROLE,
            horizontal,
            qty,
            miter(sides.left),
            miter(sides.right),
        ));
    }
    if sides.left && vertical > 0.0 {
        cuts.push(make_cut(
            profile,
            TAPAJUNTAS_ROLE,
            vertical,
            qty,
            miter(sides.top),
            miter(sides.bottom),
        ));
    }
    if sides.right && vertical > 0.0 {
        cuts.push(make_cut(
            profile,
            TAPAJUNTAS_ROLE,
            vertical,
            qty,
            miter(sides.top),
            miter(sides.bottom),
        ));
    }

    cuts
}

/// Surplus trim consumed stepping over uneven adjacent modules along
/// internal coupling lines. Sets only; sub-threshold mismatches ignored.
fn trim_surplus(
    item: &QuoteItem,
    layout: &GridLayout,
    profile: &AluminumProfile,
    qty: f64,
) -> Vec<ProfileCut> {
    let modules = &item.composition.modules;
    let mut cuts = Vec::new();

    for (i, a) in modules.iter().enumerate() {
        let (wa, ha) = layout.module_size(a);
        for b in &modules[i + 1..] {
            let (wb, hb) = layout.module_size(b);
            let mismatch = if b.y == a.y && (b.x == a.x + 1 || a.x == b.x + 1) {
                (ha - hb).abs()
            } else if b.x == a.x && (b.y == a.y + 1 || a.y == b.y + 1) {
                (wa - wb).abs()
            } else {
                continue;
            };
            if mismatch > TRIM_SURPLUS_THRESHOLD_MM {
                cuts.push(make_cut(
                    profile,
                    TAPAJUNTAS_ROLE,
                    mismatch,
                    qty,
                    CutAngle::Square,
                    CutAngle::Square,
                ));
            }
        }
    }

    cuts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{Composition, Glazing};
    use crate::recipe::{OpeningType, RecipeProfile};

    fn frame_recipe(id: &str) -> ProductRecipe {
        ProductRecipe {
            id: id.to_string(),
            name: "Paño fijo".to_string(),
            line: String::new(),
            opening: OpeningType::Fixed,
            profiles: vec![RecipeProfile {
                role: "Marco".to_string(),
                profile_id: Some("p-marco".to_string()),
                glazing_bead_ids: Vec::new(),
                quantity: 4.0,
                formula: "W".to_string(),
                angle_start: CutAngle::Miter,
                angle_end: CutAngle::Miter,
            }],
            accessories: Vec::new(),
            glass_width_formula: "W - 80".to_string(),
            glass_height_formula: "H - 80".to_string(),
            glass_deduction_w_mm: 0.0,
            glass_deduction_h_mm: 0.0,
            transom_profile_id: None,
            tapajuntas_profile_id: Some("p-tapa".to_string()),
            mosquito_profile_id: None,
            coupling_profile_id: None,
        }
    }

    fn profiles() -> Vec<AluminumProfile> {
        vec![
            AluminumProfile::new("p-marco", "MA-10", 1.2, 6000.0, 50.0),
            AluminumProfile::new("p-tapa", "TJ-30", 0.3, 6000.0, 30.0),
            AluminumProfile::new("p-acople", "TB-40", 0.9, 6000.0, 40.0),
        ]
    }

    fn zero_labor_config() -> GlobalConfig {
        GlobalConfig {
            aluminum_price_kg: 10.0,
            labor_pct: 0.0,
            kerf_mm: 5.0,
            tax_pct: 0.0,
            fallback_panel_price_m2: 0.0,
            mesh_price_m2: 0.0,
            transom_glass_deduction_mm: 0.0,
        }
    }

    #[test]
    fn test_single_fixed_window_scenario() {
        // Marco ×4 at W, 1000×1000, 1.2 kg/m, $10/kg, no treatment, 0% labor.
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = zero_labor_config();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        let item = QuoteItem::new(
            1000.0,
            1000.0,
            Composition::single(MeasurementModule::new(0, 0, "r-1")),
        );
        let pricing = price_composite(&item, &ctx);

        let expected_weight = (1000.0 + 5.0) / 1000.0 * 4.0 * 1.2;
        assert!((pricing.breakdown.total_weight_kg - expected_weight).abs() < 1e-9);
        assert!((pricing.breakdown.alu_cost - expected_weight * 10.0).abs() < 1e-9);
        assert_eq!(pricing.breakdown.labor_cost, 0.0);
        assert_eq!(pricing.final_price, pricing.breakdown.material_cost);
    }

    #[test]
    fn test_composite_is_pure_and_idempotent() {
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = GlobalConfig::default();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };
        let item = QuoteItem::new(
            1200.0,
            1500.0,
            Composition::single(MeasurementModule::new(0, 0, "r-1")),
        );

        let first = price_composite(&item, &ctx);
        let second = price_composite(&item, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_module_set_prices_to_zero() {
        let config = GlobalConfig::default();
        let catalogs = Catalogs::default();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &[],
            config: &config,
            bead_style: None,
        };
        let item = QuoteItem::new(
            1000.0,
            1000.0,
            Composition {
                modules: Vec::new(),
                col_ratios: Vec::new(),
                row_ratios: Vec::new(),
                coupling_deduction_mm: 0.0,
                manual_dims: false,
            },
        );

        assert_eq!(price_composite(&item, &ctx), ItemPricing::zero());
    }

    #[test]
    fn test_two_column_set_adds_one_mullion() {
        // 2×1 set, coupling thickness 40: each module 1480 wide, one
        // mullion cut of the shared height.
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = zero_labor_config();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        let mut item = QuoteItem::new(
            3000.0,
            1200.0,
            Composition {
                modules: vec![
                    MeasurementModule::new(0, 0, "r-1"),
                    MeasurementModule::new(1, 0, "r-1"),
                ],
                col_ratios: vec![1.0, 1.0],
                row_ratios: vec![1.0],
                coupling_deduction_mm: 0.0,
                manual_dims: false,
            },
        );
        item.coupling_profile_id = Some("p-acople".to_string());

        let layout = GridLayout::resolve(&item, &catalogs).unwrap();
        let (w0, _) = layout.module_size(&item.composition.modules[0]);
        assert_eq!(w0, 1480.0);

        let mullions = coupling_cuts(&item, &layout, &ctx);
        assert_eq!(mullions.len(), 1);
        assert_eq!(mullions[0].length_mm, 1200.0);
        assert!((mullions[0].weight_kg - 1.2 * 0.9).abs() < 1e-9);

        // Both modules' frames plus the mullion land in the total weight.
        let pricing = price_composite(&item, &ctx);
        let frame_weight = 2.0 * ((1480.0 + 5.0) / 1000.0 * 4.0 * 1.2);
        let expected = frame_weight + 1.2 * 0.9;
        assert!((pricing.breakdown.total_weight_kg - expected).abs() < 1e-9);
    }

    #[test]
    fn test_tapajuntas_four_sides_scenario() {
        // 1000×1000 item, all sides, trim thickness 30: four 1060 runs.
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = zero_labor_config();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        let mut item = QuoteItem::new(
            1000.0,
            1000.0,
            Composition::single(MeasurementModule::new(0, 0, "r-1")),
        );
        item.extras.tapajuntas = true;

        let layout = GridLayout::resolve(&item, &catalogs).unwrap();
        let cuts = tapajuntas_cuts(&item, &layout, &ctx);
        assert_eq!(cuts.len(), 4);
        for cut in &cuts {
            assert_eq!(cut.length_mm, 1060.0);
            assert_eq!(cut.angle_start, CutAngle::Miter);
            assert_eq!(cut.angle_end, CutAngle::Miter);
        }
        let total: f64 = cuts.iter().map(|c| c.length_mm * c.quantity).sum();
        assert_eq!(total, 4.0 * 1060.0);
    }

    #[test]
    fn test_tapajuntas_partial_sides() {
        // Top inactive: horizontal allowance unchanged, vertical runs
        // lose the top allowance and their top miter.
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = zero_labor_config();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        let mut item = QuoteItem::new(
            1000.0,
            1000.0,
            Composition::single(MeasurementModule::new(0, 0, "r-1")),
        );
        item.extras.tapajuntas = true;
        item.extras.tapajuntas_sides.top = false;

        let layout = GridLayout::resolve(&item, &catalogs).unwrap();
        let cuts = tapajuntas_cuts(&item, &layout, &ctx);
        // bottom + left + right
        assert_eq!(cuts.len(), 3);
        let vertical: Vec<_> = cuts.iter().filter(|c| c.length_mm == 1030.0).collect();
        assert_eq!(vertical.len(), 2);
        assert_eq!(vertical[0].angle_start, CutAngle::Square);
        assert_eq!(vertical[0].angle_end, CutAngle::Miter);
    }

    #[test]
    fn test_set_surplus_over_uneven_rows() {
        // Two rows of different heights beside a second column produce
        // mismatch cuts along the vertical coupling line.
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = zero_labor_config();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        let mut item = QuoteItem::new(
            2000.0,
            1000.0,
            Composition {
                modules: vec![
                    MeasurementModule::new(0, 0, "r-1"),
                    MeasurementModule::new(1, 0, "r-1"),
                ],
                col_ratios: vec![1.0, 1.0],
                row_ratios: vec![1.0],
                coupling_deduction_mm: 0.0,
                manual_dims: false,
            },
        );
        item.extras.tapajuntas = true;
        // Hand-set heights 100mm apart.
        item.composition.modules[0].manual_height_mm = Some(1000.0);
        item.composition.modules[1].manual_height_mm = Some(900.0);

        let layout = GridLayout::resolve(&item, &catalogs).unwrap();
        let cuts = tapajuntas_cuts(&item, &layout, &ctx);
        let surplus: Vec<_> = cuts.iter().filter(|c| c.length_mm == 100.0).collect();
        assert_eq!(surplus.len(), 1);
    }

    #[test]
    fn test_costs_are_non_negative() {
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = GlobalConfig::default();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        // Degenerate negative dimensions still price at >= 0.
        let mut item = QuoteItem::new(
            -500.0,
            0.0,
            Composition::single(MeasurementModule::new(0, 0, "r-1")),
        );
        item.extras.tapajuntas = true;

        let pricing = price_composite(&item, &ctx);
        assert!(pricing.breakdown.alu_cost >= 0.0);
        assert!(pricing.breakdown.glass_cost >= 0.0);
        assert!(pricing.breakdown.acc_cost >= 0.0);
        assert!(pricing.breakdown.labor_cost >= 0.0);
        assert!(pricing.final_price >= 0.0);
    }

    #[test]
    fn test_treatment_surcharge_and_labor() {
        use crate::catalog::Treatment;

        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let treatments = vec![Treatment {
            id: "anodizado".to_string(),
            name: "Anodizado natural".to_string(),
            price_kg: 2.5,
        }];
        let catalogs = Catalogs {
            profiles: &profiles,
            treatments: &treatments,
            ..Catalogs::default()
        };
        let config = GlobalConfig {
            labor_pct: 30.0,
            ..zero_labor_config()
        };
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        let mut item = QuoteItem::new(
            1000.0,
            1000.0,
            Composition::single(MeasurementModule::new(0, 0, "r-1")),
        );
        item.treatment_id = Some("anodizado".to_string());

        let pricing = price_composite(&item, &ctx);
        let weight = (1005.0 / 1000.0) * 4.0 * 1.2;
        let alu = weight * (10.0 + 2.5);
        assert!((pricing.breakdown.alu_cost - alu).abs() < 1e-9);
        assert!((pricing.breakdown.labor_cost - alu * 0.30).abs() < 1e-9);
        assert!((pricing.final_price - alu * 1.30).abs() < 1e-9);
    }

    #[test]
    fn test_price_module_matches_single_module_composite() {
        let recipes = vec![frame_recipe("r-1")];
        let profiles = profiles();
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let config = GlobalConfig::default();
        let ctx = PricingContext {
            catalogs: &catalogs,
            recipes: &recipes,
            config: &config,
            bead_style: None,
        };

        let mut module = MeasurementModule::new(0, 0, "r-1");
        module.glazing = Glazing::Single { glass_id: None };
        let item = QuoteItem::new(1000.0, 1000.0, Composition::single(module.clone()));

        let composite = price_composite(&item, &ctx);
        let single = price_module(
            &module,
            &recipes[0],
            1000.0,
            1000.0,
            None,
            &item.extras,
            1,
            &ctx,
        );
        assert_eq!(composite.breakdown, single.breakdown);
        assert_eq!(composite.final_price, single.final_price);
    }
}
