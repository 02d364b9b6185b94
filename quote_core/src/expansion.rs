//! # Recipe Expansion Engine
//!
//! Expands one module's recipe against its resolved cut dimensions into
//! the concrete bill of materials: profile cuts (with role filtering and
//! dynamic glazing-bead selection), transom cuts, pane rectangles (split
//! by transoms and sliding leaves, with blind/louvered infill resolution),
//! and accessory quantities.
//!
//! Money for glass, panels, and accessories is computed here so the price
//! aggregator and the cut-list reports walk the exact same math and always
//! reconcile.
//!
//! ## Failure policy
//!
//! Dangling catalog references and zero-length formulas silently skip
//! their line — partially-configured recipes must keep previewing.

use serde::{Deserialize, Serialize};

use crate::catalog::{
    resolve_glazing_bead, stack_thickness_mm, AluminumProfile, Catalogs, GlazingBeadStyle,
    GlobalConfig, PanelUnit,
};
use crate::formula::evaluate;
use crate::quote::{Glazing, ItemExtras, MeasurementModule, TransomSpec};
use crate::recipe::{CutAngle, ProductRecipe, RecipeAccessory, RecipeProfile};

/// Role label attached to dynamically generated louver slat cuts.
pub const SLAT_ROLE: &str = "Tablilla";

/// Role label attached to transom cuts.
pub const TRANSOM_ROLE: &str = "Travesaño";

/// Shared read-only inputs for expansion.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionContext<'a> {
    pub catalogs: &'a Catalogs<'a>,
    pub config: &'a GlobalConfig,

    /// Shop preference for glazing-bead style, fed to dynamic selection
    pub bead_style: Option<GlazingBeadStyle>,
}

/// One profile cut line of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileCut {
    pub profile_id: String,

    /// Supplier code, for cut sheets
    pub code: String,

    /// Role the cut came from ("Marco", "Travesaño", "Tablilla", ...)
    pub role: String,

    /// Cut length including the saw kerf (mm)
    pub length_mm: f64,

    /// Number of identical cuts
    pub quantity: f64,

    pub angle_start: CutAngle,
    pub angle_end: CutAngle,

    /// Total aluminum weight of all `quantity` cuts (kg)
    pub weight_kg: f64,
}

/// What fills a pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PaneInfill {
    /// Glass per the module's glazing selection
    Glazed,
    /// Opaque panel (specific or fallback-priced)
    Panel {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        panel_id: Option<String>,
    },
    /// Horizontal louver slats; priced as aluminum, not as a panel
    Slats { profile_id: String },
}

/// One pane rectangle of a module's glazed area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pane {
    /// Row-major index (top row first, then left to right)
    pub index: usize,

    pub width_mm: f64,
    pub height_mm: f64,

    pub infill: PaneInfill,

    /// Human spec string; the sheet optimizer groups by it
    pub spec: String,

    /// Source glass id (outer glass for DVH) — carries sheet stock dims
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass_id: Option<String>,
}

impl Pane {
    pub fn area_m2(&self) -> f64 {
        (self.width_mm.max(0.0) * self.height_mm.max(0.0)) / 1_000_000.0
    }
}

/// One resolved accessory line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryLine {
    pub accessory_id: String,
    pub description: String,
    pub quantity: f64,
    pub cost: f64,
}

/// Everything one module expands to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModuleExpansion {
    pub cuts: Vec<ProfileCut>,
    pub panes: Vec<Pane>,
    pub accessories: Vec<AccessoryLine>,

    /// Glass + panel money (mesh included when the screen extra is on)
    pub glass_cost: f64,

    /// Accessory money
    pub acc_cost: f64,
}

impl ModuleExpansion {
    /// Total aluminum weight across all cuts (kg).
    pub fn alu_weight_kg(&self) -> f64 {
        self.cuts.iter().map(|c| c.weight_kg).sum()
    }
}

/// Expand one module. `width_mm`/`height_mm` are the effective cut
/// dimensions from the geometry resolver; `item_qty` multiplies every
/// quantity and cost.
pub fn expand_module(
    module: &MeasurementModule,
    recipe: &ProductRecipe,
    width_mm: f64,
    height_mm: f64,
    extras: &ItemExtras,
    item_qty: u32,
    ctx: &ExpansionContext,
) -> ModuleExpansion {
    let mut out = ModuleExpansion::default();
    let qty = item_qty as f64;
    let stack_mm = stack_thickness_mm(ctx.catalogs, &module.glazing);

    expand_profiles(recipe, width_mm, height_mm, extras, qty, stack_mm, ctx, &mut out);
    expand_transoms(module, recipe, width_mm, height_mm, qty, ctx, &mut out);
    expand_panes(module, recipe, width_mm, height_mm, qty, ctx, &mut out);
    if extras.mosquito {
        // Mesh priced by module face area at the shop rate.
        let area_m2 = (width_mm.max(0.0) * height_mm.max(0.0)) / 1_000_000.0;
        out.acc_cost += area_m2 * ctx.config.mesh_price_m2 * qty;
    }
    expand_accessories(module, recipe, width_mm, height_mm, qty, ctx, &mut out);

    out
}

/// Push one cut, deriving its weight from the profile's linear weight.
fn push_cut(
    out: &mut ModuleExpansion,
    profile: &AluminumProfile,
    role: &str,
    length_mm: f64,
    quantity: f64,
    angle_start: CutAngle,
    angle_end: CutAngle,
) {
    if length_mm <= 0.0 || quantity <= 0.0 {
        return;
    }
    out.cuts.push(ProfileCut {
        profile_id: profile.id.clone(),
        code: profile.code.clone(),
        role: role.to_string(),
        length_mm,
        quantity,
        angle_start,
        angle_end,
        weight_kg: (length_mm / 1000.0) * profile.weight_kg_m * quantity,
    });
}

#[allow(clippy::too_many_arguments)]
fn expand_profiles(
    recipe: &ProductRecipe,
    width_mm: f64,
    height_mm: f64,
    extras: &ItemExtras,
    qty: f64,
    stack_mm: f64,
    ctx: &ExpansionContext,
    out: &mut ModuleExpansion,
) {
    for line in &recipe.profiles {
        // The transom line is a template, never cut directly.
        if line.is_transom_role() {
            continue;
        }
        // Perimeter trim is computed once per item, not per module.
        if line.is_tapajuntas_role() || matches_default(line, &recipe.tapajuntas_profile_id) {
            continue;
        }
        if !extras.mosquito
            && (line.is_mosquito_role() || matches_default(line, &recipe.mosquito_profile_id))
        {
            continue;
        }

        let Some(profile) = resolve_line_profile(line, stack_mm, ctx) else {
            continue;
        };

        let length = evaluate(&line.formula, width_mm, height_mm);
        if length <= 0.0 {
            continue;
        }
        push_cut(
            out,
            profile,
            &line.role,
            length + ctx.config.kerf_mm,
            line.quantity * qty,
            line.angle_start,
            line.angle_end,
        );
    }
}

/// `true` when the line's static profile is the recipe's default for a
/// centrally handled role (trim, mosquito).
fn matches_default(line: &RecipeProfile, default_id: &Option<String>) -> bool {
    match (&line.profile_id, default_id) {
        (Some(line_id), Some(default)) => line_id == default,
        _ => false,
    }
}

/// Resolve a line's profile: dynamic glazing-bead candidates first (by
/// glass-stack fit and style preference), then the static profile.
fn resolve_line_profile<'a>(
    line: &RecipeProfile,
    stack_mm: f64,
    ctx: &ExpansionContext<'a>,
) -> Option<&'a AluminumProfile> {
    if !line.glazing_bead_ids.is_empty() {
        if let Some(bead) =
            resolve_glazing_bead(ctx.catalogs, &line.glazing_bead_ids, stack_mm, ctx.bead_style)
        {
            return Some(bead);
        }
    }
    line.profile_id
        .as_deref()
        .and_then(|id| ctx.catalogs.profile(id))
}

fn expand_transoms(
    module: &MeasurementModule,
    recipe: &ProductRecipe,
    width_mm: f64,
    height_mm: f64,
    qty: f64,
    ctx: &ExpansionContext,
    out: &mut ModuleExpansion,
) {
    if module.transoms.is_empty() {
        return;
    }
    let template = recipe.transom_template();
    let template_qty = template.map(|t| t.quantity).unwrap_or(1.0);

    for transom in &module.transoms {
        let Some(profile) = transom_profile(transom, recipe, ctx) else {
            continue;
        };
        let formula = transom
            .formula
            .as_deref()
            .or(template.map(|t| t.formula.as_str()))
            .unwrap_or("");
        let length = evaluate(formula, width_mm, height_mm);
        if length <= 0.0 {
            continue;
        }
        push_cut(
            out,
            profile,
            TRANSOM_ROLE,
            length + ctx.config.kerf_mm,
            template_qty * qty,
            CutAngle::Square,
            CutAngle::Square,
        );
    }
}

fn transom_profile<'a>(
    transom: &TransomSpec,
    recipe: &ProductRecipe,
    ctx: &ExpansionContext<'a>,
) -> Option<&'a AluminumProfile> {
    transom
        .profile_id
        .as_deref()
        .or(recipe.transom_profile_id.as_deref())
        .and_then(|id| ctx.catalogs.profile(id))
}

fn expand_panes(
    module: &MeasurementModule,
    recipe: &ProductRecipe,
    width_mm: f64,
    height_mm: f64,
    qty: f64,
    ctx: &ExpansionContext,
    out: &mut ModuleExpansion,
) {
    let glass_w =
        evaluate(&recipe.glass_width_formula, width_mm, height_mm) - recipe.glass_deduction_w_mm;
    let glass_h =
        evaluate(&recipe.glass_height_formula, width_mm, height_mm) - recipe.glass_deduction_h_mm;
    if glass_w <= 0.0 || glass_h <= 0.0 {
        return;
    }

    let leaves = recipe.opening.leaf_count().max(1);
    let leaf_w = glass_w / leaves as f64;
    let row_heights = pane_row_heights(module, recipe, glass_h, ctx);

    let (spec, glass_id) = glazing_spec(&module.glazing, ctx.catalogs);

    let mut index = 0usize;
    for row_h in row_heights {
        for _leaf in 0..leaves {
            if row_h <= 0.0 || leaf_w <= 0.0 {
                index += 1;
                continue;
            }
            let pane = build_pane(module, index, leaf_w, row_h, &spec, &glass_id, ctx);
            out.glass_cost += pane_cost(&pane, module, ctx) * qty;
            if let PaneInfill::Slats { ref profile_id } = pane.infill {
                push_slat_cuts(&pane, profile_id, qty, ctx, out);
            }
            out.panes.push(pane);
            index += 1;
        }
    }
}

/// Carve the glazed height into stacked rows between transom centerlines.
///
/// Each row loses half the thickness of every adjacent transom plus one
/// configured deduction per transom edge. No transoms: a single row.
fn pane_row_heights(
    module: &MeasurementModule,
    recipe: &ProductRecipe,
    glass_h: f64,
    ctx: &ExpansionContext,
) -> Vec<f64> {
    if module.transoms.is_empty() {
        return vec![glass_h];
    }

    let mut offsets: Vec<(f64, f64)> = module
        .transoms
        .iter()
        .filter(|t| t.offset_mm > 0.0 && t.offset_mm < glass_h)
        .map(|t| (t.offset_mm, transom_thickness(t, recipe, ctx)))
        .collect();
    offsets.sort_by(|a, b| a.0.total_cmp(&b.0));

    if offsets.is_empty() {
        return vec![glass_h];
    }

    let deduction = ctx.config.transom_glass_deduction_mm;
    let mut rows = Vec::with_capacity(offsets.len() + 1);
    let mut prev_edge = 0.0;
    let mut prev_half = 0.0; // half-thickness eaten at the row's top edge

    for &(offset, thickness) in &offsets {
        let gap = offset - prev_edge;
        let top_cut = if prev_half > 0.0 { prev_half + deduction } else { 0.0 };
        rows.push((gap - top_cut - thickness / 2.0 - deduction).max(0.0));
        prev_edge = offset;
        prev_half = thickness / 2.0;
    }
    let gap = glass_h - prev_edge;
    rows.push((gap - prev_half - deduction).max(0.0));

    rows
}

fn transom_thickness(
    transom: &TransomSpec,
    recipe: &ProductRecipe,
    ctx: &ExpansionContext,
) -> f64 {
    transom
        .profile_id
        .as_deref()
        .or(recipe.transom_profile_id.as_deref())
        .and_then(|id| ctx.catalogs.profile(id))
        .map(|p| p.thickness_mm)
        .unwrap_or(0.0)
}

fn build_pane(
    module: &MeasurementModule,
    index: usize,
    width_mm: f64,
    height_mm: f64,
    glazed_spec: &str,
    glass_id: &Option<String>,
    ctx: &ExpansionContext,
) -> Pane {
    match module.blind_pane(index) {
        Some(mark) => {
            if let Some(slat_id) = mark
                .slat_profile_id
                .as_deref()
                .filter(|id| ctx.catalogs.profile(id).is_some())
            {
                let code = ctx
                    .catalogs
                    .profile(slat_id)
                    .map(|p| p.code.clone())
                    .unwrap_or_default();
                Pane {
                    index,
                    width_mm,
                    height_mm,
                    infill: PaneInfill::Slats {
                        profile_id: slat_id.to_string(),
                    },
                    spec: format!("Tablillas {code}"),
                    glass_id: None,
                }
            } else {
                let spec = mark
                    .panel_id
                    .as_deref()
                    .and_then(|id| ctx.catalogs.blind_panel(id))
                    .map(|p| p.description.clone())
                    .unwrap_or_else(|| "Panel ciego".to_string());
                Pane {
                    index,
                    width_mm,
                    height_mm,
                    infill: PaneInfill::Panel {
                        panel_id: mark.panel_id.clone(),
                    },
                    spec,
                    glass_id: None,
                }
            }
        }
        None => Pane {
            index,
            width_mm,
            height_mm,
            infill: PaneInfill::Glazed,
            spec: glazed_spec.to_string(),
            glass_id: glass_id.clone(),
        },
    }
}

/// Spec string and source glass id for the module's glazing selection.
fn glazing_spec(glazing: &Glazing, catalogs: &Catalogs) -> (String, Option<String>) {
    match glazing {
        Glazing::Single { glass_id } => {
            let spec = glass_id
                .as_deref()
                .and_then(|id| catalogs.glass(id))
                .map(|g| g.description.clone())
                .unwrap_or_else(|| "Vidrio".to_string());
            (spec, glass_id.clone())
        }
        Glazing::Dvh {
            outer_id,
            inner_id,
            camera_id,
        } => {
            let name = |id: &str| {
                catalogs
                    .glass(id)
                    .map(|g| g.description.clone())
                    .unwrap_or_else(|| id.to_string())
            };
            let chamber = camera_id
                .as_deref()
                .and_then(|id| catalogs.dvh_input(id))
                .map(|d| d.detail.clone())
                .unwrap_or_else(|| "Cámara".to_string());
            let inner = inner_id.as_deref().map(name).unwrap_or_default();
            (
                format!("DVH {} / {} / {}", name(outer_id), chamber, inner),
                Some(outer_id.clone()),
            )
        }
    }
}

/// Money for one pane (per item unit). Slat panes cost nothing here —
/// their aluminum is priced through the cut list.
fn pane_cost(pane: &Pane, module: &MeasurementModule, ctx: &ExpansionContext) -> f64 {
    let area = pane.area_m2();
    match &pane.infill {
        PaneInfill::Slats { .. } => 0.0,
        PaneInfill::Panel { panel_id } => match panel_id
            .as_deref()
            .and_then(|id| ctx.catalogs.blind_panel(id))
        {
            Some(panel) => match panel.unit {
                PanelUnit::M2 => panel.price * area,
                PanelUnit::Ml => panel.price * pane.width_mm.max(0.0) / 1000.0,
            },
            None => ctx.config.fallback_panel_price_m2 * area,
        },
        PaneInfill::Glazed => match &module.glazing {
            Glazing::Single { glass_id } => glass_id
                .as_deref()
                .and_then(|id| ctx.catalogs.glass(id))
                .map(|g| g.price_m2 * area)
                .unwrap_or(0.0),
            Glazing::Dvh {
                outer_id,
                inner_id,
                camera_id,
            } => {
                let outer = ctx
                    .catalogs
                    .glass(outer_id)
                    .map(|g| g.price_m2)
                    .unwrap_or(0.0);
                let inner = inner_id
                    .as_deref()
                    .and_then(|id| ctx.catalogs.glass(id))
                    .map(|g| g.price_m2)
                    .unwrap_or(0.0);
                let chamber = camera_id
                    .as_deref()
                    .and_then(|id| ctx.catalogs.dvh_input(id))
                    .map(|d| d.cost)
                    .unwrap_or(0.0);
                (outer + inner + chamber) * area
            }
        },
    }
}

/// Louvered pane: ceil(height / slat thickness) horizontal slats.
fn push_slat_cuts(
    pane: &Pane,
    profile_id: &str,
    qty: f64,
    ctx: &ExpansionContext,
    out: &mut ModuleExpansion,
) {
    let Some(profile) = ctx.catalogs.profile(profile_id) else {
        return;
    };
    if profile.thickness_mm <= 0.0 {
        return;
    }
    let slats = (pane.height_mm / profile.thickness_mm).ceil();
    push_cut(
        out,
        profile,
        SLAT_ROLE,
        pane.width_mm + ctx.config.kerf_mm,
        slats * qty,
        CutAngle::Square,
        CutAngle::Square,
    );
}

fn expand_accessories(
    module: &MeasurementModule,
    recipe: &ProductRecipe,
    width_mm: f64,
    height_mm: f64,
    qty: f64,
    ctx: &ExpansionContext,
    out: &mut ModuleExpansion,
) {
    let lines: &[RecipeAccessory] = module
        .accessory_overrides
        .as_deref()
        .unwrap_or(&recipe.accessories);

    for line in lines {
        if line.alternative {
            continue;
        }
        let Some(accessory) = ctx.catalogs.accessory(&line.accessory_id) else {
            continue;
        };

        let length = line
            .formula
            .as_deref()
            .map(|f| evaluate(f, width_mm, height_mm))
            .unwrap_or(0.0);

        let units = match line.spacing_mm {
            Some(spacing) if spacing > 0.0 && length > 0.0 => {
                (length / spacing).ceil() * line.quantity
            }
            _ if line.linear => line.quantity * (length.max(0.0) / 1000.0),
            _ => line.quantity,
        };
        let units = units * qty;
        if units <= 0.0 {
            continue;
        }

        out.accessories.push(AccessoryLine {
            accessory_id: accessory.id.clone(),
            description: accessory.description.clone(),
            quantity: units,
            cost: units * accessory.unit_price,
        });
    }
    out.acc_cost += out.accessories.iter().map(|a| a.cost).sum::<f64>();
}
