//! Catalog record types.
//!
//! Plain JSON-serializable records, mirroring what the catalog editor and
//! spreadsheet importer persist. All prices are in the shop's currency; all
//! dimensions are millimeters unless the field name says otherwise.

use serde::{Deserialize, Serialize};

/// An extruded aluminum profile (frame, sash, transom, glazing bead, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AluminumProfile {
    pub id: String,

    /// Supplier code (e.g., "MD-228")
    pub code: String,

    #[serde(default)]
    pub description: String,

    /// Linear weight in kg/m — drives aluminum cost
    pub weight_kg_m: f64,

    /// Commercial bar stock length in mm (typically 6000 or 6500)
    pub bar_length_mm: f64,

    /// Profile thickness in mm. Drives coupling deductions, miter
    /// geometry, slat pitch, and transom pane carving.
    pub thickness_mm: f64,

    /// Present only on glazing-bead profiles: which glass stacks this
    /// bead clips over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glazing_bead: Option<GlazingBeadSpec>,
}

impl AluminumProfile {
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        weight_kg_m: f64,
        bar_length_mm: f64,
        thickness_mm: f64,
    ) -> Self {
        AluminumProfile {
            id: id.into(),
            code: code.into(),
            description: String::new(),
            weight_kg_m,
            bar_length_mm,
            thickness_mm,
            glazing_bead: None,
        }
    }

    /// Attach glazing-bead metadata (builder style).
    pub fn with_glazing_bead(mut self, style: GlazingBeadStyle, min_mm: f64, max_mm: f64) -> Self {
        self.glazing_bead = Some(GlazingBeadSpec {
            style,
            min_glass_mm: min_mm,
            max_glass_mm: max_mm,
        });
        self
    }
}

/// Glazing-bead fit data carried on bead profiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlazingBeadSpec {
    pub style: GlazingBeadStyle,

    /// Thinnest glass stack this bead accepts (mm)
    pub min_glass_mm: f64,

    /// Thickest glass stack this bead accepts (mm)
    pub max_glass_mm: f64,
}

impl GlazingBeadSpec {
    /// Whether a computed glass-stack thickness fits this bead.
    pub fn fits(&self, stack_mm: f64) -> bool {
        stack_mm >= self.min_glass_mm && stack_mm <= self.max_glass_mm
    }
}

/// Glazing-bead section style, as named in supplier catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GlazingBeadStyle {
    /// Straight bead
    #[default]
    #[serde(rename = "Recto")]
    Recto,
    /// Curved bead
    #[serde(rename = "Curvo")]
    Curvo,
}

impl std::fmt::Display for GlazingBeadStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlazingBeadStyle::Recto => write!(f, "Recto"),
            GlazingBeadStyle::Curvo => write!(f, "Curvo"),
        }
    }
}

/// A glass product. The description doubles as the spec text the sheet
/// optimizer groups by, and carries the `<n>mm` thickness token (e.g.
/// "Float incoloro 4mm").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glass {
    pub id: String,

    #[serde(default)]
    pub code: String,

    pub description: String,

    /// Price per square meter
    pub price_m2: f64,

    /// Supplier sheet stock width, when known (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_width_mm: Option<f64>,

    /// Supplier sheet stock height, when known (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_height_mm: Option<f64>,
}

/// An opaque infill panel for blind panes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindPanel {
    pub id: String,

    pub description: String,

    /// Price per unit (see `unit`)
    pub price: f64,

    /// Pricing unit: per square meter or per linear meter
    pub unit: PanelUnit,
}

/// Blind-panel pricing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PanelUnit {
    /// Priced per square meter of pane area
    #[default]
    #[serde(rename = "m2")]
    M2,
    /// Priced per linear meter along the pane width
    #[serde(rename = "ml")]
    Ml,
}

/// Hardware and consumables (handles, rollers, wheels, screws, brush seal...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessory {
    pub id: String,

    #[serde(default)]
    pub code: String,

    pub description: String,

    /// Price per unit, or per meter for linear accessories
    pub unit_price: f64,
}

/// A double-glazing (DVH) assembly input: chamber/spacer, sealant, etc.
/// The detail text carries the `<n>mm` token for chamber inputs
/// (e.g. "Cámara 12mm aluminio").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DvhInput {
    pub id: String,

    /// Input kind; chamber inputs are kind "Cámara"
    pub kind: String,

    #[serde(default)]
    pub detail: String,

    /// Cost per square meter of the assembled unit
    pub cost: f64,
}

/// A surface finish (anodized, painted) priced per kg of aluminum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treatment {
    pub id: String,

    pub name: String,

    /// Surcharge per kg over the base aluminum price
    pub price_kg: f64,
}

/// Shop-wide pricing and machine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Base aluminum price per kg
    pub aluminum_price_kg: f64,

    /// Labor markup over material cost, percent
    pub labor_pct: f64,

    /// Saw blade (kerf) width in mm, added to every profile cut
    pub kerf_mm: f64,

    /// Tax applied on quote totals, percent
    pub tax_pct: f64,

    /// Price per m² for blind panes with no specific panel selected
    #[serde(default)]
    pub fallback_panel_price_m2: f64,

    /// Mosquito mesh price per m², applied when the screen extra is on
    #[serde(default)]
    pub mesh_price_m2: f64,

    /// Extra glass deduction per transom edge when carving panes (mm)
    #[serde(default)]
    pub transom_glass_deduction_mm: f64,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        GlobalConfig {
            aluminum_price_kg: 10.0,
            labor_pct: 30.0,
            kerf_mm: 5.0,
            tax_pct: 21.0,
            fallback_panel_price_m2: 0.0,
            mesh_price_m2: 0.0,
            transom_glass_deduction_mm: 2.0,
        }
    }
}
