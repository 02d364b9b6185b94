//! # Product Recipes
//!
//! A `ProductRecipe` describes how one fabricable system (a sliding window
//! of a given supplier line, a hinged door, a fixed pane...) turns an
//! opening size into profile cuts, glass formulas, and accessory counts.
//! Recipes are design-time data authored in the excluded recipe editor;
//! the engine only reads them.
//!
//! ## Roles
//!
//! Each profile line carries a free-text role ("Marco", "Hoja",
//! "Travesaño", "Tapajuntas", "Mosquitero", ...). Three roles get special
//! handling during expansion:
//!
//! - the transom role is a template (formula + quantity) for dynamically
//!   added transoms and is never cut as a plain line — at most one per
//!   recipe;
//! - tapajuntas lines are skipped per module (perimeter trim is computed
//!   once per item);
//! - mosquito lines are skipped unless the screen extra is enabled.

use serde::{Deserialize, Serialize};

/// Opening type of a recipe. Sliding families drive the leaf count the
/// pane splitter divides glass width by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OpeningType {
    #[default]
    Fixed,
    Casement,
    Door,
    #[serde(rename = "sliding_2")]
    Sliding2,
    #[serde(rename = "sliding_3")]
    Sliding3,
    #[serde(rename = "sliding_4")]
    Sliding4,
}

impl OpeningType {
    /// Number of sliding leaves the glazed width is split across.
    pub fn leaf_count(&self) -> u32 {
        match self {
            OpeningType::Sliding2 => 2,
            OpeningType::Sliding3 => 3,
            OpeningType::Sliding4 => 4,
            _ => 1,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OpeningType::Fixed => "Paño fijo",
            OpeningType::Casement => "De abrir",
            OpeningType::Door => "Puerta",
            OpeningType::Sliding2 => "Corrediza 2 hojas",
            OpeningType::Sliding3 => "Corrediza 3 hojas",
            OpeningType::Sliding4 => "Corrediza 4 hojas",
        }
    }
}

impl std::fmt::Display for OpeningType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Saw angle at one end of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CutAngle {
    /// Square 90° cut
    #[default]
    #[serde(rename = "90")]
    Square,
    /// 45° mitered cut
    #[serde(rename = "45")]
    Miter,
}

impl CutAngle {
    pub fn degrees(&self) -> u32 {
        match self {
            CutAngle::Square => 90,
            CutAngle::Miter => 45,
        }
    }
}

/// One profile line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeProfile {
    /// Free-text role as authored ("Marco", "Hoja", "Travesaño", ...)
    pub role: String,

    /// Statically configured profile. Stays in effect when no dynamic
    /// glazing-bead candidate fits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,

    /// Candidate glazing-bead profiles, picked dynamically by the
    /// computed glass-stack thickness.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glazing_bead_ids: Vec<String>,

    /// Cuts per item unit (e.g. 4 frame sides, 2 per leaf)
    pub quantity: f64,

    /// Cut-length formula over W/H, in mm
    pub formula: String,

    /// Saw angle at the first end
    #[serde(default)]
    pub angle_start: CutAngle,

    /// Saw angle at the second end
    #[serde(default)]
    pub angle_end: CutAngle,
}

impl RecipeProfile {
    /// Whether this line is the transom template ("Travesaño").
    pub fn is_transom_role(&self) -> bool {
        normalize_role(&self.role).starts_with("traves")
    }

    /// Whether this line is perimeter trim ("Tapajuntas").
    pub fn is_tapajuntas_role(&self) -> bool {
        normalize_role(&self.role).starts_with("tapajunta")
    }

    /// Whether this line belongs to the mosquito screen ("Mosquitero").
    pub fn is_mosquito_role(&self) -> bool {
        normalize_role(&self.role).starts_with("mosquit")
    }
}

/// Lowercase and strip accents so "Travesaño" and "travesano" compare equal.
fn normalize_role(role: &str) -> String {
    role.trim()
        .chars()
        .flat_map(|c| c.to_lowercase())
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// One accessory line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeAccessory {
    pub accessory_id: String,

    /// Units per item (or per meter when `linear`)
    pub quantity: f64,

    /// Priced per linear meter of the formula length
    #[serde(default)]
    pub linear: bool,

    /// Length formula over W/H; required for linear and spaced lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,

    /// Fixed spacing in mm: quantity per ceil(length / spacing) positions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing_mm: Option<f64>,

    /// Alternative lines are listed for the editor but never priced
    #[serde(default)]
    pub alternative: bool,
}

/// A fabricable system definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecipe {
    pub id: String,

    pub name: String,

    /// Supplier system line (e.g. "Módena", "Herrero")
    #[serde(default)]
    pub line: String,

    pub opening: OpeningType,

    /// Ordered profile lines
    pub profiles: Vec<RecipeProfile>,

    /// Accessory lines
    #[serde(default)]
    pub accessories: Vec<RecipeAccessory>,

    /// Glass pane width as a formula over the module W/H
    pub glass_width_formula: String,

    /// Glass pane height as a formula over the module W/H
    pub glass_height_formula: String,

    /// Flat deduction from the computed glass width (mm)
    #[serde(default)]
    pub glass_deduction_w_mm: f64,

    /// Flat deduction from the computed glass height (mm)
    #[serde(default)]
    pub glass_deduction_h_mm: f64,

    /// Default transom profile when a transom spec names none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transom_profile_id: Option<String>,

    /// Profile used for perimeter trim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tapajuntas_profile_id: Option<String>,

    /// Profile the mosquito-screen frame is built from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mosquito_profile_id: Option<String>,

    /// Default coupling mullion between grid modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_profile_id: Option<String>,
}

impl ProductRecipe {
    /// The transom template line, if the recipe declares one.
    pub fn transom_template(&self) -> Option<&RecipeProfile> {
        self.profiles.iter().find(|p| p.is_transom_role())
    }

    /// Resolve a recipe by id out of a catalog slice.
    pub fn find<'a>(recipes: &'a [ProductRecipe], id: &str) -> Option<&'a ProductRecipe> {
        recipes.iter().find(|r| r.id == id)
    }
}
