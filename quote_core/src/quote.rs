//! # Quote Data Structures
//!
//! The working data a caller builds per estimate: a `QuoteItem` describes
//! one priced opening (possibly a grid of coupled modules), a `Quote`
//! collects items for a client. Both serialize to plain JSON — that shape
//! is the interchange contract with the persistence and report layers and
//! must round-trip losslessly.
//!
//! Items are transient during live preview: every parameter change
//! rebuilds the item and reprices it from scratch. Nothing in the engine
//! holds state between calls.
//!
//! ## Structure
//!
//! ```text
//! Quote
//! ├── client, timestamps
//! └── items: Vec<QuoteItem>
//!     ├── width/height, treatment, quantity, extras
//!     └── composition
//!         ├── modules: Vec<MeasurementModule>  (grid cells)
//!         └── col/row ratios + coupling deduction
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::GlobalConfig;
use crate::recipe::RecipeAccessory;

/// Glazing selection for one module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Glazing {
    /// A single glass pane
    Single {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        glass_id: Option<String>,
    },
    /// Double glazing: outer glass + chamber + inner glass
    Dvh {
        outer_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inner_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        camera_id: Option<String>,
    },
}

impl Default for Glazing {
    fn default() -> Self {
        Glazing::Single { glass_id: None }
    }
}

/// A horizontal transom subdividing a module's glazed area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransomSpec {
    /// Centerline offset from the module top (mm)
    pub offset_mm: f64,

    /// Transom profile; falls back to the recipe default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,

    /// Cut-length formula override; falls back to the recipe's
    /// transom-template formula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
}

/// Marks one pane of a module as opaque infill instead of glass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlindPane {
    /// Index into the module's pane list (top to bottom)
    pub pane_index: usize,

    /// Specific infill panel; `None` prices at the config fallback rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,

    /// Louvered infill: horizontal slats of this profile replace the
    /// panel entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slat_profile_id: Option<String>,
}

/// One cell of an opening grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementModule {
    /// Grid column, 0-based
    pub x: u32,

    /// Grid row, 0-based
    pub y: u32,

    pub recipe_id: String,

    #[serde(default)]
    pub glazing: Glazing,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transoms: Vec<TransomSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blind_panes: Vec<BlindPane>,

    /// Replaces the recipe's accessory list when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_overrides: Option<Vec<RecipeAccessory>>,

    /// Manual cut width; replaces the ratio-derived value when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_width_mm: Option<f64>,

    /// Manual cut height; replaces the ratio-derived value when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_height_mm: Option<f64>,
}

impl MeasurementModule {
    pub fn new(x: u32, y: u32, recipe_id: impl Into<String>) -> Self {
        MeasurementModule {
            x,
            y,
            recipe_id: recipe_id.into(),
            glazing: Glazing::default(),
            transoms: Vec::new(),
            blind_panes: Vec::new(),
            accessory_overrides: None,
            manual_width_mm: None,
            manual_height_mm: None,
        }
    }

    /// The blind-pane mark for a pane index, if any.
    pub fn blind_pane(&self, pane_index: usize) -> Option<&BlindPane> {
        self.blind_panes.iter().find(|b| b.pane_index == pane_index)
    }
}

/// The module grid of one item plus its sizing rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub modules: Vec<MeasurementModule>,

    /// Relative width of each grid column (normalized by their sum)
    pub col_ratios: Vec<f64>,

    /// Relative height of each grid row (normalized by their sum)
    pub row_ratios: Vec<f64>,

    /// Coupling deduction when no coupling profile is selected (mm)
    #[serde(default)]
    pub coupling_deduction_mm: f64,

    /// Module sizes entered by hand instead of derived from ratios
    #[serde(default)]
    pub manual_dims: bool,
}

impl Composition {
    /// Single module, full-size.
    pub fn single(module: MeasurementModule) -> Self {
        Composition {
            modules: vec![module],
            col_ratios: vec![1.0],
            row_ratios: vec![1.0],
            coupling_deduction_mm: 0.0,
            manual_dims: false,
        }
    }

    /// More than one distinct column or row makes the item a set,
    /// subject to coupling-mullion and trim-surplus rules.
    pub fn is_set(&self) -> bool {
        let distinct = |coords: Vec<u32>| {
            let mut sorted = coords;
            sorted.sort_unstable();
            sorted.dedup();
            sorted.len()
        };
        distinct(self.modules.iter().map(|m| m.x).collect()) > 1
            || distinct(self.modules.iter().map(|m| m.y).collect()) > 1
    }
}

/// Which sides of the opening get perimeter trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimSides {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Default for TrimSides {
    fn default() -> Self {
        TrimSides {
            top: true,
            bottom: true,
            left: true,
            right: true,
        }
    }
}

/// Per-item optional extras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemExtras {
    /// Include mosquito-screen profile lines and mesh
    #[serde(default)]
    pub mosquito: bool,

    /// Add perimeter trim (tapajuntas)
    #[serde(default)]
    pub tapajuntas: bool,

    #[serde(default)]
    pub tapajuntas_sides: TrimSides,
}

/// Cost breakdown of one priced item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CostBreakdown {
    pub alu_cost: f64,
    pub glass_cost: f64,
    pub acc_cost: f64,
    pub labor_cost: f64,
    pub material_cost: f64,
    pub total_weight_kg: f64,
}

/// One priced line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub id: Uuid,

    /// User label (e.g. "Ventana dormitorio")
    #[serde(default)]
    pub label: String,

    /// Total opening width (mm)
    pub width_mm: f64,

    /// Total opening height (mm)
    pub height_mm: f64,

    /// Surface finish applied to all aluminum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_id: Option<String>,

    /// Units of this exact item
    pub quantity: u32,

    pub composition: Composition,

    #[serde(default)]
    pub extras: ItemExtras,

    /// Coupling mullion between grid modules; its thickness becomes the
    /// coupling deduction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupling_profile_id: Option<String>,

    /// Last computed price for one unit
    #[serde(default)]
    pub calculated_cost: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<CostBreakdown>,
}

impl QuoteItem {
    pub fn new(width_mm: f64, height_mm: f64, composition: Composition) -> Self {
        QuoteItem {
            id: Uuid::new_v4(),
            label: String::new(),
            width_mm,
            height_mm,
            treatment_id: None,
            quantity: 1,
            composition,
            extras: ItemExtras::default(),
            coupling_profile_id: None,
            calculated_cost: 0.0,
            breakdown: None,
        }
    }
}

/// A saved collection of quote items for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,

    pub client: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,

    pub items: Vec<QuoteItem>,
}

impl Quote {
    pub fn new(client: impl Into<String>) -> Self {
        let now = Utc::now();
        Quote {
            id: Uuid::new_v4(),
            client: client.into(),
            created: now,
            modified: now,
            items: Vec::new(),
        }
    }

    /// Add an item and update the modified timestamp.
    pub fn add_item(&mut self, item: QuoteItem) -> Uuid {
        let id = item.id;
        self.items.push(item);
        self.touch();
        id
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Aggregate total: Σ(item cost × quantity), tax-inflated, rounded to
    /// whole currency.
    pub fn total(&self, config: &GlobalConfig) -> f64 {
        let net: f64 = self
            .items
            .iter()
            .map(|item| item.calculated_cost * item.quantity as f64)
            .sum();
        (net * (1.0 + config.tax_pct / 100.0)).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_set_detection() {
        let single = Composition::single(MeasurementModule::new(0, 0, "r-1"));
        assert!(!single.is_set());

        let set = Composition {
            modules: vec![
                MeasurementModule::new(0, 0, "r-1"),
                MeasurementModule::new(1, 0, "r-1"),
            ],
            col_ratios: vec![1.0, 1.0],
            row_ratios: vec![1.0],
            coupling_deduction_mm: 0.0,
            manual_dims: false,
        };
        assert!(set.is_set());
    }

    #[test]
    fn test_quote_total_applies_tax_and_rounds() {
        let mut quote = Quote::new("Cliente SA");
        let mut item = QuoteItem::new(
            1000.0,
            1000.0,
            Composition::single(MeasurementModule::new(0, 0, "r-1")),
        );
        item.calculated_cost = 100.0;
        item.quantity = 2;
        quote.add_item(item);

        let config = GlobalConfig {
            tax_pct: 21.0,
            ..GlobalConfig::default()
        };
        assert_eq!(quote.total(&config), 242.0);
    }

    #[test]
    fn test_quote_item_serialization_roundtrip() {
        let mut module = MeasurementModule::new(0, 0, "r-1");
        module.glazing = Glazing::Dvh {
            outer_id: "g-6".to_string(),
            inner_id: Some("g-4".to_string()),
            camera_id: Some("cam-12".to_string()),
        };
        module.transoms.push(TransomSpec {
            offset_mm: 900.0,
            profile_id: None,
            formula: None,
        });
        module.blind_panes.push(BlindPane {
            pane_index: 1,
            panel_id: Some("panel-1".to_string()),
            slat_profile_id: None,
        });

        let item = QuoteItem::new(1200.0, 1500.0, Composition::single(module));
        let json = serde_json::to_string_pretty(&item).unwrap();
        let roundtrip: QuoteItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, roundtrip);
    }

    #[test]
    fn test_glazing_default_is_single() {
        let glazing = Glazing::default();
        assert!(matches!(glazing, Glazing::Single { glass_id: None }));
    }
}
