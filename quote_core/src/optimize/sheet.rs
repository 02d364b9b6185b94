//! Shelf packing of glass/panel pieces onto stock sheets.
//!
//! Pieces are grouped by their spec text (so two catalog ids describing
//! the same glass share sheets), sorted by area descending, and laid out
//! in shelves: left to right along the current shelf, then a new shelf
//! below, then a new sheet. A fixed margin separates pieces on both axes.
//!
//! Rotation is never attempted; the `rotated` flag exists so layouts can
//! carry it once a rotating packer replaces this one.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalogs;

/// Sheet stock width assumed when the source glass has none.
pub const DEFAULT_SHEET_WIDTH_MM: f64 = 2400.0;

/// Sheet stock height assumed when the source glass has none.
pub const DEFAULT_SHEET_HEIGHT_MM: f64 = 1800.0;

/// One required rectangular piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPiece {
    /// Grouping key and plan heading (e.g. "Float incoloro 4mm")
    pub spec: String,

    pub width_mm: f64,
    pub height_mm: f64,

    /// Originating item code
    pub origin: String,

    /// Source glass, consulted for sheet stock dimensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass_id: Option<String>,
}

impl SheetPiece {
    pub fn area_mm2(&self) -> f64 {
        self.width_mm.max(0.0) * self.height_mm.max(0.0)
    }
}

/// A piece placed on a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub origin: String,

    /// Always false today; see the module docs.
    pub rotated: bool,
}

/// One stock sheet and its placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Sheet {
    pub pieces: Vec<PlacedPiece>,
}

/// Layout plan for one spec group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPlan {
    pub spec: String,
    pub sheet_width_mm: f64,
    pub sheet_height_mm: f64,
    pub sheets: Vec<Sheet>,

    /// Pieces larger than the stock sheet, reported instead of packed.
    pub oversized: Vec<SheetPiece>,
}

impl SheetPlan {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }
}

/// Shelf cursor state for the sheet currently being filled.
struct Shelf {
    x: f64,
    y: f64,
    height: f64,
}

/// Pack pieces onto sheets, one plan per distinct spec string.
pub fn optimize_sheets(pieces: &[SheetPiece], catalogs: &Catalogs, margin_mm: f64) -> Vec<SheetPlan> {
    let margin = margin_mm.max(0.0);
    let mut plans: Vec<SheetPlan> = Vec::new();

    for piece in pieces {
        if piece.width_mm <= 0.0 || piece.height_mm <= 0.0 {
            continue;
        }
        if !plans.iter().any(|p| p.spec == piece.spec) {
            let glass = piece.glass_id.as_deref().and_then(|id| catalogs.glass(id));
            plans.push(SheetPlan {
                spec: piece.spec.clone(),
                sheet_width_mm: glass
                    .and_then(|g| g.sheet_width_mm)
                    .filter(|w| *w > 0.0)
                    .unwrap_or(DEFAULT_SHEET_WIDTH_MM),
                sheet_height_mm: glass
                    .and_then(|g| g.sheet_height_mm)
                    .filter(|h| *h > 0.0)
                    .unwrap_or(DEFAULT_SHEET_HEIGHT_MM),
                sheets: Vec::new(),
                oversized: Vec::new(),
            });
        }
    }

    for plan in &mut plans {
        let mut group: Vec<&SheetPiece> = pieces
            .iter()
            .filter(|p| p.spec == plan.spec && p.width_mm > 0.0 && p.height_mm > 0.0)
            .collect();
        group.sort_by(|a, b| b.area_mm2().total_cmp(&a.area_mm2()));

        let mut shelf = Shelf {
            x: 0.0,
            y: 0.0,
            height: 0.0,
        };

        for piece in group {
            if piece.width_mm > plan.sheet_width_mm || piece.height_mm > plan.sheet_height_mm {
                plan.oversized.push(piece.clone());
                continue;
            }
            if plan.sheets.is_empty() {
                plan.sheets.push(Sheet::default());
            }

            // Current shelf, then a fresh shelf below, then a new sheet.
            if !fits(&shelf, piece, plan) {
                let next_y = shelf.y + shelf.height + margin;
                shelf = Shelf {
                    x: 0.0,
                    y: next_y,
                    height: 0.0,
                };
                if !fits(&shelf, piece, plan) {
                    plan.sheets.push(Sheet::default());
                    shelf = Shelf {
                        x: 0.0,
                        y: 0.0,
                        height: 0.0,
                    };
                }
            }

            let sheet = plan.sheets.last_mut().expect("sheet exists");
            sheet.pieces.push(PlacedPiece {
                x_mm: shelf.x,
                y_mm: shelf.y,
                width_mm: piece.width_mm,
                height_mm: piece.height_mm,
                origin: piece.origin.clone(),
                rotated: false,
            });
            shelf.x += piece.width_mm + margin;
            shelf.height = shelf.height.max(piece.height_mm);
        }
    }

    plans
}

fn fits(shelf: &Shelf, piece: &SheetPiece, plan: &SheetPlan) -> bool {
    shelf.x + piece.width_mm <= plan.sheet_width_mm
        && shelf.y + piece.height_mm <= plan.sheet_height_mm
}
