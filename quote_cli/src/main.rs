//! # Quoting CLI Application
//!
//! Terminal demo of the quoting engine: prices one sliding window from a
//! built-in sample catalog, prints the cost breakdown, and lays the raw
//! material out on stock bars and sheets.
//!
//! ## Status
//!
//! This is the engine demo. The interactive quote editor ships
//! separately, on top of the same `quote_core` API used here.

use std::io::{self, BufRead, Write};

use quote_core::catalog::{
    Accessory, AluminumProfile, Catalogs, Glass, GlazingBeadStyle, GlobalConfig,
};
use quote_core::cutlist::{bar_cuts, sheet_pieces};
use quote_core::optimize::{optimize_bars, optimize_sheets};
use quote_core::pricing::{price_composite, PricingContext};
use quote_core::quote::{Composition, Glazing, MeasurementModule, QuoteItem};
use quote_core::recipe::{CutAngle, OpeningType, ProductRecipe, RecipeAccessory, RecipeProfile};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn sample_profiles() -> Vec<AluminumProfile> {
    vec![
        AluminumProfile::new("p-marco", "MD-104", 0.987, 6000.0, 45.0),
        AluminumProfile::new("p-hoja", "MD-128", 0.731, 6000.0, 32.0),
        AluminumProfile::new("p-tapa", "MD-228", 0.301, 6000.0, 30.0),
        AluminumProfile::new("p-cv-recto", "MD-310", 0.145, 6000.0, 12.0)
            .with_glazing_bead(GlazingBeadStyle::Recto, 3.0, 6.0),
        AluminumProfile::new("p-cv-curvo", "MD-311", 0.152, 6000.0, 12.0)
            .with_glazing_bead(GlazingBeadStyle::Curvo, 3.0, 6.0),
    ]
}

fn sample_glasses() -> Vec<Glass> {
    vec![Glass {
        id: "g-float4".to_string(),
        code: "VID-4".to_string(),
        description: "Float incoloro 4mm".to_string(),
        price_m2: 18.5,
        sheet_width_mm: Some(2250.0),
        sheet_height_mm: Some(1800.0),
    }]
}

fn sample_accessories() -> Vec<Accessory> {
    vec![
        Accessory {
            id: "a-rueda".to_string(),
            code: "AC-12".to_string(),
            description: "Rueda regulable".to_string(),
            unit_price: 1.8,
        },
        Accessory {
            id: "a-felpa".to_string(),
            code: "AC-40".to_string(),
            description: "Felpa 5mm".to_string(),
            unit_price: 0.4,
        },
    ]
}

fn sliding_recipe() -> ProductRecipe {
    let frame = |role: &str, qty: f64, formula: &str| RecipeProfile {
        role: role.to_string(),
        profile_id: Some("p-marco".to_string()),
        glazing_bead_ids: Vec::new(),
        quantity: qty,
        formula: formula.to_string(),
        angle_start: CutAngle::Square,
        angle_end: CutAngle::Square,
    };
    let leaf = |role: &str, qty: f64, formula: &str| RecipeProfile {
        role: role.to_string(),
        profile_id: Some("p-hoja".to_string()),
        glazing_bead_ids: vec!["p-cv-recto".to_string(), "p-cv-curvo".to_string()],
        quantity: qty,
        formula: formula.to_string(),
        angle_start: CutAngle::Square,
        angle_end: CutAngle::Square,
    };

    ProductRecipe {
        id: "r-corrediza-2".to_string(),
        name: "Corrediza 2 hojas".to_string(),
        line: "Módena".to_string(),
        opening: OpeningType::Sliding2,
        profiles: vec![
            frame("Marco superior", 1.0, "W"),
            frame("Marco inferior", 1.0, "W"),
            frame("Marco lateral", 2.0, "H"),
            leaf("Hoja horizontal", 4.0, "W / 2 + 30"),
            leaf("Hoja vertical", 4.0, "H - 64"),
        ],
        accessories: vec![
            RecipeAccessory {
                accessory_id: "a-rueda".to_string(),
                quantity: 4.0,
                linear: false,
                formula: None,
                spacing_mm: None,
                alternative: false,
            },
            RecipeAccessory {
                accessory_id: "a-felpa".to_string(),
                quantity: 4.0,
                linear: true,
                formula: Some("W / 2 + 30".to_string()),
                spacing_mm: None,
                alternative: false,
            },
        ],
        glass_width_formula: "W / 2 - 45".to_string(),
        glass_height_formula: "H - 110".to_string(),
        glass_deduction_w_mm: 0.0,
        glass_deduction_h_mm: 0.0,
        transom_profile_id: None,
        tapajuntas_profile_id: Some("p-tapa".to_string()),
        mosquito_profile_id: None,
        coupling_profile_id: None,
    }
}

fn main() {
    println!("Quoting Engine - Aluminum Openings");
    println!("==================================");
    println!();

    let width_mm = prompt_f64("Opening width (mm) [1500]: ", 1500.0);
    let height_mm = prompt_f64("Opening height (mm) [1100]: ", 1100.0);

    let profiles = sample_profiles();
    let glasses = sample_glasses();
    let accessories = sample_accessories();
    let catalogs = Catalogs {
        profiles: &profiles,
        glasses: &glasses,
        accessories: &accessories,
        ..Catalogs::default()
    };
    let recipes = vec![sliding_recipe()];
    let config = GlobalConfig {
        aluminum_price_kg: 9.8,
        labor_pct: 30.0,
        kerf_mm: 5.0,
        tax_pct: 21.0,
        ..GlobalConfig::default()
    };
    let ctx = PricingContext {
        catalogs: &catalogs,
        recipes: &recipes,
        config: &config,
        bead_style: Some(GlazingBeadStyle::Recto),
    };

    let mut module = MeasurementModule::new(0, 0, "r-corrediza-2");
    module.glazing = Glazing::Single {
        glass_id: Some("g-float4".to_string()),
    };
    let mut item = QuoteItem::new(width_mm, height_mm, Composition::single(module));
    item.label = "V1".to_string();
    item.extras.tapajuntas = true;

    let pricing = price_composite(&item, &ctx);

    println!();
    println!("═══════════════════════════════════════");
    println!("  {} — Corrediza 2 hojas {:.0}×{:.0}", item.label, width_mm, height_mm);
    println!("═══════════════════════════════════════");
    println!();
    println!("Breakdown:");
    println!("  Aluminum:    ${:>10.2}  ({:.2} kg)",
        pricing.breakdown.alu_cost,
        pricing.breakdown.total_weight_kg
    );
    println!("  Glass:       ${:>10.2}", pricing.breakdown.glass_cost);
    println!("  Accessories: ${:>10.2}", pricing.breakdown.acc_cost);
    println!("  Labor:       ${:>10.2}  ({:.0}%)", pricing.breakdown.labor_cost, config.labor_pct);
    println!("  ─────────────────────────");
    println!("  Unit price:  ${:>10.2}", pricing.final_price);
    println!();
    println!("Panes:");
    for pane in &pricing.panes {
        println!("  #{:<2} {:>7.0} × {:<7.0} {}", pane.index, pane.width_mm, pane.height_mm, pane.spec);
    }

    let items = vec![item];

    println!();
    println!("Bar layout (kerf {:.0}mm):", config.kerf_mm);
    for plan in optimize_bars(&bar_cuts(&items, &ctx), &catalogs, config.kerf_mm) {
        println!(
            "  {} — {} bar(s) of {:.0}mm, scrap {:.0}mm",
            plan.code,
            plan.bar_count(),
            plan.stock_length_mm,
            plan.total_scrap_mm()
        );
        for (i, bar) in plan.bars.iter().enumerate() {
            let cuts: Vec<String> = bar.cuts.iter().map(|c| format!("{:.0}", c.length_mm)).collect();
            println!("    bar {}: [{}] rest {:.0}mm", i + 1, cuts.join(", "), bar.scrap_mm);
        }
        for cut in &plan.oversized {
            println!("    OVERSIZED: {:.0}mm ({})", cut.length_mm, cut.origin);
        }
    }

    println!();
    println!("Sheet layout:");
    for plan in optimize_sheets(&sheet_pieces(&items, &ctx), &catalogs, 5.0) {
        println!(
            "  {} — {} sheet(s) of {:.0}×{:.0}",
            plan.spec,
            plan.sheet_count(),
            plan.sheet_width_mm,
            plan.sheet_height_mm
        );
        for (i, sheet) in plan.sheets.iter().enumerate() {
            println!("    sheet {}: {} piece(s)", i + 1, sheet.pieces.len());
            for piece in &sheet.pieces {
                println!(
                    "      {:>5.0}×{:<5.0} at ({:.0}, {:.0}) [{}]",
                    piece.width_mm, piece.height_mm, piece.x_mm, piece.y_mm, piece.origin
                );
            }
        }
    }

    println!();
    println!("JSON Output (for storage/API use):");
    if let Ok(json) = serde_json::to_string_pretty(&pricing.breakdown) {
        println!("{}", json);
    }
}
