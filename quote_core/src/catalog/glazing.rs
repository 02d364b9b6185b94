//! Glass-stack thickness estimation and dynamic glazing-bead selection.
//!
//! Supplier catalogs carry thickness as a free-text token inside the
//! description ("Float incoloro 4mm", "Cámara 12mm aluminio"), so the
//! engine parses the first `<n>mm` token rather than requiring a dedicated
//! field. A DVH stack is outer glass + chamber + inner glass.
//!
//! Bead selection: a recipe line may declare a set of candidate bead
//! profiles instead of a fixed one; the one whose glass range contains the
//! computed stack wins, preferring the shop's requested bead style.

use crate::catalog::records::{AluminumProfile, Glass, GlazingBeadStyle};
use crate::catalog::Catalogs;
use crate::quote::Glazing;

/// Assumed glass thickness when the description has no `mm` token.
pub const DEFAULT_GLASS_MM: f64 = 4.0;

/// Assumed chamber thickness when the DVH input has no `mm` token.
pub const DEFAULT_CHAMBER_MM: f64 = 12.0;

/// Parse the first `<digits> mm` token out of free text (case-insensitive,
/// optional whitespace before "mm"). Returns `None` when absent.
pub fn parse_mm_token(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let digits = &text[start..i];

            let mut j = i;
            while j < bytes.len() && (bytes[j] == b' ' || bytes[j] == b'\t') {
                j += 1;
            }
            if j + 1 < bytes.len()
                && bytes[j].eq_ignore_ascii_case(&b'm')
                && bytes[j + 1].eq_ignore_ascii_case(&b'm')
            {
                return digits.parse().ok();
            }
        } else {
            i += 1;
        }
    }

    None
}

/// Thickness of a single glass, from its description text.
pub fn glass_thickness_mm(glass: &Glass) -> f64 {
    parse_mm_token(&glass.description).unwrap_or(DEFAULT_GLASS_MM)
}

/// Chamber thickness of a DVH input, from its detail text.
pub fn chamber_thickness_mm(detail: &str) -> f64 {
    parse_mm_token(detail).unwrap_or(DEFAULT_CHAMBER_MM)
}

/// Total glass-stack thickness for a pane's glazing selection.
///
/// Single pane: the glass thickness. DVH: outer + chamber + inner.
/// Dangling ids fall back to the defaults rather than failing.
pub fn stack_thickness_mm(catalogs: &Catalogs, glazing: &Glazing) -> f64 {
    match glazing {
        Glazing::Single { glass_id } => glass_id
            .as_deref()
            .and_then(|id| catalogs.glass(id))
            .map(glass_thickness_mm)
            .unwrap_or(DEFAULT_GLASS_MM),
        Glazing::Dvh {
            outer_id,
            inner_id,
            camera_id,
        } => {
            let outer = catalogs
                .glass(outer_id)
                .map(glass_thickness_mm)
                .unwrap_or(DEFAULT_GLASS_MM);
            let inner = inner_id
                .as_deref()
                .and_then(|id| catalogs.glass(id))
                .map(glass_thickness_mm)
                .unwrap_or(DEFAULT_GLASS_MM);
            let chamber = camera_id
                .as_deref()
                .and_then(|id| catalogs.dvh_input(id))
                .map(|d| chamber_thickness_mm(&d.detail))
                .unwrap_or(DEFAULT_CHAMBER_MM);
            outer + chamber + inner
        }
    }
}

/// Pick the glazing bead for a computed glass stack from a candidate set.
///
/// Candidates whose range contains the stack and whose style matches the
/// preference win; failing that, any candidate that fits; failing that,
/// `None` (the caller keeps the recipe's statically configured profile).
pub fn resolve_glazing_bead<'a>(
    catalogs: &Catalogs<'a>,
    candidate_ids: &[String],
    stack_mm: f64,
    preferred_style: Option<GlazingBeadStyle>,
) -> Option<&'a AluminumProfile> {
    let fitting: Vec<&AluminumProfile> = candidate_ids
        .iter()
        .filter_map(|id| catalogs.profile(id))
        .filter(|p| p.glazing_bead.map(|b| b.fits(stack_mm)).unwrap_or(false))
        .collect();

    if let Some(style) = preferred_style {
        if let Some(styled) = fitting
            .iter()
            .find(|p| p.glazing_bead.map(|b| b.style == style).unwrap_or(false))
        {
            return Some(styled);
        }
    }

    fitting.first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::records::DvhInput;

    #[test]
    fn test_parse_mm_token() {
        assert_eq!(parse_mm_token("Float incoloro 4mm"), Some(4.0));
        assert_eq!(parse_mm_token("Cámara 12 mm aluminio"), Some(12.0));
        assert_eq!(parse_mm_token("Laminado 3+3 10MM"), Some(10.0));
        assert_eq!(parse_mm_token("sin espesor"), None);
        assert_eq!(parse_mm_token(""), None);
    }

    #[test]
    fn test_glass_thickness_default() {
        let glass = Glass {
            id: "g-1".to_string(),
            code: String::new(),
            description: "Float incoloro".to_string(),
            price_m2: 20.0,
            sheet_width_mm: None,
            sheet_height_mm: None,
        };
        assert_eq!(glass_thickness_mm(&glass), DEFAULT_GLASS_MM);
    }

    fn glass(id: &str, description: &str) -> Glass {
        Glass {
            id: id.to_string(),
            code: String::new(),
            description: description.to_string(),
            price_m2: 0.0,
            sheet_width_mm: None,
            sheet_height_mm: None,
        }
    }

    #[test]
    fn test_dvh_stack_thickness() {
        let glasses = vec![glass("g-out", "Float 6mm"), glass("g-in", "Float 4mm")];
        let dvh_inputs = vec![DvhInput {
            id: "cam-12".to_string(),
            kind: "Cámara".to_string(),
            detail: "Cámara 12mm".to_string(),
            cost: 15.0,
        }];
        let catalogs = Catalogs {
            glasses: &glasses,
            dvh_inputs: &dvh_inputs,
            ..Catalogs::default()
        };

        let glazing = Glazing::Dvh {
            outer_id: "g-out".to_string(),
            inner_id: Some("g-in".to_string()),
            camera_id: Some("cam-12".to_string()),
        };
        assert_eq!(stack_thickness_mm(&catalogs, &glazing), 22.0);
    }

    #[test]
    fn test_dvh_stack_defaults_on_dangling_ids() {
        let catalogs = Catalogs::default();
        let glazing = Glazing::Dvh {
            outer_id: "missing".to_string(),
            inner_id: None,
            camera_id: None,
        };
        // 4 + 12 + 4
        assert_eq!(stack_thickness_mm(&catalogs, &glazing), 20.0);
    }

    #[test]
    fn test_bead_selection_prefers_style_then_fit() {
        let profiles = vec![
            AluminumProfile::new("b-thin", "JQ-10", 0.2, 6000.0, 10.0)
                .with_glazing_bead(GlazingBeadStyle::Curvo, 0.0, 10.0),
            AluminumProfile::new("b-recto", "JQ-22R", 0.25, 6000.0, 14.0)
                .with_glazing_bead(GlazingBeadStyle::Recto, 18.0, 24.0),
            AluminumProfile::new("b-curvo", "JQ-22C", 0.25, 6000.0, 14.0)
                .with_glazing_bead(GlazingBeadStyle::Curvo, 18.0, 24.0),
        ];
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };
        let ids: Vec<String> = profiles.iter().map(|p| p.id.clone()).collect();

        // 22mm stack: the style-matching candidate in range wins.
        let picked =
            resolve_glazing_bead(&catalogs, &ids, 22.0, Some(GlazingBeadStyle::Curvo)).unwrap();
        assert_eq!(picked.id, "b-curvo");

        // No style preference: first fitting candidate.
        let picked = resolve_glazing_bead(&catalogs, &ids, 22.0, None).unwrap();
        assert_eq!(picked.id, "b-recto");

        // Preferred style has no fitting candidate: fall back to any fit.
        let narrowed = vec!["b-thin".to_string(), "b-recto".to_string()];
        let picked =
            resolve_glazing_bead(&catalogs, &narrowed, 22.0, Some(GlazingBeadStyle::Curvo))
                .unwrap();
        assert_eq!(picked.id, "b-recto");

        // Nothing fits: None, caller keeps the static profile.
        assert!(resolve_glazing_bead(&catalogs, &ids, 40.0, None).is_none());
    }
}
