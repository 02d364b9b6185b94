//! # Material Catalogs
//!
//! Catalog records and lookup helpers. Catalogs are owned by the caller
//! (the excluded CRUD/import layer authors them); the engine only reads
//! them, resolving ids on every recalculation.
//!
//! ## Lookup policy
//!
//! Live editing routinely leaves transiently-dangling ids behind, so every
//! lookup returns `Option` and a miss means "skip this line's
//! contribution" — never an error out of the pricing pipeline.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::catalog::{AluminumProfile, Catalogs};
//!
//! let profiles = vec![AluminumProfile::new("p-1", "AL-100", 1.2, 6000.0, 40.0)];
//! let catalogs = Catalogs {
//!     profiles: &profiles,
//!     ..Catalogs::default()
//! };
//!
//! assert!(catalogs.profile("p-1").is_some());
//! assert!(catalogs.profile("gone").is_none());
//! ```

pub mod glazing;
pub mod records;

pub use glazing::{
    chamber_thickness_mm, glass_thickness_mm, parse_mm_token, resolve_glazing_bead,
    stack_thickness_mm, DEFAULT_CHAMBER_MM, DEFAULT_GLASS_MM,
};
pub use records::{
    Accessory, AluminumProfile, BlindPanel, DvhInput, Glass, GlazingBeadSpec, GlazingBeadStyle,
    GlobalConfig, PanelUnit, Treatment,
};

/// Borrowed view over all catalog arrays, passed into every pricing call.
///
/// Lookups are linear scans: catalogs hold tens to a few hundred records,
/// and the engine recomputes from scratch per keystroke anyway.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalogs<'a> {
    pub profiles: &'a [AluminumProfile],
    pub glasses: &'a [Glass],
    pub accessories: &'a [Accessory],
    pub dvh_inputs: &'a [DvhInput],
    pub treatments: &'a [Treatment],
    pub blind_panels: &'a [BlindPanel],
}

impl<'a> Catalogs<'a> {
    /// Resolve an aluminum profile by id.
    pub fn profile(&self, id: &str) -> Option<&'a AluminumProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Resolve a glass by id.
    pub fn glass(&self, id: &str) -> Option<&'a Glass> {
        self.glasses.iter().find(|g| g.id == id)
    }

    /// Resolve an accessory by id.
    pub fn accessory(&self, id: &str) -> Option<&'a Accessory> {
        self.accessories.iter().find(|a| a.id == id)
    }

    /// Resolve a DVH input (chamber, spacer, ...) by id.
    pub fn dvh_input(&self, id: &str) -> Option<&'a DvhInput> {
        self.dvh_inputs.iter().find(|d| d.id == id)
    }

    /// Resolve a surface treatment by id.
    pub fn treatment(&self, id: &str) -> Option<&'a Treatment> {
        self.treatments.iter().find(|t| t.id == id)
    }

    /// Resolve a blind infill panel by id.
    pub fn blind_panel(&self, id: &str) -> Option<&'a BlindPanel> {
        self.blind_panels.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_hit_and_miss() {
        let profiles = vec![AluminumProfile::new("p-1", "AL-100", 1.2, 6000.0, 40.0)];
        let catalogs = Catalogs {
            profiles: &profiles,
            ..Catalogs::default()
        };

        assert_eq!(catalogs.profile("p-1").unwrap().code, "AL-100");
        assert!(catalogs.profile("p-2").is_none());
        assert!(catalogs.glass("anything").is_none());
    }
}
