//! Static element catalog: per-type heights and mounting.
//!
//! The catalog is read-only configuration shipped with the designer. The
//! engine only needs the vertical facts it holds, to work out each element's
//! height band for stacked-cabinet collision.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_ELEMENT_HEIGHT_IN;
use crate::error::LayoutError;
use crate::model::Element;

/// How an element attaches to the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountType {
    /// Stands on the floor.
    #[default]
    Floor,
    /// Hangs on a wall above the floor.
    Wall,
    /// Floor-to-ceiling unit (pantry, oven tower).
    Tall,
}

/// Vertical facts for one catalog type. Heights are in inches.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Height that cannot be changed by the user.
    pub fixed_height: Option<f64>,
    pub default_height: Option<f64>,
    pub min_height: Option<f64>,
    pub mount_height: Option<f64>,
    pub mount_type: MountType,
}

/// Vertical interval `[bottom, top]` an element occupies, in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBand {
    pub bottom: f64,
    pub top: f64,
}

impl HeightBand {
    /// Vertical distance between two bands; zero or negative when they overlap.
    #[must_use]
    pub fn gap_to(&self, other: &HeightBand) -> f64 {
        (other.bottom - self.top).max(self.bottom - other.top)
    }
}

/// Catalog keyed by element type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a JSON object keyed by element type.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::CatalogParse`] for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, LayoutError> {
        serde_json::from_str(raw).map_err(LayoutError::CatalogParse)
    }

    /// Insert or replace the entry for `kind`.
    pub fn insert(&mut self, kind: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(kind.into(), entry);
    }

    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&CatalogEntry> {
        self.entries.get(kind)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Element height: its own override, then the catalog's fixed height,
    /// then the catalog default, then a standard base-cabinet height.
    #[must_use]
    pub fn height_of(&self, element: &Element) -> f64 {
        let entry = self.get(&element.kind);
        element
            .actual_height
            .or_else(|| entry.and_then(|e| e.fixed_height))
            .or_else(|| entry.and_then(|e| e.default_height))
            .unwrap_or(DEFAULT_ELEMENT_HEIGHT_IN)
    }

    /// Distance from the floor to the element's underside.
    #[must_use]
    pub fn mount_height_of(&self, element: &Element) -> f64 {
        element
            .mount_height
            .or_else(|| self.get(&element.kind).and_then(|e| e.mount_height))
            .unwrap_or(0.0)
    }

    #[must_use]
    pub fn height_band(&self, element: &Element) -> HeightBand {
        let bottom = self.mount_height_of(element);
        HeightBand { bottom, top: bottom + self.height_of(element) }
    }

    /// Resolve a requested height for a resize. Fixed-height types ignore the
    /// request; others are raised to their minimum.
    #[must_use]
    pub fn clamp_height(&self, kind: &str, requested: f64) -> f64 {
        let Some(entry) = self.get(kind) else {
            return requested;
        };
        if let Some(fixed) = entry.fixed_height {
            return fixed;
        }
        match entry.min_height {
            Some(min) => requested.max(min),
            None => requested,
        }
    }

    #[must_use]
    pub fn mount_type_of(&self, element: &Element) -> MountType {
        self.get(&element.kind).map(|e| e.mount_type).unwrap_or_default()
    }
}
