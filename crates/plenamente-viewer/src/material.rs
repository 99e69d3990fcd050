//! Per-part color state
//!
//! Parts loaded from the same source material must still highlight
//! independently, so every part owns its own entry in the store. An entry's
//! presence marks the part as isolated; isolating again is a no-op.

use std::collections::BTreeMap;

use plenamente_core::Color;
use tracing::debug;

use crate::partition::{PartId, PartMesh};

/// Color state owned by a single part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartMaterial {
    /// Source material index the part was loaded with
    pub source: Option<usize>,
    /// Base color of the source material
    pub source_color: Color,
    /// Color the part is currently drawn with
    pub color: Color,
}

/// Owned color entries, one per part
#[derive(Debug, Clone)]
pub struct MaterialStore {
    entries: BTreeMap<PartId, PartMaterial>,
    default_color: Color,
}

impl MaterialStore {
    pub fn new(default_color: Color) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_color,
        }
    }

    /// Give every part that has no entry yet its own entry in the default
    /// color. Returns how many parts were newly isolated.
    pub fn isolate(&mut self, parts: &[PartMesh]) -> usize {
        let mut isolated = 0;
        for part in parts {
            if self.entries.contains_key(&part.id) {
                continue;
            }
            self.entries.insert(
                part.id,
                PartMaterial {
                    source: part.material,
                    source_color: part.base_color,
                    color: self.default_color,
                },
            );
            isolated += 1;
        }
        if isolated > 0 {
            debug!("Isolated materials for {} parts", isolated);
        }
        isolated
    }

    pub fn is_isolated(&self, id: PartId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: PartId) -> Option<&PartMaterial> {
        self.entries.get(&id)
    }

    /// Current color of a part
    pub fn color(&self, id: PartId) -> Option<Color> {
        self.entries.get(&id).map(|entry| entry.color)
    }

    /// Set one part's color. Returns `false` if the part was never isolated.
    pub fn set_color(&mut self, id: PartId, color: Color) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.color = color;
                true
            }
            None => false,
        }
    }

    /// Put one part back to the default color.
    pub fn reset(&mut self, id: PartId) -> bool {
        self.set_color(id, self.default_color)
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Parts currently drawn in `color`
    pub fn parts_with_color(&self, color: Color) -> impl Iterator<Item = PartId> + '_ {
        self.entries
            .iter()
            .filter(move |(_, entry)| entry.color == color)
            .map(|(id, _)| *id)
    }

    /// Drop every entry, e.g. when a different scene is shown.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
