//! Local terrain signatures compared during sensing.

use wayfinder_core::{GridDimensions, Position, TerrainKind, TerrainView};

/// Number of cells sensed on each side of the centre cell.
pub const SENSOR_RADIUS: i64 = 3;

const WINDOW_SIDE: usize = 7;
const WINDOW_CELLS: usize = WINDOW_SIDE * WINDOW_SIDE;

/// Terrain kinds inside the 7×7 window centred on a cell.
///
/// Offsets wrap around the torus, so every window is fully populated even on
/// grids smaller than the window itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    kinds: [TerrainKind; WINDOW_CELLS],
}

impl Fingerprint {
    /// Reads the window around `centre`, scanning `dx` then `dy` from `-3` to `3`.
    #[must_use]
    pub fn capture(terrain: TerrainView<'_>, centre: Position) -> Self {
        let mut kinds = [TerrainKind::Open; WINDOW_CELLS];
        let offsets = (-SENSOR_RADIUS..=SENSOR_RADIUS)
            .flat_map(|dx| (-SENSOR_RADIUS..=SENSOR_RADIUS).map(move |dy| (dx, dy)));

        for (slot, (dx, dy)) in kinds.iter_mut().zip(offsets) {
            *slot = terrain.kind_wrapped(i64::from(centre.x()) + dx, i64::from(centre.y()) + dy);
        }

        Self { kinds }
    }
}

/// Fingerprints of every cell, rebuilt whenever the terrain revision changes.
#[derive(Debug, Default)]
pub(crate) struct FingerprintCache {
    key: Option<(u64, GridDimensions)>,
    prints: Vec<Fingerprint>,
}

impl FingerprintCache {
    pub(crate) fn refresh(&mut self, terrain: TerrainView<'_>) -> &[Fingerprint] {
        let key = (terrain.revision(), terrain.dimensions());
        if self.key != Some(key) {
            self.prints.clear();
            self.prints.extend(
                terrain
                    .dimensions()
                    .positions()
                    .map(|position| Fingerprint::capture(terrain, position)),
            );
            self.key = Some(key);
        }

        &self.prints
    }
}
