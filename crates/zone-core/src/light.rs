//! Light propagation seam
//!
//! The zone does not compute light itself. A [`LightPropagator`] reads the
//! wall grid and writes intensities into the light grid; the zone clears the
//! light grid before each call and clamps the result afterwards.

use serde::{Deserialize, Serialize};

use crate::grid::{Coord, Grid};
use crate::wall::WallState;

/// Parameters forwarded to a propagator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightParams {
    /// Number of tiles light travels from the origin
    pub range: f32,
    /// How strongly light bends around corners
    pub dispersion: f32,
    /// Ambient darkness applied to lit tiles
    pub darkness: f32,
}

impl Default for LightParams {
    fn default() -> Self {
        Self {
            range: 8.0,
            dispersion: 0.5,
            darkness: 0.0,
        }
    }
}

/// External light propagation algorithm
///
/// Implementations write non-negative intensities; `0` means "not currently
/// visible". The light grid arrives zeroed.
pub trait LightPropagator {
    fn propagate(
        &mut self,
        walls: &Grid<WallState>,
        light: &mut Grid<f32>,
        origin: Coord,
        params: LightParams,
    );
}

impl<F> LightPropagator for F
where
    F: FnMut(&Grid<WallState>, &mut Grid<f32>, Coord, LightParams),
{
    fn propagate(
        &mut self,
        walls: &Grid<WallState>,
        light: &mut Grid<f32>,
        origin: Coord,
        params: LightParams,
    ) {
        self(walls, light, origin, params)
    }
}

/// Clamp an intensity into the stored range
pub(crate) fn sanitize(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
