//! Falling fragments cut off by placements.
//!
//! Each chopped slice drops away and slides outwards along the axis it was
//! cut on, then disappears. The field is a fixed-capacity ring so the per-tick
//! path never allocates.

use arrayvec::ArrayVec;

use crate::core::BoxGeometry;
use crate::types::{Axis, DEBRIS_DROP, DEBRIS_LIFETIME_MS, DEBRIS_SLIDE_FACTOR};

/// Upper bound on fragments in flight; the oldest is dropped when full.
pub const MAX_DEBRIS: usize = 32;

/// Ease-in quadratic on `t` in `[0, 1]`.
fn ease_in(t: f64) -> f64 {
    t * t
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Debris {
    origin: BoxGeometry,
    axis: Axis,
    /// Signed total slide along `axis`.
    slide: f64,
    age_ms: u32,
}

impl Debris {
    /// A fragment cut from `placed` along `axis` by a block moving at `direction`.
    pub fn new(chopped: BoxGeometry, placed: &BoxGeometry, axis: Axis, direction: f64) -> Self {
        let outward = if chopped.min(axis) > placed.min(axis) {
            1.0
        } else {
            -1.0
        };
        Self {
            origin: chopped,
            axis,
            slide: outward * DEBRIS_SLIDE_FACTOR * direction.abs(),
            age_ms: 0,
        }
    }

    pub fn expired(&self) -> bool {
        self.age_ms >= DEBRIS_LIFETIME_MS
    }

    /// Current geometry of the fragment.
    pub fn geometry(&self) -> BoxGeometry {
        let t = ease_in((self.age_ms as f64 / DEBRIS_LIFETIME_MS as f64).min(1.0));
        let mut g = self.origin;
        g.position.y -= DEBRIS_DROP * t;
        let along = g.position.get(self.axis) + self.slide * t;
        g.position.set(self.axis, along);
        g
    }
}

#[derive(Debug, Clone, Default)]
pub struct DebrisField {
    items: ArrayVec<Debris, MAX_DEBRIS>,
}

impl DebrisField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, debris: Debris) {
        if self.items.is_full() {
            self.items.remove(0);
        }
        self.items.push(debris);
    }

    pub fn advance(&mut self, dt_ms: u32) {
        for d in self.items.iter_mut() {
            d.age_ms = d.age_ms.saturating_add(dt_ms);
        }
        self.items.retain(|d| !d.expired());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn geometries(&self) -> impl Iterator<Item = BoxGeometry> + '_ {
        self.items.iter().map(Debris::geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimension, Rgb, Vec3};

    fn slab(x: f64, width: f64) -> BoxGeometry {
        BoxGeometry {
            position: Vec3::new(x, 2.0, 0.0),
            dimension: Dimension::new(width, 2.0, 10.0),
            color: Rgb::new(200, 200, 200),
        }
    }

    #[test]
    fn fragment_falls_and_slides_outward() {
        let placed = slab(0.0, 6.0);
        let chopped = slab(6.0, 4.0);
        let mut d = Debris::new(chopped, &placed, Axis::X, -0.2);

        assert_eq!(d.geometry(), chopped);
        d.age_ms = DEBRIS_LIFETIME_MS;
        let g = d.geometry();
        assert!((g.position.y - (2.0 - DEBRIS_DROP)).abs() < 1e-9);
        assert!((g.position.x - (6.0 + DEBRIS_SLIDE_FACTOR * 0.2)).abs() < 1e-9);
        assert_eq!(g.dimension, chopped.dimension);
    }

    #[test]
    fn low_side_fragment_slides_negative() {
        let placed = slab(0.0, 6.0);
        let chopped = slab(-4.0, 4.0);
        let mut d = Debris::new(chopped, &placed, Axis::X, 0.2);
        d.age_ms = DEBRIS_LIFETIME_MS;
        assert!(d.geometry().position.x < -4.0);
    }

    #[test]
    fn field_expires_fragments() {
        let mut field = DebrisField::new();
        field.spawn(Debris::new(slab(6.0, 4.0), &slab(0.0, 6.0), Axis::X, 0.1));
        assert_eq!(field.len(), 1);

        field.advance(DEBRIS_LIFETIME_MS / 2);
        assert_eq!(field.len(), 1);
        field.advance(DEBRIS_LIFETIME_MS);
        assert!(field.is_empty());
    }

    #[test]
    fn field_drops_oldest_when_full() {
        let mut field = DebrisField::new();
        for i in 0..(MAX_DEBRIS + 3) {
            field.spawn(Debris::new(
                slab(6.0 + i as f64, 4.0),
                &slab(0.0, 6.0),
                Axis::X,
                0.1,
            ));
        }
        assert_eq!(field.len(), MAX_DEBRIS);
        let first = field.geometries().next().unwrap();
        assert_eq!(first.position.x, 9.0);
    }
}
