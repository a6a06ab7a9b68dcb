//! Distance-sorted index used for "maybe near" queries.

use nalgebra::Vector3;

use crate::body::BodyId;

/// Bodies sorted by their distance from the root frame's origin.
///
/// By the triangle inequality, every body within `d` of a point `p` has an
/// origin distance in `[|p| - d, |p| + d]`, so a range lookup over the sorted
/// distances never misses one. It may return bodies that are nowhere near `p`
/// but happen to sit on the same shell; callers filter those.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    entries: Vec<(f64, BodyId)>,
}

impl SpatialIndex {
    /// Builds the index from root-frame positions.
    pub fn build(positions: impl IntoIterator<Item = (BodyId, Vector3<f64>)>) -> Self {
        let mut entries: Vec<(f64, BodyId)> = positions
            .into_iter()
            .map(|(id, p)| (p.norm(), id))
            .collect();
        entries.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Superset of the bodies within `distance` of `point`.
    pub fn maybe_near(&self, point: &Vector3<f64>, distance: f64) -> Vec<BodyId> {
        let centre = point.norm();
        let low = centre - distance;
        let high = centre + distance;
        let start = self.entries.partition_point(|(d, _)| *d < low);
        let end = self.entries.partition_point(|(d, _)| *d <= high);
        if start >= end {
            return Vec::new();
        }
        self.entries[start..end].iter().map(|(_, id)| *id).collect()
    }
}
