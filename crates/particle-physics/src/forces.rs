//! Pairwise force kernels
//!
//! Two kernel shapes coexist with opposite coefficient-sign conventions,
//! so they are kept as a tagged profile variant rather than unified into
//! one formula. Both are pure functions of distance and coefficient and
//! are evaluated by the stepper for every particle pair.

/// Which force-kernel shape the stepper evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelProfile {
    /// Triangular pulse over absolute distances between `min_distance`
    /// and `max_distance`, with a family-independent hard core below
    /// the band. Negative matrix coefficients attract.
    Banded,
    /// Ring-shaped pulse over distances normalized by a cutoff radius,
    /// with a fixed repulsive floor below the inner edge. Positive
    /// matrix coefficients repel.
    NormalizedRing,
}

/// Banded-trapezoid force magnitude at absolute distance `d`.
///
/// Inside the band the magnitude is a triangular pulse scaled by the
/// signed coefficient: zero at both edges, peaking at `coef` in the
/// middle. Below `min_distance` every family is pushed apart by
/// `(min_distance / d) * repulsion`, unbounded as `d` approaches zero.
/// Callers must handle `d == 0` themselves; the kernel assumes `d > 0`.
pub fn banded_force(d: f32, coef: f32, min_distance: f32, max_distance: f32, repulsion: f32) -> f32 {
    if d >= min_distance && d <= max_distance {
        let t = (d - min_distance) / (max_distance - min_distance);
        (1.0 - (t - 0.5).abs() * 2.0) * coef
    } else if d > max_distance {
        0.0
    } else {
        (min_distance / d) * repulsion
    }
}

/// Normalized-ring force magnitude at normalized distance `r = d / r_max`.
///
/// Band edges are fractions of the cutoff radius, typically `0.3` and
/// `1.0`. Inside the band the magnitude is a pulse scaled by `coef`;
/// at or below `min_distance` the result is `r / min_distance - 1`,
/// a coefficient-independent repulsion approaching `-1` as `r` goes to
/// zero. The two branches agree at the `r == min_distance` seam.
pub fn ring_force(r: f32, coef: f32, min_distance: f32, max_distance: f32) -> f32 {
    if r > min_distance && r < max_distance {
        coef * (1.0 - (2.0 * r - 1.0 - min_distance).abs() / (1.0 - min_distance))
    } else if r > 0.0 && r <= min_distance {
        r / min_distance - 1.0
    } else {
        0.0
    }
}
