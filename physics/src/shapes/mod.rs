mod shape_circle;

use glam::{DVec2, DVec3};

pub use shape_circle::{ShapeCircle, BOUNDARY_SAMPLES};

/// Geometry consumed when assembling contact constraints.
///
/// Poses and velocities are planar `(x, y, θ)` / `(vx, vy, ω)` triples.
pub trait GeometryProvider {
    /// Ordered boundary samples for the object at `pose`.
    fn boundary_points(&self, pose: DVec3) -> Vec<DVec2>;

    /// Velocity of the boundary point whose outward normal is `normal`.
    fn point_velocity(&self, normal: DVec2) -> DVec2;
}
