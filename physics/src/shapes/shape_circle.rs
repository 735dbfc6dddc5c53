use super::GeometryProvider;
use glam::{DVec2, DVec3};
use std::f64::consts::PI;

pub const BOUNDARY_SAMPLES: usize = 30;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeCircle {
    pub radius: f64,
    pub pose: DVec3,
    pub velocity: DVec3,
    /// A slider is sampled at whatever pose it is queried with, other circles stay at `pose`.
    pub is_slider: bool,
}

impl ShapeCircle {
    pub fn new(pose: DVec3, velocity: DVec3, radius: f64) -> Self {
        Self {
            radius,
            pose,
            velocity,
            is_slider: false,
        }
    }

    pub fn slider(pose: DVec3, velocity: DVec3, radius: f64) -> Self {
        Self {
            is_slider: true,
            ..Self::new(pose, velocity, radius)
        }
    }

    #[inline]
    fn centre(&self, pose: DVec3) -> DVec2 {
        if self.is_slider {
            pose.truncate()
        } else {
            self.pose.truncate()
        }
    }
}

impl GeometryProvider for ShapeCircle {
    fn boundary_points(&self, pose: DVec3) -> Vec<DVec2> {
        let centre = self.centre(pose);
        let step = 2.0 * PI / (BOUNDARY_SAMPLES - 1) as f64;
        (0..BOUNDARY_SAMPLES)
            .map(|i| {
                let t = i as f64 * step;
                centre + self.radius * DVec2::new(t.cos(), t.sin())
            })
            .collect()
    }

    fn point_velocity(&self, normal: DVec2) -> DVec2 {
        // rotate the normal by 90 degrees to get the tangential direction
        self.velocity.z * self.radius * normal.perp() + self.velocity.truncate()
    }
}
