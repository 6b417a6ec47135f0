//! Orbit camera controls.
//!
//! The camera sits on a sphere around a target. Pointer drags queue azimuth
//! and polar deltas, the wheel queues a dolly; [`OrbitControls::update`]
//! integrates them once per frame.
//!
//! With damping on, each update applies `damping_factor` of the pending
//! rotation and keeps the rest, so motion eases out over several frames after
//! the pointer stops.

use std::f32::consts::{PI, TAU};

use ignition_shared::{ControlsConfig, Vec3};

/// Keeps the camera off the poles, where "up" flips.
const POLAR_EPSILON: f32 = 1e-4;

/// Zoom multiplier per wheel notch at zoom speed 1.
const DOLLY_BASE: f32 = 0.95;

/// Camera placement produced by the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position.
    pub position: Vec3,
    /// Point looked at.
    pub target: Vec3,
}

/// Orbit controller with optional damping.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    /// Distance from target.
    radius: f32,
    /// Azimuth around +Y, zero on +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    /// Radius multiplier applied on the next update.
    pending_scale: f32,
    settings: ControlsConfig,
}

impl OrbitControls {
    /// Places controls so the camera starts at `position` looking at `target`.
    #[must_use]
    pub fn new(position: Vec3, target: Vec3, settings: ControlsConfig) -> Self {
        let offset = position - target;
        let radius = offset.length().max(settings.min_distance);
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        Self {
            target,
            radius: radius.clamp(settings.min_distance, settings.max_distance),
            theta,
            phi: phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            settings,
        }
    }

    /// Queues a rotation from a pointer drag of `(dx, dy)` pixels on a
    /// surface `surface_height` pixels tall. A drag across the full height
    /// is one full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, surface_height: f32) {
        let height = surface_height.max(1.0);
        self.pending_theta -= TAU * dx / height * self.settings.rotate_speed;
        self.pending_phi -= TAU * dy / height * self.settings.rotate_speed;
    }

    /// Queues a dolly. Positive `notches` move in, negative move out.
    pub fn zoom(&mut self, notches: f32) {
        let factor = DOLLY_BASE.powf(self.settings.zoom_speed * notches.abs());
        if notches > 0.0 {
            self.pending_scale *= factor;
        } else if notches < 0.0 {
            self.pending_scale /= factor;
        }
    }

    /// Integrates pending motion and returns the new camera pose.
    pub fn update(&mut self) -> CameraPose {
        if self.settings.enable_damping {
            let factor = self.settings.damping_factor;
            self.theta += self.pending_theta * factor;
            self.phi += self.pending_phi * factor;
            self.pending_theta *= 1.0 - factor;
            self.pending_phi *= 1.0 - factor;
        } else {
            self.theta += self.pending_theta;
            self.phi += self.pending_phi;
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }

        self.theta = self.theta.rem_euclid(TAU);
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.radius = (self.radius * self.pending_scale)
            .clamp(self.settings.min_distance, self.settings.max_distance);
        self.pending_scale = 1.0;

        self.pose()
    }

    /// Current pose without integrating anything.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        CameraPose {
            position: self.target + offset,
            target: self.target,
        }
    }

    /// Distance from the target.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// True while damped motion is still settling.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.pending_theta.abs() > 1e-5 || self.pending_phi.abs() > 1e-5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(damping: bool) -> OrbitControls {
        OrbitControls::new(
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::ZERO,
            ControlsConfig {
                enable_damping: damping,
                ..ControlsConfig::default()
            },
        )
    }

    #[test]
    fn test_initial_pose_matches_placement() {
        let mut orbit = controls(true);
        let pose = orbit.update();
        assert!(pose.position.distance(Vec3::new(0.0, 0.0, 3.0)) < 1e-4);
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn test_undamped_rotation_applies_at_once() {
        let mut orbit = controls(false);
        // Quarter of the height is a quarter turn.
        orbit.rotate(-25.0, 0.0, 100.0);
        let pose = orbit.update();

        assert!(pose.position.distance(Vec3::new(3.0, 0.0, 0.0)) < 1e-3);
        assert!(!orbit.is_moving());
    }

    #[test]
    fn test_damped_rotation_eases_out() {
        let mut orbit = controls(true);
        orbit.rotate(-25.0, 0.0, 100.0);

        let first = orbit.update();
        assert!(orbit.is_moving());
        // 5% of a quarter turn on the first frame.
        assert!(first.position.x > 0.0 && first.position.x < 0.3);

        for _ in 0..400 {
            orbit.update();
        }
        let settled = orbit.pose();
        assert!(settled.position.distance(Vec3::new(3.0, 0.0, 0.0)) < 1e-2);
    }

    #[test]
    fn test_zoom_respects_distance_limits() {
        let mut orbit = controls(false);
        orbit.zoom(1_000.0);
        orbit.update();
        assert_eq!(orbit.radius(), 0.5);

        orbit.zoom(-10_000.0);
        orbit.update();
        assert_eq!(orbit.radius(), 50.0);
    }

    #[test]
    fn test_polar_angle_never_flips() {
        let mut orbit = controls(false);
        orbit.rotate(0.0, 10_000.0, 100.0);
        let pose = orbit.update();
        assert!(pose.position.y > 0.0);
        assert!(pose.position.y <= 3.0);
    }
}
