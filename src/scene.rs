//! Small helpers for the 3D content around each wonder.

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Horizontal distances below this (squared) leave a billboard as it is.
const MIN_BILLBOARD_DISTANCE_SQ: f32 = 0.001;

/// Yaw in radians that keeps an upright canvas at `object` turned away from
/// `camera`, so its front is readable. Height differences are ignored. `None`
/// when the camera is right above or below the canvas.
pub fn billboard_yaw(object: Vec3, camera: Vec3) -> Option<f32> {
    let dx = object.x - camera.x;
    let dz = object.z - camera.z;
    if dx * dx + dz * dz <= MIN_BILLBOARD_DISTANCE_SQ {
        return None;
    }
    Some(dx.atan2(dz))
}

/// Model spinning around its own axis, switched by a button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    /// Degrees per second.
    pub speed: f32,
    angle: f32,
    spinning: bool,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new(50.0)
    }
}

impl Spinner {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            angle: 0.0,
            spinning: false,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.spinning = !self.spinning;
        self.spinning
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    /// Angle in degrees, kept within `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn tick(&mut self, dt: f32) {
        if self.spinning {
            self.angle = (self.angle + self.speed * dt).rem_euclid(360.0);
        }
    }
}

/// Info panel opened and closed by the same button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelToggle {
    open: bool,
}

impl PanelToggle {
    pub fn new(open: bool) -> Self {
        Self { open }
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn billboard_faces_away_from_camera() {
        let yaw = billboard_yaw(Vec3::new(0.0, 1.0, 2.0), Vec3::ZERO).unwrap();
        assert!(close(yaw, 0.0));

        let yaw = billboard_yaw(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO).unwrap();
        assert!(close(yaw, FRAC_PI_2));

        let yaw = billboard_yaw(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO).unwrap();
        assert!(close(yaw.abs(), PI));
    }

    #[test]
    fn billboard_ignores_height_only_offset() {
        assert_eq!(billboard_yaw(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO), None);
        assert_eq!(
            billboard_yaw(Vec3::new(0.01, 0.0, 0.01), Vec3::ZERO),
            None
        );
    }

    #[test]
    fn spinner_only_moves_while_on() {
        let mut spinner = Spinner::default();
        spinner.tick(1.0);
        assert_eq!(spinner.angle(), 0.0);

        assert!(spinner.toggle());
        spinner.tick(2.0);
        assert!(close(spinner.angle(), 100.0));
        spinner.tick(6.0);
        assert!(close(spinner.angle(), 40.0));

        assert!(!spinner.toggle());
        spinner.tick(1.0);
        assert!(close(spinner.angle(), 40.0));
    }

    #[test]
    fn panel_toggles() {
        let mut panel = PanelToggle::default();
        assert!(panel.toggle());
        assert!(panel.is_open());
        assert!(!panel.toggle());
    }
}
