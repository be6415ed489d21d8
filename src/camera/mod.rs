//! Camera state: position, cumulative rotation, orthonormal basis, and field of view.
//!
//! The [`Camera`] is mutated by input handling between frames. Once per frame
//! the renderer snapshots it with [`Camera::state`] and hands that snapshot to
//! the [`Projector`].

use crate::float_types::{FULL_TURN, POLE_NUDGE, Real, deg_to_rad};
use nalgebra::{Point3, Vector3};

pub mod projector;

pub use projector::{Projection, Projector};

/// Rotation around the world x, y and z axes in degrees, each kept in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub x_deg: Real,
    pub y_deg: Real,
    pub z_deg: Real,
}

impl Rotation {
    pub const fn new(x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        Rotation {
            x_deg,
            y_deg,
            z_deg,
        }
    }

    /// Add the deltas, wrapping each axis into `[0, 360)`.
    ///
    /// A result landing exactly on 90° or 270° is pulled back by a hundredth of
    /// a degree so the projector never sits exactly on a pole.
    pub fn rotate(&mut self, x_plane: Real, y_plane: Real, z_plane: Real) {
        self.x_deg = wrap_axis(self.x_deg, x_plane);
        self.y_deg = wrap_axis(self.y_deg, y_plane);
        self.z_deg = wrap_axis(self.z_deg, z_plane);
    }
}

fn wrap_axis(current: Real, delta: Real) -> Real {
    let mut next = (current + delta).rem_euclid(FULL_TURN);
    // rem_euclid can round up to a full turn for tiny negative inputs
    if next >= FULL_TURN {
        next = 0.0;
    }
    if next == 90.0 || next == 270.0 {
        next -= POLE_NUDGE;
    }
    next
}

/// The camera basis: right (`x`), up (`y`) and forward (`z`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub x: Vector3<Real>,
    pub y: Vector3<Real>,
    pub z: Vector3<Real>,
}

impl Default for Axis {
    fn default() -> Self {
        Axis {
            x: Vector3::x(),
            y: Vector3::y(),
            z: Vector3::z(),
        }
    }
}

impl Axis {
    /// World base axes rotated by `rotation`.
    pub fn rotated(rotation: &Rotation) -> Self {
        let base = Axis::default();
        Axis {
            x: rotate_vector(&base.x, rotation),
            y: rotate_vector(&base.y, rotation),
            z: rotate_vector(&base.z, rotation),
        }
    }
}

/// Field of view in degrees. The vertical angle follows the horizontal one
/// through the screen ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fov {
    pub horizontal: Real,
    pub vertical: Real,
    pub ratio: Real,
}

impl Fov {
    pub fn new(horizontal: Real, ratio: Real) -> Self {
        Fov {
            horizontal,
            vertical: horizontal / ratio,
            ratio,
        }
    }

    /// Widen (positive) or narrow (negative) the view. Changes that would
    /// leave `(0, 180]` are ignored.
    pub fn adjust(&mut self, value: Real) {
        let next = self.horizontal + value;
        if next <= 0.0 || next > 180.0 {
            return;
        }
        self.horizontal = next;
        self.vertical += value / self.ratio;
    }

    pub fn half_horizontal(&self) -> Real {
        self.horizontal / 2.0
    }

    pub fn half_vertical(&self) -> Real {
        self.vertical / 2.0
    }
}

/// Startup parameters for a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Point3<Real>,
    /// Horizontal field of view in degrees
    pub fov: Real,
    /// Screen width divided by height
    pub screen_ratio: Real,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            position: Point3::origin(),
            fov: 75.0,
            screen_ratio: 16.0 / 9.0,
        }
    }
}

/// Immutable snapshot of the camera taken once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub position: Point3<Real>,
    pub rotation: Rotation,
    pub axis: Axis,
    /// One unit ahead of `position` along the forward axis
    pub look_at: Point3<Real>,
    pub fov: Fov,
}

/// Camera controlled between frames by input handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<Real>,
    pub rotation: Rotation,
    pub axis: Axis,
    pub look_at: Point3<Real>,
    pub fov: Fov,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    /// Camera at `(x, y, z)` looking down +z with the given horizontal FOV.
    pub fn new_at(x: Real, y: Real, z: Real, fov: Real, screen_ratio: Real) -> Self {
        Self::from_config(&CameraConfig {
            position: Point3::new(x, y, z),
            fov,
            screen_ratio,
        })
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Camera {
            position: config.position,
            rotation: Rotation::default(),
            axis: Axis::default(),
            look_at: config.position,
            fov: Fov::new(config.fov, config.screen_ratio),
        };
        camera.update();
        camera
    }

    /// Recompute the basis from the cumulative rotation and move the look-at
    /// point one unit ahead.
    pub fn update(&mut self) {
        self.axis = Axis::rotated(&self.rotation);
        self.look_at = self.position + self.axis.z;
    }

    pub fn rotate(&mut self, x_plane: Real, y_plane: Real, z_plane: Real) {
        self.rotation.rotate(x_plane, y_plane, z_plane);
        self.update();
    }

    /// Move by a world-space offset.
    pub fn translate(&mut self, x: Real, y: Real, z: Real) {
        self.position += Vector3::new(x, y, z);
        self.update();
    }

    /// Move by an offset expressed in camera space (x right, y up, z forward).
    pub fn translate_local(&mut self, offset: &Vector3<Real>) {
        let world = rotate_vector(offset, &self.rotation);
        self.translate(world.x, world.y, world.z);
    }

    pub fn adjust_fov(&mut self, value: Real) {
        self.fov.adjust(value);
    }

    /// Back to the origin with no rotation. The field of view is kept.
    pub fn reset(&mut self) {
        self.rotation = Rotation::default();
        self.position = Point3::origin();
        self.update();
    }

    pub const fn state(&self) -> CameraState {
        CameraState {
            position: self.position,
            rotation: self.rotation,
            axis: self.axis,
            look_at: self.look_at,
            fov: self.fov,
        }
    }
}

/// Rotate `vector` around x, then y, then z by the angles in `rotation`.
pub fn rotate_vector(vector: &Vector3<Real>, rotation: &Rotation) -> Vector3<Real> {
    let (sin_x, cos_x) = deg_to_rad(rotation.x_deg).sin_cos();
    let (sin_y, cos_y) = deg_to_rad(rotation.y_deg).sin_cos();
    let (sin_z, cos_z) = deg_to_rad(rotation.z_deg).sin_cos();

    // around x
    let v = Vector3::new(
        vector.x,
        vector.y * cos_x - vector.z * sin_x,
        vector.y * sin_x + vector.z * cos_x,
    );
    // around y
    let v = Vector3::new(
        v.x * cos_y + v.z * sin_y,
        v.y,
        -v.x * sin_y + v.z * cos_y,
    );
    // around z
    Vector3::new(
        v.x * cos_z - v.y * sin_z,
        v.x * sin_z + v.y * cos_z,
        v.z,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Real, b: Real) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn rotation_wraps_into_full_turn() {
        let mut r = Rotation::new(0.0, 359.0, 0.0);
        r.rotate(-1.0, 2.0, 0.0);
        assert!(approx(r.x_deg, 359.0));
        assert!(approx(r.y_deg, 1.0));
    }

    #[test]
    fn rotation_avoids_poles() {
        let mut r = Rotation::new(89.0, 269.0, 0.0);
        r.rotate(1.0, 1.0, 0.0);
        assert!(approx(r.x_deg, 90.0 - POLE_NUDGE));
        assert!(approx(r.y_deg, 270.0 - POLE_NUDGE));
    }

    #[test]
    fn yaw_quarter_turn_faces_positive_x() {
        let forward = rotate_vector(&Vector3::z(), &Rotation::new(0.0, 90.0, 0.0));
        assert!(approx(forward.x, 1.0));
        assert!(approx(forward.z, 0.0));
    }

    #[test]
    fn look_at_is_one_unit_ahead() {
        let mut camera = Camera::new_at(1.0, 2.0, 3.0, 75.0, 16.0 / 9.0);
        camera.rotate(0.0, 30.0, 0.0);
        let state = camera.state();
        assert!(approx((state.look_at - state.position).norm(), 1.0));
        assert!(approx(state.axis.x.dot(&state.axis.z), 0.0));
    }

    #[test]
    fn fov_adjust_respects_bounds() {
        let mut fov = Fov::new(170.0, 2.0);
        fov.adjust(20.0);
        assert!(approx(fov.horizontal, 170.0));
        fov.adjust(-10.0);
        assert!(approx(fov.horizontal, 160.0));
        assert!(approx(fov.vertical, 80.0));
    }

    #[test]
    fn fov_never_collapses_to_zero() {
        let mut camera = Camera::new_at(0.0, 0.0, -30.0, 75.0, 16.0 / 9.0);
        camera.adjust_fov(-75.0);
        assert!(approx(camera.fov.horizontal, 75.0));
        assert!(camera.fov.half_vertical() > 0.0);
        camera.adjust_fov(-74.0);
        assert!(approx(camera.fov.horizontal, 1.0));
    }

    #[test]
    fn rotation_wraps_several_turns() {
        let mut r = Rotation::default();
        r.rotate(-725.0, 900.0, 1080.0);
        assert!(approx(r.x_deg, 355.0));
        assert!(approx(r.y_deg, 180.0));
        assert!(approx(r.z_deg, 0.0));
        r.rotate(0.0, 630.0, 0.0);
        assert!(approx(r.y_deg, 90.0 - POLE_NUDGE));
        for axis in [r.x_deg, r.y_deg, r.z_deg] {
            assert!((0.0..FULL_TURN).contains(&axis));
        }
    }

    #[test]
    fn translate_local_follows_heading() {
        let mut camera = Camera::default();
        camera.rotate(0.0, 90.0, 0.0);
        camera.translate_local(&Vector3::new(0.0, 0.0, 1.0));
        // the quarter turn is nudged off the pole
        assert!((camera.position.x - 1.0).abs() < 1e-3);
        assert!(camera.position.z.abs() < 1e-3);
    }
}
