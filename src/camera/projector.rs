//! Angular projection of world points onto the camera's view.
//!
//! A point is described by two signed angles (degrees) between the camera's
//! forward axis and the point: one measured in the horizontal viewing plane,
//! one in the vertical viewing plane. The point is visible when both angles
//! fall inside half the matching field of view.

use crate::camera::CameraState;
use crate::float_types::{Real, rad_to_deg};
use nalgebra::{Point3, Vector3};

/// Result of projecting one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub visible: bool,
    /// Signed angle from the forward axis in the horizontal viewing plane
    pub horizontal: Real,
    /// Signed angle from the forward axis in the vertical viewing plane
    pub vertical: Real,
}

impl Projection {
    /// What a point at the camera position (or directly above / beside it)
    /// projects to: not visible, no NaN.
    pub const HIDDEN: Projection = Projection {
        visible: false,
        horizontal: 0.0,
        vertical: 0.0,
    };
}

/// Projects points for one frame's camera snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    camera: CameraState,
}

impl Projector {
    pub const fn new(camera: CameraState) -> Self {
        Projector { camera }
    }

    /// Straight-line distance from the camera, used as depth.
    pub fn distance(&self, point: &Point3<Real>) -> Real {
        (point - self.camera.position).norm()
    }

    /// Project `point` into signed view angles.
    pub fn project(&self, point: &Point3<Real>) -> Projection {
        let camera = &self.camera;
        let poi = point - camera.position;
        if !poi.iter().all(|c| c.is_finite()) || poi.norm_squared() == 0.0 {
            return Projection::HIDDEN;
        }

        // Drop the component along the right axis to land in the vertical
        // viewing plane, and the one along the up axis for the horizontal plane.
        let vertical_point = point - along(&camera.axis.x, &poi);
        let horizontal_point = point - along(&camera.axis.y, &poi);

        let (Some(mut vertical), Some(mut horizontal)) = (
            angle_from_forward(&camera.axis.z, &(vertical_point - camera.position)),
            angle_from_forward(&camera.axis.z, &(horizontal_point - camera.position)),
        ) else {
            return Projection::HIDDEN;
        };

        let yaw = camera.rotation.y_deg;
        let right_of_view = is_right_side(
            (horizontal_point.x, horizontal_point.z),
            (camera.position.x, camera.position.z),
            (camera.look_at.x, camera.look_at.z),
            (camera.position.x + 1.0, camera.position.z),
        );
        let yaw_front_half = yaw <= 90.0 || yaw >= 270.0;
        if (!right_of_view && yaw_front_half) || (right_of_view && !yaw_front_half) {
            horizontal = -horizontal;
        }

        let pitch = camera.rotation.x_deg;
        let below_view = is_right_side(
            (vertical_point.z, vertical_point.y),
            (camera.position.z, camera.position.y),
            (camera.look_at.z, camera.look_at.y),
            (camera.position.z + 1.0, camera.position.y),
        );
        // The +z reference point changes side of the view line when the pitch passes 180°.
        let pitch_upper_half = pitch <= 180.0;
        if (below_view && pitch_upper_half) || (!below_view && !pitch_upper_half) {
            vertical = -vertical;
        }

        let visible = horizontal.abs() <= camera.fov.half_horizontal()
            && vertical.abs() <= camera.fov.half_vertical();

        Projection {
            visible,
            horizontal,
            vertical,
        }
    }
}

/// Component of `v` along the unit direction of `axis`.
fn along(axis: &Vector3<Real>, v: &Vector3<Real>) -> Vector3<Real> {
    let unit = axis.normalize();
    unit * v.dot(&unit)
}

/// Unsigned angle in degrees between `forward` and `sight`, or `None` when the
/// sight vector has no direction.
fn angle_from_forward(forward: &Vector3<Real>, sight: &Vector3<Real>) -> Option<Real> {
    let lengths = forward.norm() * sight.norm();
    if lengths == 0.0 || !lengths.is_finite() {
        return None;
    }
    let cos = (forward.dot(sight) / lengths).clamp(-1.0, 1.0);
    Some(rad_to_deg(cos.acos()))
}

/// Whether `point` lies on the same side of the line `a → b` as `base`.
///
/// When `base` sits on the line the negative side counts as "right".
pub fn is_right_side(
    point: (Real, Real),
    a: (Real, Real),
    b: (Real, Real),
    base: (Real, Real),
) -> bool {
    let side = |(x, y): (Real, Real)| (x - a.0) * (b.1 - a.1) - (y - a.1) * (b.0 - a.0);
    let d = side(point);
    if side(base) > 0.0 { d > 0.0 } else { d < 0.0 }
}
