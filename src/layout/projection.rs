//! 3D rotation and projection onto the screen plane.
//!
//! Camera space is right-handed with +z pointing away from the viewer, so a
//! larger depth means farther away.

use serde::{Deserialize, Serialize};

pub type Matrix3 = [[f64; 3]; 3];

/// Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Rotation {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// `Rz(roll) * Rx(pitch) * Ry(yaw)`
    pub fn matrix(&self) -> Matrix3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let (sr, cr) = self.roll.sin_cos();

        let ry = [[cy, 0.0, sy], [0.0, 1.0, 0.0], [-sy, 0.0, cy]];
        let rx = [[1.0, 0.0, 0.0], [0.0, cp, -sp], [0.0, sp, cp]];
        let rz = [[cr, -sr, 0.0], [sr, cr, 0.0], [0.0, 0.0, 1.0]];
        mul(&rz, &mul(&rx, &ry))
    }

    #[cfg(test)]
    pub fn rotate(&self, v: [f64; 3]) -> [f64; 3] {
        apply(&self.matrix(), v)
    }

    /// Turn by a drag in screen space, keeping pitch away from the poles.
    pub fn dragged(&self, dx: f64, dy: f64) -> Self {
        let limit = std::f64::consts::FRAC_PI_2 - 0.01;
        Self {
            yaw: self.yaw + dx,
            pitch: (self.pitch + dy).clamp(-limit, limit),
            roll: self.roll,
        }
    }
}

fn mul(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    out
}

fn apply(m: &Matrix3, v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// How camera space maps to the screen plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Projection {
    Orthographic,
    /// Eye at `z = -distance`
    Perspective { distance: f64 },
}

impl Default for Projection {
    fn default() -> Self {
        Projection::Perspective { distance: 4.0 }
    }
}

/// A point after rotation and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
    /// Perspective shrink factor, 1 for orthographic
    pub scale: f64,
    /// Position in the input slice
    pub index: usize,
}

fn project_one(m: &Matrix3, p: [f64; 3], projection: Projection, index: usize) -> Option<Projected> {
    let [x, y, z] = apply(m, p);
    let scale = match projection {
        Projection::Orthographic => 1.0,
        Projection::Perspective { distance } => {
            let denom = distance + z;
            if denom <= 1e-9 {
                return None;
            }
            distance / denom
        }
    };
    Some(Projected {
        x: x * scale,
        y: y * scale,
        depth: z,
        scale,
        index,
    })
}

/// Rotate and project `points`, sorted far to near for painter's-order drawing.
///
/// Points at or behind the eye are dropped.
pub fn project(points: &[[f64; 3]], rotation: Rotation, projection: Projection) -> Vec<Projected> {
    let m = rotation.matrix();
    let mut out: Vec<Projected> = points
        .iter()
        .enumerate()
        .filter_map(|(i, &p)| project_one(&m, p, projection, i))
        .collect();
    out.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(std::cmp::Ordering::Equal));
    out
}

/// Screen end points of the x, y and z axes of the given length, in axis order.
pub fn axes(rotation: Rotation, projection: Projection, length: f64) -> Vec<Option<[f64; 2]>> {
    let m = rotation.matrix();
    [
        [length, 0.0, 0.0],
        [0.0, length, 0.0],
        [0.0, 0.0, length],
    ]
    .into_iter()
    .enumerate()
    .map(|(i, p)| project_one(&m, p, projection, i).map(|q| [q.x, q.y]))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn norm(v: [f64; 3]) -> f64 {
        (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
    }

    #[test]
    fn identity_orthographic_keeps_xy() {
        let out = project(&[[0.3, -0.7, 0.2]], Rotation::default(), Projection::Orthographic);
        assert_eq!(out.len(), 1);
        assert!((out[0].x - 0.3).abs() < EPS);
        assert!((out[0].y + 0.7).abs() < EPS);
        assert!((out[0].depth - 0.2).abs() < EPS);
    }

    #[test]
    fn rotation_preserves_length() {
        let rotation = Rotation::new(0.7, -0.4, 1.3);
        for v in [[1.0, 2.0, 3.0], [-0.5, 0.0, 0.25], [0.0, 0.0, -4.0]] {
            assert!((norm(rotation.rotate(v)) - norm(v)).abs() < EPS);
        }
    }

    #[test]
    fn quarter_yaw_turns_x_into_depth() {
        let r = Rotation::new(FRAC_PI_2, 0.0, 0.0).rotate([1.0, 0.0, 0.0]);
        assert!(r[0].abs() < EPS);
        assert!((r[2] + 1.0).abs() < EPS);
    }

    #[test]
    fn perspective_shrinks_far_points_and_drops_behind_eye() {
        let projection = Projection::Perspective { distance: 2.0 };
        let points = [[1.0, 1.0, 2.0], [1.0, 1.0, 0.0], [1.0, 1.0, -3.0]];
        let out = project(&points, Rotation::default(), projection);
        assert_eq!(out.len(), 2);

        // far to near
        assert_eq!(out[0].index, 0);
        assert!((out[0].x - 0.5).abs() < EPS);
        assert_eq!(out[1].index, 1);
        assert!((out[1].x - 1.0).abs() < EPS);
    }

    #[test]
    fn output_is_sorted_by_depth() {
        let points: Vec<[f64; 3]> = (0..20)
            .map(|i| {
                let t = i as f64;
                [t.sin(), t.cos(), (t * 0.37).sin()]
            })
            .collect();
        let out = project(&points, Rotation::new(0.3, 0.2, 0.1), Projection::default());
        assert_eq!(out.len(), points.len());
        assert!(out.windows(2).all(|w| w[0].depth >= w[1].depth));
    }

    #[test]
    fn axes_project_in_order() {
        let axes = axes(Rotation::default(), Projection::Orthographic, 2.0);
        assert_eq!(axes, vec![Some([2.0, 0.0]), Some([0.0, 2.0]), Some([0.0, 0.0])]);
    }

    #[test]
    fn drag_clamps_pitch() {
        let r = Rotation::default().dragged(0.5, 10.0);
        assert_eq!(r.yaw, 0.5);
        assert!(r.pitch < FRAC_PI_2);
    }
}
