//! Twisted-prism mesh construction.
//!
//! A `stretch_length x 1 x 1` axis-aligned box is tessellated face by face
//! from plane grids, then every point is rotated about the long (x) axis by
//! an angle proportional to its position along that axis. Applying the same
//! transform to all six faces keeps the caps and the long faces watertight
//! at shared edges.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::plane::gen_plane;
use super::{barycenter_tag, palette, GeometryError, PrismVertex};

/// Rotate a box-surface point about the prism's long axis.
///
/// `x` is recentered about the axis midpoint and `y`/`z` about the unit
/// cross-section's center; the `(y, z)` pair is then rotated by
/// `(x / stretch_length) * 2 * pi * twist_count`. Pure function.
#[must_use]
pub fn twist_point(
    x: f32,
    y: f32,
    z: f32,
    stretch_length: f32,
    twist_count: f32,
) -> Vec3 {
    let angle = (x / stretch_length) * TAU * twist_count;
    let (sin, cos) = angle.sin_cos();
    let centered_y = y - 0.5;
    let centered_z = z - 0.5;
    Vec3::new(
        x - stretch_length / 2.0,
        centered_y * cos - centered_z * sin,
        centered_y * sin + centered_z * cos,
    )
}

/// Build the twisted prism's flat vertex stream.
///
/// The cross-section faces use `base_divisions` grid cells per side; the four
/// long faces use `ceil(base_divisions * stretch_length)` cells along the
/// long axis so triangles stay near-uniform when the prism is elongated.
/// `twist_count` is the number of full cross-section rotations over the
/// prism's length; `0.0` produces the untwisted (centered, axis-aligned)
/// prism. Deterministic: identical inputs produce identical output.
///
/// No emitted vertex is ever the zero vector — every face point keeps an
/// off-axis magnitude of at least 0.5, and cap faces sit at
/// `|x| = stretch_length / 2 > 0` — so the render stage's radial
/// normalization is always well defined.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidStretch`] when `stretch_length` is not
/// finite and positive, [`GeometryError::ZeroDivisions`] when
/// `base_divisions` is zero, and [`GeometryError::GridTooLarge`] when the
/// stretched long-axis division count exceeds the per-axis cap (the
/// float-to-int cast saturates, so enormous stretch lengths land here
/// instead of wrapping).
pub fn build_twisted_prism(
    stretch_length: f32,
    base_divisions: u32,
    twist_count: f32,
) -> Result<Vec<PrismVertex>, GeometryError> {
    if !stretch_length.is_finite() || stretch_length <= 0.0 {
        return Err(GeometryError::InvalidStretch { stretch_length });
    }

    let long_divisions =
        (base_divisions as f32 * stretch_length).ceil().max(1.0) as u32;
    let long_grid = gen_plane(long_divisions, base_divisions)?;
    let cap_grid = gen_plane(base_divisions, base_divisions)?;

    let mut mesh =
        Vec::with_capacity(4 * long_grid.len() + 2 * cap_grid.len());
    let s = stretch_length;

    // Face order matches the logical top/bottom/left/right/front/back
    // grouping; caps (left/right) evaluate the twist at the axis extremes.
    emit_face(&mut mesh, &long_grid, palette::TOP, s, twist_count, |p| {
        (p.x * s, 0.0, p.y)
    });
    emit_face(&mut mesh, &long_grid, palette::BOTTOM, s, twist_count, |p| {
        (p.x * s, 1.0, p.y)
    });
    emit_face(&mut mesh, &cap_grid, palette::LEFT, s, twist_count, |p| {
        (0.0, p.x, p.y)
    });
    emit_face(&mut mesh, &cap_grid, palette::RIGHT, s, twist_count, |p| {
        (s, p.x, p.y)
    });
    emit_face(&mut mesh, &long_grid, palette::FRONT, s, twist_count, |p| {
        (p.x * s, p.y, 0.0)
    });
    emit_face(&mut mesh, &long_grid, palette::BACK, s, twist_count, |p| {
        (p.x * s, p.y, 1.0)
    });

    Ok(mesh)
}

/// Map one face's grid onto the box surface, twist it, and append the
/// colored, barycentric-tagged vertices.
fn emit_face(
    mesh: &mut Vec<PrismVertex>,
    grid: &[Vec2],
    color: [f32; 3],
    stretch_length: f32,
    twist_count: f32,
    to_surface: impl Fn(Vec2) -> (f32, f32, f32),
) {
    for (i, point) in grid.iter().enumerate() {
        let (x, y, z) = to_surface(*point);
        let position = twist_point(x, y, z, stretch_length, twist_count);
        mesh.push(PrismVertex {
            position: position.to_array(),
            color,
            barycenter: barycenter_tag(i),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FLOATS_PER_VERTEX;

    #[test]
    fn test_reference_scenario_triangle_count() {
        // stretch 50, base divisions 3, one twist: long axis gets
        // ceil(3 * 50) = 150 divisions, so
        // (4 * 150 * 3 + 2 * 3 * 3) * 6 = 10908 vertices.
        let mesh = build_twisted_prism(50.0, 3, 1.0).unwrap();
        assert_eq!(mesh.len(), 10908);
        let total_floats = mesh.len() * FLOATS_PER_VERTEX;
        assert_eq!(total_floats / 8 / 3, 3636);
    }

    #[test]
    fn test_vertex_count_divisible_by_three() {
        for (s, n, t) in [(1.0, 1, 0.0), (2.5, 3, 1.0), (7.3, 4, 2.5)] {
            let mesh = build_twisted_prism(s, n, t).unwrap();
            assert_eq!(mesh.len() % 3, 0, "s={s} n={n} t={t}");
        }
    }

    #[test]
    fn test_no_vertex_at_origin() {
        let mesh = build_twisted_prism(3.0, 3, 1.5).unwrap();
        for v in &mesh {
            let len_sq: f32 =
                v.position.iter().map(|c| c * c).sum();
            assert!(len_sq > 0.0, "zero vertex in mesh: {v:?}");
            // Off-axis magnitude stays >= 0.5 on the long faces; cap
            // vertices sit at |x| = stretch/2.
            assert!(len_sq >= 0.25 - 1e-6);
        }
    }

    #[test]
    fn test_zero_twist_matches_axis_aligned_box() {
        let s = 4.0;
        let n = 2;
        let mesh = build_twisted_prism(s, n, 0.0).unwrap();

        // Rebuild the reference box directly: same face maps, centered,
        // no rotation.
        let long = gen_plane((n as f32 * s).ceil() as u32, n).unwrap();
        let cap = gen_plane(n, n).unwrap();
        let mut expected: Vec<[f32; 3]> = Vec::new();
        let center =
            |x: f32, y: f32, z: f32| [x - s / 2.0, y - 0.5, z - 0.5];
        expected.extend(long.iter().map(|p| center(p.x * s, 0.0, p.y)));
        expected.extend(long.iter().map(|p| center(p.x * s, 1.0, p.y)));
        expected.extend(cap.iter().map(|p| center(0.0, p.x, p.y)));
        expected.extend(cap.iter().map(|p| center(s, p.x, p.y)));
        expected.extend(long.iter().map(|p| center(p.x * s, p.y, 0.0)));
        expected.extend(long.iter().map(|p| center(p.x * s, p.y, 1.0)));

        assert_eq!(mesh.len(), expected.len());
        for (v, e) in mesh.iter().zip(&expected) {
            assert_eq!(v.position, *e);
        }
    }

    #[test]
    fn test_zero_twist_positions_on_box_surface() {
        let s = 2.0;
        let mesh = build_twisted_prism(s, 3, 0.0).unwrap();
        for v in &mesh {
            let [x, y, z] = v.position;
            let on_surface = y.abs() == 0.5
                || z.abs() == 0.5
                || x.abs() == s / 2.0;
            assert!(on_surface, "vertex off box surface: {:?}", v.position);
        }
    }

    #[test]
    fn test_twist_half_turn() {
        // At the far cap a half twist rotates (y, z) by pi.
        let p = twist_point(2.0, 0.0, 0.0, 2.0, 0.5);
        assert!((p.x - 1.0).abs() < 1e-6);
        assert!((p.y - 0.5).abs() < 1e-6);
        assert!((p.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_twist_is_continuous_in_twist_count() {
        // No jump as the twist count crosses an integer boundary.
        let eps = 1e-4;
        for base in [0.0f32, 1.0, 2.0] {
            let a = twist_point(1.7, 0.0, 1.0, 3.0, base - eps);
            let b = twist_point(1.7, 0.0, 1.0, 3.0, base + eps);
            assert!(
                a.distance(b) < 1e-2,
                "discontinuity near twist_count = {base}"
            );
        }
    }

    #[test]
    fn test_deterministic() {
        let a = build_twisted_prism(5.0, 3, 1.0).unwrap();
        let b = build_twisted_prism(5.0, 3, 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(matches!(
            build_twisted_prism(0.0, 3, 1.0),
            Err(GeometryError::InvalidStretch { .. })
        ));
        assert!(matches!(
            build_twisted_prism(-1.0, 3, 1.0),
            Err(GeometryError::InvalidStretch { .. })
        ));
        assert!(build_twisted_prism(f32::NAN, 3, 1.0).is_err());
        assert!(build_twisted_prism(f32::INFINITY, 3, 1.0).is_err());
        assert!(matches!(
            build_twisted_prism(1.0, 0, 1.0),
            Err(GeometryError::ZeroDivisions { .. })
        ));
    }

    #[test]
    fn test_excessive_stretch_rejected() {
        // ceil(3 * 1e9) saturates the u32 cast; the grid cap turns that
        // into an error instead of an absurd allocation.
        assert!(matches!(
            build_twisted_prism(1.0e9, 3, 1.0),
            Err(GeometryError::GridTooLarge { .. })
        ));
        assert!(matches!(
            build_twisted_prism(f32::MAX, 1, 0.0),
            Err(GeometryError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_face_colors_are_distinct() {
        let mesh = build_twisted_prism(1.0, 1, 0.0).unwrap();
        let mut colors: Vec<[f32; 3]> = mesh.iter().map(|v| v.color).collect();
        colors.dedup();
        assert_eq!(colors.len(), 6, "expected six distinct face colors");
    }
}
