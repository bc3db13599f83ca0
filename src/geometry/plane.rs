//! Unit-square plane grid generation.

use glam::Vec2;

use super::{GeometryError, MAX_GRID_DIVISIONS};

/// Generate a triangulated `divisions_u x divisions_v` grid of unit cells,
/// normalized into `[0,1]^2`.
///
/// Each cell is split into two triangles and emitted as 6 points with shared
/// edge vertices duplicated (no index buffer). Every 3 consecutive points
/// form one triangle, in a fixed order so the `i % 3` position of a point
/// determines its barycentric corner tag. Output is deterministic for
/// identical inputs.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroDivisions`] when either division count is
/// zero and [`GeometryError::GridTooLarge`] when either exceeds
/// [`MAX_GRID_DIVISIONS`].
pub fn gen_plane(
    divisions_u: u32,
    divisions_v: u32,
) -> Result<Vec<Vec2>, GeometryError> {
    if divisions_u == 0 || divisions_v == 0 {
        return Err(GeometryError::ZeroDivisions {
            divisions_u,
            divisions_v,
        });
    }
    if divisions_u > MAX_GRID_DIVISIONS || divisions_v > MAX_GRID_DIVISIONS {
        return Err(GeometryError::GridTooLarge {
            divisions_u,
            divisions_v,
        });
    }

    let scale_u = 1.0 / divisions_u as f32;
    let scale_v = 1.0 / divisions_v as f32;

    // Capped divisions keep this product well inside usize range.
    let cells = divisions_u as usize * divisions_v as usize;
    let mut points = Vec::with_capacity(cells * 6);
    for cell_v in 0..divisions_v {
        for cell_u in 0..divisions_u {
            let u0 = cell_u as f32 * scale_u;
            let v0 = cell_v as f32 * scale_v;
            let u1 = (cell_u + 1) as f32 * scale_u;
            let v1 = (cell_v + 1) as f32 * scale_v;

            // Lower-left triangle, then upper-right.
            points.push(Vec2::new(u0, v0));
            points.push(Vec2::new(u1, v0));
            points.push(Vec2::new(u0, v1));
            points.push(Vec2::new(u0, v1));
            points.push(Vec2::new(u1, v0));
            points.push(Vec2::new(u1, v1));
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::barycenter_tag;

    #[test]
    fn test_point_count_is_six_per_cell() {
        for n in [1u32, 2, 3, 7, 16] {
            let points = gen_plane(n, n).unwrap();
            assert_eq!(
                points.len(),
                (n * n * 6) as usize,
                "n = {n}: expected {} points",
                n * n * 6
            );
        }
    }

    #[test]
    fn test_rectangular_grid_count() {
        let points = gen_plane(5, 2).unwrap();
        assert_eq!(points.len(), 5 * 2 * 6);
    }

    #[test]
    fn test_points_normalized() {
        let points = gen_plane(4, 3).unwrap();
        for p in &points {
            assert!(p.x >= 0.0 && p.x <= 1.0, "u out of range: {p:?}");
            assert!(p.y >= 0.0 && p.y <= 1.0, "v out of range: {p:?}");
        }
    }

    #[test]
    fn test_triangles_are_nondegenerate() {
        let points = gen_plane(3, 3).unwrap();
        for tri in points.chunks_exact(3) {
            let area =
                (tri[1] - tri[0]).perp_dot(tri[2] - tri[0]).abs() * 0.5;
            assert!(area > 0.0, "degenerate triangle {tri:?}");
        }
    }

    #[test]
    fn test_cells_tile_the_unit_square() {
        // Summed triangle area must equal 1 for any grid resolution.
        let points = gen_plane(4, 7).unwrap();
        let total: f32 = points
            .chunks_exact(3)
            .map(|tri| (tri[1] - tri[0]).perp_dot(tri[2] - tri[0]).abs() * 0.5)
            .sum();
        assert!((total - 1.0).abs() < 1e-5, "total area {total}");
    }

    #[test]
    fn test_barycentric_cycle_alignment() {
        // The emission order is what the cyclic tag assignment keys off; the
        // first corner of every triangle is index 0 mod 3.
        let points = gen_plane(2, 2).unwrap();
        for (i, _) in points.iter().enumerate() {
            let tag = barycenter_tag(i);
            match i % 3 {
                0 => assert_eq!(tag, [0.0, 0.0]),
                1 => assert_eq!(tag, [0.0, 1.0]),
                _ => assert_eq!(tag, [1.0, 0.0]),
            }
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(gen_plane(6, 4).unwrap(), gen_plane(6, 4).unwrap());
    }

    #[test]
    fn test_zero_divisions_rejected() {
        assert!(gen_plane(0, 3).is_err());
        assert!(gen_plane(3, 0).is_err());
        assert!(gen_plane(0, 0).is_err());
    }

    #[test]
    fn test_oversized_grid_rejected() {
        // Past the per-axis cap the cell-count product could overflow
        // before allocation fails; the generator rejects it up front.
        assert!(matches!(
            gen_plane(MAX_GRID_DIVISIONS + 1, 1),
            Err(GeometryError::GridTooLarge { .. })
        ));
        assert!(matches!(
            gen_plane(1, u32::MAX),
            Err(GeometryError::GridTooLarge { .. })
        ));
        assert!(matches!(
            gen_plane(u32::MAX, u32::MAX),
            Err(GeometryError::GridTooLarge { .. })
        ));
    }
}
