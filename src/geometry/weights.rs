//! Interpolation weights and containment tests for 2D cells.
//!
//! Cells are planar polygons given by their vertex ring:
//! - Triangle: `[v0, v1, v2]`, barycentric weights from the (x, y)
//!   projection.
//! - Quadrilateral / polygon: `[v0, .., vn-1]`, a triangle fan anchored at
//!   `v0` with sub-triangles `(v0, vi, vi+1)`; the first containing
//!   sub-triangle supplies the weights, scattered over the full ring.
//!
//! All tests use the (x, y) projection only; z of a query location never
//! affects containment. Boundary points are inside (weights accepted within
//! tolerance, clamped and renormalized so they still sum to one). The fan
//! covers convex and star-shaped-from-`v0` rings; rings concave away from
//! `v0` may misreport containment near the notch.

use crate::mesh_error::MeshExtractError;
use crate::topology::cell_type::CellType;

const EPS: f64 = 1e-12;
/// Tolerance on normalized barycentric weights for boundary-inclusive tests.
const WEIGHT_TOL: f64 = 1e-9;

/// Barycentric weights of `location` inside triangle `(a, b, c)`.
///
/// Returns `None` when the point lies outside the triangle or the triangle
/// is degenerate. Works for both orientations; weights are signed-area
/// ratios, clamped at the boundary and renormalized to sum to one.
pub fn triangle_weights(
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
    location: [f64; 3],
) -> Option<[f64; 3]> {
    let (a, b, c, p) = (xy(a), xy(b), xy(c), xy(location));
    let area = cross(sub(b, a), sub(c, a));
    if area.abs() <= EPS * norm(sub(b, a)) * norm(sub(c, a)) {
        return None;
    }
    let inv = 1.0 / area;
    let mut w = [
        cross(sub(b, p), sub(c, p)) * inv,
        cross(sub(c, p), sub(a, p)) * inv,
        cross(sub(a, p), sub(b, p)) * inv,
    ];
    if w.iter().any(|&wi| wi < -WEIGHT_TOL) {
        return None;
    }
    for wi in &mut w {
        if *wi < 0.0 {
            *wi = 0.0;
        }
    }
    let sum = w[0] + w[1] + w[2];
    Some([w[0] / sum, w[1] / sum, w[2] / sum])
}

/// Interpolation weights of `location` over a cell's vertex ring.
///
/// `Ok(Some(w))` holds one weight per ring vertex (summing to one) when the
/// cell contains the location; `Ok(None)` when it does not. For quads and
/// polygons the fan sub-triangles are visited in order and the first
/// containing one wins, so points on an interior fan diagonal resolve
/// deterministically.
///
/// # Errors
/// Returns `Err(InvalidGeometry)` when the slice length disagrees with the
/// cell type.
pub fn interpolation_weights(
    cell_type: CellType,
    vertices: &[[f64; 3]],
    location: [f64; 3],
) -> Result<Option<Vec<f64>>, MeshExtractError> {
    check_ring(cell_type, vertices)?;
    match cell_type {
        CellType::Triangle => {
            Ok(triangle_weights(vertices[0], vertices[1], vertices[2], location)
                .map(|w| w.to_vec()))
        }
        CellType::Quadrilateral | CellType::Polygon(_) => {
            let n = vertices.len();
            for i in 1..n - 1 {
                if let Some(w) =
                    triangle_weights(vertices[0], vertices[i], vertices[i + 1], location)
                {
                    let mut ring = vec![0.0; n];
                    ring[0] = w[0];
                    ring[i] = w[1];
                    ring[i + 1] = w[2];
                    return Ok(Some(ring));
                }
            }
            Ok(None)
        }
    }
}

/// Containment test without materializing weights.
///
/// # Errors
/// Returns `Err(InvalidGeometry)` when the slice length disagrees with the
/// cell type.
pub fn cell_contains_point(
    cell_type: CellType,
    vertices: &[[f64; 3]],
    location: [f64; 3],
) -> Result<bool, MeshExtractError> {
    check_ring(cell_type, vertices)?;
    match cell_type {
        CellType::Triangle => {
            Ok(triangle_weights(vertices[0], vertices[1], vertices[2], location).is_some())
        }
        CellType::Quadrilateral | CellType::Polygon(_) => {
            let n = vertices.len();
            Ok((1..n - 1).any(|i| {
                triangle_weights(vertices[0], vertices[i], vertices[i + 1], location).is_some()
            }))
        }
    }
}

/// Local vertex-index pairs of the edges where a cell's interpolant can
/// change slope: the outer ring edges plus the interior fan diagonals
/// `(0, i)`. A polyline sampled at every crossing of these edges is
/// piecewise linear in the interpolated scalar between samples.
pub fn interpolation_edges(cell_type: CellType, ring_len: usize) -> Vec<(usize, usize)> {
    let n = ring_len;
    let mut edges = Vec::with_capacity(2 * n);
    for i in 0..n {
        edges.push((i, (i + 1) % n));
    }
    if !matches!(cell_type, CellType::Triangle) {
        for i in 2..n.saturating_sub(1) {
            edges.push((0, i));
        }
    }
    edges
}

fn check_ring(cell_type: CellType, vertices: &[[f64; 3]]) -> Result<(), MeshExtractError> {
    let expected = cell_type.vertex_count();
    if vertices.len() != expected {
        return Err(MeshExtractError::InvalidGeometry(format!(
            "vertex count mismatch: expected {expected}, got {}",
            vertices.len()
        )));
    }
    if expected < 3 {
        return Err(MeshExtractError::InvalidGeometry(format!(
            "cell type {cell_type:?} has no interior"
        )));
    }
    Ok(())
}

#[inline]
fn xy(p: [f64; 3]) -> [f64; 2] {
    [p[0], p[1]]
}

fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn cross(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[1] - a[1] * b[0]
}

fn norm(a: [f64; 2]) -> f64 {
    (a[0] * a[0] + a[1] * a[1]).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    const TRI: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    #[test]
    fn triangle_vertices_and_midpoints_are_exact() {
        let w = triangle_weights(TRI[0], TRI[1], TRI[2], [0.0, 0.0, 0.0]).unwrap();
        assert!(approx(w[0], 1.0) && approx(w[1], 0.0) && approx(w[2], 0.0));
        let w = triangle_weights(TRI[0], TRI[1], TRI[2], [0.5, 0.5, 0.0]).unwrap();
        assert!(approx(w[0], 0.0) && approx(w[1], 0.5) && approx(w[2], 0.5));
        let w = triangle_weights(TRI[0], TRI[1], TRI[2], [0.25, 0.25, 0.0]).unwrap();
        assert!(approx(w[0], 0.5) && approx(w[1], 0.25) && approx(w[2], 0.25));
    }

    #[test]
    fn triangle_rejects_outside_points() {
        assert!(triangle_weights(TRI[0], TRI[1], TRI[2], [0.6, 0.6, 0.0]).is_none());
        assert!(triangle_weights(TRI[0], TRI[1], TRI[2], [-0.1, 0.5, 0.0]).is_none());
    }

    #[test]
    fn clockwise_ring_behaves_like_counterclockwise() {
        let w_ccw = triangle_weights(TRI[0], TRI[1], TRI[2], [0.2, 0.3, 0.0]).unwrap();
        let w_cw = triangle_weights(TRI[0], TRI[2], TRI[1], [0.2, 0.3, 0.0]).unwrap();
        assert!(approx(w_ccw[0], w_cw[0]));
        assert!(approx(w_ccw[1], w_cw[2]));
        assert!(approx(w_ccw[2], w_cw[1]));
    }

    #[test]
    fn degenerate_triangle_contains_nothing() {
        let a = [0.0, 0.0, 0.0];
        let b = [1.0, 0.0, 0.0];
        let c = [2.0, 0.0, 0.0];
        assert!(triangle_weights(a, b, c, [0.5, 0.0, 0.0]).is_none());
    }

    #[test]
    fn z_of_the_query_is_ignored() {
        let w_flat = triangle_weights(TRI[0], TRI[1], TRI[2], [0.25, 0.25, 0.0]).unwrap();
        let w_high = triangle_weights(TRI[0], TRI[1], TRI[2], [0.25, 0.25, 100.0]).unwrap();
        assert_eq!(w_flat, w_high);
    }

    const QUAD: [[f64; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];

    #[test]
    fn quad_fan_weights_reproduce_known_values() {
        // scalars [0, 2, 3, 1] on the unit quad; values checked by hand
        let scalars = [0.0, 2.0, 3.0, 1.0];
        for (loc, want) in [
            ([0.25, 0.5, 0.0], 1.0),
            ([0.5, 0.5, 0.0], 1.5),
            ([0.75, 0.5, 0.0], 2.0),
        ] {
            let w = interpolation_weights(CellType::Quadrilateral, &QUAD, loc)
                .unwrap()
                .unwrap();
            let v: f64 = w.iter().zip(scalars).map(|(wi, s)| wi * s).sum();
            assert!(approx(v, want), "at {loc:?}: got {v}, want {want}");
        }
    }

    #[test]
    fn quad_weights_sum_to_one_and_reproduce_the_point() {
        let loc = [0.3, 0.8, 0.0];
        let w = interpolation_weights(CellType::Quadrilateral, &QUAD, loc)
            .unwrap()
            .unwrap();
        assert!(approx(w.iter().sum::<f64>(), 1.0));
        let x: f64 = w.iter().zip(QUAD).map(|(wi, v)| wi * v[0]).sum();
        let y: f64 = w.iter().zip(QUAD).map(|(wi, v)| wi * v[1]).sum();
        assert!(approx(x, loc[0]) && approx(y, loc[1]));
    }

    #[test]
    fn quad_outside_yields_none() {
        let got = interpolation_weights(CellType::Quadrilateral, &QUAD, [1.5, 0.5, 0.0]).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn pentagon_fan_covers_all_sub_triangles() {
        let ring = [
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [3.0, 2.0, 0.0],
            [1.0, 3.0, 0.0],
            [-1.0, 2.0, 0.0],
        ];
        for loc in [
            [1.0, 0.5, 0.0],
            [2.0, 1.5, 0.0],
            [0.0, 1.5, 0.0],
            [1.0, 2.5, 0.0],
        ] {
            let w = interpolation_weights(CellType::Polygon(5), &ring, loc)
                .unwrap()
                .unwrap();
            assert!(approx(w.iter().sum::<f64>(), 1.0));
        }
        let outside =
            interpolation_weights(CellType::Polygon(5), &ring, [3.0, 0.0, 0.0]).unwrap();
        assert!(outside.is_none());
    }

    #[test]
    fn ring_length_mismatch_is_invalid_geometry() {
        let err = interpolation_weights(CellType::Triangle, &QUAD, [0.5, 0.5, 0.0]).unwrap_err();
        assert!(matches!(err, MeshExtractError::InvalidGeometry(_)));
    }

    #[test]
    fn contains_agrees_with_weights() {
        for loc in [[0.5, 0.5, 0.0], [1.5, 0.5, 0.0], [0.0, 0.0, 0.0]] {
            let via_weights = interpolation_weights(CellType::Quadrilateral, &QUAD, loc)
                .unwrap()
                .is_some();
            let direct = cell_contains_point(CellType::Quadrilateral, &QUAD, loc).unwrap();
            assert_eq!(via_weights, direct);
        }
    }

    #[test]
    fn interpolation_edges_cover_ring_and_diagonals() {
        assert_eq!(
            interpolation_edges(CellType::Triangle, 3),
            vec![(0, 1), (1, 2), (2, 0)]
        );
        assert_eq!(
            interpolation_edges(CellType::Quadrilateral, 4),
            vec![(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]
        );
        assert_eq!(
            interpolation_edges(CellType::Polygon(5), 5),
            vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2), (0, 3)]
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Any point sampled as a convex combination of triangle vertices is
        // found inside, with weights reproducing it.
        #[test]
        fn convex_combinations_round_trip(
            ax in -10.0..10.0f64, ay in -10.0..10.0f64,
            bx in -10.0..10.0f64, by in -10.0..10.0f64,
            cx in -10.0..10.0f64, cy in -10.0..10.0f64,
            u in 0.0..1.0f64, v in 0.0..1.0f64,
        ) {
            let (a, b, c) = ([ax, ay, 0.0], [bx, by, 0.0], [cx, cy, 0.0]);
            let area = ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).abs();
            prop_assume!(area > 1e-3);
            let (u, v) = if u + v > 1.0 { (1.0 - u, 1.0 - v) } else { (u, v) };
            let w0 = 1.0 - u - v;
            let p = [
                w0 * ax + u * bx + v * cx,
                w0 * ay + u * by + v * cy,
                0.0,
            ];
            let w = triangle_weights(a, b, c, p);
            prop_assert!(w.is_some());
            let w = w.unwrap();
            let px = w[0] * ax + w[1] * bx + w[2] * cx;
            let py = w[0] * ay + w[1] * by + w[2] * cy;
            prop_assert!((px - p[0]).abs() < 1e-8);
            prop_assert!((py - p[1]).abs() < 1e-8);
            prop_assert!((w[0] + w[1] + w[2] - 1.0).abs() < 1e-12);
        }
    }
}
