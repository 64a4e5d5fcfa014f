#![allow(dead_code)]
use mesh_extract::prelude::*;

pub const NO_DATA: f64 = -999.0;

pub fn p(x: f64, y: f64) -> [f64; 3] {
    [x, y, 0.0]
}

/// Unit-square quadrilateral, counter-clockwise from the origin.
pub fn unit_quad() -> UnstructuredGrid {
    UnstructuredGrid::new(
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        vec![(CellType::Quadrilateral, vec![0, 1, 2, 3])],
    )
    .unwrap()
}

/// Two unit quads sharing the edge x=1, covering [0,2]x[0,1].
pub fn two_quads() -> UnstructuredGrid {
    UnstructuredGrid::new(
        vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
        ],
        vec![
            (CellType::Quadrilateral, vec![0, 1, 2, 3]),
            (CellType::Quadrilateral, vec![1, 4, 5, 2]),
        ],
    )
    .unwrap()
}

/// Two unit quads with a one-unit hole between them: [0,1] and [2,3] in x.
pub fn split_quads() -> UnstructuredGrid {
    UnstructuredGrid::new(
        vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(2.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 1.0),
            p(2.0, 1.0),
        ],
        vec![
            (CellType::Quadrilateral, vec![0, 1, 2, 3]),
            (CellType::Quadrilateral, vec![4, 5, 6, 7]),
        ],
    )
    .unwrap()
}

/// Unit square split into two triangles along the main diagonal.
pub fn triangle_pair() -> UnstructuredGrid {
    UnstructuredGrid::new(
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)],
        vec![
            (CellType::Triangle, vec![0, 1, 2]),
            (CellType::Triangle, vec![2, 3, 0]),
        ],
    )
    .unwrap()
}

/// Eight skewed triangles over a 3x3 block of nine points.
pub fn triangulated_block() -> UnstructuredGrid {
    UnstructuredGrid::new(
        vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(3.0, 0.0),
            p(0.0, 1.0),
            p(2.0, 1.0),
            p(3.0, 1.0),
            p(0.0, 2.0),
            p(1.0, 2.0),
            p(3.0, 2.0),
        ],
        vec![
            (CellType::Triangle, vec![0, 1, 3]),
            (CellType::Triangle, vec![1, 4, 3]),
            (CellType::Triangle, vec![1, 2, 4]),
            (CellType::Triangle, vec![2, 5, 4]),
            (CellType::Triangle, vec![3, 7, 6]),
            (CellType::Triangle, vec![3, 4, 7]),
            (CellType::Triangle, vec![4, 8, 7]),
            (CellType::Triangle, vec![4, 5, 8]),
        ],
    )
    .unwrap()
}

/// 4x3-point quad grid in UTM coordinates, taken from a river-reach model.
/// Rows run north to south, 6 km point spacing.
pub fn river_grid() -> UnstructuredGrid {
    let ys = [3_907_770.0, 3_901_770.0, 3_895_770.0];
    let mut points = Vec::new();
    for y in ys {
        for i in 0..4 {
            points.push([288_050.0 + 6_000.0 * i as f64, y, 0.0]);
        }
    }
    let cells = vec![
        (CellType::Quadrilateral, vec![0, 4, 5, 1]),
        (CellType::Quadrilateral, vec![1, 5, 6, 2]),
        (CellType::Quadrilateral, vec![2, 6, 7, 3]),
        (CellType::Quadrilateral, vec![4, 8, 9, 5]),
        (CellType::Quadrilateral, vec![5, 9, 10, 6]),
        (CellType::Quadrilateral, vec![6, 10, 11, 7]),
    ];
    UnstructuredGrid::new(points, cells).unwrap()
}

/// Sampling track crossing the river grid south to north, east along the
/// top, then back south through the third cell column.
pub fn river_polyline() -> Vec<[f64; 3]> {
    vec![
        p(290_764.0, 3_895_106.0),
        p(291_122.0, 3_909_108.0),
        p(302_772.0, 3_909_130.0),
        p(302_794.0, 3_895_775.0),
    ]
}

/// Refined sample locations the river polyline must produce.
pub fn river_locations() -> Vec<[f64; 2]> {
    vec![
        [290_764.0, 3_895_106.0],
        [290_780.9, 3_895_770.0],
        [290_862.4, 3_898_957.5],
        [290_934.3, 3_901_770.0],
        [291_012.0, 3_904_807.9],
        [291_087.7, 3_907_770.0],
        [291_122.0, 3_909_108.0],
        [302_772.0, 3_909_130.0],
        [302_774.2, 3_907_770.0],
        [302_778.7, 3_905_041.2],
        [302_784.1, 3_901_770.0],
        [302_788.6, 3_899_031.3],
        [302_794.0, 3_895_775.0],
    ]
}

/// Water-surface elevations at the river grid points, first output step.
pub fn river_scalars_step1() -> Vec<f64> {
    vec![
        730.787, 1214.54, 1057.145, 629.2069, 351.1153, 631.6649, 1244.366, 449.9133, 64.04247,
        240.9716, 680.0491, 294.9547,
    ]
}

/// Second output step; the north-west point has dried out to no-data.
pub fn river_scalars_step2() -> Vec<f64> {
    vec![
        -999.0, 1220.5, 1057.1, 613.2, 380.1, 625.6, 722.2, 449.9, 51.0, 240.9, 609.0, 294.9,
    ]
}

pub fn river_expected_step1() -> Vec<f64> {
    vec![
        -999.0, 144.5, 299.4, 485.9, 681.8, 975.7, -999.0, -999.0, 862.8, 780.9, 882.3, 811.0,
        504.4,
    ]
}

pub fn river_expected_step2() -> Vec<f64> {
    vec![
        -999.0, 137.4, 314.8, 498.1, -196.9, 124.7, -999.0, -999.0, 855.5, 780.9, 598.1, 527.1,
        465.4,
    ]
}

/// Elementwise compare with NaN equal to NaN.
pub fn assert_values(got: &[f64], want: &[f64], atol: f64) {
    assert_eq!(got.len(), want.len(), "length\n got={got:?}\nwant={want:?}");
    for (i, (g, w)) in got.iter().zip(want).enumerate() {
        let ok = if w.is_nan() {
            g.is_nan()
        } else {
            (g - w).abs() <= atol
        };
        assert!(ok, "value {i}: got {g}, want {w}\n got={got:?}\nwant={want:?}");
    }
}

/// Compare sampled locations against expected xy pairs.
pub fn assert_locations(got: &[[f64; 3]], want: &[[f64; 2]], atol: f64) {
    let got_xy: Vec<[f64; 2]> = got.iter().map(|p| [p[0], p[1]]).collect();
    assert_eq!(
        got_xy.len(),
        want.len(),
        "length\n got={got_xy:?}\nwant={want:?}"
    );
    for (i, (g, w)) in got_xy.iter().zip(want).enumerate() {
        assert!(
            (g[0] - w[0]).abs() <= atol && (g[1] - w[1]).abs() <= atol,
            "location {i}: got {g:?}, want {w:?}"
        );
    }
}
