//! 2D segment-segment intersection in parametric form.
//!
//! The polyline segmenter needs every parameter `t` along a query segment
//! `a→b` where it meets a cell edge, endpoint touches and collinear overlaps
//! included. Orientation tests are scaled by the operand magnitudes so the
//! same code behaves identically on unit-square meshes and on UTM-scale
//! coordinates.

const EPS: f64 = 1e-12;
/// Parametric slack for accepting touches at segment endpoints.
const T_TOL: f64 = 1e-9;

/// Append every `t ∈ [0, 1]` where segment `a→b` meets segment `p→q`.
///
/// A proper or touching crossing contributes one `t`; a collinear overlap
/// contributes its entry and exit (so walking along an edge samples the
/// edge's endpoints). Out-of-range intersections contribute nothing.
/// Only x and y participate; z rides along via the caller's lerp.
pub fn segment_crossings(
    a: [f64; 3],
    b: [f64; 3],
    p: [f64; 3],
    q: [f64; 3],
    ts: &mut Vec<f64>,
) {
    let (a, b, p, q) = (xy(a), xy(b), xy(p), xy(q));
    let r = sub(b, a);
    let s = sub(q, p);
    let qp = sub(p, a);
    let rxs = cross(r, s);

    if rxs.abs() <= EPS * norm(r) * norm(s) {
        // parallel; overlap only if p lies on the carrier line of a→b
        if cross(qp, r).abs() > EPS * norm(qp) * norm(r) {
            return;
        }
        let rr = dot(r, r);
        if rr == 0.0 {
            return;
        }
        let tp = dot(qp, r) / rr;
        let tq = dot(sub(q, a), r) / rr;
        let (lo, hi) = if tp <= tq { (tp, tq) } else { (tq, tp) };
        let lo = lo.max(0.0);
        let hi = hi.min(1.0);
        if lo <= hi + T_TOL {
            ts.push(lo.clamp(0.0, 1.0));
            ts.push(hi.clamp(0.0, 1.0));
        }
        return;
    }

    let t = cross(qp, s) / rxs;
    let u = cross(qp, r) / rxs;
    if (-T_TOL..=1.0 + T_TOL).contains(&t) && (-T_TOL..=1.0 + T_TOL).contains(&u) {
        ts.push(t.clamp(0.0, 1.0));
    }
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

fn dot(a: [f64; 2], b: [f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

fn norm(a: [f64; 2]) -> f64 {
    dot(a, a).sqrt()
}
