//! Cubic to quadratic conversion for TrueType outlines.

use kurbo::{BezPath, CubicBez, PathEl, Point};

/// Rewrite `path` with quadratic curves only, within `accuracy` units.
///
/// Subpaths with fewer than two segments enclose no area and are dropped.
pub fn to_quadratic(path: &BezPath, accuracy: f64) -> BezPath {
    let mut out = BezPath::new();
    let mut subpath: Vec<PathEl> = Vec::new();
    let mut last = Point::ZERO;
    let mut start = Point::ZERO;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                flush(&mut out, &mut subpath);
                subpath.push(PathEl::MoveTo(p));
                last = p;
                start = p;
            }
            PathEl::LineTo(p) => {
                subpath.push(PathEl::LineTo(p));
                last = p;
            }
            PathEl::QuadTo(p1, p2) => {
                subpath.push(PathEl::QuadTo(p1, p2));
                last = p2;
            }
            PathEl::CurveTo(p1, p2, p3) => {
                for (_, _, quad) in CubicBez::new(last, p1, p2, p3).to_quads(accuracy) {
                    subpath.push(PathEl::QuadTo(quad.p1, quad.p2));
                }
                last = p3;
            }
            PathEl::ClosePath => {
                subpath.push(PathEl::ClosePath);
                last = start;
            }
        }
    }
    flush(&mut out, &mut subpath);

    out
}

fn flush(out: &mut BezPath, subpath: &mut Vec<PathEl>) {
    let segments = subpath
        .iter()
        .filter(|el| matches!(el, PathEl::LineTo(_) | PathEl::QuadTo(..)))
        .count();
    if segments >= 2 && matches!(subpath.first(), Some(PathEl::MoveTo(_))) {
        for el in subpath.iter() {
            out.push(*el);
        }
    }
    subpath.clear();
}
