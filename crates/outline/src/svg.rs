//! SVG outline import.

use kurbo::{Affine, BezPath, Point};
use log::debug;
use resvg::usvg::{
    Group, Node, Options, Transform, Tree,
    tiny_skia_path::{self, PathSegment},
};

use crate::{EmSquare, error::Result};

/// Remove `<switch>` wrappers, which some exporters put around the artwork.
pub fn strip_switch_tags(text: &str) -> String {
    text.replace("<switch>", "").replace("</switch>", "")
}

/// Import the filled shapes of an SVG document into font units.
///
/// The document is scaled uniformly so its height equals the em height, with
/// the top edge on the ascender and the y-axis pointing up. Paths without a
/// fill (stroke-only or `fill="none"`) contribute nothing.
pub fn import_svg(text: &str, em: &EmSquare) -> Result<BezPath> {
    let text = strip_switch_tags(text);
    let tree = Tree::from_str(&text, &Options::default())?;

    let scale = em.height() / f64::from(tree.size().height());
    let to_font = Affine::translate((0.0, em.ascent)) * Affine::scale_non_uniform(scale, -scale);

    let mut outline = BezPath::new();
    collect_filled(tree.root(), to_font, &mut outline);
    Ok(outline)
}

fn collect_filled(group: &Group, to_font: Affine, outline: &mut BezPath) {
    for node in group.children() {
        match node {
            Node::Group(group) => collect_filled(group, to_font, outline),
            Node::Path(path) => {
                if !path.is_visible() || path.fill().is_none() {
                    debug!("skipping unfilled path '{}'", path.id());
                    continue;
                }
                append_segments(path.data(), to_font * affine(path.abs_transform()), outline);
            }
            _ => {}
        }
    }
}

fn append_segments(data: &tiny_skia_path::Path, transform: Affine, outline: &mut BezPath) {
    let map = |p: tiny_skia_path::Point| transform * Point::new(f64::from(p.x), f64::from(p.y));
    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => outline.move_to(map(p)),
            PathSegment::LineTo(p) => outline.line_to(map(p)),
            PathSegment::QuadTo(p1, p) => outline.quad_to(map(p1), map(p)),
            PathSegment::CubicTo(p1, p2, p) => outline.curve_to(map(p1), map(p2), map(p)),
            PathSegment::Close => outline.close_path(),
        }
    }
}

fn affine(ts: Transform) -> Affine {
    Affine::new([ts.sx, ts.ky, ts.kx, ts.sy, ts.tx, ts.ty].map(f64::from))
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Shape};

    use super::*;
    use crate::OutlineError;

    fn em() -> EmSquare {
        EmSquare::new(448.0, 64.0)
    }

    fn bounds(svg: &str) -> Rect {
        import_svg(svg, &em()).unwrap().bounding_box()
    }

    fn assert_rect(actual: Rect, expected: (f64, f64, f64, f64)) {
        let close = |a: f64, b: f64| (a - b).abs() < 0.05;
        assert!(
            close(actual.x0, expected.0)
                && close(actual.y0, expected.1)
                && close(actual.x1, expected.2)
                && close(actual.y1, expected.3),
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn full_viewbox_fills_the_em() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
            <path d="M0 0H512V512H0Z"/>
        </svg>"#;
        assert_rect(bounds(svg), (0.0, -64.0, 512.0, 448.0));
    }

    #[test]
    fn scales_small_viewbox_to_em() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
            <rect x="0" y="0" width="12" height="24"/>
        </svg>"#;
        assert_rect(bounds(svg), (0.0, -64.0, 256.0, 448.0));
    }

    #[test]
    fn offset_viewbox_is_translated() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="10 10 512 512">
            <rect x="10" y="10" width="100" height="100"/>
        </svg>"#;
        assert_rect(bounds(svg), (0.0, 348.0, 100.0, 448.0));
    }

    #[test]
    fn falls_back_to_width_and_height() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="256px" height="256px">
            <rect width="256" height="128"/>
        </svg>"#;
        assert_rect(bounds(svg), (0.0, 192.0, 512.0, 448.0));
    }

    #[test]
    fn applies_group_transforms() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
            <g transform="translate(100, 0)">
                <g transform="scale(2)"><rect width="10" height="10"/></g>
            </g>
        </svg>"#;
        assert_rect(bounds(svg), (100.0, 428.0, 120.0, 448.0));
    }

    #[test]
    fn ignores_non_rendering_content() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
            <defs><rect width="512" height="512"/></defs>
            <g style="fill: red; display: none"><circle cx="0" cy="0" r="100"/></g>
            <rect x="0" y="0" width="10" height="10"/>
        </svg>"#;
        assert_rect(bounds(svg), (0.0, 438.0, 10.0, 448.0));
    }

    #[test]
    fn unfilled_shapes_leave_no_ink() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
            <path d="M0 0h24v24H0z" fill="none"/>
            <circle cx="12" cy="12" r="11" fill="none" stroke="black" stroke-width="2"/>
            <rect x="10" y="10" width="4" height="4"/>
        </svg>"#;
        assert_rect(bounds(svg), (213.33, 149.33, 298.67, 234.67));
    }

    #[test]
    fn resolves_use_references() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg"
                xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 512 512">
            <defs><path id="dot" d="M0 0h10v10H0z"/></defs>
            <use xlink:href="#dot" x="100" y="0"/>
        </svg>"##;
        assert_rect(bounds(svg), (100.0, 438.0, 110.0, 448.0));
    }

    #[test]
    fn honours_stylesheet_classes() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
            <style>.frame { fill: none; }</style>
            <rect class="frame" width="512" height="512"/>
            <rect width="10" height="10"/>
        </svg>"#;
        assert_rect(bounds(svg), (0.0, 438.0, 10.0, 448.0));
    }

    #[test]
    fn strips_switch_wrappers() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512"><switch><rect width="10" height="10"/></switch></svg>"#;
        assert_eq!(strip_switch_tags(svg).matches("switch").count(), 0);
        assert_rect(bounds(svg), (0.0, 438.0, 10.0, 448.0));
    }

    #[test]
    fn imports_basic_shapes() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
            <circle cx="100" cy="100" r="50"/>
            <ellipse cx="300" cy="100" rx="20" ry="10"/>
            <polygon points="400,400 450,400 450,450"/>
        </svg>"#;
        let outline = import_svg(svg, &em()).unwrap();
        let subpaths = outline
            .elements()
            .iter()
            .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
            .count();
        assert_eq!(subpaths, 3);
        assert_rect(outline.bounding_box(), (50.0, -2.0, 450.0, 398.0));
    }

    #[test]
    fn skips_degenerate_shapes() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512">
            <rect width="0" height="5"/><circle r="0"/><path d=""/>
        </svg>"#;
        assert!(import_svg(svg, &em()).unwrap().elements().is_empty());
    }

    #[test]
    fn reports_malformed_xml() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512"><path d="M0 0h1"#;
        assert!(matches!(import_svg(svg, &em()), Err(OutlineError::Svg(_))));
    }
}
