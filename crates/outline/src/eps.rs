//! EPS outline import.
//!
//! Only the path construction operators are interpreted; everything else
//! (colour, stroke, procedure definitions) is skipped along with its operands.

use kurbo::{BezPath, Point, Vec2};
use log::trace;

/// Import the path operators of an EPS document, in PostScript units with y up.
pub fn import_eps(text: &str) -> BezPath {
    let body = text.find("%%EndProlog").map_or(text, |idx| &text[idx..]);
    let mut interpreter = PathInterpreter::default();

    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("%%Trailer") || trimmed.starts_with("%%EOF") {
            break;
        }
        let code = line.split('%').next().unwrap_or_default();
        for token in code.split_whitespace() {
            interpreter.token(token);
        }
    }

    interpreter.path
}

#[derive(Debug, Default)]
struct PathInterpreter {
    operands: Vec<f64>,
    path: BezPath,
    current: Option<Point>,
    start: Option<Point>,
}

impl PathInterpreter {
    fn token(&mut self, token: &str) {
        if let Ok(value) = token.parse::<f64>() {
            self.operands.push(value);
            return;
        }

        match token {
            "moveto" | "m" => {
                if let Some([x, y]) = self.take() {
                    self.move_to(Point::new(x, y));
                }
            }
            "rmoveto" => {
                if let (Some([dx, dy]), Some(current)) = (self.take(), self.current) {
                    self.move_to(current + Vec2::new(dx, dy));
                }
            }
            "lineto" | "l" | "L" => {
                if let (Some([x, y]), true) = (self.take(), self.current.is_some()) {
                    self.line_to(Point::new(x, y));
                }
            }
            "rlineto" => {
                if let (Some([dx, dy]), Some(current)) = (self.take(), self.current) {
                    self.line_to(current + Vec2::new(dx, dy));
                }
            }
            "curveto" | "c" | "C" => {
                if let (Some([x1, y1, x2, y2, x3, y3]), true) = (self.take(), self.current.is_some())
                {
                    self.curve_to(Point::new(x1, y1), Point::new(x2, y2), Point::new(x3, y3));
                }
            }
            "rcurveto" => {
                if let (Some([dx1, dy1, dx2, dy2, dx3, dy3]), Some(current)) =
                    (self.take(), self.current)
                {
                    self.curve_to(
                        current + Vec2::new(dx1, dy1),
                        current + Vec2::new(dx2, dy2),
                        current + Vec2::new(dx3, dy3),
                    );
                }
            }
            // First control point coincides with the current point.
            "v" | "V" => {
                if let (Some([x2, y2, x3, y3]), Some(current)) = (self.take(), self.current) {
                    self.curve_to(current, Point::new(x2, y2), Point::new(x3, y3));
                }
            }
            // Second control point coincides with the end point.
            "y" | "Y" => {
                if let (Some([x1, y1, x3, y3]), true) = (self.take(), self.current.is_some()) {
                    let end = Point::new(x3, y3);
                    self.curve_to(Point::new(x1, y1), end, end);
                }
            }
            "closepath" | "h" | "H" => self.close(),
            other => {
                trace!("skipping EPS operator {other}");
                self.operands.clear();
            }
        }
    }

    /// Pop the last `N` operands; clears the stack when there are too few.
    fn take<const N: usize>(&mut self) -> Option<[f64; N]> {
        if self.operands.len() < N {
            self.operands.clear();
            return None;
        }
        let values = self.operands.split_off(self.operands.len() - N);
        self.operands.clear();
        values.try_into().ok()
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
        self.current = Some(point);
        self.start = Some(point);
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(point);
        self.current = Some(point);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.path.curve_to(p1, p2, p3);
        self.current = Some(p3);
    }

    fn close(&mut self) {
        if self.current.is_some() {
            self.path.close_path();
            self.current = self.start;
        }
    }
}
