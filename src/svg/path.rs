//! Path-data decode, translate and encode.
//!
//! `svgtypes` provides the path mini-language parser; this module resolves
//! every command against the running current point so that all coordinates
//! are absolute, tracks each segment's start and end, and re-encodes the
//! result as a plain `d` string.
//!
//! Decoding is pure: parsing the same `d` string twice yields the same
//! segments, which lets the extraction and rewrite passes decode
//! independently without drifting.

use std::fmt;

use svgtypes::{PathParser, PathSegment};

use super::bounds::BoundingBox;
use super::error::NormalizeError;

/// A point in the SVG user coordinate system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// One decoded drawing operation with absolute control points.
///
/// Endpoints live on [`Segment`]; the op only carries what the endpoint
/// pair cannot express. Arc radii, rotation and flags are invariant under
/// translation and are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic {
        c1: Point,
        c2: Point,
    },
    SmoothCubic {
        c2: Point,
    },
    Quadratic {
        c: Point,
    },
    SmoothQuadratic,
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
    },
    Close,
}

/// A decoded path command with resolved absolute start and end points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub op: Op,
}

impl Segment {
    /// Whether the segment contributes geometry.
    ///
    /// A move only repositions the pen, and a close that starts where the
    /// subpath began draws nothing; neither produces a segment in the
    /// bounding-box sense.
    fn is_drawing(&self) -> bool {
        match self.op {
            Op::Move => false,
            Op::Close => self.start != self.end,
            _ => true,
        }
    }
}

/// An ordered sequence of decoded path segments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathData(pub Vec<Segment>);

impl PathData {
    /// Decode a `d` attribute value into absolute segments.
    ///
    /// Any syntax error in the mini-language is fatal for the whole path
    /// (and, at the file level, for the whole file).
    pub fn parse(d: &str) -> Result<Self, NormalizeError> {
        let mut segments = Vec::new();
        let mut cur = Point::new(0.0, 0.0);
        let mut subpath_start = cur;

        for seg in PathParser::from(d) {
            let seg = seg?;
            let start = cur;
            let (end, op) = resolve(&seg, cur, subpath_start);

            if matches!(op, Op::Move) {
                subpath_start = end;
            }
            cur = end;
            segments.push(Segment { start, end, op });
        }

        Ok(Self(segments))
    }

    /// Fold the start and end point of every drawing segment into `bbox`.
    pub fn fold_into(&self, bbox: &mut BoundingBox) {
        for seg in self.0.iter().filter(|s| s.is_drawing()) {
            bbox.fold_point(seg.start);
            bbox.fold_point(seg.end);
        }
    }

    /// Offset every coordinate (endpoints and control points) by `(dx, dy)`.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        let segments = self
            .0
            .iter()
            .map(|seg| Segment {
                start: seg.start.translated(dx, dy),
                end: seg.end.translated(dx, dy),
                op: match seg.op {
                    Op::Cubic { c1, c2 } => Op::Cubic {
                        c1: c1.translated(dx, dy),
                        c2: c2.translated(dx, dy),
                    },
                    Op::SmoothCubic { c2 } => Op::SmoothCubic {
                        c2: c2.translated(dx, dy),
                    },
                    Op::Quadratic { c } => Op::Quadratic {
                        c: c.translated(dx, dy),
                    },
                    other => other,
                },
            })
            .collect();
        Self(segments)
    }
}

/// Resolve one parsed command against the current point.
///
/// Returns the absolute end point and the op. Relative commands add the
/// current point; H/V inherit the missing coordinate from it.
fn resolve(seg: &PathSegment, cur: Point, subpath_start: Point) -> (Point, Op) {
    let base = |abs: bool| if abs { Point::new(0.0, 0.0) } else { cur };

    match *seg {
        PathSegment::MoveTo { abs, x, y } => {
            let b = base(abs);
            (Point::new(b.x + x, b.y + y), Op::Move)
        }
        PathSegment::LineTo { abs, x, y } => {
            let b = base(abs);
            (Point::new(b.x + x, b.y + y), Op::Line)
        }
        PathSegment::HorizontalLineTo { abs, x } => {
            let x = if abs { x } else { cur.x + x };
            (Point::new(x, cur.y), Op::Horizontal)
        }
        PathSegment::VerticalLineTo { abs, y } => {
            let y = if abs { y } else { cur.y + y };
            (Point::new(cur.x, y), Op::Vertical)
        }
        PathSegment::CurveTo {
            abs,
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => {
            let b = base(abs);
            (
                Point::new(b.x + x, b.y + y),
                Op::Cubic {
                    c1: Point::new(b.x + x1, b.y + y1),
                    c2: Point::new(b.x + x2, b.y + y2),
                },
            )
        }
        PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
            let b = base(abs);
            (
                Point::new(b.x + x, b.y + y),
                Op::SmoothCubic {
                    c2: Point::new(b.x + x2, b.y + y2),
                },
            )
        }
        PathSegment::Quadratic { abs, x1, y1, x, y } => {
            let b = base(abs);
            (
                Point::new(b.x + x, b.y + y),
                Op::Quadratic {
                    c: Point::new(b.x + x1, b.y + y1),
                },
            )
        }
        PathSegment::SmoothQuadratic { abs, x, y } => {
            let b = base(abs);
            (Point::new(b.x + x, b.y + y), Op::SmoothQuadratic)
        }
        PathSegment::EllipticalArc {
            abs,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x,
            y,
        } => {
            let b = base(abs);
            (
                Point::new(b.x + x, b.y + y),
                Op::Arc {
                    rx,
                    ry,
                    rotation: x_axis_rotation,
                    large_arc,
                    sweep,
                },
            )
        }
        PathSegment::ClosePath { .. } => (subpath_start, Op::Close),
    }
}

/// Plain decimal rendering of a coordinate.
///
/// `f64` `Display` never uses exponent notation and is locale-independent;
/// whole values render without a fractional part (`20.0` -> `"20"`).
fn fmt_number(out: &mut String, v: f64) {
    use std::fmt::Write;
    let _ = write!(out, "{v}");
}

impl fmt::Display for PathData {
    /// Encode back to a `d` string with absolute uppercase commands,
    /// space-separated operands and 0/1 arc flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for seg in &self.0 {
            if !out.is_empty() {
                out.push(' ');
            }
            match seg.op {
                Op::Move => {
                    out.push_str("M ");
                    push_point(&mut out, seg.end);
                }
                Op::Line => {
                    out.push_str("L ");
                    push_point(&mut out, seg.end);
                }
                Op::Horizontal => {
                    out.push_str("H ");
                    fmt_number(&mut out, seg.end.x);
                }
                Op::Vertical => {
                    out.push_str("V ");
                    fmt_number(&mut out, seg.end.y);
                }
                Op::Cubic { c1, c2 } => {
                    out.push_str("C ");
                    push_point(&mut out, c1);
                    out.push(' ');
                    push_point(&mut out, c2);
                    out.push(' ');
                    push_point(&mut out, seg.end);
                }
                Op::SmoothCubic { c2 } => {
                    out.push_str("S ");
                    push_point(&mut out, c2);
                    out.push(' ');
                    push_point(&mut out, seg.end);
                }
                Op::Quadratic { c } => {
                    out.push_str("Q ");
                    push_point(&mut out, c);
                    out.push(' ');
                    push_point(&mut out, seg.end);
                }
                Op::SmoothQuadratic => {
                    out.push_str("T ");
                    push_point(&mut out, seg.end);
                }
                Op::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                } => {
                    out.push_str("A ");
                    fmt_number(&mut out, rx);
                    out.push(' ');
                    fmt_number(&mut out, ry);
                    out.push(' ');
                    fmt_number(&mut out, rotation);
                    out.push(' ');
                    out.push(if large_arc { '1' } else { '0' });
                    out.push(' ');
                    out.push(if sweep { '1' } else { '0' });
                    out.push(' ');
                    push_point(&mut out, seg.end);
                }
                Op::Close => out.push('Z'),
            }
        }
        f.write_str(&out)
    }
}

fn push_point(out: &mut String, p: Point) {
    fmt_number(out, p.x);
    out.push(' ');
    fmt_number(out, p.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox_of(d: &str) -> BoundingBox {
        let mut bbox = BoundingBox::new();
        PathData::parse(d).unwrap().fold_into(&mut bbox);
        bbox
    }

    #[test]
    fn test_parse_absolute_line() {
        let path = PathData::parse("M 10 20 L 30 5").unwrap();
        assert_eq!(path.0.len(), 2);
        assert_eq!(path.0[1].start, Point::new(10.0, 20.0));
        assert_eq!(path.0[1].end, Point::new(30.0, 5.0));
    }

    #[test]
    fn test_parse_relative_commands() {
        let path = PathData::parse("m 10 20 l 5 5").unwrap();
        assert_eq!(path.to_string(), "M 10 20 L 15 25");
    }

    #[test]
    fn test_horizontal_and_vertical() {
        let path = PathData::parse("M 0 0 H 10 v 5 h -3").unwrap();
        assert_eq!(path.to_string(), "M 0 0 H 10 V 5 H 7");
        assert_eq!(path.0[3].end, Point::new(7.0, 5.0));
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let path = PathData::parse("M 0 0 10 10").unwrap();
        assert_eq!(path.to_string(), "M 0 0 L 10 10");
    }

    #[test]
    fn test_close_returns_to_subpath_start() {
        let path = PathData::parse("M 10 10 L 20 10 Z").unwrap();
        let close = path.0[2];
        assert_eq!(close.op, Op::Close);
        assert_eq!(close.start, Point::new(20.0, 10.0));
        assert_eq!(close.end, Point::new(10.0, 10.0));
        assert_eq!(path.to_string(), "M 10 10 L 20 10 Z");
    }

    #[test]
    fn test_relative_curve_absolutized() {
        let path = PathData::parse("M 10 10 c 1 2 3 4 5 6").unwrap();
        assert_eq!(path.to_string(), "M 10 10 C 11 12 13 14 15 16");
    }

    #[test]
    fn test_smooth_segments() {
        let path = PathData::parse("M 0 0 S 1 1 2 2 t 3 3").unwrap();
        assert_eq!(path.to_string(), "M 0 0 S 1 1 2 2 T 5 5");
    }

    #[test]
    fn test_arc_flags_and_radii_survive_translation() {
        let path = PathData::parse("M 0 0 a 5 5 30 1 0 10 0").unwrap();
        let moved = path.translate(2.0, 3.0);
        assert_eq!(moved.to_string(), "M 2 3 A 5 5 30 1 0 12 3");
    }

    #[test]
    fn test_translate_scenario() {
        // Scenario from the CLI contract: translate by the negated minimum
        let path = PathData::parse("M 10 20 L 30 5").unwrap();
        let moved = path.translate(-10.0, -20.0);
        assert_eq!(moved.to_string(), "M 0 15 L 20 0");
    }

    #[test]
    fn test_zero_translation_is_identity() {
        let path = PathData::parse("M 0 15 L 20 0").unwrap();
        assert_eq!(path.translate(0.0, 0.0).to_string(), "M 0 15 L 20 0");
    }

    #[test]
    fn test_bbox_folds_endpoints_only() {
        let bbox = bbox_of("M 10 20 L 30 5");
        assert_eq!(
            (bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y),
            (10.0, 5.0, 30.0, 20.0)
        );
    }

    #[test]
    fn test_lone_moveto_contributes_nothing() {
        assert!(!bbox_of("M 10 20").is_valid());
        assert!(!bbox_of("M 10 20 Z").is_valid());
    }

    #[test]
    fn test_curve_control_points_ignored_for_bbox() {
        // Control points may lie outside the endpoint box
        let bbox = bbox_of("M 0 0 C 100 100 -50 -50 10 10");
        assert_eq!(
            (bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y),
            (0.0, 0.0, 10.0, 10.0)
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = PathData::parse("m 1 2 l 3 4 z").unwrap();
        let second = PathData::parse("m 1 2 l 3 4 z").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_data_is_an_error() {
        assert!(PathData::parse("M 10 bogus").is_err());
        assert!(PathData::parse("L 10 20").is_err());
    }

    #[test]
    fn test_number_formatting_is_plain() {
        let path = PathData::parse("M 0.5 20.0 L 1e1 0.25").unwrap();
        assert_eq!(path.to_string(), "M 0.5 20 L 10 0.25");
    }
}
