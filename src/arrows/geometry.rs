//! Box geometry and orthogonal arrow routes.

/// Vertical drop below the source box before turning.
pub const CLEARANCE: f64 = 4.0;

/// Boxes whose tops differ by less than this sit on the same row.
pub const SAME_ROW_TOLERANCE: f64 = 30.0;

/// Horizontal offsets up to this are drawn as a straight drop.
const ALIGN_TOLERANCE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// A diagram box in absolute document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoxRect {
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn center_bottom(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height)
    }

    pub fn center_top(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y)
    }
}

/// Index of the box whose `anchor` point is closest to `point`.
///
/// Ties go to the earlier box.
pub fn nearest(boxes: &[BoxRect], point: Point, anchor: fn(BoxRect) -> Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, b) in boxes.iter().enumerate() {
        let dist = point.distance(anchor(*b));
        if best.is_none_or(|(_, d)| dist < d) {
            best = Some((i, dist));
        }
    }
    best.map(|(i, _)| i)
}

/// Path data for an arrow from `source` to `target`.
///
/// Boxes on one row are joined center to center. Otherwise the arrow leaves
/// the source's bottom center, drops [`CLEARANCE`], runs across and ends at
/// the target's top center.
pub fn route(source: BoxRect, target: BoxRect) -> String {
    if (source.y - target.y).abs() < SAME_ROW_TOLERANCE {
        let (from, to) = (source.center(), target.center());
        return format!("M {:.1} {:.1} L {:.1} {:.1}", from.x, from.y, to.x, to.y);
    }

    let start = source.center_bottom();
    let end = target.center_top();
    let turn_y = start.y + CLEARANCE;

    if (start.x - end.x).abs() > ALIGN_TOLERANCE {
        format!(
            "M {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1}",
            start.x, start.y, start.x, turn_y, end.x, turn_y, end.x, end.y
        )
    } else {
        format!(
            "M {:.1} {:.1} L {:.1} {:.1} L {:.1} {:.1}",
            start.x, start.y, start.x, turn_y, end.x, end.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP: BoxRect = BoxRect {
        x: 100.0,
        y: 50.0,
        width: 120.0,
        height: 40.0,
    };

    #[test]
    fn test_route_across_rows() {
        let below = BoxRect {
            x: 200.0,
            y: 150.0,
            width: 120.0,
            height: 40.0,
        };
        assert_eq!(
            route(TOP, below),
            "M 160.0 90.0 L 160.0 94.0 L 260.0 94.0 L 260.0 150.0"
        );
    }

    #[test]
    fn test_route_straight_drop_when_aligned() {
        let below = BoxRect {
            x: 100.5,
            y: 150.0,
            width: 120.0,
            height: 40.0,
        };
        assert_eq!(route(TOP, below), "M 160.0 90.0 L 160.0 94.0 L 160.5 150.0");
    }

    #[test]
    fn test_route_same_row_center_to_center() {
        let beside = BoxRect {
            x: 300.0,
            y: 60.0,
            width: 100.0,
            height: 40.0,
        };
        assert_eq!(route(TOP, beside), "M 160.0 70.0 L 350.0 80.0");
    }

    #[test]
    fn test_nearest_by_anchor() {
        let below = BoxRect {
            x: 100.0,
            y: 150.0,
            width: 120.0,
            height: 40.0,
        };
        let boxes = [TOP, below];
        assert_eq!(
            nearest(&boxes, Point::new(158.0, 95.0), BoxRect::center_bottom),
            Some(0)
        );
        assert_eq!(
            nearest(&boxes, Point::new(158.0, 145.0), BoxRect::center_top),
            Some(1)
        );
        assert_eq!(nearest(&[], Point::new(0.0, 0.0), BoxRect::center), None);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let boxes = [TOP, TOP];
        assert_eq!(
            nearest(&boxes, TOP.center_bottom(), BoxRect::center_bottom),
            Some(0)
        );
    }
}
