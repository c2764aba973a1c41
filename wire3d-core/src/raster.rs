/// Integer line rasterization (Bresenham error accumulation)
use crate::projection::ScreenPoint;

/// Iterator over the cells of a line, both endpoints included.
///
/// The tie-breaking of the error term depends on direction, so walking
/// `a -> b` and `b -> a` can pick different cells on shallow slopes. Use
/// [`rasterize`] when the cell set must not depend on endpoint order.
#[derive(Debug, Clone)]
pub struct Line {
    x: i32,
    y: i32,
    end: ScreenPoint,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    done: bool,
}

impl Line {
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        // i64 keeps the error term exact across the whole i32 plane
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = -(i64::from(end.y) - i64::from(start.y)).abs();
        Self {
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for Line {
    type Item = ScreenPoint;

    fn next(&mut self) -> Option<ScreenPoint> {
        if self.done {
            return None;
        }

        let current = ScreenPoint::new(self.x, self.y);
        if current == self.end {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // Never fewer steps than the major axis, never more than both axes
        let rx = (i64::from(self.end.x) - i64::from(self.x)).unsigned_abs() as usize;
        let ry = (i64::from(self.end.y) - i64::from(self.y)).unsigned_abs() as usize;
        (rx.max(ry) + 1, rx.checked_add(ry).and_then(|n| n.checked_add(1)))
    }
}

/// Cells on the segment from `(x1, y1)` to `(x2, y2)`, in order.
///
/// The line is always walked from the lexicographically smaller endpoint,
/// so swapping the endpoints yields the same cells in reverse order.
pub fn rasterize(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<ScreenPoint> {
    let start = ScreenPoint::new(x1, y1);
    let end = ScreenPoint::new(x2, y2);
    if (x2, y2) < (x1, y1) {
        let mut cells: Vec<_> = Line::new(end, start).collect();
        cells.reverse();
        cells
    } else {
        Line::new(start, end).collect()
    }
}

/// Clip a segment to the cell rectangle `[0, width) x [0, height)`.
///
/// Liang-Barsky on the integer endpoints. Endpoints already inside are
/// returned unchanged; clipped ones are rounded to the nearest cell on the
/// border. Returns `None` when the segment misses the rectangle.
pub fn clip_segment(
    start: ScreenPoint,
    end: ScreenPoint,
    width: usize,
    height: usize,
) -> Option<(ScreenPoint, ScreenPoint)> {
    if width == 0 || height == 0 {
        return None;
    }
    let x_max = (width - 1) as f64;
    let y_max = (height - 1) as f64;
    let inside = |p: ScreenPoint| {
        (0.0..=x_max).contains(&f64::from(p.x)) && (0.0..=y_max).contains(&f64::from(p.y))
    };
    if inside(start) && inside(end) {
        return Some((start, end));
    }

    let (x0, y0) = (f64::from(start.x), f64::from(start.y));
    let dx = f64::from(end.x) - x0;
    let dy = f64::from(end.y) - y0;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0), (dx, x_max - x0), (-dy, y0), (dy, y_max - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |p: ScreenPoint, t: f64| {
        if inside(p) && (t == 0.0 || t == 1.0) {
            return p;
        }
        let x = (x0 + t * dx).round().clamp(0.0, x_max);
        let y = (y0 + t * dy).round().clamp(0.0, y_max);
        ScreenPoint::new(x as i32, y as i32)
    };
    Some((at(start, t0), at(end, t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pts(coords: &[(i32, i32)]) -> Vec<ScreenPoint> {
        coords.iter().map(|&(x, y)| ScreenPoint::new(x, y)).collect()
    }

    fn assert_connected(line: &[ScreenPoint]) {
        for pair in line.windows(2) {
            let ddx = (pair[1].x - pair[0].x).abs();
            let ddy = (pair[1].y - pair[0].y).abs();
            assert!(ddx <= 1 && ddy <= 1, "gap between {:?}", pair);
            assert!(ddx + ddy >= 1, "repeated cell {:?}", pair[0]);
        }
    }

    #[test]
    fn test_zero_length() {
        assert_eq!(rasterize(0, 0, 0, 0), pts(&[(0, 0)]));
        assert_eq!(rasterize(-4, 9, -4, 9), pts(&[(-4, 9)]));
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(
            rasterize(0, 0, 5, 0),
            pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)])
        );
        assert_eq!(rasterize(2, 3, 0, 3), pts(&[(2, 3), (1, 3), (0, 3)]));
    }

    #[test]
    fn test_vertical() {
        assert_eq!(rasterize(1, 0, 1, 3), pts(&[(1, 0), (1, 1), (1, 2), (1, 3)]));
        assert_eq!(rasterize(1, 2, 1, 0), pts(&[(1, 2), (1, 1), (1, 0)]));
    }

    #[test]
    fn test_diagonal() {
        let line = rasterize(0, 0, 3, 3);
        assert_eq!(line, pts(&[(0, 0), (1, 1), (2, 2), (3, 3)]));
        assert_connected(&line);
    }

    #[test]
    fn test_shallow_and_steep() {
        for (x1, y1, x2, y2) in [(0, 0, 7, 2), (0, 0, 2, 7), (5, -3, -6, 4), (10, 10, 1, 0)] {
            let line = rasterize(x1, y1, x2, y2);
            assert_eq!(line.first(), Some(&ScreenPoint::new(x1, y1)));
            assert_eq!(line.last(), Some(&ScreenPoint::new(x2, y2)));
            let major = (x2 - x1).abs().max((y2 - y1).abs()) as usize;
            assert!(line.len() >= major + 1);
            assert_connected(&line);
        }
    }

    #[test]
    fn test_reverse_covers_same_cells() {
        let cases = [
            (0, 0, 5, 0),
            (0, 0, 3, 3),
            (0, 0, 7, 2),
            (3, 1, 0, 8),
            (-2, 4, 9, -1),
            (12, 30, 27, 9),
        ];
        for (a, b, c, d) in cases {
            let forward: HashSet<_> = rasterize(a, b, c, d).into_iter().collect();
            let backward: HashSet<_> = rasterize(c, d, a, b).into_iter().collect();
            assert_eq!(forward, backward, "({a},{b}) -> ({c},{d})");
        }
    }

    #[test]
    fn test_reverse_is_exact_mirror() {
        let forward = rasterize(10, 10, 1, 0);
        let mut backward = rasterize(1, 0, 10, 10);
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_extreme_endpoints_do_not_overflow() {
        let start = ScreenPoint::new(i32::MIN, 0);
        let end = ScreenPoint::new(i32::MAX, 3);
        let line = Line::new(start, end);
        let (lower, _) = line.size_hint();
        assert_eq!(lower, u32::MAX as usize + 1);

        let head: Vec<_> = line.take(3).collect();
        assert_eq!(head[0], start);
        assert_connected(&head);
    }

    #[test]
    fn test_clip_inside_is_untouched() {
        let a = ScreenPoint::new(2, 3);
        let b = ScreenPoint::new(9, 0);
        assert_eq!(clip_segment(a, b, 10, 10), Some((a, b)));
    }

    #[test]
    fn test_clip_huge_horizontal() {
        let a = ScreenPoint::new(-1_950_000_000, 19);
        let b = ScreenPoint::new(1_950_000_000, 19);
        assert_eq!(
            clip_segment(a, b, 40, 40),
            Some((ScreenPoint::new(0, 19), ScreenPoint::new(39, 19)))
        );
        assert_eq!(
            clip_segment(b, a, 40, 40),
            Some((ScreenPoint::new(39, 19), ScreenPoint::new(0, 19)))
        );
    }

    #[test]
    fn test_clip_one_end_outside() {
        let (a, b) = clip_segment(ScreenPoint::new(5, 5), ScreenPoint::new(5, -100), 10, 10).unwrap();
        assert_eq!(a, ScreenPoint::new(5, 5));
        assert_eq!(b, ScreenPoint::new(5, 0));

        let (a, b) = clip_segment(ScreenPoint::new(-10, -10), ScreenPoint::new(4, 4), 10, 10).unwrap();
        assert_eq!(a, ScreenPoint::new(0, 0));
        assert_eq!(b, ScreenPoint::new(4, 4));
    }

    #[test]
    fn test_clip_miss() {
        assert_eq!(
            clip_segment(ScreenPoint::new(-5, 0), ScreenPoint::new(-1, 9), 10, 10),
            None
        );
        assert_eq!(
            clip_segment(ScreenPoint::new(20, -30), ScreenPoint::new(-30, 5), 10, 10),
            None
        );
        assert_eq!(
            clip_segment(ScreenPoint::new(0, 0), ScreenPoint::new(1, 1), 0, 10),
            None
        );
    }

    #[test]
    fn test_size_hint_bounds_length() {
        let line = Line::new(ScreenPoint::new(0, 0), ScreenPoint::new(9, 4));
        let (lower, upper) = line.size_hint();
        let len = line.count();
        assert!(lower <= len);
        assert!(upper.map_or(true, |u| len <= u));
    }
}
