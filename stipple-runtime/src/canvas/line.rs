use crate::layout::Point;

/// Cells of the segment from `from` toward `to`, in travel order.
///
/// The range is half-open: `from` is the first cell yielded and `to` is never yielded,
/// whichever way the segment points. Consecutive segments of a stroke share an endpoint,
/// so this keeps every cell of the joint plotted exactly once.
///
/// The axis with the larger travel drives the iteration (the x axis on exact diagonals).
/// The other coordinate is the exact value of the line through both endpoints,
/// truncated toward zero.
pub fn segment(from: Point, to: Point) -> Segment {
    let delta = to - from;
    let axis = if delta.x.abs() >= delta.y.abs() {
        Axis::X
    } else {
        Axis::Y
    };
    let (start, end) = match axis {
        Axis::X => (from.x, to.x),
        Axis::Y => (from.y, to.y),
    };

    Segment {
        from,
        delta,
        axis,
        step: (end - start).signum(),
        next: start,
        end,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Iterator returned by [`segment`]
#[derive(Clone, Debug)]
pub struct Segment {
    from: Point,
    delta: Point,
    axis: Axis,
    step: i32,
    next: i32,
    end: i32,
}
impl Segment {
    /// The dependent coordinate at driving coordinate `i`.
    ///
    /// Evaluated as one integer fraction so that exact diagonals and other
    /// whole-number crossings never land one cell short.
    fn across(&self, i: i32) -> i32 {
        let (origin, origin_cross, run, rise) = match self.axis {
            Axis::X => (self.from.x, self.from.y, self.delta.x, self.delta.y),
            Axis::Y => (self.from.y, self.from.x, self.delta.y, self.delta.x),
        };
        if rise == 0 {
            return origin_cross;
        }
        let (origin, origin_cross, run, rise) = (
            i64::from(origin),
            i64::from(origin_cross),
            i64::from(run),
            i64::from(rise),
        );
        // `/` on i64 truncates toward zero, for either sign of `run`
        ((origin_cross * run + (i64::from(i) - origin) * rise) / run) as i32
    }
}
impl Iterator for Segment {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.next == self.end {
            return None;
        }
        let i = self.next;
        self.next += self.step;

        let cross = self.across(i);
        Some(match self.axis {
            Axis::X => Point::new(i, cross),
            Axis::Y => Point::new(cross, i),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next).unsigned_abs() as usize;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for Segment {}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
        segment(from.into(), to.into()).map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn zero_length_is_empty() {
        assert!(cells((3, 3), (3, 3)).is_empty());
    }

    #[test]
    fn horizontal_excludes_the_far_end() {
        assert_eq!(cells((0, 0), (5, 0)), [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(cells((5, 0), (0, 0)), [(5, 0), (4, 0), (3, 0), (2, 0), (1, 0)]);
    }

    #[test]
    fn vertical_excludes_the_far_end() {
        assert_eq!(cells((2, 1), (2, 4)), [(2, 1), (2, 2), (2, 3)]);
        assert_eq!(cells((2, 4), (2, 1)), [(2, 4), (2, 3), (2, 2)]);
    }

    #[test]
    fn diagonals() {
        assert_eq!(cells((0, 0), (3, 3)), [(0, 0), (1, 1), (2, 2)]);
        assert_eq!(cells((3, 0), (0, 3)), [(3, 0), (2, 1), (1, 2)]);
        assert_eq!(cells((3, 3), (0, 0)), [(3, 3), (2, 2), (1, 1)]);
    }

    #[test]
    fn shallow_slope_truncates() {
        assert_eq!(cells((0, 0), (4, 2)), [(0, 0), (1, 0), (2, 1), (3, 1)]);
        assert_eq!(cells((4, 2), (0, 0)), [(4, 2), (3, 1), (2, 1), (1, 0)]);
    }

    #[test]
    fn steep_slope_drives_on_y() {
        assert_eq!(cells((0, 0), (2, 4)), [(0, 0), (0, 1), (1, 2), (1, 3)]);
        assert_eq!(cells((1, 0), (0, 3)), [(1, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn steep_thirds_do_not_drift() {
        // x = y / 3 lands exactly on whole cells at y = 3 and y = 6
        assert_eq!(
            cells((0, 0), (3, 9)),
            [(0, 0), (0, 1), (0, 2), (1, 3), (1, 4), (1, 5), (2, 6), (2, 7), (2, 8)]
        );
    }

    #[test]
    fn segment_length_is_driving_travel() {
        let seg = segment(Point::new(10, 10), Point::new(-7, 2));
        assert_eq!(seg.len(), 17);
        assert_eq!(seg.last(), Some(Point::new(-6, 2)));
    }
}
