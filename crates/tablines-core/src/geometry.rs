//! Rectangle geometry and reading order.
//!
//! Coordinates follow the rendered-page convention: origin at the top-left
//! corner, `y` increasing downward.

use std::cmp::Ordering;
use std::fmt;

use crate::text::TextDirection;

/// Absolute vertical overlap above which two boxes sit on the same visual line.
pub const VERTICAL_COMPARISON_THRESHOLD: f64 = 0.4;

/// A point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle stored as `top`, `left`, `width`, `height`.
///
/// Width and height are never negative: constructors and mutators normalize
/// inverted extents by swapping the offending edges.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    top: f64,
    left: f64,
    width: f64,
    height: f64,
}

impl Rectangle {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self::from_bounds(top, left, top + height, left + width)
    }

    /// Create a rectangle from its four edges, in any order per axis.
    pub fn from_bounds(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        let (top, bottom) = (top.min(bottom), top.max(bottom));
        let (left, right) = (left.min(right), left.max(right));
        Self {
            top,
            left,
            width: right - left,
            height: bottom - top,
        }
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Move the top edge, keeping the bottom edge in place.
    pub fn set_top(&mut self, top: f64) {
        *self = Self::from_bounds(top, self.left, self.bottom(), self.right());
    }

    /// Move the left edge, keeping the right edge in place.
    pub fn set_left(&mut self, left: f64) {
        *self = Self::from_bounds(self.top, left, self.bottom(), self.right());
    }

    /// Move the right edge, keeping the left edge in place.
    pub fn set_right(&mut self, right: f64) {
        *self = Self::from_bounds(self.top, self.left, self.bottom(), right);
    }

    /// Move the bottom edge, keeping the top edge in place.
    pub fn set_bottom(&mut self, bottom: f64) {
        *self = Self::from_bounds(self.top, self.left, bottom, self.right());
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn points(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left, self.bottom()),
        ]
    }

    pub fn vertical_overlap(&self, other: &Rectangle) -> f64 {
        (self.bottom().min(other.bottom()) - self.top.max(other.top)).max(0.0)
    }

    pub fn vertically_overlaps(&self, other: &Rectangle) -> bool {
        self.vertical_overlap(other) > 0.0
    }

    pub fn horizontal_overlap(&self, other: &Rectangle) -> f64 {
        (self.right().min(other.right()) - self.left.max(other.left)).max(0.0)
    }

    pub fn horizontally_overlaps(&self, other: &Rectangle) -> bool {
        self.horizontal_overlap(other) > 0.0
    }

    /// Fraction of the shorter rectangle's height covered by the vertical overlap.
    ///
    /// Returns 0 for disjoint rectangles, and also when the shorter of the
    /// two has zero height.
    pub fn vertical_overlap_ratio(&self, other: &Rectangle) -> f64 {
        let delta = self.height.min(other.height);
        if delta <= 0.0 {
            return 0.0;
        }

        let (top, bottom) = (self.top, self.bottom());
        let (o_top, o_bottom) = (other.top, other.bottom());

        let overlap = if o_top <= top && top <= o_bottom && o_bottom <= bottom {
            o_bottom - top
        } else if top <= o_top && o_top <= bottom && bottom <= o_bottom {
            bottom - o_top
        } else if top <= o_top && o_top <= o_bottom && o_bottom <= bottom {
            o_bottom - o_top
        } else if o_top <= top && top <= bottom && bottom <= o_bottom {
            bottom - top
        } else {
            0.0
        };

        overlap / delta
    }

    /// Intersection over union of the two rectangles.
    ///
    /// Symmetric and within `[0, 1]`. Two identical zero-area rectangles
    /// have ratio 1; any other pair with an empty union has ratio 0.
    pub fn overlap_ratio(&self, other: &Rectangle) -> f64 {
        let intersection = self.horizontal_overlap(other) * self.vertical_overlap(other);
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return if self == other { 1.0 } else { 0.0 };
        }
        (intersection / union).clamp(0.0, 1.0)
    }

    /// True when the rectangles touch or overlap (edges inclusive).
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.left <= other.right()
            && other.left <= self.right()
            && self.top <= other.bottom()
            && other.top <= self.bottom()
    }

    /// True when `other` lies entirely inside this rectangle (edges inclusive).
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.left <= other.left
            && self.top <= other.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Grow this rectangle to the union bounding box with `other`.
    pub fn merge(&mut self, other: &Rectangle) -> &mut Self {
        *self = Self::from_bounds(
            self.top.min(other.top),
            self.left.min(other.left),
            self.bottom().max(other.bottom()),
            self.right().max(other.right()),
        );
        self
    }

    /// Order two rectangles for reading using the default threshold.
    pub fn reading_order(&self, other: &Rectangle) -> Ordering {
        ReadingOrder::default().compare(self, other)
    }
}

/// Minimum bounding box containing every rectangle, or `None` for no input.
pub fn bounding_box_of<'a, I>(rectangles: I) -> Option<Rectangle>
where
    I: IntoIterator<Item = &'a Rectangle>,
{
    rectangles.into_iter().fold(None, |acc, r| match acc {
        None => Some(*r),
        Some(mut bbox) => {
            bbox.merge(r);
            Some(bbox)
        }
    })
}

/// Anything positioned on the page that takes part in reading order.
pub trait Bounded {
    fn bounds(&self) -> Rectangle;

    /// Dominant reading direction; plain rectangles have none.
    fn direction(&self) -> TextDirection {
        TextDirection::Neutral
    }
}

impl Bounded for Rectangle {
    fn bounds(&self) -> Rectangle {
        *self
    }
}

/// Renders as `[left, top, right, bottom] (width x height)`.
impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.2}, {:.2}, {:.2}, {:.2}] ({:.2} x {:.2})",
            self.left(),
            self.top(),
            self.right(),
            self.bottom(),
            self.width(),
            self.height()
        )
    }
}

/// Approximate visual reading order of page elements.
///
/// This is a heuristic, not a total order: three boxes can compare
/// inconsistently when their vertical overlaps chain across lines. Use it
/// for pairwise decisions rather than as a `sort_by` key on arbitrary
/// layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingOrder {
    /// Absolute vertical overlap above which boxes count as one line.
    pub vertical_threshold: f64,
}

impl Default for ReadingOrder {
    fn default() -> Self {
        Self {
            vertical_threshold: VERTICAL_COMPARISON_THRESHOLD,
        }
    }
}

impl ReadingOrder {
    /// Compare two elements.
    ///
    /// Identical bounds are equal. Elements on the same line order by their
    /// left edge, reversed when both read right-to-left; everything else
    /// orders by bottom edge.
    pub fn compare<A, B>(&self, a: &A, b: &B) -> Ordering
    where
        A: Bounded + ?Sized,
        B: Bounded + ?Sized,
    {
        let (ra, rb) = (a.bounds(), b.bounds());
        if ra == rb {
            return Ordering::Equal;
        }

        if ra.vertical_overlap(&rb) > self.vertical_threshold {
            let by_x = ra.left().total_cmp(&rb.left());
            if a.direction() == TextDirection::RightToLeft
                && b.direction() == TextDirection::RightToLeft
            {
                by_x.reverse()
            } else {
                by_x
            }
        } else {
            ra.bottom().total_cmp(&rb.bottom())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn test_rectangle_display() {
        let r = Rectangle::new(20.0, 10.0, 40.0, 30.5);
        assert_eq!(r.to_string(), "[10.00, 20.00, 50.00, 50.50] (40.00 x 30.50)");
    }

    #[test]
    fn test_rectangle_new_and_derived_edges() {
        let r = Rectangle::new(20.0, 10.0, 40.0, 30.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 50.0);
        assert_eq!(r.area(), 1200.0);
    }

    #[test]
    fn test_rectangle_negative_size_is_normalized() {
        let r = Rectangle::new(50.0, 40.0, -30.0, -20.0);
        assert_eq!(r, Rectangle::from_bounds(30.0, 10.0, 50.0, 40.0));
        assert!(r.width() >= 0.0 && r.height() >= 0.0);
    }

    #[test]
    fn test_setters_keep_opposite_edge() {
        let mut r = Rectangle::new(10.0, 10.0, 100.0, 100.0);
        r.set_top(30.0);
        assert_eq!(r.bottom(), 110.0);
        assert_eq!(r.height(), 80.0);

        r.set_left(60.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.width(), 50.0);

        r.set_right(200.0);
        assert_eq!(r.left(), 60.0);
        assert_eq!(r.width(), 140.0);

        r.set_bottom(50.0);
        assert_eq!(r.top(), 30.0);
        assert_eq!(r.height(), 20.0);
    }

    #[test]
    fn test_set_top_past_bottom_swaps_edges() {
        let mut r = Rectangle::new(10.0, 0.0, 10.0, 10.0);
        r.set_top(40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 40.0);
    }

    #[test]
    fn test_overlaps() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        let b = Rectangle::new(5.0, 8.0, 10.0, 10.0);
        assert_eq!(a.vertical_overlap(&b), 5.0);
        assert_eq!(a.horizontal_overlap(&b), 2.0);
        assert!(a.vertically_overlaps(&b));
        assert!(a.horizontally_overlaps(&b));

        let far = Rectangle::new(100.0, 100.0, 5.0, 5.0);
        assert_eq!(a.vertical_overlap(&far), 0.0);
        assert!(!a.horizontally_overlaps(&far));
    }

    #[test]
    fn test_vertical_overlap_ratio_cases() {
        let base = Rectangle::new(10.0, 0.0, 10.0, 20.0); // 10..30

        // other starts above and ends inside
        let above = Rectangle::new(0.0, 0.0, 10.0, 20.0); // 0..20
        assert_approx(base.vertical_overlap_ratio(&above), 0.5);

        // other starts inside and ends below
        let below = Rectangle::new(25.0, 0.0, 10.0, 20.0); // 25..45
        assert_approx(base.vertical_overlap_ratio(&below), 0.25);

        // other fully inside
        let inner = Rectangle::new(15.0, 0.0, 10.0, 5.0); // 15..20
        assert_approx(base.vertical_overlap_ratio(&inner), 1.0);

        // this fully inside other
        assert_approx(inner.vertical_overlap_ratio(&base), 1.0);

        // disjoint
        let far = Rectangle::new(100.0, 0.0, 10.0, 5.0);
        assert_eq!(base.vertical_overlap_ratio(&far), 0.0);
    }

    #[test]
    fn test_vertical_overlap_ratio_zero_height() {
        let flat = Rectangle::new(15.0, 0.0, 10.0, 0.0);
        let base = Rectangle::new(10.0, 0.0, 10.0, 20.0);
        assert_eq!(base.vertical_overlap_ratio(&flat), 0.0);
    }

    #[test]
    fn test_overlap_ratio_identical_is_one() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert_approx(a.overlap_ratio(&a), 1.0);
    }

    #[test]
    fn test_overlap_ratio_symmetric_and_bounded() {
        let pairs = [
            (
                Rectangle::new(0.0, 0.0, 10.0, 10.0),
                Rectangle::new(5.0, 5.0, 10.0, 10.0),
            ),
            (
                Rectangle::new(0.0, 0.0, 10.0, 10.0),
                Rectangle::new(2.0, 2.0, 3.0, 3.0),
            ),
            (
                Rectangle::new(0.0, 0.0, 10.0, 10.0),
                Rectangle::new(50.0, 50.0, 3.0, 3.0),
            ),
            (
                Rectangle::new(0.0, 0.0, 0.0, 0.0),
                Rectangle::new(1.0, 1.0, 0.0, 0.0),
            ),
        ];
        for (a, b) in pairs {
            let ab = a.overlap_ratio(&b);
            let ba = b.overlap_ratio(&a);
            assert_approx(ab, ba);
            assert!((0.0..=1.0).contains(&ab));
            assert!(ab < 1.0, "non-identical pair must not reach 1: {a:?} {b:?}");
        }
        // 25 / (100 + 100 - 25)
        assert_approx(pairs[0].0.overlap_ratio(&pairs[0].1), 25.0 / 175.0);
    }

    #[test]
    fn test_overlap_ratio_degenerate_identical() {
        let p = Rectangle::new(3.0, 3.0, 0.0, 0.0);
        assert_eq!(p.overlap_ratio(&p), 1.0);
    }

    #[test]
    fn test_merge_chains() {
        let mut a = Rectangle::new(10.0, 10.0, 10.0, 10.0);
        let b = Rectangle::new(0.0, 15.0, 30.0, 5.0);
        let c = Rectangle::new(40.0, 0.0, 1.0, 1.0);
        a.merge(&b).merge(&c);
        assert_eq!(a, Rectangle::from_bounds(0.0, 0.0, 41.0, 45.0));
    }

    #[test]
    fn test_bounding_box_of_single_is_identity() {
        let a = Rectangle::new(3.0, 4.0, 5.0, 6.0);
        assert_eq!(bounding_box_of([&a]), Some(a));
    }

    #[test]
    fn test_bounding_box_of_many() {
        let rects = [
            Rectangle::new(10.0, 10.0, 5.0, 5.0),
            Rectangle::new(-5.0, 20.0, 5.0, 5.0),
            Rectangle::new(30.0, 0.0, 1.0, 1.0),
        ];
        let bbox = bounding_box_of(&rects).unwrap();
        assert_eq!(bbox, Rectangle::from_bounds(-5.0, 0.0, 31.0, 25.0));
    }

    #[test]
    fn test_bounding_box_of_empty_is_none() {
        let empty: [Rectangle; 0] = [];
        assert_eq!(bounding_box_of(&empty), None);
    }

    #[test]
    fn test_intersects_and_contains() {
        let outer = Rectangle::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rectangle::new(10.0, 10.0, 10.0, 10.0);
        let straddle = Rectangle::new(90.0, 90.0, 20.0, 20.0);
        let touching = Rectangle::new(100.0, 100.0, 5.0, 5.0);
        assert!(outer.contains(&inner));
        assert!(!outer.contains(&straddle));
        assert!(outer.intersects(&straddle));
        assert!(outer.intersects(&touching));
        assert!(!inner.intersects(&touching));
    }

    #[test]
    fn test_points_clockwise() {
        let r = Rectangle::new(1.0, 2.0, 3.0, 4.0);
        let [tl, tr, br, bl] = r.points();
        assert_eq!(tl, Point::new(2.0, 1.0));
        assert_eq!(tr, Point::new(5.0, 1.0));
        assert_eq!(br, Point::new(5.0, 5.0));
        assert_eq!(bl, Point::new(2.0, 5.0));
    }

    #[test]
    fn test_reading_order_equal() {
        let a = Rectangle::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(a.reading_order(&a), Ordering::Equal);
    }

    #[test]
    fn test_reading_order_stacked_by_bottom() {
        let first = Rectangle::new(0.0, 50.0, 10.0, 10.0);
        let second = Rectangle::new(20.0, 0.0, 10.0, 10.0);
        let third = Rectangle::new(40.0, 100.0, 10.0, 10.0);
        assert_eq!(first.reading_order(&second), Ordering::Less);
        assert_eq!(second.reading_order(&third), Ordering::Less);
        assert_eq!(third.reading_order(&first), Ordering::Greater);
    }

    #[test]
    fn test_reading_order_same_line_left_first() {
        let a = Rectangle::new(100.0, 10.0, 20.0, 12.0);
        let b = Rectangle::new(101.0, 50.0, 20.0, 12.0);
        assert!(a.vertical_overlap_ratio(&b) > 0.4);
        assert_eq!(a.reading_order(&b), Ordering::Less);
        assert_eq!(b.reading_order(&a), Ordering::Greater);
    }

    struct Rtl(Rectangle);

    impl Bounded for Rtl {
        fn bounds(&self) -> Rectangle {
            self.0
        }

        fn direction(&self) -> TextDirection {
            TextDirection::RightToLeft
        }
    }

    #[test]
    fn test_reading_order_reversed_when_both_rtl() {
        let a = Rtl(Rectangle::new(100.0, 10.0, 20.0, 12.0));
        let b = Rtl(Rectangle::new(100.0, 50.0, 20.0, 12.0));
        let order = ReadingOrder::default();
        assert_eq!(order.compare(&a, &b), Ordering::Greater);

        // mixed directions keep left-to-right
        assert_eq!(order.compare(&a.0, &b), Ordering::Less);
    }

    #[test]
    fn test_reading_order_custom_threshold() {
        let a = Rectangle::new(0.0, 50.0, 10.0, 10.0);
        let b = Rectangle::new(8.0, 0.0, 10.0, 10.0); // 2pt overlap
        let strict = ReadingOrder {
            vertical_threshold: 5.0,
        };
        assert_eq!(strict.compare(&a, &b), Ordering::Less); // by bottom
        assert_eq!(ReadingOrder::default().compare(&a, &b), Ordering::Greater); // by left
    }
}
