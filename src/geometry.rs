use std::{
    fmt,
    ops::{Add, Div, Mul, Sub},
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;
pub const PI: f64 = std::f64::consts::PI;

/// Format floats in a compact way
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq)]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)?;
        Ok(())
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Get length of the vector (distance from the origin)
    pub fn length(self) -> Scalar {
        let Self([x, y]) = self;
        x.hypot(y)
    }

    /// Distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Point on the circle with the center at `self`, `radius` and `angle` measured
    /// clockwise (y axis points down) from the positive x axis.
    pub fn polar(self, radius: Scalar, angle: Scalar) -> Self {
        let (sin, cos) = angle.sin_cos();
        self + Point::new(radius * cos, radius * sin)
    }

    /// Determine if self is close to the other within the margin of error (EPSILON)
    pub fn is_close_to(self, other: Point) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < EPSILON && (y0 - y1).abs() < EPSILON
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Div<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: Scalar) -> Self::Output {
        let Point([x, y]) = self;
        Point([x / rhs, y / rhs])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

/// Straight line segment
#[derive(Clone, Copy, PartialEq)]
pub struct Line(pub [Point; 2]);

impl Line {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

/// Bounding box with sides directed along the axes
#[derive(Clone, Copy, PartialEq)]
pub struct BBox {
    /// Point with minimal x and y values
    min: Point,
    /// Point with maximum x and y values
    max: Point,
}

impl BBox {
    /// Construct bounding box which includes points `p0` and `p1`
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            min: Point([x0, y0]),
            max: Point([x1, y1]),
        }
    }

    /// Bounding box covering pixels from `p0` to `p1` inclusive.
    ///
    /// Pixel `(x, y)` occupies `[x, x + 1) × [y, y + 1)`, so the far corner is
    /// extended by one pixel.
    pub fn from_pixels(p0: (u32, u32), p1: (u32, u32)) -> Self {
        let bbox = Self::new(
            (p0.0 as Scalar, p0.1 as Scalar),
            (p1.0 as Scalar, p1.1 as Scalar),
        );
        Self {
            min: bbox.min,
            max: bbox.max + Point::new(1.0, 1.0),
        }
    }

    /// Point with minimum values of x and y coordinates
    #[inline]
    pub fn min(&self) -> Point {
        self.min
    }

    /// Point with maximum values of x and y coordinates
    #[inline]
    pub fn max(&self) -> Point {
        self.max
    }

    /// `x` coordinate of the point with the minimal value
    #[inline]
    pub fn x(&self) -> Scalar {
        self.min.x()
    }

    /// `y` coordinate of the point with the minimal value
    #[inline]
    pub fn y(&self) -> Scalar {
        self.min.y()
    }

    /// Width of the bounding box
    #[inline]
    pub fn width(&self) -> Scalar {
        self.max.x() - self.min.x()
    }

    /// Height of the bounding box
    #[inline]
    pub fn height(&self) -> Scalar {
        self.max.y() - self.min.y()
    }

    /// Size of the bounding box as a vector
    pub fn size(&self) -> Point {
        self.max - self.min
    }

    /// Shrink bounding box by `offset` on every side.
    ///
    /// Returns `None` if nothing is left.
    pub fn inset(&self, offset: Scalar) -> Option<BBox> {
        let delta = Point::new(offset, offset);
        let min = self.min + delta;
        let max = self.max - delta;
        if min.x() >= max.x() || min.y() >= max.y() {
            None
        } else {
            Some(BBox { min, max })
        }
    }

    /// Create bounding box that spans both bbox-es
    pub fn union(&self, other: BBox) -> Self {
        Self {
            min: Point::new(
                self.min.x().min(other.min.x()),
                self.min.y().min(other.min.y()),
            ),
            max: Point::new(
                self.max.x().max(other.max.x()),
                self.max.y().max(other.max.y()),
            ),
        }
    }
}

impl fmt::Debug for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BBox x=")?;
        scalar_fmt(f, self.x())?;
        write!(f, ", y=")?;
        scalar_fmt(f, self.y())?;
        write!(f, ", w=")?;
        scalar_fmt(f, self.width())?;
        write!(f, ", h=")?;
        scalar_fmt(f, self.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_bbox_from_pixels() {
        let bbox = BBox::from_pixels((14, 22), (114, 198));
        assert!(bbox.min().is_close_to(Point::new(14.0, 22.0)));
        assert!(bbox.max().is_close_to(Point::new(115.0, 199.0)));
        assert_approx_eq!(bbox.width(), 101.0);
        assert_approx_eq!(bbox.height(), 177.0);

        // corners are normalized
        let flipped = BBox::from_pixels((114, 198), (14, 22));
        assert!(flipped == bbox);
    }

    #[test]
    fn test_bbox_inset() {
        let bbox = BBox::new((0.0, 0.0), (10.0, 4.0));
        let inner = bbox.inset(1.0).unwrap();
        assert!(inner.min().is_close_to(Point::new(1.0, 1.0)));
        assert!(inner.max().is_close_to(Point::new(9.0, 3.0)));
        assert!(bbox.inset(2.0).is_none());
    }

    #[test]
    fn test_bbox_union() {
        let b0 = BBox::new((0.0, 1.0), (2.0, 3.0));
        let b1 = BBox::new((1.0, -1.0), (5.0, 2.0));
        let u = b0.union(b1);
        assert!(u.min().is_close_to(Point::new(0.0, -1.0)));
        assert!(u.max().is_close_to(Point::new(5.0, 3.0)));
    }

    #[test]
    fn test_polar() {
        let center = Point::new(1.0, 1.0);
        let p = center.polar(2.0, PI / 2.0);
        assert_approx_eq!(p.x(), 1.0, 1e-9);
        assert_approx_eq!(p.y(), 3.0, 1e-9);
        assert_approx_eq!(p.dist(center), 2.0, 1e-9);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", Point::new(1.0, 0.5)), "1,0.5");
        assert_eq!(
            format!("{:?}", BBox::new((1.0, 2.0), (4.0, 6.0))),
            "BBox x=1, y=2, w=3, h=4"
        );
    }
}
