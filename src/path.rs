use crate::{
    BBox, EPSILON, ImageOwned, Line, PI, Point, Scalar,
    rasterize::{signed_difference_line, signed_difference_to_mask},
};
use std::fmt;

/// Maximum distance between flattened arc and the real one
pub const DEFAULT_FLATNESS: Scalar = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// Closed polygon, last point is implicitly connected to the first one
#[derive(Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point>,
}

impl fmt::Debug for Contour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, point) in self.points.iter().enumerate() {
            let cmd = if index == 0 { 'M' } else { 'L' };
            write!(f, "{}{:?} ", cmd, point)?;
        }
        write!(f, "Z")
    }
}

impl Contour {
    /// Create contour, returns `None` if points do not enclose any area
    pub fn new(mut points: Vec<Point>) -> Option<Self> {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) {
            if points.len() > 1 && first.is_close_to(last) {
                points.pop();
            }
        }
        (points.len() > 2).then_some(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Edges of the contour, including the closing one
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        let closing = self.points[self.points.len() - 1];
        let starts = std::iter::once(closing).chain(self.points.iter().copied());
        starts.zip(self.points.iter().copied()).map(|(p0, p1)| Line::new(p0, p1))
    }

    /// Signed area, positive for clockwise contours (y axis points down)
    pub fn area(&self) -> Scalar {
        self.lines()
            .map(|Line([p0, p1])| p0.x() * p1.y() - p1.x() * p0.y())
            .sum::<Scalar>()
            / 2.0
    }

    pub fn bbox(&self) -> BBox {
        let first = self.points[0];
        self.points
            .iter()
            .fold(BBox::new(first, first), |bbox, point| {
                bbox.union(BBox::new(*point, *point))
            })
    }
}

/// Collection of contours treated as a single unit
#[derive(Clone, PartialEq, Default)]
pub struct Path {
    contours: Vec<Contour>,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contours.is_empty() {
            write!(f, "Empty")?;
        } else {
            for contour in self.contours.iter() {
                contour.fmt(f)?
            }
        }
        Ok(())
    }
}

impl Path {
    pub fn new(contours: Vec<Contour>) -> Self {
        Self { contours }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Convenience method to create `PathBuilder`
    pub fn builder() -> PathBuilder {
        PathBuilder::new()
    }

    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// All edges of all contours
    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.contours.iter().flat_map(Contour::lines)
    }

    pub fn bbox(&self) -> Option<BBox> {
        self.contours.iter().fold(None, |bbox, contour| match bbox {
            None => Some(contour.bbox()),
            Some(bbox) => Some(bbox.union(contour.bbox())),
        })
    }

    /// Rasterize coverage mask of the path into an image of the provided size.
    ///
    /// Everything outside of the image is cropped.
    pub fn mask(&self, width: usize, height: usize, fill_rule: FillRule) -> ImageOwned<Scalar> {
        let mut mask = ImageOwned::new_default(height, width);
        for line in self.lines() {
            signed_difference_line(&mut mask, line);
        }
        signed_difference_to_mask(&mut mask, fill_rule);
        mask
    }
}

/// Path builder similar to Canvas/Cairo interface.
///
/// Curves are flattened into lines as they are added.
#[derive(Clone)]
pub struct PathBuilder {
    position: Point,
    flatness: Scalar,
    contour: Vec<Point>,
    contours: Vec<Contour>,
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::with_flatness(DEFAULT_FLATNESS)
    }

    pub fn with_flatness(flatness: Scalar) -> Self {
        Self {
            position: Point::new(0.0, 0.0),
            flatness: flatness.max(EPSILON),
            contour: Vec::new(),
            contours: Vec::new(),
        }
    }

    /// Build path
    pub fn build(&mut self) -> Path {
        self.close();
        Path::new(std::mem::take(&mut self.contours))
    }

    /// Move current position, ending current contour
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        self.close();
        self.position = p.into();
        self
    }

    /// Close current contour
    pub fn close(&mut self) -> &mut Self {
        let contour = std::mem::take(&mut self.contour);
        if let Some(first) = contour.first() {
            self.position = *first;
        }
        self.contours.extend(Contour::new(contour));
        self
    }

    /// Add line from the current position to the specified point
    pub fn line_to(&mut self, p: impl Into<Point>) -> &mut Self {
        let p = p.into();
        if self.contour.is_empty() {
            self.contour.push(self.position);
        }
        if !self.position.is_close_to(p) {
            self.contour.push(p);
            self.position = p;
        }
        self
    }

    /// Add circular arc with `center` and `radius`, starting at `start` angle and
    /// going `sweep` radians clockwise.
    ///
    /// Line is added from the current position to the start of the arc.
    pub fn arc_to(
        &mut self,
        center: impl Into<Point>,
        radius: Scalar,
        start: Scalar,
        sweep: Scalar,
    ) -> &mut Self {
        let center = center.into();
        let radius = radius.abs();
        if radius < EPSILON {
            return self.line_to(center);
        }
        let count = arc_segments_count(radius, sweep, self.flatness);
        self.line_to(center.polar(radius, start));
        for index in 1..=count {
            let angle = start + sweep * (index as Scalar) / (count as Scalar);
            self.line_to(center.polar(radius, angle));
        }
        self
    }

    /// Add box with rounded corners, with current position being low-x and low-y coordinate
    ///
    /// Radius is clamped to half of the shorter side. Current position is not changed.
    pub fn rbox(&mut self, size: impl Into<Point>, radius: Scalar) -> &mut Self {
        let size = size.into();
        let low = self.position;
        let lx = low.x();
        let ly = low.y();
        let hx = lx + size.x().abs();
        let hy = ly + size.y().abs();
        let r = radius.abs().min((hx - lx).min(hy - ly) / 2.0);

        self.move_to((lx + r, ly))
            .line_to((hx - r, ly))
            .arc_to((hx - r, ly + r), r, -PI / 2.0, PI / 2.0)
            .line_to((hx, hy - r))
            .arc_to((hx - r, hy - r), r, 0.0, PI / 2.0)
            .line_to((lx + r, hy))
            .arc_to((lx + r, hy - r), r, PI / 2.0, PI / 2.0)
            .line_to((lx, ly + r))
            .arc_to((lx + r, ly + r), r, PI, PI / 2.0)
            .close()
            .move_to(low)
    }
}

/// Number of lines needed to approximate an arc within `flatness`
fn arc_segments_count(radius: Scalar, sweep: Scalar, flatness: Scalar) -> usize {
    if flatness >= radius {
        return 1;
    }
    let step = 2.0 * (1.0 - flatness / radius).acos();
    ((sweep.abs() / step).ceil() as usize).max(1)
}
