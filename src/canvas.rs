use crate::{
    BBox, Color, FillRule, Image, ImageMut, ImageOwned, LinColor, Path, RGBA, Scalar,
};

/// Stroke drawn along the inner side of a shape boundary
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outline {
    pub color: RGBA,
    pub width: Scalar,
}

/// Box with rounded corners spanning pixels from `min` to `max` inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundedRect {
    pub min: (u32, u32),
    pub max: (u32, u32),
    pub radius: Scalar,
    pub fill: RGBA,
    pub outline: Option<Outline>,
}

impl RoundedRect {
    pub const fn new(min: (u32, u32), max: (u32, u32), radius: Scalar, fill: RGBA) -> Self {
        Self {
            min,
            max,
            radius,
            fill,
            outline: None,
        }
    }

    pub const fn with_outline(self, color: RGBA, width: Scalar) -> Self {
        Self {
            outline: Some(Outline { color, width }),
            ..self
        }
    }

    /// Area covered by the shape
    pub fn bbox(&self) -> BBox {
        BBox::from_pixels(self.min, self.max)
    }

    /// Outer boundary of the shape
    pub fn path(&self) -> Path {
        rbox_path(self.bbox(), self.radius)
    }

    /// Area painted with the fill color.
    ///
    /// With an outline it is the box inset by the outline width, with the radius
    /// reduced by the same amount.
    pub fn fill_path(&self) -> Path {
        match self.outline {
            None => self.path(),
            Some(outline) => {
                let width = outline.width.max(0.0);
                match self.bbox().inset(width) {
                    Some(inner) => rbox_path(inner, (self.radius - width).max(0.0)),
                    None => Path::empty(),
                }
            }
        }
    }
}

fn rbox_path(bbox: BBox, radius: Scalar) -> Path {
    Path::builder()
        .move_to(bbox.min())
        .rbox(bbox.size(), radius)
        .build()
}

/// Drawing surface, pixels are stored as premultiplied linear colors
#[derive(Debug, Clone)]
pub struct Canvas {
    image: ImageOwned<LinColor>,
}

impl Canvas {
    /// Create fully transparent canvas
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image: ImageOwned::new_default(height, width),
        }
    }

    pub fn width(&self) -> usize {
        self.image.width()
    }

    pub fn height(&self) -> usize {
        self.image.height()
    }

    /// Composite `color` over the canvas wherever the path covers it
    pub fn fill(&mut self, path: &Path, fill_rule: FillRule, color: LinColor) {
        let mask = path.mask(self.width(), self.height(), fill_rule);
        for (dst, coverage) in self.image.data_mut().iter_mut().zip(mask.iter()) {
            if *coverage > 0.0 {
                *dst = dst.blend_over(color.with_alpha(*coverage));
            }
        }
    }

    /// Draw rounded rectangle, outline first and the fill on top of it
    pub fn draw(&mut self, shape: &RoundedRect) {
        tracing::debug!("[draw] {:?}", shape);
        if let Some(outline) = shape.outline {
            self.fill(&shape.path(), FillRule::NonZero, outline.color.into());
        }
        self.fill(&shape.fill_path(), FillRule::NonZero, shape.fill.into());
    }

    /// Convert canvas into an sRGB image ready to be encoded
    pub fn into_rgba(self) -> ImageOwned<RGBA> {
        self.image.map(RGBA::from)
    }
}
