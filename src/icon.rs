//! Battery icon with five charge segments
//!
//! Every coordinate is an inclusive pixel position on a 128×200 canvas.
use crate::{Canvas, Error, Image, ImageOwned, RGBA, RoundedRect, Scalar};
use std::{
    fs::File,
    io::{BufWriter, Write},
};

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 200;

/// Location of the rendered icon, relative to the working directory
pub const OUTPUT_PATH: &str = "assets/wprime-icon.png";

const DARK: RGBA = RGBA::rgb(0x222222);

const BODY: RoundedRect = RoundedRect::new((14, 22), (114, 198), 18.0, RGBA::WHITE)
    .with_outline(DARK, 10.0);
const CONNECTOR: RoundedRect = RoundedRect::new((46, 7), (82, 27), 6.0, DARK);

const SEGMENT_LEFT: u32 = 30;
const SEGMENT_MIDDLE: u32 = 64;
const SEGMENT_RIGHT: u32 = 98;
const SEGMENT_HEIGHT: u32 = 24;
const SEGMENT_RADIUS: Scalar = 6.0;

/// One of the charge bands of the battery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDescriptor {
    /// Top row of the band
    pub y: u32,
    pub base: RGBA,
    pub highlight: RGBA,
}

/// Charge bands from top (full) to bottom (critical)
pub const SEGMENTS: [SegmentDescriptor; 5] = [
    SegmentDescriptor {
        y: 38,
        base: RGBA::rgb(0x57CA3B),
        highlight: RGBA::rgb(0x7DDF77),
    },
    SegmentDescriptor {
        y: 68,
        base: RGBA::rgb(0xD6E84B),
        highlight: RGBA::rgb(0xE5EF87),
    },
    SegmentDescriptor {
        y: 98,
        base: RGBA::rgb(0xF9C233),
        highlight: RGBA::rgb(0xFFE170),
    },
    SegmentDescriptor {
        y: 128,
        base: RGBA::rgb(0xFC8923),
        highlight: RGBA::rgb(0xFFBC7C),
    },
    SegmentDescriptor {
        y: 158,
        base: RGBA::rgb(0xEF2A2A),
        highlight: RGBA::rgb(0xFF6161),
    },
];

impl SegmentDescriptor {
    /// Full width band in the base color
    pub fn base_band(&self) -> RoundedRect {
        RoundedRect::new(
            (SEGMENT_LEFT, self.y),
            (SEGMENT_RIGHT, self.y + SEGMENT_HEIGHT),
            SEGMENT_RADIUS,
            self.base,
        )
    }

    /// Left half of the band in the highlight color
    pub fn highlight_band(&self) -> RoundedRect {
        RoundedRect::new(
            (SEGMENT_LEFT, self.y),
            (SEGMENT_MIDDLE, self.y + SEGMENT_HEIGHT),
            SEGMENT_RADIUS,
            self.highlight,
        )
    }
}

/// Ordered list of shapes, later shapes are drawn over earlier ones
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Icon {
    pub width: usize,
    pub height: usize,
    pub shapes: Vec<RoundedRect>,
}

impl Icon {
    /// Battery body, connector nub on top, then every segment's base band
    /// followed by its highlight
    pub fn battery() -> Self {
        let mut shapes = vec![BODY, CONNECTOR];
        for segment in SEGMENTS.iter() {
            shapes.push(segment.base_band());
            shapes.push(segment.highlight_band());
        }
        Self {
            width: WIDTH,
            height: HEIGHT,
            shapes,
        }
    }

    /// Draw all shapes onto a transparent canvas
    pub fn render(&self) -> ImageOwned<RGBA> {
        let mut canvas = Canvas::new(self.width, self.height);
        for shape in self.shapes.iter() {
            canvas.draw(shape);
        }
        canvas.into_rgba()
    }

    /// Description of the icon as JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Shapes of the battery icon in drawing order
pub fn build_icon() -> Icon {
    Icon::battery()
}

/// Render the battery icon
pub fn render_icon() -> ImageOwned<RGBA> {
    tracing::debug_span!("[render]").in_scope(|| build_icon().render())
}

/// Encode image as PNG and save it to `path`.
///
/// Existing file is overwritten, missing parent directory is an error.
pub fn write_icon(
    image: &impl Image<Pixel = RGBA>,
    path: impl AsRef<std::path::Path>,
) -> Result<(), Error> {
    let path = path.as_ref();
    let _save = tracing::debug_span!("[save]", path = %path.display()).entered();
    let mut out = BufWriter::new(File::create(path)?);
    tracing::debug_span!("[encode]").in_scope(|| image.write_png(&mut out))?;
    out.flush()?;
    Ok(())
}
