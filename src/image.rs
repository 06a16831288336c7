use crate::{Color, Error, RGBA};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    /// Width of the image
    pub width: usize,
    /// Height of the image
    pub height: usize,
    /// How many elements we need to skip to get to the next row.
    pub row_stride: usize,
    /// How many elements we need to skip to get to the next column.
    pub col_stride: usize,
}

impl Shape {
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col * self.col_stride
    }
}

pub trait Image {
    type Pixel;

    fn data(&self) -> &[Self::Pixel];

    fn shape(&self) -> Shape;

    fn width(&self) -> usize {
        self.shape().width
    }

    fn height(&self) -> usize {
        self.shape().height
    }

    fn get(&self, row: usize, col: usize) -> Option<&Self::Pixel> {
        let shape = self.shape();
        if row >= shape.height || col >= shape.width {
            return None;
        }
        self.data().get(shape.offset(row, col))
    }

    /// Iterate over pixels in row-major order
    fn iter(&self) -> ImageIter<'_, Self::Pixel> {
        ImageIter {
            index: 0,
            shape: self.shape(),
            data: self.data(),
        }
    }

    /// Encode image as 8-bit RGBA PNG
    ///
    /// Encoder writes no time or text chunks, so the same pixels always produce
    /// the same bytes.
    fn write_png(&self, out: impl Write) -> Result<(), Error>
    where
        Self::Pixel: Color,
    {
        let shape = self.shape();
        let pixels: Vec<RGBA> = self
            .iter()
            .map(|pixel| {
                let [r, g, b, a] = pixel.to_rgba();
                RGBA::new(r, g, b, a)
            })
            .collect();

        let mut encoder = png::Encoder::new(out, shape.width as u32, shape.height as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(bytemuck::cast_slice(&pixels))?;
        writer.finish()?;
        Ok(())
    }
}

pub struct ImageIter<'a, P> {
    index: usize,
    shape: Shape,
    data: &'a [P],
}

impl<'a, P> Iterator for ImageIter<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<Self::Item> {
        if self.shape.width == 0 {
            return None;
        }
        let row = self.index / self.shape.width;
        let col = self.index % self.shape.width;
        if row >= self.shape.height {
            return None;
        }
        self.index += 1;
        self.data.get(self.shape.offset(row, col))
    }
}

pub trait ImageMut: Image {
    fn data_mut(&mut self) -> &mut [Self::Pixel];
}

#[derive(Debug, Clone)]
pub struct ImageOwned<P> {
    shape: Shape,
    data: Vec<P>,
}

impl<P> ImageOwned<P> {
    pub fn new_default(height: usize, width: usize) -> Self
    where
        P: Default,
    {
        Self::new_with(height, width, |_, _| Default::default())
    }

    pub fn new_with<F>(height: usize, width: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> P,
    {
        let mut data = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col))
            }
        }
        Self {
            shape: Shape {
                width,
                height,
                row_stride: width,
                col_stride: 1,
            },
            data,
        }
    }

    /// Convert every pixel with `f`, keeping the shape
    pub fn map<Q, F>(self, f: F) -> ImageOwned<Q>
    where
        F: FnMut(P) -> Q,
    {
        ImageOwned {
            shape: self.shape,
            data: self.data.into_iter().map(f).collect(),
        }
    }

    pub fn to_vec(self) -> Vec<P> {
        self.data
    }
}

impl<P> Image for ImageOwned<P> {
    type Pixel = P;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn data(&self) -> &[Self::Pixel] {
        &self.data
    }
}

impl<P> ImageMut for ImageOwned<P> {
    fn data_mut(&mut self) -> &mut [Self::Pixel] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_owned() {
        let mut img = ImageOwned::new_with(2, 3, |row, col| row * 10 + col);
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
        assert_eq!(img.get(1, 2), Some(&12));
        assert_eq!(img.get(2, 0), None);
        assert_eq!(img.get(0, 3), None);

        img.data_mut()[1] = 100;
        let all: Vec<_> = img.iter().copied().collect();
        assert_eq!(all, vec![0, 100, 2, 10, 11, 12]);
        assert_eq!(img.map(|v| v + 1).to_vec(), vec![1, 101, 3, 11, 12, 13]);
    }

    #[test]
    fn test_write_png() -> Result<(), Box<dyn std::error::Error>> {
        let img = ImageOwned::new_with(2, 3, |row, col| {
            if (row + col) % 2 == 0 {
                RGBA::new(255, 0, 0, 255)
            } else {
                RGBA::TRANSPARENT
            }
        });
        let mut encoded = Vec::new();
        img.write_png(&mut encoded)?;

        let decoder = png::Decoder::new(encoded.as_slice());
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!(&buf[..8], &[255, 0, 0, 255, 0, 0, 0, 0]);
        assert_eq!(&buf[12..16], &[0, 0, 0, 0]);
        assert_eq!(&buf[16..20], &[255, 0, 0, 255]);
        Ok(())
    }
}
