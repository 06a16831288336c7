use crate::{EPSILON, FillRule, ImageMut, Line, Point, Scalar, Shape};
use std::cmp::min;

/// Update provided image with the signed difference of the line
///
/// Signed difference is a difference between adjacent pixels introduced by the line.
/// Summing differences along a row yields the exact area coverage of each pixel.
pub(crate) fn signed_difference_line(img: &mut impl ImageMut<Pixel = Scalar>, line: Line) {
    let shape = img.shape();
    if shape.width == 0 || shape.height == 0 {
        return;
    }
    signed_difference(shape, img.data_mut(), line);
}

fn signed_difference(shape: Shape, data: &mut [Scalar], line: Line) {
    // y - is a row
    // x - is a column
    let Line([p0, p1]) = line;

    // part of the line with `x > width` only affects pixels past the end of
    // the row, so it is thrown away
    let width = shape.width as Scalar;
    let line = if p0.x() > width || p1.x() > width {
        if p0.x() > width && p1.x() > width {
            return;
        }
        let t = (p0.x() - width) / (p0.x() - p1.x());
        let mid = Point::new(width, (1.0 - t) * p0.y() + t * p1.y());
        if p0.x() < width {
            Line::new(p0, mid)
        } else {
            Line::new(mid, p1)
        }
    } else {
        line
    };

    // part of the line with `x < 0` is converted to a vertical line at `x == 0`
    // spanning the same rows, it is rasterized first and the rest afterwards
    let Line([p0, p1]) = line;
    let line = if p0.x() < 0.0 || p1.x() < 0.0 {
        let (vertical, line) = if p1.x() > 0.0 || p0.x() > 0.0 {
            let t = p0.x() / (p0.x() - p1.x());
            let mid = Point::new(0.0, (1.0 - t) * p0.y() + t * p1.y());
            if p1.x() > 0.0 {
                let p = Point::new(0.0, p0.y());
                (Line::new(p, mid), Line::new(mid, p1))
            } else {
                let p = Point::new(0.0, p1.y());
                (Line::new(mid, p), Line::new(p0, mid))
            }
        } else {
            (
                Line::new((0.0, p0.y()), (0.0, p1.y())),
                Line::new((0.0, 0.0), (0.0, 0.0)),
            )
        };
        signed_difference(shape, data, vertical);
        line
    } else {
        line
    };

    let Line([p0, p1]) = line;
    let stride = shape.col_stride;

    if (p0.y() - p1.y()).abs() < EPSILON {
        // horizontal line does not introduce any signed coverage
        return;
    }
    // always iterate from the point with the smallest y coordinate
    let (dir, p0, p1) = if p0.y() < p1.y() {
        (1.0, p0, p1)
    } else {
        (-1.0, p1, p0)
    };
    let dxdy = (p1.x() - p0.x()) / (p1.y() - p0.y());
    // rows above the image are skipped, x is moved to the first visible row
    let y_start = p0.y().max(0.0) as usize;
    let mut x_next = if p0.y() < 0.0 {
        p0.x() - p0.y() * dxdy
    } else {
        p0.x()
    };
    for y in y_start..min(shape.height, p1.y().ceil().max(0.0) as usize) {
        let x = x_next;
        let row_offset = shape.offset(y, 0);
        let dy = ((y + 1) as Scalar).min(p1.y()) - (y as Scalar).max(p0.y());
        let d = dir * dy;
        x_next = x + dxdy * dy;
        let (x0, x1) = if x < x_next { (x, x_next) } else { (x_next, x) };
        let x0_floor = x0.floor().max(0.0);
        let x0i = x0_floor as usize;
        let x1_ceil = x1.ceil();
        let x1i = x1_ceil as usize;
        // difference in the column past the last one has no effect on the image
        let mut add = |col: usize, value: Scalar| {
            if col < shape.width {
                data[row_offset + col * stride] += value;
            }
        };
        if x1i <= x0i + 1 {
            // line stays within a single pixel, area to the right of it goes to the next one
            let xmf = 0.5 * (x + x_next) - x0_floor;
            add(x0i, d * (1.0 - xmf));
            add(x0i + 1, d * xmf);
        } else {
            let s = (x1 - x0).recip();
            let x0f = x0 - x0_floor;
            let x1f = x1 - x1_ceil + 1.0;
            // area of the first and the last touched pixels
            let a0 = 0.5 * s * (1.0 - x0f) * (1.0 - x0f);
            let am = 0.5 * s * x1f * x1f;
            add(x0i, d * a0);
            if x1i == x0i + 2 {
                add(x0i + 1, d * (1.0 - a0 - am));
            } else {
                let a1 = s * (1.5 - x0f);
                add(x0i + 1, d * (a1 - a0));
                for xi in x0i + 2..x1i - 1 {
                    add(xi, d * s);
                }
                let a2 = a1 + (x1i - x0i - 3) as Scalar * s;
                add(x1i - 1, d * (1.0 - a2 - am));
            }
            add(x1i, d * am);
        }
    }
}

/// Convert accumulated signed differences into coverage mask with values in `[0, 1]`
pub(crate) fn signed_difference_to_mask(img: &mut impl ImageMut<Pixel = Scalar>, fill_rule: FillRule) {
    let shape = img.shape();
    let data = img.data_mut();
    for y in 0..shape.height {
        let mut acc = 0.0;
        for x in 0..shape.width {
            let offset = shape.offset(y, x);
            acc += data[offset];
            data[offset] = match fill_rule {
                FillRule::NonZero => {
                    let value = acc.abs();
                    if value > 1.0 {
                        1.0
                    } else if value < 1e-6 {
                        0.0
                    } else {
                        value
                    }
                }
                FillRule::EvenOdd => ((acc + 1.0).rem_euclid(2.0) - 1.0).abs(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Image, ImageOwned, assert_approx_eq};

    #[test]
    fn test_signed_difference_line() {
        let mut img = ImageOwned::<Scalar>::new_default(2, 5);

        // line covers many columns but just one row
        signed_difference_line(&mut img, Line::new((0.5, 1.0), (3.5, 0.0)));
        // covered areas per-pixel
        let a0 = (0.5 * (1.0 / 6.0)) / 2.0;
        let a1 = ((1.0 / 6.0) + (3.0 / 6.0)) / 2.0;
        let a2 = ((3.0 / 6.0) + (5.0 / 6.0)) / 2.0;
        assert_approx_eq!(*img.get(0, 0).unwrap(), -a0);
        assert_approx_eq!(*img.get(0, 1).unwrap(), a0 - a1);
        assert_approx_eq!(*img.get(0, 2).unwrap(), a1 - a2);
        assert_approx_eq!(*img.get(0, 3).unwrap(), a0 - a1);
        assert_approx_eq!(*img.get(0, 4).unwrap(), -a0);
        // total difference
        let a: Scalar = img.iter().sum();
        assert_approx_eq!(a, -1.0);
        img.data_mut().fill(0.0);

        // out of bound line (intersects x = 0.0)
        signed_difference_line(&mut img, Line::new((-1.0, 0.0), (1.0, 1.0)));
        assert_approx_eq!(*img.get(0, 0).unwrap(), 3.0 / 4.0);
        assert_approx_eq!(*img.get(0, 1).unwrap(), 1.0 / 4.0);
        img.data_mut().fill(0.0);

        // multiple rows diag
        signed_difference_line(&mut img, Line::new((0.0, -0.5), (2.0, 1.5)));
        assert_approx_eq!(*img.get(0, 0).unwrap(), 1.0 / 8.0);
        assert_approx_eq!(*img.get(0, 1).unwrap(), 1.0 - 2.0 / 8.0);
        assert_approx_eq!(*img.get(0, 2).unwrap(), 1.0 / 8.0);
        assert_approx_eq!(*img.get(1, 1).unwrap(), 1.0 / 8.0);
        assert_approx_eq!(*img.get(1, 2).unwrap(), 0.5 - 1.0 / 8.0);
        img.data_mut().fill(0.0);

        // single pixel covered
        signed_difference_line(&mut img, Line::new((0.1, 0.1), (0.9, 0.9)));
        assert_approx_eq!(*img.get(0, 0).unwrap(), 0.4);
        assert_approx_eq!(*img.get(0, 1).unwrap(), 0.8 - 0.4);
        img.data_mut().fill(0.0);

        // multiple rows vertical
        signed_difference_line(&mut img, Line::new((0.5, 0.5), (0.5, 1.75)));
        assert_approx_eq!(*img.get(0, 0).unwrap(), 1.0 / 4.0);
        assert_approx_eq!(*img.get(0, 1).unwrap(), 1.0 / 4.0);
        assert_approx_eq!(*img.get(1, 0).unwrap(), 3.0 / 8.0);
        assert_approx_eq!(*img.get(1, 1).unwrap(), 3.0 / 8.0);
        img.data_mut().fill(0.0);

        // line right of the image has no effect
        signed_difference_line(&mut img, Line::new((10.0, 0.0), (10.0, 1.0)));
        assert!(img.iter().all(|value| *value == 0.0));

        // line crossing the right edge only keeps the visible part
        signed_difference_line(&mut img, Line::new((4.5, 0.0), (5.5, 1.0)));
        assert_approx_eq!(*img.get(0, 4).unwrap(), 0.125, 1e-9);
        assert_approx_eq!(*img.get(0, 3).unwrap(), 0.0);
        assert_approx_eq!(*img.get(1, 4).unwrap(), 0.0);
    }

    #[test]
    fn test_mask_fill_rules() {
        // two nested squares with the same orientation
        let squares = [
            [(0.0, 0.0), (6.0, 0.0), (6.0, 4.0), (0.0, 4.0)],
            [(2.0, 1.0), (4.0, 1.0), (4.0, 3.0), (2.0, 3.0)],
        ];
        let draw = |fill_rule| {
            let mut img = ImageOwned::<Scalar>::new_default(4, 8);
            for square in squares.iter() {
                for index in 0..square.len() {
                    let p0 = square[index];
                    let p1 = square[(index + 1) % square.len()];
                    signed_difference_line(&mut img, Line::new(p0, p1));
                }
            }
            signed_difference_to_mask(&mut img, fill_rule);
            img
        };

        let non_zero = draw(FillRule::NonZero);
        assert_approx_eq!(*non_zero.get(0, 0).unwrap(), 1.0, 1e-9);
        assert_approx_eq!(*non_zero.get(2, 3).unwrap(), 1.0, 1e-9);
        assert_approx_eq!(*non_zero.get(2, 6).unwrap(), 0.0, 1e-9);

        let even_odd = draw(FillRule::EvenOdd);
        assert_approx_eq!(*even_odd.get(0, 0).unwrap(), 1.0, 1e-9);
        assert_approx_eq!(*even_odd.get(2, 3).unwrap(), 0.0, 1e-9);
        assert_approx_eq!(*even_odd.get(3, 5).unwrap(), 1.0, 1e-9);
        assert_approx_eq!(*even_odd.get(1, 7).unwrap(), 0.0, 1e-9);
    }
}
