// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a square of pixels with an origin at 0,0 and a square
//! region of the complex plane, described by its center and the
//! length of its side.
use num::Complex;

/// Describes the x, y of a pixel in the image.  Column first, then
/// row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps points of the integral pixel plane onto the complex plane.
/// The image is square, so one scale factor serves both axes.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    width: usize,
    size: f64,
    // The complex coordinate of pixel 0,0.
    origin: Complex<f64>,
}

impl PlaneMapper {
    /// Takes the center of the view, the width of the view on the
    /// complex plane, and the width of the image in pixels.
    pub fn new(center: Complex<f64>, size: f64, width: usize) -> PlaneMapper {
        let half = size / 2.0;
        PlaneMapper {
            width,
            size,
            origin: Complex::new(center.re - half, center.im - half),
        }
    }

    /// The width (and height) of the pixel plane.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The total number of pixels in the image.
    pub fn len(&self) -> usize {
        self.width * self.width
    }

    /// Describes that the pixel plane has no area.
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Given a pixel and an offset inside that pixel, each in [0, 1),
    /// return the matching point on the complex plane.
    pub fn pixel_to_point(&self, pixel: Pixel, jitter: (f64, f64)) -> Complex<f64> {
        let width = self.width as f64;
        Complex::new(
            self.size * ((pixel.0 as f64 + jitter.0) / width) + self.origin.re,
            self.size * ((pixel.1 as f64 + jitter.1) / width) + self.origin.im,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_pixel_maps_to_center() {
        let pm = PlaneMapper::new(Complex::new(0.0, 0.0), 4.0, 64);
        assert_eq!(pm.pixel_to_point(Pixel(32, 32), (0.0, 0.0)), Complex::new(0.0, 0.0));
    }

    #[test]
    fn corner_pixel_maps_to_origin() {
        let pm = PlaneMapper::new(Complex::new(-0.5, 0.25), 2.0, 10);
        assert_eq!(pm.pixel_to_point(Pixel(0, 0), (0.0, 0.0)), Complex::new(-1.5, -0.75));
    }

    #[test]
    fn jitter_moves_within_the_pixel() {
        let pm = PlaneMapper::new(Complex::new(0.0, 0.0), 4.0, 4);
        assert_eq!(pm.pixel_to_point(Pixel(1, 2), (0.5, 0.5)), Complex::new(-0.5, 0.5));
        assert_eq!(pm.pixel_to_point(Pixel(3, 3), (0.75, 0.25)), Complex::new(1.75, 1.25));
    }

    #[test]
    fn len_counts_every_pixel() {
        let pm = PlaneMapper::new(Complex::new(0.0, 0.0), 1.0, 5);
        assert_eq!(pm.len(), 25);
        assert!(!pm.is_empty());
        assert!(PlaneMapper::new(Complex::new(0.0, 0.0), 1.0, 0).is_empty());
    }
}
