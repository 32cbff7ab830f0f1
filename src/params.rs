// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameters of a render.  Once built, they are never mutated.

use failure::Fail;
use num::Complex;

/// The largest image side we are willing to allocate.  At four bytes
/// a pixel this is already 16GiB.
pub const MAX_WIDTH: usize = 1 << 16;

/// Reasons a set of render parameters can be refused.
#[derive(Debug, Fail, PartialEq)]
pub enum ParamsError {
    /// The image side is zero or larger than `MAX_WIDTH`.
    #[fail(display = "image width must be between 1 and {} pixels, got {}", _1, _0)]
    BadWidth(usize, usize),
    /// Zero samples per pixel leave nothing to average.
    #[fail(display = "samples per pixel must be at least 1")]
    NoSamples,
    /// Zero iterations cannot tell anything apart.
    #[fail(display = "iteration limit must be at least 1")]
    NoIterations,
    /// The plane size is zero, negative, or not a number.
    #[fail(display = "plane size must be a positive finite number, got {}", _0)]
    BadSize(f64),
    /// One of the center's coordinates is not finite.
    #[fail(display = "center must be a finite point, got {}", _0)]
    BadCenter(Complex<f64>),
}

/// Where to look, how big to draw it, and how hard to try.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    center: Complex<f64>,
    size: f64,
    width: usize,
    max_iterations: usize,
    samples: usize,
}

impl Params {
    /// Takes the center of the view on the complex plane, the width of
    /// the view on the complex plane, the side of the (square) image in
    /// pixels, the per-sample iteration limit, and the number of
    /// samples averaged into each pixel.
    pub fn new(
        center: Complex<f64>,
        size: f64,
        width: usize,
        max_iterations: usize,
        samples: usize,
    ) -> Result<Params, ParamsError> {
        if width == 0 || width > MAX_WIDTH {
            return Err(ParamsError::BadWidth(width, MAX_WIDTH));
        }
        if samples == 0 {
            return Err(ParamsError::NoSamples);
        }
        if max_iterations == 0 {
            return Err(ParamsError::NoIterations);
        }
        if !(size.is_finite() && size > 0.0) {
            return Err(ParamsError::BadSize(size));
        }
        if !(center.re.is_finite() && center.im.is_finite()) {
            return Err(ParamsError::BadCenter(center));
        }
        Ok(Params {
            center,
            size,
            width,
            max_iterations,
            samples,
        })
    }

    /// The center of the view.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// The width (and height) of the view on the complex plane.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// The width (and height) of the image, in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The iteration limit for each sample.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// The number of samples averaged into each pixel.
    pub fn samples(&self) -> usize {
        self.samples
    }
}
