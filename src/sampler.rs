// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Supersampling.  Each pixel is the average of several samples, each
//! taken at a random offset inside the pixel's cell on the complex
//! plane.

use crate::escape::iterate;
use crate::paint::paint;
use crate::params::Params;
use crate::planes::{Pixel, PlaneMapper};
use image::Rgba;
use rand::Rng;

/// Everything needed to colour one pixel.  The random source is not
/// part of the sampler; callers pass in whichever generator they like.
#[derive(Copy, Clone, Debug)]
pub struct Sampler {
    plane: PlaneMapper,
    max_iterations: usize,
    samples: usize,
}

impl Sampler {
    /// Builds a sampler for the view described by `params`.
    pub fn new(params: &Params) -> Sampler {
        Sampler {
            plane: PlaneMapper::new(params.center(), params.size(), params.width()),
            max_iterations: params.max_iterations(),
            samples: params.samples(),
        }
    }

    /// The plane the sampler maps pixels onto.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// Colour a pixel.  Each sample draws its x offset, then its y
    /// offset, from `rng`.  The channels of the result are the
    /// truncated means of the samples' channels; alpha is opaque.
    pub fn sample<R: Rng>(&self, pixel: Pixel, rng: &mut R) -> Rgba<u8> {
        let (mut r, mut g, mut b) = (0_u64, 0_u64, 0_u64);
        for _ in 0..self.samples {
            let jitter = (rng.gen::<f64>(), rng.gen::<f64>());
            let point = self.plane.pixel_to_point(pixel, jitter);
            let colour = paint(iterate(point, self.max_iterations));
            r += u64::from(colour.0[0]);
            g += u64::from(colour.0[1]);
            b += u64::from(colour.0[2]);
        }
        let n = self.samples as u64;
        Rgba([(r / n) as u8, (g / n) as u8, (b / n) as u8, 255])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::INSIDE;
    use num::Complex;
    use rand::rngs::mock::StepRng;

    // StepRng yields 0, 2^62, 2^63, 3 * 2^62, ... which rand turns into
    // the jitter values 0.0, 0.25, 0.5, 0.75.
    fn quarter_steps() -> StepRng {
        StepRng::new(0, 1 << 62)
    }

    fn sampler(center: Complex<f64>, size: f64, width: usize, samples: usize) -> Sampler {
        Sampler::new(&Params::new(center, size, width, 50, samples).unwrap())
    }

    #[test]
    fn zero_jitter_hits_the_corner_of_the_pixel() {
        let s = sampler(Complex::new(0.0, 0.0), 4.0, 64, 1);
        let mut zero = StepRng::new(0, 0);
        assert_eq!(s.sample(Pixel(32, 32), &mut zero), INSIDE);
        assert_ne!(s.sample(Pixel(0, 0), &mut zero), INSIDE);
    }

    #[test]
    fn output_is_the_truncated_mean_of_every_sample() {
        // One pixel covering [-2, 2) on both axes.  The first sample
        // lands on -2 - i and escapes at once with |z|² = 5, which
        // paints (255, 10, 0).  The second lands on i, which cycles
        // forever and paints white.
        let s = sampler(Complex::new(0.0, 0.0), 4.0, 1, 2);
        let first = paint(iterate(Complex::new(-2.0, -1.0), 50));
        assert_eq!(first, Rgba([255, 10, 0, 255]));
        assert_eq!(
            s.sample(Pixel(0, 0), &mut quarter_steps()),
            Rgba([255, 132, 127, 255])
        );
    }

    #[test]
    fn every_sample_counts() {
        // With four samples the sequence repeats, so the mean of all
        // four equals the mean of the first two.  Averaging a subset
        // (say, only the first) would give a different colour.
        let s2 = sampler(Complex::new(0.0, 0.0), 4.0, 1, 2);
        let s4 = sampler(Complex::new(0.0, 0.0), 4.0, 1, 4);
        let s1 = sampler(Complex::new(0.0, 0.0), 4.0, 1, 1);
        let two = s2.sample(Pixel(0, 0), &mut quarter_steps());
        assert_eq!(s4.sample(Pixel(0, 0), &mut quarter_steps()), two);
        assert_ne!(s1.sample(Pixel(0, 0), &mut quarter_steps()), two);
    }

    #[test]
    fn samples_are_always_opaque() {
        let s = sampler(Complex::new(-0.75, 0.1), 0.5, 16, 7);
        let mut rng = rand::thread_rng();
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(s.sample(Pixel(x, y), &mut rng).0[3], 255);
            }
        }
    }
}
