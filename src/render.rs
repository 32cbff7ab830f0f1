// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Ties the sampler to the worker pool.  The renderer owns the image
//! buffer for the length of a render and hands it back, finished,
//! when every row is done.

use image::RgbaImage;
use log::{debug, info};
use rand::Rng;

use crate::params::Params;
use crate::planes::Pixel;
use crate::pool;
use crate::progress::Progress;
use crate::sampler::Sampler;

const CHANNELS: usize = 4;

/// Renders a view of the Mandelbrot set.  Once built, it is not
/// mutable; the same renderer can produce as many images as wanted.
pub struct Renderer {
    params: Params,
    sampler: Sampler,
    threads: usize,
    queue_depth: usize,
}

impl Renderer {
    /// A renderer using one worker per CPU and an unbuffered row queue.
    pub fn new(params: Params) -> Renderer {
        Renderer {
            params,
            sampler: Sampler::new(&params),
            threads: num_cpus::get(),
            queue_depth: 0,
        }
    }

    /// Use `threads` workers instead of one per CPU.
    pub fn with_threads(mut self, threads: usize) -> Renderer {
        self.threads = threads.max(1);
        self
    }

    /// Let up to `queue_depth` rows wait in the queue before the
    /// dispatcher blocks.
    pub fn with_queue_depth(mut self, queue_depth: usize) -> Renderer {
        self.queue_depth = queue_depth;
        self
    }

    /// The parameters of this render.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The number of workers a render will start.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Colour one row of RGBA bytes.
    ///
    /// # Panics
    ///
    /// If `row` does not hold exactly one row of the image.
    pub(crate) fn render_row<R: Rng>(&self, y: usize, row: &mut [u8], rng: &mut R) {
        assert_eq!(
            row.len(),
            self.params.width() * CHANNELS,
            "row {} is the wrong length",
            y
        );
        for (x, pixel) in row.chunks_mut(CHANNELS).enumerate() {
            let colour = self.sampler.sample(Pixel(x, y), rng);
            pixel.copy_from_slice(&colour.0);
        }
    }

    /// Render the whole image.  `jitter` is called by a worker at the
    /// start of every row, with the row's index, for the random source
    /// that row's samples will use.
    pub fn render<F, R>(&self, jitter: F, progress: &mut dyn Progress) -> RgbaImage
    where
        F: Fn(usize) -> R + Sync,
        R: Rng,
    {
        let width = self.params.width();
        info!("Allocating {0}x{0} image...", width);
        // Params caps the width well inside u32.
        let mut image = RgbaImage::new(width as u32, width as u32);
        {
            let pixels: &mut [u8] = &mut image;
            let counts = pool::dispatch(
                pixels.chunks_mut(width * CHANNELS),
                self.threads,
                self.queue_depth,
                progress,
                |y, row| self.render_row(y, row, &mut jitter(y)),
            );
            debug!("rows rendered per worker: {:?}", counts);
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::INSIDE;
    use image::Rgba;
    use num::Complex;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(width: usize, samples: usize) -> Params {
        Params::new(Complex::new(0.0, 0.0), 4.0, width, 50, samples).unwrap()
    }

    #[test]
    fn whole_view_with_zero_jitter() {
        let renderer = Renderer::new(params(64, 1)).with_threads(4);
        let image = renderer.render(|_| StepRng::new(0, 0), &mut ());
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(*image.get_pixel(32, 32), INSIDE);
        assert_ne!(*image.get_pixel(0, 0), INSIDE);
        assert!(image.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn render_matches_row_by_row() {
        let renderer = Renderer::new(params(24, 3)).with_threads(3);
        let image = renderer.render(|_| StepRng::new(7, 1 << 60), &mut ());
        let mut row = vec![0_u8; 24 * CHANNELS];
        for y in 0..24 {
            renderer.render_row(y, &mut row, &mut StepRng::new(7, 1 << 60));
            for x in 0..24 {
                let at = x * CHANNELS;
                let expected = Rgba([row[at], row[at + 1], row[at + 2], row[at + 3]]);
                assert_eq!(*image.get_pixel(x as u32, y as u32), expected);
            }
        }
    }

    #[test]
    fn seeded_renders_do_not_depend_on_thread_count() {
        let seeded = |y: usize| StdRng::seed_from_u64(42 + y as u64);
        let one = Renderer::new(params(32, 4)).with_threads(1).render(seeded, &mut ());
        let many = Renderer::new(params(32, 4))
            .with_threads(8)
            .with_queue_depth(4)
            .render(seeded, &mut ());
        assert_eq!(one.into_raw(), many.into_raw());
    }

    #[test]
    #[should_panic(expected = "row 2 is the wrong length")]
    fn short_rows_are_refused() {
        let renderer = Renderer::new(params(8, 1));
        let mut row = vec![0_u8; 7 * CHANNELS];
        renderer.render_row(2, &mut row, &mut StepRng::new(0, 0));
    }

    #[test]
    fn thread_count_is_never_zero() {
        assert_eq!(Renderer::new(params(4, 1)).with_threads(0).threads(), 1);
    }
}
