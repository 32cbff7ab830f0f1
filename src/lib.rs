#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Supersampled Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which repeatedly squaring z and adding c, starting from zero, never
//! runs off to infinity.  Points outside the set are coloured by how
//! quickly (and how far) they run away, and points inside are left
//! white.
//!
//! Each pixel is the average of many samples taken at random offsets
//! within the pixel, which smooths the jagged edges a single sample
//! per pixel would give.  Rows of the image are shared out among a
//! pool of worker threads, one per CPU by default; each row belongs
//! to exactly one worker while it is drawn, so the image buffer needs
//! no locking.

pub mod escape;
pub mod paint;
pub mod params;
pub mod planes;
pub mod pool;
pub mod progress;
pub mod render;
pub mod sampler;

pub use crate::escape::{iterate, Escape};
pub use crate::paint::{paint, INSIDE};
pub use crate::params::{Params, ParamsError};
pub use crate::progress::{ConsoleProgress, Progress};
pub use crate::render::Renderer;
pub use crate::sampler::Sampler;
