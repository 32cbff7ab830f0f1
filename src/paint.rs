// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns an escape result into a colour.  Points that never escape
//! are painted white; points that do escape are painted around the
//! HSL colour wheel, fully saturated, at half lightness.

use crate::escape::{Escape, ESCAPE_RADIUS_SQR};
use image::Rgba;

/// The colour of points inside the set.
pub const INSIDE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Empirical smoothing divisor for the hue.  Changing it changes the
// palette of every image rendered so far.
const HUE_DIVISOR: f64 = 800.0;

/// Paint a single sample.
pub fn paint(escape: Escape) -> Rgba<u8> {
    if escape.radius_sqr > ESCAPE_RADIUS_SQR {
        let hue = escape.iterations as f64 / HUE_DIVISOR * escape.radius_sqr;
        hsl_to_rgb(hue, 1.0, 0.5)
    } else {
        INSIDE
    }
}

/// Standard HSL to RGB conversion.  Hue is a fraction of a full turn
/// and wraps modulo 1.0; saturation and lightness are in [0, 1].
/// The result is always opaque.
pub fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> Rgba<u8> {
    if saturation == 0.0 {
        let v = channel(lightness);
        return Rgba([v, v, v, 255]);
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    Rgba([
        channel(hue_to_channel(p, q, hue + 1.0 / 3.0)),
        channel(hue_to_channel(p, q, hue)),
        channel(hue_to_channel(p, q, hue - 1.0 / 3.0)),
        255,
    ])
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// NaN and out-of-range values saturate on the cast.
fn channel(v: f64) -> u8 {
    (v * 255.0).round() as u8
}
