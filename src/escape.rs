// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.
use num::Complex;

/// The squared radius beyond which an orbit is known to diverge.
pub const ESCAPE_RADIUS_SQR: f64 = 4.0;

/// The state of an orbit when iteration stopped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Escape {
    /// The squared magnitude of z at the moment iteration stopped.
    pub radius_sqr: f64,
    /// The iteration at which z left the escape radius, or the
    /// iteration limit if it never did.
    pub iterations: usize,
}

impl Escape {
    /// True if the orbit left the escape radius.
    pub fn escaped(&self) -> bool {
        self.radius_sqr > ESCAPE_RADIUS_SQR
    }
}

/// This is our classic iterator function.  Iterates z = z² + c from
/// zero until |z|² exceeds the escape radius or `max_iterations` is
/// exhausted, and reports where the orbit ended up.
pub fn iterate(c: Complex<f64>, max_iterations: usize) -> Escape {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    for i in 0..max_iterations {
        let radius_sqr = z.norm_sqr();
        if radius_sqr > ESCAPE_RADIUS_SQR {
            return Escape {
                radius_sqr,
                iterations: i,
            };
        }
        z = z * z + c;
    }
    Escape {
        radius_sqr: z.norm_sqr(),
        iterations: max_iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_never_escapes() {
        for limit in &[1, 10, 1000] {
            let e = iterate(Complex::new(0.0, 0.0), *limit);
            assert_eq!(e.iterations, *limit);
            assert_eq!(e.radius_sqr, 0.0);
            assert!(!e.escaped());
        }
    }

    #[test]
    fn far_real_points_escape_quickly() {
        for re in &[2.5, -2.5, 3.0, -10.0, 100.0] {
            let e = iterate(Complex::new(*re, 0.0), 1000);
            assert!(e.escaped(), "{} did not escape", re);
            assert!(e.iterations <= 3, "{} took {} iterations", re, e.iterations);
        }
    }

    #[test]
    fn first_step_is_the_point_itself() {
        // z1 = c, so a point with |c|² > 4 escapes at iteration 1.
        let e = iterate(Complex::new(3.0, 0.0), 50);
        assert_eq!(e.iterations, 1);
        assert_eq!(e.radius_sqr, 9.0);
    }

    #[test]
    fn exhausted_limit_reports_final_radius() {
        // -1 cycles between -1 and 0.
        let e = iterate(Complex::new(-1.0, 0.0), 3);
        assert_eq!(e.iterations, 3);
        assert_eq!(e.radius_sqr, 1.0);
    }

    #[test]
    fn iteration_is_pure() {
        let c = Complex::new(-0.745, 0.113);
        assert_eq!(iterate(c, 500), iterate(c, 500));
    }
}
