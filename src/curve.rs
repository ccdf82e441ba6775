use core::f64::consts::TAU;

use ultraviolet::Vec2;

use crate::shapes::{aabb, Bounds};

/// Samples the heart curve at `pieces + 1` evenly spaced values of t in [0, 2π].
///
/// x(t) = 16 sin³t
/// y(t) = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t
pub fn generate_points(pieces: usize) -> (Vec<f64>, Vec<f64>) {
    let dt = TAU / pieces as f64;

    (0..=pieces)
        .map(|i| {
            let t = i as f64 * dt;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
            (x, y)
        })
        .unzip()
}

/// The polygon every petal is drawn from, in local coordinates.
pub struct Outline {
    points: Vec<Vec2>,
    bounds: Bounds,
}

impl Outline {
    /// Builds an outline from the first `pieces` curve samples, flipping y so
    /// the heart stands upright on a y-down screen.
    pub fn heart(pieces: usize) -> Self {
        let (xs, ys) = generate_points(pieces);

        let points: Vec<Vec2> = xs
            .iter()
            .zip(ys.iter().map(|y| -y))
            .take(pieces)
            .map(|(&x, y)| Vec2::new(x as f32, y as f32))
            .collect();

        let bounds = aabb(points.iter().copied());
        Self { points, bounds }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Fan centre used when filling, the middle of the local bounds
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_curve_is_closed() {
        let (xs, ys) = generate_points(300);
        let (first, last) = ((xs[0], ys[0]), (xs[xs.len() - 1], ys[ys.len() - 1]));

        assert!((first.0 - last.0).abs() < 1e-9);
        assert!((first.1 - last.1).abs() < 1e-9);
    }

    #[test]
    fn test_curve_known_points() {
        let (xs, ys) = generate_points(4);

        // t = 0: the notch at the top of the heart
        assert!(xs[0].abs() < 1e-12);
        assert!((ys[0] - 5.0).abs() < 1e-12);

        // t = π/2: widest point on the right
        assert!((xs[1] - 16.0).abs() < 1e-9);
        assert!((ys[1] - 4.0).abs() < 1e-9);

        // t = π: the tip
        assert!(xs[2].abs() < 1e-9);
        assert!((ys[2] + 17.0).abs() < 1e-9);
    }

    #[test]
    fn test_outline_is_upright() {
        let outline = Outline::heart(300);
        assert_eq!(outline.points().len(), 300);

        // The tip points down the screen after flipping
        let bounds = outline.bounds();
        assert!((bounds.max.y - 17.0).abs() < 1e-3);
        assert!(bounds.min.y < -11.0 && bounds.min.y > -13.0);
        assert!((bounds.max.x - 16.0).abs() < 1e-3);
        assert!((bounds.min.x + 16.0).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_axes_have_equal_length(pieces in 1usize..5000) {
            let (xs, ys) = generate_points(pieces);
            prop_assert_eq!(xs.len(), ys.len());
            prop_assert!(xs.len() == pieces || xs.len() == pieces + 1);
        }
    }
}
