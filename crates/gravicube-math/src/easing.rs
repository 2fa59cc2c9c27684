//! Easing for the gravity transition.

/// Hermite smoothstep on `[0, 1]`: zero slope at both ends.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoothstep_midpoint_and_symmetry() {
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        assert!((smoothstep(0.25) + smoothstep(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_flat_at_ends() {
        // Slope near the ends is far below linear.
        let h = 0.01;
        assert!(smoothstep(h) < h * 0.1);
        assert!(1.0 - smoothstep(1.0 - h) < h * 0.1);
    }

    #[test]
    fn test_smoothstep_clamps_out_of_range() {
        assert_eq!(smoothstep(-0.5), 0.0);
        assert_eq!(smoothstep(1.7), 1.0);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let v = smoothstep(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }
}
