/// Range mapping used to turn sensation into ratios, ramp lengths and pauses.

/// Map `value` from `[input_min, input_max]` onto `[output_begin, output_end]`
/// along an exponential curve.
///
/// `curve` is clamped to [-10, 10]. 0 is linear, positive values bend the
/// curve so the output moves quickly at the low end of the input, negative
/// values so it moves quickly at the high end. `output_end` may be smaller
/// than `output_begin`. Inputs outside the input range saturate at the output
/// bounds.
pub fn fscale(
    input_min: f32,
    input_max: f32,
    output_begin: f32,
    output_end: f32,
    value: f32,
    curve: f32,
) -> f32 {
    let input_range = input_max - input_min;
    if input_range.is_nan() || input_range <= 0.0 {
        return output_begin;
    }

    let exponent = 10f32.powf(-0.1 * curve.clamp(-10.0, 10.0));
    let normalized = ((value - input_min) / input_range).clamp(0.0, 1.0);
    let shaped = if exponent == 1.0 {
        normalized
    } else {
        normalized.powf(exponent)
    };

    if output_end >= output_begin {
        output_begin + shaped * (output_end - output_begin)
    } else {
        output_begin - shaped * (output_begin - output_end)
    }
}

/// Integer linear map with truncating division.
///
/// `x` is truncated toward zero first. Values outside the input range are
/// extrapolated, not clamped. A zero-width input range maps to `out_min`.
pub fn map_range(x: f32, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    if in_max == in_min {
        return out_min;
    }
    let x = x as i64;
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn zero_curve_is_linear() {
        assert!(close(fscale(0.0, 100.0, 1.0, 5.0, 0.0, 0.0), 1.0));
        assert!(close(fscale(0.0, 100.0, 1.0, 5.0, 50.0, 0.0), 3.0));
        assert!(close(fscale(0.0, 100.0, 1.0, 5.0, 100.0, 0.0), 5.0));
    }

    #[test]
    fn descending_output() {
        // Slammin's sensation factor: neutral sits in the middle
        assert!(close(fscale(-100.0, 100.0, 1.0, 0.3, 0.0, 0.0), 0.65));
        assert!(close(fscale(-100.0, 100.0, 1.0, 0.3, -100.0, 0.0), 1.0));
        assert!(close(fscale(-100.0, 100.0, 1.0, 0.3, 100.0, 0.0), 0.3));
    }

    #[test]
    fn out_of_range_input_saturates() {
        assert!(close(fscale(0.0, 100.0, 1.0, 5.0, 150.0, 0.0), 5.0));
        assert!(close(fscale(0.0, 100.0, 1.0, 5.0, -20.0, 0.0), 1.0));
        assert!(close(fscale(0.0, 100.0, 0.5, 0.05, 250.0, 0.0), 0.05));
    }

    #[test]
    fn bounds_are_exact_for_any_curve() {
        for curve in [-10.0, -3.0, 0.0, 2.5, 10.0] {
            assert!(close(fscale(0.0, 10.0, 2.0, 4.0, 0.0, curve), 2.0));
            assert!(close(fscale(0.0, 10.0, 2.0, 4.0, 10.0, curve), 4.0));
        }
    }

    #[test]
    fn curve_bends_the_midpoint() {
        let linear = fscale(0.0, 100.0, 0.0, 1.0, 50.0, 0.0);
        let positive = fscale(0.0, 100.0, 0.0, 1.0, 50.0, 5.0);
        let negative = fscale(0.0, 100.0, 0.0, 1.0, 50.0, -5.0);
        assert!(positive > linear);
        assert!(negative < linear);
        // Clamped to 10
        assert!(close(
            fscale(0.0, 100.0, 0.0, 1.0, 50.0, 40.0),
            fscale(0.0, 100.0, 0.0, 1.0, 50.0, 10.0)
        ));
    }

    #[test]
    fn degenerate_input_range_returns_begin() {
        assert_eq!(fscale(5.0, 5.0, 1.0, 2.0, 7.0, 0.0), 1.0);
        assert_eq!(fscale(10.0, 0.0, 1.0, 2.0, 7.0, 0.0), 1.0);
    }

    #[test]
    fn map_range_truncates() {
        assert_eq!(map_range(0.0, 0, 100, 11, 32), 11);
        assert_eq!(map_range(100.0, 0, 100, 11, 32), 32);
        assert_eq!(map_range(50.0, 0, 100, 11, 32), 21);
        assert_eq!(map_range(-50.0, -100, 0, 2, 11), 6);
        // Fractional sensation is dropped before mapping
        assert_eq!(map_range(-0.9, -100, 0, 2, 11), 11);
    }

    #[test]
    fn map_range_descending_and_extrapolated() {
        assert_eq!(map_range(100.0, -100, 100, 10000, 100), 100);
        assert_eq!(map_range(-100.0, -100, 100, 10000, 100), 10000);
        assert_eq!(map_range(0.0, -100, 100, 10000, 100), 5050);
        assert_eq!(map_range(200.0, -100, 100, 10000, 100), -4850);
        assert_eq!(map_range(3.0, 1, 1, 7, 9), 7);
    }
}
