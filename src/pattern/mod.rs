//! Phase-shifted sine fringe synthesis.
//!
//! A stack holds `n_phase_steps` 16-bit grayscale frames. Frame `k` shifts the
//! carrier by `2π·k / n_phase_steps`:
//!
//! ```text
//! value(row, col) = offset + amplitude · sin(2π·coord / wave_length + 2π·k / n)
//! ```
//!
//! with `coord` the column index for vertical fringes and the row index for
//! horizontal ones. Configuration validation guarantees
//! `offset ± amplitude` stays inside [0, 65535], so the rounded values always
//! fit the pixel type.
//!
//! Frames are independent, so the stack is generated in parallel; the map is
//! assembled afterwards to keep naming and iteration order deterministic.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use image::{ImageBuffer, Luma};
use rayon::prelude::*;

use crate::domain::{FringeSpec, WaveDirection};

/// 16-bit grayscale frame.
pub type Gray16Frame = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Synthesize the named stack of phase-shifted fringe frames.
///
/// Keys are `<direction>_<step>` (zero-padded), so a `BTreeMap` iterates the
/// stack in phase order.
pub fn make_sine_stack(spec: &FringeSpec) -> BTreeMap<String, Gray16Frame> {
    let frames: Vec<(String, Gray16Frame)> = (0..spec.n_phase_steps)
        .into_par_iter()
        .map(|k| {
            let name = format!("{}_{:02}", spec.direction.key(), k);
            (name, make_frame(spec, k))
        })
        .collect();

    frames.into_iter().collect()
}

fn make_frame(spec: &FringeSpec, step: u32) -> Gray16Frame {
    let phase_shift = TAU * f64::from(step) / f64::from(spec.n_phase_steps);
    let offset = f64::from(spec.offset);
    let amplitude = f64::from(spec.amplitude);

    ImageBuffer::from_fn(spec.n_cols, spec.n_rows, |x, y| {
        let coord = match spec.direction {
            WaveDirection::Vertical => f64::from(x),
            WaveDirection::Horizontal => f64::from(y),
        };
        let value = offset + amplitude * (TAU * coord / spec.wave_length + phase_shift).sin();
        Luma([value.round() as u16])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> FringeSpec {
        FringeSpec {
            n_rows: 12,
            n_cols: 16,
            amplitude: 100,
            offset: 128,
            wave_length: 8.0,
            n_phase_steps: 4,
            direction: WaveDirection::Vertical,
        }
    }

    #[test]
    fn stack_has_one_named_frame_per_phase_step() {
        let stack = make_sine_stack(&spec());
        assert_eq!(stack.len(), 4);
        let names: Vec<&String> = stack.keys().collect();
        assert_eq!(names, ["vertical_00", "vertical_01", "vertical_02", "vertical_03"]);
    }

    #[test]
    fn levels_stay_inside_offset_plus_minus_amplitude() {
        let spec = spec();
        let stack = make_sine_stack(&spec);
        for frame in stack.values() {
            for &Luma([v]) in frame.pixels() {
                assert!(v >= spec.min_level() && v <= spec.max_level(), "level {v}");
            }
        }
    }

    #[test]
    fn vertical_fringes_are_constant_down_columns() {
        let stack = make_sine_stack(&spec());
        let frame = &stack["vertical_00"];
        for x in 0..frame.width() {
            let top = frame.get_pixel(x, 0);
            for y in 1..frame.height() {
                assert_eq!(frame.get_pixel(x, y), top);
            }
        }
    }

    #[test]
    fn horizontal_fringes_are_constant_along_rows() {
        let mut s = spec();
        s.direction = WaveDirection::Horizontal;
        let stack = make_sine_stack(&s);
        let frame = &stack["horizontal_00"];
        for y in 0..frame.height() {
            let left = frame.get_pixel(0, y);
            for x in 1..frame.width() {
                assert_eq!(frame.get_pixel(x, y), left);
            }
        }
    }

    #[test]
    fn half_period_phase_step_mirrors_around_the_offset() {
        // With 4 steps, frame 2 is shifted by pi: sin flips sign, so frames 0
        // and 2 must mirror around the offset at every pixel.
        let spec = spec();
        let stack = make_sine_stack(&spec);
        let a = &stack["vertical_00"];
        let b = &stack["vertical_02"];
        let offset = i64::from(spec.offset);
        for (pa, pb) in a.pixels().zip(b.pixels()) {
            let da = i64::from(pa.0[0]) - offset;
            let db = i64::from(pb.0[0]) - offset;
            // Rounding can move each side by one level.
            assert!((da + db).abs() <= 1, "da={da} db={db}");
        }
    }

    #[test]
    fn synthesis_is_deterministic() {
        let a = make_sine_stack(&spec());
        let b = make_sine_stack(&spec());
        assert_eq!(a, b);
    }
}
