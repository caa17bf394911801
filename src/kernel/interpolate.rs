//! kernel::interpolate — bilinear resize and point sampling on 2-D grids.
//!
//! Conventions
//! -----------
//! - Arrays are indexed `[y, x]`.
//! - Resizing is corner-aligned: output index `o` maps to input coordinate
//!   `o * (n_in - 1) / (n_out - 1)` (0 when `n_out == 1`).
//! - Point samplers return 0 outside the grid.
use ndarray::Array2;

fn source_coordinate(o: usize, n_in: usize, n_out: usize) -> f64 {
    if n_out <= 1 || n_in <= 1 {
        0.0
    } else {
        o as f64 * (n_in - 1) as f64 / (n_out - 1) as f64
    }
}

fn lerp_weights(coord: f64, n: usize) -> (usize, usize, f64) {
    let lo = (coord.floor().max(0.0) as usize).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    (lo, hi, coord - lo as f64)
}

/// Resize to `(out_h, out_w)` by bilinear interpolation.
///
/// Panics
/// ------
/// - If `input` has a zero-length axis.
pub fn resize_bilinear(input: &Array2<f64>, out_h: usize, out_w: usize) -> Array2<f64> {
    let (h, w) = input.dim();
    Array2::from_shape_fn((out_h, out_w), |(oy, ox)| {
        let (y0, y1, fy) = lerp_weights(source_coordinate(oy, h, out_h), h);
        let (x0, x1, fx) = lerp_weights(source_coordinate(ox, w, out_w), w);
        let top = input[[y0, x0]] * (1.0 - fx) + input[[y0, x1]] * fx;
        let bottom = input[[y1, x0]] * (1.0 - fx) + input[[y1, x1]] * fx;
        top * (1.0 - fy) + bottom * fy
    })
}

/// Value of the grid point nearest to `(y, x)`; 0 outside the grid.
pub fn sample_nearest(input: &Array2<f64>, y: f64, x: f64) -> f64 {
    let (h, w) = input.dim();
    let iy = (y + 0.5).floor();
    let ix = (x + 0.5).floor();
    if iy < 0.0 || ix < 0.0 || iy >= h as f64 || ix >= w as f64 {
        return 0.0;
    }
    input[[iy as usize, ix as usize]]
}

/// Bilinear sample at `(y, x)`; 0 outside `[0, h-1] × [0, w-1]`.
pub fn sample_linear(input: &Array2<f64>, y: f64, x: f64) -> f64 {
    let (h, w) = input.dim();
    if !(0.0..=(h - 1) as f64).contains(&y) || !(0.0..=(w - 1) as f64).contains(&x) {
        return 0.0;
    }
    let (y0, y1, fy) = lerp_weights(y, h);
    let (x0, x1, fx) = lerp_weights(x, w);
    let top = input[[y0, x0]] * (1.0 - fx) + input[[y0, x1]] * fx;
    let bottom = input[[y1, x0]] * (1.0 - fx) + input[[y1, x1]] * fx;
    top * (1.0 - fy) + bottom * fy
}
