//=========================================================================
// Easing
//=========================================================================
//
// Progress curves used by task callbacks. Input and output are in [0, 1].
//
//=========================================================================

/// Fast start, gentle landing along a quarter circle.
pub fn circular_ease_out(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    (1.0 - (x - 1.0) * (x - 1.0)).sqrt()
}

/// `1 - (1 - x)^2`.
pub fn quadratic_ease_out(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    1.0 - (1.0 - x) * (1.0 - x)
}

/// Scale of an element growing under the pointer: 1.0 → 1.25.
pub fn hover_in_scale(x: f32) -> f32 {
    1.0 + circular_ease_out(x) / 4.0
}

/// Scale of an element settling back after the pointer leaves: 1.25 → 1.0.
pub fn hover_out_scale(x: f32) -> f32 {
    1.0 + quadratic_ease_out(1.0 - x) / 4.0
}

/// Linear interpolation between two floats.
pub fn lerp(from: f32, to: f32, x: f32) -> f32 {
    from + (to - from) * x
}

/// Linear interpolation between two counters, exact at both ends.
pub fn lerp_u64(from: u64, to: u64, x: f32) -> u64 {
    if x <= 0.0 {
        return from;
    }
    if x >= 1.0 {
        return to;
    }
    if to >= from {
        from + ((to - from) as f64 * x as f64) as u64
    } else {
        from - ((from - to) as f64 * x as f64) as u64
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
