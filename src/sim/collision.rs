//! Swept collision detection between moving circles
//!
//! Continuous-time contact is approximated by sampling both bodies along their
//! velocity vectors over the upcoming tick. The sample count grows with the
//! fastest velocity component, so fast projectiles can't tunnel through a
//! small asteroid between ticks.

use super::entity::Body;

/// Floor for the sweep span so stationary pairs still get one sample
pub const MIN_SWEEP_SPAN: f32 = 0.1;

/// Sample ceiling for very fast bodies; beyond it samples spread evenly over the tick
pub const MAX_SWEEP_STEPS: u32 = 1024;

/// Closest distance between two bodies over the upcoming tick.
///
/// With `d_max` the largest absolute velocity component of either body
/// (at least [`MIN_SWEEP_SPAN`]), both bodies are sampled at fractions
/// `i / d_max` for `i = 0, 1, 2, …` while `i <= d_max`. A fractional `d_max`
/// therefore never samples the end of the tick. Past [`MAX_SWEEP_STEPS`]
/// samples the stride widens so the sample count stays bounded.
pub fn closest_approach(a: &Body, b: &Body) -> f32 {
    let (va, vb) = (a.vel.as_vec2(), b.vel.as_vec2());
    let d_max = [va.x.abs(), va.y.abs(), vb.x.abs(), vb.y.abs()]
        .into_iter()
        .fold(MIN_SWEEP_SPAN, f32::max);

    let span = d_max.floor();
    let (steps, stride) = if span > MAX_SWEEP_STEPS as f32 {
        (MAX_SWEEP_STEPS, d_max / MAX_SWEEP_STEPS as f32)
    } else {
        (span as u32, 1.0)
    };

    let mut min_dist_sq = f32::MAX;
    for i in 0..=steps {
        let t = (i as f32 * stride / d_max).min(1.0);
        let pa = a.pos.as_vec2() + va * t;
        let pb = b.pos.as_vec2() + vb * t;
        min_dist_sq = min_dist_sq.min(pa.distance_squared(pb));
    }
    min_dist_sq.sqrt()
}

/// True when the bodies come strictly closer than the sum of their radii
pub fn collides(a: &Body, b: &Body) -> bool {
    closest_approach(a, b) < a.radius + b.radius
}
