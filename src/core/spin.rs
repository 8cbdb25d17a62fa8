//! Spin destination maths and the ease-out animation record.
//!
//! A spin travels in *virtual* scroll space: it starts at the current offset
//! and moves forward by [`SPIN_LAPS`] whole copies of the list plus whatever
//! is needed to reach the target's resting phase.  The rendered rows repeat
//! every copy, so the displayed offset is the virtual one wrapped into the
//! middle copy and the wrap is invisible.  When the animation finishes the
//! offset is set to the exact resting offset.

use std::time::{Duration, Instant};

use super::wheel::{POINTER_ROW, ROW_HEIGHT};

/// Wall-clock length of one spin.
pub const SPIN_DURATION: Duration = Duration::from_millis(3000);
/// Full copies travelled before settling, so even a one-row move looks
/// like a spin.
pub const SPIN_LAPS: f64 = 40.0;
/// Distance from the viewport's top edge to the pointer row.
pub const CENTER_OFFSET: f64 = POINTER_ROW as f64 * ROW_HEIGHT;

/// `1 − (1 − t)³`: fast start, slow finish.  `t` is clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Offset that leaves `target` under the pointer: the target's position
/// reduced modulo one copy, re-anchored into the middle copy, less the
/// centering offset.  Independent of where the spin starts: anchoring on
/// the start offset would shift every later landing by the previous phase.
pub fn resting_offset(target: usize, item_count: usize) -> f64 {
    let total = item_count as f64 * ROW_HEIGHT;
    (target as f64 * ROW_HEIGHT).rem_euclid(total) + total - CENTER_OFFSET
}

/// Wrap any offset into `[0.5 × total, 1.5 × total)`.
pub fn wrap_to_middle(offset: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return offset;
    }
    total * 0.5 + (offset - total * 0.5).rem_euclid(total)
}

/// One in-flight spin.
#[derive(Debug, Clone)]
pub struct SpinAnimation {
    target: usize,
    from: f64,
    /// Virtual (unwrapped) end offset.
    to: f64,
    resting: f64,
    total: f64,
    started_at: Instant,
    duration: Duration,
}

impl SpinAnimation {
    /// Plan a spin from `from` to `target` on a wheel of `item_count` items.
    /// `item_count` must be non-zero.
    pub fn new(
        from: f64,
        target: usize,
        item_count: usize,
        started_at: Instant,
        duration: Duration,
    ) -> Self {
        let total = item_count as f64 * ROW_HEIGHT;
        let resting = resting_offset(target, item_count);
        let forward = (resting - from).rem_euclid(total);
        Self {
            target,
            from,
            to: from + SPIN_LAPS * total + forward,
            resting,
            total,
            started_at,
            duration,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn resting_offset(&self) -> f64 {
        self.resting
    }

    /// Virtual distance the spin covers.
    pub fn distance(&self) -> f64 {
        self.to - self.from
    }

    /// Linear time progress in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Offset to display at `now`.
    pub fn offset_at(&self, now: Instant) -> f64 {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.resting;
        }
        let virtual_offset = self.from + (self.to - self.from) * ease_out_cubic(t);
        wrap_to_middle(virtual_offset, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints_and_shape() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(-3.0), 0.0);
        assert_eq!(ease_out_cubic(7.0), 1.0);

        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_out_cubic(f64::from(i) / 100.0);
            assert!(v > prev);
            prev = v;
        }
    }

    #[test]
    fn resting_offset_centres_target() {
        // Three items, target B: top row 2, pointer row 4 = middle-copy B.
        assert_eq!(resting_offset(1, 3), 2.0 * ROW_HEIGHT);
        // A lone item rests one row above the content so the pointer hits it.
        assert_eq!(resting_offset(0, 1), -ROW_HEIGHT);
    }

    #[test]
    fn wrap_keeps_phase() {
        let total = 200.0;
        for v in [-1000.0, 0.0, 99.0, 100.0, 299.9, 300.0, 12345.0] {
            let w = wrap_to_middle(v, total);
            assert!((100.0..300.0).contains(&w), "{v} -> {w}");
            assert!(((w - v) / total).fract().abs() < 1e-9);
        }
    }

    #[test]
    fn animation_runs_many_laps_and_settles() {
        let t0 = Instant::now();
        let n = 5;
        let total = n as f64 * ROW_HEIGHT;
        let anim = SpinAnimation::new(total, 3, n, t0, SPIN_DURATION);

        assert!(anim.distance() >= SPIN_LAPS * total);
        assert!(anim.distance() < (SPIN_LAPS + 1.0) * total);
        assert_eq!(anim.offset_at(t0), total);
        assert_eq!(anim.progress(t0 + SPIN_DURATION / 2), 0.5);
        assert!(!anim.is_finished(t0 + SPIN_DURATION / 2));

        let done = t0 + SPIN_DURATION;
        assert!(anim.is_finished(done));
        assert_eq!(anim.offset_at(done), resting_offset(3, n));
        assert_eq!(anim.offset_at(done + Duration::from_secs(5)), resting_offset(3, n));
    }

    #[test]
    fn frames_stay_inside_middle_copy() {
        let t0 = Instant::now();
        let n = 8;
        let total = n as f64 * ROW_HEIGHT;
        let anim = SpinAnimation::new(total * 1.3, 6, n, t0, SPIN_DURATION);
        for ms in (0..3000).step_by(16) {
            let off = anim.offset_at(t0 + Duration::from_millis(ms));
            assert!(off >= total * 0.5 && off < total * 1.5);
        }
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let t0 = Instant::now();
        let anim = SpinAnimation::new(80.0, 0, 2, t0, Duration::ZERO);
        assert!(anim.is_finished(t0));
        assert_eq!(anim.offset_at(t0), resting_offset(0, 2));
    }
}
