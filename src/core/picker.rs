//! The picker widget's state object.
//!
//! A [`Picker`] owns one wheel, one winners record and the spin state
//! machine (`Idle → Spinning → Idle`).  Guard conditions never fail loudly:
//! they come back as a [`Rejected`] reason that callers log and ignore.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::input::parse_bulk;
use super::spin::{SpinAnimation, SPIN_DURATION};
use super::wheel::{Wheel, POINTER_ROW};
use super::winners::Winners;

/// Why a request was turned into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("a spin is already in progress")]
    Spinning,
    #[error("the wheel has no items")]
    Empty,
    #[error("item {index} is out of range for {len} items")]
    OutOfRange { index: usize, len: usize },
    #[error("input is blank")]
    BlankInput,
    #[error("no winners recorded")]
    NoWinners,
}

#[derive(Debug, Clone, Default)]
enum Phase {
    #[default]
    Idle,
    Spinning(SpinAnimation),
}

/// What a finished spin did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    /// Index the spin targeted.
    pub index: usize,
    /// The item recorded as the winner.  `None` only if the item list no
    /// longer has that index.
    pub winner: Option<String>,
    /// Items removed by auto-remove mode.
    pub removed: usize,
    /// `true` when auto-remove took the last item off the wheel.
    pub wheel_emptied: bool,
}

/// One picker widget instance.
#[derive(Debug)]
pub struct Picker {
    wheel: Wheel,
    winners: Winners,
    phase: Phase,
    auto_remove: bool,
    spin_duration: Duration,
    rng: StdRng,
}

impl Default for Picker {
    fn default() -> Self {
        Self::new()
    }
}

impl Picker {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A picker whose random draws are reproducible.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            wheel: Wheel::new(),
            winners: Winners::default(),
            phase: Phase::Idle,
            auto_remove: false,
            spin_duration: SPIN_DURATION,
            rng,
        }
    }

    pub fn with_spin_duration(mut self, duration: Duration) -> Self {
        self.spin_duration = duration;
        self
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn items(&self) -> &[String] {
        self.wheel.items()
    }

    pub fn winners(&self) -> &Winners {
        &self.winners
    }

    pub fn auto_remove(&self) -> bool {
        self.auto_remove
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, Phase::Spinning(_))
    }

    /// Idle and at least one item on the wheel.
    pub fn can_spin(&self) -> bool {
        !self.is_spinning() && !self.wheel.is_empty()
    }

    /// Counter text, e.g. `Items: 3`.
    pub fn count_label(&self) -> String {
        format!("Items: {}", self.wheel.len())
    }

    /// Linear progress of the current spin, if any.
    pub fn spin_progress(&self, now: Instant) -> Option<f64> {
        match &self.phase {
            Phase::Spinning(anim) => Some(anim.progress(now)),
            Phase::Idle => None,
        }
    }

    // ── item list ───────────────────────────────────────────────

    /// Replace the item list with newline-delimited `text`.  Always
    /// rebuilds, even when nothing survives parsing.
    pub fn load(&mut self, text: &str) -> Result<usize, Rejected> {
        self.ensure_idle()?;
        self.wheel.set_items(parse_bulk(text));
        tracing::info!(items = self.wheel.len(), "items loaded");
        Ok(self.wheel.len())
    }

    /// Append one item.
    pub fn add(&mut self, text: &str) -> Result<(), Rejected> {
        self.ensure_idle()?;
        if self.wheel.append_item(text) {
            Ok(())
        } else {
            Err(Rejected::BlankInput)
        }
    }

    /// Clear the item list.  Winners are kept.
    pub fn reset(&mut self) -> Result<(), Rejected> {
        self.ensure_idle()?;
        self.wheel.reset();
        Ok(())
    }

    /// Manual scroll by whole rows.  Ignored while a spin owns the offset.
    pub fn scroll_by(&mut self, rows: i32) {
        if self.is_spinning() {
            return;
        }
        self.wheel.scroll_rows(rows);
    }

    // ── winners ─────────────────────────────────────────────────

    pub fn clear_winners(&mut self) {
        self.winners.clear();
    }

    /// Take every recorded winner off the wheel, then clear the record.
    /// Returns how many items were removed.
    pub fn remove_winners_from_wheel(&mut self) -> Result<usize, Rejected> {
        self.ensure_idle()?;
        if self.winners.is_empty() {
            return Err(Rejected::NoWinners);
        }
        let winners = &self.winners;
        let removed = self.wheel.remove_items(|item| winners.contains(item));
        self.winners.clear();
        tracing::info!(removed, left = self.wheel.len(), "winners removed from wheel");
        Ok(removed)
    }

    pub fn set_auto_remove(&mut self, on: bool) {
        self.auto_remove = on;
    }

    pub fn toggle_auto_remove(&mut self) -> bool {
        self.auto_remove = !self.auto_remove;
        self.auto_remove
    }

    // ── spinning ────────────────────────────────────────────────

    /// Spin to a uniformly random item.  Returns the chosen index.
    pub fn spin_random(&mut self, now: Instant) -> Result<usize, Rejected> {
        self.ensure_can_spin()?;
        let index = self.rng.gen_range(0..self.wheel.len());
        self.spin_to(index, now)?;
        Ok(index)
    }

    /// Full spin that lands back on the item currently under the pointer.
    pub fn spin_to_pointer(&mut self, now: Instant) -> Result<usize, Rejected> {
        self.ensure_can_spin()?;
        let len = self.wheel.len() as isize;
        let index = (self.wheel.top_row() + POINTER_ROW as isize).rem_euclid(len) as usize;
        self.spin_to(index, now)?;
        Ok(index)
    }

    /// Start a spin that lands on item `index`.
    pub fn spin_to(&mut self, index: usize, now: Instant) -> Result<(), Rejected> {
        self.ensure_can_spin()?;
        let len = self.wheel.len();
        if index >= len {
            return Err(Rejected::OutOfRange { index, len });
        }
        let anim = SpinAnimation::new(
            self.wheel.scroll_offset(),
            index,
            len,
            now,
            self.spin_duration,
        );
        tracing::debug!(
            index,
            from = self.wheel.scroll_offset(),
            resting = anim.resting_offset(),
            distance = anim.distance(),
            "spin started"
        );
        self.phase = Phase::Spinning(anim);
        Ok(())
    }

    /// Advance the running spin to `now`.  Returns the outcome on the frame
    /// the spin completes, `None` otherwise.
    pub fn on_frame(&mut self, now: Instant) -> Option<SpinOutcome> {
        let (offset, finished, index) = match &self.phase {
            Phase::Spinning(anim) => (anim.offset_at(now), anim.is_finished(now), anim.target()),
            Phase::Idle => return None,
        };
        self.wheel.set_scroll_offset(offset);
        if !finished {
            return None;
        }
        // Back in the middle band before idle scrolling resumes.  Whole-copy
        // shift, so the pointer row is unchanged.
        self.wheel.correct_loop();
        let outcome = self.complete(index);
        self.phase = Phase::Idle;
        Some(outcome)
    }

    fn complete(&mut self, index: usize) -> SpinOutcome {
        let winner = self.wheel.items().get(index).cloned();
        let mut removed = 0;
        match &winner {
            Some(name) => {
                self.winners.record(name.as_str());
                if self.auto_remove {
                    removed = self.wheel.remove_items(|item| item == name);
                }
                tracing::info!(winner = %name, removed, "spin finished");
            }
            None => tracing::warn!(index, "spin target vanished before completion"),
        }
        SpinOutcome {
            index,
            winner,
            removed,
            wheel_emptied: self.wheel.is_empty(),
        }
    }

    fn ensure_idle(&self) -> Result<(), Rejected> {
        if self.is_spinning() {
            Err(Rejected::Spinning)
        } else {
            Ok(())
        }
    }

    fn ensure_can_spin(&self) -> Result<(), Rejected> {
        self.ensure_idle()?;
        if self.wheel.is_empty() {
            return Err(Rejected::Empty);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker_with(text: &str) -> Picker {
        let mut p = Picker::seeded(7);
        p.load(text).unwrap();
        p
    }

    /// Drive a started spin to completion.
    fn finish(p: &mut Picker, started: Instant) -> SpinOutcome {
        assert!(p.on_frame(started + Duration::from_millis(16)).is_none());
        p.on_frame(started + SPIN_DURATION).expect("spin should complete")
    }

    #[test]
    fn spin_records_winner_and_keeps_items() {
        let mut p = picker_with("A\nB\nC");
        assert_eq!(p.count_label(), "Items: 3");

        let t0 = Instant::now();
        p.spin_to(1, t0).unwrap();
        assert!(p.is_spinning());
        let outcome = finish(&mut p, t0);

        assert_eq!(outcome.winner.as_deref(), Some("B"));
        assert_eq!(outcome.removed, 0);
        assert_eq!(p.winners().names().collect::<Vec<_>>(), ["B"]);
        assert_eq!(p.items(), ["A", "B", "C"]);
        assert_eq!(p.wheel().pointer_row(), Some("B"));
        assert!(!p.is_spinning());
    }

    #[test]
    fn auto_remove_takes_winner_off_the_wheel() {
        let mut p = picker_with("A\nB\nC");
        p.set_auto_remove(true);

        let t0 = Instant::now();
        p.spin_to(1, t0).unwrap();
        let outcome = finish(&mut p, t0);

        assert_eq!(outcome.removed, 1);
        assert!(!outcome.wheel_emptied);
        assert_eq!(p.winners().names().collect::<Vec<_>>(), ["B"]);
        assert_eq!(p.items(), ["A", "C"]);
        assert_eq!(p.wheel().rows().len(), 6);
    }

    #[test]
    fn auto_remove_of_last_item_disables_spinning() {
        let mut p = picker_with("A");
        p.set_auto_remove(true);

        let t0 = Instant::now();
        p.spin_to(0, t0).unwrap();
        let outcome = finish(&mut p, t0);

        assert!(outcome.wheel_emptied);
        assert!(p.items().is_empty());
        assert!(!p.can_spin());
        assert_eq!(p.spin_random(t0), Err(Rejected::Empty));
        assert_eq!(p.spin_to(0, t0), Err(Rejected::Empty));
        assert!(!p.is_spinning());

        p.load("D\nE").unwrap();
        assert!(p.can_spin());
    }

    #[test]
    fn second_spin_is_dropped_while_first_runs() {
        let mut p = picker_with("A\nB\nC\nD");
        let t0 = Instant::now();
        p.spin_to(3, t0).unwrap();

        let mid = t0 + SPIN_DURATION / 2;
        assert!(p.on_frame(mid).is_none());
        assert_eq!(p.spin_to(0, mid), Err(Rejected::Spinning));
        assert_eq!(p.spin_random(mid), Err(Rejected::Spinning));
        assert_eq!(p.spin_progress(mid), Some(0.5));

        let outcome = p.on_frame(t0 + SPIN_DURATION).unwrap();
        assert_eq!(outcome.index, 3);
        assert_eq!(outcome.winner.as_deref(), Some("D"));
        assert_eq!(p.winners().len(), 1);
    }

    #[test]
    fn item_mutations_wait_for_the_spin() {
        let mut p = picker_with("A\nB");
        let t0 = Instant::now();
        p.spin_to(0, t0).unwrap();

        assert_eq!(p.add("C"), Err(Rejected::Spinning));
        assert_eq!(p.load("X"), Err(Rejected::Spinning));
        assert_eq!(p.reset(), Err(Rejected::Spinning));
        assert_eq!(p.remove_winners_from_wheel(), Err(Rejected::Spinning));

        let before = p.wheel().scroll_offset();
        p.scroll_by(3);
        assert_eq!(p.wheel().scroll_offset(), before);

        finish(&mut p, t0);
        assert_eq!(p.items(), ["A", "B"]);
    }

    #[test]
    fn remove_winners_from_wheel_clears_record() {
        let mut p = picker_with("A\nB\nC");
        for target in [0, 2] {
            let t0 = Instant::now();
            p.spin_to(target, t0).unwrap();
            finish(&mut p, t0);
        }
        assert_eq!(p.winners().names().collect::<Vec<_>>(), ["A", "C"]);

        assert_eq!(p.remove_winners_from_wheel(), Ok(2));
        assert_eq!(p.items(), ["B"]);
        assert!(p.winners().is_empty());

        assert_eq!(p.remove_winners_from_wheel(), Err(Rejected::NoWinners));
    }

    #[test]
    fn consecutive_random_spins_land_on_their_winner() {
        let mut p = picker_with("one\ntwo\nthree\nfour\nfive\nsix\nseven");
        p.scroll_by(-2);
        for _ in 0..20 {
            let t0 = Instant::now();
            let index = p.spin_random(t0).unwrap();
            assert!(index < p.items().len());
            let outcome = finish(&mut p, t0);
            assert_eq!(outcome.winner.as_deref(), Some(p.items()[index].as_str()));
            assert_eq!(p.wheel().pointer_row(), outcome.winner.as_deref());
        }
        assert_eq!(p.winners().len(), 20);
    }

    #[test]
    fn same_seed_same_draws() {
        let draw = |seed| {
            let mut p = Picker::seeded(seed).with_spin_duration(Duration::ZERO);
            p.load("a\nb\nc\nd\ne\nf").unwrap();
            (0..8)
                .map(|_| {
                    let now = Instant::now();
                    let i = p.spin_random(now).unwrap();
                    p.on_frame(now);
                    i
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn spin_to_pointer_keeps_the_highlighted_item() {
        let mut p = picker_with("A\nB\nC\nD\nE");
        assert_eq!(p.wheel().pointer_row(), Some("C"));

        let t0 = Instant::now();
        assert_eq!(p.spin_to_pointer(t0), Ok(2));
        let outcome = finish(&mut p, t0);
        assert_eq!(outcome.winner.as_deref(), Some("C"));
    }

    #[test]
    fn blank_add_and_bad_index_are_rejected() {
        let mut p = picker_with("A");
        assert_eq!(p.add("   "), Err(Rejected::BlankInput));
        assert_eq!(
            p.spin_to(4, Instant::now()),
            Err(Rejected::OutOfRange { index: 4, len: 1 })
        );
        assert!(!p.is_spinning());
    }

    #[test]
    fn load_with_only_blank_lines_empties_the_wheel() {
        let mut p = picker_with("A\nB");
        assert_eq!(p.load("  \n\n"), Ok(0));
        assert!(p.wheel().rows().is_empty());
        assert_eq!(p.count_label(), "Items: 0");
    }

    #[test]
    fn toggling_auto_remove() {
        let mut p = Picker::seeded(1);
        assert!(!p.auto_remove());
        assert!(p.toggle_auto_remove());
        assert!(!p.toggle_auto_remove());
    }

    #[test]
    fn idle_offset_returns_to_middle_band_after_each_spin() {
        for text in ["A\nB\nC", "a\nb\nc\nd\ne\nf\ng"] {
            let mut p = picker_with(text);
            let n = p.items().len();
            for target in (0..n).chain((0..n).rev()) {
                let t0 = Instant::now();
                p.spin_to(target, t0).unwrap();
                let outcome = finish(&mut p, t0);

                let total = p.wheel().copy_height();
                let offset = p.wheel().scroll_offset();
                assert!(
                    offset >= total * 0.5 && offset <= total * 1.5,
                    "n={n} target={target} offset={offset}"
                );
                assert_eq!(p.wheel().pointer_row(), outcome.winner.as_deref());
            }
        }
    }

    #[test]
    fn short_wheels_keep_an_item_under_the_pointer() {
        for text in ["A", "A\nB"] {
            let mut p = picker_with(text);
            let n = p.items().len();
            assert!(p.wheel().pointer_row().is_some());

            for target in [0, n - 1, 0] {
                let t0 = Instant::now();
                p.spin_to(target, t0).unwrap();
                for ms in (0..3000).step_by(16) {
                    assert!(p.on_frame(t0 + Duration::from_millis(ms)).is_none());
                    let row = p.wheel().pointer_row();
                    assert!(row.is_some(), "n={n} target={target} at {ms}ms");
                    if n == 1 {
                        assert_eq!(row, Some("A"));
                    }
                }
                let outcome = p.on_frame(t0 + SPIN_DURATION).unwrap();
                assert_eq!(outcome.winner.as_deref(), Some(p.items()[target].as_str()));
                assert_eq!(p.wheel().pointer_row(), outcome.winner.as_deref());
                let offset = p.wheel().scroll_offset();
                assert!(offset >= 0.0 && offset <= p.wheel().max_offset());
            }
        }
    }
}
