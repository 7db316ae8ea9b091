//! One-shot count-up animation for the stat slots.

use std::time::Duration;

use tokio::time::{interval_at, Instant};

use crate::view::format::parse_display_count;
use crate::view::{Section, SharedView, StatSlot, ViewState};

pub const ANIMATION_STEPS: u64 = 50;
pub const ANIMATION_STEP_INTERVAL: Duration = Duration::from_millis(20);

/// Value shown after `step` of [`ANIMATION_STEPS`]; reaches `target` exactly on the last step.
pub fn step_value(target: u64, step: u64) -> u64 {
    let step = step.min(ANIMATION_STEPS);
    (u128::from(target) * u128::from(step) / u128::from(ANIMATION_STEPS)) as u64
}

/// Count-up from zero to the values the stat slots display when it begins.
pub(super) struct CounterAnimation {
    generation: u64,
    targets: Vec<(StatSlot, u64)>,
}

impl CounterAnimation {
    /// Capture the targets and reset every slot to zero.
    pub(super) fn begin(view: &mut ViewState) -> Option<Self> {
        let targets: Vec<(StatSlot, u64)> = StatSlot::ALL
            .into_iter()
            .filter_map(|slot| view.stat(slot).map(|text| (slot, parse_display_count(text))))
            .collect();
        if targets.is_empty() {
            return None;
        }
        for (slot, _) in &targets {
            view.stats.insert(*slot, slot.format(0));
        }
        Some(Self {
            generation: view.rendered_generation(Section::Stats),
            targets,
        })
    }

    /// Stops early, leaving the newer values alone, once a later poll
    /// re-renders the stats section.
    pub(super) async fn run(self, view: SharedView) {
        let mut ticker = interval_at(
            Instant::now() + ANIMATION_STEP_INTERVAL,
            ANIMATION_STEP_INTERVAL,
        );
        for step in 1..=ANIMATION_STEPS {
            ticker.tick().await;
            let current = view.update(|view| {
                if view.rendered_generation(Section::Stats) != self.generation {
                    return false;
                }
                for (slot, target) in &self.targets {
                    view.stats.insert(*slot, slot.format(step_value(*target, step)));
                }
                true
            });
            if !current {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_monotonic_and_end_on_target() {
        for target in [0, 1, 7, 49, 50, 51, 2500, 25_000, 1_000_003, u64::MAX] {
            let values: Vec<u64> = (1..=ANIMATION_STEPS)
                .map(|step| step_value(target, step))
                .collect();
            assert_eq!(values.len() as u64, ANIMATION_STEPS);
            assert!(values.windows(2).all(|pair| pair[0] <= pair[1]), "{target}");
            assert!(values.iter().all(|value| *value <= target), "{target}");
            assert_eq!(*values.last().unwrap(), target);
        }
    }

    #[test]
    fn each_step_advances_by_a_fiftieth() {
        assert_eq!(step_value(2500, 1), 50);
        assert_eq!(step_value(2500, 25), 1250);
        assert_eq!(step_value(2500, 80), 2500);
    }
}
