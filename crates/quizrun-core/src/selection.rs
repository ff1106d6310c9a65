//! Selection policy: shuffling, limit presets and the part selection context.
//!
//! A limit only ever applies to sessions spanning more than one part.
//! [`effective_limit`] encodes that rule once and is shared by [`select`]
//! and [`estimated_count`], so the displayed estimate always matches the
//! length of the session that would start.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SelectionError;
use crate::model::{PartId, Question};

/// Return a uniformly shuffled copy of `items` (Fisher–Yates).
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.random_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// The limit that actually applies to a session.
pub fn effective_limit(limit: Option<usize>, multi_part: bool) -> Option<usize> {
    if multi_part {
        limit
    } else {
        None
    }
}

/// Shuffle the pool and keep the first `limit` questions when the limit applies.
pub fn select<R: Rng + ?Sized>(
    pool: &[Question],
    limit: Option<usize>,
    multi_part: bool,
    rng: &mut R,
) -> Vec<Question> {
    let mut selected = shuffle(pool, rng);
    if let Some(limit) = effective_limit(limit, multi_part) {
        selected.truncate(limit);
    }
    selected
}

/// Session size the UI should display for the given per-part counts.
pub fn estimated_count(
    part_counts: &BTreeMap<PartId, usize>,
    limit: Option<usize>,
    multi_part: bool,
) -> usize {
    let total: usize = part_counts.values().sum();
    match effective_limit(limit, multi_part) {
        Some(limit) => total.min(limit),
        None => total,
    }
}

// ---------------------------------------------------------------------------
// Limit presets
// ---------------------------------------------------------------------------

/// Preset base values and the adjustment rules shared by all presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Base value of each preset.
    #[serde(default = "default_presets")]
    pub presets: Vec<usize>,
    /// Amount added or removed by one adjustment.
    #[serde(default = "default_step")]
    pub step: usize,
    /// Lowest value an adjustment can reach.
    #[serde(default = "default_floor")]
    pub floor: usize,
}

fn default_presets() -> Vec<usize> {
    vec![100]
}

fn default_step() -> usize {
    50
}

fn default_floor() -> usize {
    10
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            presets: default_presets(),
            step: default_step(),
            floor: default_floor(),
        }
    }
}

/// Direction of a limit adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Increase,
    Decrease,
}

/// The currently active preset and its adjusted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLimit {
    pub preset: usize,
    pub value: usize,
}

/// Mutually exclusive group of limit presets. At most one preset is active.
#[derive(Debug, Clone, Default)]
pub struct SelectionLimit {
    settings: LimitSettings,
    active: Option<ActiveLimit>,
}

impl SelectionLimit {
    pub fn new(settings: LimitSettings) -> Self {
        Self {
            settings,
            active: None,
        }
    }

    pub fn settings(&self) -> &LimitSettings {
        &self.settings
    }

    pub fn active(&self) -> Option<ActiveLimit> {
        self.active
    }

    /// Current limit value, if a preset is active.
    pub fn value(&self) -> Option<usize> {
        self.active.map(|a| a.value)
    }

    /// Activate `preset` at its base value, replacing any other active preset.
    pub fn activate(&mut self, preset: usize) -> Result<usize, SelectionError> {
        let base = *self
            .settings
            .presets
            .get(preset)
            .ok_or(SelectionError::UnknownPreset {
                index: preset,
                available: self.settings.presets.len(),
            })?;
        let value = base.max(self.settings.floor);
        self.active = Some(ActiveLimit { preset, value });
        Ok(value)
    }

    /// Flip `preset`: deactivate it if active, otherwise activate it.
    pub fn toggle(&mut self, preset: usize) -> Result<Option<usize>, SelectionError> {
        if self.active.is_some_and(|a| a.preset == preset) {
            self.deactivate();
            return Ok(None);
        }
        self.activate(preset).map(Some)
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }

    /// Move the active value by one step, never below the floor.
    /// Does nothing when no preset is active.
    pub fn adjust(&mut self, direction: Adjust) -> Option<usize> {
        match direction {
            Adjust::Increase => self.adjust_by(1),
            Adjust::Decrease => self.adjust_by(-1),
        }
    }

    /// Apply `steps` adjustments at once; positive increases, negative
    /// decreases. Same result as calling [`adjust`](Self::adjust) `|steps|` times.
    pub fn adjust_by(&mut self, steps: i32) -> Option<usize> {
        let step = self.settings.step;
        let floor = self.settings.floor;
        let active = self.active.as_mut()?;

        let delta = usize::try_from(steps.unsigned_abs())
            .unwrap_or(usize::MAX)
            .saturating_mul(step);
        active.value = if steps >= 0 {
            active.value.saturating_add(delta)
        } else {
            active.value.saturating_sub(delta).max(floor)
        };
        Some(active.value)
    }
}

// ---------------------------------------------------------------------------
// Part selection context
// ---------------------------------------------------------------------------

/// Parts chosen for the next session together with the limit group.
#[derive(Debug, Clone, Default)]
pub struct PartSelection {
    parts: BTreeSet<PartId>,
    limit: SelectionLimit,
}

impl PartSelection {
    pub fn new(settings: LimitSettings) -> Self {
        Self {
            parts: BTreeSet::new(),
            limit: SelectionLimit::new(settings),
        }
    }

    /// Add or remove `part`. Returns whether it is selected afterwards.
    pub fn toggle_part(&mut self, part: PartId) -> bool {
        let selected = if self.parts.remove(&part) {
            false
        } else {
            self.parts.insert(part);
            true
        };
        self.sync_limit();
        selected
    }

    /// Select every part in `all`, or clear the selection if all of them
    /// are already selected.
    pub fn select_all(&mut self, all: impl IntoIterator<Item = PartId>) {
        let all: BTreeSet<PartId> = all.into_iter().collect();
        if !all.is_empty() && self.parts == all {
            self.parts.clear();
        } else {
            self.parts = all;
        }
        self.sync_limit();
    }

    pub fn clear(&mut self) {
        self.parts.clear();
        self.sync_limit();
    }

    /// Restart: drop all parts and deactivate the limit.
    pub fn reset(&mut self) {
        self.parts.clear();
        self.limit.deactivate();
    }

    pub fn contains(&self, part: &PartId) -> bool {
        self.parts.contains(part)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn is_multi_part(&self) -> bool {
        self.parts.len() > 1
    }

    pub fn can_start(&self) -> bool {
        !self.parts.is_empty()
    }

    /// Selected parts in a stable order, for feeding the aggregator.
    pub fn ordered_parts(&self) -> Vec<PartId> {
        self.parts.iter().cloned().collect()
    }

    pub fn limit(&self) -> &SelectionLimit {
        &self.limit
    }

    /// The limit group. Only meaningful for multi-part selections; changes
    /// made while one part is selected are discarded on the next part change.
    pub fn limit_mut(&mut self) -> &mut SelectionLimit {
        &mut self.limit
    }

    pub fn effective_limit(&self) -> Option<usize> {
        effective_limit(self.limit.value(), self.is_multi_part())
    }

    pub fn estimated_count(&self, part_counts: &BTreeMap<PartId, usize>) -> usize {
        let selected: BTreeMap<PartId, usize> = part_counts
            .iter()
            .filter(|(part, _)| self.parts.contains(*part))
            .map(|(part, count)| (part.clone(), *count))
            .collect();
        estimated_count(&selected, self.limit.value(), self.is_multi_part())
    }

    fn sync_limit(&mut self) {
        if !self.is_multi_part() {
            self.limit.deactivate();
        }
    }
}
