//! Incremental recomputation cache over the 40-week calendar.
//!
//! Entry 0 holds the setup state and never goes stale. Every other entry is
//! absent, dirty or clean; recording a choice for week `n` dirties `n` and
//! every later week, and [`ProgressCache::sweep`] recomputes from the lowest
//! stale week to the end of the calendar.
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::choices::{ChoiceLog, WeekChoices};
use crate::config::SimulationConfig;
use crate::content::{ContentPack, WeekPage};
use crate::driver::WeeklyDriver;
use crate::error::EngineError;
use crate::state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEntry {
    pub state: WorldState,
    pub status: EntryStatus,
    /// `None` for the setup entry.
    pub page: Option<WeekPage>,
    pub skip_next_free_choice: bool,
}

/// Weeks recomputed by one sweep, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub recomputed: Vec<u8>,
}

impl SweepReport {
    #[must_use]
    pub fn first(&self) -> Option<u8> {
        self.recomputed.first().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recomputed.is_empty()
    }
}

pub struct ProgressCache<P: ContentPack> {
    pack: P,
    config: SimulationConfig,
    choices: ChoiceLog,
    entries: Vec<Option<ProgressEntry>>,
}

impl<P: ContentPack> ProgressCache<P> {
    /// Run the pack's setup into entry 0. Weeks start out absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the config is out of range or the setup script
    /// fails.
    pub fn new(pack: P, config: SimulationConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let opening = pack.setup(&WorldState::initial())?;
        let mut entries = vec![None; usize::from(config.final_week) + 1];
        entries[0] = Some(ProgressEntry {
            state: opening,
            status: EntryStatus::Clean,
            page: None,
            skip_next_free_choice: false,
        });
        Ok(Self {
            pack,
            config,
            choices: ChoiceLog::default(),
            entries,
        })
    }

    /// Build a cache from a complete choice log and sweep it once.
    ///
    /// # Errors
    ///
    /// Returns an error when any week's choices fail validation or the sweep
    /// fails.
    pub fn from_log(pack: P, config: SimulationConfig, log: &ChoiceLog) -> Result<Self, EngineError> {
        let mut cache = Self::new(pack, config)?;
        for (week, choices) in log.weeks() {
            cache.record(week, choices.clone())?;
        }
        cache.sweep()?;
        Ok(cache)
    }

    #[must_use]
    pub const fn pack(&self) -> &P {
        &self.pack
    }

    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub const fn choices(&self) -> &ChoiceLog {
        &self.choices
    }

    #[must_use]
    pub const fn final_week(&self) -> u8 {
        self.config.final_week
    }

    /// Record the player's choices for `week` and invalidate forward.
    ///
    /// # Errors
    ///
    /// Returns an error when the week is out of range or a pick does not match
    /// the pack's declared slots. The cache is left untouched in that case.
    pub fn record(&mut self, week: u8, choices: WeekChoices) -> Result<(), EngineError> {
        let slots = self.pack.slots(week);
        self.choices
            .record(week, self.config.final_week, choices, &slots)?;
        self.invalidate_from(week);
        Ok(())
    }

    /// Mark `week` and every later computed week dirty. Week 0 never goes
    /// stale.
    pub fn invalidate_from(&mut self, week: u8) {
        let start = usize::from(week.max(1));
        for entry in self.entries.iter_mut().skip(start).flatten() {
            entry.status = EntryStatus::Dirty;
        }
    }

    /// Lowest week that is absent or dirty.
    #[must_use]
    pub fn first_stale(&self) -> Option<u8> {
        self.entries
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, entry)| {
                entry
                    .as_ref()
                    .is_none_or(|entry| entry.status == EntryStatus::Dirty)
            })
            .and_then(|(week, _)| u8::try_from(week).ok())
    }

    /// Recompute every week from the lowest stale one to the final week.
    ///
    /// # Errors
    ///
    /// Stops at the first failing week and returns its error; that week and
    /// everything after it stay stale.
    pub fn sweep(&mut self) -> Result<SweepReport, EngineError> {
        let mut report = SweepReport::default();
        let Some(start) = self.first_stale() else {
            return Ok(report);
        };
        let driver = WeeklyDriver::new(&self.pack, &self.config);
        for week in start..=self.config.final_week {
            let idx = usize::from(week);
            let Some(previous) = self.entries[idx - 1].as_ref() else {
                break;
            };
            let outcome = driver.advance(
                week,
                &previous.state,
                self.choices.get(week),
                previous.skip_next_free_choice,
            )?;
            debug!("week {week} recomputed ({})", self.pack.name());
            self.entries[idx] = Some(ProgressEntry {
                state: outcome.state,
                status: EntryStatus::Clean,
                page: Some(outcome.page),
                skip_next_free_choice: outcome.skip_next_free_choice,
            });
            report.recomputed.push(week);
        }
        info!(
            "{}: swept weeks {start}..={} ({} recomputed)",
            self.pack.name(),
            self.config.final_week,
            report.recomputed.len()
        );
        Ok(report)
    }

    /// Record and immediately sweep.
    ///
    /// # Errors
    ///
    /// See [`ProgressCache::record`] and [`ProgressCache::sweep`].
    pub fn edit(&mut self, week: u8, choices: WeekChoices) -> Result<SweepReport, EngineError> {
        self.record(week, choices)?;
        self.sweep()
    }

    /// Throw away every computed week and replay the whole log.
    ///
    /// # Errors
    ///
    /// See [`ProgressCache::sweep`].
    pub fn rebuild(&mut self) -> Result<SweepReport, EngineError> {
        self.invalidate_from(1);
        self.sweep()
    }

    #[must_use]
    pub fn entry(&self, week: u8) -> Option<&ProgressEntry> {
        self.entries.get(usize::from(week)).and_then(Option::as_ref)
    }

    /// `None` while the week has never been computed.
    #[must_use]
    pub fn status(&self, week: u8) -> Option<EntryStatus> {
        self.entry(week).map(|entry| entry.status)
    }

    /// Clean state after `week` (week 0 is the opening state).
    #[must_use]
    pub fn state(&self, week: u8) -> Option<&WorldState> {
        self.entry(week)
            .filter(|entry| entry.status == EntryStatus::Clean)
            .map(|entry| &entry.state)
    }

    #[must_use]
    pub fn page(&self, week: u8) -> Option<&WeekPage> {
        self.entry(week)
            .filter(|entry| entry.status == EntryStatus::Clean)
            .and_then(|entry| entry.page.as_ref())
    }

    /// State at the end of the calendar, once fully swept.
    #[must_use]
    pub fn final_state(&self) -> Option<&WorldState> {
        self.state(self.config.final_week)
    }

    /// Fingerprints of every entry (clean or stale), week 0 first.
    #[must_use]
    pub fn fingerprints(&self) -> Vec<Option<u64>> {
        self.entries
            .iter()
            .map(|entry| entry.as_ref().map(|entry| entry.state.fingerprint()))
            .collect()
    }
}
