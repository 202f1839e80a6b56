//! Content contract: the scripted weeks and weekends a pack plugs into the
//! driver, plus the page text produced while running them.
//!
//! The engine owns the calendar and the stat subsystems; a [`ContentPack`]
//! owns the story. Week scripts and weekend routes are looked up by week
//! index and [`Activity`], so packs stay plain `match` tables.

pub mod prologue;
pub mod weekend;

use serde::{Deserialize, Serialize};

use crate::choices::{SlotSpec, WeekChoices};
use crate::error::EngineError;
use crate::state::WorldState;

pub use prologue::PrologueContent;
pub use weekend::{Activity, WeekendRoute, available_weekend};

/// Text lines emitted by one script run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Page {
    lines: Vec<String>,
}

impl Page {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cached rendering of one recomputed week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPage {
    pub week: u8,
    /// State summary at the start of the week.
    pub summary: String,
    pub free_choice: Page,
    pub free_choice_skipped: bool,
    pub event: Page,
    /// `None` when the week has no weekend phase.
    pub weekend: Option<Page>,
}

impl WeekPage {
    #[must_use]
    pub fn new(week: u8, summary: String) -> Self {
        Self {
            week,
            summary,
            free_choice: Page::new(),
            free_choice_skipped: false,
            event: Page::new(),
            weekend: None,
        }
    }

    #[must_use]
    pub fn header(&self) -> String {
        format!("Week {}", self.week)
    }

    /// Every line of the page in display order.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let mut out = vec![self.header(), self.summary.clone()];
        out.extend(self.free_choice.lines().iter().cloned());
        out.extend(self.event.lines().iter().cloned());
        if let Some(weekend) = &self.weekend {
            out.extend(weekend.lines().iter().cloned());
        }
        out
    }
}

/// Story content driven by the weekly driver.
///
/// Every method is a pure function of its arguments: the progress cache
/// replays them freely and expects identical results.
pub trait ContentPack {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Week 0: turn the initial state into the opening state.
    ///
    /// # Errors
    ///
    /// Returns an error if the script applies a malformed delta.
    fn setup(&self, state: &WorldState) -> Result<WorldState, EngineError>;

    /// Scripted transformer for `week`, run after training.
    ///
    /// # Errors
    ///
    /// Returns an error if the script applies a malformed delta.
    fn run_week(
        &self,
        week: u8,
        state: &WorldState,
        choices: &WeekChoices,
        page: &mut Page,
    ) -> Result<WorldState, EngineError>;

    /// Numbered and lettered prompts `week` may show.
    fn slots(&self, _week: u8) -> Vec<SlotSpec> {
        Vec::new()
    }

    /// Week-specific routing for `activity`: `None` when the week has no
    /// entry for it, `Some(0)` when the entry exists but is unreachable, and
    /// `Some(variant)` naming the week whose script runs.
    fn weekend_route(&self, _week: u8, _activity: Activity, _state: &WorldState) -> Option<u8> {
        None
    }

    /// Run the week-specific weekend script `variant` for `activity`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingWeekendScript` when the pack routes to a
    /// variant it has no script for.
    fn run_weekend(
        &self,
        variant: u8,
        activity: Activity,
        _state: &WorldState,
        _choices: &WeekChoices,
        _page: &mut Page,
    ) -> Result<WorldState, EngineError> {
        Err(EngineError::MissingWeekendScript {
            activity: activity.key().to_string(),
            variant,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_renders_in_display_order() {
        let mut page = WeekPage::new(3, "Neutral (), K: 0".to_string());
        page.free_choice.line("Outfit: Coronet");
        page.event.line("Hidden Danger");
        let mut weekend = Page::new();
        weekend.line("Weekend: Explore Castle (FL)");
        page.weekend = Some(weekend);
        assert_eq!(
            page.render(),
            vec![
                "Week 3",
                "Neutral (), K: 0",
                "Outfit: Coronet",
                "Hidden Danger",
                "Weekend: Explore Castle (FL)",
            ]
        );
    }
}
