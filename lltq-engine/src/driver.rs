//! Weekly transition: free choice, scripted week, weekend and housekeeping.
use log::{debug, warn};

use crate::choices::WeekChoices;
use crate::config::SimulationConfig;
use crate::content::weekend::run_weekend_route;
use crate::content::{ContentPack, Page, WeekPage, available_weekend};
use crate::error::EngineError;
use crate::mood::MoodCode;
use crate::numbers::format_counter;
use crate::skills::Skill;
use crate::state::WorldState;

/// Result of advancing one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekOutcome {
    pub state: WorldState,
    pub page: WeekPage,
    /// Set when the following week must skip its free-choice phase.
    pub skip_next_free_choice: bool,
}

/// Runs one week of the calendar against a content pack.
pub struct WeeklyDriver<'a, P: ContentPack + ?Sized> {
    pack: &'a P,
    config: &'a SimulationConfig,
}

impl<'a, P: ContentPack + ?Sized> WeeklyDriver<'a, P> {
    pub const fn new(pack: &'a P, config: &'a SimulationConfig) -> Self {
        Self { pack, config }
    }

    /// Advance `previous` through `week` using the recorded `choices`.
    ///
    /// # Errors
    ///
    /// Returns an error when a week or weekend script fails.
    pub fn advance(
        &self,
        week: u8,
        previous: &WorldState,
        choices: &WeekChoices,
        skip_free_choice: bool,
    ) -> Result<WeekOutcome, EngineError> {
        let start_mood = previous.dominant_mood();
        let mut page = WeekPage::new(week, previous.summary());

        let mut state = if skip_free_choice {
            page.free_choice_skipped = true;
            previous.clone()
        } else {
            Self::free_choice(week, previous, choices, &mut page.free_choice)
        };

        state = self.pack.run_week(week, &state, choices, &mut page.event)?;

        if week < self.config.final_week {
            let mut weekend = Page::new();
            state = self.weekend(week, state, choices, &mut weekend)?;
            page.weekend = Some(weekend);
        }

        let (state, skip_next_free_choice) = self.housekeeping(week, start_mood, &state);
        debug!(
            "week {week} advanced: {} (skip next free choice: {skip_next_free_choice})",
            state.summary()
        );
        Ok(WeekOutcome {
            state,
            page,
            skip_next_free_choice,
        })
    }

    fn free_choice(
        week: u8,
        previous: &WorldState,
        choices: &WeekChoices,
        page: &mut Page,
    ) -> WorldState {
        let mut state = previous.clone();
        if let Some(outfit) = choices.outfit {
            if outfit != state.current_outfit() {
                if state.can_equip(outfit) {
                    state = state.equip(outfit);
                } else {
                    warn!("week {week}: dropping stale outfit choice `{outfit}` (locked)");
                }
            }
        }
        page.line(format!("Outfit: {}", state.current_outfit().name()));

        let morning = Self::usable_skill(week, &state, choices.morning);
        let evening = Self::usable_skill(week, &state, choices.evening);
        let mood = state.dominant_mood();
        let trained = state.train(morning, evening);
        page.line(Self::training_line("Mornings", mood, morning, &trained));
        page.line(Self::training_line("Evenings", mood, evening, &trained));
        trained
    }

    fn usable_skill(week: u8, state: &WorldState, skill: Option<Skill>) -> Option<Skill> {
        let skill = skill?;
        if state.is_skill_unlocked(skill) {
            Some(skill)
        } else {
            warn!("week {week}: dropping stale training choice `{skill}` (not unlocked)");
            None
        }
    }

    fn training_line(
        label: &str,
        mood: MoodCode,
        skill: Option<Skill>,
        trained: &WorldState,
    ) -> String {
        match skill {
            Some(skill) => format!(
                "{label}: {} --> {}",
                skill.option_text(mood),
                format_counter(trained.skill(skill))
            ),
            None => format!("{label}: None Selected"),
        }
    }

    fn weekend(
        &self,
        week: u8,
        state: WorldState,
        choices: &WeekChoices,
        page: &mut Page,
    ) -> Result<WorldState, EngineError> {
        let Some(activity) = choices.weekend else {
            page.line("Weekend: None Selected");
            return Ok(state);
        };
        let reachable = available_weekend(self.pack, week, &state);
        let Some(route) = reachable.get(&activity).copied() else {
            warn!("week {week}: dropping stale weekend choice `{activity}` (unreachable)");
            page.line("Weekend: None Selected");
            return Ok(state);
        };
        page.line(format!("Weekend: {}", activity.label(&state)));
        run_weekend_route(self.pack, route, activity, &state, choices, page)
    }

    fn housekeeping(
        &self,
        week: u8,
        start_mood: MoodCode,
        state: &WorldState,
    ) -> (WorldState, bool) {
        let drain = &self.config.weekly_drain;
        let mut next = state.apply_resources([(drain.resource, -drain.amount)]);
        if start_mood == MoodCode::Injured {
            next = next.with_changes(|state| state.mood.clear_injury());
        }
        let trigger = &self.config.skip_trigger;
        let skip_next = week == trigger.week && next.has_flag(&trigger.flag);
        (next, skip_next)
    }
}
