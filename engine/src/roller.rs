//! The roll pipeline: validate, show a placeholder, reveal the dice after a delay.
//!
//! Every `roll` or `reset` opens a new generation. The pending reveal of an
//! older generation is cancelled, and a reveal that still fires for a stale
//! generation does nothing, so the most recent request always wins.

use tracing::{debug, error, info, warn};

use crate::config::RollerConfig;
use crate::error::{RollError, StoreError};
use crate::presenter::{Page, Presenter, ResultView};
use crate::scheduler::{Scheduler, TaskId};
use crate::stats::Statistics;
use crate::store::{KeyValueStore, Persistence};
use crate::theme::{Theme, ThemeController};
use crate::validate::validate;
use crate::{Dice, RollResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingRoll {
    generation: u64,
    dice_count: u8,
}

pub struct DiceRoller<S> {
    config: RollerConfig,
    dice: Dice,
    persistence: Persistence<S>,
    scheduler: Scheduler<PendingRoll>,
    pending: Option<TaskId>,
    generation: u64,
    presenter: Presenter,
    theme: ThemeController,
    current: Option<RollResult>,
}

impl<S: KeyValueStore> DiceRoller<S> {
    /// Build the roller and restore what the store remembers: the theme and,
    /// if present, the last roll with its statistics.
    pub fn new(config: RollerConfig, dice: Dice, store: S) -> Self {
        let persistence = Persistence::new(store);
        let theme = ThemeController::restore(&persistence);
        let mut presenter = Presenter::new(theme.current());

        let current = match persistence.load_last_roll() {
            Ok(Some(roll)) if roll.dice_count() > usize::from(config.max_dice) => {
                warn!(
                    dice = roll.dice_count(),
                    max_dice = config.max_dice,
                    "ignoring stored last roll with too many dice"
                );
                None
            }
            Ok(roll) => roll,
            Err(e) => {
                warn!(error = %e, "ignoring stored last roll");
                None
            }
        };
        if let Some(roll) = &current {
            match Statistics::compute(roll.values()) {
                Ok(stats) => presenter.show_last_roll(roll, stats),
                Err(e) => error!(error = %e, "stored roll has no statistics"),
            }
            debug!(dice = roll.dice_count(), "restored last roll");
        }

        Self {
            config,
            dice,
            persistence,
            scheduler: Scheduler::new(),
            pending: None,
            generation: 0,
            presenter,
            theme,
            current,
        }
    }

    /// Validate `raw` and, when it is a valid count, schedule the reveal.
    ///
    /// A rejected input shows its message and clears the dice; nothing is rolled or saved.
    pub fn roll(&mut self, raw: &str) -> Result<u8, RollError> {
        self.supersede();
        let dice_count = match validate(raw, self.config.max_dice) {
            Ok(n) => n,
            Err(e) => {
                info!(input = raw, error = ?e, "roll rejected");
                self.current = None;
                self.presenter.show_error(e.to_string());
                return Err(e);
            }
        };

        self.current = None;
        self.presenter.show_rolling();
        let task = PendingRoll {
            generation: self.generation,
            dice_count,
        };
        self.pending = Some(self.scheduler.schedule(self.config.roll_delay_ms, task));
        debug!(
            dice_count,
            generation = self.generation,
            delay_ms = self.config.roll_delay_ms,
            "roll scheduled"
        );
        Ok(dice_count)
    }

    /// Back to the ready state: cancels a pending roll and forgets the stored one.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.supersede();
        self.current = None;
        self.presenter.reset();
        self.persistence.clear_last_roll()?;
        info!("roll state reset");
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StoreError> {
        let result = self.theme.toggle(&mut self.persistence);
        self.presenter.show_theme(self.theme.current());
        result
    }

    /// Advance the virtual clock by `ms`, revealing any roll that came due.
    /// Returns how many rolls completed.
    pub fn advance(&mut self, ms: u64) -> Result<usize, StoreError> {
        let due = self.scheduler.advance(ms);
        self.fire(due)
    }

    pub fn run_until_idle(&mut self) -> Result<usize, StoreError> {
        let due = self.scheduler.run_until_idle();
        self.fire(due)
    }

    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }

    pub fn is_rolling(&self) -> bool {
        self.pending.is_some()
    }

    pub fn page(&self) -> &Page {
        self.presenter.page()
    }

    pub fn view(&self) -> &ResultView {
        self.presenter.view()
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// The roll currently on display, if any.
    pub fn current_roll(&self) -> Option<&RollResult> {
        self.current.as_ref()
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.presenter.view().stats
    }

    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    pub fn into_store(self) -> S {
        self.persistence.into_inner()
    }

    fn supersede(&mut self) {
        self.generation += 1;
        if let Some(id) = self.pending.take() {
            if self.scheduler.cancel(id).is_some() {
                debug!(generation = self.generation, "pending roll cancelled");
            }
        }
    }

    fn fire(&mut self, due: Vec<PendingRoll>) -> Result<usize, StoreError> {
        let mut completed = 0;
        for task in due {
            if self.complete(task)? {
                completed += 1;
            }
        }
        Ok(completed)
    }

    fn complete(&mut self, task: PendingRoll) -> Result<bool, StoreError> {
        if task.generation != self.generation {
            debug!(
                task_generation = task.generation,
                generation = self.generation,
                "stale roll skipped"
            );
            return Ok(false);
        }
        self.pending = None;

        let values = self.dice.roll_many(usize::from(task.dice_count));
        let roll = match RollResult::new(values) {
            Ok(roll) => roll,
            Err(e) => {
                error!(error = %e, "dice produced an invalid roll");
                return Ok(false);
            }
        };
        self.presenter.show_result(&roll);
        match Statistics::compute(roll.values()) {
            Ok(stats) => self.presenter.show_statistics(stats),
            Err(e) => error!(error = %e, "statistics unavailable"),
        }
        info!(values = ?roll.values(), "dice rolled");

        let saved = self.persistence.save_last_roll(&roll);
        self.current = Some(roll);
        saved.map(|()| true)
    }
}
