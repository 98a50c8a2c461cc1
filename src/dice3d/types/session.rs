//! Roll session state machine and roll history
//!
//! `RollState` owns the lifecycle of every roll: it tears down the previous
//! dice, asks a [`DicePool`] for new ones, keeps the settle timer keyed by
//! session id and turns the settled orientations into a [`RollResolved`].

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::dice::{resolve_face, DieId, DieRecord};
use crate::dice3d::pool::{DicePool, DiePlacement};

/// Fewest dice a roll may use.
pub const MIN_DICE: u32 = 1;
/// Most dice a roll may use.
pub const MAX_DICE: u32 = 5;
/// Wall-clock time between spawning dice and reading their faces.
pub const SETTLE_DURATION: Duration = Duration::from_millis(3000);
/// Number of roll totals kept in the history log.
pub const HISTORY_CAPACITY: usize = 10;

/// Clamp a requested dice count into `MIN_DICE..=MAX_DICE`.
pub fn clamp_dice_count(requested: u32) -> u32 {
    requested.clamp(MIN_DICE, MAX_DICE)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Control surface for the roll engine.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum RollCommand {
    Roll { dice_count: u32 },
    Reset,
    SetTheme(super::settings::ThemeColor),
}

/// Fired exactly once per completed roll.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct RollResolved {
    pub session: SessionId,
    pub total: u32,
    pub per_die: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RollPhase {
    #[default]
    Idle,
    Rolling,
    Resolved,
}

/// One-shot deferred resolve, only honored for the session it was armed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleTimer {
    pub session: SessionId,
    pub deadline: Duration,
}

/// The dice of one roll request, from spawn until the next roll or reset.
#[derive(Clone, Debug)]
pub struct RollSession {
    pub id: SessionId,
    pub dice_count: u32,
    pub dice: Vec<DieRecord>,
    pub in_progress: bool,
    pub started_at: Duration,
    pub settle_deadline: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub sequence: u64,
    pub total: u32,
}

/// Bounded log of roll totals, most recent first.
#[derive(Clone, Debug)]
pub struct RollHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl Default for RollHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl RollHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 1,
        }
    }

    pub fn push(&mut self, total: u32) -> HistoryEntry {
        let entry = HistoryEntry {
            sequence: self.next_sequence,
            total,
        };
        self.next_sequence += 1;

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        entry
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Resource tracking the current roll
#[derive(Resource, Debug)]
pub struct RollState {
    session: Option<RollSession>,
    settle_timer: Option<SettleTimer>,
    settle_duration: Duration,
    next_session: u64,
    displayed_total: u32,
    last_result: Option<RollResolved>,
    history: RollHistory,
}

impl Default for RollState {
    fn default() -> Self {
        Self::with_settle_duration(SETTLE_DURATION)
    }
}

impl RollState {
    pub fn with_settle_duration(settle_duration: Duration) -> Self {
        Self {
            session: None,
            settle_timer: None,
            settle_duration,
            next_session: 1,
            displayed_total: 0,
            last_result: None,
            history: RollHistory::default(),
        }
    }

    pub fn phase(&self) -> RollPhase {
        match &self.session {
            None => RollPhase::Idle,
            Some(session) if session.in_progress => RollPhase::Rolling,
            Some(_) => RollPhase::Resolved,
        }
    }

    pub fn is_rolling(&self) -> bool {
        self.phase() == RollPhase::Rolling
    }

    pub fn session(&self) -> Option<&RollSession> {
        self.session.as_ref()
    }

    /// Die records that currently need their visuals synced.
    pub fn active_dice(&self) -> &[DieRecord] {
        self.session
            .as_ref()
            .map(|session| session.dice.as_slice())
            .unwrap_or(&[])
    }

    pub fn settle_timer(&self) -> Option<SettleTimer> {
        self.settle_timer
    }

    pub fn displayed_total(&self) -> u32 {
        self.displayed_total
    }

    /// Result of the most recent roll, cleared by reset and by the next roll.
    pub fn last_result(&self) -> Option<&RollResolved> {
        self.last_result.as_ref()
    }

    pub fn history(&self) -> &RollHistory {
        &self.history
    }

    /// Start a new roll, tearing down whatever is on the table first.
    ///
    /// Out-of-range counts are clamped. A roll requested while another is
    /// still settling supersedes it: the old dice are removed and the old
    /// settle timer can no longer resolve anything.
    pub fn request_roll<P, R>(
        &mut self,
        pool: &mut P,
        rng: &mut R,
        requested: u32,
        now: Duration,
    ) -> SessionId
    where
        P: DicePool + ?Sized,
        R: Rng,
    {
        let dice_count = clamp_dice_count(requested);
        if dice_count != requested {
            debug!(
                "Clamped requested dice count {} to {}",
                requested, dice_count
            );
        }

        if let Some(previous) = &self.session {
            if previous.in_progress {
                debug!("Roll {} superseded before settling", previous.id);
            }
        }
        self.teardown(pool);

        let id = SessionId(self.next_session);
        self.next_session += 1;

        let dice = (0..dice_count)
            .map(|index| {
                let placement = DiePlacement::random(rng, index);
                pool.create_die(
                    DieId {
                        session: id.0,
                        index,
                    },
                    &placement,
                )
            })
            .collect();

        let settle_deadline = now + self.settle_duration;
        self.session = Some(RollSession {
            id,
            dice_count,
            dice,
            in_progress: true,
            started_at: now,
            settle_deadline,
        });
        self.settle_timer = Some(SettleTimer {
            session: id,
            deadline: settle_deadline,
        });

        info!("Roll {} started with {} dice", id, dice_count);
        id
    }

    /// Remove all dice and return to idle. Safe to call in any phase.
    pub fn reset<P: DicePool + ?Sized>(&mut self, pool: &mut P) {
        if self.session.is_some() {
            info!("Dice reset");
        }
        self.teardown(pool);
    }

    fn teardown<P: DicePool + ?Sized>(&mut self, pool: &mut P) {
        if let Some(session) = self.session.take() {
            for record in &session.dice {
                pool.remove_die(record);
            }
        }
        self.settle_timer = None;
        self.displayed_total = 0;
        self.last_result = None;
    }

    /// Take the settle timer if its deadline has passed.
    pub fn poll_settle_timer(&mut self, now: Duration) -> Option<SettleTimer> {
        match self.settle_timer {
            Some(timer) if timer.deadline <= now => self.settle_timer.take(),
            _ => None,
        }
    }

    /// Resolve the roll `session` against the dice currently on the table.
    ///
    /// Returns `None` when `session` is no longer the active, unresolved
    /// session, so a stale timer never produces a result.
    pub fn resolve<F>(&mut self, session: SessionId, mut orientation: F) -> Option<RollResolved>
    where
        F: FnMut(&DieRecord) -> Quat,
    {
        let active = match self.session.as_mut() {
            Some(active) if active.id == session && active.in_progress => active,
            _ => {
                debug!("Ignoring stale settle for roll {}", session);
                return None;
            }
        };

        let per_die: Vec<u32> = active
            .dice
            .iter()
            .map(|record| resolve_face(record.faces, orientation(record)))
            .collect();
        let total = per_die.iter().sum();

        active.in_progress = false;
        if self
            .settle_timer
            .is_some_and(|timer| timer.session == session)
        {
            self.settle_timer = None;
        }

        self.displayed_total = total;
        let entry = self.history.push(total);
        info!(
            "Roll {} resolved: {:?} = {} (history #{})",
            session, per_die, total, entry.sequence
        );

        let result = RollResolved {
            session,
            total,
            per_die,
        };
        self.last_result = Some(result.clone());
        Some(result)
    }

    /// Advance the settle timer; resolves the current roll once it is due.
    pub fn tick<F>(&mut self, now: Duration, orientation: F) -> Option<RollResolved>
    where
        F: FnMut(&DieRecord) -> Quat,
    {
        let timer = self.poll_settle_timer(now)?;
        self.resolve(timer.session, orientation)
    }

    /// Resolve the in-progress roll immediately (used by at-rest settling).
    pub fn settle_now<F>(&mut self, orientation: F) -> Option<RollResolved>
    where
        F: FnMut(&DieRecord) -> Quat,
    {
        let session = self.session.as_ref().filter(|s| s.in_progress)?.id;
        self.resolve(session, orientation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_dice_count() {
        assert_eq!(clamp_dice_count(0), 1);
        assert_eq!(clamp_dice_count(1), 1);
        assert_eq!(clamp_dice_count(3), 3);
        assert_eq!(clamp_dice_count(5), 5);
        assert_eq!(clamp_dice_count(8), 5);
    }

    #[test]
    fn test_history_most_recent_first() {
        let mut history = RollHistory::default();
        history.push(4);
        history.push(9);
        history.push(2);

        let totals: Vec<u32> = history.iter().map(|e| e.total).collect();
        assert_eq!(totals, vec![2, 9, 4]);
        assert_eq!(history.latest().map(|e| e.sequence), Some(3));
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut history = RollHistory::default();
        for total in 1..=13 {
            history.push(total);
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        let sequences: Vec<u64> = history.iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, (4..=13).rev().collect::<Vec<u64>>());
    }

    #[test]
    fn test_roll_state_default() {
        let state = RollState::default();
        assert_eq!(state.phase(), RollPhase::Idle);
        assert!(!state.is_rolling());
        assert_eq!(state.displayed_total(), 0);
        assert!(state.active_dice().is_empty());
        assert!(state.settle_timer().is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_poll_without_timer_is_none() {
        let mut state = RollState::default();
        assert!(state.poll_settle_timer(Duration::from_secs(60)).is_none());
    }

    #[test]
    fn test_resolve_unknown_session_is_ignored() {
        let mut state = RollState::default();
        assert!(state.resolve(SessionId(7), |_| Quat::IDENTITY).is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_session_id_display() {
        assert_eq!(SessionId(12).to_string(), "#12");
    }
}
