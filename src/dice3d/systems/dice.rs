//! Roll orchestration systems
//!
//! This module applies control commands to the roll state, resolves rolls
//! once they settle, and keeps the HUD and stdout echo in sync with results.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use colored::Colorize;

use crate::dice3d::pool::{DiceRng, DiceWorld};
use crate::dice3d::types::*;

/// Linear and angular speed below which a die counts as resting.
pub const REST_SPEED: f32 = 0.1;
/// How long every die must rest before an early settle.
pub const REST_DURATION: f32 = 0.5;

/// Apply queued roll, reset and theme commands in order.
pub fn apply_roll_commands(
    mut requests: MessageReader<RollCommand>,
    mut roll_state: ResMut<RollState>,
    mut dice_world: DiceWorld,
    mut rng: ResMut<DiceRng>,
    time: Res<Time<Real>>,
) {
    for command in requests.read() {
        match command {
            RollCommand::Roll { dice_count } => {
                roll_state.request_roll(
                    &mut dice_world,
                    &mut rng.0,
                    *dice_count,
                    time.elapsed(),
                );
            }
            RollCommand::Reset => roll_state.reset(&mut dice_world),
            RollCommand::SetTheme(theme) => dice_world.set_theme(theme.clone()),
        }
    }
}

/// Tracks how long the dice of one session have been continuously at rest.
#[derive(Debug, Default, Clone, Copy)]
pub struct RestTracker {
    session: Option<SessionId>,
    at_rest_for: f32,
}

impl RestTracker {
    /// Accumulate `dt` while `at_rest`, restarting on motion or a new session.
    /// Returns the time spent at rest so far.
    pub fn update(&mut self, session: SessionId, at_rest: bool, dt: f32) -> f32 {
        if self.session != Some(session) {
            self.session = Some(session);
            self.at_rest_for = 0.0;
        }

        if at_rest {
            self.at_rest_for += dt;
        } else {
            self.at_rest_for = 0.0;
        }
        self.at_rest_for
    }
}

pub fn is_at_rest(velocity: &Velocity) -> bool {
    velocity.linvel.length() < REST_SPEED && velocity.angvel.length() < REST_SPEED
}

/// Resolve the current roll when its settle timer fires, or earlier when
/// at-rest settling is enabled and every die has stopped.
pub fn resolve_settled_roll(
    mut roll_state: ResMut<RollState>,
    settle_mode: Res<SettleMode>,
    time: Res<Time<Real>>,
    mut rest: Local<RestTracker>,
    bodies: Query<(&Transform, &Velocity), With<DieBody>>,
    mut resolved: MessageWriter<RollResolved>,
) {
    if !roll_state.is_rolling() {
        return;
    }

    let now = time.elapsed();
    let orientation = |record: &DieRecord| match bodies.get(record.body) {
        Ok((transform, _)) => transform.rotation,
        Err(_) => {
            warn!("No body for die {}; reading it as unrotated", record.id);
            Quat::IDENTITY
        }
    };

    if let Some(result) = roll_state.tick(now, orientation) {
        resolved.write(result);
        return;
    }

    if *settle_mode != SettleMode::AtRestOrTimeout {
        return;
    }

    let Some(session) = roll_state.session().filter(|s| s.in_progress) else {
        return;
    };
    let session_id = session.id;
    let elapsed = now.saturating_sub(session.started_at).as_secs_f32();

    let at_rest = session.dice.iter().all(|record| {
        bodies
            .get(record.body)
            .map(|(_, velocity)| is_at_rest(velocity))
            .unwrap_or(true)
    });
    let rested = rest.update(session_id, at_rest, time.delta_secs());

    if elapsed >= REST_DURATION && rested >= REST_DURATION {
        debug!("Roll {} came to rest after {:.2}s", session_id, elapsed);
        if let Some(result) = roll_state.settle_now(orientation) {
            resolved.write(result);
        }
    }
}

/// Status and help text for the top-left HUD block.
pub fn format_status(
    roll_state: &RollState,
    selection: DiceCountSelection,
    theme: &ThemeColor,
) -> String {
    let status = match roll_state.phase() {
        RollPhase::Idle => "Ready".to_string(),
        RollPhase::Rolling => "Rolling...".to_string(),
        RollPhase::Resolved => match roll_state.last_result() {
            Some(result) => {
                let values: Vec<String> = result.per_die.iter().map(|v| v.to_string()).collect();
                format!("Rolled: {}", values.join(" + "))
            }
            None => "Ready".to_string(),
        },
    };

    format!(
        "{}\nDice: {}   Theme: {}\n\nSPACE roll | R reset\n1-5 or +/- dice count | T theme",
        status,
        selection.get(),
        theme
    )
}

pub fn format_total(roll_state: &RollState) -> String {
    format!("Total: {}", roll_state.displayed_total())
}

pub fn format_history(history: &RollHistory) -> String {
    let mut text = String::from("History");
    for entry in history.iter() {
        text.push_str(&format!("\n#{}: {}", entry.sequence, entry.total));
    }
    text
}

/// System to update the HUD text from the roll state
pub fn update_results_display(
    roll_state: Res<RollState>,
    selection: Res<DiceCountSelection>,
    theme: Res<DiceTheme>,
    mut texts: ParamSet<(
        Query<&mut Text, With<ResultsText>>,
        Query<&mut Text, With<TotalText>>,
        Query<&mut Text, With<HistoryText>>,
    )>,
) {
    if !roll_state.is_changed() && !selection.is_changed() && !theme.is_changed() {
        return;
    }

    let status = format_status(&roll_state, *selection, &theme.0);
    for mut text in texts.p0().iter_mut() {
        **text = status.clone();
    }

    let total = format_total(&roll_state);
    for mut text in texts.p1().iter_mut() {
        **text = total.clone();
    }

    let history = format_history(roll_state.history());
    for mut text in texts.p2().iter_mut() {
        **text = history.clone();
    }
}

/// Print each resolved roll to stdout.
pub fn echo_roll_results(mut resolved: MessageReader<RollResolved>) {
    for result in resolved.read() {
        let values: Vec<String> = result.per_die.iter().map(|v| v.to_string()).collect();
        println!(
            "{} {} {} {}",
            format!("Roll {}:", result.session).bold().white(),
            format!("[{}]", values.join(", ")).yellow(),
            "=".white(),
            result.total.to_string().bright_green().bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_tracker_accumulates_and_resets() {
        let mut tracker = RestTracker::default();
        let session = SessionId(1);

        assert_eq!(tracker.update(session, true, 0.25), 0.25);
        assert_eq!(tracker.update(session, true, 0.25), 0.5);
        assert_eq!(tracker.update(session, false, 0.25), 0.0);
        assert_eq!(tracker.update(session, true, 0.1), 0.1);
    }

    #[test]
    fn test_rest_tracker_restarts_for_new_session() {
        let mut tracker = RestTracker::default();
        tracker.update(SessionId(1), true, 0.4);
        assert_eq!(tracker.update(SessionId(2), true, 0.1), 0.1);
    }

    #[test]
    fn test_is_at_rest_thresholds() {
        assert!(is_at_rest(&Velocity::zero()));
        assert!(!is_at_rest(&Velocity::linear(Vec3::new(0.0, -0.2, 0.0))));
        assert!(!is_at_rest(&Velocity::angular(Vec3::new(0.15, 0.0, 0.0))));
    }

    #[test]
    fn test_format_status_idle() {
        let state = RollState::default();
        let status = format_status(&state, DiceCountSelection::new(3), &ThemeColor::default());
        assert!(status.starts_with("Ready"));
        assert!(status.contains("Dice: 3"));
        assert!(status.contains("#ff4757"));
    }

    #[test]
    fn test_format_total_starts_at_zero() {
        assert_eq!(format_total(&RollState::default()), "Total: 0");
    }

    #[test]
    fn test_format_history_most_recent_first() {
        let mut history = RollHistory::default();
        history.push(7);
        history.push(11);
        assert_eq!(format_history(&history), "History\n#2: 11\n#1: 7");
    }
}
