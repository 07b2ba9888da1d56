use anyhow::{Context, Result, bail};
use codered_game::{
    AnswerRecord, ClockEvent, Phase, ScenarioDeck, ShiftClock, ShiftSession, ShiftSummary,
};

use super::policy::AnswerPolicy;

/// Virtual-time ceiling for one shift; anything longer means the session stalled.
const SHIFT_BUDGET_MS: u64 = 10 * 60 * 1_000;

/// Everything observed while playing one scripted shift
#[derive(Debug, Clone)]
pub struct ShiftRun {
    pub summary: ShiftSummary,
    pub answers: Vec<AnswerRecord>,
    pub virtual_ms: u64,
    pub ticks: usize,
    pub max_health: i32,
}

/// Play one full shift on the virtual clock, answering with `policy`.
///
/// # Errors
///
/// Fails if the session stops scheduling work before reaching a terminal phase.
pub fn play_shift(deck: &ScenarioDeck, seed: u64, policy: &mut dyn AnswerPolicy) -> Result<ShiftRun> {
    let mut session = ShiftSession::seeded(deck.clone(), seed);
    session.start();
    let mut clock = ShiftClock::new();
    clock.sync(&session);

    let mut ticks = 0;
    let mut max_health = session.health();
    let mut record = |events: &[ClockEvent], session: &ShiftSession| {
        ticks += events
            .iter()
            .filter(|e| matches!(e, ClockEvent::Tick { .. } | ClockEvent::TimedOut { .. }))
            .count();
        max_health = max_health.max(session.health());
    };

    while session.phase() == Phase::InProgress {
        if clock.now_ms() > SHIFT_BUDGET_MS {
            bail!(
                "{} shift on seed {seed} exceeded its time budget on case {}",
                policy.name(),
                session.case_number()
            );
        }
        let scenario = session
            .current_scenario()
            .context("in-progress shift has no current case")?
            .clone();
        let choice = policy.choose(&scenario, session.options());
        if let Some(label) = choice {
            let events = clock.advance(policy.reaction_ms(), &mut session);
            record(&events, &session);
            if session.feedback().is_none() {
                session.submit_answer(Some(&label));
                clock.sync(&session);
                record(&[], &session);
            }
        }

        loop {
            let Some(wait) = clock.next_due_in() else {
                if session.phase() == Phase::InProgress {
                    bail!(
                        "{} shift on seed {seed} stalled on case {}",
                        policy.name(),
                        session.case_number()
                    );
                }
                break;
            };
            let had_pending = session.pending().is_some();
            let events = clock.advance(wait, &mut session);
            record(&events, &session);
            if had_pending && session.pending().is_none() {
                break;
            }
        }
        log::debug!(
            "{} seed {seed}: case {} health {}",
            policy.name(),
            session.case_number(),
            session.health()
        );
    }

    let summary = ShiftSummary::from_session(&session).context("shift ended without a summary")?;
    Ok(ShiftRun {
        summary,
        answers: session.state().answers.clone(),
        virtual_ms: clock.now_ms(),
        ticks,
        max_health,
    })
}
