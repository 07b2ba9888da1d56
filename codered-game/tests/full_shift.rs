use codered_game::{
    BuiltinDeck, ClockEvent, Ending, Outcome, PendingKind, Phase, ScenarioDeck, ShiftClock,
    ShiftEngine, ShiftSession, ShiftSummary, clamp_display_health,
};

fn start(seed: u64) -> (ShiftSession, ShiftClock) {
    let engine = ShiftEngine::new(BuiltinDeck);
    let mut session = engine.create_session(seed).unwrap();
    session.start();
    let mut clock = ShiftClock::new();
    clock.sync(&session);
    (session, clock)
}

fn correct_label(session: &ShiftSession) -> String {
    session.current_scenario().unwrap().correct.clone()
}

fn wrong_label(session: &ShiftSession) -> String {
    let scenario = session.current_scenario().unwrap();
    session
        .options()
        .iter()
        .find(|label| **label != scenario.correct)
        .unwrap()
        .clone()
}

/// Answer after `think_ms` of countdown, then let the deferred transition fire.
fn play_case(
    session: &mut ShiftSession,
    clock: &mut ShiftClock,
    think_ms: u64,
    label: Option<String>,
) -> Vec<ClockEvent> {
    let mut events = clock.advance(think_ms, session);
    if let Some(label) = label {
        session.submit_answer(Some(&label));
        clock.sync(session);
    }
    while let Some(wait) = clock.next_due_in() {
        let pending_before = session.pending();
        events.extend(clock.advance(wait, session));
        if pending_before.is_some() && session.pending().is_none() {
            break;
        }
    }
    events
}

#[test]
fn perfect_shift_wins_at_full_health() {
    let (mut session, mut clock) = start(0x00C0_FFEE);
    for case in 1..=10 {
        assert_eq!(session.case_number(), case);
        let label = correct_label(&session);
        play_case(&mut session, &mut clock, 1_200, Some(label));
        assert!(session.health() <= 100);
    }
    assert_eq!(session.phase(), Phase::Won);
    assert_eq!(session.health(), 100);

    let summary = ShiftSummary::from_session(&session).unwrap();
    assert_eq!(summary.ending, Ending::Won);
    assert_eq!(summary.correct, 10);
    assert_eq!(session.state().answers.len(), summary.case_reached);
    assert_eq!(clock.next_due_in(), None);
}

#[test]
fn sleeping_through_three_cases_loses_on_case_three() {
    let (mut session, mut clock) = start(0xBEEF);
    let mut timeouts = 0;
    let mut losses = 0;
    while session.phase() == Phase::InProgress {
        for event in play_case(&mut session, &mut clock, 0, None) {
            match event {
                ClockEvent::TimedOut { .. } => timeouts += 1,
                ClockEvent::Resolved {
                    kind: PendingKind::Lose,
                    ..
                } => losses += 1,
                _ => {}
            }
        }
    }
    assert_eq!(timeouts, 3);
    assert_eq!(losses, 1);
    assert_eq!(session.phase(), Phase::Lost);
    assert_eq!(session.health(), -5);
    assert_eq!(session.display_health(), 0);

    let summary = ShiftSummary::from_session(&session).unwrap();
    assert_eq!(summary.case_reached, 3);
    assert_eq!(summary.timeouts, 3);
    assert!(summary.code.is_none());
}

/// Scenario order plus each case's option order, as the player sees them.
fn play_through(mut session: ShiftSession) -> (ShiftSession, Vec<(u32, Vec<String>)>) {
    session.start();
    let mut clock = ShiftClock::new();
    clock.sync(&session);
    let mut shown = Vec::new();
    while session.phase() == Phase::InProgress {
        shown.push((
            session.current_scenario().unwrap().id,
            session.options().to_vec(),
        ));
        let label = correct_label(&session);
        play_case(&mut session, &mut clock, 250, Some(label));
    }
    (session, shown)
}

#[test]
fn summary_code_replays_the_same_shift() {
    let engine = ShiftEngine::new(BuiltinDeck);
    let original = engine.session_from_code("ER-PORT23").unwrap().unwrap();
    let (finished, shown) = play_through(original);
    let summary = ShiftSummary::from_session(&finished).unwrap();
    let code = summary.code.expect("code-seeded shift keeps its code");
    assert_eq!(code, "ER-PORT23");

    let replay = engine.session_from_code(&code).unwrap().unwrap();
    let (replayed, replay_shown) = play_through(replay);
    assert_eq!(replay_shown, shown);
    assert_eq!(
        replayed.state().scenario_order,
        finished.state().scenario_order
    );
}

#[test]
fn numeric_seeds_without_a_faithful_code_report_none() {
    let engine = ShiftEngine::new(BuiltinDeck);
    for seed in [1_u64, 1337, 0xBEEF] {
        let (finished, _) = play_through(engine.create_session(seed).unwrap());
        let summary = ShiftSummary::from_session(&finished).unwrap();
        assert_eq!(summary.code, None, "seed {seed}");
    }
}

#[test]
fn timeout_fires_on_the_two_hundredth_tick() {
    let (mut session, mut clock) = start(11);
    let events = play_case(&mut session, &mut clock, 0, None);
    let ticks = events
        .iter()
        .filter(|e| matches!(e, ClockEvent::Tick { .. }))
        .count();
    assert_eq!(ticks, 199);
    let timed_out_at = events.iter().find_map(|e| match e {
        ClockEvent::TimedOut { at_ms, .. } => Some(*at_ms),
        _ => None,
    });
    assert_eq!(timed_out_at, Some(20_000));
    let resolved_at = events.iter().find_map(|e| match e {
        ClockEvent::Resolved { at_ms, .. } => Some(*at_ms),
        _ => None,
    });
    assert_eq!(resolved_at, Some(24_000));
    assert_eq!(session.case_number(), 2);
}

#[test]
fn mixed_shift_tracks_streaks_and_log() {
    let (mut session, mut clock) = start(99);
    let label = correct_label(&session);
    play_case(&mut session, &mut clock, 500, Some(label));
    let label = correct_label(&session);
    play_case(&mut session, &mut clock, 500, Some(label));
    let label = wrong_label(&session);
    play_case(&mut session, &mut clock, 500, Some(label));
    let label = correct_label(&session);
    play_case(&mut session, &mut clock, 500, Some(label));

    assert_eq!(session.health(), 75);
    assert_eq!(session.streak(), 1);
    assert_eq!(session.state().best_streak, 2);
    let outcomes: Vec<Outcome> = session.state().answers.iter().map(|a| a.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            Outcome::Correct,
            Outcome::Correct,
            Outcome::Incorrect,
            Outcome::Correct
        ]
    );
    assert!(
        session
            .state()
            .answers
            .iter()
            .all(|a| (a.seconds_left - 19.5).abs() < 1e-4)
    );
}

#[test]
fn each_run_presents_every_scenario_once() {
    for seed in [1_u64, 2, 3, 0xDEAD_BEEF] {
        let (mut session, mut clock) = start(seed);
        let mut seen = Vec::new();
        while session.phase() == Phase::InProgress {
            let scenario = session.current_scenario().unwrap();
            let mut shown = session.options().to_vec();
            let mut listed = scenario.options.clone();
            shown.sort();
            listed.sort();
            assert_eq!(shown, listed);
            seen.push(scenario.id);
            let label = correct_label(&session);
            play_case(&mut session, &mut clock, 100, Some(label));
        }
        seen.sort_unstable();
        let mut ids: Vec<u32> = ScenarioDeck::builtin()
            .unwrap()
            .scenarios()
            .iter()
            .map(|s| s.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(seen, ids);
    }
}

#[test]
fn restart_mid_feedback_discards_stale_transition() {
    let (mut session, mut clock) = start(5);
    let label = wrong_label(&session);
    clock.advance(300, &mut session);
    session.submit_answer(Some(&label));
    clock.sync(&session);

    session.start();
    clock.sync(&session);
    let events = clock.advance(4_500, &mut session);
    assert!(
        events
            .iter()
            .all(|e| !matches!(e, ClockEvent::Resolved { .. }))
    );
    assert_eq!(session.case_number(), 1);
    assert_eq!(session.health(), 100);
    assert_eq!(clamp_display_health(session.health()), 100);
}
