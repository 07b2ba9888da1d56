pub mod state;
pub mod timers;

use codered_game::{Phase, ShiftSession, ShiftSummary};
use yew::prelude::*;

use crate::components::{
    FeedbackPanel, OptionGrid, ResultScreen, ScenarioCard, StartScreen, VitalsHud,
};
use crate::dom;
use state::{ShiftAction, ShiftStore};
use timers::{use_countdown_ticker, use_pending_transition};

fn render_shift(session: &ShiftSession, on_pick: Callback<String>) -> Html {
    let Some(scenario) = session.current_scenario() else {
        return Html::default();
    };
    html! {
        <>
            <VitalsHud
                health={session.display_health()}
                band={session.vitals()}
                case_number={session.case_number()}
                total_cases={session.total_cases()}
                seconds_left={session.remaining_seconds()}
                urgent={session.timer_urgent()}
                streak={session.streak()}
            />
            <main class="shift-main">
                <ScenarioCard scenario={scenario.clone()} />
                if let Some(feedback) = session.feedback() {
                    <FeedbackPanel feedback={feedback.clone()} />
                }
                <OptionGrid
                    options={session.options().to_vec()}
                    correct={AttrValue::from(scenario.correct.clone())}
                    revealed={session.feedback().is_some()}
                    {on_pick}
                />
            </main>
        </>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let store = use_reducer(|| ShiftStore::boot(dom::entropy()));
    let dispatcher = store.dispatcher();

    let armed = store
        .session
        .as_ref()
        .filter(|s| s.countdown_active())
        .and_then(ShiftSession::token);
    let pending = store.session.as_ref().and_then(ShiftSession::pending);
    use_countdown_ticker(armed, dispatcher.clone());
    use_pending_transition(pending, dispatcher.clone());

    let on_start = {
        let store = store.clone();
        Callback::from(move |()| {
            let seed = store.seed_for_start(dom::entropy());
            store.dispatch(ShiftAction::Start { seed });
        })
    };
    let on_code = {
        let dispatcher = dispatcher.clone();
        Callback::from(move |code: String| dispatcher.dispatch(ShiftAction::SetCode(code)))
    };
    let on_pick = Callback::from(move |label: String| dispatcher.dispatch(ShiftAction::Answer(label)));

    let phase = store
        .session
        .as_ref()
        .map_or(Phase::NotStarted, ShiftSession::phase);

    let body = match (phase, store.session.as_ref()) {
        (Phase::InProgress, Some(session)) => render_shift(session, on_pick),
        (phase, Some(session)) if phase.is_terminal() => ShiftSummary::from_session(session)
            .map(|summary| html! { <ResultScreen {summary} on_restart={on_start.clone()} /> })
            .unwrap_or_default(),
        _ => html! {
            <StartScreen
                code={store.code.clone()}
                valid={store.code_valid()}
                load_error={store.load_error.clone().map(AttrValue::from)}
                {on_code}
                on_start={on_start.clone()}
            />
        },
    };

    html! {
        <div class="codered-app">
            { body }
        </div>
    }
}
