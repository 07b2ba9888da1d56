use crate::i18n;
use codered_game::{Ending, ShiftSummary};
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub summary: ShiftSummary,
    pub on_restart: Callback<()>,
}

fn stat_row(label_key: &str, value: String) -> Html {
    html! {
        <div class="result-stat">
            <dt>{ i18n::t(label_key) }</dt>
            <dd>{ value }</dd>
        </div>
    }
}

/// Win or loss screen with the shift debrief and a restart button.
#[function_component(ResultScreen)]
pub fn result_screen(p: &Props) -> Html {
    let s = &p.summary;
    let onclick = {
        let cb = p.on_restart.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let (tone, headline, again) = match s.ending {
        Ending::Won => ("result-won", "result.won.headline", "result.won.again"),
        Ending::Lost => ("result-lost", "result.lost.headline", "result.lost.again"),
    };

    let body = match s.ending {
        Ending::Won => html! {
            <>
                <p class="result-body">{ i18n::t("result.won.body") }</p>
                <div class="result-takeaways">
                    <p><strong>{ i18n::t("result.won.takeaways") }</strong></p>
                    <ul>
                        { for s.takeaways.iter().map(|line| html! { <li>{ line.clone() }</li> }) }
                    </ul>
                </div>
            </>
        },
        Ending::Lost => {
            let case = s.case_reached.to_string();
            let mut args = BTreeMap::new();
            args.insert("case", case.as_str());
            html! {
                <>
                    <p class="result-body">{ i18n::tr("result.lost.body", Some(&args)) }</p>
                    <p class="result-quote">{ i18n::t("result.lost.quote") }</p>
                </>
            }
        }
    };

    let accuracy = format!("{:.0}", s.accuracy_pct);
    let mut accuracy_args = BTreeMap::new();
    accuracy_args.insert("pct", accuracy.as_str());

    html! {
        <main class={classes!("result-screen", tone)}>
            <h1 class="result-headline">{ i18n::t(headline) }</h1>
            { body }
            <dl class="result-stats">
                { stat_row("result.stats.correct", s.correct.to_string()) }
                { stat_row("result.stats.incorrect", s.incorrect.to_string()) }
                { stat_row("result.stats.timeouts", s.timeouts.to_string()) }
                { stat_row("result.stats.best_streak", s.best_streak.to_string()) }
            </dl>
            <p class="result-accuracy">{ i18n::tr("result.stats.accuracy", Some(&accuracy_args)) }</p>
            if let Some(code) = s.code.clone() {
                <p class="result-code">
                    <span class="muted">{ i18n::t("result.code") }</span>
                    { " " }
                    <span class="seed-code">{ code }</span>
                </p>
            }
            <button class="btn-restart" {onclick}>{ i18n::t(again) }</button>
        </main>
    }
}
