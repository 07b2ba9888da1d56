use crate::i18n;
use codered_game::{Difficulty, ScenarioRecord};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub scenario: ScenarioRecord,
}

const fn difficulty_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "badge-easy",
        Difficulty::Medium => "badge-medium",
        Difficulty::Hard => "badge-hard",
    }
}

#[function_component(ScenarioCard)]
pub fn scenario_card(p: &Props) -> Html {
    let s = &p.scenario;
    let difficulty_key = format!("case.difficulty.{}", s.difficulty.as_str());
    html! {
        <section class="panel scenario-card" aria-labelledby="case-title">
            <header class="section-header">
                <h2 id="case-title">{ s.title.clone() }</h2>
                <span class={classes!("badge", difficulty_class(s.difficulty))}>
                    { i18n::t(&difficulty_key) }
                </span>
            </header>
            <div class="case-complaint">
                <p class="case-label">{ i18n::t("case.complaint") }</p>
                <p>{ s.symptoms.clone() }</p>
            </div>
            <div class="case-history">
                <p class="case-label">{ i18n::t("case.history") }</p>
                <p>{ s.history.clone() }</p>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codered_game::ScenarioDeck;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn each_difficulty_gets_its_own_badge() {
        assert_eq!(difficulty_class(Difficulty::Easy), "badge-easy");
        assert_eq!(difficulty_class(Difficulty::Medium), "badge-medium");
        assert_eq!(difficulty_class(Difficulty::Hard), "badge-hard");
    }

    #[test]
    fn renders_presentation_and_badge() {
        let deck = ScenarioDeck::builtin().unwrap();
        let scenario = deck
            .scenarios()
            .iter()
            .find(|s| s.difficulty == Difficulty::Hard)
            .unwrap()
            .clone();
        let html = block_on(
            LocalServerRenderer::<ScenarioCard>::with_props(Props {
                scenario: scenario.clone(),
            })
            .render(),
        );
        assert!(html.contains("Chief Complaint"));
        assert!(html.contains("History"), "{html}");
        assert!(html.contains("badge-hard"));
        assert!(html.contains(&scenario.title));
    }
}
