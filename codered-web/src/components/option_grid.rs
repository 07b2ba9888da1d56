use crate::i18n;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Labels in the order this question displays them.
    pub options: Vec<String>,
    pub correct: AttrValue,
    /// Feedback is showing: lock the buttons and reveal the answer.
    pub revealed: bool,
    pub on_pick: Callback<String>,
}

const ICONS: [&str; 4] = ["icon-pill", "icon-syringe", "icon-stethoscope", "icon-activity"];

#[function_component(OptionGrid)]
pub fn option_grid(p: &Props) -> Html {
    let buttons = p.options.iter().enumerate().map(|(i, label)| {
        let onclick = {
            let on_pick = p.on_pick.clone();
            let label = label.clone();
            Callback::from(move |_| on_pick.emit(label.clone()))
        };
        let state = if !p.revealed {
            None
        } else if p.correct.as_str() == label {
            Some("option-correct")
        } else {
            Some("option-dimmed")
        };
        let icon = ICONS.get(i).copied().unwrap_or(ICONS[0]);
        html! {
            <button
                class={classes!("option-btn", state)}
                {onclick}
                disabled={p.revealed}
            >
                <span class={classes!("option-icon", icon)} aria-hidden="true"></span>
                <span class="option-label">{ label.clone() }</span>
            </button>
        }
    });
    html! {
        <div class="option-grid" role="group" aria-label={i18n::t("options.label")}>
            { for buttons }
        </div>
    }
}
