use codered_game::{Feedback, Outcome};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub feedback: Feedback,
}

#[function_component(FeedbackPanel)]
pub fn feedback_panel(p: &Props) -> Html {
    let tone = match p.feedback.outcome {
        Outcome::Correct => "feedback-success",
        Outcome::Incorrect | Outcome::Timeout => "feedback-error",
    };
    html! {
        <div class={classes!("feedback-panel", tone)} role="status" aria-live="assertive">
            <h3 class="feedback-title">{ p.feedback.title.clone() }</h3>
            <p class="feedback-message">{ p.feedback.message.clone() }</p>
        </div>
    }
}
