use crate::i18n;
use std::collections::BTreeMap;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub code: AttrValue,
    pub valid: bool,
    #[prop_or_default]
    pub load_error: Option<AttrValue>,
    pub on_code: Callback<String>,
    pub on_start: Callback<()>,
}

/// Title card with the shift pitch, the replay code box, and the start button.
#[function_component(StartScreen)]
pub fn start_screen(p: &Props) -> Html {
    let oninput = {
        let cb = p.on_code.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<web_sys::HtmlInputElement>() {
                cb.emit(input.value());
            }
        })
    };
    let onclick = {
        let cb = p.on_start.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let error = p.load_error.as_ref().map(|err| {
        let mut args = BTreeMap::new();
        args.insert("error", err.as_str());
        html! { <p class="alert alert-error" role="alert">{ i18n::tr("errors.deck", Some(&args)) }</p> }
    });
    let blocked = p.load_error.is_some();

    html! {
        <main class="start-screen">
            <section class="panel start-card">
                <h1 class="start-title">{ i18n::t("app.title") }</h1>
                <h2 class="start-subtitle">{ i18n::t("app.subtitle") }</h2>
                <ul class="start-pitch">
                    <li class="pitch-stakes">{ i18n::t("start.pitch.stakes") }</li>
                    <li class="pitch-clock">{ i18n::t("start.pitch.clock") }</li>
                    <li class="pitch-damage">{ i18n::t("start.pitch.damage") }</li>
                </ul>
                { for error }
                <label for="shift-code"><strong>{ i18n::t("start.code_label") }</strong></label>
                <input
                    id="shift-code"
                    type="text"
                    class="share-code-input"
                    value={p.code.clone()}
                    {oninput}
                    aria-invalid={(!p.valid).then(|| AttrValue::from("true"))}
                    aria-describedby="shift-code-help"
                    placeholder="ER-INSULIN42"
                />
                <p id="shift-code-help" class="muted">
                    { if p.valid { i18n::t("start.code_help") } else { i18n::t("start.code_invalid") } }
                </p>
                <button class="btn-start" {onclick} disabled={blocked}>
                    { i18n::t("start.begin") }
                </button>
            </section>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    fn props(valid: bool, load_error: Option<&str>) -> Props {
        Props {
            code: AttrValue::from("ER-INSULIN42"),
            valid,
            load_error: load_error.map(|e| AttrValue::from(e.to_string())),
            on_code: Callback::noop(),
            on_start: Callback::noop(),
        }
    }

    #[test]
    fn renders_pitch_and_code() {
        let html = block_on(LocalServerRenderer::<StartScreen>::with_props(props(true, None)).render());
        assert!(html.contains("Start Shift"), "start button missing: {html}");
        assert!(html.contains("20 seconds to save each patient"));
        assert!(html.contains("ER-INSULIN42"));
        assert!(!html.contains("aria-invalid"));
    }

    #[test]
    fn flags_invalid_codes_and_load_errors() {
        let html = block_on(
            LocalServerRenderer::<StartScreen>::with_props(props(false, Some("deck broke"))).render(),
        );
        assert!(html.contains("aria-invalid=\"true\""));
        assert!(html.contains("Codes look like ER-WORD00."));
        assert!(html.contains("deck broke"));
        assert!(html.contains("disabled"));
    }
}
