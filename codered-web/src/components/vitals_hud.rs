use crate::i18n;
use codered_game::VitalsBand;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// Clamped health, `0..=100`.
    pub health: u8,
    pub band: VitalsBand,
    pub case_number: usize,
    pub total_cases: usize,
    pub seconds_left: f32,
    pub urgent: bool,
    pub streak: u32,
}

const fn band_class(band: VitalsBand) -> &'static str {
    match band {
        VitalsBand::Stable => "vitals-stable",
        VitalsBand::Guarded => "vitals-guarded",
        VitalsBand::Critical => "vitals-critical",
    }
}

/// Sticky header: vitals meter, case counter, streak, and the countdown.
#[function_component(VitalsHud)]
pub fn vitals_hud(p: &Props) -> Html {
    let fill_style = format!("width: {}%", p.health);
    let timer_class = classes!("hud-timer", p.urgent.then_some("timer-urgent"));
    html! {
        <header class="vitals-hud" role="banner">
            <div class="hud-vitals">
                <span class="hud-label">{ i18n::t("hud.vitality") }</span>
                <div
                    class={classes!("vitals-bar", band_class(p.band))}
                    role="meter"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow={p.health.to_string()}
                    aria-label={i18n::t("hud.vitality")}
                >
                    <div class="bar-fill" style={fill_style}></div>
                    <span class="bar-value">{ format!("{}%", p.health) }</span>
                </div>
            </div>
            <div class="hud-case">
                <span class="hud-label">{ i18n::t("hud.case") }</span>
                <span class="hud-case-count">{ format!("{} / {}", p.case_number, p.total_cases) }</span>
            </div>
            <div class="hud-streak">
                <span class="hud-label">{ i18n::t("hud.streak") }</span>
                <span class="hud-streak-count">{ p.streak }</span>
            </div>
            <div class={timer_class} aria-live="off">
                { i18n::fmt_seconds(p.seconds_left) }
            </div>
        </header>
    }
}
