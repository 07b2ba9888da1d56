use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::BTreeMap;

const EN_BUNDLE: &str = include_str!("../i18n/en.json");

static STRINGS: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(EN_BUNDLE).unwrap_or_else(|err| {
        log::error!("string bundle failed to parse: {err}");
        Value::Object(serde_json::Map::new())
    })
});

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render_value(value: &Value, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = value.as_str()?.to_string();
    if let Some(args_map) = args {
        for (k, v) in args_map {
            let ph1 = format!("{{{{{k}}}}}"); // {{var}}
            let ph2 = format!("{{{k}}}"); // {var}
            text = text.replace(&ph1, v);
            text = text.replace(&ph2, v);
        }
    }
    Some(text)
}

/// Look up a dotted key; the key itself is returned when missing.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Look up a dotted key and substitute `{var}` / `{{var}}` placeholders.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    get_nested_value(&STRINGS, key)
        .and_then(|v| render_value(v, args))
        .unwrap_or_else(|| key.to_string())
}

/// Format seconds the way the HUD shows them: one decimal place.
#[must_use]
pub fn fmt_seconds(seconds: f32) -> String {
    let value = format!("{seconds:.1}");
    let mut args = BTreeMap::new();
    args.insert("value", value.as_str());
    tr("hud.seconds", Some(&args))
}
