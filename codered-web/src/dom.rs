use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Milliseconds since the epoch, used to seed fresh shift codes.
#[must_use]
pub fn entropy() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let now = js_sys::Date::now() as u64;
        now
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default()
    }
}

fn timer_delay(ms: u32) -> Option<i32> {
    i32::try_from(ms).ok()
}

fn out_of_range() -> JsValue {
    JsValue::from_str("timer delay out of range")
}

fn require_window() -> Result<Window, JsValue> {
    window().ok_or_else(|| JsValue::from_str("`window` unavailable"))
}

/// A running `setInterval`; dropping the handle clears it.
pub struct IntervalHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalHandle {
    /// Schedule `callback` every `period_ms`.
    ///
    /// # Errors
    /// Returns the browser error if the interval cannot be scheduled.
    pub fn start<F>(period_ms: u32, callback: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let win = require_window()?;
        let closure = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timer_delay(period_ms).ok_or_else(out_of_range)?,
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for IntervalHandle {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.id);
        }
    }
}

/// A pending `setTimeout`; dropping the handle before it fires cancels it.
pub struct TimeoutHandle {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl TimeoutHandle {
    /// Schedule `callback` once after `delay_ms`.
    ///
    /// # Errors
    /// Returns the browser error if the timeout cannot be scheduled.
    pub fn once<F>(delay_ms: u32, callback: F) -> Result<Self, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let win = require_window()?;
        let closure: Closure<dyn FnMut()> = Closure::once(callback);
        let id = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            timer_delay(delay_ms).ok_or_else(out_of_range)?,
        )?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for TimeoutHandle {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_timeout_with_handle(self.id);
        }
    }
}

/// `log` backend that writes to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format!(
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        ));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            log::Level::Info => web_sys::console::info_1(&line),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install [`ConsoleLogger`] as the global logger. Later calls are no-ops.
pub fn install_logger(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
