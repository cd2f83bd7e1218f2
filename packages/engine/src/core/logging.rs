//! Browser console sink for the `log` facade.
//!
//! On wasm32 records go to `console.*`; on native targets the logger is
//! inert so tests run without any output plumbing.

use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct ConsoleLogger {
    level: Level,
}

static LOGGER: ConsoleLogger = ConsoleLogger { level: Level::Info };

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        #[cfg(target_arch = "wasm32")]
        {
            let line = format!("[{}] {}", record.target(), record.args());
            let value = wasm_bindgen::JsValue::from_str(&line);
            match record.level() {
                Level::Error => web_sys::console::error_1(&value),
                Level::Warn => web_sys::console::warn_1(&value),
                Level::Info => web_sys::console::log_1(&value),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&value),
            }
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Safe to call more than once.
pub fn install() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_below_info_and_logs_natively() {
        let info = Metadata::builder().level(Level::Info).target("life").build();
        let debug = Metadata::builder().level(Level::Debug).target("life").build();
        assert!(LOGGER.enabled(&info));
        assert!(!LOGGER.enabled(&debug));

        LOGGER.log(
            &Record::builder()
                .metadata(info)
                .args(format_args!("native records are dropped"))
                .build(),
        );
        install();
        install();
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
