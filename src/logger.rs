use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
pub use console::ConsoleLogger;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Log, Metadata, Record};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = console)]
        fn log(s: &str);
        #[wasm_bindgen(js_namespace = console)]
        fn warn(s: &str);
        #[wasm_bindgen(js_namespace = console)]
        fn error(s: &str);
    }

    /// Sends `log` records to the browser console.
    pub struct ConsoleLogger;

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
            match record.level() {
                log::Level::Error => error(&line),
                log::Level::Warn => warn(&line),
                _ => log(&line),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the logger. Calling it again only changes the level.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    // Fails only when a logger is already set, which is fine.
    let _ = log::set_logger(&console::LOGGER);
    log::set_max_level(level);
}

/// Install the logger. Calling it again only changes the level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    // The builder filter is fixed once installed, so later calls go through
    // the global max level.
    let _ = env_logger::Builder::new().filter_level(LevelFilter::Trace).try_init();
    log::set_max_level(level);
}
