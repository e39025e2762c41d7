//! Diagnostic logging setup.
//!
//! Native builds log through the usual `tracing-subscriber` fmt layer. In the
//! browser, each formatted line is forwarded to `console.log`.

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn filter_for(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
    })
}

/// Install a fmt subscriber at `level` unless `RUST_LOG` says otherwise.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_target(false)
        .try_init()
        .is_ok()
}

#[cfg(target_arch = "wasm32")]
pub use console::init_console_logging;

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    /// Buffers one formatted event and emits it to the console on drop.
    pub struct ConsoleWriter {
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let line = String::from_utf8_lossy(&self.buf);
            let line = line.trim_end();
            if !line.is_empty() {
                web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(line));
            }
        }
    }

    #[derive(Clone, Copy, Default)]
    pub struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter { buf: Vec::new() }
        }
    }

    /// Install a console-backed subscriber. No timestamps: the wasm32 target
    /// has no system clock.
    pub fn init_console_logging(level: Level) -> bool {
        tracing_subscriber::fmt()
            .with_writer(ConsoleMakeWriter)
            .with_max_level(level)
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .try_init()
            .is_ok()
    }
}
