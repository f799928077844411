//! Log output for the gateway.
//!
//! Lines look like `2026-10-18T09:30:00Z info [dagdata::api]: message`. The
//! filter comes from `RUST_LOG` and defaults to `warn,info`.
use std::io::Write;

use env_logger::{fmt::Color, Builder, Env};
use log::Level;

/// Label and color printed for each level.
pub(crate) fn level_label(level: Level) -> (&'static str, Option<Color>) {
    match level {
        Level::Error => ("error", Some(Color::Red)),
        Level::Warn => ("warning", Some(Color::Yellow)),
        Level::Info => ("info", Some(Color::Green)),
        Level::Debug => ("debug", Some(Color::Cyan)),
        Level::Trace => ("trace", None),
    }
}

pub fn setup() {
    Builder::from_env(Env::default().default_filter_or("warn,info"))
        .format(|buf, record| {
            let (label, color) = level_label(record.level());

            let mut style = buf.style();
            style.set_bold(true);
            if let Some(color) = color {
                style.set_color(color);
            }

            writeln!(
                buf,
                "{} {} [{}]: {}",
                buf.timestamp_seconds(),
                style.value(label),
                record.target(),
                record.args()
            )
        })
        .init();
}
