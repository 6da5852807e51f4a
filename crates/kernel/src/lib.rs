pub mod settings;

pub use settings::{DatabaseSettings, Environment, LogFormat, Settings, TelemetrySettings};
