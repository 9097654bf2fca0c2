use chrono::Local;
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Once;

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
    /// Directory for the dated log file; `None` keeps logging on stderr only.
    pub dir: Option<PathBuf>,
}

impl LogConfig {
    /// Reads `IBAN_LOG_LEVEL` (falling back to `RUST_LOG`) and `IBAN_LOG_DIR`.
    pub fn from_env() -> Self {
        let level = std::env::var("IBAN_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();
        let dir = std::env::var("IBAN_LOG_DIR").ok();
        Self {
            level: parse_level(level.as_deref()),
            dir: parse_dir(dir.as_deref()),
        }
    }

    pub fn with_overrides(mut self, level: Option<&str>, dir: Option<&str>) -> Self {
        if level.is_some() {
            self.level = parse_level(level);
        }
        if dir.is_some() {
            self.dir = parse_dir(dir);
        }
        self
    }
}

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

fn parse_dir(value: Option<&str>) -> Option<PathBuf> {
    match value {
        Some("off") | Some("none") | Some("") => None,
        Some(path) => Some(PathBuf::from(path)),
        None => Some(PathBuf::from("logs")),
    }
}

pub fn init_logging(app_name: &str, config: &LogConfig) -> Result<(), String> {
    let mut init_result: Result<(), String> = Ok(());
    INIT.call_once(|| {
        if let Err(err) = init_logging_inner(app_name, config) {
            init_result = Err(err);
        }
    });
    init_result
}

fn init_logging_inner(app_name: &str, config: &LogConfig) -> Result<(), String> {
    // stdout carries command results, so diagnostics go to stderr.
    let mut dispatch = fern::Dispatch::new()
        .level(config.level)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} | {:<5} | {} | {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    if let Some(dir) = &config.dir {
        std::fs::create_dir_all(dir).map_err(|err| err.to_string())?;
        let date = Local::now().format("%Y_%m_%d");
        let file_path = dir.join(format!("{app_name}-{date}.log"));
        dispatch = dispatch.chain(fern::log_file(file_path).map_err(|err| err.to_string())?);
    }

    dispatch.apply().map_err(|err| err.to_string())
}
