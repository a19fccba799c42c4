//! Logging setup on top of flexi_logger
//!
//! Three output formats are supported: `text` (default), `ext` (adds the
//! source location) and `json` (one object per line).

// Held for the life of the process; dropping the handle stops file output
static LOGGER_HANDLE: std::sync::OnceLock<std::sync::Mutex<flexi_logger::LoggerHandle>> =
    std::sync::OnceLock::new();

pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let level_str = log_level.unwrap_or("info");
    let format_type = log_format.unwrap_or("text");

    let mut logger = Logger::try_with_str(level_str)?;

    logger = match (format_type, color_enabled) {
        ("json", _) => logger.format(json_format),
        ("ext", true) => logger.format(extended_color_format),
        ("ext", false) => logger.format(extended_format),
        (_, true) => logger.format(simple_color_format),
        (_, false) => logger.format(simple_format),
    };

    if let Some(file_path) = log_file {
        let file_spec = FileSpec::try_from(std::path::Path::new(file_path))?;
        logger = logger.log_to_file(file_spec);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(std::sync::Mutex::new(handle));

    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn level_colored(level: log::Level) -> colored::ColoredString {
    use colored::Colorize;

    match level {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message"
fn simple_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args()
    )
}

fn simple_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args()
    )
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (service/shared.rs:42)"
fn extended_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn extended_color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::Colorize;

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let json_obj = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line())
    });

    match serde_json::to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// timetable::service::shared -> service/shared.rs:LINE
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("timetable::") {
        Some(without_prefix) => without_prefix.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };

    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}
