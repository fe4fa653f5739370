//! run log: every line goes to the log file and stdout as `HH-MM-SS: message`

use std::path::Path;

use chrono::{DateTime, Local, TimeZone};
use log::LevelFilter;

pub fn format_line<Tz: TimeZone>(time: &DateTime<Tz>, message: &std::fmt::Arguments) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}: {}", time.format("%H-%M-%S"), message)
}

/// level from RUST_LOG, info unless told otherwise
pub fn level_from_env() -> LevelFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

pub fn dispatch(log_file: &Path, level: LevelFilter) -> Result<fern::Dispatch, std::io::Error> {
    Ok(fern::Dispatch::new()
        .level(level)
        .chain(fern::log_file(log_file)?)
        .chain(std::io::stdout())
        .format(|out, message, _record| {
            out.finish(format_args!("{}", format_line(&Local::now(), message)))
        }))
}

pub fn init(log_file: &Path) -> Result<(), fern::InitError> {
    dispatch(log_file, level_from_env())?.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use log::{Level, Record};

    #[test]
    fn line_format() {
        let t = Utc.with_ymd_and_hms(2026, 10, 19, 7, 5, 9).unwrap();
        assert_eq!(
            format_line(&t, &format_args!("Starting sanity check on {}", "gateway-vm")),
            "07-05-09: Starting sanity check on gateway-vm"
        );
    }

    #[test]
    fn appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log_resolver_testbed.txt");
        std::fs::write(&path, "earlier run\n").unwrap();

        let (_, logger) = dispatch(&path, LevelFilter::Info).unwrap().into_log();
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .args(format_args!("## Finished run"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("filtered out"))
                .build(),
        );
        logger.flush();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "earlier run");
        assert!(lines[1].ends_with(": ## Finished run"));
        assert_eq!(lines[1].len(), "HH-MM-SS: ## Finished run".len());
    }
}
