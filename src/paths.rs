use std::path::PathBuf;
use std::sync::OnceLock;

use chrono::NaiveDate;

/// XDG-compliant directory layout for earcheck.
///
/// On Linux:
///   Config:  $XDG_CONFIG_HOME/earcheck  (~/.config/earcheck)
///   Data:    $XDG_DATA_HOME/earcheck    (~/.local/share/earcheck)
///
/// On macOS both live under ~/Library/Application Support/earcheck.
/// The `dirs` crate handles platform detection; resolved base paths are
/// cached in OnceLock cells so the lookup happens once.

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Root data directory: $XDG_DATA_HOME/earcheck
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("earcheck")
    })
}

/// Root config directory: $XDG_CONFIG_HOME/earcheck
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("earcheck")
    })
}

/// Config file path: <config_dir>/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Reports directory: <data_dir>/reports
pub fn reports_dir() -> PathBuf {
    data_dir().join("reports")
}

/// Default markdown report path for a test run on the given date.
pub fn report_path(date: &NaiveDate) -> PathBuf {
    reports_dir().join(format!("hearing-test-{date}.md"))
}

/// JSON export path next to the markdown report.
pub fn json_export_path(date: &NaiveDate) -> PathBuf {
    reports_dir().join(format!("hearing-test-{date}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_earcheck() {
        assert!(data_dir().ends_with("earcheck"));
    }

    #[test]
    fn config_dir_ends_with_earcheck() {
        assert!(config_dir().ends_with("earcheck"));
    }

    #[test]
    fn config_file_structure() {
        assert!(config_file().ends_with("config.toml"));
    }

    #[test]
    fn report_path_structure() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert!(report_path(&date).ends_with("reports/hearing-test-2026-03-02.md"));
    }

    #[test]
    fn json_export_path_structure() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert!(json_export_path(&date).ends_with("reports/hearing-test-2026-03-02.json"));
    }
}
