//! Crash log: unhandled panics are appended to a file with a timestamp.
//! Logging is best-effort; a failure to write never masks the panic itself.

use std::io::Write;
use std::path::{Path, PathBuf};

/// `<data_dir>/xps-thermal-tray/crash.log`, if a data dir exists.
pub fn default_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("xps-thermal-tray").join("crash.log"))
}

/// Install a panic hook that appends to the crash log and then delegates
/// to the previously installed hook.
pub fn install_panic_hook() {
    let Some(path) = default_path() else {
        return;
    };
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = append_entry(&path, &info.to_string());
        previous(info);
    }));
}

fn append_entry(path: &Path, message: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "[{}] {}", chrono::Utc::now().to_rfc3339(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_entry_timestamps_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("crash.log");

        append_entry(&path, "first").unwrap();
        append_entry(&path, "second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));
    }
}
