use assert_cmd::Command;
use std::path::Path;

/// Creates a `Command` for the `mood-journal` binary with a clean environment.
///
/// Entries are stored under `data_dir` and no API key is set, so every entry is
/// classified as neutral without touching the network.
pub fn base_journal_command(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mood-journal").expect("mood-journal binary not built");
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HOME", data_dir).env("MOOD_JOURNAL_DIR", data_dir);
    cmd
}
