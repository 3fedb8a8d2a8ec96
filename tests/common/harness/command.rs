//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `shelf` binary.
pub struct ShelfCommand {
    args: Vec<String>,
}

impl ShelfCommand {
    /// Creates a new command for the `shelf` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the storage directory options.
    pub fn dirs(mut self, documents_dir: &Path, index_dir: &Path) -> Self {
        self.args.push("--documents-dir".to_string());
        self.args.push(documents_dir.to_string_lossy().to_string());
        self.args.push("--index-dir".to_string());
        self.args.push(index_dir.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("shelf").expect("Failed to find shelf binary");
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `index` command.
    pub fn index(self, path: &Path) -> Self {
        self.args(["index", &path.to_string_lossy()])
    }

    /// Configures for the `note` command.
    pub fn note(self, title: &str, content: &str) -> Self {
        self.args(["note", title, content])
    }

    /// Configures for the `search` command with a query.
    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    /// Configures for the `meta` command.
    pub fn meta(self, path: &Path) -> Self {
        self.args(["meta", &path.to_string_lossy()])
    }

    /// Adds a `--tag` option.
    pub fn tag(self, tag: &str) -> Self {
        self.args(["--tag", tag])
    }

    /// Adds a `--limit` option.
    pub fn limit(self, limit: i64) -> Self {
        self.args(["--limit", &limit.to_string()])
    }

    /// Adds a `--format` option.
    pub fn format(self, format: &str) -> Self {
        self.args(["--format", format])
    }
}

impl Default for ShelfCommand {
    fn default() -> Self {
        Self::new()
    }
}
