// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
struct LogLine {
    text: String,
    warn: bool,
}

#[derive(Debug, Default)]
struct LoggerInner {
    lines: Vec<LogLine>,
}

/// Thread-safe string logger.
///
/// Clones share the same lines, so a logger handed to a widget can be
/// inspected by the embedding code afterwards.
#[derive(Clone, Debug, Default)]
pub struct StringLogger {
    debug: bool,
    inner: Arc<Mutex<LoggerInner>>,
}

impl StringLogger {
    /// Create a new string logger. When `debug` is set, every line is also
    /// echoed to stdout.
    pub fn new(debug: bool) -> Self {
        Self {
            debug,
            inner: Arc::new(Mutex::new(Default::default())),
        }
    }

    /// Call a function and trace the result.
    pub fn call<T>(&self, line: String, result: Result<T, Error>) -> Result<T, Error> {
        match &result {
            Ok(_) => self.trace(format!("{line} succeeded")),
            Err(e) => self.warn(format!("{line} failed: {e}")),
        }
        result
    }

    /// Whether the log contains any warnings.
    pub fn contains_warnings(&self) -> bool {
        self.inner
            .lock()
            .ok()
            .map(|inner| inner.lines.iter().any(|l| l.warn))
            .unwrap_or(false)
    }

    /// Add all lines from the specified logger to this logger.
    pub fn extend(&self, string_logger: &StringLogger) {
        if Arc::ptr_eq(&self.inner, &string_logger.inner) {
            return;
        }
        let from_lines = match string_logger.inner.lock() {
            Ok(from_inner) => from_inner.lines.clone(),
            Err(_) => return,
        };
        if let Ok(mut to_inner) = self.inner.lock() {
            to_inner.lines.extend(from_lines);
        }
    }

    /// All lines, warnings included, in the order they were logged.
    pub fn lines(&self) -> Vec<String> {
        self.collect(|_| true)
    }

    /// Add a trace line to this logger.
    pub fn trace(&self, line: String) {
        self.push(line, false);
    }

    /// Add a warning or error line to this logger.
    pub fn warn(&self, line: String) {
        self.push(line, true);
    }

    /// Only the warning lines.
    pub fn warnings(&self) -> Vec<String> {
        self.collect(|l| l.warn)
    }

    fn collect(&self, keep: impl Fn(&LogLine) -> bool) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| {
                inner
                    .lines
                    .iter()
                    .filter(|l| keep(l))
                    .map(|l| l.text.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn push(&self, text: String, warn: bool) {
        if !text.is_empty() {
            if self.debug {
                println!("{text}");
            }
            if let Ok(mut inner) = self.inner.lock() {
                inner.lines.push(LogLine { text, warn });
            }
        }
    }
}

impl Display for StringLogger {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
