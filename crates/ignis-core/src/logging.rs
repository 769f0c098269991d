// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The logging subsystem: installs an `env_logger` backend behind the `log` facade.

use crate::config::LoggingConfig;
use log::LevelFilter;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

/// The configured log level could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}'")]
pub struct InvalidLogLevel(pub String);

/// Installs the console logger if no logger is installed yet and sets the
/// active level.
///
/// The logger itself passes every record; the `log` facade's max level does
/// the filtering, so a later call can raise or lower it. When `RUST_LOG` is
/// set it wins and `level` is ignored.
///
/// ## Returns
/// `true` if this call installed the logger.
pub fn install_console_logger(level: LevelFilter) -> bool {
    let installed = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(LevelFilter::Trace.as_str()),
    )
    .format(|buf, record| writeln!(buf, "[{}]: {}", record.level(), record.args()))
    .try_init()
    .is_ok();

    if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_none() {
        log::set_max_level(level);
    }
    installed
}

/// Owns the console logger for the lifetime of the application.
#[derive(Debug)]
pub struct LoggingSystem {
    level: LevelFilter,
    installed: bool,
}

impl LoggingSystem {
    /// Parses the configured level and installs the console logger.
    ///
    /// `RUST_LOG` overrides the configured level. If a global logger is
    /// already installed (another application in the same process, or a test
    /// harness) it is kept and this call still succeeds.
    ///
    /// ## Errors
    /// Returns [`InvalidLogLevel`] when `config.level` is not a known level.
    pub fn initialize(config: &LoggingConfig) -> Result<Self, InvalidLogLevel> {
        let level = LevelFilter::from_str(config.level.trim())
            .map_err(|_| InvalidLogLevel(config.level.clone()))?;

        let installed = install_console_logger(level);

        if installed {
            log::info!("Logging subsystem initialized at level {level}.");
        } else {
            log::debug!("A logger is already installed, keeping it.");
        }
        Ok(Self { level, installed })
    }

    /// The level parsed from the configuration.
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Whether this instance installed the process-wide logger.
    pub fn installed_logger(&self) -> bool {
        self.installed
    }

    /// Flushes pending output.
    pub fn shutdown(&self) {
        log::info!("Logging subsystem shut down.");
        log::logger().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_are_accepted() {
        for (text, expected) in [
            ("info", LevelFilter::Info),
            ("TRACE", LevelFilter::Trace),
            (" warn ", LevelFilter::Warn),
            ("off", LevelFilter::Off),
        ] {
            let logging = LoggingSystem::initialize(&LoggingConfig {
                level: text.to_string(),
            })
            .expect("level should parse");
            assert_eq!(logging.level(), expected);
        }
    }

    #[test]
    fn unknown_level_fails() {
        let err = LoggingSystem::initialize(&LoggingConfig {
            level: "loud".to_string(),
        })
        .unwrap_err();
        assert_eq!(err, InvalidLogLevel("loud".to_string()));
    }
}
