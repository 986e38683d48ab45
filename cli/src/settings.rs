use anyhow::{Context, bail};
use serde::Deserialize;
use std::path::Path;
use tileslide_core::{Count, DEFAULT_MAX_MOVES, DEFAULT_TIMER_SECONDS};

/// Budget a fresh builder starts with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct BuilderDefaults {
    pub max_moves: Count,
    pub timer_seconds: Count,
}

impl Default for BuilderDefaults {
    fn default() -> Self {
        Self {
            max_moves: DEFAULT_MAX_MOVES,
            timer_seconds: DEFAULT_TIMER_SECONDS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub builder: BuilderDefaults,
    /// How long a move stays in flight before the next tap is accepted; 0 settles at once.
    pub settle_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            builder: BuilderDefaults::default(),
            settle_ms: 300,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config {}", path.display()))?;
        let settings = Self::parse(&contents)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        log::debug!("settings: {:?}", settings);
        Ok(settings)
    }

    fn parse(contents: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(contents)?;
        if settings.builder.max_moves == 0 || settings.builder.timer_seconds == 0 {
            bail!("builder max_moves and timer_seconds must be positive");
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_builder_table() {
        let settings = Settings::parse("settle_ms = 0\n[builder]\nmax_moves = 4\n").unwrap();

        assert_eq!(settings.settle_ms, 0);
        assert_eq!(settings.builder.max_moves, 4);
        assert_eq!(settings.builder.timer_seconds, 30);
    }

    #[test]
    fn zero_budget_is_rejected() {
        assert!(Settings::parse("[builder]\ntimer_seconds = 0\n").is_err());
    }
}
