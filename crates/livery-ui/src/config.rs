use std::time::Duration;

/// Tunables for a [`PaintEditor`](crate::PaintEditor).
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Period of the recurring custom-badge recompute.
    pub badge_refresh_interval: Duration,
    /// How long a preset must be held before the remove dialog opens.
    pub preset_hold_duration: Duration,
    /// Paint slots presented by the editors.
    pub paint_slots: usize,
    /// Send a highlight command when a part is selected or hovered.
    pub highlight_on_select: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            badge_refresh_interval: Duration::from_millis(750),
            preset_hold_duration: Duration::from_millis(650),
            paint_slots: 3,
            highlight_on_select: true,
        }
    }
}

pub const ENV_BADGE_REFRESH_MS: &str = "LIVERY_BADGE_REFRESH_MS";
pub const ENV_PRESET_HOLD_MS: &str = "LIVERY_PRESET_HOLD_MS";

impl EditorConfig {
    /// Defaults with overrides from `LIVERY_BADGE_REFRESH_MS` and `LIVERY_PRESET_HOLD_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    ///
    /// Unparseable or zero values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(ms) = millis(&lookup, ENV_BADGE_REFRESH_MS) {
            config.badge_refresh_interval = ms;
        }
        if let Some(ms) = millis(&lookup, ENV_PRESET_HOLD_MS) {
            config.preset_hold_duration = ms;
        }
        config
    }
}

fn millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            log::warn!("ignoring {key}={raw:?}: expected a positive number of milliseconds");
            None
        }
    }
}
