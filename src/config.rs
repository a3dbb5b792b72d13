use std::env;

use crate::models::Language;

/// Runtime tunables for the demo session. Everything has a default so the
/// app runs with no environment at all; a `.env` file can override any field.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Simulated MYiD login delay, milliseconds.
    pub login_delay_ms: u64,
    /// Simulated identity-verification delay, milliseconds.
    pub verify_delay_ms: u64,
    pub default_language: Language,
    /// Cap for the featured strip on the home view.
    pub featured_limit: usize,
    /// Cap for the recent-listings strip on the home view.
    pub recent_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            login_delay_ms: 1500,
            verify_delay_ms: 2000,
            default_language: Language::Uz,
            featured_limit: 6,
            recent_limit: 8,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = AppConfig::default();
        Self {
            login_delay_ms: env::var("BOZOR_LOGIN_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.login_delay_ms),
            verify_delay_ms: env::var("BOZOR_VERIFY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.verify_delay_ms),
            default_language: env::var("BOZOR_LANG")
                .ok()
                .and_then(|v| Language::parse(&v))
                .unwrap_or(defaults.default_language),
            featured_limit: env::var("BOZOR_FEATURED_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.featured_limit),
            recent_limit: env::var("BOZOR_RECENT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.recent_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_timings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.login_delay_ms, 1500);
        assert_eq!(cfg.verify_delay_ms, 2000);
        assert_eq!(cfg.default_language, Language::Uz);
        assert_eq!(cfg.featured_limit, 6);
        assert_eq!(cfg.recent_limit, 8);
    }
}
