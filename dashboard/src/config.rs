use std::time::Duration;

/// Runtime tunables for the dashboard demo.
///
/// Everything here shapes the simulated backend, not the core semantics:
/// the staleness and ordering rules hold for any latency values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Simulated latency of the updates-feed fetch
    pub updates_latency: Duration,
    /// Simulated latency of the alerts fetch
    pub alerts_latency: Duration,
    /// Simulated latency of a profile save round-trip
    pub save_latency: Duration,
    /// Simulated thinking time of the scripted assistant
    pub assistant_latency: Duration,
    /// How long a toast stays visible unless superseded
    pub toast_duration: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            updates_latency: Duration::from_millis(env_parse("DASH_UPDATES_LATENCY_MS", 500)?),
            alerts_latency: Duration::from_millis(env_parse("DASH_ALERTS_LATENCY_MS", 300)?),
            save_latency: Duration::from_millis(env_parse("DASH_SAVE_LATENCY_MS", 300)?),
            assistant_latency: Duration::from_millis(env_parse("DASH_ASSISTANT_LATENCY_MS", 400)?),
            toast_duration: Duration::from_millis(env_parse("DASH_TOAST_DURATION_MS", 1800)?),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            updates_latency: Duration::from_millis(500),
            alerts_latency: Duration::from_millis(300),
            save_latency: Duration::from_millis(300),
            assistant_latency: Duration::from_millis(400),
            toast_duration: Duration::from_millis(1800),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_env_fallbacks() {
        // No DASH_* vars set in the test environment
        let from_env = Config::from_env().unwrap();
        let defaults = Config::default();
        assert_eq!(from_env.updates_latency, defaults.updates_latency);
        assert_eq!(from_env.toast_duration, defaults.toast_duration);
    }
}
