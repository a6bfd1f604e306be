use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset, uploads are persisted to an in-process store.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub simulation: SimulationConfig,
}

/// Timings and step sizes for the simulated upload and job submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Artificial wait after the file read, standing in for the network upload.
    pub upload_delay: Duration,
    /// Wait between a successful upload and the parsed flag flipping.
    pub parse_delay: Duration,
    pub progress_tick: Duration,
    pub progress_step: u8,
    /// Progress never passes this value until the upload completes.
    pub progress_cap: u8,
    pub job_submit_delay: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            upload_delay: Duration::from_millis(2000),
            parse_delay: Duration::from_millis(1000),
            progress_tick: Duration::from_millis(100),
            progress_step: 5,
            progress_cap: 95,
            job_submit_delay: Duration::from_millis(1500),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = SimulationConfig::default();
        let simulation = SimulationConfig {
            upload_delay: env_millis("UPLOAD_DELAY_MS", defaults.upload_delay)?,
            parse_delay: env_millis("PARSE_DELAY_MS", defaults.parse_delay)?,
            progress_tick: env_millis("PROGRESS_TICK_MS", defaults.progress_tick)?,
            progress_step: env_parse("PROGRESS_STEP", defaults.progress_step)?,
            progress_cap: env_parse("PROGRESS_CAP", defaults.progress_cap)?,
            job_submit_delay: env_millis("JOB_SUBMIT_DELAY_MS", defaults.job_submit_delay)?,
        };
        anyhow::ensure!(
            simulation.progress_step > 0,
            "PROGRESS_STEP must be greater than zero"
        );
        anyhow::ensure!(
            simulation.progress_cap < 100,
            "PROGRESS_CAP must be below 100"
        );

        Ok(Config {
            redis_url: std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty()),
            port: env_parse("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            simulation,
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn env_millis(key: &str, default: Duration) -> Result<Duration> {
    let millis = env_parse(key, default.as_millis() as u64)?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_simulation_timings() {
        let sim = SimulationConfig::default();
        assert_eq!(sim.upload_delay, Duration::from_secs(2));
        assert_eq!(sim.parse_delay, Duration::from_secs(1));
        assert_eq!(sim.progress_tick, Duration::from_millis(100));
        assert_eq!(sim.progress_step, 5);
        assert_eq!(sim.progress_cap, 95);
        assert_eq!(sim.job_submit_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_env_parse_falls_back_when_unset() {
        let value: u16 = env_parse("RECRUIT_API_TEST_UNSET_VARIABLE", 4242).unwrap();
        assert_eq!(value, 4242);
    }

    #[test]
    fn test_env_parse_rejects_garbage() {
        std::env::set_var("RECRUIT_API_TEST_BAD_NUMBER", "soon");
        let err = env_parse::<u64>("RECRUIT_API_TEST_BAD_NUMBER", 1).unwrap_err();
        assert!(err.to_string().contains("RECRUIT_API_TEST_BAD_NUMBER"));
    }

    #[test]
    fn test_env_millis_reads_value() {
        std::env::set_var("RECRUIT_API_TEST_DELAY_MS", "250");
        let d = env_millis("RECRUIT_API_TEST_DELAY_MS", Duration::from_secs(9)).unwrap();
        assert_eq!(d, Duration::from_millis(250));
    }
}
