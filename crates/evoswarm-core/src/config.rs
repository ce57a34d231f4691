//! Configuration loading and typed config structures for the EvoSwarm engine.
//!
//! The canonical configuration lives in `evoswarm-config.yaml`. Every field
//! has a default matching the tuning observed in the dashboard, so an empty
//! file (or no file at all) yields a working engine. The tuning constants
//! (probabilities, gain ranges, periods) have no deeper rationale; they are
//! exposed here so they can be changed without touching code.

use std::path::{Path, PathBuf};

use evoswarm_types::SeriesKind;
use rand::Rng;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "EVOSWARM_PORT";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its valid domain.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `evoswarm-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Series ticker settings.
    #[serde(default)]
    pub series: SeriesConfig,

    /// Breeding emitter settings.
    #[serde(default)]
    pub breeding: BreedingConfig,

    /// Evolution simulator settings.
    #[serde(default)]
    pub evolution: EvolutionConfig,

    /// Audit log settings.
    #[serde(default)]
    pub audit: AuditConfig,

    /// Initial values of the network counters.
    #[serde(default)]
    pub counters: CountersConfig,

    /// Initial agent pool settings.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Report export settings.
    #[serde(default)]
    pub report: ReportConfig,

    /// Observer HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// `EVOSWARM_PORT` overrides `server.port` when set to a valid port.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reports an empty document as null rather than an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check every value against its valid domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.series.validate()?;
        self.breeding.validate()?;
        self.evolution.validate()?;
        self.seed.validate()?;
        if self.audit.capacity == 0 {
            return Err(invalid("audit.capacity must be at least 1"));
        }
        if self.counters.efficiency_gain_pct > self.evolution.efficiency_ceiling_pct {
            return Err(invalid(
                "counters.efficiency_gain_pct must not exceed evolution.efficiency_ceiling_pct",
            ));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ConfigError {
    ConfigError::Invalid {
        reason: reason.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// Shared range type
// ---------------------------------------------------------------------------

/// Inclusive integer range used for every random gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct GainRange {
    /// Smallest value that can be drawn.
    pub min: u32,
    /// Largest value that can be drawn.
    pub max: u32,
}

impl GainRange {
    /// Create a range from its bounds.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw a value uniformly from `min..=max`.
    ///
    /// An inverted range (rejected by validation) yields `min`.
    pub fn sample(self, rng: &mut impl Rng) -> u32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    /// Whether `value` lies within the range.
    pub const fn contains(self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(self, field: &str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::Invalid {
                reason: format!("{field}: min ({}) exceeds max ({})", self.min, self.max),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Series ticker configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeriesConfig {
    /// Milliseconds between ticks.
    #[serde(default = "default_series_interval_ms")]
    pub tick_interval_ms: u64,

    /// Sparkline viewport width used for projected points.
    #[serde(default = "default_sparkline_width")]
    pub sparkline_width: f64,

    /// Sparkline viewport height used for projected points.
    #[serde(default = "default_sparkline_height")]
    pub sparkline_height: f64,

    /// Tracked series. Each window length is the length of its initial samples.
    #[serde(default = "default_tracks")]
    pub tracks: Vec<TrackConfig>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_series_interval_ms(),
            sparkline_width: default_sparkline_width(),
            sparkline_height: default_sparkline_height(),
            tracks: default_tracks(),
        }
    }
}

impl SeriesConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("series.tick_interval_ms must be at least 1"));
        }
        if !(self.sparkline_width.is_finite() && self.sparkline_width > 0.0)
            || !(self.sparkline_height.is_finite() && self.sparkline_height > 0.0)
        {
            return Err(invalid("series sparkline viewport must be positive and finite"));
        }
        if self.tracks.is_empty() {
            return Err(invalid("series.tracks must list at least one series"));
        }
        for (i, track) in self.tracks.iter().enumerate() {
            crate::series::check_track(track.delta, &track.initial).map_err(|e| {
                ConfigError::Invalid {
                    reason: format!("series {:?}: {e}", track.kind),
                }
            })?;
            if self.tracks.iter().skip(i.saturating_add(1)).any(|t| t.kind == track.kind) {
                return Err(ConfigError::Invalid {
                    reason: format!("series {:?} is configured twice", track.kind),
                });
            }
        }
        Ok(())
    }
}

/// A single tracked series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackConfig {
    /// Which metric this series tracks.
    pub kind: SeriesKind,
    /// Maximum absolute change per tick.
    pub delta: f64,
    /// Initial samples, oldest first. Must hold at least two samples.
    pub initial: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Breeding
// ---------------------------------------------------------------------------

/// Breeding emitter configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BreedingConfig {
    /// Milliseconds between emitter ticks.
    #[serde(default = "default_breeding_interval_ms")]
    pub tick_interval_ms: u64,

    /// Probability that a tick attempts a breeding draw.
    #[serde(default = "default_breeding_probability")]
    pub probability: f64,

    /// Range of the resilience gain attached to an offspring.
    #[serde(default = "default_breeding_gain")]
    pub resilience_gain: GainRange,

    /// Range of the speed gain attached to an offspring.
    #[serde(default = "default_breeding_gain")]
    pub speed_gain: GainRange,

    /// Number of breeding events retained.
    #[serde(default = "default_breeding_history")]
    pub history_capacity: usize,
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_breeding_interval_ms(),
            probability: default_breeding_probability(),
            resilience_gain: default_breeding_gain(),
            speed_gain: default_breeding_gain(),
            history_capacity: default_breeding_history(),
        }
    }
}

impl BreedingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("breeding.tick_interval_ms must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(invalid("breeding.probability must be within [0, 1]"));
        }
        if self.history_capacity == 0 {
            return Err(invalid("breeding.history_capacity must be at least 1"));
        }
        self.resilience_gain.validate("breeding.resilience_gain")?;
        self.speed_gain.validate("breeding.speed_gain")
    }
}

// ---------------------------------------------------------------------------
// Evolution
// ---------------------------------------------------------------------------

/// Evolution simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EvolutionConfig {
    /// Simulated work delay between trigger and completion.
    #[serde(default = "default_evolution_delay_ms")]
    pub delay_ms: u64,

    /// Per-agent resilience increase.
    #[serde(default = "default_capability_gain")]
    pub resilience_gain: GainRange,

    /// Per-agent speed increase.
    #[serde(default = "default_capability_gain")]
    pub speed_gain: GainRange,

    /// Per-agent fitness increase.
    #[serde(default = "default_fitness_gain")]
    pub fitness_gain: GainRange,

    /// Increase of the cumulative network savings, in USD.
    #[serde(default = "default_savings_gain")]
    pub savings_gain: GainRange,

    /// Increase of the active agent counter.
    #[serde(default = "default_active_agents_gain")]
    pub active_agents_gain: GainRange,

    /// Increase of the efficiency gain, in hundredths of a percent.
    #[serde(default = "default_efficiency_gain_hundredths")]
    pub efficiency_gain_hundredths: GainRange,

    /// Ceiling for the efficiency gain percentage.
    #[serde(default = "default_efficiency_ceiling")]
    pub efficiency_ceiling_pct: Decimal,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_evolution_delay_ms(),
            resilience_gain: default_capability_gain(),
            speed_gain: default_capability_gain(),
            fitness_gain: default_fitness_gain(),
            savings_gain: default_savings_gain(),
            active_agents_gain: default_active_agents_gain(),
            efficiency_gain_hundredths: default_efficiency_gain_hundredths(),
            efficiency_ceiling_pct: default_efficiency_ceiling(),
        }
    }
}

impl EvolutionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.resilience_gain.validate("evolution.resilience_gain")?;
        self.speed_gain.validate("evolution.speed_gain")?;
        self.fitness_gain.validate("evolution.fitness_gain")?;
        self.savings_gain.validate("evolution.savings_gain")?;
        self.active_agents_gain.validate("evolution.active_agents_gain")?;
        self.efficiency_gain_hundredths
            .validate("evolution.efficiency_gain_hundredths")?;
        if self.efficiency_ceiling_pct.is_sign_negative() {
            return Err(invalid("evolution.efficiency_ceiling_pct must not be negative"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Audit, counters, seed
// ---------------------------------------------------------------------------

/// Audit log configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuditConfig {
    /// Number of audit entries retained.
    #[serde(default = "default_audit_capacity")]
    pub capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            capacity: default_audit_capacity(),
        }
    }
}

/// Initial values of the aggregate network counters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountersConfig {
    /// Starting cumulative savings, in USD.
    #[serde(default = "default_network_savings")]
    pub network_savings_usd: u64,

    /// Starting active agent count.
    #[serde(default = "default_active_agents")]
    pub active_agents: u64,

    /// Starting efficiency gain, in percent.
    #[serde(default = "default_efficiency_gain")]
    pub efficiency_gain_pct: Decimal,
}

impl Default for CountersConfig {
    fn default() -> Self {
        Self {
            network_savings_usd: default_network_savings(),
            active_agents: default_active_agents(),
            efficiency_gain_pct: default_efficiency_gain(),
        }
    }
}

/// Initial agent pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    /// Number of agents created at startup.
    #[serde(default = "default_initial_agents")]
    pub initial_agents: usize,

    /// Fixed random seed for reproducible demos (random when absent).
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Range of the starting generation.
    #[serde(default = "default_seed_generation")]
    pub generation: GainRange,

    /// Range of the starting resilience score.
    #[serde(default = "default_seed_capability")]
    pub resilience: GainRange,

    /// Range of the starting speed score.
    #[serde(default = "default_seed_capability")]
    pub speed: GainRange,

    /// Range of the starting fitness score.
    #[serde(default = "default_seed_fitness")]
    pub fitness: GainRange,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            initial_agents: default_initial_agents(),
            rng_seed: None,
            generation: default_seed_generation(),
            resilience: default_seed_capability(),
            speed: default_seed_capability(),
            fitness: default_seed_fitness(),
        }
    }
}

impl SeedConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate("seed.generation")?;
        self.resilience.validate("seed.resilience")?;
        self.speed.validate("seed.speed")?;
        self.fitness.validate("seed.fitness")?;
        if self.generation.min == 0 {
            return Err(invalid("seed.generation must start at 1"));
        }
        let max_score = evoswarm_types::MAX_SCORE;
        if self.resilience.max > max_score
            || self.speed.max > max_score
            || self.fitness.max > max_score
        {
            return Err(ConfigError::Invalid {
                reason: format!("seed scores must not exceed {max_score}"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Report, server, logging
// ---------------------------------------------------------------------------

/// Report export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportConfig {
    /// Baseline added to the audit log length for the verified transaction count.
    #[serde(default = "default_verified_tx_baseline")]
    pub verified_tx_baseline: u64,

    /// Optional template file replacing the built-in report template.
    #[serde(default)]
    pub template_path: Option<PathBuf>,

    /// Optional file the engine writes the final report to on shutdown.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verified_tx_baseline: default_verified_tx_baseline(),
            template_path: None,
            output_path: None,
        }
    }
}

/// Observer HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Whether the observer API is started.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    /// Apply `EVOSWARM_PORT` if it is set and parses as a port.
    pub fn apply_env_overrides(&mut self) {
        if let Some(port) = std::env::var(PORT_ENV)
            .ok()
            .and_then(|raw| raw.trim().parse::<u16>().ok())
        {
            self.port = port;
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_series_interval_ms() -> u64 {
    2000
}

const fn default_sparkline_width() -> f64 {
    100.0
}

const fn default_sparkline_height() -> f64 {
    30.0
}

fn default_tracks() -> Vec<TrackConfig> {
    vec![
        TrackConfig {
            kind: SeriesKind::Ars,
            delta: 2.0,
            initial: vec![100.0, 95.0, 102.0, 98.0, 110.0, 105.0, 115.0, 108.0, 120.0, 118.0],
        },
        TrackConfig {
            kind: SeriesKind::Clp,
            delta: 1.0,
            initial: vec![50.0, 52.0, 48.0, 55.0, 53.0, 58.0, 56.0, 60.0, 57.0, 62.0],
        },
        TrackConfig {
            kind: SeriesKind::Mxn,
            delta: 0.2,
            initial: vec![17.0, 17.2, 16.8, 17.5, 17.3, 17.8, 17.4, 18.0, 17.6, 17.9],
        },
        TrackConfig {
            kind: SeriesKind::Efficiency,
            delta: 0.1,
            initial: vec![12.0, 13.0, 15.0, 14.0, 16.0, 17.0, 18.0, 17.0, 18.5, 18.5],
        },
    ]
}

const fn default_breeding_interval_ms() -> u64 {
    3000
}

const fn default_breeding_probability() -> f64 {
    0.4
}

const fn default_breeding_gain() -> GainRange {
    GainRange::new(1, 5)
}

const fn default_breeding_history() -> usize {
    5
}

const fn default_evolution_delay_ms() -> u64 {
    2000
}

const fn default_capability_gain() -> GainRange {
    GainRange::new(2, 9)
}

const fn default_fitness_gain() -> GainRange {
    GainRange::new(3, 5)
}

const fn default_savings_gain() -> GainRange {
    GainRange::new(1000, 5999)
}

const fn default_active_agents_gain() -> GainRange {
    GainRange::new(8, 39)
}

const fn default_efficiency_gain_hundredths() -> GainRange {
    GainRange::new(50, 249)
}

const fn default_efficiency_ceiling() -> Decimal {
    Decimal::from_parts(35, 0, 0, false, 0)
}

const fn default_audit_capacity() -> usize {
    10
}

const fn default_network_savings() -> u64 {
    847_523
}

const fn default_active_agents() -> u64 {
    1024
}

const fn default_efficiency_gain() -> Decimal {
    Decimal::from_parts(185, 0, 0, false, 1)
}

const fn default_initial_agents() -> usize {
    6
}

const fn default_seed_generation() -> GainRange {
    GainRange::new(1, 50)
}

const fn default_seed_capability() -> GainRange {
    GainRange::new(60, 99)
}

const fn default_seed_fitness() -> GainRange {
    GainRange::new(70, 99)
}

const fn default_verified_tx_baseline() -> u64 {
    1250
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.series.tracks.len(), 4);
        assert_eq!(config.breeding.history_capacity, 5);
        assert_eq!(config.audit.capacity, 10);
        assert_eq!(config.seed.initial_agents, 6);
        assert_eq!(config.evolution.efficiency_ceiling_pct, Decimal::from(35));
        assert_eq!(config.counters.efficiency_gain_pct, Decimal::new(185, 1));
    }

    #[test]
    fn every_default_track_has_ten_samples() {
        for track in &SeriesConfig::default().tracks {
            assert_eq!(track.initial.len(), 10, "{:?}", track.kind);
        }
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
series:
  tick_interval_ms: 500
  tracks:
    - kind: ars
      delta: 3.0
      initial: [1.0, 2.0, 3.0]
    - kind: efficiency
      delta: 0.5
      initial: [10.0, 11.0]

breeding:
  tick_interval_ms: 750
  probability: 1.0
  resilience_gain: { min: 2, max: 3 }
  history_capacity: 8

evolution:
  delay_ms: 100
  fitness_gain: { min: 1, max: 1 }
  efficiency_ceiling_pct: 40

audit:
  capacity: 4

counters:
  network_savings_usd: 10
  active_agents: 2
  efficiency_gain_pct: "20.5"

seed:
  initial_agents: 3
  rng_seed: 99

report:
  verified_tx_baseline: 0
  output_path: "/tmp/report.txt"

server:
  enabled: false
  port: 9090

logging:
  level: "debug"
  json: true
"#;

        let config = EngineConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.series.tick_interval_ms, 500);
        assert_eq!(config.series.tracks.len(), 2);
        assert!((config.breeding.probability - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.breeding.resilience_gain, GainRange::new(2, 3));
        assert_eq!(config.breeding.speed_gain, GainRange::new(1, 5));
        assert_eq!(config.breeding.history_capacity, 8);
        assert_eq!(config.evolution.delay_ms, 100);
        assert_eq!(config.evolution.efficiency_ceiling_pct, Decimal::from(40));
        assert_eq!(config.audit.capacity, 4);
        assert_eq!(config.counters.efficiency_gain_pct, Decimal::new(205, 1));
        assert_eq!(config.seed.rng_seed, Some(99));
        assert_eq!(config.report.verified_tx_baseline, 0);
        assert!(!config.server.enabled);
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = EngineConfig::parse("seed:\n  initial_agents: 2\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.seed.initial_agents, 2);
        assert_eq!(config.breeding.tick_interval_ms, 3000);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(EngineConfig::parse("").is_ok());
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let result = EngineConfig::parse("breeding:\n  probability: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_inverted_range() {
        let result = EngineConfig::parse("evolution:\n  fitness_gain: { min: 5, max: 3 }\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_duplicate_series() {
        let yaml = r"
series:
  tracks:
    - { kind: ars, delta: 1.0, initial: [1.0, 2.0] }
    - { kind: ars, delta: 1.0, initial: [1.0, 2.0] }
";
        assert!(matches!(
            EngineConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_delta_too_large_to_sample() {
        let yaml = r"
series:
  tracks:
    - { kind: ars, delta: 1.0e+308, initial: [1.0, 2.0] }
";
        assert!(matches!(
            EngineConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_zero_audit_capacity() {
        let result = EngineConfig::parse("audit:\n  capacity: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = EngineConfig::parse("series: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn gain_range_samples_within_bounds() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
        let range = GainRange::new(3, 5);
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }
        assert_eq!(GainRange::new(4, 4).sample(&mut rng), 4);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("evoswarm-config.yaml");
        if path.exists() {
            let config = EngineConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
