use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bend::BendRange;
use crate::formula::CentRange;
use crate::report::DEFAULT_RANGES_CENTS;

/// Most decimal places the listing will print
pub const MAX_PRECISION: usize = 15;

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TablesConfig {
    /// Bend range in semitones used for printing and lookups
    #[serde(default = "default_bend_range")]
    pub bend_range: f64,

    /// Decimal places in the printed listing
    #[serde(default = "default_precision")]
    pub precision: usize,

    #[serde(default)]
    pub csv: CsvConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            bend_range: default_bend_range(),
            precision: default_precision(),
            csv: CsvConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl TablesConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: TablesConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        BendRange::from_semitones(self.bend_range).context("Invalid bend_range")?;

        if self.precision > MAX_PRECISION {
            return Err(anyhow!(
                "Precision must be between 0 and {} decimal places",
                MAX_PRECISION
            ));
        }

        self.csv.validate().context("Invalid csv configuration")?;
        self.monitor.validate().context("Invalid monitor configuration")?;

        Ok(())
    }

    /// The configured bend range as a validated value
    pub fn bend_range(&self) -> Result<BendRange> {
        Ok(BendRange::from_semitones(self.bend_range)?)
    }
}

/// Batch CSV export configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CsvConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_ranges_cents")]
    pub ranges_cents: Vec<i64>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            ranges_cents: default_ranges_cents(),
        }
    }
}

impl CsvConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ranges_cents.is_empty() {
            return Err(anyhow!("At least one range must be listed in ranges_cents"));
        }
        self.ranges()?;
        Ok(())
    }

    /// Configured ranges as validated cent ranges
    pub fn ranges(&self) -> Result<Vec<CentRange>> {
        self.ranges_cents
            .iter()
            .map(|&c| CentRange::new(c).with_context(|| format!("Invalid range {}", c)))
            .collect()
    }
}

/// Live MIDI monitor configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// MIDI input device, by index or name substring
    #[serde(default = "default_device")]
    pub device: String,

    #[serde(default = "default_midich")]
    pub midich: MidiChannelSpec,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            midich: default_midich(),
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        self.midich.validate()
    }

    /// Get the MIDI channel filter value (0-15 for specific channel, None for omni)
    pub fn midi_channel_filter(&self) -> Option<u8> {
        self.midich.filter()
    }
}

/// MIDI channel specification - either a specific channel (1-16) or omni
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MidiChannelSpec {
    Channel(u8),
    Omni(String), // "omni" or "all"
}

impl MidiChannelSpec {
    pub fn validate(&self) -> Result<()> {
        match self {
            MidiChannelSpec::Channel(ch) => {
                if *ch < 1 || *ch > 16 {
                    return Err(anyhow!("MIDI channel must be between 1 and 16"));
                }
            }
            MidiChannelSpec::Omni(name) => {
                let name = name.to_lowercase();
                if name != "omni" && name != "all" {
                    return Err(anyhow!("MIDI channel must be 1-16, \"omni\" or \"all\""));
                }
            }
        }
        Ok(())
    }

    /// 0-indexed channel to accept, or None for omni
    pub fn filter(&self) -> Option<u8> {
        match self {
            MidiChannelSpec::Channel(ch) => Some(ch.saturating_sub(1)), // Convert 1-16 to 0-15
            MidiChannelSpec::Omni(_) => None,
        }
    }
}

impl std::str::FromStr for MidiChannelSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let spec = match s.parse::<u8>() {
            Ok(ch) => MidiChannelSpec::Channel(ch),
            Err(_) => MidiChannelSpec::Omni(s.to_string()),
        };
        spec.validate()?;
        Ok(spec)
    }
}

// Default value functions for serde
fn default_bend_range() -> f64 {
    BendRange::DEFAULT_SEMITONES
}

fn default_precision() -> usize {
    6
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_ranges_cents() -> Vec<i64> {
    DEFAULT_RANGES_CENTS.to_vec()
}

fn default_device() -> String {
    "0".to_string()
}

fn default_midich() -> MidiChannelSpec {
    MidiChannelSpec::Omni("omni".to_string())
}
