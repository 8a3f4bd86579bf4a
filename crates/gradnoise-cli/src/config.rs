use gradnoise::{Engine, NoiseError, NoiseOptions, OctaveSpec, RepeatPeriod, SampleRequest};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct SamplerConfig {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub noise: NoiseSection,
    pub sample: SampleSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct EngineSection {
    /// Permutation seed. Absent = the fixed reference permutation.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct NoiseSection {
    /// Uniform repeat period, 0 = off. Ignored when `repeat_axes` is set.
    #[serde(default)]
    pub repeat: i64,
    #[serde(default)]
    pub repeat_axes: Option<[i64; 3]>,
    #[serde(default = "default_octaves")]
    pub octaves: i64,
    #[serde(default = "default_persistence")]
    pub persistence: f64,
}

fn default_octaves() -> i64 {
    1
}

fn default_persistence() -> f64 {
    1.0
}

impl Default for NoiseSection {
    fn default() -> Self {
        Self {
            repeat: 0,
            repeat_axes: None,
            octaves: default_octaves(),
            persistence: default_persistence(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SampleSection {
    pub start: [f64; 3],
    #[serde(default)]
    pub delta: [f64; 3],
    pub count: i64,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_chunk_len")]
    pub chunk_len: usize,
}

fn default_chunk_len() -> usize {
    4096
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Lines,
    Json,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl SamplerConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn engine(&self) -> Engine {
        match self.engine.seed {
            Some(seed) => Engine::new(seed),
            None => Engine::reference(),
        }
    }

    pub fn options(&self) -> Result<NoiseOptions, NoiseError> {
        let repeat = match self.noise.repeat_axes {
            Some(axes) => RepeatPeriod::per_axis(axes)?,
            None => RepeatPeriod::uniform(self.noise.repeat)?,
        };
        let octaves = OctaveSpec::new(self.noise.octaves, self.noise.persistence)?;
        Ok(NoiseOptions::new(repeat, octaves))
    }

    pub fn request(&self) -> Result<SampleRequest, NoiseError> {
        SampleRequest::new(
            self.sample.start,
            self.sample.delta,
            self.sample.count,
            self.options()?,
        )
    }
}
