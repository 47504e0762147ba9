use std::path::PathBuf;

use crate::config::ConfigError;

use super::error::EngineError;

/// Default context window (prompt + generated tokens).
pub const DEFAULT_MAX_SEQ_LEN: usize = 4096;

/// Default sampling seed.
pub const DEFAULT_SEED: u64 = 299792458;

/// Weight precision requested at load time.
///
/// GGUF files bake quantization into the weights, so when `model_path` points
/// at a single file this is advisory (logged, not enforced). When it points at
/// a directory, the mode selects which variant file to load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quantization {
    /// Full/half precision weights.
    #[default]
    None,
    /// 4-bit quantized weights.
    FourBit,
    /// 8-bit quantized weights.
    EightBit,
}

impl Quantization {
    /// Resolves the mode from the CLI's mutually exclusive flags.
    pub fn from_flags(load_in_4bit: bool, load_in_8bit: bool) -> Result<Self, ConfigError> {
        match (load_in_4bit, load_in_8bit) {
            (true, true) => Err(ConfigError::ConflictingQuantization),
            (true, false) => Ok(Self::FourBit),
            (false, true) => Ok(Self::EightBit),
            (false, false) => Ok(Self::None),
        }
    }

    /// Conventional GGUF file name for this mode inside a model directory.
    pub fn gguf_filename(&self) -> &'static str {
        match self {
            Self::None => "model-f16.gguf",
            Self::FourBit => "model-q4_k_m.gguf",
            Self::EightBit => "model-q8_0.gguf",
        }
    }
}

impl std::fmt::Display for Quantization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::FourBit => write!(f, "4-bit"),
            Self::EightBit => write!(f, "8-bit"),
        }
    }
}

/// Configuration for [`Summarizer`](super::Summarizer).
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Path to the GGUF model file, or to a directory of variant files.
    pub model_path: PathBuf,
    /// Path to `tokenizer.json`.
    pub tokenizer_path: PathBuf,
    /// Requested weight precision.
    pub quantization: Quantization,
    /// Context window the engine enforces (prompt + new tokens).
    pub max_seq_len: usize,
    /// Sampling seed.
    pub seed: u64,
    /// If true, run a deterministic stub backend (no model files required).
    pub testing_stub: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::new(),
            tokenizer_path: PathBuf::new(),
            quantization: Quantization::None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            seed: DEFAULT_SEED,
            testing_stub: false,
        }
    }
}

impl ModelConfig {
    /// Env var used to locate the model file.
    pub const ENV_MODEL_PATH: &'static str = "RINGKAS_MODEL_PATH";
    /// Env var used to locate the tokenizer file.
    pub const ENV_TOKENIZER_PATH: &'static str = "RINGKAS_TOKENIZER_PATH";

    /// Creates a config for a model path, inferring `tokenizer.json` from its
    /// directory.
    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        let model_path = model_path.into();
        let tokenizer_path = tokenizer_dir(&model_path).join("tokenizer.json");

        Self {
            model_path,
            tokenizer_path,
            ..Default::default()
        }
    }

    /// Loads config from environment variables (missing values become empty
    /// paths, which [`ModelConfig::validate`] rejects outside stub mode).
    pub fn from_env() -> Self {
        let model_path = env_path(Self::ENV_MODEL_PATH).unwrap_or_default();
        let tokenizer_path = env_path(Self::ENV_TOKENIZER_PATH).unwrap_or_else(|| {
            if model_path.as_os_str().is_empty() {
                PathBuf::new()
            } else {
                tokenizer_dir(&model_path).join("tokenizer.json")
            }
        });

        Self {
            model_path,
            tokenizer_path,
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; deterministic output).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields for non-stub mode.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.testing_stub {
            return Ok(());
        }

        if self.model_path.as_os_str().is_empty() {
            return Err(EngineError::InvalidConfig {
                reason: "model_path is required".to_string(),
            });
        }
        if !self.model_path.exists() {
            return Err(EngineError::ModelNotFound {
                path: self.model_path.clone(),
            });
        }
        if !self.tokenizer_path.exists() {
            return Err(EngineError::ModelNotFound {
                path: self.tokenizer_path.clone(),
            });
        }
        if self.max_seq_len == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "max_seq_len must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// The GGUF file to load: `model_path` itself, or the quantization
    /// variant inside it when `model_path` is a directory.
    pub fn resolve_model_file(&self) -> PathBuf {
        if self.model_path.is_dir() {
            self.model_path.join(self.quantization.gguf_filename())
        } else {
            self.model_path.clone()
        }
    }
}

fn tokenizer_dir(model_path: &PathBuf) -> PathBuf {
    if model_path.is_dir() {
        model_path.clone()
    } else {
        model_path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_default()
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
