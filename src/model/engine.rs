//! Quantized GGUF inference engine (candle).

use std::fs::File;

use candle_core::quantized::gguf_file;
use candle_core::{Device, Tensor};
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::quantized_llama::ModelWeights;
use parking_lot::Mutex;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use super::GenerationParams;
use super::config::ModelConfig;
use super::error::EngineError;

/// End-of-sequence markers across the supported model families.
const EOS_TOKENS: [&str; 4] = ["</s>", "<|endoftext|>", "<|im_end|>", "<|eot_id|>"];

/// A loaded quantized llama-family model plus its tokenizer.
///
/// The model holds a KV cache, so `forward` needs `&mut`; the mutex gives
/// shared callers interior mutability the same way the rest of the crate
/// treats engine state.
pub(super) struct QuantizedEngine {
    model: Mutex<ModelWeights>,
    tokenizer: Tokenizer,
    device: Device,
    eos_tokens: Vec<u32>,
    max_seq_len: usize,
    seed: u64,
}

impl QuantizedEngine {
    pub(super) fn load(config: &ModelConfig, device: Device) -> Result<Self, EngineError> {
        let model_file = config.resolve_model_file();
        if !model_file.exists() {
            return Err(EngineError::ModelNotFound { path: model_file });
        }

        let tokenizer = Tokenizer::from_file(&config.tokenizer_path).map_err(|e| {
            EngineError::TokenizationFailed {
                reason: format!("failed to load tokenizer: {e}"),
            }
        })?;

        let mut file = File::open(&model_file)?;
        let content = gguf_file::Content::read(&mut file).map_err(|e| load_error(&e))?;
        let tensor_count = content.tensor_infos.len();

        let model =
            ModelWeights::from_gguf(content, &mut file, &device).map_err(|e| load_error(&e))?;

        let eos_tokens: Vec<u32> = EOS_TOKENS
            .iter()
            .filter_map(|token| tokenizer.token_to_id(token))
            .collect();

        info!(
            model = %model_file.display(),
            quantization = %config.quantization,
            tensors = tensor_count,
            max_seq_len = config.max_seq_len,
            "Model loaded"
        );

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            device,
            eos_tokens,
            max_seq_len: config.max_seq_len,
            seed: config.seed,
        })
    }

    /// Runs the autoregressive sampling loop for one prompt.
    pub(super) fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, EngineError> {
        let encoding =
            self.tokenizer
                .encode(prompt, true)
                .map_err(|e| EngineError::TokenizationFailed {
                    reason: e.to_string(),
                })?;
        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();

        // Keep the tail when the prompt overflows the context budget: the
        // template's closing cue must survive or generation starts mid-input.
        let budget = self
            .max_seq_len
            .saturating_sub(params.max_new_tokens)
            .max(1);
        if tokens.len() > budget {
            debug!(
                prompt_tokens = tokens.len(),
                budget, "Truncating prompt to fit context window"
            );
            tokens.drain(..tokens.len() - budget);
        }

        let sampling = if params.temperature <= 0.0 {
            Sampling::ArgMax
        } else {
            Sampling::TopKThenTopP {
                k: params.top_k,
                p: params.top_p,
                temperature: params.temperature,
            }
        };
        let mut logits_processor = LogitsProcessor::from_sampling(self.seed, sampling);

        let mut model = self.model.lock();
        let prompt_len = tokens.len();

        let input = Tensor::new(tokens.as_slice(), &self.device)?.unsqueeze(0)?;
        let logits = model.forward(&input, 0)?.squeeze(0)?;
        let mut next_token = logits_processor.sample(&logits)?;

        let mut generated: Vec<u32> = Vec::with_capacity(params.max_new_tokens);
        for step in 0..params.max_new_tokens {
            if self.eos_tokens.contains(&next_token) {
                break;
            }
            generated.push(next_token);
            if step + 1 == params.max_new_tokens {
                break;
            }

            let input = Tensor::new(&[next_token], &self.device)?.unsqueeze(0)?;
            let logits = model.forward(&input, prompt_len + step)?.squeeze(0)?;
            next_token = logits_processor.sample(&logits)?;
        }

        debug!(
            prompt_tokens = prompt_len,
            generated_tokens = generated.len(),
            "Generation finished"
        );

        let text = self
            .tokenizer
            .decode(&generated, true)
            .map_err(|e| EngineError::TokenizationFailed {
                reason: e.to_string(),
            })?;
        Ok(text.trim().to_string())
    }
}

fn load_error(err: &candle_core::Error) -> EngineError {
    let reason = err.to_string();
    if reason.to_lowercase().contains("out of memory") {
        EngineError::OutOfMemory { reason }
    } else {
        EngineError::LoadFailed { reason }
    }
}
