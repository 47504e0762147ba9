//! Prompt construction for instruction-tuned summarization models.
//!
//! Four fixed template families are supported; each defines a system
//! preamble, an instruction wrapper, and a closing cue marking where
//! generation begins. Review order is always preserved in the rendered
//! prompt.


use std::str::FromStr;

use crate::config::ConfigError;

/// A fixed prompt template for a model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptTemplate {
    /// Mistral-instruct `[INST] ... [/INST]` format, Indonesian system prompt.
    Mistral,
    /// Llama-2-chat `<<SYS>>` format.
    Llama,
    /// Plain `User:`/`Assistant:` format.
    Generic,
    /// Alpaca-style `### Instruksi:` format, Indonesian system prompt.
    Indonesian,
}

impl PromptTemplate {
    /// All supported templates, in CLI display order.
    pub const ALL: [PromptTemplate; 4] = [
        Self::Mistral,
        Self::Llama,
        Self::Generic,
        Self::Indonesian,
    ];

    /// The template's system/instruction preamble.
    pub fn system(&self) -> &'static str {
        match self {
            Self::Mistral => {
                "Anda adalah asisten AI yang ahli dalam merangkum ulasan e-commerce dalam Bahasa Indonesia."
            }
            Self::Llama => {
                "You are a helpful assistant that specializes in summarizing Indonesian e-commerce reviews."
            }
            Self::Generic => "You are an AI assistant that summarizes Indonesian e-commerce reviews.",
            Self::Indonesian => {
                "Anda adalah asisten yang membantu merangkum ulasan produk e-commerce dalam Bahasa Indonesia."
            }
        }
    }

    /// Wraps `user_input` in the template's instruction format, ending with
    /// the cue after which the model is expected to generate.
    pub fn render(&self, user_input: &str) -> String {
        let system = self.system();
        match self {
            Self::Mistral => format!("[INST] {system}\n\n{user_input} [/INST]"),
            Self::Llama => {
                format!("<s>[INST] <<SYS>>\n{system}\n<</SYS>>\n\n{user_input} [/INST]")
            }
            Self::Generic => format!("{system}\n\nUser: {user_input}\nAssistant:"),
            Self::Indonesian => {
                format!("### Instruksi:\n{system}\n\n### Input:\n{user_input}\n\n### Respon:")
            }
        }
    }
}

impl FromStr for PromptTemplate {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mistral" => Ok(Self::Mistral),
            "llama" => Ok(Self::Llama),
            "generic" => Ok(Self::Generic),
            "indonesian" => Ok(Self::Indonesian),
            _ => Err(ConfigError::UnknownTemplate {
                name: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mistral => write!(f, "mistral"),
            Self::Llama => write!(f, "llama"),
            Self::Generic => write!(f, "generic"),
            Self::Indonesian => write!(f, "indonesian"),
        }
    }
}

/// Optional tweaks for [`create_summarization_prompt`].
#[derive(Debug, Clone, Default)]
pub struct PromptOptions {
    /// Replaces the default Indonesian summarization instruction.
    pub custom_instruction: Option<String>,
    /// Asks for a summary of at most this many words.
    pub max_length: Option<usize>,
}

/// Builds a summarization prompt for `reviews` using `template`.
///
/// A single review is rendered under an `Ulasan:` header; multiple reviews
/// become a numbered `Ulasan-ulasan:` list in their given order.
pub fn create_summarization_prompt(
    reviews: &[&str],
    template: PromptTemplate,
    options: &PromptOptions,
) -> String {
    let reviews_text = if reviews.len() == 1 {
        format!("Ulasan:\n{}", reviews[0])
    } else {
        let numbered: Vec<String> = reviews
            .iter()
            .enumerate()
            .map(|(i, review)| format!("{}. {review}", i + 1))
            .collect();
        format!("Ulasan-ulasan:\n{}", numbered.join("\n"))
    };

    let instruction = match &options.custom_instruction {
        Some(custom) => custom.clone(),
        None => {
            let mut instruction = String::from(
                "Buatlah ringkasan dari ulasan produk berikut dalam Bahasa Indonesia yang natural dan informatif.",
            );
            if let Some(max_length) = options.max_length {
                instruction.push_str(&format!(" Ringkasan maksimal {max_length} kata."));
            }
            instruction
        }
    };

    template.render(&format!("{instruction}\n\n{reviews_text}"))
}

/// Builds a prompt over several reviews, optionally steering the summary
/// toward specific aspects (e.g. `kualitas`, `pengiriman`).
pub fn create_multi_review_prompt(
    reviews: &[&str],
    template: PromptTemplate,
    focus_aspects: &[&str],
) -> String {
    let mut instruction =
        String::from("Buatlah ringkasan dari ulasan-ulasan produk berikut dalam Bahasa Indonesia.");
    if !focus_aspects.is_empty() {
        instruction.push_str(&format!(" Fokus pada aspek: {}.", focus_aspects.join(", ")));
    }

    template.render(&format!("{instruction}\n\n{}", labeled_reviews(reviews)))
}

/// Builds a prompt asking for a per-aspect summary of the reviews.
pub fn create_aspect_based_prompt(
    reviews: &[&str],
    aspects: &[&str],
    template: PromptTemplate,
) -> String {
    let instruction = format!(
        "Buatlah ringkasan dari ulasan-ulasan berikut untuk setiap aspek: {}",
        aspects.join(", ")
    );

    template.render(&format!("{instruction}\n\n{}", labeled_reviews(reviews)))
}

fn labeled_reviews(reviews: &[&str]) -> String {
    reviews
        .iter()
        .enumerate()
        .map(|(i, review)| format!("Ulasan {}: {review}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
