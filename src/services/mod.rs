pub mod ai;
pub mod analyzer;
pub mod availability;
pub mod extract;
pub mod intent;
pub mod participants;
pub mod proposal;
pub mod scheduler;

use crate::config::AppConfig;
use crate::errors::AppError;
use ai::gemini::GeminiProvider;
use ai::ollama::OllamaProvider;
use ai::openai::OpenAiProvider;
use ai::LlmProvider;
use analyzer::DelegatedAnalyzer;
use scheduler::MeetingScheduler;

/// Builds the scheduler for the configured `LLM_PROVIDER`. Unknown or
/// `none` providers leave only the heuristic analyzer.
pub fn build_scheduler(config: &AppConfig) -> Result<MeetingScheduler, AppError> {
    let llm: Box<dyn LlmProvider> = match config.llm_provider.as_str() {
        "gemini" => {
            if config.gemini_api_key.is_empty() {
                return Err(AppError::Config(
                    "GEMINI_API_KEY must be set when LLM_PROVIDER=gemini".to_string(),
                ));
            }
            tracing::info!("using Gemini analyzer (model: {})", config.gemini_model);
            Box::new(GeminiProvider::new(
                config.gemini_api_key.clone(),
                config.gemini_model.clone(),
            ))
        }
        "openai" => {
            if config.openai_api_key.is_empty() {
                return Err(AppError::Config(
                    "OPENAI_API_KEY must be set when LLM_PROVIDER=openai".to_string(),
                ));
            }
            tracing::info!("using OpenAI analyzer (model: {})", config.openai_model);
            Box::new(OpenAiProvider::new(
                config.openai_api_key.clone(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            ))
        }
        "ollama" => {
            tracing::info!("using Ollama analyzer (url: {})", config.ollama_url);
            Box::new(OllamaProvider::new(
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            ))
        }
        other => {
            if other != "none" {
                tracing::warn!(
                    provider = other,
                    "unknown LLM_PROVIDER, using heuristic analysis only"
                );
            } else {
                tracing::info!("no LLM provider configured, using heuristic analysis only");
            }
            return Ok(MeetingScheduler::heuristic());
        }
    };

    Ok(MeetingScheduler::with_delegate(Box::new(DelegatedAnalyzer::new(
        llm,
        config.analyzer_timeout,
    ))))
}
