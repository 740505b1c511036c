use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::errors::{ConfigError, TranslationError};
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::deepl::DeepL;
use crate::translation::{CollectionStats, EntryCache, TranslationReport, TranslationService};

// @module: Application controller for document translation

/// Yes/no decision before any request is sent
pub trait Confirm {
    /// Return `true` to go ahead with the submission
    fn confirm(&self, stats: &CollectionStats) -> Result<bool>;
}

/// Asks on the terminal
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, stats: &CollectionStats) -> Result<bool> {
        let mut stderr = std::io::stderr();
        write!(
            stderr,
            "Translate {} entries ({} characters) in {} requests? [y/N] ",
            stats.entries, stats.characters, stats.batches
        )?;
        stderr.flush()?;

        let mut answer = String::new();
        std::io::stdin().lock().read_line(&mut answer)
            .context("Failed to read confirmation")?;

        Ok(is_yes(&answer))
    }
}

/// Fixed answer, for non-interactive use and tests
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&self, _stats: &CollectionStats) -> Result<bool> {
        Ok(self.0)
    }
}

// @checks: Affirmative answer
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The translated document was written
    Written {
        /// Path of the written file
        output: PathBuf,
        /// Figures of the run
        report: TranslationReport,
    },
    /// The user declined the confirmation; nothing was written
    Aborted,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Translation provider
    provider: Arc<dyn Provider>,
}

impl Controller {
    // @method: Create a new controller with the DeepL provider built from the configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let config = config.validated().context("Configuration validation failed")?;

        let provider = DeepL::new(config.api_key.clone(), config.get_endpoint(), config.timeout_secs)?;
        Ok(Self {
            config,
            provider: Arc::new(provider),
        })
    }

    /// Create a controller with an explicit provider
    pub fn with_provider(config: Config, provider: Arc<dyn Provider>) -> Result<Self> {
        let config = config.validated().context("Configuration validation failed")?;
        Ok(Self { config, provider })
    }

    /// Resolve the input path, falling back to the first JSON file in `dir`
    pub fn resolve_input(input: Option<PathBuf>, dir: &Path) -> Result<PathBuf, ConfigError> {
        match input {
            Some(path) if FileManager::file_exists(&path) => Ok(path),
            Some(path) => Err(ConfigError::MissingInput(path.display().to_string())),
            None => FileManager::find_default_input(dir)
                .ok_or_else(|| ConfigError::MissingInput(dir.display().to_string())),
        }
    }

    /// Run the main workflow on one document
    ///
    /// Nothing is written unless every entry was translated and restored.
    pub async fn run(&self, input: Option<PathBuf>, output: Option<PathBuf>, confirm: &dyn Confirm) -> Result<RunOutcome> {
        let start_time = Instant::now();

        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let input_file = Self::resolve_input(input, &cwd)?;
        let output_file = output.unwrap_or_else(|| {
            FileManager::generate_output_path(&input_file, &self.config.target_language)
        });
        debug!("Input: {:?}, output: {:?}", input_file, output_file);

        let document = FileManager::read_json(&input_file)?;

        let service = TranslationService::from_config(self.provider.clone(), &self.config)?;
        info!("{}: {}", service.provider_name(), language_utils::describe_pair(
            self.config.source_language.as_deref(),
            &self.config.target_language,
        ));

        let mut cache = service.collect(&document);
        let stats = service.stats(&cache);
        info!("Found {} distinct entries ({} characters, {} requests)",
              stats.entries, stats.characters, stats.batches);

        self.check_usage(&service, &cache).await?;

        if self.config.confirm && !confirm.confirm(&stats)? {
            info!("Aborted, nothing was written");
            return Ok(RunOutcome::Aborted);
        }

        let (translated, report) = self.translate_with_progress(&service, &document, &mut cache).await?;

        FileManager::write_json(&output_file, &translated)?;

        info!("Translation completed in {}: {:?}",
              Self::format_duration(start_time.elapsed()), output_file);

        Ok(RunOutcome::Written { output: output_file, report })
    }

    /// Check the provider usage before submitting
    ///
    /// With a configured usage limit the check is mandatory; without one an
    /// unreachable usage endpoint only produces a warning.
    async fn check_usage(&self, service: &TranslationService, cache: &EntryCache) -> Result<()> {
        match service.check_usage(cache, self.config.usage_limit).await {
            Ok(usage) => {
                if let Some(character) = usage.character {
                    debug!("Provider usage: {} of {} characters", character.count, character.limit);
                }
                Ok(())
            }
            Err(TranslationError::Provider(e)) if self.config.usage_limit.is_none() => {
                warn!("Could not query provider usage: {}", e);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Submit all batches with a progress bar, then rebuild the document
    async fn translate_with_progress(
        &self,
        service: &TranslationService,
        document: &serde_json::Value,
        cache: &mut EntryCache,
    ) -> Result<(serde_json::Value, TranslationReport)> {
        let stats = service.stats(cache);
        let progress_bar = ProgressBar::new(stats.batches as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let summary = service.submit(cache, |current, _total| {
            progress_bar.set_position(current as u64);
        }).await;

        let summary = match summary {
            Ok(summary) => {
                progress_bar.finish_and_clear();
                summary
            }
            Err(e) => {
                progress_bar.abandon_with_message("Failed");
                return Err(e).context("Translation failed, no output written");
            }
        };

        let translated = service.reconstruct(document, cache)
            .context("Failed to rebuild the translated document")?;

        Ok((translated, TranslationReport {
            entries: stats.entries,
            characters: stats.characters,
            batches: summary.batches,
            detected_languages: summary.detected_languages,
        }))
    }

    // @formats: Duration for display
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
