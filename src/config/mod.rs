pub mod constants;

use crate::error::{PipelineError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Size/aspect-ratio heuristic for icon- and button-like components.
#[derive(Debug, Clone, Copy)]
pub struct IconFilterConfig {
    /// Minimum width and height in pixels.
    pub min_size: u32,
    /// Maximum width and height in pixels.
    pub max_size: u32,
    /// Maximum `max(w,h)/min(w,h)` ratio.
    pub max_aspect_ratio: f64,
}

impl Default for IconFilterConfig {
    fn default() -> Self {
        Self {
            min_size: constants::DEFAULT_ICON_MIN_SIZE,
            max_size: constants::DEFAULT_ICON_MAX_SIZE,
            max_aspect_ratio: constants::DEFAULT_MAX_ASPECT_RATIO,
        }
    }
}

/// External command line for a collaborator process, split into program
/// and arguments. `{image}` in an argument is replaced with the frame path.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Parse a whitespace-separated command line.
    ///
    /// No shell quoting is honored; arguments with spaces are not
    /// expressible. Wrap such commands in a script instead.
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| PipelineError::InvalidConfig("empty command line".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

/// Full pipeline configuration, loaded from environment variables with
/// hand-tuned defaults from [`constants`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Component/text overlap ratio at or above which a component is dropped.
    pub overlap_threshold: f64,
    pub icon_filter: IconFilterConfig,
    /// Directory for annotated images and detection reports.
    pub output_dir: PathBuf,
    /// Key that triggers a capture-and-analyze pass in watch mode.
    pub capture_hotkey: String,
    /// Key that stops the watch-mode listener.
    pub exit_hotkey: String,
    /// Keyboard poll interval for the hotkey listener.
    pub poll_interval: Duration,
    /// External component detector command (watch mode).
    pub detector_cmd: Option<CommandSpec>,
    /// External OCR command (watch mode).
    pub ocr_cmd: Option<CommandSpec>,
    /// External classifier command; components stay unlabeled without one.
    pub classifier_cmd: Option<CommandSpec>,
    /// TTF/OTF font for annotation labels; boxes only when unset.
    pub label_font: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: constants::DEFAULT_OVERLAP_THRESHOLD,
            icon_filter: IconFilterConfig::default(),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            capture_hotkey: constants::DEFAULT_CAPTURE_HOTKEY.to_string(),
            exit_hotkey: constants::DEFAULT_EXIT_HOTKEY.to_string(),
            poll_interval: Duration::from_millis(constants::DEFAULT_POLL_INTERVAL_MS),
            detector_cmd: None,
            ocr_cmd: None,
            classifier_cmd: None,
            label_font: None,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable numeric values fall back to the defaults rather than
    /// aborting startup; range violations are reported as errors.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        config.overlap_threshold = env::var("OVERLAP_THRESHOLD")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(constants::DEFAULT_OVERLAP_THRESHOLD);

        config.icon_filter.min_size = env::var("ICON_MIN_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(constants::DEFAULT_ICON_MIN_SIZE);

        config.icon_filter.max_size = env::var("ICON_MAX_SIZE")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(constants::DEFAULT_ICON_MAX_SIZE);

        config.icon_filter.max_aspect_ratio = env::var("MAX_ASPECT_RATIO")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(constants::DEFAULT_MAX_ASPECT_RATIO);

        if let Ok(dir) = env::var("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Ok(key) = env::var("CAPTURE_HOTKEY") {
            config.capture_hotkey = key;
        }
        if let Ok(key) = env::var("EXIT_HOTKEY") {
            config.exit_hotkey = key;
        }

        let poll_ms = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(constants::DEFAULT_POLL_INTERVAL_MS);
        config.poll_interval = Duration::from_millis(poll_ms);

        if let Ok(cmd) = env::var("DETECTOR_CMD") {
            config.detector_cmd = Some(CommandSpec::parse(&cmd)?);
        }
        if let Ok(cmd) = env::var("OCR_CMD") {
            config.ocr_cmd = Some(CommandSpec::parse(&cmd)?);
        }
        if let Ok(cmd) = env::var("CLASSIFIER_CMD") {
            config.classifier_cmd = Some(CommandSpec::parse(&cmd)?);
        }

        if let Ok(font) = env::var("LABEL_FONT") {
            config.label_font = Some(PathBuf::from(font));
        }

        config.validate()?;
        Ok(config)
    }

    /// Range checks for the tunable filter parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.overlap_threshold > 0.0 && self.overlap_threshold <= 1.0) {
            return Err(PipelineError::InvalidConfig(format!(
                "overlap threshold {} must be in (0.0, 1.0]",
                self.overlap_threshold
            )));
        }
        if self.icon_filter.min_size > self.icon_filter.max_size {
            return Err(PipelineError::InvalidConfig(format!(
                "icon min size {} exceeds max size {}",
                self.icon_filter.min_size, self.icon_filter.max_size
            )));
        }
        if self.icon_filter.max_aspect_ratio < 1.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "max aspect ratio {} must be at least 1.0",
                self.icon_filter.max_aspect_ratio
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.overlap_threshold,
            constants::DEFAULT_OVERLAP_THRESHOLD
        );
    }

    #[test]
    fn test_validate_rejects_threshold_out_of_range() {
        let mut config = PipelineConfig::default();
        config.overlap_threshold = 0.0;
        assert!(config.validate().is_err());

        config.overlap_threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_size_bounds() {
        let mut config = PipelineConfig::default();
        config.icon_filter.min_size = 100;
        config.icon_filter.max_size = 50;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_sub_unit_aspect_ratio() {
        let mut config = PipelineConfig::default();
        config.icon_filter.max_aspect_ratio = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides() {
        // Each env test touches its own variables only; tests run in
        // parallel within the process.
        env::set_var("OVERLAP_THRESHOLD", "0.75");
        env::set_var("ICON_MIN_SIZE", "12");
        env::set_var("ICON_MAX_SIZE", "48");
        env::set_var("CAPTURE_HOTKEY", "f9");
        env::set_var("EXIT_HOTKEY", "f10");

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.overlap_threshold, 0.75);
        assert_eq!(config.icon_filter.min_size, 12);
        assert_eq!(config.icon_filter.max_size, 48);
        assert_eq!(config.capture_hotkey, "f9");
        assert_eq!(config.exit_hotkey, "f10");

        // Cleanup
        env::remove_var("OVERLAP_THRESHOLD");
        env::remove_var("ICON_MIN_SIZE");
        env::remove_var("ICON_MAX_SIZE");
        env::remove_var("CAPTURE_HOTKEY");
        env::remove_var("EXIT_HOTKEY");
    }

    #[test]
    fn test_from_env_unparseable_falls_back_to_default() {
        env::set_var("MAX_ASPECT_RATIO", "wide");
        env::set_var("POLL_INTERVAL_MS", "-5");

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(
            config.icon_filter.max_aspect_ratio,
            constants::DEFAULT_MAX_ASPECT_RATIO
        );
        assert_eq!(
            config.poll_interval,
            Duration::from_millis(constants::DEFAULT_POLL_INTERVAL_MS)
        );

        // Cleanup
        env::remove_var("MAX_ASPECT_RATIO");
        env::remove_var("POLL_INTERVAL_MS");
    }

    #[test]
    fn test_from_env_output_dir_and_font() {
        env::set_var("OUTPUT_DIR", "/tmp/lens-out");
        env::set_var("LABEL_FONT", "/tmp/label.ttf");

        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/lens-out"));
        assert_eq!(config.label_font, Some(PathBuf::from("/tmp/label.ttf")));

        // Cleanup
        env::remove_var("OUTPUT_DIR");
        env::remove_var("LABEL_FONT");
    }

    #[test]
    fn test_command_spec_parse() {
        let spec = CommandSpec::parse("uied-detect --format json {image}").unwrap();
        assert_eq!(spec.program, "uied-detect");
        assert_eq!(spec.args, vec!["--format", "json", "{image}"]);
    }

    #[test]
    fn test_command_spec_rejects_empty() {
        assert!(CommandSpec::parse("   ").is_err());
    }
}
