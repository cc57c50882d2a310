use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Dashboard page layout.
#[derive(Debug, PartialEq, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Centered,
    Wide,
}

/// Report page configuration.
///
/// Loaded from an optional TOML file and validated before use; a missing
/// file yields the defaults. See [`ReportConfig::load_or_default`].
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Page title.
    pub page_title: String,
    /// Introductory text shown under the title.
    pub description: String,
    /// Page layout.
    pub layout: Layout,
    /// Chart width in pixels.
    pub chart_width: u32,
    /// Chart height in pixels.
    pub chart_height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page_title: "Normal Distribution".to_string(),
            description: "This is a visualization of the normal distribution.".to_string(),
            layout: Layout::Centered,
            chart_width: 640,
            chart_height: 420,
        }
    }
}

impl ReportConfig {
    /// Load a [`ReportConfig`] from a TOML file, or fall back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or deserialized, or if
    /// the configuration values are invalid.
    pub fn load_or_default<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();

        let config = if file.exists() {
            let contents = fs::read_to_string(file)
                .with_context(|| format!("failed to read {file:?}"))?;
            toml::from_str(&contents).context("failed to deserialize config")?
        } else {
            Self::default()
        };

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_title.trim().is_empty() {
            bail!("page title must not be empty");
        }
        check_num(self.chart_width, 160..=2000).context("invalid chart width")?;
        check_num(self.chart_height, 120..=2000).context("invalid chart height")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn missing_file_yields_defaults() {
        let file = env::temp_dir().join("campana-config-missing").join("report.toml");
        let config = ReportConfig::load_or_default(&file).expect("defaults must load");
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = env::temp_dir().join("campana-config-partial");
        fs::create_dir_all(&dir).expect("failed to create test directory");
        let file = dir.join("report.toml");
        fs::write(&file, "page_title = \"Sample Report\"\nlayout = \"wide\"\n")
            .expect("failed to write config file");

        let config = ReportConfig::load_or_default(&file).expect("config must load");

        assert_eq!(config.page_title, "Sample Report");
        assert_eq!(config.layout, Layout::Wide);
        assert_eq!(config.chart_width, ReportConfig::default().chart_width);
    }

    #[test]
    fn rejects_invalid_values_at_load() {
        let dir = env::temp_dir().join("campana-config-invalid");
        fs::create_dir_all(&dir).expect("failed to create test directory");
        let file = dir.join("report.toml");
        fs::write(&file, "chart_width = 10\n").expect("failed to write config file");

        assert!(ReportConfig::load_or_default(&file).is_err());
    }

    #[test]
    fn rejects_empty_title() {
        let config = ReportConfig {
            page_title: "  ".to_string(),
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_chart_size() {
        let config = ReportConfig {
            chart_width: 10,
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ReportConfig {
            chart_height: 100_000,
            ..ReportConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
