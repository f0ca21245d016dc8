use std::{collections::HashMap, fmt, str::FromStr};

use serde::{de, Deserialize};
use tracing::{metadata::LevelFilter, Subscriber};
use tracing_subscriber::{
	filter, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, Layer,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	stdout: StdoutConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct StdoutConfig {
	enabled: bool,
	format: OutputFormat,
	filters: TracingFilters,
}

impl Default for StdoutConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			format: OutputFormat::default(),
			filters: TracingFilters::default(),
		}
	}
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum OutputFormat {
	#[default]
	Text,
	Json,
}

#[derive(Debug, Deserialize)]
struct TracingFilters {
	default: ConfigLevelFilter,

	#[serde(flatten)]
	targets: HashMap<String, ConfigLevelFilter>,
}

impl Default for TracingFilters {
	fn default() -> Self {
		Self {
			default: ConfigLevelFilter(LevelFilter::INFO),
			targets: HashMap::new(),
		}
	}
}

#[repr(transparent)]
struct ConfigLevelFilter(LevelFilter);

impl From<ConfigLevelFilter> for LevelFilter {
	fn from(filter: ConfigLevelFilter) -> Self {
		filter.0
	}
}

impl fmt::Debug for ConfigLevelFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.fmt(f)
	}
}

impl<'de> Deserialize<'de> for ConfigLevelFilter {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let string = String::deserialize(deserializer)?;
		let level_filter = LevelFilter::from_str(&string).map_err(de::Error::custom)?;
		Ok(Self(level_filter))
	}
}

pub fn init(config: Config) {
	tracing_subscriber::registry()
		.with(stdout(config.stdout))
		.init();
}

fn stdout<S>(config: StdoutConfig) -> Option<impl Layer<S>>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
{
	if !config.enabled {
		return None;
	}

	let layer = match config.format {
		OutputFormat::Text => tracing_subscriber::fmt::layer().boxed(),
		OutputFormat::Json => tracing_subscriber::fmt::layer().json().boxed(),
	};

	let filter = filter::Targets::new()
		.with_default(config.filters.default)
		.with_targets(config.filters.targets);

	Some(layer.with_filter(filter))
}

#[cfg(test)]
mod test {
	use figment::{
		providers::{Format, Toml},
		Figment,
	};
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn filters_read_default_and_targets() {
		let config = Figment::from(Toml::string(
			r#"
				[stdout]
				format = "json"
				[stdout.filters]
				default = "warn"
				sheetsmith = "debug"
			"#,
		))
		.extract::<Config>()
		.unwrap();

		assert!(config.stdout.enabled);
		assert!(matches!(config.stdout.format, OutputFormat::Json));
		assert_eq!(LevelFilter::from(config.stdout.filters.default), LevelFilter::WARN);
		assert_eq!(
			config
				.stdout
				.filters
				.targets
				.get("sheetsmith")
				.map(|filter| filter.0),
			Some(LevelFilter::DEBUG)
		);
	}
}
