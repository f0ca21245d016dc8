use std::process::ExitCode;

use figment::{
	providers::{Env, Format, Toml},
	Figment,
};
use sheetsmith::{
	cipher::{AesCipher, Cipher},
	export::{self, FsWriter, Selection, Services},
	template::{Builtin, Directory, Templates},
	tracing,
	workbook::{self, Workbook},
};

fn main() -> ExitCode {
	// Prepare the configuration hierarchy.
	let figment = Figment::new()
		.merge(Toml::file("sheetsmith.toml"))
		.merge(Env::prefixed("SS_").split("_"));

	// Tracing is initialised from its own section before the rest of the
	// configuration is read, so that anything after it can trace.
	let tracing_config = match figment.contains("tracing") {
		true => figment
			.extract_inner::<tracing::Config>("tracing")
			.expect("Failed to initialize tracing config"),
		false => tracing::Config::default(),
	};
	tracing::init(tracing_config);

	let config = figment
		.extract::<export::Config>()
		.expect("Failed to extract config");

	match run(&config) {
		Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
		Ok(_) => ExitCode::FAILURE,
		Err(error) => {
			::tracing::error!(?error, "export failed");
			ExitCode::FAILURE
		}
	}
}

fn run(config: &export::Config) -> anyhow::Result<export::WriteSummary> {
	let workbooks = config
		.workbooks
		.iter()
		.filter_map(|entry| {
			let path = entry.path.relative();
			match workbook::open(&path) {
				Ok(workbook) => Some((workbook, &entry.exclude)),
				Err(error) => {
					::tracing::error!(path = %path.display(), %error, "skipping unreadable workbook");
					None
				}
			}
		})
		.collect::<Vec<_>>();

	if workbooks.is_empty() {
		anyhow::bail!("no readable workbooks");
	}

	let selections = workbooks
		.iter()
		.map(|(workbook, exclude)| {
			Selection::all(workbook as &dyn Workbook).excluding(exclude.iter().cloned())
		})
		.collect::<Vec<_>>();

	let templates: Box<dyn Templates> = match &config.templates {
		Some(folder) => Box::new(Directory::new(folder.relative())),
		None => Box::new(Builtin),
	};

	let cipher = config.cipher.as_ref().map(AesCipher::new).transpose()?;

	let services = Services {
		templates: templates.as_ref(),
		cipher: cipher.as_ref().map(|cipher| cipher as &dyn Cipher),
	};

	let compiled = export::compile(&selections, config, &services)?;
	let summary = export::write(&compiled.artifacts, &FsWriter);

	::tracing::info!(
		artifacts = compiled.artifacts.len(),
		written = summary.written,
		failed = summary.failed,
		warnings = compiled.diagnostics.len(),
		"export finished"
	);

	Ok(summary)
}
