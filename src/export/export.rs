use std::{
	collections::HashSet,
	path::{Path, PathBuf},
};

use anyhow::Context;
use figment::value::magic::RelativePathBuf;
use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::{
	cipher::Cipher,
	constant,
	diagnostic::{Diagnostics, Location, Warning},
	ids::{self, IdRegistry, RegistryBuilder},
	json,
	localization::{self, LocalizationTable},
	template::{self, Template, Templates},
	utility::csharp,
	workbook::{Sheet, Workbook},
};

use super::{
	artifact::{Artifact, ArtifactKind, CompiledArtifacts},
	config::{Config, SheetKind},
	error::{Error, Result},
};

const SOURCE_EXTENSION: &str = "cs";
const JSON_EXTENSION: &str = "json";

/// A workbook and the sheets of it that are not selected for export.
pub struct Selection<'a> {
	workbook: &'a dyn Workbook,
	excluded: HashSet<String>,
}

impl<'a> Selection<'a> {
	pub fn all(workbook: &'a dyn Workbook) -> Self {
		Self {
			workbook,
			excluded: HashSet::new(),
		}
	}

	pub fn excluding(mut self, sheets: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.excluded.extend(sheets.into_iter().map(Into::into));
		self
	}

	fn sheets(&self, config: &Config, kind: SheetKind) -> Vec<&'a dyn Sheet> {
		let workbook = self.workbook;
		workbook
			.sheet_names()
			.into_iter()
			.filter(|name| !self.excluded.contains(name))
			.filter(|name| config.kinds.classify(name) == Some(kind))
			.filter_map(|name| workbook.sheet(&name))
			.collect()
	}

	fn location(&self, sheet: &dyn Sheet) -> Location {
		Location::sheet(self.workbook.name(), sheet.name())
	}
}

/// External collaborators a compile renders and encrypts through.
pub struct Services<'a> {
	pub templates: &'a dyn Templates,
	pub cipher: Option<&'a dyn Cipher>,
}

/// Compile every selected sheet of every workbook into artifacts.
///
/// IDs sheets across all workbooks are registered first, so every later pass
/// resolves against the complete registry. Each artifact kind is skipped, with
/// a diagnostic, when it has no output folder.
pub fn compile(
	selections: &[Selection],
	config: &Config,
	services: &Services,
) -> Result<CompiledArtifacts> {
	if selections.is_empty() {
		return Err(Error::NoWorkbooks);
	}

	let mut diagnostics = Diagnostics::new();
	let mut output = Output::default();

	let folders = Folders {
		ids: output_folder(ArtifactKind::Ids, &config.ids.output, &mut diagnostics),
		constants: output_folder(ArtifactKind::Constants, &config.constants.output, &mut diagnostics),
		json: json_folder(config, services, &mut diagnostics),
		localization: output_folder(
			ArtifactKind::Localization,
			&config.localization.output,
			&mut diagnostics,
		),
	};
	if folders.is_empty() {
		return Err(Error::NoOutput);
	}

	// Pass 1: the registry must be complete before anything resolves against it.
	let mut builder = RegistryBuilder::new();
	let mut ids_sheets = vec![];
	for selection in selections {
		let mut sheets = vec![];
		for sheet in selection.sheets(config, SheetKind::Ids) {
			let location = selection.location(sheet);
			let ids_sheet = ids::read_sheet(sheet, &location, &mut diagnostics);
			// Only accepted entries are emitted, so sources agree with the registry.
			sheets.push(builder.register(&ids_sheet, &location, &mut diagnostics));
		}
		ids_sheets.push(sheets);
	}
	let registry = builder.build()?;
	tracing::info!(ids = registry.len(), "registry built");

	// Pass 2: per workbook, per sheet.
	let mut ids_blocks = vec![];
	let mut constant_blocks = vec![];
	let mut localization_tables = vec![];

	for (selection, sheets) in selections.iter().zip(&ids_sheets) {
		if let Some(folder) = &folders.ids {
			let template = services.templates.template(Template::Ids)?;
			for sheet in sheets {
				let body = ids::emit_sheet(sheet, config.ids.only_enums);
				match config.ids.separate {
					true => output.push_source(ArtifactKind::Ids, folder, &sheet.name, &template, "%IDS%", &body),
					false => ids_blocks.push(block(&sheet.name, &body)),
				}
			}
		}

		if let Some(folder) = &folders.json {
			compile_json(selection, config, services, &registry, folder, &mut output, &mut diagnostics)?;
		}

		if let Some(folder) = &folders.constants {
			let template = services.templates.template(Template::Constants)?;
			for sheet in selection.sheets(config, SheetKind::Constants) {
				let location = selection.location(sheet);
				let body = constant::compile(sheet, &registry, &location, &mut diagnostics);
				match config.constants.separate {
					true => output.push_source(
						ArtifactKind::Constants,
						folder,
						sheet.name(),
						&template,
						"%CONSTANTS%",
						&body,
					),
					false => constant_blocks.push(block(sheet.name(), &body)),
				}
			}
		}

		if folders.localization.is_some() {
			for sheet in selection.sheets(config, SheetKind::Localization) {
				let location = selection.location(sheet);
				localization_tables.push(localization::compile(
					sheet,
					&registry,
					&location,
					&mut diagnostics,
				));
			}
		}
	}

	// Pass 3: combined outputs.
	if let (Some(folder), false) = (&folders.ids, config.ids.separate) {
		let template = services.templates.template(Template::Ids)?;
		output.push_source(
			ArtifactKind::Ids,
			folder,
			&config.ids.combined_name,
			&template,
			"%IDS%",
			&ids_blocks.concat(),
		);
	}

	if let (Some(folder), false) = (&folders.constants, config.constants.separate) {
		let template = services.templates.template(Template::Constants)?;
		output.push_source(
			ArtifactKind::Constants,
			folder,
			&config.constants.combined_name,
			&template,
			"%CONSTANTS%",
			&constant_blocks.concat(),
		);
	}

	if let Some(folder) = &folders.localization {
		compile_localization(
			localization_tables,
			config,
			services,
			folder,
			&mut output,
			&mut diagnostics,
		)?;
	}

	tracing::info!(
		artifacts = output.artifacts.len(),
		warnings = diagnostics.len(),
		"compile complete"
	);

	Ok(CompiledArtifacts {
		artifacts: output.artifacts,
		diagnostics: diagnostics.into_vec(),
	})
}

struct Folders {
	ids: Option<PathBuf>,
	constants: Option<PathBuf>,
	json: Option<PathBuf>,
	localization: Option<PathBuf>,
}

impl Folders {
	fn is_empty(&self) -> bool {
		self.ids.is_none()
			&& self.constants.is_none()
			&& self.json.is_none()
			&& self.localization.is_none()
	}
}

fn output_folder(
	kind: ArtifactKind,
	configured: &Option<RelativePathBuf>,
	diagnostics: &mut Diagnostics,
) -> Option<PathBuf> {
	let folder = configured.as_ref().map(RelativePathBuf::relative);
	if folder.is_none() {
		diagnostics.warn(Location::default(), Warning::MissingOutput(kind));
	}
	folder
}

fn json_folder(config: &Config, services: &Services, diagnostics: &mut Diagnostics) -> Option<PathBuf> {
	let folder = output_folder(ArtifactKind::Json, &config.json.output, diagnostics)?;
	if config.json.encrypt && services.cipher.is_none() {
		diagnostics.warn(Location::default(), Warning::MissingCipher);
		return None;
	}
	Some(folder)
}

fn block(name: &str, body: &str) -> String {
	format!("\t// {name}\n{body}\n")
}

#[derive(Default)]
struct Output {
	artifacts: Vec<Artifact>,
}

impl Output {
	fn push(&mut self, kind: ArtifactKind, folder: &Path, file_name: String, content: String) {
		tracing::debug!(%kind, file_name, "artifact generated");
		self.artifacts.push(Artifact {
			kind,
			folder: folder.to_path_buf(),
			file_name,
			content,
		});
	}

	fn push_source(
		&mut self,
		kind: ArtifactKind,
		folder: &Path,
		name: &str,
		template: &str,
		placeholder: &str,
		body: &str,
	) {
		let class_name = csharp::identifier(name);
		let content = template::render(template, &[("%CLASS_NAME%", class_name.as_str()), (placeholder, body)]);
		self.push(kind, folder, format!("{class_name}.{SOURCE_EXTENSION}"), content);
	}
}

fn compile_json(
	selection: &Selection,
	config: &Config,
	services: &Services,
	registry: &IdRegistry,
	folder: &Path,
	output: &mut Output,
	diagnostics: &mut Diagnostics,
) -> Result<()> {
	let sheets = selection.sheets(config, SheetKind::Json);
	let cipher = services.cipher.filter(|_| config.json.encrypt);

	// Sheets only share the read-only registry, so they compile independently.
	// Collecting preserves sheet order for both output and diagnostics.
	let compiled = sheets
		.par_iter()
		.map(|sheet| {
			let location = selection.location(*sheet);
			let mut sheet_diagnostics = Diagnostics::new();
			let table = json::read_table(*sheet);
			let field_types = json::infer_field_types(&table);
			let text = json::compile(
				&table,
				&field_types,
				registry,
				&config.json.options,
				&location,
				&mut sheet_diagnostics,
			)
			.map(|text| match cipher {
				Some(cipher) => cipher.encrypt(&text),
				None => text,
			});
			(sheet.name().to_string(), text, sheet_diagnostics)
		})
		.collect::<Vec<_>>();

	let mut combined = Map::new();
	for (name, text, sheet_diagnostics) in compiled {
		diagnostics.extend(sheet_diagnostics);
		let text = text.with_context(|| format!("failed to serialize sheet {name}"))?;

		match config.json.combine {
			true => {
				combined.insert(name, Value::String(text));
			}
			false => output.push(
				ArtifactKind::Json,
				folder,
				format!("{name}.{JSON_EXTENSION}"),
				text,
			),
		}
	}

	if config.json.combine && !combined.is_empty() {
		let content = serde_json::to_string(&Value::Object(combined))?;
		output.push(
			ArtifactKind::Json,
			folder,
			format!("{}.{JSON_EXTENSION}", selection.workbook.name()),
			content,
		);
	}

	Ok(())
}

fn compile_localization(
	tables: Vec<LocalizationTable>,
	config: &Config,
	services: &Services,
	folder: &Path,
	output: &mut Output,
	diagnostics: &mut Diagnostics,
) -> Result<()> {
	if tables.is_empty() {
		return Ok(());
	}

	let settings = &config.localization;
	let template = services.templates.template(Template::Localization)?;

	let emitted = match settings.separate {
		true => tables.clone(),
		false => vec![LocalizationTable::combine(
			settings.combined_name.clone(),
			&tables,
		)],
	};

	let mut blobs = vec![];
	for table in &emitted {
		for identifier in localization::duplicate_identifiers(table) {
			let location = Location {
				sheet: Some(table.name.clone()),
				..Default::default()
			};
			diagnostics.warn(location, Warning::DuplicateIdentifier(identifier));
		}

		output.push(
			ArtifactKind::Localization,
			folder,
			format!("{}.{SOURCE_EXTENSION}", csharp::identifier(&table.name)),
			localization::emit_table(table, &template),
		);

		for (language, file_stem, content) in localization::emit_blobs(table)? {
			output.push(
				ArtifactKind::Localization,
				folder,
				format!("{file_stem}.{JSON_EXTENSION}"),
				content.clone(),
			);
			blobs.push((language, content));
		}
	}

	let manager_template = services.templates.template(Template::LocalizationManager)?;
	output.push(
		ArtifactKind::Localization,
		folder,
		format!(
			"{}.{SOURCE_EXTENSION}",
			csharp::identifier(&settings.manager_name)
		),
		localization::emit_manager(&settings.manager_name, &tables, &manager_template),
	);

	if settings.charset_languages.is_empty() {
		return Ok(());
	}

	let charset_folder = output_folder(ArtifactKind::Charset, &settings.charset_output, diagnostics);
	let Some(charset_folder) = charset_folder else {
		return Ok(());
	};

	for watched in &settings.charset_languages {
		let texts = blobs
			.iter()
			.filter(|(language, _)| language.eq_ignore_ascii_case(watched))
			.map(|(_, content)| content.as_str());
		output.push(
			ArtifactKind::Charset,
			&charset_folder,
			format!("{}_characters.txt", csharp::identifier(watched)),
			localization::harvest(texts),
		);
	}

	Ok(())
}
