mod emit;
mod registry;
mod sheet;

pub use {
	emit::emit_sheet,
	registry::{IdRegistry, RegistryBuilder},
	sheet::{read_sheet, IdEntry, IdSection, IdsSheet},
};
