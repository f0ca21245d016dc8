mod attribute;
mod compile;
mod field;
mod table;

pub use {
	attribute::Attribute,
	compile::{compile, compile_rows, Options},
	field::{infer_field_types, FieldKind, FieldValueType},
	table::{read_table, ColumnHeader, Table, TableRow},
};
