mod compile;
mod constant;

pub use {
	compile::{compile, read_sheet},
	constant::{ConstantEntry, ValueType},
};
