mod error;
mod render;
mod source;

pub use {
	error::{Error, Result},
	render::render,
	source::{Builtin, Directory, Template, Templates},
};
