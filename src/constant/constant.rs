use strum::{Display, EnumString};

/// The value kinds a constants sheet may declare in its type column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ValueType {
	#[strum(serialize = "int")]
	Int,
	#[strum(serialize = "float")]
	Float,
	#[strum(to_string = "int-array", serialize = "int[]")]
	IntArray,
	#[strum(to_string = "float-array", serialize = "float[]")]
	FloatArray,
	#[strum(serialize = "vector2")]
	Vector2,
	#[strum(serialize = "vector3")]
	Vector3,
	#[strum(serialize = "string")]
	String,
	#[strum(to_string = "string-array", serialize = "string[]")]
	StringArray,
}

/// One row of a constants sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantEntry {
	pub name: String,
	pub raw_value: String,
	pub value_type: ValueType,
	pub comment: Option<String>,
}

#[cfg(test)]
mod test {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_type_names_and_aliases() {
		assert_eq!("int".parse::<ValueType>().unwrap(), ValueType::Int);
		assert_eq!("Float".parse::<ValueType>().unwrap(), ValueType::Float);
		assert_eq!("int[]".parse::<ValueType>().unwrap(), ValueType::IntArray);
		assert_eq!(
			"string-array".parse::<ValueType>().unwrap(),
			ValueType::StringArray
		);
		assert!("double".parse::<ValueType>().is_err());
		assert_eq!(ValueType::FloatArray.to_string(), "float-array");
	}
}
