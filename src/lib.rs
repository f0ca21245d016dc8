pub mod cipher;
pub mod constant;
pub mod diagnostic;
pub mod export;
pub mod ids;
pub mod json;
pub mod localization;
pub mod template;
pub mod tracing;
pub mod utility;
pub mod workbook;
