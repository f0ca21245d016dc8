pub mod csharp;
pub mod text;
