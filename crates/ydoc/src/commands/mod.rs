//! CLI command implementations.

pub(crate) mod generate;
pub(crate) mod lint;
pub(crate) mod render;

pub(crate) use generate::GenerateArgs;
pub(crate) use lint::LintArgs;
pub(crate) use render::RenderArgs;
