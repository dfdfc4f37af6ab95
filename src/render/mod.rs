//! Go source rendering for assembled models.

pub mod format;
pub mod writer;

use askama::Template;

use crate::{
    codegen::{EnumDefinition, ModelDescriptor},
    error::{GenError, GenResult},
};

pub use format::{Gofmt, Passthrough, SourceFormatter};
pub use writer::ModelWriter;

#[derive(Template)]
#[template(path = "enum.go.tmpl", escape = "none")]
struct EnumTemplate<'a> {
    enum_def: &'a EnumDefinition,
}

#[derive(Template)]
#[template(path = "model.go.tmpl", escape = "none")]
struct ModelTemplate<'a> {
    model: &'a ModelDescriptor,
    enums: &'a [String],
}

/// Renders the Go type, constants and `String()` method for one enum.
pub fn render_enum(enum_def: &EnumDefinition) -> GenResult<String> {
    let rendered = EnumTemplate { enum_def }
        .render()
        .map_err(|source| GenError::Render {
            template: "enum",
            source,
        })?;
    Ok(rendered.trim_end().to_string())
}

/// Renders a complete Go file for `model`, its enums placed ahead of the struct.
pub fn render_model(model: &ModelDescriptor) -> GenResult<String> {
    let enums = model
        .enum_definitions
        .iter()
        .map(render_enum)
        .collect::<GenResult<Vec<_>>>()?;

    let rendered = ModelTemplate {
        model,
        enums: &enums,
    }
    .render()
    .map_err(|source| GenError::Render {
        template: "model",
        source,
    })?;

    let mut source = rendered.trim_end().to_string();
    source.push('\n');
    Ok(source)
}
