//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the built-in C header and source templates
//! pre-registered. HTML escaping is disabled: contexts carry ready-made C
//! text.
//!
//! # Examples
//!
//! ```
//! use rescomp_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greet", "const char *s = {{literal}};").unwrap();
//! let out = engine.render("greet", &json!({"literal": "\"a<b\""})).unwrap();
//! assert_eq!(out, "const char *s = \"a<b\";");
//! ```

use handlebars::Handlebars;
use rescomp_core::{Error, Result};
use serde::Serialize;

/// Name of the header template.
pub const HEADER_TEMPLATE: &str = "resources/header";

/// Name of the source template.
pub const SOURCE_TEMPLATE: &str = "resources/source";

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`, allowing it to be used across
/// thread boundaries safely.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates a new template engine with registered templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if a built-in template fails to parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        let mut engine = Self { handlebars };
        engine.register_template_string(
            HEADER_TEMPLATE,
            include_str!("../templates/resources/header.h.hbs"),
        )?;
        engine.register_template_string(
            SOURCE_TEMPLATE,
            include_str!("../templates/resources/source.c.hbs"),
        )?;
        Ok(engine)
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if:
    /// - Template name is not registered
    /// - Context cannot be serialized
    /// - A variable referenced by the template is missing
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::Template {
                message: format!("rendering '{template_name}' failed: {e}"),
            })
    }

    /// Registers a custom template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::Template {
                message: format!("failed to register template '{name}': {e}"),
            })
    }
}
