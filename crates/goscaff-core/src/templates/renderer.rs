//! Handlebars-backed renderer for the embedded templates

use super::{embedded, TemplateContext, TemplateId};
use crate::error::{Result, ScaffoldError};
use crate::naming;
use handlebars::{handlebars_helper, no_escape, Handlebars};

handlebars_helper!(camel: |s: str| naming::to_camel(s));
handlebars_helper!(lower_camel: |s: str| naming::to_lower_camel(s));
handlebars_helper!(kebab: |s: str| naming::to_kebab(s));
handlebars_helper!(to_package: |s: str| naming::to_package(s));

/// Renders embedded templates.
///
/// Runs in strict mode with escaping off: output is Go source and config
/// text, never HTML. Helper names must not collide with context fields,
/// since a helper shadows a field of the same name.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// Register every embedded template, partial and case helper
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);

        registry.register_helper("camel", Box::new(camel));
        registry.register_helper("lower_camel", Box::new(lower_camel));
        registry.register_helper("kebab", Box::new(kebab));
        registry.register_helper("to_package", Box::new(to_package));

        for &(name, source) in embedded::PARTIALS {
            registry
                .register_partial(name, source)
                .map_err(|e| ScaffoldError::Template {
                    name,
                    source: Box::new(e),
                })?;
        }

        for id in TemplateId::ALL {
            registry
                .register_template_string(id.name(), id.source())
                .map_err(|e| ScaffoldError::Template {
                    name: id.name(),
                    source: Box::new(e),
                })?;
        }

        Ok(Self { registry })
    }

    pub fn render(&self, id: TemplateId, context: &TemplateContext) -> Result<String> {
        self.registry
            .render(id.name(), context)
            .map_err(|e| ScaffoldError::Render {
                name: id.name(),
                source: Box::new(e),
            })
    }
}
