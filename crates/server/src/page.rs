//! Home page rendering.

use faq_core::{AppError, AppResult};
use handlebars::Handlebars;
use serde_json::json;
use std::path::Path;

const TEMPLATE_NAME: &str = "index.html";
const BUILTIN_TEMPLATE: &str = include_str!("../templates/index.html");
const PAGE_TITLE: &str = "FAQ Assistant";

/// Compiled home page template.
pub struct HomePage {
    handlebars: Handlebars<'static>,
}

impl HomePage {
    /// Load `index.html` from `templates_dir`, or the built-in page when the
    /// directory has none.
    pub fn load(templates_dir: &Path) -> AppResult<Self> {
        let path = templates_dir.join(TEMPLATE_NAME);
        if path.is_file() {
            tracing::debug!("Using home page template {:?}", path);
            let source = std::fs::read_to_string(&path)?;
            Self::from_source(&source)
        } else {
            Self::builtin()
        }
    }

    pub fn builtin() -> AppResult<Self> {
        Self::from_source(BUILTIN_TEMPLATE)
    }

    fn from_source(source: &str) -> AppResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars
            .register_template_string(TEMPLATE_NAME, source)
            .map_err(|e| AppError::Template(format!("Failed to register template: {}", e)))?;

        Ok(Self { handlebars })
    }

    pub fn render(&self) -> AppResult<String> {
        self.handlebars
            .render(TEMPLATE_NAME, &json!({ "title": PAGE_TITLE }))
            .map_err(|e| AppError::Template(format!("Failed to render template: {}", e)))
    }
}
