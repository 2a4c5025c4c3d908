use css_inline::InlineError;
use thiserror::Error;

/// Errors raised while rendering an email template
#[derive(Debug, Error)]
pub enum RenderError {
    /// The askama template failed to render
    #[error("could not render email template: {0}")]
    Template(#[from] askama::Error),

    /// CSS could not be inlined into the rendered HTML
    #[error("could not inline email css: {0}")]
    InlineCss(#[from] InlineError),
}
