//! Template rendering helpers
//!
//! Destinations that template their payloads can register these helpers
//! with their renderer. They operate on section text plus the renderer's
//! own render callback, so any templating engine with lambda-style
//! sections can use them.

/// Render a template section and lower-case the result.
pub fn lower_cased<F>(text: &str, render: F) -> String
where
    F: Fn(&str) -> String,
{
    render(text).to_lowercase()
}
