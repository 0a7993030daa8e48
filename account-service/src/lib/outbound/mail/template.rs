use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::mail::errors::MailError;

/// Renders `{dir}/{name}.html` mail templates.
///
/// Placeholders are written `{{ key }}`; every placeholder must have a value
/// in the context. Values are HTML-escaped.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    dir: PathBuf,
}

impl TemplateRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// # Errors
    /// * `Template` - Bad template name, unreadable file or unfilled placeholder
    pub async fn render(
        &self,
        name: &str,
        context: &BTreeMap<String, String>,
    ) -> Result<String, MailError> {
        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_name {
            return Err(MailError::Template(format!("invalid template name: {}", name)));
        }

        let path = self.dir.join(format!("{}.html", name));
        let source = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| MailError::Template(format!("{}: {}", path.display(), e)))?;

        fill(&source, context)
    }
}

fn fill(source: &str, context: &BTreeMap<String, String>) -> Result<String, MailError> {
    let mut output = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| MailError::Template("unclosed placeholder".to_string()))?;

        let key = after[..end].trim();
        let value = context
            .get(key)
            .ok_or_else(|| MailError::Template(format!("no value for placeholder {}", key)))?;
        output.push_str(&escape_html(value));

        rest = &after[end + 2..];
    }
    output.push_str(rest);

    Ok(output)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
