//! Detail view builder for key-value display of a single profile.

use console::style;

/// A builder for detail views (key-value display).
pub struct DetailView {
    title: String,
    sections: Vec<DetailSection>,
}

struct DetailSection {
    header: Option<String>,
    fields: Vec<(String, String)>,
}

impl DetailView {
    /// Create a new detail view with the given title.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            sections: vec![DetailSection {
                header: None,
                fields: vec![],
            }],
        }
    }

    /// Add a key-value field to the current section.
    pub fn field(mut self, key: &str, value: &str) -> Self {
        if let Some(section) = self.sections.last_mut() {
            section.fields.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Add a field only if the value is Some.
    pub fn field_opt(self, key: &str, value: Option<String>) -> Self {
        match value {
            Some(v) => self.field(key, &v),
            None => self,
        }
    }

    /// Start a new named section with a header.
    pub fn section(mut self, header: &str) -> Self {
        self.sections.push(DetailSection {
            header: Some(header.to_string()),
            fields: vec![],
        });
        self
    }

    /// Render the detail view to a string.
    pub fn render(&self) -> String {
        let mut lines = vec![style(&self.title).bold().to_string()];
        let key_width = self
            .sections
            .iter()
            .flat_map(|s| s.fields.iter())
            .map(|(k, _)| k.len() + 1)
            .max()
            .unwrap_or(12);

        for section in &self.sections {
            if let Some(header) = &section.header {
                lines.push(String::new());
                lines.push(style(header).bold().underlined().to_string());
            }
            for (key, value) in &section.fields {
                let key = format!("{key}:");
                lines.push(format!(
                    "  {}  {}",
                    style(format!("{key:<key_width$}")).bold(),
                    value
                ));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_fields() {
        console::set_colors_enabled(false);
        let rendered = DetailView::new("Network test")
            .field("URL", "http://127.0.0.1:8543")
            .field_opt("From", None)
            .section("Gas")
            .field("Limit", "17592186044415")
            .render();

        assert!(rendered.starts_with("Network test"));
        assert!(rendered.contains("URL:    http://127.0.0.1:8543"));
        assert!(!rendered.contains("From"));
        assert!(rendered.contains("Gas"));
        assert!(rendered.contains("Limit:  17592186044415"));
    }
}
