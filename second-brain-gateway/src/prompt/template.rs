//! Minimal `{{name}}` placeholder rendering.

/// Errors raised while rendering a prompt template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("unclosed {{{{ in template")]
    Unclosed,
    #[error("empty {{{{}}}} in template")]
    EmptyName,
    #[error("missing template variable: {0}")]
    MissingVar(String),
}

/// Substitute every `{{name}}` with its value from `vars`.
///
/// Substituted values are copied verbatim, so note text containing `{{`
/// is never expanded.
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
    let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let (prefix, after_start) = rest.split_at(start);
        out.push_str(prefix);
        let end = after_start.find("}}").ok_or(TemplateError::Unclosed)?;
        let name = after_start[2..end].trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyName);
        }
        let value = vars
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| TemplateError::MissingVar(name.to_string()))?;
        out.push_str(value);
        rest = &after_start[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_vars() {
        let rendered = render_template("Title: {{ title }}\nBody: {{body}}", &[
            ("title", "Groceries"),
            ("body", "eggs"),
        ])
        .unwrap();
        assert_eq!(rendered, "Title: Groceries\nBody: eggs");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let rendered = render_template("{{content}}", &[("content", "{{title}}")]).unwrap();
        assert_eq!(rendered, "{{title}}");
    }

    #[test]
    fn test_render_errors() {
        assert_eq!(
            render_template("{{missing}}", &[]),
            Err(TemplateError::MissingVar("missing".to_string()))
        );
        assert_eq!(render_template("{{ }}", &[]), Err(TemplateError::EmptyName));
        assert_eq!(render_template("oops {{", &[]), Err(TemplateError::Unclosed));
    }
}
