//! Minimal `{{variable}}` template engine for notification bodies.

use {
    crate::error::{Error, Result},
    regex::Regex,
    std::{collections::HashMap, sync::LazyLock},
};

#[allow(clippy::expect_used)]
static VARIABLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("variable pattern is valid"));

/// An immutable message template.
///
/// ```
/// use {courier_common::MessageTemplate, std::collections::HashMap};
///
/// let template = MessageTemplate::new("Hello {{name}}, your order {{id}} shipped").unwrap();
/// let mut vars = HashMap::new();
/// vars.insert("name".to_string(), "Ana".to_string());
/// vars.insert("id".to_string(), "42".to_string());
/// assert_eq!(template.render(&vars).unwrap(), "Hello Ana, your order 42 shipped");
/// ```
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    text: String,
}

impl MessageTemplate {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::EmptyTemplate);
        }
        Ok(Self { text })
    }

    /// Replace every `{{variable}}` with its value from the map.
    ///
    /// A variable without a value is an error, not a silent pass-through.
    pub fn render(&self, variables: &HashMap<String, String>) -> Result<String> {
        let mut rendered = String::with_capacity(self.text.len());
        let mut last_end = 0;

        for capture in VARIABLE_PATTERN.captures_iter(&self.text) {
            let Some(whole) = capture.get(0) else {
                continue;
            };
            let name = capture
                .get(1)
                .map(|m| m.as_str())
                .unwrap_or_default();
            let value = variables.get(name).ok_or_else(|| Error::MissingVariable {
                name: name.to_string(),
            })?;

            rendered.push_str(&self.text[last_end..whole.start()]);
            rendered.push_str(value);
            last_end = whole.end();
        }
        rendered.push_str(&self.text[last_end..]);

        Ok(rendered)
    }

    /// The original, unrendered template text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
