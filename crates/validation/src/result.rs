/// Outcome of validating one notification.
///
/// Valid if and only if the error list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    /// A result with no errors.
    #[must_use]
    pub fn valid() -> Self {
        Self { errors: Vec::new() }
    }

    /// A result carrying one or more error descriptions.
    #[must_use]
    pub fn invalid(errors: Vec<String>) -> Self {
        Self { errors }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            f.write_str("valid")
        } else {
            write!(f, "invalid: {}", self.errors.join(", "))
        }
    }
}
