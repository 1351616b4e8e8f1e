use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Template text was empty or all whitespace.
    #[error("template text must not be empty")]
    EmptyTemplate,

    /// A `{{variable}}` in the template has no value in the variable map.
    #[error("template variable not provided: {{{{{name}}}}}")]
    MissingVariable { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
