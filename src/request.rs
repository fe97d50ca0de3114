/// An application name plus the options that belong to it.
///
/// Built once per run from the tokens clap left over after global flag
/// recognition, and handed to [`crate::dispatch::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationRequest {
    name: Option<String>,
    options: Vec<String>,
}

impl ApplicationRequest {
    /// Split `tokens` into the application name (first token) and its
    /// options (every later token, in order).
    ///
    /// An empty slice yields a request with no name and no options. The
    /// input is only borrowed; no name validation happens here.
    pub fn from_tokens(tokens: &[String]) -> Self {
        match tokens.split_first() {
            Some((name, rest)) => Self {
                name: Some(name.clone()),
                options: rest.to_vec(),
            },
            None => Self::default(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// True when no application was requested.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    pub fn into_parts(self) -> (Option<String>, Vec<String>) {
        (self.name, self.options)
    }
}
