use std::fmt;

use anyhow::{Result, bail};

/// Unified interface implemented by each application the launcher can run.
pub trait Application {
    /// Run the application with its own options (everything after its name).
    ///
    /// The returned integer becomes the process exit status.
    ///
    /// # Errors
    /// Any error is fatal to the run; the launcher passes it through untouched.
    fn run(&self, options: &[String]) -> Result<i32>;
}

impl<F> Application for F
where
    F: Fn(&[String]) -> Result<i32>,
{
    fn run(&self, options: &[String]) -> Result<i32> {
        self(options)
    }
}

struct Entry {
    name: String,
    app: Box<dyn Application>,
}

/// Name → application mapping, filled once at startup.
///
/// Names are matched exactly (case-sensitive). Entries are kept in
/// registration order so lookups and listings are deterministic.
#[derive(Default)]
pub struct ApplicationRegistry {
    entries: Vec<Entry>,
}

impl ApplicationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an application under `name`.
    ///
    /// # Errors
    /// Returns an error if `name` is empty or already registered.
    pub fn register<A>(&mut self, name: impl Into<String>, app: A) -> Result<()>
    where
        A: Application + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            bail!("application name must not be empty");
        }
        if self.contains(&name) {
            bail!("application registered twice: {name}");
        }
        self.entries.push(Entry {
            name,
            app: Box::new(app),
        });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Application> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.app.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ApplicationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
