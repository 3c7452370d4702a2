use std::fmt::{self, Display};

/// Ordered query-string parameters.
///
/// Optional values are only serialized when present; absent options never
/// appear in the query string, not even as empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    #[must_use]
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    #[must_use]
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub fn optional<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Value of the first parameter named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    /// Append the query string to `path`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if self.params.is_empty() { path.to_string() } else { format!("{path}?{self}") }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={}", urlencoding::encode(value))?;
        }
        Ok(())
    }
}
