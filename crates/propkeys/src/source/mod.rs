//! Properties sources.

use std::{collections::BTreeMap, fmt, fs, path::Path};

use crate::SourceError;

mod properties;
mod structured;

/// Format of a properties source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PropertiesFormat {
    /// Line-oriented `key=value` format.
    ///
    /// - Lines starting with `#` or `!` (after optional whitespace) are comments.
    /// - A key is separated from its value by `=`, `:` or whitespace. Whitespace around the separator is ignored.
    /// - A line ending with an unescaped `\` continues on the next line; leading whitespace of the continuation
    ///   line is ignored.
    /// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are supported in keys and values; other escaped chars
    ///   are taken verbatim (e.g., `\=` or `\\`).
    Properties,
    /// JSON object with scalar values.
    Json,
    /// YAML mapping with scalar keys and values.
    Yaml,
}

impl fmt::Display for PropertiesFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Properties => "properties",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

impl PropertiesFormat {
    /// Chooses the format based on the path extension: `.json` for JSON, `.yaml` / `.yml` for YAML,
    /// and properties otherwise.
    pub fn from_path(path: &Path) -> Self {
        let extension = path.extension().and_then(|ext| ext.to_str());
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Properties,
        }
    }

    /// Parses properties in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed.
    pub fn parse(self, input: &str) -> Result<Properties, SourceError> {
        match self {
            Self::Properties => properties::parse(input),
            Self::Json => structured::parse_json(input),
            Self::Yaml => structured::parse_yaml(input),
        }
    }
}

/// Flat ordered map of string properties, e.g. loaded from a properties file.
///
/// # Examples
///
/// ```
/// use propkeys::Properties;
///
/// let properties = Properties::parse(r"
///     # Comment
///     host = localhost
///     greeting: Hello, \
///               world!
///     path=C:\\Users\\app
/// ")?;
/// assert_eq!(properties.get("host"), Some("localhost"));
/// assert_eq!(properties.get("greeting"), Some("Hello, world!"));
/// assert_eq!(properties.get("path"), Some(r"C:\Users\app"));
/// # Ok::<_, propkeys::SourceError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    inner: BTreeMap<String, String>,
}

impl Properties {
    /// Creates empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties in the line-oriented [format](PropertiesFormat::Properties).
    ///
    /// # Errors
    ///
    /// Returns an error on malformed `\uXXXX` escapes.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        properties::parse(input)
    }

    /// Parses properties from a flat JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON, or is not an object with scalar values.
    pub fn from_json(input: &str) -> Result<Self, SourceError> {
        structured::parse_json(input)
    }

    /// Parses properties from a flat YAML mapping. An empty document is treated as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid YAML, or is not a mapping with scalar keys and values.
    pub fn from_yaml(input: &str) -> Result<Self, SourceError> {
        structured::parse_yaml(input)
    }

    /// Reads properties from the specified file. The format is chosen with [`PropertiesFormat::from_path()`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let format = PropertiesFormat::from_path(path);
        let contents = fs::read_to_string(path)?;
        let properties = format.parse(&contents)?;
        tracing::debug!(
            path = %path.display(),
            %format,
            len = properties.len(),
            "read properties"
        );
        Ok(properties)
    }

    /// Returns the value of the specified property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }

    /// Sets the value of a property, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.insert(name.into(), value.into())
    }

    /// Adds a property to these properties.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Checks whether there are no properties.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over properties in the alphabetic order of names.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> + '_ {
        self.inner
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        properties.extend(iter);
        properties
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Properties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let entries = iter
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()));
        self.inner.extend(entries);
    }
}
