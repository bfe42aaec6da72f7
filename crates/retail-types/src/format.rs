//! File format detection shared by the catalog and config loaders.

use serde::de::DeserializeOwned;
use std::path::Path;

/// Serialization format of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// `.yaml`/`.yml` is YAML, everything else is treated as JSON.
    pub(crate) fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                FileFormat::Yaml
            }
            _ => FileFormat::Json,
        }
    }
}

/// Error returned by [`parse`], carrying whichever parser failed.
#[derive(Debug)]
pub(crate) enum ParseError {
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
}

pub(crate) fn parse<T: DeserializeOwned>(content: &str, format: FileFormat) -> Result<T, ParseError> {
    match format {
        FileFormat::Json => serde_json::from_str(content).map_err(ParseError::Json),
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(ParseError::Yaml),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("seed.yaml")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("seed.YML")), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("seed.json")), FileFormat::Json);
        assert_eq!(FileFormat::from_path(Path::new("seed")), FileFormat::Json);
    }
}
