// File: src/source.rs
// Dataset loading transport.
//
// The synchronizer only sees `ItemSource`. `FileSource` reads a local JSON or
// YAML file; each record is validated independently (see model::adapter).
use crate::error::{LoadError, LoadResult};
use crate::model::Item;
use crate::model::adapter::items_from_records;
use serde_json::Value;
use std::future::Future;
use std::path::{Path, PathBuf};

pub trait ItemSource {
    fn load_items(&self) -> impl Future<Output = LoadResult<Vec<Item>>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(DataFormat::Json),
            Some("yaml") | Some("yml") => Ok(DataFormat::Yaml),
            _ => Err(LoadError::Unsupported(path.display().to_string())),
        }
    }
}

/// Parses a whole document. The document must be a list of records (or
/// empty); an object with an `events` list is accepted too.
pub fn parse_document(text: &str, format: DataFormat) -> LoadResult<Vec<Item>> {
    let doc: Value = match format {
        DataFormat::Json => {
            serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?
        }
        DataFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?
        }
    };

    let records = match doc {
        Value::Null => Vec::new(),
        Value::Array(records) => records,
        Value::Object(mut obj) => match obj.remove("events") {
            Some(Value::Array(records)) => records,
            _ => {
                return Err(LoadError::Parse(
                    "expected a list of events or an 'events' list".to_string(),
                ));
            }
        },
        _ => return Err(LoadError::Parse("expected a list of events".to_string())),
    };

    Ok(items_from_records(&records))
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemSource for FileSource {
    async fn load_items(&self) -> LoadResult<Vec<Item>> {
        let format = DataFormat::from_path(&self.path)?;
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let items = parse_document(&text, format)?;
        log::info!("Loaded {} events from {}", items.len(), self.path.display());
        Ok(items)
    }
}

/// Serves a fixed list. Used for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    items: Vec<Item>,
}

impl MemorySource {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

impl ItemSource for MemorySource {
    async fn load_items(&self) -> LoadResult<Vec<Item>> {
        Ok(self.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a/events.json")).unwrap(), DataFormat::Json);
        assert_eq!(DataFormat::from_path(Path::new("events.YML")).unwrap(), DataFormat::Yaml);
        assert!(matches!(
            DataFormat::from_path(Path::new("events.csv")),
            Err(LoadError::Unsupported(_))
        ));
    }

    #[test]
    fn yaml_document() {
        let text = "\
- title: Spring Meetup
  date: 2030-04-01
  region: North
  location: Oslo
- title: Broken
  date: not-a-date
";
        let items = parse_document(text, DataFormat::Yaml).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Spring Meetup");
        assert_eq!(items[0].region.as_deref(), Some("North"));
    }

    #[test]
    fn empty_and_wrapped_documents() {
        assert!(parse_document("~", DataFormat::Yaml).unwrap().is_empty());
        assert!(parse_document("[]", DataFormat::Json).unwrap().is_empty());
        let wrapped = r#"{"events": [{"name": "A", "end_date": "2030-01-01"}]}"#;
        assert_eq!(parse_document(wrapped, DataFormat::Json).unwrap().len(), 1);
        assert!(matches!(
            parse_document("{\"name\": 1}", DataFormat::Json),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_document("[{", DataFormat::Json),
            Err(LoadError::Parse(_))
        ));
    }
}
