//! Loading nested mappings from files and merging them into a store.

use std::fs;
use std::path::{Path, PathBuf};

use configtree_core_store::{json_to_value, Key, Mapping, Node, Value};

use crate::{Format, SourceError};

/// Anything that can produce a nested mapping to merge into a store.
pub trait Source {
    /// Load the mapping.
    ///
    /// Returns `SourceError::NotFound` when the backing data does not exist;
    /// [`configure_from_source`] treats that as "nothing to merge".
    fn load(&self) -> Result<Mapping, SourceError>;
}

/// A JSON or YAML file.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
    format: Format,
}

impl FileSource {
    /// A file whose format is picked from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::for_path(&path);
        FileSource { path, format }
    }

    /// A file with an explicit format.
    pub fn with_format(path: impl Into<PathBuf>, format: Format) -> Self {
        FileSource {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> &Format {
        &self.format
    }
}

impl Source for FileSource {
    fn load(&self) -> Result<Mapping, SourceError> {
        log::debug!("Reading {}...", self.path.display());
        let text = fs::read_to_string(&self.path)
            .map_err(|err| SourceError::from_io(self.path.clone(), err))?;
        parse_mapping(&text, &self.format, &self.path)
    }
}

/// Read a file into a nested mapping, picking the format from its extension.
pub fn load_mapping(path: impl AsRef<Path>) -> Result<Mapping, SourceError> {
    FileSource::new(path.as_ref()).load()
}

/// Parse in-memory text into a nested mapping.
pub fn load_mapping_str(text: &str, format: &Format) -> Result<Mapping, SourceError> {
    parse_mapping(text, format, Path::new("<string>"))
}

/// Merge a source into `node`.
///
/// A missing source is logged and skipped; every other failure is returned.
pub fn configure_from_source(node: &Node, source: &dyn Source) -> Result<(), SourceError> {
    match source.load() {
        Ok(mapping) => {
            node.configure(&mapping);
            Ok(())
        }
        Err(err) if err.is_not_found() => {
            log::warn!("{}", err);
            Ok(())
        }
        Err(err) => Err(err),
    }
}

/// Merge a JSON or YAML file into `node`. A missing file is not an error.
pub fn configure_from_file(node: &Node, path: impl AsRef<Path>) -> Result<(), SourceError> {
    configure_from_source(node, &FileSource::new(path.as_ref()))
}

fn parse_mapping(text: &str, format: &Format, origin: &Path) -> Result<Mapping, SourceError> {
    let parse_error = |message: String| SourceError::Parse {
        path: origin.to_path_buf(),
        format: format.clone(),
        message,
    };

    let document = if format.is_json() {
        if text.trim().is_empty() {
            Value::Null
        } else {
            let json: serde_json::Value =
                serde_json::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            json_to_value(json)
        }
    } else if format.is_yaml() {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
        yaml_to_value(yaml)
    } else {
        return Err(SourceError::UnsupportedFormat(format.clone()));
    };

    match document {
        Value::Null => Ok(Mapping::new()),
        Value::Map(mapping) => Ok(mapping),
        other => Err(SourceError::NotAMapping {
            path: origin.to_path_buf(),
            found: other.type_name(),
        }),
    }
}

/// Convert a YAML document to a Value. Non-string mapping keys are
/// stringified.
fn yaml_to_value(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                Value::String(n.to_string())
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_value).collect())
        }
        serde_yaml::Value::Mapping(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), yaml_to_value(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> Key {
    match key {
        serde_yaml::Value::String(s) => Key::from(s),
        serde_yaml::Value::Bool(b) => Key::from(b.to_string()),
        serde_yaml::Value::Number(n) => Key::from(n.to_string()),
        serde_yaml::Value::Null => Key::from("null"),
        other => Key::from(
            serde_yaml::to_string(&other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use configtree_core_store::keypath;
    use std::io::Write;

    const FUTURAMA: &str = "\
futurama:
  robots:
    bender: Bender The Robot
  humans:
    fry: Philip J. Fry
";

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "futurama.yml", FUTURAMA);

        let mapping = load_mapping(&path).unwrap();
        let store = Node::from_mapping(&mapping);
        assert_eq!(
            store.get_path(&keypath!("futurama.robots.bender")).unwrap(),
            "Bender The Robot"
        );
    }

    #[test]
    fn load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "app.json", r#"{"server": {"port": 8080}}"#);

        let mapping = load_mapping(&path).unwrap();
        let store = Node::from_mapping(&mapping);
        assert_eq!(store.get_path(&keypath!("server.port")).unwrap(), 8080);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_mapping(dir.path().join("i_dont_exist.yml")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn configure_from_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Node::new();
        store.set("kept", true);

        configure_from_file(&store, dir.path().join("i_dont_exist.yml")).unwrap();
        assert_eq!(store.get("kept"), true);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn configure_from_file_keeps_previous_params() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "futurama.yml", FUTURAMA);
        let store = Node::new();
        store
            .set_path(&keypath!("futurama.mutants.leela"), "Leela")
            .unwrap();

        configure_from_file(&store, &path).unwrap();

        assert_eq!(
            store.get_path(&keypath!("futurama.robots.bender")).unwrap(),
            "Bender The Robot"
        );
        assert_eq!(
            store.get_path(&keypath!("futurama.mutants.leela")).unwrap(),
            "Leela"
        );
    }

    #[test]
    fn malformed_file_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "broken.json", "{not json");
        let store = Node::new();

        let err = configure_from_file(&store, &path).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn non_mapping_document_rejected() {
        let err = load_mapping_str("- a\n- b\n", &Format::YAML).unwrap_err();
        assert!(matches!(
            err,
            SourceError::NotAMapping {
                found: "an array",
                ..
            }
        ));
    }

    #[test]
    fn empty_documents_are_empty_mappings() {
        assert!(load_mapping_str("", &Format::YAML).unwrap().is_empty());
        assert!(load_mapping_str("  \n", &Format::JSON).unwrap().is_empty());
        assert!(load_mapping_str("null", &Format::JSON).unwrap().is_empty());
    }

    #[test]
    fn yaml_keys_are_stringified() {
        let mapping = load_mapping_str("1: one\ntrue: yes\n", &Format::YAML).unwrap();
        assert_eq!(mapping["1"], "one");
        assert!(mapping.contains_key("true"));
    }

    #[test]
    fn yaml_scalars() {
        let mapping =
            load_mapping_str("int: 3\nfloat: 1.5\nlist: [a, b]\nnothing: ~\n", &Format::YAML)
                .unwrap();
        assert_eq!(mapping["int"], 3);
        assert_eq!(mapping["float"], Value::Float(1.5));
        assert_eq!(mapping["list"], Value::from(vec!["a", "b"]));
        assert_eq!(mapping["nothing"], Value::Null);
    }

    #[test]
    fn unsupported_format() {
        let err = load_mapping_str("a = 1", &Format::from_static("application/toml")).unwrap_err();
        assert!(matches!(err, SourceError::UnsupportedFormat(_)));
    }

    #[test]
    fn explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(&dir, "settings.conf", r#"{"a": 1}"#);
        let source = FileSource::with_format(&path, Format::JSON);
        assert_eq!(source.format(), &Format::JSON);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.load().unwrap()["a"], 1);
    }
}
