//! Key-source documents.
//!
//! Two formats are accepted, chosen by file extension:
//!
//! - YAML (`.yaml`, `.yml`): a top-level `keys:` mapping.
//! - JSON (`.json`): the whole document is the key mapping, as in a
//!   next-intl message file.
//!
//! Nested mappings are flattened into dotted keys (`{"Common": {"submit": ..}}`
//! yields `Common.submit`). Values are otherwise ignored. Duplicate or empty
//! keys make the whole document invalid.

use std::{
    collections::BTreeSet,
    fmt, fs,
    path::Path,
};

use serde::{
    Deserialize, Deserializer,
    de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor},
};

use crate::core::error::KeySourceError;

/// The format of a key-source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    Yaml,
    Json,
}

impl KeyFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load the key names from a key-source document.
pub fn load_keys(path: &Path) -> Result<BTreeSet<String>, KeySourceError> {
    let format = KeyFormat::from_path(path).ok_or_else(|| KeySourceError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = fs::read_to_string(path).map_err(|source| KeySourceError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| KeySourceError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match format {
        KeyFormat::Yaml => parse_yaml_keys(&content).map_err(|e| parse_error(e.to_string())),
        KeyFormat::Json => parse_json_keys(&content).map_err(|e| parse_error(e.to_string())),
    }
}

pub fn parse_yaml_keys(content: &str) -> Result<BTreeSet<String>, serde_yaml::Error> {
    #[derive(Deserialize)]
    struct Document {
        keys: KeyNames,
    }

    let document: Document = serde_yaml::from_str(content)?;
    Ok(document.keys.0)
}

pub fn parse_json_keys(content: &str) -> Result<BTreeSet<String>, serde_json::Error> {
    let keys: KeyNames = serde_json::from_str(content)?;
    Ok(keys.0)
}

/// Flattened, duplicate-free key names of a mapping.
struct KeyNames(BTreeSet<String>);

impl<'de> Deserialize<'de> for KeyNames {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut keys = BTreeSet::new();
        deserializer.deserialize_map(Entry {
            path: String::new(),
            keys: &mut keys,
        })?;
        Ok(Self(keys))
    }
}

/// The value stored under `path`. Mappings recurse, everything else is a leaf.
struct Entry<'a> {
    path: String,
    keys: &'a mut BTreeSet<String>,
}

impl Entry<'_> {
    fn child(&mut self, segment: &str) -> Entry<'_> {
        let path = if self.path.is_empty() {
            segment.to_string()
        } else {
            format!("{}.{}", self.path, segment)
        };
        Entry {
            path,
            keys: &mut *self.keys,
        }
    }

    fn leaf<E: de::Error>(self) -> Result<(), E> {
        if self.path.is_empty() {
            return Err(E::custom("empty key"));
        }
        if self.keys.contains(&self.path) {
            return Err(E::custom(format!("duplicate key `{}`", self.path)));
        }
        self.keys.insert(self.path);
        Ok(())
    }
}

impl<'de> DeserializeSeed<'de> for Entry<'_> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for Entry<'_> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of translation keys")
    }

    fn visit_map<A>(mut self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        while let Some(KeySegment(segment)) = map.next_key()? {
            map.next_value_seed(self.child(&segment))?;
        }
        Ok(())
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        self.leaf()
    }

    fn visit_some<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        self.leaf()
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        self.leaf()
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> {
        self.leaf()
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> {
        self.leaf()
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> {
        self.leaf()
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> {
        self.leaf()
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<(), E> {
        self.leaf()
    }
}

/// A mapping key. YAML allows bare numbers and booleans as keys.
struct KeySegment(String);

impl<'de> Deserialize<'de> for KeySegment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SegmentVisitor;

        impl Visitor<'_> for SegmentVisitor {
            type Value = KeySegment;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<KeySegment, E> {
                Ok(KeySegment(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<KeySegment, E> {
                Ok(KeySegment(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<KeySegment, E> {
                Ok(KeySegment(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<KeySegment, E> {
                Ok(KeySegment(v.to_string()))
            }
        }

        deserializer.deserialize_any(SegmentVisitor)
    }
}
