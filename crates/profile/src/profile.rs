//! # Profile Loading
//!
//! A [`Profile`] is built once from a JSON document of the form:
//! ```json
//! {
//!   "baseProfile": "default",
//!   "Manifests-Required": ["md5", "sha256"],
//!   "Tag-Manifests-Required": ["sha256"],
//!   "Metadata-Fields": {
//!     "Access": { "required": true, "values": ["Consortia", "Institution"] },
//!     "Bag-Size": { "required": true, "generated": true }
//!   }
//! }
//! ```
//! A `baseProfile` names one of the documents in [`crate::catalog`]. The base is loaded
//! first and each of the child's collections is layered over the base's: required
//! and metadata rules are overridden key by key, generated fields are unioned. The
//! resulting profile is flat and never consults its ancestors again.

use crate::catalog;
use crate::validate::{self, Fields, Rules, ValidationError};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Upper bound on the size of a profile document read through [`Profile::from_reader`].
pub const DEFAULT_SIZE_LIMIT: u64 = 1 << 20;

/// Errors which occur while loading a profile.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The profile file could not be opened.
    #[error("Failed to open profile at {}", path.display())]
    Open {
        /// The path that was given.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The profile document could not be read.
    #[error("Failed to read profile \"{name}\"")]
    Read {
        /// The name of the profile being read.
        name: String,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The profile document is larger than the permitted size.
    #[error("Profile \"{name}\" exceeds the size limit of {limit} bytes")]
    TooLarge {
        /// The name of the profile being read.
        name: String,
        /// The limit that was exceeded, in bytes.
        limit: u64,
    },
    /// The profile document is not valid JSON or does not have the expected shape.
    #[error("Malformed profile \"{name}\": {source}")]
    Parse {
        /// The name of the malformed profile.
        name: String,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// The `baseProfile` reference does not name a built-in profile.
    #[error("Unable to access baseProfile \"{base}\" of profile \"{name}\"")]
    UnknownBaseProfile {
        /// The profile holding the reference.
        name: String,
        /// The base profile that could not be found.
        base: String,
    },
    /// No built-in profile exists with the requested name.
    #[error("No built-in profile named \"{0}\"")]
    UnknownProfile(String),
}

type LoadResult<T> = Result<T, LoadError>;

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "Manifests-Required", default)]
    manifests: Option<BTreeSet<String>>,
    #[serde(rename = "Tag-Manifests-Required", default)]
    tag_manifests: Option<BTreeSet<String>>,
    #[serde(rename = "baseProfile", default)]
    base_profile: Option<String>,
    #[serde(rename = "Metadata-Fields", default)]
    fields: BTreeMap<String, FieldDefinition>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
struct FieldDefinition {
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<BTreeSet<String>>,
}

/// The flattened rule set of a BagIt profile.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    #[serde(rename = "baseProfile", skip_serializing_if = "Option::is_none")]
    base_profile: Option<String>,
    #[serde(rename = "Manifests-Required")]
    payload_digest_algorithms: BTreeSet<String>,
    #[serde(rename = "Tag-Manifests-Required")]
    tag_digest_algorithms: BTreeSet<String>,
    #[serde(rename = "Metadata-Fields")]
    fields: BTreeMap<String, FieldDefinition>,
    #[serde(skip)]
    required_fields: Rules,
    #[serde(skip)]
    metadata_fields: Rules,
    #[serde(skip)]
    generated_fields: BTreeSet<String>,
}

impl Profile {
    /// Parse a profile from the text of its JSON document.
    pub fn parse(name: &str, document: &str) -> LoadResult<Self> {
        Profile::parse_slice(name, document.as_bytes())
    }

    fn parse_slice(name: &str, document: &[u8]) -> LoadResult<Self> {
        let doc = serde_json::from_slice::<Document>(document).map_err(|source| {
            LoadError::Parse {
                name: name.to_owned(),
                source,
            }
        })?;
        Profile::build(name, doc)
    }

    /// Read and parse a profile, refusing documents larger than [`DEFAULT_SIZE_LIMIT`].
    pub fn from_reader<R: Read>(name: &str, reader: R) -> LoadResult<Self> {
        Profile::from_reader_with_limit(name, reader, DEFAULT_SIZE_LIMIT)
    }

    /// Read and parse a profile, refusing documents larger than `limit` bytes.
    pub fn from_reader_with_limit<R: Read>(name: &str, reader: R, limit: u64) -> LoadResult<Self> {
        let mut document = Vec::new();
        reader
            .take(limit.saturating_add(1))
            .read_to_end(&mut document)
            .map_err(|source| LoadError::Read {
                name: name.to_owned(),
                source,
            })?;

        if document.len() as u64 > limit {
            return Err(LoadError::TooLarge {
                name: name.to_owned(),
                limit,
            });
        }

        Profile::parse_slice(name, &document)
    }

    /// Load a profile from a file, naming it after the file stem.
    #[tracing::instrument(err)]
    pub fn from_path(path: &Path, limit: u64) -> LoadResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Profile::from_reader_with_limit(&name, file, limit)
    }

    /// Load one of the profiles compiled into [`crate::catalog`].
    pub fn builtin(name: &str) -> LoadResult<Self> {
        let document = catalog::get(name).ok_or_else(|| LoadError::UnknownProfile(name.into()))?;
        Profile::parse(name, document)
    }

    fn build(name: &str, doc: Document) -> LoadResult<Self> {
        let mut views = match &doc.base_profile {
            Some(base) => {
                let document =
                    catalog::get(base).ok_or_else(|| LoadError::UnknownBaseProfile {
                        name: name.to_owned(),
                        base: base.clone(),
                    })?;
                Views::from(Profile::parse(base, document)?)
            }
            None => Views::default(),
        };
        views.merge(Views::of(&doc.fields));
        let Views {
            required: required_fields,
            metadata: metadata_fields,
            generated: generated_fields,
        } = views;

        let payload_digest_algorithms = doc.manifests.unwrap_or_default();
        let tag_digest_algorithms = doc
            .tag_manifests
            .unwrap_or_else(|| payload_digest_algorithms.clone());

        let fields = metadata_fields
            .iter()
            .map(|(field, values)| {
                let def = FieldDefinition {
                    required: required_fields.contains_key(field),
                    generated: generated_fields.contains(field),
                    values: values.clone(),
                };
                (field.clone(), def)
            })
            .collect();

        tracing::debug!(
            profile = name,
            base = doc.base_profile.as_deref(),
            fields = metadata_fields.len(),
            required = required_fields.len(),
            "loaded profile"
        );

        Ok(Profile {
            name: name.to_owned(),
            base_profile: doc.base_profile,
            payload_digest_algorithms,
            tag_digest_algorithms,
            fields,
            required_fields,
            metadata_fields,
            generated_fields,
        })
    }
}

/// The three collections a profile derives from its field definitions.
#[derive(Default)]
struct Views {
    required: Rules,
    metadata: Rules,
    generated: BTreeSet<String>,
}

impl Views {
    fn of(fields: &BTreeMap<String, FieldDefinition>) -> Self {
        let rules = |keep: fn(&FieldDefinition) -> bool| -> Rules {
            fields
                .iter()
                .filter(|(_, def)| keep(def))
                .map(|(name, def)| (name.clone(), def.values.clone()))
                .collect()
        };
        Views {
            required: rules(|def| def.required),
            metadata: rules(|_| true),
            generated: fields
                .iter()
                .filter(|(_, def)| def.generated)
                .map(|(name, _)| name.clone())
                .collect(),
        }
    }

    /// Layer `child` over `self`: same keys take the child's rule, base-only keys
    /// stay, and generated names accumulate.
    fn merge(&mut self, child: Views) {
        self.required.extend(child.required);
        self.metadata.extend(child.metadata);
        self.generated.extend(child.generated);
    }
}

impl From<Profile> for Views {
    fn from(profile: Profile) -> Self {
        Views {
            required: profile.required_fields,
            metadata: profile.metadata_fields,
            generated: profile.generated_fields,
        }
    }
}

impl Profile {
    /// The name the profile was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base profile this one was merged onto, if any.
    pub fn base_profile(&self) -> Option<&str> {
        self.base_profile.as_deref()
    }

    /// Digest algorithms required for payload manifests.
    pub fn payload_digest_algorithms(&self) -> &BTreeSet<String> {
        &self.payload_digest_algorithms
    }

    /// Digest algorithms required for tag manifests.
    pub fn tag_digest_algorithms(&self) -> &BTreeSet<String> {
        &self.tag_digest_algorithms
    }

    /// Fields that must be present, with their allowed values (if constrained).
    pub fn required_fields(&self) -> &Rules {
        &self.required_fields
    }

    /// Every field the profile knows about, with their allowed values (if constrained).
    pub fn metadata_fields(&self) -> &Rules {
        &self.metadata_fields
    }

    /// Fields populated automatically while a bag is written.
    pub fn generated_fields(&self) -> &BTreeSet<String> {
        &self.generated_fields
    }

    /// The required fields a user must supply before export, i.e. excluding
    /// generated fields.
    pub fn completeness_rules(&self) -> Rules {
        self.required_fields
            .iter()
            .filter(|(name, _)| !self.generated_fields.contains(*name))
            .map(|(name, values)| (name.clone(), values.clone()))
            .collect()
    }

    /// Validate complete bag metadata against the required fields.
    pub fn validate(&self, fields: &Fields) -> Result<(), ValidationError> {
        validate::validate(&self.name, &self.required_fields, fields)
    }

    /// Validate user supplied metadata before generated fields exist.
    pub fn validate_pre_export(&self, fields: &Fields) -> Result<(), ValidationError> {
        validate::validate(&self.name, &self.completeness_rules(), fields)
    }
}
