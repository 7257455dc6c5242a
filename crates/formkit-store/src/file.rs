//! JSON-file repository backend.

use crate::error::StoreError;
use crate::repository::SchemaRepository;
use formkit_schema::{FieldDefinition, FormSchema, SchemaId, SchemaSummary};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk document: the entire store as one JSON value.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    schemas: HashMap<SchemaId, FormSchema>,
    #[serde(default)]
    draft: Vec<FieldDefinition>,
}

/// Repository persisted as a single JSON document.
///
/// Every mutation reads the document, applies the change, and rewrites the
/// whole file via a temp-file rename. A missing file is an empty store; a
/// file that exists but does not parse is a hard error rather than silent
/// data loss.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Open a repository at the given path; the file is created on first save
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<StoreDocument, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file absent, treating as empty");
                return Ok(StoreDocument::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_document(&self, document: &StoreDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(StoreError::Encode)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "store file rewritten");
        Ok(())
    }
}

impl SchemaRepository for FileRepository {
    fn save(&mut self, schema: &FormSchema) -> Result<SchemaId, StoreError> {
        let mut document = self.read_document()?;
        let id = SchemaId::new();
        document.schemas.insert(id, schema.clone());
        self.write_document(&document)?;
        Ok(id)
    }

    fn load(&self, id: &SchemaId) -> Result<Option<FormSchema>, StoreError> {
        let mut document = self.read_document()?;
        Ok(document.schemas.remove(id))
    }

    fn list(&self) -> Result<Vec<SchemaSummary>, StoreError> {
        let document = self.read_document()?;
        let mut summaries: Vec<_> = document
            .schemas
            .iter()
            .map(|(id, schema)| SchemaSummary::of(*id, schema))
            .collect();
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(summaries)
    }

    fn delete(&mut self, id: &SchemaId) -> Result<bool, StoreError> {
        let mut document = self.read_document()?;
        let existed = document.schemas.remove(id).is_some();
        if existed {
            self.write_document(&document)?;
        }
        Ok(existed)
    }

    fn save_draft(&mut self, fields: &[FieldDefinition]) -> Result<(), StoreError> {
        let mut document = self.read_document()?;
        document.draft = fields.to_vec();
        self.write_document(&document)
    }

    fn load_draft(&self) -> Result<Vec<FieldDefinition>, StoreError> {
        Ok(self.read_document()?.draft)
    }
}
