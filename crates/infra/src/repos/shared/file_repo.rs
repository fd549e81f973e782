use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};
use tokio::sync::Mutex;
use tracing::warn;

/// Persisted form of a domain entity. Stored dates without an offset are
/// wall-clock times in the zone given to `to_domain`.
pub trait FileDocument<E>: Serialize + DeserializeOwned {
    fn to_domain(self, tz: &Tz) -> E;
    fn from_domain(entity: &E) -> Self;
}

/// Top level object of a store file, wrapping the list of documents.
///
/// Documents are kept as raw JSON and mapped one by one, so a document that
/// can not be read is skipped without failing the others and is written back
/// as it was found.
pub trait CollectionFile: Default + Serialize + DeserializeOwned {
    fn documents(&self) -> &Vec<Value>;
    fn documents_mut(&mut self) -> &mut Vec<Value>;
}

/// A JSON file that is always read and written as a whole.
///
/// Every operation holds the lock for its full read-modify-write cycle, so
/// concurrent callers inside the process never overwrite each other. The
/// file is replaced atomically through a sibling temporary file.
pub struct JsonFile<F> {
    path: PathBuf,
    lock: Mutex<()>,
    _file: PhantomData<F>,
}

impl<F: Default + Serialize + DeserializeOwned> JsonFile<F> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _file: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes an empty store when the file does not exist yet
    pub async fn init(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => self.write_unlocked(&F::default()).await,
            Err(e) => Err(e).with_context(|| format!("Unable to access {:?}", self.path)),
        }
    }

    pub async fn read(&self) -> Result<F> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Applies `change` to the current content and writes the result back
    pub async fn modify<R>(&self, change: impl FnOnce(&mut F) -> R) -> Result<R> {
        let _guard = self.lock.lock().await;
        let mut content = self.read_unlocked().await?;
        let res = change(&mut content);
        self.write_unlocked(&content).await?;
        Ok(res)
    }

    async fn read_unlocked(&self) -> Result<F> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(F::default()),
            Err(e) => return Err(e).with_context(|| format!("Unable to read {:?}", self.path)),
        };
        serde_json::from_slice(&bytes).with_context(|| format!("Unable to parse {:?}", self.path))
    }

    async fn write_unlocked(&self, content: &F) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }
        let bytes = serde_json::to_vec_pretty(content)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, bytes)
            .await
            .with_context(|| format!("Unable to write {:?}", tmp_path))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("Unable to replace {:?}", self.path))
    }
}

/// Useful functions for creating file repositories

pub async fn insert<E, D, F>(file: &JsonFile<F>, entity: &E) -> Result<()>
where
    D: FileDocument<E>,
    F: CollectionFile,
{
    let document = to_document::<E, D>(entity)?;
    file.modify(|content| content.documents_mut().push(document))
        .await
}

pub async fn save<E, D, F>(file: &JsonFile<F>, entity: &E) -> Result<()>
where
    D: FileDocument<E>,
    F: CollectionFile,
{
    save_many::<E, D, F>(file, std::slice::from_ref(entity)).await
}

/// Replaces the stored documents that share an id with one of `entities`.
/// Entities that are no longer stored are not added back.
pub async fn save_many<E, D, F>(file: &JsonFile<F>, entities: &[E]) -> Result<()>
where
    D: FileDocument<E>,
    F: CollectionFile,
{
    let mut updated = entities
        .iter()
        .map(to_document::<E, D>)
        .collect::<Result<Vec<_>>>()?;
    file.modify(|content| {
        for document in content.documents_mut().iter_mut() {
            let pos = document_id(document)
                .and_then(|id| updated.iter().position(|u| document_id(u) == Some(id)));
            if let Some(pos) = pos {
                *document = updated.swap_remove(pos);
            }
        }
    })
    .await
}

pub async fn find<E, D, F>(file: &JsonFile<F>, id: &str, tz: &Tz) -> Result<Option<E>>
where
    D: FileDocument<E>,
    F: CollectionFile,
{
    let content = file.read().await?;
    Ok(content
        .documents()
        .iter()
        .find(|d| document_id(d) == Some(id))
        .and_then(|d| read_document::<E, D>(d, tz)))
}

pub async fn find_by<E, D, F, C>(file: &JsonFile<F>, tz: &Tz, compare: C) -> Result<Vec<E>>
where
    D: FileDocument<E>,
    F: CollectionFile,
    C: Fn(&E) -> bool,
{
    let content = file.read().await?;
    Ok(content
        .documents()
        .iter()
        .filter_map(|d| read_document::<E, D>(d, tz))
        .filter(|entity| compare(entity))
        .collect())
}

/// Removes a readable document. Documents that can not be read are never
/// found, so they are not removed either.
pub async fn delete<E, D, F>(file: &JsonFile<F>, id: &str, tz: &Tz) -> Result<Option<E>>
where
    D: FileDocument<E>,
    F: CollectionFile,
{
    if find::<E, D, F>(file, id, tz).await?.is_none() {
        return Ok(None);
    }
    file.modify(|content| {
        let documents = content.documents_mut();
        let pos = documents.iter().position(|d| document_id(d) == Some(id))?;
        let entity = read_document::<E, D>(&documents[pos], tz)?;
        documents.remove(pos);
        Some(entity)
    })
    .await
}

fn document_id(document: &Value) -> Option<&str> {
    document.get("id").and_then(Value::as_str)
}

fn to_document<E, D: FileDocument<E>>(entity: &E) -> Result<Value> {
    serde_json::to_value(D::from_domain(entity)).context("Unable to serialize document")
}

fn read_document<E, D: FileDocument<E>>(document: &Value, tz: &Tz) -> Option<E> {
    match serde_json::from_value::<D>(document.clone()) {
        Ok(document) => Some(document.to_domain(tz)),
        Err(e) => {
            warn!(
                "Skipping stored document: {} that can not be read, it is kept as is. Error: {}",
                document_id(document).unwrap_or("<without id>"),
                e
            );
            None
        }
    }
}

/// Formats a timestamp the way the store files have always carried them,
/// e.g. `2026-10-19T14:00:00.000Z`
pub fn to_rfc3339(millis: i64) -> Option<String> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// Dates the clients sent without an offset, stored as they came
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Reads an RFC 3339 timestamp, or a date and time without offset as
/// wall-clock time in `tz`
pub fn read_timestamp(value: &str, tz: &Tz) -> Option<i64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.timestamp_millis())
}

/// Parses a stored timestamp, see `read_timestamp`. Values that can not be
/// parsed are logged and treated as missing.
pub fn parse_timestamp(value: Option<&str>, tz: &Tz, field: &str, id: &str) -> Option<i64> {
    let value = value?;
    let parsed = read_timestamp(value, tz);
    if parsed.is_none() {
        warn!(
            "Ignoring unparseable {} timestamp: {} of stored document: {}",
            field, value, id
        );
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Default, Serialize, Deserialize)]
    struct Notes {
        #[serde(default)]
        notes: Vec<String>,
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_and_init_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::<Notes>::new(dir.path().join("nested").join("notes.json"));

        assert!(file.read().await.unwrap().notes.is_empty());
        assert!(!file.path().exists());

        file.init().await.unwrap();
        assert!(file.path().exists());
    }

    #[tokio::test]
    async fn modify_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::<Notes>::new(dir.path().join("notes.json"));

        let len = file
            .modify(|content| {
                content.notes.push("hola".into());
                content.notes.len()
            })
            .await
            .unwrap();
        assert_eq!(len, 1);

        let reopened = JsonFile::<Notes>::new(dir.path().join("notes.json"));
        assert_eq!(reopened.read().await.unwrap().notes, vec!["hola".to_string()]);
        assert!(!dir.path().join("notes.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "{ not json").unwrap();
        let file = JsonFile::<Notes>::new(path);

        assert!(file.read().await.is_err());
        assert!(file.modify(|_| ()).await.is_err());
    }

    #[test]
    fn timestamps_use_millis_and_zulu() {
        let tz = chrono_tz::America::Bogota;
        assert_eq!(
            to_rfc3339(1_792_418_400_000).as_deref(),
            Some("2026-10-19T14:00:00.000Z")
        );
        assert_eq!(
            parse_timestamp(Some("2026-10-19T09:00:00-05:00"), &tz, "f", "id"),
            Some(1_792_418_400_000)
        );
        assert_eq!(parse_timestamp(Some("ayer"), &tz, "f", "id"), None);
        assert_eq!(parse_timestamp(None, &tz, "f", "id"), None);
    }

    #[test]
    fn dates_without_offset_are_local_time() {
        let tz = chrono_tz::America::Bogota;
        assert_eq!(read_timestamp("2026-10-19T09:00", &tz), Some(1_792_418_400_000));
        assert_eq!(
            read_timestamp("2026-10-19T09:00:05.250", &tz),
            Some(1_792_418_405_250)
        );
        assert_eq!(read_timestamp("2026-10-19 09:00", &tz), Some(1_792_418_400_000));
        assert_eq!(
            read_timestamp("2026-10-19T09:00", &chrono_tz::UTC),
            Some(1_792_400_400_000)
        );
        assert_eq!(read_timestamp("19/10/2026", &tz), None);
    }
}
