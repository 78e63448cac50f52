//! Bucket tree and entry operations.
//!
//! A bucket is a named key space. Buckets form a tree: top-level buckets
//! hang off an implicit root (`parent_id = 0`) and may contain nested
//! buckets, addressed by a [`BucketPath`] such as `chapters/chapter`.
//! Keys are unique only within their bucket.
//!
//! Reads run in a deferred transaction (a consistent snapshot under WAL);
//! writes run in an `IMMEDIATE` transaction so writers are serialized.
//! Every transaction is a rusqlite `Transaction`, which rolls back on drop,
//! so no exit path leaves one open.

use std::fmt;

use async_trait::async_trait;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, OptionalExtension, TransactionBehavior};

use super::connection::CacheDb;
use crate::Error;

const ROOT_BUCKET_ID: i64 = 0;

/// Path from the root to a bucket, outermost name first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketPath<'a>(&'a [&'a str]);

impl<'a> BucketPath<'a> {
    pub const fn new(segments: &'a [&'a str]) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &'a [&'a str] {
        self.0
    }

    fn to_owned_segments(self) -> Vec<String> {
        self.0.iter().map(|s| (*s).to_owned()).collect()
    }
}

impl fmt::Display for BucketPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

/// A top-level bucket and the buckets nested directly inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSpec {
    pub name: &'static str,
    pub nested: &'static [&'static str],
}

impl BucketSpec {
    pub const fn new(name: &'static str, nested: &'static [&'static str]) -> Self {
        Self { name, nested }
    }
}

/// Transactional bucketed key-value storage.
///
/// [`CacheDb`] is the production implementation. The trait is the seam
/// cached clients are generic over, so alternative stores (or failing ones
/// in tests) can be swapped in.
#[async_trait]
pub trait BucketStore: Send + Sync {
    /// Create every bucket in `layout` that does not exist yet.
    ///
    /// Idempotent: existing buckets and their entries are left untouched.
    async fn ensure_buckets(&self, layout: &[BucketSpec]) -> Result<(), Error>;

    /// Look up `key` in the bucket at `path`.
    ///
    /// Returns `Ok(None)` when the key is absent and `Error::BucketNotFound`
    /// when the bucket itself does not exist.
    async fn get(&self, path: BucketPath<'_>, key: &[u8]) -> Result<Option<Vec<u8>>, Error>;

    /// Store `value` under `key` in the bucket at `path`, replacing any
    /// previous value.
    async fn put(&self, path: BucketPath<'_>, key: &[u8], value: &[u8]) -> Result<(), Error>;
}

/// Resolve a bucket path to its row id.
fn resolve(conn: &rusqlite::Connection, path: &[String]) -> Result<i64, Error> {
    if path.is_empty() {
        return Err(Error::BucketNotFound(String::new()));
    }

    let mut id = ROOT_BUCKET_ID;
    for name in path {
        id = conn
            .query_row(
                "SELECT id FROM buckets WHERE parent_id = ?1 AND name = ?2",
                params![id, name],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::BucketNotFound(path.join("/")))?;
    }
    Ok(id)
}

/// Create a bucket under `parent` unless it already exists, returning its id.
fn create_if_absent(conn: &rusqlite::Connection, parent: i64, name: &str) -> Result<i64, Error> {
    if name.is_empty() {
        return Err(Error::InvalidKey("bucket name must not be empty".into()));
    }

    conn.execute(
        "INSERT INTO buckets (parent_id, name, created_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(parent_id, name) DO NOTHING",
        params![parent, name, chrono::Utc::now().to_rfc3339()],
    )?;

    let id = conn.query_row(
        "SELECT id FROM buckets WHERE parent_id = ?1 AND name = ?2",
        params![parent, name],
        |row| row.get(0),
    )?;
    Ok(id)
}

impl CacheDb {
    /// Create the buckets described by `layout` if they are missing.
    ///
    /// Each top-level bucket and its nested buckets are created in one write
    /// transaction. The first failure aborts and is returned.
    pub async fn create_buckets(&self, layout: &[BucketSpec]) -> Result<(), Error> {
        let layout: Vec<(String, Vec<String>)> = layout
            .iter()
            .map(|spec| (spec.name.to_owned(), spec.nested.iter().map(|n| (*n).to_owned()).collect()))
            .collect();

        self.conn
            .call(move |conn| -> Result<(), Error> {
                for (name, nested) in &layout {
                    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

                    let id = create_if_absent(&tx, ROOT_BUCKET_ID, name)
                        .map_err(|e| Error::Bootstrap(format!("create bucket {name:?}: {e}")))?;
                    for child in nested {
                        create_if_absent(&tx, id, child)
                            .map_err(|e| Error::Bootstrap(format!("create nested bucket {child:?}: {e}")))?;
                    }

                    tx.commit()?;
                }
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Get the raw value stored under `key`.
    ///
    /// Returns None if the key doesn't exist in the bucket.
    pub async fn get_entry(&self, path: BucketPath<'_>, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        let path = path.to_owned_segments();
        let key = key.to_vec();
        self.conn
            .call(move |conn| -> Result<Option<Vec<u8>>, Error> {
                // Read-only: dropping the transaction ends the snapshot.
                let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
                let bucket_id = resolve(&tx, &path)?;

                let value = tx
                    .query_row(
                        "SELECT value FROM entries WHERE bucket_id = ?1 AND key = ?2",
                        params![bucket_id, key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await
            .map_err(Error::from)
    }

    /// Insert or replace the value stored under `key`.
    pub async fn put_entry(&self, path: BucketPath<'_>, key: &[u8], value: &[u8]) -> Result<(), Error> {
        let path = path.to_owned_segments();
        let key = key.to_vec();
        let value = value.to_vec();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
                let bucket_id = resolve(&tx, &path)?;

                tx.execute(
                    "INSERT INTO entries (bucket_id, key, value, updated_at) VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT(bucket_id, key) DO UPDATE SET
                        value = excluded.value,
                        updated_at = excluded.updated_at",
                    params![bucket_id, key, value, chrono::Utc::now().to_rfc3339()],
                )?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Full paths of every bucket at any depth, sorted.
    pub async fn bucket_paths(&self) -> Result<Vec<String>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare(
                    "WITH RECURSIVE tree(id, path) AS (
                        SELECT id, name FROM buckets WHERE parent_id = ?1
                        UNION ALL
                        SELECT b.id, tree.path || '/' || b.name
                        FROM buckets b JOIN tree ON b.parent_id = tree.id
                     )
                     SELECT path FROM tree ORDER BY path",
                )?;
                let paths = stmt
                    .query_map(params![ROOT_BUCKET_ID], |row| row.get(0))?
                    .collect::<Result<Vec<String>, _>>()?;
                Ok(paths)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of entries stored directly in the bucket at `path`.
    pub async fn entry_count(&self, path: BucketPath<'_>) -> Result<u64, Error> {
        let path = path.to_owned_segments();
        self.conn
            .call(move |conn| -> Result<u64, Error> {
                let bucket_id = resolve(conn, &path)?;
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM entries WHERE bucket_id = ?1", params![bucket_id], |row| {
                        row.get(0)
                    })?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait]
impl BucketStore for CacheDb {
    async fn ensure_buckets(&self, layout: &[BucketSpec]) -> Result<(), Error> {
        self.create_buckets(layout).await
    }

    async fn get(&self, path: BucketPath<'_>, key: &[u8]) -> Result<Option<Vec<u8>>, Error> {
        self.get_entry(path, key).await
    }

    async fn put(&self, path: BucketPath<'_>, key: &[u8], value: &[u8]) -> Result<(), Error> {
        self.put_entry(path, key, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &[BucketSpec] = &[
        BucketSpec::new("chapters", &["chapter", "chapterinfo"]),
        BucketSpec::new("languages", &[]),
    ];

    const CHAPTERS: BucketPath<'static> = BucketPath::new(&["chapters"]);
    const CHAPTER: BucketPath<'static> = BucketPath::new(&["chapters", "chapter"]);
    const LANGUAGES: BucketPath<'static> = BucketPath::new(&["languages"]);

    #[tokio::test]
    async fn test_create_buckets_idempotent() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();
        let first = db.bucket_paths().await.unwrap();

        db.create_buckets(LAYOUT).await.unwrap();
        let second = db.bucket_paths().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, vec!["chapters", "chapters/chapter", "chapters/chapterinfo", "languages"]);
    }

    #[tokio::test]
    async fn test_bucket_paths_lists_deep_buckets() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();
        db.conn
            .call(|conn| -> Result<(), Error> {
                let chapter = resolve(conn, &["chapters".to_owned(), "chapter".to_owned()])?;
                let words = create_if_absent(conn, chapter, "words")?;
                create_if_absent(conn, words, "audio")?;
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(
            db.bucket_paths().await.unwrap(),
            vec![
                "chapters",
                "chapters/chapter",
                "chapters/chapter/words",
                "chapters/chapter/words/audio",
                "chapters/chapterinfo",
                "languages",
            ]
        );

        let deep = BucketPath::new(&["chapters", "chapter", "words", "audio"]);
        db.put_entry(deep, b"1:1", b"[]").await.unwrap();
        assert_eq!(db.get_entry(deep, b"1:1").await.unwrap().as_deref(), Some(&b"[]"[..]));
        assert_eq!(db.entry_count(CHAPTER).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bootstrap_keeps_entries() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();
        db.put_entry(LANGUAGES, b"0", b"[]").await.unwrap();

        db.create_buckets(LAYOUT).await.unwrap();
        assert_eq!(db.get_entry(LANGUAGES, b"0").await.unwrap().as_deref(), Some(&b"[]"[..]));
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();

        db.put_entry(CHAPTER, b"0:1", b"{\"id\":1}").await.unwrap();
        let value = db.get_entry(CHAPTER, b"0:1").await.unwrap();
        assert_eq!(value.as_deref(), Some(&b"{\"id\":1}"[..]));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();
        assert!(db.get_entry(CHAPTER, b"0:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_nested_bucket_is_separate_key_space() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();

        db.put_entry(CHAPTERS, b"0", b"parent").await.unwrap();
        db.put_entry(CHAPTER, b"0", b"child").await.unwrap();

        assert_eq!(db.get_entry(CHAPTERS, b"0").await.unwrap().as_deref(), Some(&b"parent"[..]));
        assert_eq!(db.get_entry(CHAPTER, b"0").await.unwrap().as_deref(), Some(&b"child"[..]));
        assert_eq!(db.entry_count(CHAPTERS).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();

        db.put_entry(LANGUAGES, b"0", b"old").await.unwrap();
        db.put_entry(LANGUAGES, b"0", b"new").await.unwrap();

        assert_eq!(db.get_entry(LANGUAGES, b"0").await.unwrap().as_deref(), Some(&b"new"[..]));
        assert_eq!(db.entry_count(LANGUAGES).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_bucket() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let missing = BucketPath::new(&["verses", "verse"]);

        let get = db.get_entry(missing, b"1:1").await;
        assert!(matches!(get, Err(Error::BucketNotFound(p)) if p == "verses/verse"));

        let put = db.put_entry(missing, b"1:1", b"{}").await;
        assert!(matches!(put, Err(Error::BucketNotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_path_rejected() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.get_entry(BucketPath::new(&[]), b"k").await;
        assert!(matches!(result, Err(Error::BucketNotFound(_))));
    }

    #[tokio::test]
    async fn test_empty_bucket_name_fails_bootstrap() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.create_buckets(&[BucketSpec::new("", &[])]).await;
        assert!(matches!(result, Err(Error::Bootstrap(_))));
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.sqlite");

        {
            let db = CacheDb::open(&path).await.unwrap();
            db.create_buckets(LAYOUT).await.unwrap();
            db.put_entry(CHAPTER, b"0:1", b"persisted").await.unwrap();
        }

        let db = CacheDb::open(&path).await.unwrap();
        db.create_buckets(LAYOUT).await.unwrap();
        assert_eq!(db.get_entry(CHAPTER, b"0:1").await.unwrap().as_deref(), Some(&b"persisted"[..]));
    }

    #[tokio::test]
    async fn test_trait_delegates() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let store: &dyn BucketStore = &db;
        store.ensure_buckets(LAYOUT).await.unwrap();
        store.put(LANGUAGES, b"0", b"[]").await.unwrap();
        assert_eq!(store.get(LANGUAGES, b"0").await.unwrap(), Some(b"[]".to_vec()));
    }
}
