#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::errors::{OptimizerError, Result};
    use crate::optimizer::{optimized_prompt, Category};
    use crate::store::{
        CorruptStatePolicy, FileBackend, MemoryBackend, Record, RecordStore, StorageBackend,
        STORAGE_KEY,
    };

    fn save(store: &mut RecordStore, original: &str, category: Category) -> Result<Record> {
        let tags = vec![category.to_string()];
        let optimized = optimized_prompt(original, &category);
        store.create(original.to_string(), optimized, category, tags)
    }

    /// Backend whose writes always fail
    struct ReadOnlyBackend;

    impl StorageBackend for ReadOnlyBackend {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn save(&self, _key: &str, _blob: &str) -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only").into())
        }
    }

    #[test]
    fn test_crud_operations() -> Result<()> {
        let mut store = RecordStore::in_memory();
        assert!(store.is_empty());

        // 1. Create
        let record = save(&mut store, "写一篇文章", Category::Creative)?;
        assert_eq!(record.original, "写一篇文章");
        assert_eq!(record.category, Category::Creative);
        assert_eq!(record.tags, vec!["creative".to_string()]);
        assert_eq!(record.rating, None);

        // 2. List
        assert_eq!(store.list(), &[record.clone()]);

        // 3. Rate
        store.update_rating(&record.id, 5)?;
        assert_eq!(store.get(&record.id).unwrap().rating, Some(5));

        // 4. Rate again, last write wins
        store.update_rating(&record.id, 2)?;
        assert_eq!(store.get(&record.id).unwrap().rating, Some(2));

        // 5. Delete
        store.delete(&record.id)?;
        assert!(store.list().iter().all(|r| r.id != record.id));
        assert!(store.is_empty());

        Ok(())
    }

    #[test]
    fn test_newest_first() -> Result<()> {
        let mut store = RecordStore::in_memory();
        let first = save(&mut store, "R1", Category::Business)?;
        let second = save(&mut store, "R2", Category::Research)?;

        let ids: Vec<_> = store.list().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        Ok(())
    }

    #[test]
    fn test_ids_are_unique() -> Result<()> {
        let mut store = RecordStore::in_memory();
        for i in 0..50 {
            save(&mut store, &format!("prompt {i}"), Category::Technical)?;
        }
        let mut ids: Vec<_> = store.list().iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        Ok(())
    }

    #[test]
    fn test_absent_ids_are_noops() -> Result<()> {
        let mut store = RecordStore::in_memory();
        let record = save(&mut store, "keep me", Category::Educational)?;
        let before = store.list().to_vec();

        store.delete("missing")?;
        store.update_rating("missing", 4)?;

        assert_eq!(store.list(), before.as_slice());
        assert_eq!(store.get(&record.id).unwrap().rating, None);
        Ok(())
    }

    #[test]
    fn test_every_mutation_rewrites_blob() -> Result<()> {
        let backend = MemoryBackend::new();
        let mut store = RecordStore::open(Box::new(backend.clone()), CorruptStatePolicy::Surface)?;

        let read_back = || -> Vec<Record> {
            let blob = backend.load(STORAGE_KEY).unwrap().unwrap();
            serde_json::from_str(&blob).unwrap()
        };

        let record = save(&mut store, "p", Category::Creative)?;
        assert_eq!(read_back(), vec![record.clone()]);

        store.update_rating(&record.id, 3)?;
        assert_eq!(read_back()[0].rating, Some(3));

        store.delete(&record.id)?;
        assert!(read_back().is_empty());
        Ok(())
    }

    #[test]
    fn test_reopen_from_file() -> Result<()> {
        let dir = tempdir().unwrap();

        let (first, second) = {
            let backend = FileBackend::new(dir.path())?;
            let mut store = RecordStore::open(Box::new(backend), CorruptStatePolicy::Surface)?;
            let first = save(&mut store, "first", Category::Creative)?;
            thread::sleep(Duration::from_millis(2));
            let second = save(&mut store, "second", Category::Technical)?;
            store.update_rating(&first.id, 4)?;
            (first, second)
        };

        let backend = FileBackend::new(dir.path())?;
        let store = RecordStore::open(Box::new(backend), CorruptStatePolicy::Surface)?;

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0], second);
        assert_eq!(store.list()[1].id, first.id);
        assert_eq!(store.list()[1].created_at, first.created_at);
        assert_eq!(store.list()[1].rating, Some(4));
        Ok(())
    }

    #[test]
    fn test_loads_blob_written_by_browser_build() -> Result<()> {
        let blob = r#"[
            {"id":"1712000000001","original":"b","optimized":"ob","category":"business",
             "tags":["business","chatgpt"],"createdAt":"2024-04-01T10:00:00.000Z","rating":5},
            {"id":"1712000000000","original":"a","optimized":"oa","category":"research",
             "tags":["research"],"createdAt":"2024-04-01T09:00:00.000Z"}
        ]"#;
        let store = RecordStore::open(
            Box::new(MemoryBackend::with_blob(STORAGE_KEY, blob)),
            CorruptStatePolicy::Surface,
        )?;

        assert_eq!(store.len(), 2);
        assert_eq!(store.list()[0].id, "1712000000001");
        assert_eq!(store.list()[0].tags, vec!["business", "chatgpt"]);
        assert_eq!(store.list()[1].rating, None);
        Ok(())
    }

    #[test]
    fn test_corrupt_blob_surfaces() {
        let backend = MemoryBackend::with_blob(STORAGE_KEY, "{not json");
        let err = RecordStore::open(Box::new(backend), CorruptStatePolicy::Surface).unwrap_err();
        assert!(matches!(err, OptimizerError::DeserializationError(_)));
    }

    #[test]
    fn test_wrong_shape_surfaces() {
        let backend = MemoryBackend::with_blob(STORAGE_KEY, r#"[{"id": 1}]"#);
        let err = RecordStore::open(Box::new(backend), CorruptStatePolicy::Surface).unwrap_err();
        assert_eq!(err.category(), "deserialization");
    }

    #[test]
    fn test_corrupt_blob_discarded() -> Result<()> {
        let backend = MemoryBackend::with_blob(STORAGE_KEY, "{not json");
        let mut store = RecordStore::open(Box::new(backend.clone()), CorruptStatePolicy::Discard)?;
        assert!(store.is_empty());

        // untouched until the next write
        assert_eq!(backend.load(STORAGE_KEY)?.as_deref(), Some("{not json"));

        save(&mut store, "fresh", Category::Research)?;
        let blob = backend.load(STORAGE_KEY)?.unwrap();
        let records: Vec<Record> = serde_json::from_str(&blob)?;
        assert_eq!(records.len(), 1);
        Ok(())
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let mut store =
            RecordStore::open(Box::new(ReadOnlyBackend), CorruptStatePolicy::Surface).unwrap();

        let err = save(&mut store, "lost", Category::Creative).unwrap_err();
        assert_eq!(err.category(), "io");
        assert!(store.is_empty());
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Surface".parse::<CorruptStatePolicy>().unwrap(), CorruptStatePolicy::Surface);
        assert_eq!(" discard ".parse::<CorruptStatePolicy>().unwrap(), CorruptStatePolicy::Discard);
        assert!("reset".parse::<CorruptStatePolicy>().is_err());
    }
}
