use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vectormd_vector_store::{
    IndexMeta, IndexedSection, Metric, Section, SectionDataset, StoreConfig, VectorStore,
    VectorStoreError,
};

fn sample_store() -> VectorStore {
    let dataset = SectionDataset::new(vec![
        IndexedSection::new(Section::new("# A", "code"), vec![1.0, 0.0, 0.0]),
        IndexedSection::new(Section::new("# B", "more"), vec![0.0, 1.0, 0.0]),
        IndexedSection::new(Section::new("# C", ""), vec![0.0, 0.0, 1.0]),
    ]);
    let meta = IndexMeta {
        model_id: "hashing-3".into(),
        template_hash: 42,
    };
    VectorStore::build(dataset, Metric::L2, meta).expect("build store")
}

#[test]
fn saved_store_reloads_with_same_results() {
    let tmp = TempDir::new().expect("tempdir");
    let paths = StoreConfig::new(tmp.path()).paths();

    let store = sample_store();
    store.save(&paths).expect("save");
    assert!(paths.dataset_dir.is_dir());
    assert!(paths.index_file.is_file());

    let loaded = VectorStore::load(&paths).expect("load");
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.dimension(), 3);
    assert_eq!(loaded.meta(), store.meta());
    assert_eq!(
        loaded.search(&[0.0, 1.0, 0.0], 2).expect("search"),
        store.search(&[0.0, 1.0, 0.0], 2).expect("search")
    );
}

#[test]
fn search_maps_positions_back_to_sections() {
    let hits = sample_store().search(&[0.9, 0.1, 0.0], 5).expect("search");

    let headings: Vec<&str> = hits.iter().map(|h| h.heading.as_str()).collect();
    assert_eq!(headings, vec!["# A", "# B", "# C"]);
    assert_eq!(hits[0].position, 0);
    assert_eq!(hits[0].content, "code");
    assert!(hits[0].score < hits[1].score);
}

#[test]
fn load_without_artifacts_reports_missing() {
    let tmp = TempDir::new().expect("tempdir");
    let paths = StoreConfig::new(tmp.path()).paths();
    let err = VectorStore::load(&paths).expect_err("should fail");
    assert!(matches!(err, VectorStoreError::ArtifactMissing(_)));
}

#[test]
fn load_rejects_dataset_index_length_mismatch() {
    let tmp = TempDir::new().expect("tempdir");
    let paths = StoreConfig::new(tmp.path()).paths();
    sample_store().save(&paths).expect("save");

    let shorter = SectionDataset::new(vec![IndexedSection::new(
        Section::new("# A", "code"),
        vec![1.0, 0.0, 0.0],
    )]);
    shorter.save(&paths.dataset_dir).expect("overwrite dataset");

    let err = VectorStore::load(&paths).expect_err("should fail");
    assert!(matches!(err, VectorStoreError::IndexCorrupt(_)), "{err}");
}

#[test]
fn load_rejects_embeddings_that_disagree_with_index() {
    let tmp = TempDir::new().expect("tempdir");
    let paths = StoreConfig::new(tmp.path()).paths();
    sample_store().save(&paths).expect("save");

    let drifted = SectionDataset::new(vec![
        IndexedSection::new(Section::new("# A", "code"), vec![1.0, 0.0, 0.0]),
        IndexedSection::new(Section::new("# B", "more"), vec![0.0, 0.0, 1.0]),
        IndexedSection::new(Section::new("# C", ""), vec![0.0, 0.0, 1.0]),
    ]);
    drifted.save(&paths.dataset_dir).expect("overwrite dataset");

    let err = VectorStore::load(&paths).expect_err("should fail");
    match err {
        VectorStoreError::IndexCorrupt(msg) => assert!(msg.contains("section 1"), "{msg}"),
        other => panic!("expected IndexCorrupt, got {other}"),
    }
}
