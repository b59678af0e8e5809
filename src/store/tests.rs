use super::*;
use crate::embedding::{Embedder, EmbeddingError, MockEmbedder};

fn docs(ids: &[&str]) -> Vec<Document> {
    ids.iter()
        .map(|id| Document {
            id: (*id).to_string(),
            title: format!("Title {id}"),
            description: format!("Description of {id}"),
        })
        .collect()
}

fn temp_repository(dir: &tempfile::TempDir) -> VectorRepository {
    VectorRepository::new(dir.path().join("cache").join("embeddings.bin"))
}

mod repository_tests {
    use super::*;

    #[test]
    fn test_load_absent_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        assert!(!repo.exists());
        assert!(repo.load(4).unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parents_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);

        let matrix = vec![vec![1.0f32, 2.0, 3.0, 4.0], vec![-1.0, 0.5, 0.0, 2.5]];
        repo.save(&matrix).unwrap();
        assert!(repo.exists());

        let loaded = repo.load(4).unwrap().unwrap();
        assert_eq!(loaded, matrix);
    }

    #[test]
    fn test_load_ragged_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        repo.save(&[vec![1.0f32, 2.0, 3.0]]).unwrap();

        // 12 bytes cannot split into 4-dim (16-byte) rows.
        let err = repo.load(4).unwrap_err();
        assert!(matches!(err, StoreError::MalformedCache { len: 12, dim: 4, .. }));
    }

    #[test]
    fn test_save_empty_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        repo.save(&[]).unwrap();
        assert_eq!(repo.load(4).unwrap().unwrap().len(), 0);
    }
}

mod build_tests {
    use super::*;

    #[test]
    fn test_build_aligns_vectors_with_documents() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        let embedder = MockEmbedder::new(16);

        let store = VectorStore::build(&embedder, docs(&["a", "b", "c"]), &repo).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.vectors().len(), 3);
        assert_eq!(store.dim(), 16);
        assert!(store.vectors().iter().all(|v| v.len() == 16));
        assert_eq!(embedder.call_count(), 3);
    }

    #[test]
    fn test_build_vector_matches_embedding_input() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        let embedder = MockEmbedder::new(16);

        let store = VectorStore::build(&embedder, docs(&["a"]), &repo).unwrap();
        let (doc, vector) = store.get("a").unwrap();

        let expected = embedder.embed(&doc.embedding_input()).unwrap();
        assert_eq!(vector, expected.as_slice());
    }

    #[test]
    fn test_build_fails_whole_batch_without_partial_cache() {
        struct FailOn<'a>(&'a str);
        impl Embedder for FailOn<'_> {
            fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
                if text.contains(self.0) {
                    return Err(EmbeddingError::InferenceFailed {
                        reason: "injected failure".into(),
                    });
                }
                Ok(vec![1.0; 8])
            }
            fn embedding_dim(&self) -> usize {
                8
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);

        let result = VectorStore::build(&FailOn("Title b"), docs(&["a", "b", "c"]), &repo);
        assert!(result.is_err());
        assert!(!repo.exists(), "a failed build must not leave a cache file");
    }

    #[test]
    fn test_get_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        let store = VectorStore::build(&MockEmbedder::new(8), docs(&["a"]), &repo).unwrap();
        assert!(store.get("zzz").is_none());
    }
}

mod load_or_build_tests {
    use super::*;

    #[test]
    fn test_second_call_does_not_re_embed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        let embedder = MockEmbedder::new(16);

        let first = VectorStore::load_or_build(&embedder, docs(&["a", "b"]), &repo).unwrap();
        assert_eq!(embedder.call_count(), 2);

        let second = VectorStore::load_or_build(&embedder, docs(&["a", "b"]), &repo).unwrap();
        assert_eq!(embedder.call_count(), 2, "fresh cache must not re-embed");
        assert_eq!(first.vectors(), second.vectors());
    }

    #[test]
    fn test_count_mismatch_triggers_rebuild() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        let embedder = MockEmbedder::new(16);

        VectorStore::load_or_build(&embedder, docs(&["a", "b"]), &repo).unwrap();
        assert_eq!(embedder.call_count(), 2);

        let store = VectorStore::load_or_build(&embedder, docs(&["a", "b", "c"]), &repo).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(embedder.call_count(), 5, "stale cache must rebuild fully");
    }

    #[test]
    fn test_content_edit_with_same_count_is_served_stale() {
        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        let embedder = MockEmbedder::new(16);

        let original = VectorStore::load_or_build(&embedder, docs(&["a", "b"]), &repo).unwrap();

        let mut edited = docs(&["a", "b"]);
        edited[0].description = "completely different text".into();
        let reloaded = VectorStore::load_or_build(&embedder, edited, &repo).unwrap();

        // Count-only staleness check: the old vectors are served.
        assert_eq!(original.vectors(), reloaded.vectors());
        assert_eq!(embedder.call_count(), 2);
    }

    #[test]
    fn test_dimension_mismatch_detected() {
        struct WrongDim;
        impl Embedder for WrongDim {
            fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
                Ok(vec![0.0; 3])
            }
            fn embedding_dim(&self) -> usize {
                8
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let repo = temp_repository(&dir);
        let err = VectorStore::build(&WrongDim, docs(&["a"]), &repo).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DimensionMismatch { expected: 8, actual: 3 }
        ));
    }
}
