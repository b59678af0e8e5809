use super::*;
use std::collections::HashMap;

use crate::embedding::EmbeddingError;
use crate::store::{VectorRepository, VectorStore};

/// Embedder returning preset vectors per text, for exact score control.
struct FixedEmbedder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl FixedEmbedder {
    fn new(dim: usize, entries: &[(&str, &[f32])]) -> Self {
        let vectors = entries
            .iter()
            .map(|(text, v)| ((*text).to_string(), v.to_vec()))
            .collect();
        Self { dim, vectors }
    }
}

impl Embedder for FixedEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        Ok(self
            .vectors
            .get(text)
            .cloned()
            .unwrap_or_else(|| vec![0.0; self.dim]))
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}

fn doc(id: &str) -> Document {
    Document {
        id: id.to_string(),
        title: id.to_string(),
        description: String::new(),
    }
}

/// Builds a store whose rows are exactly `rows`, in order.
fn store_with_rows(
    dir: &tempfile::TempDir,
    ids: &[&str],
    rows: &[&[f32]],
) -> (FixedEmbedder, VectorStore) {
    let dim = rows[0].len();
    let entries: Vec<(String, &[f32])> = ids
        .iter()
        .zip(rows)
        .map(|(id, row)| (doc(id).embedding_input(), *row))
        .collect();
    let entries_ref: Vec<(&str, &[f32])> = entries
        .iter()
        .map(|(text, row)| (text.as_str(), *row))
        .collect();

    let embedder = FixedEmbedder::new(dim, &entries_ref);
    let repo = VectorRepository::new(dir.path().join("embeddings.bin"));
    let documents = ids.iter().map(|id| doc(id)).collect();
    let store = VectorStore::build(&embedder, documents, &repo).unwrap();
    (embedder, store)
}

mod cosine_tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [1.0f32, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    }

    #[test]
    fn test_opposite_vectors() {
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_scale_invariance() {
        let query = [0.3f32, -0.7, 0.2];
        let a = [1.0f32, 0.5, -0.25];
        let scaled: Vec<f32> = a.iter().map(|x| x * 1000.0).collect();
        let delta = cosine_similarity(&query, &a) - cosine_similarity(&query, &scaled);
        assert!(delta.abs() < 1e-6);
    }
}

mod search_tests {
    use super::*;

    #[test]
    fn test_results_sorted_descending() {
        let dir = tempfile::tempdir().unwrap();
        let (mut embedder, store) = store_with_rows(
            &dir,
            &["far", "near", "mid"],
            &[&[-1.0, 0.0], &[1.0, 0.0], &[1.0, 1.0]],
        );
        embedder
            .vectors
            .insert("query".to_string(), vec![1.0, 0.0]);

        let ranker = SimilarityRanker::new(&embedder, &store);
        let results = ranker.search("query", 3).unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid", "far"]);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!((results[0].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        // "second" and "third" share a vector: a tie that must keep
        // document order.
        let (mut embedder, store) = store_with_rows(
            &dir,
            &["first", "second", "third"],
            &[&[1.0, 0.0], &[0.0, 1.0], &[0.0, 1.0]],
        );
        embedder
            .vectors
            .insert("query".to_string(), vec![0.0, 1.0]);

        let ranker = SimilarityRanker::new(&embedder, &store);
        let results = ranker.search("query", 3).unwrap();

        let ids: Vec<&str> = results.iter().map(|r| r.document.id.as_str()).collect();
        assert_eq!(ids, vec!["second", "third", "first"]);
    }

    #[test]
    fn test_k_caps_result_count() {
        let dir = tempfile::tempdir().unwrap();
        let (mut embedder, store) =
            store_with_rows(&dir, &["a", "b"], &[&[1.0, 0.0], &[0.0, 1.0]]);
        embedder.vectors.insert("q".to_string(), vec![1.0, 1.0]);

        let ranker = SimilarityRanker::new(&embedder, &store);
        assert_eq!(ranker.search("q", 1).unwrap().len(), 1);
        assert_eq!(ranker.search("q", 10).unwrap().len(), 2);
        assert!(ranker.search("q", 0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_query_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (embedder, store) = store_with_rows(&dir, &["a"], &[&[1.0, 0.0]]);

        let ranker = SimilarityRanker::new(&embedder, &store);
        let err = ranker.search("   ", 5).unwrap_err();
        assert!(matches!(
            err,
            RankingError::Embedding(EmbeddingError::EmptyInput)
        ));
    }

    #[test]
    fn test_query_dimension_mismatch_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (_, store) = store_with_rows(&dir, &["a"], &[&[1.0, 0.0]]);

        // A query embedder whose width disagrees with the stored vectors.
        let wide = FixedEmbedder::new(3, &[]);
        let ranker = SimilarityRanker::new(&wide, &store);

        let err = ranker.search("query", 5).unwrap_err();
        assert!(matches!(
            err,
            RankingError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_zero_vector_documents_rank_last() {
        let dir = tempfile::tempdir().unwrap();
        let (mut embedder, store) =
            store_with_rows(&dir, &["real", "null"], &[&[1.0, 0.0], &[0.0, 0.0]]);
        embedder.vectors.insert("q".to_string(), vec![1.0, 0.0]);

        let ranker = SimilarityRanker::new(&embedder, &store);
        let results = ranker.search("q", 2).unwrap();
        assert_eq!(results[1].document.id, "null");
        assert_eq!(results[1].score, 0.0);
    }
}
