use crate::document::{DocId, Document, DocumentStatus};
use crate::error::Result;
use crate::index::SearchServer;
use crate::query::{parse_query, ParseMode, Query};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Upper bound on the number of documents a search returns.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

impl SearchServer {
    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, |_, document_status, _| document_status == status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`, best first.
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = parse_query(raw_query, self.stop_words(), ParseMode::Deduplicated)?;
        let mut matched = self.find_all_documents(&query, predicate);
        matched.sort_by(compare_ranked);
        matched.truncate(MAX_RESULT_DOCUMENT_COUNT);
        Ok(matched)
    }

    fn find_all_documents<P>(&self, query: &Query<'_>, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();
        for word in &query.plus_words {
            let Some(postings) = self.postings(word) else { continue };
            let idf = self.inverse_document_freq(postings);
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.document(document_id) else { continue };
                if predicate(document_id, data.status, data.rating) {
                    *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
                }
            }
        }
        for word in &query.minus_words {
            let Some(postings) = self.postings(word) else { continue };
            for document_id in postings.keys() {
                document_to_relevance.remove(document_id);
            }
        }

        document_to_relevance
            .into_iter()
            .filter_map(|(document_id, relevance)| {
                self.document(document_id)
                    .map(|data| Document::new(document_id, relevance, data.rating))
            })
            .collect()
    }
}

fn compare_ranked(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating)
    } else {
        rhs.relevance.partial_cmp(&lhs.relevance).unwrap_or(Ordering::Equal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        server.add_document(0, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3]).unwrap();
        server.add_document(1, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1]).unwrap();
        server.add_document(3, "groomed starling eugene", DocumentStatus::Banned, &[9]).unwrap();
        server
    }

    #[test]
    fn ranks_by_relevance() {
        let found = server().find_top_documents("fluffy groomed cat").unwrap();
        let ids: Vec<DocId> = found.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 0, 2]);
        assert!(found.windows(2).all(|w| w[0].relevance >= w[1].relevance));
    }

    #[test]
    fn filters_by_status_and_predicate() {
        let server = server();
        let banned = server.find_top_documents_by_status("groomed", DocumentStatus::Banned).unwrap();
        assert_eq!(banned.iter().map(|d| d.id).collect::<Vec<_>>(), vec![3]);

        let even = server.find_top_documents_with("fluffy groomed cat", |id, _, _| id % 2 == 0).unwrap();
        assert_eq!(even.iter().map(|d| d.id).collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn predicate_sees_status_and_rating() {
        let server = server();
        let query = "fluffy groomed cat";
        let rated = server.find_top_documents_with(query, |_, _, rating| rating > 0).unwrap();
        assert_eq!(rated.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 3, 0]);
        assert!(rated.iter().all(|d| d.rating > 0));

        let banned = server
            .find_top_documents_with(query, |_, status, _| status == DocumentStatus::Banned)
            .unwrap();
        assert_eq!(banned.iter().map(|d| (d.id, d.rating)).collect::<Vec<_>>(), vec![(3, 9)]);

        let low = server
            .find_top_documents_with(query, |_, status, rating| status == DocumentStatus::Actual && rating < 0)
            .unwrap();
        assert_eq!(low.iter().map(|d| d.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn minus_word_excludes_document() {
        let found = server().find_top_documents("cat -collar").unwrap();
        assert_eq!(found.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn equal_relevance_ranked_by_rating() {
        let mut server = SearchServer::default();
        server.add_document(0, "cat dog", DocumentStatus::Actual, &[1]).unwrap();
        server.add_document(1, "cat dog", DocumentStatus::Actual, &[3]).unwrap();
        server.add_document(2, "cat dog", DocumentStatus::Actual, &[2]).unwrap();
        server.add_document(3, "bird", DocumentStatus::Actual, &[]).unwrap();
        let found = server.find_top_documents("cat").unwrap();
        assert_eq!(found.iter().map(|d| d.rating).collect::<Vec<_>>(), vec![3, 2, 1]);
    }

    #[test]
    fn caps_results() {
        let mut server = SearchServer::default();
        for id in 0..10 {
            server.add_document(id, "cat", DocumentStatus::Actual, &[id]).unwrap();
        }
        server.add_document(10, "dog", DocumentStatus::Actual, &[]).unwrap();
        let found = server.find_top_documents("cat").unwrap();
        assert_eq!(found.len(), MAX_RESULT_DOCUMENT_COUNT);
        assert_eq!(found[0].id, 9);
    }

    #[test]
    fn unknown_terms_and_empty_index() {
        assert!(server().find_top_documents("parrot").unwrap().is_empty());
        assert!(SearchServer::default().find_top_documents("cat").unwrap().is_empty());
    }

    #[test]
    fn malformed_query_is_an_error() {
        let err = server().find_top_documents("cat --dog").unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }
}
