use crate::document::{compute_average_rating, DocId, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};
use std::collections::{btree_set, BTreeMap, BTreeSet, HashMap};

/// In-memory inverted index with per-document metadata.
///
/// Term frequencies are stored twice: `term -> doc -> tf` for scoring and
/// `doc -> term -> tf` for matching and removal. Both views are only ever
/// changed together inside `add_document` and `remove_document`.
#[derive(Debug, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    word_to_document_freqs: HashMap<String, BTreeMap<DocId, f64>>,
    document_to_word_freqs: BTreeMap<DocId, BTreeMap<String, f64>>,
    documents: HashMap<DocId, DocumentData>,
    document_ids: BTreeSet<DocId>,
}

impl SearchServer {
    /// Create an engine whose stop words are given as a space-delimited string.
    pub fn new(stop_words_text: &str) -> Result<Self> {
        Ok(Self::with_stop_word_set(StopWords::from_text(stop_words_text)?))
    }

    pub fn with_stop_words<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::with_stop_word_set(StopWords::from_words(stop_words)?))
    }

    pub fn with_stop_word_set(stop_words: StopWords) -> Self {
        Self { stop_words, ..Self::default() }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn add_document(
        &mut self,
        document_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 {
            return Err(SearchError::invalid(format!("Document id {document_id} is negative")));
        }
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::invalid(format!("Document id {document_id} already exists")));
        }
        let words = self.split_into_words_no_stop(text)?;

        let inv_word_count = 1.0 / words.len() as f64;
        let doc_freqs = self.document_to_word_freqs.entry(document_id).or_default();
        for word in &words {
            *self
                .word_to_document_freqs
                .entry((*word).to_string())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inv_word_count;
            *doc_freqs.entry((*word).to_string()).or_insert(0.0) += inv_word_count;
        }
        let rating = compute_average_rating(ratings);
        self.documents.insert(document_id, DocumentData { rating, status });
        self.document_ids.insert(document_id);
        tracing::debug!(document_id, words = words.len(), rating, ?status, "added document");
        Ok(())
    }

    /// Remove a document from every table. Unknown ids are ignored.
    pub fn remove_document(&mut self, document_id: DocId) {
        if !self.document_ids.remove(&document_id) {
            return;
        }
        if let Some(word_freqs) = self.document_to_word_freqs.remove(&document_id) {
            for word in word_freqs.keys() {
                if let Some(postings) = self.word_to_document_freqs.get_mut(word) {
                    postings.remove(&document_id);
                    if postings.is_empty() {
                        self.word_to_document_freqs.remove(word);
                    }
                }
            }
        }
        self.documents.remove(&document_id);
        tracing::debug!(document_id, "removed document");
    }

    pub fn word_frequencies(&self, document_id: DocId) -> Result<&BTreeMap<String, f64>> {
        self.document_to_word_freqs
            .get(&document_id)
            .ok_or(SearchError::NotFound(document_id))
    }

    pub fn document(&self, document_id: DocId) -> Option<&DocumentData> {
        self.documents.get(&document_id)
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live document ids in ascending order.
    pub fn document_ids(&self) -> btree_set::Iter<'_, DocId> {
        self.document_ids.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = DocId> + '_ {
        self.document_ids.iter().copied()
    }

    pub(crate) fn postings(&self, word: &str) -> Option<&BTreeMap<DocId, f64>> {
        self.word_to_document_freqs.get(word)
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    /// `ln(N / df)`; only meaningful for a term that has postings.
    pub(crate) fn inverse_document_freq(&self, postings: &BTreeMap<DocId, f64>) -> f64 {
        (self.document_count() as f64 / postings.len() as f64).ln()
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_into_words(text) {
            if !is_valid_word(word) {
                return Err(SearchError::invalid(format!("Word {word:?} is invalid")));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = &'a DocId;
    type IntoIter = btree_set::Iter<'a, DocId>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids()
    }
}
