use crate::document::{DocId, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::SearchServer;
use crate::query::{parse_query, ParseMode};
use rayon::prelude::*;

/// Evaluation strategy for [`SearchServer::match_document_with`].
///
/// Both modes find the same set of words. `Sequential` reports them in
/// parse order, `Parallel` reports them sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    #[default]
    Sequential,
    Parallel,
}

impl SearchServer {
    pub fn match_document<'q>(
        &self,
        raw_query: &'q str,
        document_id: DocId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        self.match_document_with(MatchMode::Sequential, raw_query, document_id)
    }

    /// Plus words of `raw_query` present in the document, or nothing if any
    /// minus word is present, together with the document's status.
    pub fn match_document_with<'q>(
        &self,
        mode: MatchMode,
        raw_query: &'q str,
        document_id: DocId,
    ) -> Result<(Vec<&'q str>, DocumentStatus)> {
        let status = self
            .document(document_id)
            .ok_or(SearchError::NotFound(document_id))?
            .status;
        let word_freqs = self.word_frequencies(document_id)?;

        match mode {
            MatchMode::Sequential => {
                let query = parse_query(raw_query, self.stop_words(), ParseMode::Deduplicated)?;
                if query.minus_words.iter().any(|word| word_freqs.contains_key(*word)) {
                    return Ok((Vec::new(), status));
                }
                let matched = query
                    .plus_words
                    .into_iter()
                    .filter(|word| word_freqs.contains_key(*word))
                    .collect();
                Ok((matched, status))
            }
            MatchMode::Parallel => {
                let query = parse_query(raw_query, self.stop_words(), ParseMode::Raw)?;
                if query.minus_words.par_iter().any(|word| word_freqs.contains_key(*word)) {
                    return Ok((Vec::new(), status));
                }
                let mut matched: Vec<&'q str> = query
                    .plus_words
                    .into_par_iter()
                    .filter(|word| word_freqs.contains_key(*word))
                    .collect();
                matched.par_sort_unstable();
                matched.dedup();
                Ok((matched, status))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn server() -> SearchServer {
        let mut server = SearchServer::new("and with").unwrap();
        server.add_document(1, "funny pet and nasty rat", DocumentStatus::Actual, &[7, 2, 7]).unwrap();
        server.add_document(2, "funny pet with curly hair", DocumentStatus::Irrelevant, &[1, 2]).unwrap();
        server
    }

    #[test]
    fn returns_matched_words_and_status() {
        let server = server();
        for mode in [MatchMode::Sequential, MatchMode::Parallel] {
            let (words, status) = server.match_document_with(mode, "curly and funny pet", 2).unwrap();
            assert_eq!(words, vec!["curly", "funny", "pet"]);
            assert_eq!(status, DocumentStatus::Irrelevant);
        }
    }

    #[test]
    fn minus_word_clears_matches() {
        let server = server();
        for mode in [MatchMode::Sequential, MatchMode::Parallel] {
            let (words, status) = server.match_document_with(mode, "funny -rat", 1).unwrap();
            assert!(words.is_empty());
            assert_eq!(status, DocumentStatus::Actual);
        }
    }

    #[test]
    fn modes_agree_on_word_set() {
        let server = server();
        let query = "pet rat funny pet -hair cat rat";
        let (seq, _) = server.match_document_with(MatchMode::Sequential, query, 1).unwrap();
        let (par, _) = server.match_document_with(MatchMode::Parallel, query, 1).unwrap();
        assert_eq!(seq.iter().collect::<BTreeSet<_>>(), par.iter().collect::<BTreeSet<_>>());
        assert_eq!(par, vec!["funny", "pet", "rat"]);
    }

    #[test]
    fn unknown_document_is_not_found() {
        let server = server();
        for mode in [MatchMode::Sequential, MatchMode::Parallel] {
            let err = server.match_document_with(mode, "funny", 9).unwrap_err();
            assert_eq!(err, SearchError::NotFound(9));
        }
    }

    #[test]
    fn malformed_query_is_invalid() {
        let err = server().match_document_with(MatchMode::Parallel, "funny --pet", 1).unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }
}
