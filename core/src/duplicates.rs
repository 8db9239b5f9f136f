use crate::document::DocId;
use crate::index::SearchServer;
use std::collections::{BTreeSet, HashSet};

/// Remove every document whose set of words equals that of a document with a
/// lower id. Returns the removed ids in ascending order.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let mut seen: HashSet<BTreeSet<&str>> = HashSet::new();
    let mut duplicates = Vec::new();

    for document_id in server.iter() {
        let Ok(word_freqs) = server.word_frequencies(document_id) else { continue };
        let words: BTreeSet<&str> = word_freqs.keys().map(String::as_str).collect();
        if !seen.insert(words) {
            duplicates.push(document_id);
        }
    }
    drop(seen);

    for &document_id in &duplicates {
        server.remove_document(document_id);
        tracing::info!(document_id, "found duplicate document");
    }
    duplicates
}
