use crate::document::Document;
use crate::error::Result;
use crate::index::SearchServer;
use rayon::prelude::*;

/// Run [`SearchServer::find_top_documents`] for each query in parallel.
/// Results are returned in query order; on failure, the error of the
/// earliest failing query is returned.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let results: Vec<Result<Vec<Document>>> = queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect();
    results.into_iter().collect()
}

/// Like [`process_queries`], flattened into a single list.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
