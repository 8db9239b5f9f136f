use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};

/// How the parser treats repeated terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Plus and minus terms are each sorted and deduplicated.
    Deduplicated,
    /// Terms stay in encounter order, duplicates included.
    Raw,
}

/// A parsed query. Terms borrow from the raw query text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: Vec<&'a str>,
    pub minus_words: Vec<&'a str>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(word: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match word.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (word, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::invalid(format!("Query word {word:?} is invalid")));
    }
    Ok(QueryWord { data, is_minus, is_stop: stop_words.contains(data) })
}

pub fn parse_query<'a>(
    text: &'a str,
    stop_words: &StopWords,
    mode: ParseMode,
) -> Result<Query<'a>> {
    let mut query = Query::default();
    for word in split_into_words(text) {
        let query_word = parse_query_word(word, stop_words)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.push(query_word.data);
        } else {
            query.plus_words.push(query_word.data);
        }
    }
    if mode == ParseMode::Deduplicated {
        query.plus_words.sort_unstable();
        query.plus_words.dedup();
        query.minus_words.sort_unstable();
        query.minus_words.dedup();
    }
    tracing::trace!(
        plus = query.plus_words.len(),
        minus = query.minus_words.len(),
        ?mode,
        "parsed query"
    );
    Ok(query)
}
