use anyhow::{bail, Context, Result};
use search_core::{DocId, DocumentStatus, SearchServer};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Counters from one load pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub added: usize,
    pub rejected: usize,
}

/// Collect `.json` / `.jsonl` files under `input`, or `input` itself if it is a file.
/// A path that is neither is an error.
pub fn input_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input {} is neither a file nor a directory", input.display());
    }
    if files.is_empty() {
        tracing::warn!(input = %input.display(), "no .json or .jsonl files found");
    }
    Ok(files)
}

pub fn load_documents(server: &mut SearchServer, input: &Path, strict: bool) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    for file in input_files(input)? {
        let docs = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file)?
        } else {
            read_json(&file)?
        };
        for doc in docs {
            ingest_doc(server, doc, strict, &mut stats)?;
        }
    }
    tracing::info!(added = stats.added, rejected = stats.rejected, "loaded documents");
    Ok(stats)
}

fn read_jsonl(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut docs = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed document", file.display(), n + 1))?;
        docs.push(doc);
    }
    Ok(docs)
}

fn read_json(file: &Path) -> Result<Vec<InputDoc>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{}: malformed json", file.display()))?;
    let docs = match json {
        serde_json::Value::Array(arr) => arr
            .into_iter()
            .map(serde_json::from_value)
            .collect::<serde_json::Result<Vec<InputDoc>>>()?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => Vec::new(),
    };
    Ok(docs)
}

fn ingest_doc(server: &mut SearchServer, doc: InputDoc, strict: bool, stats: &mut LoadStats) -> Result<()> {
    match server.add_document(doc.id, &doc.text, doc.status, &doc.ratings) {
        Ok(()) => stats.added += 1,
        Err(err) if !strict => {
            tracing::warn!(id = doc.id, %err, "skipping document");
            stats.rejected += 1;
        }
        Err(err) => return Err(err).with_context(|| format!("adding document {}", doc.id)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_json_and_jsonl_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id": 1, "text": "cat in the city", "ratings": [1, 2, 3]},
                {"id": 2, "text": "dog", "status": "banned"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("b.jsonl"),
            "{\"id\": 3, \"text\": \"cat cat\"}\n\n{\"id\": 1, \"text\": \"duplicate id\"}\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut server = SearchServer::new("in the").unwrap();
        let stats = load_documents(&mut server, dir.path(), false).unwrap();
        assert_eq!(stats, LoadStats { added: 3, rejected: 1 });
        assert_eq!(server.document(2).unwrap().status, DocumentStatus::Banned);
        assert_eq!(server.document(1).unwrap().rating, 2);
    }

    #[test]
    fn strict_mode_aborts_on_rejected_document() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("docs.jsonl");
        fs::write(&file, "{\"id\": -4, \"text\": \"cat\"}\n").unwrap();
        let mut server = SearchServer::default();
        assert!(load_documents(&mut server, &file, true).is_err());
        assert_eq!(server.document_count(), 0);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.jsonl");
        let err = load_documents(&mut SearchServer::default(), &missing, false).unwrap_err();
        assert!(err.to_string().contains("nope.jsonl"), "{err}");
        assert!(input_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn malformed_line_is_reported() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("docs.jsonl");
        fs::write(&file, "{\"id\": 1}\n").unwrap();
        let err = load_documents(&mut SearchServer::default(), &file, false).unwrap_err();
        assert!(err.to_string().contains("docs.jsonl:1"));
    }
}
