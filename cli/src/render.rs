use engine::{Index, SearchHit, Statistics};
use std::io::{self, Write};

const PREVIEW_CHARS: usize = 200;
const RULE: &str = "==================================================";
const TITLE_WIDTH: usize = 60;

/// First 200 characters of `content`, with `...` appended when cut.
pub fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

pub fn write_title<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(TITLE_WIDTH))?;
    writeln!(out, "INFORMATION RETRIEVAL SYSTEM")?;
    writeln!(out, "{}", "=".repeat(TITLE_WIDTH))
}

pub fn write_statistics<W: Write>(out: &mut W, stats: &Statistics) -> io::Result<()> {
    writeln!(out, "\n{RULE}")?;
    writeln!(out, "SYSTEM STATISTICS")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Total Documents: {}", stats.document_count)?;
    writeln!(out, "Vocabulary Size: {}", stats.vocabulary_size)?;
    writeln!(out, "Index Status: {}", if stats.is_indexed { "Built" } else { "Not Built" })?;
    writeln!(out, "Average Document Length: {:.1} words", stats.average_token_count)?;
    writeln!(out, "{RULE}")
}

pub fn write_results<W: Write>(out: &mut W, index: &Index, query: &str, hits: &[SearchHit]) -> io::Result<()> {
    writeln!(out, "\nSearching for: '{query}'")?;
    writeln!(out, "{}", "-".repeat(50))?;
    if hits.is_empty() {
        return writeln!(out, "No matching documents found.");
    }
    writeln!(out, "Found {} matching documents:\n", hits.len())?;
    for (rank, hit) in hits.iter().enumerate() {
        writeln!(out, "{}. {}", rank + 1, hit.title)?;
        writeln!(out, "   Document ID: {}", hit.doc_id)?;
        writeln!(out, "   Relevance Score: {:.4}", hit.score)?;
        if let Some(content) = index.get_document_content(&hit.doc_id).filter(|c| !c.is_empty()) {
            writeln!(out, "   Preview: {}", preview(content))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_document_list<W: Write>(out: &mut W, index: &Index) -> io::Result<()> {
    if index.is_empty() {
        return writeln!(out, "No documents loaded.");
    }
    writeln!(out, "\nAVAILABLE DOCUMENTS:")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for doc in index.documents() {
        writeln!(out, "ID: {}", doc.id)?;
        writeln!(out, "Title: {}", doc.title)?;
        writeln!(out, "Length: {} words", doc.token_count())?;
        writeln!(out, "{}", "-".repeat(30))?;
    }
    Ok(())
}

/// A document with no content is reported like an unknown id.
pub fn write_document<W: Write>(out: &mut W, index: &Index, id: &str) -> io::Result<()> {
    match index.get_document(id).filter(|doc| !doc.content.is_empty()) {
        Some(doc) => {
            writeln!(out, "\nDOCUMENT: {}", doc.title)?;
            writeln!(out, "{RULE}")?;
            writeln!(out, "{}", doc.content)?;
            writeln!(out, "{RULE}")
        }
        None => writeln!(out, "Document '{id}' not found."),
    }
}
