use crate::render::{write_document, write_document_list, write_results, write_statistics};
use engine::Index;
use std::io::{self, BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Quit,
    Stats,
    List,
    View(&'a str),
    Search(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let lower = line.to_lowercase();
        match lower.as_str() {
            "quit" | "exit" | "q" => Command::Quit,
            "stats" => Command::Stats,
            "list" => Command::List,
            "" => Command::Empty,
            _ => match line.get(..5) {
                Some(prefix) if prefix.eq_ignore_ascii_case("view ") => Command::View(line[5..].trim()),
                _ => Command::Search(line),
            },
        }
    }
}

fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(50))?;
    writeln!(out, "INTERACTIVE SEARCH MODE")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out, "Enter your search queries (type 'quit' to exit)")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  - 'stats': Show system statistics")?;
    writeln!(out, "  - 'list': List all documents")?;
    writeln!(out, "  - 'view <doc_id>': View document content")?;
    writeln!(out, "  - 'quit': Exit search mode")?;
    writeln!(out, "{}", "-".repeat(50))
}

/// Read commands from `input` until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(index: &mut Index, input: R, out: &mut W, top_k: usize) -> io::Result<()> {
    write_banner(out)?;
    let mut lines = input.lines();
    loop {
        write!(out, "\nSearch> ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            writeln!(out, "\nGoodbye!")?;
            return Ok(());
        };
        match Command::parse(&line) {
            Command::Quit => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            Command::Stats => write_statistics(out, &index.get_statistics())?,
            Command::List => write_document_list(out, index)?,
            Command::View(id) => write_document(out, index, id)?,
            Command::Search(query) => {
                let hits = index.search(query, top_k);
                write_results(out, index, query, &hits)?;
            }
            Command::Empty => writeln!(out, "Please enter a search query or command.")?,
        }
    }
}
