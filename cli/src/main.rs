use anyhow::{Context, Result};
use clap::Parser;
use engine::loader::load_directory;
use engine::Index;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

mod render;
mod repl;

#[derive(Parser)]
#[command(name = "tfidf-search")]
#[command(about = "Search a directory of text files with TF-IDF ranking", long_about = None)]
struct Cli {
    /// Directory containing the .txt documents
    #[arg(long, default_value = "data")]
    data: String,
    /// Maximum number of results per query
    #[arg(long, default_value_t = 10)]
    top_k: usize,
    /// Print search results as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Run a single query and exit; starts the interactive mode when omitted
    query: Vec<String>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&cli, stdin.lock(), &mut stdout.lock())
}

/// One-shot search when a query was given, otherwise the interactive session
/// reading commands from `input`.
fn run<R: BufRead, W: Write>(cli: &Cli, input: R, out: &mut W) -> Result<()> {
    let interactive = cli.query.is_empty();
    if interactive {
        render::write_title(out)?;
    }

    let mut index = Index::new();
    if !load_documents(&mut index, Path::new(&cli.data), out)? {
        return Ok(());
    }

    if interactive {
        writeln!(out, "Building search index...")?;
        let _ = index.build_index();
        render::write_statistics(out, &index.get_statistics())?;
        repl::run(&mut index, input, out, cli.top_k)?;
    } else {
        let _ = index.build_index();
        let query = cli.query.join(" ");
        let hits = index.search(&query, cli.top_k);
        if cli.json {
            serde_json::to_writer_pretty(&mut *out, &hits)?;
            writeln!(out)?;
        } else {
            render::write_results(out, &index, &query, &hits)?;
        }
    }
    Ok(())
}

/// Returns false when there is nothing to search, after telling the user why.
fn load_documents<W: Write>(index: &mut Index, dir: &Path, out: &mut W) -> Result<bool> {
    if !dir.exists() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        writeln!(out, "Created {} directory. Please add your .txt files there.", dir.display())?;
        return Ok(false);
    }
    let count = load_directory(index, dir)?;
    if count == 0 {
        writeln!(out, "No documents found in {}/", dir.display())?;
        writeln!(out, "Please add some .txt files to the data directory.")?;
        return Ok(false);
    }
    writeln!(out, "Loaded {count} documents successfully!")?;
    Ok(true)
}
