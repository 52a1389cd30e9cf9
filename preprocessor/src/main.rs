use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

/// Field separator in the corpus output, kept in sync with the core parser.
const FIELD_DELIMITER: char = '\u{3}';

#[derive(Parser)]
#[command(name = "preprocessor")]
#[command(about = "Convert a directory of HTML documents into a delimited corpus file", long_about = None)]
struct Args {
    /// Directory to scan recursively for .html files
    #[arg(long)]
    input: String,
    /// Corpus file to write, one document per line
    #[arg(long)]
    output: String,
    /// URL prefix joined with each file's path relative to the input dir
    #[arg(long, default_value = "https://www.boost.org/doc/libs/1_53_0/doc/")]
    url_prefix: String,
}

struct DocInfo {
    title: String,
    url: String,
    content: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    run(Path::new(&args.input), Path::new(&args.output), &args.url_prefix)
}

fn run(input: &Path, output: &Path, url_prefix: &str) -> Result<()> {
    let files = enumerate_html(input)?;
    tracing::info!(count = files.len(), "found html files");

    let out = File::create(output)
        .with_context(|| format!("creating corpus file {}", output.display()))?;
    let mut writer = BufWriter::new(out);
    let mut written = 0usize;
    for path in &files {
        match parse_file(input, path, url_prefix) {
            Ok(doc) => {
                write_record(&mut writer, &doc)?;
                written += 1;
            }
            Err(err) => {
                tracing::warn!(file = %path.display(), %err, "skipping document");
            }
        }
    }
    writer.flush()?;
    tracing::info!(written, output = %output.display(), "corpus written");
    Ok(())
}

fn enumerate_html(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.is_dir() {
        bail!("input directory {} does not exist", input.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("html") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn parse_file(input_root: &Path, path: &Path, url_prefix: &str) -> Result<DocInfo> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let title = parse_title(&html).context("no <title> element")?;
    let url = derive_url(input_root, path, url_prefix)?;
    let content = strip_markup(&html);
    Ok(DocInfo { title, url, content })
}

fn parse_title(html: &str) -> Option<String> {
    let begin = html.find("<title>")? + "<title>".len();
    let end = html[begin..].find("</title>")? + begin;
    Some(html[begin..end].trim().to_string())
}

/// Map a local file path to its canonical online URL: the configured prefix
/// plus the path relative to the input root.
fn derive_url(input_root: &Path, path: &Path, url_prefix: &str) -> Result<String> {
    let rel = path
        .strip_prefix(input_root)
        .with_context(|| format!("{} is outside the input directory", path.display()))?;
    let mut url = String::from(url_prefix);
    for (i, part) in rel.iter().enumerate() {
        if i > 0 {
            url.push('/');
        }
        url.push_str(&part.to_string_lossy());
    }
    Ok(url)
}

/// Drop everything between `<` and `>`, collapse newlines to spaces, and
/// strip any literal field delimiter. The corpus format has no escaping, so
/// a delimiter inside content would corrupt the record downstream.
fn strip_markup(html: &str) -> String {
    let mut content = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
            }
            continue;
        }
        match ch {
            '<' => in_tag = true,
            '\n' | '\r' => content.push(' '),
            FIELD_DELIMITER => {}
            other => content.push(other),
        }
    }
    content
}

fn write_record(writer: &mut impl Write, doc: &DocInfo) -> Result<()> {
    let title = sanitize_field(&doc.title);
    let url = sanitize_field(&doc.url);
    writeln!(
        writer,
        "{title}{FIELD_DELIMITER}{url}{FIELD_DELIMITER}{content}",
        content = doc.content
    )?;
    Ok(())
}

fn sanitize_field(field: &str) -> String {
    field
        .replace(FIELD_DELIMITER, "")
        .replace(['\n', '\r'], " ")
}
