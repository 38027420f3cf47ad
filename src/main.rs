use clap::Parser;
use feedpage::config::RenderConfig;
use feedpage::{assets, convert, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "feedpage")]
#[command(about = "Convert Atom feed archives into static HTML pages")]
#[command(long_about = "\
Convert Atom feed archives into static HTML pages

Each input file is streamed once and split into pages, one entry per page
by default. With -n, entries are grouped into collapsible batches; with
-t, entries outside a publish-date prefix are dropped. Pages reference a
style.css and jquery.js copied next to them.

Per-file problems (unreadable input, malformed XML) are reported and skip
that file only; the rest of the run continues.")]
#[command(version)]
struct Cli {
    /// Include author & publish date in the generated pages
    #[arg(short = 'a', long)]
    author: bool,

    /// Insert a horizontal rule before the entry content
    #[arg(long, visible_alias = "hb")]
    hr_before: bool,

    /// Append a horizontal rule after the entry content
    #[arg(long, visible_alias = "ha")]
    hr_after: bool,

    /// Entries per output file (0 = one file for the whole feed)
    #[arg(short = 'n', long, default_value_t = 1, value_name = "COUNT")]
    per_file: usize,

    /// Text for the original-post link (no link when omitted)
    #[arg(short = 'l', long, value_name = "TEXT")]
    link_text: Option<String>,

    /// Stylesheet to bundle instead of the built-in one
    #[arg(short = 's', long, value_name = "CSS")]
    style: Option<PathBuf>,

    /// Output directory, created if absent
    #[arg(short = 'o', long, default_value = ".", value_name = "DIR")]
    output: PathBuf,

    /// Only convert entries whose publish date starts with this prefix
    #[arg(short = 't', long, value_name = "PREFIX")]
    time_filter: Option<String>,

    /// Feed-archive XML files to convert
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.output)
        .map_err(|err| format!("can not create directory {}: {err}", cli.output.display()))?;

    if let Err(err) = assets::install(&cli.output, cli.style.as_deref()) {
        eprintln!("{err}");
    }

    let config = RenderConfig {
        write_author: cli.author,
        hr_before: cli.hr_before,
        hr_after: cli.hr_after,
        per_file: cli.per_file,
        link_text: cli.link_text.filter(|text| !text.is_empty()),
        stylesheet: assets::stylesheet_name(cli.style.as_deref()),
        output_dir: cli.output,
        time_filter: cli.time_filter,
    };

    for file in &cli.files {
        match convert::convert(file, &config) {
            Ok(summary) => output::print_file_summary(file, &summary),
            Err(err) => eprintln!("{err}"),
        }
    }

    Ok(())
}
