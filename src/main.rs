use anyhow::{Result, anyhow};
use clap::Parser;
use dircmp::areas::comparison::{
    CompareOptions, Comparison, DEFAULT_LINE_LIMIT, DEFAULT_SIZE_LIMIT_MB,
};
use is_terminal::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dircmp",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Compare the files of two directories",
    long_about = "Checksums every file of two directories, lists the files whose content \
    differs in <dirA>-<dirB>/diff.csv and stores one artifact per differing file under \
    <dirA>-<dirB>/diffs: a unified diff when both sides have the file, a plain copy when \
    only one does. Files above the size limit are compared on their last lines only.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        long,
        default_value_t = DEFAULT_LINE_LIMIT,
        help = "Number of trailing lines compared for files above the size limit"
    )]
    lines: usize,
    #[arg(
        long = "size-mb",
        visible_alias = "size",
        default_value_t = DEFAULT_SIZE_LIMIT_MB,
        help = "Size limit in MiB above which only the last lines are compared"
    )]
    size_mb: u64,
    #[arg(long, help = "Reuse checksum snapshots from a previous run")]
    use_cache: bool,
    #[arg(long, help = "Print debug diagnostics to stderr")]
    debug: bool,
    #[arg(long, help = "Use the system tail and diff programs")]
    external_tools: bool,
    #[arg(index = 1, help = "First directory")]
    dir_a: PathBuf,
    #[arg(index = 2, help = "Second directory")]
    dir_b: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let options = CompareOptions::new(
        cli.lines,
        cli.size_mb,
        cli.use_cache,
        cli.debug,
        cli.external_tools,
    );

    dircmp::logging::init(options.debug).map_err(|e| anyhow!(e))?;
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let comparison = Comparison::new(
        &cli.dir_a,
        &cli.dir_b,
        options,
        Box::new(std::io::stdout()),
    );

    comparison.run()?;

    Ok(())
}
