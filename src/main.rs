use clap::Parser;
use colored::Colorize;
use dir_explorer::hierarchy::Hierarchy;
use dir_explorer::ordering::SortMode;
use dir_explorer::render::{self, RenderOptions};
use dir_explorer::scanner::{self, ScanOptions};
use log::warn;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "List a directory tree with size and modification time", long_about = None)]
struct Args {
    /// Directory to scan (defaults to the current directory)
    root: Option<PathBuf>,

    /// Ordering applied within each level
    #[arg(long, value_enum, default_value_t = SortMode::Legacy)]
    sort: SortMode,

    /// Descend into symlinked directories
    #[arg(long, short = 'L')]
    follow_links: bool,

    /// Print sizes as human readable units instead of bytes
    #[arg(long, short = 'H')]
    human: bool,

    /// Deepest level to print (0 = top level only)
    #[arg(long, short = 'd', value_name = "N")]
    max_depth: Option<usize>,

    /// Do not print the totals line
    #[arg(long)]
    no_summary: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let root = match &args.root {
        Some(root) => root.clone(),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                eprintln!("Error: Could not determine current directory: {e}");
                std::process::exit(1);
            }
        },
    };

    if !root.is_dir() {
        warn!("{:?} is not a readable directory, nothing to list", root);
    }

    println!("{}", format!("=== {} ===", root.display()).cyan());

    let options = ScanOptions {
        follow_links: args.follow_links,
    };
    let entries = match scanner::spawn_scan(root.clone(), options).join() {
        Ok(entries) => entries,
        Err(_) => {
            eprintln!("Error during directory scan");
            std::process::exit(1);
        }
    };

    let hierarchy = Hierarchy::build_with(entries, &root, args.sort);

    render::print_hierarchy(
        &hierarchy,
        &RenderOptions {
            human_sizes: args.human,
            max_depth: args.max_depth,
        },
    );

    if !args.no_summary {
        render::print_summary(&hierarchy);
    }
}
