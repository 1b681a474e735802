//! Maintenance tasks for rustdoc sidebar data

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use libsidebar::{LoadReport, Loader, SIDEBAR_FILE_NAME, SidebarIndex, kinds};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for libsidebar")]
/// Command-line interface entry point for the `xtask` binary.
struct Cli {
    /// Name of the per-module sidebar file
    #[arg(long, global = true, default_value = SIDEBAR_FILE_NAME)]
    file_name: String,

    /// Subcommand dispatched by the CLI.
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
/// Supported automation commands.
enum Commands {
    /// Load every sidebar under a rustdoc output directory and report broken modules
    Check {
        /// Documentation root, e.g. target/doc
        root: PathBuf,

        /// Load modules one at a time
        #[arg(long)]
        serial: bool,
    },

    /// Print the sidebar of one module
    Show {
        /// Documentation root, e.g. target/doc
        root: PathBuf,

        /// Module path, e.g. tokio::task
        module: String,

        /// Only print this category
        #[arg(long)]
        category: Option<String>,
    },

    /// List every module that exposes an item with the given name
    Find {
        /// Documentation root, e.g. target/doc
        root: PathBuf,

        /// Item name to look up
        name: String,
    },

    /// Bundle every sidebar under a documentation root into one JSON document
    Bundle {
        /// Documentation root, e.g. target/doc
        root: PathBuf,

        /// Write the document to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI and dispatch to the selected subcommand.
fn main() -> ExitCode {
    // Only initialize tracing if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let loader = Loader::new().with_file_name(cli.file_name.as_str());
    let result = match cli.command {
        Commands::Check { root, serial } => check(&loader.with_parallel(!serial), &root),
        Commands::Show {
            root,
            module,
            category,
        } => show(&loader, &root, &module, category.as_deref()),
        Commands::Find { root, name } => find(&loader, &root, &name),
        Commands::Bundle { root, output } => bundle(&loader, &root, output.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Print a summary line per module, then each failure; fail if any module is broken.
fn check(loader: &Loader, root: &Path) -> Result<ExitCode, Box<dyn Error>> {
    let report = loader.load_dir(root)?;

    for index in report.registry.iter() {
        let counts: Vec<String> = index
            .sections()
            .map(|(category, entries)| format!("{category}={}", entries.len()))
            .collect();
        println!("{}: {}", index.module(), counts.join(", "));
    }
    report_failures(&report);

    println!(
        "{} modules loaded, {} failed",
        report.registry.len(),
        report.failures.len()
    );
    Ok(if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Render one module's sidebar as labelled sections.
fn show(
    loader: &Loader,
    root: &Path,
    module: &str,
    category: Option<&str>,
) -> Result<ExitCode, Box<dyn Error>> {
    let index = loader.load_file(root, &loader.sidebar_path(root, module))?;

    match category {
        Some(category) => print_section(&index, category),
        None => {
            for category in index.categories() {
                print_section(&index, category);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Print a single category heading and its entries.
fn print_section(index: &SidebarIndex, category: &str) {
    println!("{}", kinds::label(category));
    for entry in index.entries_for(category) {
        if entry.has_summary() {
            println!("    {:<32} {}", entry.name(), entry.summary());
        } else {
            println!("    {}", entry.name());
        }
    }
}

/// Locate a name across every loaded module.
fn find(loader: &Loader, root: &Path, name: &str) -> Result<ExitCode, Box<dyn Error>> {
    let report = loader.load_dir(root)?;
    report_failures(&report);

    let mut found = false;
    for (module, hit) in report.registry.locate(name) {
        found = true;
        println!("{module}::{} ({}) {}", hit.name(), hit.category, hit.summary());
    }
    Ok(if found {
        ExitCode::SUCCESS
    } else {
        eprintln!("{name} not found");
        ExitCode::FAILURE
    })
}

/// Write the registry document for a documentation root.
fn bundle(loader: &Loader, root: &Path, output: Option<&Path>) -> Result<ExitCode, Box<dyn Error>> {
    let report = loader.load_dir(root)?;
    report_failures(&report);

    let document = report.registry.to_json()?;
    match output {
        Some(path) => {
            fs::write(path, document)?;
            eprintln!("Wrote {} modules to {}", report.registry.len(), path.display());
        }
        None => println!("{}", String::from_utf8(document)?),
    }
    Ok(ExitCode::SUCCESS)
}

/// Print load failures to stderr.
fn report_failures(report: &LoadReport) {
    for failure in &report.failures {
        eprintln!("{}: {}", failure.source, failure.error);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn file_name_applies_to_every_command() {
        let cases: [&[&str]; 4] = [
            &["xtask", "check", "docs", "--file-name", "items.js"],
            &["xtask", "show", "docs", "tokio::task", "--file-name", "items.js"],
            &["xtask", "--file-name", "items.js", "find", "docs", "spawn"],
            &["xtask", "bundle", "docs", "--file-name", "items.js", "-o", "out.json"],
        ];
        for args in cases {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.file_name, "items.js", "{args:?}");
        }
        let cli = Cli::try_parse_from(["xtask", "find", "docs", "spawn"]).unwrap();
        assert_eq!(cli.file_name, SIDEBAR_FILE_NAME);
    }
}
