//! Workspace automation tasks.
//!
//! Run with: `cargo xtask <command>`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::Command;

const CRATE_PREFIX: &str = "heroku-";

#[derive(Parser)]
#[command(name = "xtask", about = "Heroku API client workspace automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks locally
    Ci,
    /// Validate workspace conventions
    Lint,
    /// Generate coverage report
    Coverage,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => run_ci(),
        Commands::Lint => run_lint(Path::new("crates")),
        Commands::Coverage => run_coverage(),
    }
}

fn run_ci() -> Result<()> {
    println!("Running CI checks...\n");

    run_cmd("cargo", &["fmt", "--check"])?;
    run_cmd("cargo", &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    run_cmd("cargo", &["test", "--workspace"])?;
    run_cmd("cargo", &["doc", "--workspace", "--no-deps"])?;
    run_lint(Path::new("crates"))?;

    println!("\nAll CI checks passed!");
    Ok(())
}

fn run_lint(crates_dir: &Path) -> Result<()> {
    println!("Validating workspace conventions...\n");

    let mut problems = Vec::new();
    for entry in std::fs::read_dir(crates_dir)
        .with_context(|| format!("Failed to read {}", crates_dir.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            problems.extend(check_crate(&entry.path())?);
        }
    }

    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("  {problem}");
        }
        anyhow::bail!("{} convention violation(s)", problems.len());
    }

    println!("All conventions validated!");
    Ok(())
}

/// Conventions every member crate follows: `heroku-*` naming, workspace
/// version inheritance, and no unsafe code.
fn check_crate(dir: &Path) -> Result<Vec<String>> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut problems = Vec::new();

    if !name.starts_with(CRATE_PREFIX) {
        problems.push(format!("Crate '{name}' does not follow {CRATE_PREFIX}* naming"));
    }

    let manifest = std::fs::read_to_string(dir.join("Cargo.toml"))
        .with_context(|| format!("Crate '{name}' has no Cargo.toml"))?;
    if !manifest.contains("version.workspace = true") {
        problems.push(format!("Crate '{name}' does not inherit the workspace version"));
    }

    let lib = dir.join("src").join("lib.rs");
    if lib.exists() {
        let source = std::fs::read_to_string(&lib)?;
        if !source.contains("#![forbid(unsafe_code)]") {
            problems.push(format!("Crate '{name}' lib.rs is missing #![forbid(unsafe_code)]"));
        }
    }

    Ok(problems)
}

fn run_coverage() -> Result<()> {
    run_cmd("cargo", &["llvm-cov", "--workspace", "--html"])?;
    println!("\nCoverage report: target/llvm-cov/html/index.html");
    Ok(())
}

fn run_cmd(cmd: &str, args: &[&str]) -> Result<()> {
    println!("$ {} {}", cmd, args.join(" "));
    let status = Command::new(cmd)
        .args(args)
        .status()
        .with_context(|| format!("Failed to run: {} {}", cmd, args.join(" ")))?;

    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_crate(name: &str, manifest: &str, lib: &str) -> std::path::PathBuf {
        let root = std::env::temp_dir().join(format!("xtask-lint-{}-{name}", std::process::id()));
        let dir = root.join(name);
        std::fs::create_dir_all(dir.join("src")).unwrap();
        std::fs::write(dir.join("Cargo.toml"), manifest).unwrap();
        std::fs::write(dir.join("src").join("lib.rs"), lib).unwrap();
        dir
    }

    #[test]
    fn conforming_crate_has_no_problems() {
        let dir = scratch_crate(
            "heroku-good",
            "[package]\nversion.workspace = true\n",
            "#![forbid(unsafe_code)]\n",
        );
        assert!(check_crate(&dir).unwrap().is_empty());
    }

    #[test]
    fn each_violation_is_reported() {
        let dir = scratch_crate("other", "[package]\nversion = \"0.1.0\"\n", "");
        let problems = check_crate(&dir).unwrap();
        assert_eq!(problems.len(), 3, "{problems:?}");
    }
}
