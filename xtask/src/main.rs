use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for mipscore")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the CI pipeline (fmt, clippy, test)
    Ci {
        #[arg(long)]
        verbose: bool,
        /// Skip the test stage
        #[arg(long)]
        quick: bool,
    },
    /// Format code
    Fmt {
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy {
        #[arg(long)]
        fix: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        #[command(flatten)]
        filter: ModuleFilter,
    },
    /// Run benchmarks
    Bench,
    /// Disassemble a raw image with mipsdump
    Dump {
        /// Path to the raw image file
        image: PathBuf,
        /// Byte order of the image
        #[arg(short = 'e', long, value_parser = ["big", "little"], default_value = "big")]
        byte_order: String,
        /// Address of the first word, hex
        #[arg(short = 'b', long)]
        base: Option<String>,
        /// Number of words to disassemble
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose, quick } => run_ci(verbose, quick),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Test { doc, filter } => run_test(doc, filter),
        Commands::Bench => cargo(&["bench"]),
        Commands::Dump {
            image,
            byte_order,
            base,
            count,
        } => run_dump(&image, &byte_order, base.as_deref(), count),
    }
}

fn run_ci(verbose: bool, quick: bool) -> Result<()> {
    println!("{}", "=== Running CI Pipeline ===".bold().blue());

    let start = Instant::now();

    run_task("Format Check", || run_fmt(true), verbose)?;
    run_task("Clippy", || run_clippy(false), verbose)?;
    if !quick {
        run_task(
            "Test",
            || run_test(false, ModuleFilter::default()),
            verbose,
        )?;
    }

    println!(
        "\n{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );

    Ok(())
}

fn run_fmt(check: bool) -> Result<()> {
    if check {
        cargo(&["fmt", "--all", "--", "--check"])
    } else {
        cargo(&["fmt", "--all"])
    }
}

fn run_clippy(fix: bool) -> Result<()> {
    if fix {
        cargo(&["clippy", "--all-targets", "--fix"])
    } else {
        cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])
    }
}

/// Module test selection for `cargo x test`
#[derive(Args, Default, Clone, Copy)]
struct ModuleFilter {
    /// Run only instruction view/builder tests
    #[arg(long)]
    instruction: bool,
    /// Run only processor tests
    #[arg(long)]
    cpu: bool,
    /// Run only memory tests
    #[arg(long)]
    memory: bool,
    /// Run only configuration tests
    #[arg(long)]
    config: bool,
}

impl ModuleFilter {
    /// Library module paths selected, in run order
    fn selected(self) -> Vec<&'static str> {
        [
            (self.instruction, "core::instruction"),
            (self.cpu, "core::cpu"),
            (self.memory, "core::memory"),
            (self.config, "core::config"),
        ]
        .into_iter()
        .filter_map(|(enabled, path)| enabled.then_some(path))
        .collect()
    }
}

fn run_test(doc: bool, filter: ModuleFilter) -> Result<()> {
    if doc {
        return cargo(&["test", "--doc"]);
    }

    let modules = filter.selected();
    if modules.is_empty() {
        return cargo(&["test"]);
    }

    let mut failed = Vec::new();
    for module in modules {
        println!("{} Running {} tests...", "→".blue(), module.bold());
        match cargo(&["test", "--lib", module]) {
            Ok(()) => println!("{} {} passed\n", "✓".green(), module),
            Err(_) => {
                println!("{} {} failed\n", "✗".red(), module);
                failed.push(module);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Module tests failed: {}", failed.join(", "))
    }
}

fn run_dump(
    image: &Path,
    byte_order: &str,
    base: Option<&str>,
    count: Option<usize>,
) -> Result<()> {
    if !image.exists() {
        anyhow::bail!("Image file not found: {}", image.display());
    }

    println!(
        "{} {} ({}-endian)",
        "→".blue(),
        image.display().to_string().cyan(),
        byte_order
    );

    let image = image.to_string_lossy();
    let count = count.map(|n| n.to_string());

    let mut args = vec!["run", "--quiet", "--bin", "mipsdump", "--"];
    args.extend([&*image, "--byte-order", byte_order]);
    if let Some(base) = base {
        args.extend(["--base", base]);
    }
    if let Some(count) = count.as_deref() {
        args.extend(["--count", count]);
    }

    cargo(&args)
}

fn run_task<F>(name: &str, task: F, verbose: bool) -> Result<()>
where
    F: FnOnce() -> Result<()>,
{
    print!("{} {} ... ", "→".blue(), name);

    let start = Instant::now();

    match task() {
        Ok(_) => {
            let elapsed = start.elapsed();
            println!(
                "{} {}",
                "✓".green().bold(),
                if verbose {
                    format!("({:.2}s)", elapsed.as_secs_f64())
                } else {
                    String::new()
                }
            );
            Ok(())
        }
        Err(e) => {
            println!("{}", "✗".red().bold());
            Err(e)
        }
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed: {}", args.join(" "), status);
    }

    Ok(())
}
