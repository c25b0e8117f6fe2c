use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for cachesim")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all CI checks (fmt, clippy, build, test)
    Ci {
        #[arg(long)]
        verbose: bool,
    },
    /// Quick checks before commit (fmt, clippy)
    Check {
        #[arg(long)]
        verbose: bool,
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
    /// Build the project
    Build {
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        #[arg(long)]
        doc: bool,
        /// Run only ISA (decode/address) tests
        #[arg(long)]
        isa: bool,
        /// Run only cache tests
        #[arg(long)]
        cache: bool,
        /// Run only access engine tests
        #[arg(long)]
        engine: bool,
        /// Run only trace/simulator tests
        #[arg(long)]
        trace: bool,
    },
    /// Run benchmarks
    Bench,
    /// Replay a trace file through the simulator binary
    Replay {
        /// Trace file (defaults to input_file.txt)
        #[arg(default_value = "input_file.txt")]
        trace_path: String,
        /// Print registers and memory as well as the cache
        #[arg(long)]
        full: bool,
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Pre-commit hook (fmt, clippy, test)
    PreCommit,
    /// Install git hooks
    InstallHooks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { verbose } => run_ci(verbose),
        Commands::Check { verbose } => run_check(verbose),
        Commands::Fmt { check } => run_fmt(check),
        Commands::Clippy { fix } => run_clippy(fix),
        Commands::Build { release } => run_build(release),
        Commands::Test {
            doc,
            isa,
            cache,
            engine,
            trace,
        } => run_test(doc, isa, cache, engine, trace),
        Commands::Bench => run_bench(),
        Commands::Replay {
            trace_path,
            full,
            release,
        } => run_replay(&trace_path, full, release),
        Commands::PreCommit => run_pre_commit(),
        Commands::InstallHooks => install_hooks(),
    }
}

/// A named step in a check pipeline
type Step = (&'static str, fn() -> Result<()>);

const QUICK_STEPS: &[Step] = &[("fmt --check", fmt_check), ("clippy", clippy_strict)];

const CI_STEPS: &[Step] = &[
    ("fmt --check", fmt_check),
    ("clippy", clippy_strict),
    ("build", build_debug),
    ("test", test_all),
];

const PRE_COMMIT_STEPS: &[Step] = &[
    ("fmt --check", fmt_check),
    ("clippy", clippy_strict),
    ("test", test_all),
];

fn run_ci(verbose: bool) -> Result<()> {
    run_pipeline("CI", CI_STEPS, verbose)
}

fn run_check(verbose: bool) -> Result<()> {
    run_pipeline("quick checks", QUICK_STEPS, verbose)
}

fn run_pre_commit() -> Result<()> {
    run_pipeline("pre-commit", PRE_COMMIT_STEPS, false)
}

/// Run steps in order, stopping at the first failure
fn run_pipeline(title: &str, steps: &[Step], verbose: bool) -> Result<()> {
    println!("{}", format!("=== cachesim {} ===", title).bold().blue());
    let start = Instant::now();

    for (name, step) in steps {
        run_task(name, *step, verbose)?;
    }

    println!(
        "\n{} {} passed in {}",
        "✓".green().bold(),
        title,
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn fmt_check() -> Result<()> {
    run_fmt(true)
}

fn clippy_strict() -> Result<()> {
    run_clippy(false)
}

fn build_debug() -> Result<()> {
    run_build(false)
}

fn test_all() -> Result<()> {
    run_test(false, false, false, false, false)
}

/// `cargo <args...>` with inherited stdio
fn cargo(args: &[&str]) -> Result<()> {
    execute_command(Command::new("cargo").args(args))
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
        cargo(&["clippy", "--all-targets", "--fix", "--allow-dirty"])
    } else {
        cargo(&["clippy", "--all-targets", "--", "-D", "warnings"])
    }
}

fn run_build(release: bool) -> Result<()> {
    if release {
        cargo(&["build", "--workspace", "--release"])
    } else {
        cargo(&["build", "--workspace"])
    }
}

fn run_test(doc: bool, isa: bool, cache: bool, engine: bool, trace: bool) -> Result<()> {
    if doc {
        return cargo(&["test", "--doc"]);
    }

    let modules = [
        (isa, "core::isa", "ISA"),
        (cache, "core::cache", "Cache"),
        (engine, "core::engine", "Engine"),
        (trace, "core::trace", "Trace"),
        (trace, "core::simulator", "Simulator"),
    ];
    let module_count = modules.iter().filter(|(enabled, _, _)| *enabled).count();

    if module_count == 0 {
        return cargo(&["test", "--workspace"]);
    }

    let mut all_success = true;

    for (enabled, module_path, module_name) in modules {
        if !enabled {
            continue;
        }

        println!("{} Running {} tests...", "→".blue(), module_name.bold());

        match cargo(&["test", "--lib", module_path]) {
            Ok(_) => {
                println!("{} {} tests passed\n", "✓".green(), module_name);
            }
            Err(e) => {
                println!("{} {} tests failed\n", "✗".red(), module_name);
                all_success = false;
                if module_count == 1 {
                    return Err(e);
                }
            }
        }
    }

    if all_success {
        Ok(())
    } else {
        anyhow::bail!("Some module tests failed")
    }
}

fn run_bench() -> Result<()> {
    cargo(&["bench", "--bench", "engine_bench"])
}

fn run_replay(trace_path: &str, full: bool, release: bool) -> Result<()> {
    use std::fs;
    use std::path::Path;

    println!("{}", "=== Trace Replay ===".bold().blue());

    let path = Path::new(trace_path);
    if !path.exists() {
        println!(
            "{} Trace file not found: {}",
            "✗".red().bold(),
            trace_path.yellow()
        );
        println!(
            "\n{} Expected one 32-character binary instruction per line.",
            "ℹ".blue()
        );
        anyhow::bail!("Trace file not found");
    }

    let lines = fs::read_to_string(path)?
        .lines()
        .filter(|l| !l.trim().is_empty())
        .count();

    println!("{} Trace file: {}", "✓".green(), trace_path.cyan());
    println!("{} Instructions: {}", "→".blue(), lines.to_string().bold());
    println!(
        "{} Build mode: {}",
        "→".blue(),
        if release {
            "release".green().bold()
        } else {
            "debug".yellow().bold()
        }
    );
    println!();

    let start = Instant::now();

    let mut args = vec!["run", "--bin", "cachesim"];
    if release {
        args.push("--release");
    }
    args.extend(["--", trace_path, "--stats"]);
    if full {
        args.extend(["--registers", "--memory"]);
    }

    cargo(&args).inspect_err(|_| println!("\n{} Trace replay failed", "✗".red().bold()))?;

    let elapsed = start.elapsed();
    println!(
        "\n{} Trace replay completed in {}",
        "✓".green().bold(),
        format!("{:.2}s", elapsed.as_secs_f64()).bold()
    );

    Ok(())
}

const PRE_COMMIT_HOOK: &str = "#!/bin/sh
# Installed by `cargo x install-hooks`
exec cargo x pre-commit
";

fn install_hooks() -> Result<()> {
    use std::fs;
    use std::path::Path;

    let hooks = Path::new(".git/hooks");
    if !hooks.is_dir() {
        anyhow::bail!("{} not found; run from the repository root", hooks.display());
    }

    let hook = hooks.join("pre-commit");
    fs::write(&hook, PRE_COMMIT_HOOK)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&hook, fs::Permissions::from_mode(0o755))?;
    }

    println!("{} Installed {}", "✓".green(), hook.display().to_string().cyan());
    Ok(())
}

fn run_task(name: &str, task: fn() -> Result<()>, verbose: bool) -> Result<()> {
    print!("{} {} ... ", "→".blue(), name);
    let start = Instant::now();

    if let Err(e) = task() {
        println!("{}", "✗".red().bold());
        return Err(e);
    }

    if verbose {
        println!("{} ({:.2}s)", "✓".green().bold(), start.elapsed().as_secs_f64());
    } else {
        println!("{}", "✓".green().bold());
    }
    Ok(())
}

fn execute_command(cmd: &mut Command) -> Result<()> {
    let status = cmd
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("Command failed with exit code: {}", status);
    }

    Ok(())
}
