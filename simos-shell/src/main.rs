use anyhow::{Context, Result};
use clap::Parser;
use simos_shell::banner::greeting;
use simos_shell::config::CliArgs;
use simos_shell::launcher::SystemLauncher;
use simos_shell::{repl, Session};
use simos_vfs::RootedFs;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Logs go to stderr; stdout belongs to the prompt
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let fs = RootedFs::open(&args.root)
        .with_context(|| format!("cannot open root directory {}", args.root.display()))?;
    tracing::info!(root = %fs.root().display(), "Filesystem root ready");

    let config = args.shell_config();
    println!("{}", greeting(&config.version, fs.root(), !args.no_banner));

    let mut session = Session::new(fs, config, Box::new(SystemLauncher));
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout)?;
    Ok(())
}
