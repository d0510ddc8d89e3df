//! vpxdec - Command-line inspection of raw VP8 frames.

use clap::{Parser, Subcommand};

mod commands;

use commands::CmdInfo;

/// Command-line arguments for the vpxdec tool.
#[derive(Parser, Debug)]
#[command(name = "vpxdec")]
#[command(version)]
#[command(about = "Inspect raw VP8 frames")]
#[command(long_about = "vpxdec parses raw VP8 frames (no container) and reports their\n\
    headers, macroblock grid and first-partition status.\n\n\
    EXAMPLES:\n    \
    vpxdec info frame0.vp8\n    \
    vpxdec info frame0.vp8 frame1.vp8 frame2.vp8 --json\n    \
    vpxdec --verbose info key.vp8 --max-width 1920 --max-height 1080")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode frame headers and report frame geometry
    Info(CmdInfo),
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match args.command {
        Command::Info(cmd) => cmd.run(),
    }
}
