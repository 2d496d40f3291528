use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use log::debug;

use pcaptool::{process_pcap, read_file_list, run_batch, CallbackSet, Mode};

/// Process libpcap files using callback functions
#[derive(Debug, Parser)]
#[command(name = "pcaptool", author, version, about, long_about = None)]
struct Cli {
    /// Log each decoded layer (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count packets in file(s)
    Count(Target),
    /// Process packets in file(s)
    Process(Target),
}

#[derive(Debug, Args)]
struct Target {
    /// PCAP file
    #[arg(required_unless_present = "file_list", conflicts_with = "file_list")]
    file: Option<PathBuf>,

    /// Newline-delimited list of PCAP files; `#` lines are skipped
    #[arg(short, long, value_name = "PATH")]
    file_list: Option<PathBuf>,
}

/// One log line per decoded layer.
fn logging_callbacks<'cb>() -> CallbackSet<'cb> {
    CallbackSet::new()
        .on_pcap(|frame| {
            debug!(
                "#{} {} caplen {} len {}",
                frame.id, frame.timestamp, frame.captured_length, frame.wire_length
            );
            ControlFlow::Continue(())
        })
        .on_ethernet(|eth| {
            debug!("  {eth}");
            ControlFlow::Continue(())
        })
        .on_ipv4(|ip| {
            debug!("  {ip}");
            ControlFlow::Continue(())
        })
        .on_ipv6(|ip| {
            debug!("  {ip}");
            ControlFlow::Continue(())
        })
        .on_tcp(|tcp| {
            debug!("  {tcp}");
            ControlFlow::Continue(())
        })
        .on_udp(|udp| {
            debug!("  {udp}");
            ControlFlow::Continue(())
        })
        .on_icmp(|icmp| {
            debug!("  {icmp}");
            ControlFlow::Continue(())
        })
        .on_data(|data| {
            debug!("  {data}");
            ControlFlow::Continue(())
        })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let (mode, target) = match cli.command {
        Command::Count(target) => (Mode::Count, target),
        Command::Process(target) => (Mode::Process, target),
    };
    let mut callbacks = match mode {
        Mode::Count => CallbackSet::new(),
        Mode::Process => logging_callbacks(),
    };

    if let Some(list) = target.file_list {
        let paths = read_file_list(&list)?;
        let mut out = io::stdout().lock();
        run_batch(&paths, mode, &mut callbacks, &mut out).context("writing batch report")?;
        return Ok(());
    }

    // clap requires `file` whenever `--file-list` is absent
    let file = target.file.context("Please provide a pcap filename.")?;
    match mode {
        Mode::Count => {
            let stats = process_pcap(&file, mode, &mut callbacks)?;
            println!("{}", stats.num_packets);
        }
        Mode::Process => {
            print!("Processing '{}': ", file.display());
            io::stdout().flush()?;
            let stats = process_pcap(&file, mode, &mut callbacks)?;
            println!("\n{} packets processed", stats.num_packets);
            println!("{stats}");
        }
    }

    Ok(())
}
