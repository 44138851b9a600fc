use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use pitch_bend_tables::bend::{BendRange, PitchBendTable, PitchDeviation};
use pitch_bend_tables::config::{MAX_PRECISION, MidiChannelSpec, TablesConfig};
use pitch_bend_tables::formula::CentRange;
use pitch_bend_tables::midi::{BendMonitor, MidiHandler};
use pitch_bend_tables::report;

/// MIDI pitch bend lookup tables
#[derive(Parser, Debug)]
#[command(name = "pitch-bend-tables")]
#[command(about = "Generate and query MIDI pitch bend tables", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the deviation for every 14-bit value (default)
    Print {
        /// Bend range in semitones
        #[arg(short, long)]
        range: Option<f64>,

        /// Decimal places
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=MAX_PRECISION as i64))]
        precision: Option<u8>,
    },

    /// Print the deviation for one raw value
    Lookup {
        #[arg(allow_negative_numbers = true)]
        raw: i64,

        /// Bend range in semitones
        #[arg(short, long)]
        range: Option<f64>,
    },

    /// Print the raw value closest to a deviation in semitones
    Inverse {
        #[arg(allow_negative_numbers = true)]
        semitones: f64,

        /// Bend range in semitones
        #[arg(short, long)]
        range: Option<f64>,
    },

    /// Write MIDI 1.0 / MIDI 2.0 comparison CSVs, one per cent range
    Csv {
        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Ranges in cents (defaults to the configured list)
        #[arg(long, num_args = 1..)]
        cents: Vec<i64>,
    },

    /// Print incoming pitch bends from a MIDI input device
    Monitor {
        /// MIDI input device, by index or name
        #[arg(short, long)]
        device: Option<String>,

        /// MIDI channel 1-16 or "omni"
        #[arg(long)]
        channel: Option<MidiChannelSpec>,

        /// Initial bend range in semitones
        #[arg(short, long)]
        range: Option<f64>,
    },

    /// List available MIDI input devices and exit
    Devices,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    run(Args::parse())
}

/// Execute one invocation; an `Err` becomes a non-zero exit status
fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => TablesConfig::load(path)?,
        None => TablesConfig::default(),
    };

    match args.command.unwrap_or(Command::Print {
        range: None,
        precision: None,
    }) {
        Command::Print { range, precision } => {
            let range = resolve_range(range, &config)?;
            run_print(range, precision.map(usize::from).unwrap_or(config.precision))
        }
        Command::Lookup { raw, range } => {
            let table = PitchBendTable::from_range(resolve_range(range, &config)?);
            let deviation = table.lookup(raw)?;
            println!(
                "{} -> {:.*} semitones ({:.*} cents)",
                raw,
                config.precision,
                deviation.semitones(),
                config.precision,
                deviation.cents()
            );
            Ok(())
        }
        Command::Inverse { semitones, range } => {
            let table = PitchBendTable::from_range(resolve_range(range, &config)?);
            let raw = table.inverse(PitchDeviation::from_semitones(semitones));
            let (lsb, msb) = raw.to_data_bytes();
            println!(
                "{} semitones -> {} (0x{:04X}, lsb 0x{:02X} msb 0x{:02X}, actual {:.*})",
                semitones,
                raw,
                raw.get(),
                lsb,
                msb,
                config.precision,
                table.get(raw)
            );
            Ok(())
        }
        Command::Csv { out, cents } => {
            let dir = out.unwrap_or_else(|| config.csv.output_dir.clone());
            let ranges = if cents.is_empty() {
                config.csv.ranges()?
            } else {
                cents
                    .into_iter()
                    .map(CentRange::new)
                    .collect::<pitch_bend_tables::Result<Vec<_>>>()?
            };
            run_csv(&ranges, dir)
        }
        Command::Monitor {
            device,
            channel,
            range,
        } => {
            let device = device.unwrap_or_else(|| config.monitor.device.clone());
            let channel = channel.unwrap_or_else(|| config.monitor.midich.clone());
            let range = resolve_range(range, &config)?;
            run_monitor(&device, channel, range)
        }
        Command::Devices => {
            println!("Available MIDI Input Devices:");
            for (i, device) in MidiHandler::list_devices()?.iter().enumerate() {
                println!("  {}: {}", i, device);
            }
            Ok(())
        }
    }
}

/// Command line range wins over the config file
fn resolve_range(flag: Option<f64>, config: &TablesConfig) -> Result<BendRange> {
    match flag {
        Some(semitones) => BendRange::from_semitones(semitones).context("Invalid --range"),
        None => config.bend_range(),
    }
}

/// Print the full listing to stdout
fn run_print(range: BendRange, precision: usize) -> Result<()> {
    let table = PitchBendTable::from_range(range);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    report::write_listing(&table, precision, &mut out)?;
    Ok(())
}

/// Export one comparison CSV per range
fn run_csv(ranges: &[CentRange], dir: PathBuf) -> Result<()> {
    let written = report::export_tables(ranges, &dir)
        .with_context(|| format!("Failed to export tables to {}", dir.display()))?;
    info!("Exported {} tables", written.len());
    Ok(())
}

/// Connect to a MIDI input and print bends until interrupted
fn run_monitor(device: &str, channel: MidiChannelSpec, range: BendRange) -> Result<()> {
    let devices = MidiHandler::list_devices()?;
    let selected = MidiHandler::find_device(&devices, device)?;

    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let handler = MidiHandler::new_with_device(event_tx, selected, channel.filter())?;

    info!(
        "Monitoring {} ({:?}), default range {}; press Ctrl-C to stop",
        handler.port_name(),
        channel,
        range
    );

    let mut monitor = BendMonitor::new(range);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    monitor.run(event_rx, &mut out)?;
    out.flush()?;
    Ok(())
}
