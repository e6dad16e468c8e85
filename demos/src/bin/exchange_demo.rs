//! Exchange Demo
//!
//! Builds a small grid with a few layers, runs one exchange command on it and
//! logs the target layer before and after.
//!
//! ```bash
//! cargo run --bin exchange_demo -- weight-to-color --mask r --keep-others
//! cargo run --bin exchange_demo -- color-to-weight --mask rg --representative average
//! cargo run --bin exchange_demo -- auto-level --formula conventional --undo
//! ```

use clap::{Parser, Subcommand, ValueEnum};

use wcex_core::edit::EditHistory;
use wcex_core::{
    AutoLevelParams, Channel, ChannelCopyParams, ChannelMask, ColorToWeightParams,
    ExchangeCommand, ExchangeResult, LayerKind, LevelFormula, RepresentativeColor,
    WeightCopyParams, WeightToColorParams,
};
use wcex_demos::{EMPTY_LAYER, GRADIENT_LAYER, PAINT_LAYER, WHITE_LAYER, demo_mesh, describe_layer};

/// Vertex weight and vertex color exchange on a generated grid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of quads along each side of the grid.
    #[arg(long, default_value_t = 2)]
    size: usize,

    /// Undo the command afterwards and log the restored layer.
    #[arg(long)]
    undo: bool,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Copy vertex weights into loop color channels.
    WeightToColor {
        #[arg(long, default_value = GRADIENT_LAYER)]
        weight: String,
        #[arg(long, default_value = WHITE_LAYER)]
        color: String,
        /// Channels receiving the weight, e.g. `rgb`, `ra`.
        #[arg(long, default_value = "rgb")]
        mask: ChannelMask,
        /// Keep unselected channels instead of zeroing them.
        #[arg(long)]
        keep_others: bool,
    },
    /// Average loop color channels into vertex weights.
    ColorToWeight {
        #[arg(long, default_value = PAINT_LAYER)]
        color: String,
        #[arg(long, default_value = EMPTY_LAYER)]
        weight: String,
        /// Channels to average, e.g. `rgb`, `rg`.
        #[arg(long, default_value = "rgb")]
        mask: ChannelMask,
        #[arg(long, value_enum, default_value_t = CliRepresentative::Last)]
        representative: CliRepresentative,
    },
    /// Rescale a weight layer by its min-max range.
    AutoLevel {
        #[arg(long, default_value = GRADIENT_LAYER)]
        weight: String,
        #[arg(long, value_enum, default_value_t = CliFormula::Literal)]
        formula: CliFormula,
    },
    /// Copy one weight layer onto another.
    CopyWeight {
        #[arg(long, default_value = GRADIENT_LAYER)]
        source: String,
        #[arg(long, default_value = EMPTY_LAYER)]
        target: String,
    },
    /// Copy one color channel onto another.
    CopyChannel {
        #[arg(long, default_value = PAINT_LAYER)]
        source: String,
        #[arg(long, default_value = "r")]
        from: Channel,
        #[arg(long, default_value = WHITE_LAYER)]
        target: String,
        #[arg(long, default_value = "a")]
        to: Channel,
    },
}

/// Loop collapsing policy for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliRepresentative {
    /// Color of the last loop of each vertex.
    Last,
    /// Color of the first loop of each vertex.
    First,
    /// Mean color over all loops of each vertex.
    Average,
}

impl From<CliRepresentative> for RepresentativeColor {
    fn from(value: CliRepresentative) -> Self {
        match value {
            CliRepresentative::Last => Self::Last,
            CliRepresentative::First => Self::First,
            CliRepresentative::Average => Self::Average,
        }
    }
}

/// Auto-level formula for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliFormula {
    /// `value / (max - min) - min`
    Literal,
    /// `(value - min) / (max - min)`
    Conventional,
}

impl From<CliFormula> for LevelFormula {
    fn from(value: CliFormula) -> Self {
        match value {
            CliFormula::Literal => Self::Literal,
            CliFormula::Conventional => Self::Conventional,
        }
    }
}

impl From<Mode> for ExchangeCommand {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::WeightToColor {
                weight,
                color,
                mask,
                keep_others,
            } => WeightToColorParams::new(weight, color)
                .with_mask(mask)
                .with_clean_others(!keep_others)
                .into(),
            Mode::ColorToWeight {
                color,
                weight,
                mask,
                representative,
            } => ColorToWeightParams::new(color, weight)
                .with_mask(mask)
                .with_representative(representative.into())
                .into(),
            Mode::AutoLevel { weight, formula } => AutoLevelParams::new(weight)
                .with_formula(formula.into())
                .into(),
            Mode::CopyWeight { source, target } => WeightCopyParams::new(source, target).into(),
            Mode::CopyChannel {
                source,
                from,
                target,
                to,
            } => ChannelCopyParams::new(source, from, target, to).into(),
        }
    }
}

fn run(args: Args) -> ExchangeResult {
    let mut mesh = demo_mesh(args.size)?;
    let command = ExchangeCommand::from(args.command);
    let (kind, target) = command.target();
    let target = target.to_owned();

    log::info!(
        "{} on {} layer '{target}' (one value per {})",
        command.description(),
        kind,
        kind.element()
    );
    for line in describe_layer(&mesh, kind, &target)? {
        log::info!("  before {line}");
    }

    let mut history = EditHistory::default();
    let report = history.run(command, &mut mesh)?;
    for line in describe_layer(&mesh, kind, &target)? {
        log::info!("  after  {line}");
    }
    log::info!("{} values written", report.written);
    if kind == LayerKind::Color {
        let bytes = mesh.color_layer_bytes(&target)?;
        log::info!("color layer '{target}' holds {} bytes", bytes.len());
    }

    if args.undo {
        history.undo(&mut mesh)?;
        for line in describe_layer(&mesh, kind, &target)? {
            log::info!("  undone {line}");
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Exchange demo v{}", wcex_demos::VERSION);
    log::info!("Core version: {}", wcex_core::VERSION);

    if let Err(err) = run(Args::parse()) {
        log::error!("{err}");
        std::process::exit(1);
    }
}
