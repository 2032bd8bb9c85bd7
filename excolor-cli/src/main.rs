use std::{
    error::Error,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use excolor::{
    gamut, transfer_color_model, ColorModel, GamutClipConfig, GamutClipTable,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a color from one color model to another.
    Convert {
        /// Color model of the input color.
        from: ColorModel,
        /// Color model to convert to.
        to: ColorModel,
        /// The three channels of the color, normalized to [0, 1].
        #[arg(num_args = 3, allow_negative_numbers = true)]
        color: Vec<f64>,
        /// A color in the target model, used for channels that are undefined in the result.
        #[arg(short, long, num_args = 3, allow_negative_numbers = true)]
        reference: Option<Vec<f64>>,
        /// Keep channels outside of [0, 1] instead of clamping them.
        #[arg(long, default_value = "false")]
        no_clamp: bool,
        /// Read and print display values (degrees and percentages) instead of normalized ones.
        #[arg(short, long, default_value = "false")]
        display: bool,
    },
    /// Print the displayable limits of the secondary channels for a primary channel value.
    Limits {
        /// The baked gamut clip table.
        table: PathBuf,
        model: ColorModel,
        /// Index of the locked channel.
        #[arg(value_parser = clap::value_parser!(u8).range(0..3))]
        primary: u8,
        /// Value of the locked channel, normalized to [0, 1].
        value: f64,
        /// JSON file with the table configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Use the table even if its length does not match the configuration.
        #[arg(long, default_value = "false")]
        force: bool,
    },
    /// Check that a gamut clip table matches its configuration.
    Check {
        table: PathBuf,
        /// JSON file with the table configuration.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the supported color models.
    Models,
}

fn init_logger() {
    env_logger::init();
}

fn read_config(path: Option<&Path>) -> Result<GamutClipConfig, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(GamutClipConfig::default());
    };
    log::debug!("reading config from {}", path.display());
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn triple(values: &[f64]) -> [f64; 3] {
    [values[0], values[1], values[2]]
}

fn format_triple(c: [f64; 3]) -> String {
    format!("{:.4} {:.4} {:.4}", c[0], c[1], c[2])
}

fn convert(
    from: ColorModel,
    to: ColorModel,
    color: [f64; 3],
    reference: Option<[f64; 3]>,
    clamp: bool,
    display: bool,
) -> Result<(), Box<dyn Error>> {
    let (color, reference) = if display {
        (from.from_display(color), reference.map(|r| to.from_display(r)))
    } else {
        (color, reference)
    };

    let result = transfer_color_model(color, from, to, reference, clamp);
    if result.iter().any(|x| !x.is_finite()) {
        return Err(format!("conversion produced a non finite color: {:?}", result).into());
    }

    let shown = if display { to.to_display(result) } else { result };
    println!("{}", format_triple(shown));
    Ok(())
}

fn limits(
    path: &Path,
    model: ColorModel,
    primary: usize,
    value: f64,
    config: GamutClipConfig,
    force: bool,
) -> Result<(), Box<dyn Error>> {
    let table = if force {
        let limits = gamut::read_floats(&std::fs::read(path)?)?;
        if gamut::expected_len(config.segments) != Some(limits.len()) {
            log::warn!("using a gamut clip table that does not match its configuration");
        }
        GamutClipTable::from_limits_unchecked(limits, config)
    } else {
        GamutClipTable::load(path, config)?
    };

    let [x, y] = ColorModel::secondary_channels(primary);
    let names = model.channel_names();
    let l = table.axes_limits_interpolated(model, primary, value);
    println!("{}: {:.4} .. {:.4}", names[x], l.x.0, l.x.1);
    println!("{}: {:.4} .. {:.4}", names[y], l.y.0, l.y.1);
    Ok(())
}

fn check(path: &Path, config: GamutClipConfig) -> Result<(), Box<dyn Error>> {
    let table = GamutClipTable::load(path, config)?;
    println!(
        "{}: {} values, {} segments, offset {}",
        path.display(),
        table.len(),
        config.segments,
        config.offset
    );
    Ok(())
}

fn models() {
    for model in ColorModel::ALL {
        let (min, max) = model.limits();
        let names = model.channel_names();
        let channels = (0..3)
            .map(|i| format!("{} [{}, {}]", names[i], min[i], max[i]))
            .collect::<Vec<_>>()
            .join(", ");
        let mut flags = Vec::new();
        if model.is_not_srgb_based() {
            flags.push("gamut clipped");
        }
        if model.is_colorfulable() {
            flags.push("colorful");
        }
        println!(
            "{} {:<6} {} {}",
            model.index(),
            model.display_name(),
            channels,
            flags.join(" ")
        );
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Convert {
            from,
            to,
            color,
            reference,
            no_clamp,
            display,
        } => convert(
            from,
            to,
            triple(&color),
            reference.as_deref().map(triple),
            !no_clamp,
            display,
        ),
        Command::Limits {
            table,
            model,
            primary,
            value,
            config,
            force,
        } => {
            let config = read_config(config.as_deref())?;
            limits(&table, model, primary as usize, value, config, force)
        }
        Command::Check { table, config } => {
            let config = read_config(config.as_deref())?;
            check(&table, config)
        }
        Command::Models => {
            models();
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    init_logger();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
