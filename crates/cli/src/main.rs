use alcove::{
    data::{self, preprocess},
    timed, AlcoveCoordinate, ClassId, Command, Session, SessionConfig,
    SessionRenderer, Vector2, Viewport,
};
use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use log::{error, info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for the alcove tessellation engine. Renders tableau data onto the A₂
/// alcove tessellation, and prepares that data from raw tableaux.
#[derive(Debug, StructOpt)]
#[structopt(name = "alcove")]
struct Opt {
    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,

    #[structopt(subcommand)]
    command: Subcommand,
}

#[derive(Debug, StructOpt)]
enum Subcommand {
    /// Build a tessellation, plot tableau data onto it, and write the result
    Render(RenderOpt),
    /// Convert raw tableau lists into the JSON records that `render` loads
    Preprocess(PreprocessOpt),
}

#[derive(Debug, StructOpt)]
struct RenderOpt {
    /// Path to a config file with `tessellation` and `render` tables.
    /// Supported formats: JSON, TOML
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to a JSON file of tableau records. If loading fails, the error
    /// is logged and the bare tessellation is still written.
    #[structopt(short, long)]
    data: Option<PathBuf>,

    /// Viewport width, in pixels
    #[structopt(long, default_value = "1280")]
    width: f64,

    /// Viewport height, in pixels
    #[structopt(long, default_value = "800")]
    height: f64,

    /// Class id(s) whose checkbox should be turned on
    #[structopt(long)]
    select_class: Vec<ClassId>,

    /// Hover the highlighted triangle at this alcove coordinate, given as
    /// `a,b`. This opens the info panel in HTML output.
    #[structopt(long, allow_hyphen_values = true)]
    hover: Option<AlcoveCoordinate>,

    /// Zoom scale. Clamped to the configured zoom bounds.
    #[structopt(long)]
    zoom: Option<f64>,

    /// If given, output will be written to this directory. The exact files
    /// that appear in the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the session in. Supported formats:
    ///
    /// cfg - The full config used for the session, in TOML format
    ///
    /// html - A standalone page with the legend, class controls, SVG canvas
    ///   and info panel
    ///
    /// json - A JSON snapshot of the full session state
    ///
    /// svg - 2D rendering of the tessellation and highlights
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,
}

#[derive(Debug, StructOpt)]
struct PreprocessOpt {
    /// File of tableaux that index cluster variables, one per line
    #[structopt(long)]
    valid: PathBuf,

    /// File of tableaux that don't index cluster variables, one per line
    #[structopt(long)]
    invalid: PathBuf,

    /// Weight classes with this many members or fewer don't get a class id
    #[structopt(long, default_value = "6")]
    min_class_size: usize,

    /// Path to write the JSON records to
    #[structopt(short, long)]
    output: PathBuf,

    /// If given, a summary of each kept weight class is written to this
    /// path as JSON
    #[structopt(long)]
    classes_output: Option<PathBuf>,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the session's full config in a human-readable file
    Cfg,
    /// Render the session as a standalone HTML page
    Html,
    /// Export a serialized JSON snapshot of the session
    Json,
    /// Render the session as a 2D SVG
    Svg,
    /* If you change this, make sure to update the help text for
     * `--output-formats`! */
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Html => "html",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<SessionConfig> {
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Open a file for writing, replacing anything already there
fn create_file(path: &Path) -> anyhow::Result<std::fs::File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("error opening output file {:?}", path))
}

/// Generate an output form of the session in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    session: &Session,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        session: &Session,
    ) -> anyhow::Result<Vec<u8>> {
        let renderer = SessionRenderer::new(session);
        Ok(match output_format {
            OutputFormat::Cfg => toml::to_string_pretty(session.config())
                .context("error serializing config")?
                .into_bytes(),
            OutputFormat::Html => renderer.render_as_html().into_bytes(),
            OutputFormat::Json => serde_json::to_vec(session)
                .context("error serializing session")?,
            OutputFormat::Svg => renderer.render_as_svg().into_bytes(),
        })
    }

    let output_file_path = output_dir
        .join("session")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, session)?;
            let mut file = create_file(&output_file_path)?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Build a session, apply the requested interactions, and write outputs
fn run_render(opt: RenderOpt) -> anyhow::Result<()> {
    let config = match &opt.config {
        Some(config_path) => load_config(config_path)?,
        None => SessionConfig::default(),
    };
    let viewport = Viewport::new(opt.width, opt.height);
    let (mut session, ticket) = Session::new(config, viewport)?;
    info!(
        "Built tessellation with {} triangles for {}x{} viewport",
        session.tessellation().len(),
        viewport.width,
        viewport.height
    );

    // A failed load leaves the session in its failed state, and the bare
    // tessellation still gets written
    match &opt.data {
        Some(data_path) => {
            let command = match data::load_records(data_path) {
                Ok(records) => Command::DataLoaded { ticket, records },
                Err(err) => Command::LoadFailed {
                    ticket,
                    error: format!("{:#}", err),
                },
            };
            session.dispatch(command)?;
        }
        None => warn!("No data file given, only the tessellation is drawn"),
    }

    for class_id in &opt.select_class {
        if let Err(err) = session.dispatch(Command::ToggleClass {
            class_id: *class_id,
            checked: true,
        }) {
            error!("Can't select class: {:#}", err);
        }
    }

    if let Some(coord) = opt.hover {
        match session.tessellation().resolve(coord).map(|t| t.id()) {
            Some(id) => {
                session.dispatch(Command::HoverEnter(id))?;
                if session.panel().is_none() {
                    warn!(
                        "Triangle at {} isn't highlighted, nothing to show",
                        coord
                    );
                }
            }
            None => warn!("No triangle at alcove coordinate {}", coord),
        }
    }

    if let Some(scale) = opt.zoom {
        session.dispatch(Command::Zoom {
            scale,
            translate: Vector2::ZERO,
        })?;
    }

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(&output_dir)?;
        for output_format in opt.output_formats {
            gen_output(&output_dir, output_format, &session)?;
        }
    }

    Ok(())
}

/// Turn raw tableau files into plottable records
fn run_preprocess(opt: PreprocessOpt) -> anyhow::Result<()> {
    let mut raw = preprocess::load_tableaux(&opt.valid, true)?;
    raw.extend(preprocess::load_tableaux(&opt.invalid, false)?);

    let (records, classes) = timed!(
        "Preprocessing",
        log::Level::Info,
        preprocess::build_records(raw, opt.min_class_size)?
    );
    for class in &classes {
        info!(
            "Class {}: {} tableaux ({} cluster), weight vector {:?}",
            class.id, class.total_count, class.cluster_count, class.weight_vector
        );
    }

    let file = create_file(&opt.output)?;
    serde_json::to_writer(BufWriter::new(file), &records).with_context(
        || format!("error writing records to {:?}", &opt.output),
    )?;
    info!("Wrote {} records to {:?}", records.len(), &opt.output);

    if let Some(classes_path) = &opt.classes_output {
        let file = create_file(classes_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &classes)
            .with_context(|| {
                format!("error writing classes to {:?}", classes_path)
            })?;
        info!("Wrote {} classes to {:?}", classes.len(), classes_path);
    }
    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    match opt.command {
        Subcommand::Render(render_opt) => run_render(render_opt),
        Subcommand::Preprocess(preprocess_opt) => {
            run_preprocess(preprocess_opt)
        }
    }
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
