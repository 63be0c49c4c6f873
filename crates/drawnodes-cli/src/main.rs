use drawnodes::render::raster::{self, RasterOptions};
use drawnodes::render::{
    HeadlessError, RenderError, RenderOptions, RenderedSection, RootSelection, render_section,
    sanitize_file_stem,
};
use drawnodes::{Diagram, Dialect, Section};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Render(HeadlessError),
    Json(serde_json::Error),
    NoSections,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoSections => write!(f, "No complete `=name ... =` section found"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Render(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Scad,
    Parse,
    Layout,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    dialect: Dialect,
    options: RenderOptions,
    png: bool,
    out: Option<PathBuf>,
    pretty: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Scad,
            input: None,
            dialect: Dialect::Nodes,
            options: RenderOptions::default(),
            png: false,
            out: None,
            pretty: false,
        }
    }
}

#[derive(Serialize)]
struct ParseOut<'a> {
    name: &'a str,
    warnings: &'a [String],
    diagram: &'a Diagram,
}

fn usage() -> &'static str {
    "drawnodes\n\
\n\
USAGE:\n\
  drawnodes [scad] [dialect=nodes|labeled|progression] [node=<color>] [loci=<color>] [text=<color>] [roots=following|preceding] [png=1] [out=<dir>] [<path>|-]\n\
  drawnodes parse [dialect=...] [pretty=1] [<path>|-]\n\
  drawnodes layout [dialect=...] [node=...] [loci=...] [text=...] [roots=...] [pretty=1] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin. `file=<path>` is the same as <path>.\n\
  - Colors are names or 6/8 hex digits; an empty value (e.g. `loci=`) turns the layer off.\n\
  - Defaults: dialect=nodes node=0000FF20 loci=Red, text off.\n\
  - scad writes <out>/<name>.scad per section (out defaults to the input's directory).\n\
  - png=1 also runs openscad per section; failures are reported and the next section continues.\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics.\n\
"
}

/// Empty value disables a layer.
fn layer(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    for a in argv.iter().skip(1) {
        match a.as_str() {
            "--help" | "-h" | "help" => return Err(CliError::Usage(usage())),
            "scad" => args.command = Command::Scad,
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "-" => args.input = None,
            other => {
                let Some((key, value)) = other.split_once('=') else {
                    if other.starts_with('-') || args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(other.to_string());
                    continue;
                };
                match key.trim() {
                    "file" => args.input = Some(value.to_string()),
                    "dialect" => {
                        args.dialect = value.parse().map_err(|_| CliError::Usage(usage()))?;
                    }
                    "node" => args.options.scene.node_fill = layer(value),
                    "loci" => args.options.scene.loci = layer(value),
                    "text" => args.options.scene.text = layer(value),
                    "roots" => {
                        args.options.scene.trace.roots = value
                            .parse::<RootSelection>()
                            .map_err(|_| CliError::Usage(usage()))?;
                    }
                    "png" => args.png = flag(value),
                    "out" => args.out = layer(value).map(PathBuf::from),
                    "pretty" => args.pretty = flag(value),
                    _ => return Err(CliError::Usage(usage())),
                }
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

/// Output directory: `out=`, else the input file's directory, else the working directory.
fn output_dir(input: Option<&str>, out: Option<&Path>) -> PathBuf {
    if let Some(out) = out {
        return out.to_path_buf();
    }
    match input {
        Some(path) if path != "-" => Path::new(path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
        _ => PathBuf::new(),
    }
}

fn render_all(sections: &[Section], args: &Args) -> Result<Vec<RenderedSection>, CliError> {
    let mut rendered = Vec::with_capacity(sections.len());
    for section in sections {
        rendered.push(render_section(section, args.dialect, &args.options)?);
    }
    Ok(rendered)
}

fn write_outputs(rendered: &[RenderedSection], args: &Args) -> Result<(), CliError> {
    let dir = output_dir(args.input.as_deref(), args.out.as_deref());
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(&dir)?;
    }

    let raster_options = RasterOptions::default();
    for section in rendered {
        if args.png {
            // raster::render_png writes the .scad itself.
            match raster::render_png(section, &dir, &raster_options) {
                Ok(png) => println!("{}", png.display()),
                Err(err) => {
                    tracing::warn!(section = %section.name, error = %err, "png failed");
                    eprintln!("{}: {err}", section.name);
                }
            }
            continue;
        }
        let path = dir.join(format!("{}.scad", sanitize_file_stem(&section.name)));
        std::fs::write(&path, &section.scad)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let source = drawnodes::parse_sections(&text);
    for warning in &source.warnings {
        eprintln!("warning: {warning}");
    }
    if source.sections.is_empty() {
        return Err(CliError::NoSections);
    }

    match args.command {
        Command::Parse => {
            let diagrams: Vec<Diagram> = source
                .sections
                .iter()
                .map(|s| s.diagram(args.dialect, &args.options.resolve))
                .collect();
            let out: Vec<ParseOut<'_>> = source
                .sections
                .iter()
                .zip(&diagrams)
                .map(|(s, d)| ParseOut {
                    name: &s.name,
                    warnings: &s.warnings,
                    diagram: d,
                })
                .collect();
            write_json(&out, args.pretty)
        }
        Command::Layout => {
            let rendered = render_all(&source.sections, &args)?;
            write_json(&rendered, args.pretty)
        }
        Command::Scad => {
            let rendered = render_all(&source.sections, &args)?;
            write_outputs(&rendered, &args)
        }
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::NoSections) => {
            eprintln!("{}", CliError::NoSections);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
