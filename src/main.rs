use spiraldraw::io::file::{prepare_output_path, read_reference, DEFAULT_OUTPUT_FOLDER};
use spiraldraw::{Dimensions, Drawing, ExportOptions, Growth, SpiralConfig, SpiralError};
use std::env::args;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: spiral-draw [REFERENCE] [--loops N] [--size WxH] [--canvas WxH] \
[--blur SIGMA] [--seed N] [--jitter N] [--free] [--output PATH]";

struct Options {
    reference: Option<PathBuf>,
    loops: usize,
    export: ExportOptions,
    output: Option<PathBuf>,
    config: SpiralConfig,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            reference: None,
            loops: 20,
            export: ExportOptions {
                blur: None,
                resize: Some(Dimensions::from_wh(1000, 1000)),
            },
            output: None,
            config: SpiralConfig::default(),
        }
    }
}

fn invalid(message: String) -> SpiralError {
    SpiralError::InvalidConfig(message)
}

fn parse_size(value: &str) -> Result<Dimensions, SpiralError> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| invalid(format!("size must look like WxH, got {:?}", value)))?;
    match (w.parse::<u32>(), h.parse::<u32>()) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Dimensions::from_wh(w, h)),
        _ => Err(invalid(format!("size must look like WxH, got {:?}", value))),
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, SpiralError> {
    let value = value.ok_or_else(|| invalid(format!("{} needs a value", flag)))?;
    value
        .parse::<T>()
        .map_err(|_| invalid(format!("{} got an unusable value {:?}", flag, value)))
}

fn parse_args(mut arguments: impl Iterator<Item = String>) -> Result<Options, SpiralError> {
    let mut options = Options::default();

    while let Some(arg) = arguments.next() {
        match arg.as_str() {
            "--loops" => options.loops = parse_number(&arg, arguments.next())?,
            "--size" => {
                let size = arguments.next().unwrap_or_default();
                options.export.resize = Some(parse_size(&size)?);
            }
            "--canvas" => {
                let size = arguments.next().unwrap_or_default();
                options.config.canvas = parse_size(&size)?;
            }
            "--blur" => options.export.blur = Some(parse_number(&arg, arguments.next())?),
            "--seed" => options.config.seed = Some(parse_number(&arg, arguments.next())?),
            "--jitter" => options.config.max_jitter = parse_number(&arg, arguments.next())?,
            "--free" => options.config.growth = Growth::Free,
            "--output" => {
                options.output = Some(PathBuf::from(
                    arguments
                        .next()
                        .ok_or_else(|| invalid("--output needs a value".to_string()))?,
                ))
            }
            flag if flag.starts_with("--") => {
                return Err(invalid(format!("unknown option {}", flag)));
            }
            _ if options.reference.is_none() => options.reference = Some(PathBuf::from(&arg)),
            _ => return Err(invalid(format!("unexpected argument {:?}", arg))),
        }
    }

    Ok(options)
}

fn run(options: Options) -> Result<PathBuf, SpiralError> {
    let reference = match &options.reference {
        Some(path) => Some(read_reference(path)?),
        None => None,
    };

    let mut builder = Drawing::builder().config(options.config);
    if let Some(image) = &reference {
        builder = builder.reference(image);
    }
    let mut drawing = builder.build()?;
    drawing.run_loops(options.loops)?;

    let path = prepare_output_path(options.output.as_deref(), Path::new(DEFAULT_OUTPUT_FOLDER))?;
    drawing.export(&path, &options.export)?;
    Ok(path)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if args().any(|x| &x == "--help" || &x == "-h") {
        println!("{}", USAGE);
        return ExitCode::SUCCESS;
    }

    let options = match parse_args(args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(path) => {
            info!(path = %path.display(), "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
fn strings(values: &[&str]) -> impl Iterator<Item = String> {
    values
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<String>>()
        .into_iter()
}

#[test]
fn test_parse_defaults() {
    let options = parse_args(strings(&[])).unwrap();
    assert!(options.reference.is_none());
    assert_eq!(options.loops, 20);
    assert_eq!(options.export.resize, Some(Dimensions::from_wh(1000, 1000)));
    assert_eq!(options.export.blur, None);
    assert_eq!(options.config, SpiralConfig::default());
}

#[test]
fn test_parse_all_flags() {
    let options = parse_args(strings(&[
        "face.jpg", "--loops", "60", "--size", "800x600", "--canvas", "2000x2000", "--blur",
        "1.5", "--seed", "9", "--jitter", "0", "--free", "--output", "out/a.png",
    ]))
    .unwrap();

    assert_eq!(options.reference, Some(PathBuf::from("face.jpg")));
    assert_eq!(options.loops, 60);
    assert_eq!(options.export.resize, Some(Dimensions::from_wh(800, 600)));
    assert_eq!(options.export.blur, Some(1.5));
    assert_eq!(options.config.canvas, Dimensions::from_wh(2000, 2000));
    assert_eq!(options.config.seed, Some(9));
    assert_eq!(options.config.max_jitter, 0);
    assert_eq!(options.config.growth, Growth::Free);
    assert_eq!(options.output, Some(PathBuf::from("out/a.png")));
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(parse_args(strings(&["--loops", "many"])).is_err());
    assert!(parse_args(strings(&["--size", "100"])).is_err());
    assert!(parse_args(strings(&["--size", "0x100"])).is_err());
    assert!(parse_args(strings(&["--wat"])).is_err());
    assert!(parse_args(strings(&["a.png", "b.png"])).is_err());
    assert!(parse_args(strings(&["--output"])).is_err());
}
