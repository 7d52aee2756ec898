use pixel_tracer::convert::ConvertParams;
use pixel_tracer::trace_file;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
    params: ConvertParams,
}

fn run() -> Result<(), String> {
    let args = parse_args(env::args().skip(1))?;

    let svg = trace_file(&args.input, &args.params)?;
    match &args.output {
        Some(path) => svg.save_to_path(path, args.pretty),
        None => {
            print!("{}", svg.to_string(args.pretty));
            Ok(())
        }
    }
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs, String> {
    let mut input = None;
    let mut output = None;
    let mut pretty = true;
    let mut params = ConvertParams::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => output = Some(PathBuf::from(required_value(&arg, &mut args)?)),
            "-c" | "--color-tolerance" => {
                params.color_tolerance = parse_value(&arg, &mut args)?;
            }
            "-b" | "--remove-background" => params.remove_background = true,
            "--background-tolerance" => {
                params.background_tolerance = parse_value(&arg, &mut args)?;
            }
            "--max-artifact-size" => {
                params.max_artifact_size = parse_value(&arg, &mut args)?;
            }
            "--no-group-by-color" => params.group_by_color = false,
            "--no-pretty" => pretty = false,
            "-h" | "--help" => return Err(usage()),
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown option: {arg}\n\n{}", usage()));
            }
            _ => {
                if input.replace(PathBuf::from(&arg)).is_some() {
                    return Err(format!("Unexpected extra argument: {arg}\n\n{}", usage()));
                }
            }
        }
    }

    let input = input.ok_or_else(usage)?;
    Ok(CliArgs {
        input,
        output,
        pretty,
        params,
    })
}

fn required_value<I: Iterator<Item = String>>(flag: &str, args: &mut I) -> Result<String, String> {
    args.next()
        .ok_or_else(|| format!("Missing value for {flag}\n\n{}", usage()))
}

fn parse_value<T, I>(flag: &str, args: &mut I) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    I: Iterator<Item = String>,
{
    required_value(flag, args)?
        .parse()
        .map_err(|e| format!("Invalid value for {flag}: {e}"))
}

fn usage() -> String {
    "\
Usage: pixel_tracer <input> [options]

Trace a bitmap image into an SVG of per-region polygons.

Options:
  -o, --output <path>             Write the SVG here; stdout when omitted
  -c, --color-tolerance <int>     Merge perceptually-close colors
                                  (1 = smallest luminosity difference)
  -b, --remove-background         Try to remove a solid background
      --background-tolerance <f>  Blur amount for background detection
                                  (default 1.0, 0 = no blur)
      --max-artifact-size <f>     Size cap in % of total pixels for blobs
                                  rescued near contours (default 2.0)
      --no-group-by-color         Do not group same-color shapes in <g> tags
      --no-pretty                 Emit compact SVG
  -h, --help                      Show this help"
        .to_string()
}
