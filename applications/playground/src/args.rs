use crate::error::{ApplicationError, ApplicationResult};
use moonplay_framework_common::display::DisplayConfig;

pub(crate) const USAGE: &str = "\
Usage: playground [OPTIONS]

Options:
  --sample NAME        load and run a named sample (triangle, raytracer, breakout)
  --gist ID            load a shared snippet instead of the default sample
  --share              upload the loaded code as a shared snippet and print its URL
  --resolution WxH     run with a fixed player resolution (default: native)
  --serve-docs [PORT]  serve the documentation browser (default port 8000)
  --assets BASE        sample/doc base: a directory or an http(s) origin (default: assets)
  --help               show this help";

const DEFAULT_DOCS_PORT: u16 = 8000;
const DEFAULT_ASSETS_BASE: &str = "assets";

#[derive(Debug)]
pub(crate) struct Args {
    pub sample: Option<String>,
    pub gist: Option<String>,
    pub share: bool,
    pub resolution: DisplayConfig,
    pub serve_docs: Option<u16>,
    pub assets_base: String,
    pub help: bool,
}

impl Args {
    pub(crate) fn parse(
        arguments: impl IntoIterator<Item = String>,
    ) -> ApplicationResult<Self> {
        let mut args = Self {
            sample: None,
            gist: None,
            share: false,
            resolution: DisplayConfig::Native,
            serve_docs: None,
            assets_base: DEFAULT_ASSETS_BASE.to_owned(),
            help: false,
        };

        let mut arguments = arguments.into_iter().peekable();
        while let Some(argument) = arguments.next() {
            match argument.as_str() {
                "--sample" => args.sample = Some(required(&mut arguments, "--sample")?),
                "--gist" => args.gist = Some(required(&mut arguments, "--gist")?),
                "--share" => args.share = true,
                "--resolution" => {
                    let value = required(&mut arguments, "--resolution")?;
                    args.resolution = value
                        .parse()
                        .map_err(|error| ApplicationError::Usage(format!("{error}")))?;
                }
                "--serve-docs" => {
                    // the port is optional; a following flag keeps the default
                    let port = match arguments.peek() {
                        Some(next) if !next.starts_with("--") => {
                            let value = arguments.next().unwrap_or_default();
                            value.parse().map_err(|_| {
                                ApplicationError::Usage(format!("invalid port `{value}`"))
                            })?
                        }
                        _ => DEFAULT_DOCS_PORT,
                    };
                    args.serve_docs = Some(port);
                }
                "--assets" => args.assets_base = required(&mut arguments, "--assets")?,
                "--help" | "-h" => args.help = true,
                unknown => {
                    return Err(ApplicationError::Usage(format!(
                        "unknown argument `{unknown}`\n\n{USAGE}"
                    )));
                }
            }
        }

        if args.sample.is_some() && args.gist.is_some() {
            return Err(ApplicationError::Usage(
                "`--sample` and `--gist` are mutually exclusive".to_owned(),
            ));
        }
        Ok(args)
    }
}

fn required(
    arguments: &mut impl Iterator<Item = String>,
    flag: &str,
) -> ApplicationResult<String> {
    arguments
        .next()
        .ok_or_else(|| ApplicationError::Usage(format!("`{flag}` requires a value")))
}
