use std::path::PathBuf;

use clap::{value_parser, Parser};
use serde::de;

use super::*;

/// Resampling filter used before rendering
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Nearest neighbor, colors are copied verbatim
    #[default]
    Nearest,
    /// Linear filter
    Triangle,
    /// Catmull-Rom cubic filter
    CatmullRom,
    /// Gaussian filter
    Gaussian,
    /// Lanczos filter with a window of 3
    Lanczos3,
}
impl FromStr for FilterType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" => Ok(Self::Triangle),
            "catmullrom" | "catmull-rom" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(format!("invalid filter: {}, must be one of nearest, triangle, catmullrom, gaussian, lanczos3", s)),
        }
    }
}
impl<'de> Deserialize<'de> for FilterType {
    #[inline]
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer)?.parse().map_err(de::Error::custom)
    }
}
impl From<FilterType> for ::image::imageops::FilterType {
    #[inline]
    fn from(f: FilterType) -> Self {
        use ::image::imageops::FilterType as F;
        match f {
            FilterType::Nearest => F::Nearest,
            FilterType::Triangle => F::Triangle,
            FilterType::CatmullRom => F::CatmullRom,
            FilterType::Gaussian => F::Gaussian,
            FilterType::Lanczos3 => F::Lanczos3,
        }
    }
}

/// Output width, either the image's own, the terminal's, or a number of columns
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    #[default]
    Original,
    Fit,
    Limit(u32),
}
impl FromStr for Dimension {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "fit" => Ok(Self::Fit),
            _ => match s.parse::<u32>() {
                Ok(0) => Err("width must be at least 1".to_string()),
                Ok(dim) => Ok(Self::Limit(dim)),
                Err(_) => Err("invalid width, must be 'original', 'fit' or a number of columns".to_string()),
            },
        }
    }
}
impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Debug, Clone, Deserialize)]
        #[serde(untagged)]
        enum StrOrInt {
            Str(String),
            Int(i64),
        }
        match StrOrInt::deserialize(deserializer)? {
            StrOrInt::Str(s) => s.parse().map_err(de::Error::custom),
            StrOrInt::Int(dim) if dim > 0 && dim <= u32::MAX as i64 => Ok(Self::Limit(dim as u32)),
            StrOrInt::Int(dim) => Err(de::Error::custom(format!("invalid width {}, must be at least 1", dim))),
        }
    }
}

/// The pxl configuration, read from config.toml and overridden by the command line
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// The image to render
    #[serde(skip)]
    pub image: PathBuf,
    /// Where to write the output, stdout if unset
    #[serde(skip)]
    pub output: Option<PathBuf>,
    /// The log level
    pub log: LogLevel,
    /// The resize filter
    pub filter: FilterType,
    /// The output width
    pub width: Dimension,
    /// Translate the markup to ANSI escape sequences
    pub ansi: bool,
}

/// Command line arguments, override the config file
#[derive(Parser, Debug, Default)]
#[command(
        version = env!("CARGO_PKG_VERSION"),
        author = env!("CARGO_PKG_AUTHORS"),
        about = env!("CARGO_PKG_DESCRIPTION"),
        disable_help_flag = true,
)]
#[command(group(
    clap::ArgGroup::new("log_level")
        .args([
            "quiet",
            "verbose",
        ]).conflicts_with("log"),
))]
pub struct Args {
    /// Print help information
    #[arg(short = '?', short_alias = 'h', long = "help", action = clap::ArgAction::Help)]
    _help: Option<bool>,

    /// Set the level of verbosity
    #[arg(long, value_parser = LogLevel::from_str)]
    #[cfg_attr(feature = "env", arg(env = "PXL_LOG"))]
    pub log: Option<LogLevel>,

    /// Suppress verbosity
    #[arg(short, long, action = clap::ArgAction::Count, value_parser = value_parser!(u8).range(0..=3), conflicts_with = "verbose")]
    pub quiet: u8,

    /// Raise verbosity
    #[arg(short, long, action = clap::ArgAction::Count, value_parser = value_parser!(u8).range(0..=3), conflicts_with = "quiet")]
    pub verbose: u8,

    /// Specify the path to config.toml file
    #[cfg(feature = "config")]
    #[arg(long, value_name = "CONFIG", value_hint = clap::ValueHint::FilePath, value_parser = parse_file_path_str)]
    #[cfg_attr(feature = "env", arg(env = "PXL_CONFIG"))]
    pub config: Option<PathBuf>,

    /// The image to render
    #[arg(required = true, value_name = "IMAGE", value_hint = clap::ValueHint::FilePath, value_parser = parse_file_path_str)]
    pub image: PathBuf,

    /// Write the markup to a file instead of stdout
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Translate the markup to ANSI escape sequences for a terminal preview
    #[arg(short, long)]
    #[cfg_attr(feature = "env", arg(env = "PXL_ANSI"))]
    pub ansi: bool,

    /// Resize to WIDTH columns first, 'fit' for the terminal width
    #[arg(short, long, value_name = "WIDTH", value_parser = Dimension::from_str)]
    #[cfg_attr(feature = "env", arg(env = "PXL_WIDTH"))]
    pub width: Option<Dimension>,

    /// Set resizing filter
    #[arg(short, long, value_parser = FilterType::from_str)]
    #[cfg_attr(feature = "env", arg(env = "PXL_FILTER"))]
    pub filter: Option<FilterType>,
}

impl Args {
    /// Parse the process arguments, exits on error
    pub fn new() -> Self {
        #[allow(unused_mut)]
        let mut cli = Args::parse();
        #[cfg(feature = "config")]
        {
            cli.config = cli.config.or_else(config_path);
        }
        cli
    }
}

impl Config {
    /// Build the configuration from the process arguments and the config file they point to
    pub fn new() -> Self { Self::load(Args::new()) }
    /// Read the config file named by `args`, if any, and merge `args` over it
    pub fn load(args: Args) -> Self {
        #[cfg(feature = "config")]
        {
            if let Some(p) = &args.config {
                match ::std::fs::read_to_string(p) {
                    Ok(str) => match Config::from_toml(&str) {
                        Ok(con) => {
                            debug!("config.toml {} parsed: {:#?}", p.display(), con);
                            return con.merge_args(args);
                        }
                        Err(e) => error!("could not parse config file: {}: {}", p.display(), e),
                    },
                    Err(e) => error!("could not read config file: {}: {}", p.display(), e),
                }
            } else {
                debug!("no config file found, using default config");
            }
        }
        Config::default().merge_args(args)
    }
    /// Parse the contents of a config.toml
    #[cfg(feature = "config")]
    pub fn from_toml(s: &str) -> std::result::Result<Self, ::toml::de::Error> { ::toml::from_str(s) }
    pub fn merge_args(mut self, args: Args) -> Self {
        self.image = args.image;
        self.output = args.output;
        // merge log level
        if let Some(l) = args.log {
            self.log = l;
        } else {
            self.log = (self.log as u8).saturating_add(args.quiet).saturating_sub(args.verbose).into();
        }
        if let Some(f) = args.filter {
            self.filter = f;
        }
        if let Some(w) = args.width {
            self.width = w;
        }
        self.ansi |= args.ansi;
        self
    }
}

/// Parse a string as a path to a file.
#[inline]
pub fn parse_file_path_str(path: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(path);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("File does not exist: {}", path.display()))
    }
}

/// Get the path to the config file from the executable directory or the user's config directory, in that order.
#[cfg(feature = "config")]
pub fn config_path() -> Option<PathBuf> {
    // check if config file exists in executable directory
    if let Ok(p) = std::env::current_exe() {
        if let Some(p) = p.canonicalize().unwrap_or(p).parent().map(|p| p.join("config.toml")) {
            if p.is_file() {
                return Some(p);
            }
        }
    }
    let p = ::directories::ProjectDirs::from("", "", "pxl")?.config_dir().join("config.toml");
    p.is_file().then_some(p)
}
