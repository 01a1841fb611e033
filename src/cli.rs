use std::path::PathBuf;
use clap::{ArgAction, Parser};

/// Print the format selector and post-processing options for a download.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Output format: any, mp4, m4a, mp3, opus, wav, thumbnail, subtitles or custom:<selector>.
    /// Defaults to the configured format.
    pub format: Option<String>,

    /// Quality: "best", a max height (e.g. 720), "audio", an audio quality level (0-10)
    /// or a subtitle language code. Defaults to the configured quality.
    pub quality: Option<String>,

    /// Base options as a JSON object, or @path to read them from a file
    #[arg(short = 'o', long = "options")]
    pub options: Option<String>,

    /// Config file to use instead of the user config
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Reject quality values that mean nothing for the chosen format
    #[arg(long, action = ArgAction::SetTrue)]
    pub strict: bool,

    /// Only print the format selector
    #[arg(long, action = ArgAction::SetTrue)]
    pub selector_only: bool,

    /// Pretty-print the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pub pretty: bool,
}
