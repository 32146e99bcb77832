// src/cli.rs
//! Command-line arguments: `specscroll <audio-file> [--config <path.json>]`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub const USAGE: &str = "usage: specscroll <audio-file> [--config <path.json>]";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub audio: PathBuf,
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse arguments without the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut audio = None;
        let mut config = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    let path = args.next().context("--config needs a path")?;
                    config = Some(PathBuf::from(path));
                }
                "-h" | "--help" => bail!(USAGE),
                flag if flag.starts_with('-') => bail!("unknown option {flag}\n{USAGE}"),
                _ if audio.is_some() => bail!("more than one audio file given\n{USAGE}"),
                _ => audio = Some(PathBuf::from(arg.as_str())),
            }
        }

        Ok(Self {
            audio: audio.context(USAGE)?,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn audio_file_only() {
        let args = parse(&["song.flac"]).unwrap();
        assert_eq!(args.audio, PathBuf::from("song.flac"));
        assert!(args.config.is_none());
    }

    #[test]
    fn config_before_or_after_file() {
        let a = parse(&["--config", "c.json", "song.mp3"]).unwrap();
        let b = parse(&["song.mp3", "-c", "c.json"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.config, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn rejects_bad_invocations() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["song.mp3", "--config"]).is_err());
        assert!(parse(&["a.mp3", "b.mp3"]).is_err());
        assert!(parse(&["--verbose", "a.mp3"]).is_err());
    }
}
