use clap::Parser;
use mediasort_core::config::Overrides;
use std::ffi::OsString;
use std::path::PathBuf;

/// Long flags that may also be spelled with a single dash (`-source`).
const SINGLE_DASH_LONG_FLAGS: &[&str] = &["source", "dest", "on-hash-error", "dry-run"];

#[derive(Debug, Parser)]
#[command(name = "mediasort")]
#[command(
    about = "Copy media not yet in an archive into year/month folders, numbered by date",
    long_about = None
)]
pub struct Cli {
    /// Directory to import files from
    #[arg(short = 's', long, value_name = "DIR")]
    pub source: PathBuf,

    /// Archive directory, created if missing
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dest: PathBuf,

    /// What to do with a file that cannot be read while fingerprinting
    #[arg(long, value_name = "POLICY", value_parser = ["abort", "skip"])]
    pub on_hash_error: Option<String>,

    /// Log the planned copies without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            source: Some(self.source.to_string_lossy().into_owned()),
            dest: Some(self.dest.to_string_lossy().into_owned()),
            on_hash_error: self.on_hash_error.clone(),
            dry_run: self.dry_run.then_some(true),
        }
    }
}

/// Rewrites `-source dir` / `-dest=dir` into the `--` form clap expects.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text.starts_with("--") || !text.starts_with('-') {
                return arg;
            }
            let name = text[1..].split('=').next().unwrap_or_default();
            if SINGLE_DASH_LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}
