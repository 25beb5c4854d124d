use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

use crate::launch::{HeadlessCommand, LaunchOptions, ListOptions};
use crate::model::Scope;

#[derive(Debug)]
pub enum CliError {
    HelpRequested,
    MissingValue(&'static str),
    UnknownFlag(String),
    NonUtf8Flag,
    CurrentDirectory(io::Error),
    ListFlagWithoutList(&'static str),
    OutWithoutExport,
    DryRunWithoutToggle,
    ConflictingCommands,
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HelpRequested => f.write_str("help requested"),
            Self::MissingValue(flag) => write!(f, "missing value for {flag}"),
            Self::UnknownFlag(flag) => write!(f, "unknown flag: {flag}"),
            Self::NonUtf8Flag => f.write_str("encountered a non-UTF8 argument"),
            Self::CurrentDirectory(err) => {
                write!(f, "failed to read current directory: {err}")
            }
            Self::ListFlagWithoutList(flag) => write!(f, "{flag} requires --list"),
            Self::OutWithoutExport => f.write_str("--out requires --export <name>"),
            Self::DryRunWithoutToggle => {
                f.write_str("--dry-run requires --toggle-favourite <name>")
            }
            Self::ConflictingCommands => f.write_str(
                "--list, --export and --toggle-favourite cannot be combined",
            ),
        }
    }
}

impl std::error::Error for CliError {}

pub const fn usage() -> &'static str {
    "Usage: iconscope [OPTIONS]\n\n\
Without a command the icon browser window opens.\n\n\
Options:\n\
  --state-file <path>          Override persisted state path\n\
  --icon-root <path>           Scan this icon directory (repeatable)\n\
  --list                       Print the icon catalog and exit\n\
  --search <term>              Only list icons whose name contains <term>\n\
  --favourites                 Only list favourite icons\n\
  --json                       Print the listing as JSON\n\
  --export <name>              Export the named icon as PNG and exit\n\
  --out <path>                 Export target (default: <name>.png)\n\
  --toggle-favourite <name>    Add or remove a favourite and exit\n\
  --dry-run                    Show the toggled favourites without saving\n\
  -h, --help                   Show this help\n"
}

pub fn parse_env() -> Result<LaunchOptions, CliError> {
    parse_args(std::env::args_os().skip(1))
}

fn resolve_path(raw: OsString) -> Result<PathBuf, CliError> {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        Ok(path)
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .map_err(CliError::CurrentDirectory)
    }
}

fn next_raw(
    iter: &mut impl Iterator<Item = OsString>,
    flag: &'static str,
) -> Result<OsString, CliError> {
    iter.next().ok_or(CliError::MissingValue(flag))
}

/// Paths never start with a dash, so one here means the value was omitted.
fn next_path(
    iter: &mut impl Iterator<Item = OsString>,
    flag: &'static str,
) -> Result<PathBuf, CliError> {
    let raw = next_raw(iter, flag)?;
    if raw.to_str().is_some_and(|value| value.starts_with('-')) {
        return Err(CliError::MissingValue(flag));
    }
    resolve_path(raw)
}

/// Icon names and search terms may start with a dash (`-symbolic`).
fn next_string(
    iter: &mut impl Iterator<Item = OsString>,
    flag: &'static str,
) -> Result<String, CliError> {
    next_raw(iter, flag)?
        .into_string()
        .map_err(|_| CliError::NonUtf8Flag)
}

pub fn parse_args(args: impl IntoIterator<Item = OsString>) -> Result<LaunchOptions, CliError> {
    let mut options = LaunchOptions::default();
    let mut list = false;
    let mut search: Option<String> = None;
    let mut favourites_only = false;
    let mut json = false;
    let mut export: Option<String> = None;
    let mut out: Option<PathBuf> = None;
    let mut toggle: Option<String> = None;
    let mut dry_run = false;

    let mut iter = args.into_iter();
    while let Some(raw_flag) = iter.next() {
        let Some(flag) = raw_flag.to_str() else {
            return Err(CliError::NonUtf8Flag);
        };

        match flag {
            "-h" | "--help" => return Err(CliError::HelpRequested),
            "--state-file" => {
                options.state_file = Some(next_path(&mut iter, "--state-file")?);
            }
            "--icon-root" => {
                options
                    .icon_roots
                    .push(next_path(&mut iter, "--icon-root")?);
            }
            "--list" => list = true,
            "--search" => search = Some(next_string(&mut iter, "--search")?),
            "--favourites" => favourites_only = true,
            "--json" => json = true,
            "--export" => export = Some(next_string(&mut iter, "--export")?),
            "--out" => out = Some(next_path(&mut iter, "--out")?),
            "--toggle-favourite" => {
                toggle = Some(next_string(&mut iter, "--toggle-favourite")?);
            }
            "--dry-run" => dry_run = true,
            _ => {
                return Err(CliError::UnknownFlag(flag.to_string()));
            }
        }
    }

    let commands = usize::from(list) + usize::from(export.is_some()) + usize::from(toggle.is_some());
    if commands > 1 {
        return Err(CliError::ConflictingCommands);
    }
    if !list {
        if search.is_some() {
            return Err(CliError::ListFlagWithoutList("--search"));
        }
        if favourites_only {
            return Err(CliError::ListFlagWithoutList("--favourites"));
        }
        if json {
            return Err(CliError::ListFlagWithoutList("--json"));
        }
    }
    if out.is_some() && export.is_none() {
        return Err(CliError::OutWithoutExport);
    }
    if dry_run && toggle.is_none() {
        return Err(CliError::DryRunWithoutToggle);
    }

    options.command = if list {
        Some(HeadlessCommand::List(ListOptions {
            search: search.unwrap_or_default(),
            scope: if favourites_only {
                Scope::Favourites
            } else {
                Scope::All
            },
            json,
        }))
    } else if let Some(name) = export {
        Some(HeadlessCommand::Export { name, out })
    } else {
        toggle.map(|name| HeadlessCommand::ToggleFavourite { name, dry_run })
    };

    Ok(options)
}
