use crate::platform::parse_platforms;
use clap::{ArgAction, Parser};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contest-calendar", version)]
#[command(about = "Add upcoming programming contests from clist.by to Google Calendar")]
pub struct Cli {
    /// Print the fetched contests and exit before touching the calendar
    #[arg(long)]
    pub dry_run: bool,

    /// Comma separated platform codes: CF, LC, AC, CC (default: all).
    /// May be given more than once.
    #[arg(long, value_name = "CODES", action = ArgAction::Append)]
    pub platform: Vec<String>,

    /// Directory holding appsettings.json, credentials.json and token.json
    /// (default: the executable's directory)
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub dry_run: bool,
    /// Selected clist resource ids; empty means every default platform
    pub platforms: BTreeSet<u32>,
}

impl From<&Cli> for CliOptions {
    fn from(cli: &Cli) -> CliOptions {
        CliOptions {
            dry_run: cli.dry_run,
            platforms: cli
                .platform
                .iter()
                .flat_map(|codes| parse_platforms(codes))
                .collect(),
        }
    }
}
