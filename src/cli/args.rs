use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "mail2org")]
#[command(about = "Append emails with schedule-encoded To-addresses to an org-mode file")]
#[command(long_about = "mail2org - emails into org-mode entries

Reads an email message, interprets the local-part of its To-address as a
relative-date token, and appends an org-mode entry with a matching
SCHEDULED: timestamp to an org file.

TOKENS:
  today, tom            today / tomorrow
  mon .. sun            next occurrence of that weekday (2+ letters)
  3d, 2w, 6m, 1y        offsets in days, weeks, months, years
  25                    that day of the current month (rolls forward)
  04-25, jan14          month and day in the current year
  2015-12-31            absolute date
  tom#1000, mo#10       '#' separates an HHMM or HH time fragment

QUICK START:
  mail2org ingest -i message.eml --org-file ~/todo.org
  formail -s mail2org ingest --org-file ~/todo.org < mbox
  mail2org resolve mon --from 2014-07-17

For more information on a specific command, run:
  mail2org <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Path to the configuration file (default: ~/.mail2org/config.yaml)
    #[arg(short, long, env = "MAIL2ORG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Turn an email message into an org-mode entry
    ///
    /// Reads a raw RFC 822 message, resolves the To-address token against
    /// the message's Date header, and emits an org entry. A message whose
    /// token matches nothing is still captured, just without a SCHEDULED:
    /// line; a message that cannot be processed at all becomes an
    /// "Error parsing message" entry so no mail is lost.
    ///
    /// # Examples
    ///
    ///   mail2org ingest < message.eml
    ///   mail2org ingest -i message.eml --org-file ~/todo.org
    ///   mail2org ingest --org-file ~/todo.org --no-append < message.eml
    #[command(alias = "in")]
    Ingest(IngestArgs),

    /// Resolve a relative-date token and print the result
    ///
    /// Resolves against --from when given, otherwise against the current
    /// date (or date-time when the token carries a time fragment).
    /// Prints "no match" when the token matches no rule.
    ///
    /// # Examples
    ///
    ///   mail2org resolve mon --from 2014-07-17
    ///   mail2org resolve tom#1000
    ///   mail2org resolve 2m -o json
    #[command(alias = "r")]
    Resolve(ResolveArgs),

    /// Generate shell completion scripts
    ///
    /// # Examples
    ///
    ///   mail2org completions bash > /etc/bash_completion.d/mail2org
    ///   mail2org completions zsh > ~/.zfunc/_mail2org
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the ingest command.
#[derive(Args)]
pub struct IngestArgs {
    /// File to read the email from (default: stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Org-mode file to write the entry to (default: stdout)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub org_file: Option<PathBuf>,

    /// Overwrite the org file instead of appending
    #[arg(long)]
    pub no_append: bool,

    /// Render inactive ([..]) timestamps
    #[arg(long)]
    pub inactive: bool,
}

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// The token to resolve (e.g. "mon", "2m", "tom#1000")
    pub token: String,

    /// Reference date or date-time, e.g. "2014-07-17" or
    /// "2014-07-17 12:30:59" (default: now)
    #[arg(long, value_name = "DATE")]
    pub from: Option<String>,
}
