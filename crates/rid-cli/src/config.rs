use anyhow::bail;
use clap::Parser;

/// Command-line arguments for the `rid` binary.
///
/// With no positional arguments `rid` generates IDs; with one or more it
/// decodes and describes each of them.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "rid",
    version,
    about = "Generate or inspect k-sortable rid identifiers",
    override_usage = "rid [-c N]     # print N rid(s)\n       rid <ID>...    # decode one or more rid(s)"
)]
pub struct CliArgs {
    /// Number of IDs to generate, at least 1.
    ///
    /// Cannot be combined with ID arguments when greater than 1.
    ///
    /// Environment variable: `RID_COUNT`
    #[arg(
        short = 'c',
        long,
        env = "RID_COUNT",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub count: u64,

    /// IDs to decode and inspect.
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,
}

/// What a single invocation does, validated from [`CliArgs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate { count: u64 },
    Inspect { ids: Vec<String> },
}

impl TryFrom<CliArgs> for Action {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.count > 1 && !args.ids.is_empty() {
            bail!(
                "--count (output) and ID arguments (input) both specified; perform only one at a time"
            );
        }

        if args.ids.is_empty() {
            Ok(Self::Generate { count: args.count })
        } else {
            Ok(Self::Inspect { ids: args.ids })
        }
    }
}
