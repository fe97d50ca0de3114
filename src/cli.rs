use clap::{ArgAction, Parser};

/// dummyfiles command-line interface
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dummyfiles",
    version,
    about = "Mirror file trees as dummy files, restore them, and report on them",
    long_about = None,
    after_help = "Applications: mirror, restore, report. Run `dummyfiles <APPLICATION> --help` for its options."
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv). `RUST_LOG` overrides this.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Application name followed by that application's own options
    #[arg(value_name = "APPLICATION", num_args = 1.., trailing_var_arg = true)]
    pub args: Vec<String>,
}
