use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "apidiff",
    about = "Classify API changes between two versions of a native SDK",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./apidiff.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two directories of declaration dumps
    Diff(DiffArgs),
    /// Compare two declaration dump files
    DiffFile(DiffFileArgs),
    /// Compare two permission expressions
    Permission(PermissionArgs),
    /// List every change category and its compatibility
    Categories(CategoriesArgs),
}

#[derive(Args)]
pub struct ReportArgs {
    /// Print a line diff of the old and new declaration text
    #[arg(long)]
    pub show_text: bool,
    /// Exit with an error when any breaking change is found
    #[arg(long)]
    pub fail_on_breaking: bool,
    #[arg(long)]
    pub max_permission_variables: Option<usize>,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[command(flatten)]
    pub report: ReportArgs,
    /// Parse files even when both sides are byte-identical
    #[arg(long)]
    pub no_skip_identical: bool,
}

#[derive(Args)]
pub struct DiffFileArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Args)]
pub struct PermissionArgs {
    pub old: String,
    pub new: String,
    #[arg(long)]
    pub max_variables: Option<usize>,
}

#[derive(Args)]
pub struct CategoriesArgs {
    /// Only list breaking categories
    #[arg(long, conflicts_with = "compatible")]
    pub breaking: bool,
    /// Only list compatible categories
    #[arg(long)]
    pub compatible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_diff() {
        let cli = Cli::try_parse_from(["apidiff", "diff", "sdk-9", "sdk-10"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.old, PathBuf::from("sdk-9"));
            assert_eq!(args.new, PathBuf::from("sdk-10"));
            assert!(!args.report.fail_on_breaking);
            assert!(!args.no_skip_identical);
        } else { panic!("wrong command"); }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_diff_flags() {
        let cli = Cli::try_parse_from([
            "apidiff", "diff", "a", "b", "--fail-on-breaking", "--show-text",
            "--max-permission-variables", "8", "--format", "json", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        if let Command::Diff(args) = cli.command {
            assert!(args.report.fail_on_breaking);
            assert!(args.report.show_text);
            assert_eq!(args.report.max_permission_variables, Some(8));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_file() {
        let cli = Cli::try_parse_from(["apidiff", "diff-file", "old.json", "new.json"]).unwrap();
        assert!(matches!(cli.command, Command::DiffFile(_)));
    }

    #[test]
    fn parse_permission() {
        let cli = Cli::try_parse_from(["apidiff", "permission", "A or B", "A"]).unwrap();
        if let Command::Permission(args) = cli.command {
            assert_eq!(args.old, "A or B");
            assert_eq!(args.new, "A");
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_config() {
        let cli = Cli::try_parse_from(["apidiff", "categories", "--config", "ci/apidiff.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("ci/apidiff.toml")));
    }

    #[test]
    fn categories_filters_conflict() {
        assert!(Cli::try_parse_from(["apidiff", "categories", "--breaking", "--compatible"]).is_err());
    }

    #[test]
    fn diff_requires_both_paths() {
        assert!(Cli::try_parse_from(["apidiff", "diff", "only-one"]).is_err());
    }
}
