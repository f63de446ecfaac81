//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

mod search;

#[test]
fn cli_parse_filename() {
    match parse(&["cspend", "filename", "7", "--prefix", "data"]) {
        CliCommand::Filename { page, prefix } => {
            assert_eq!(page, 7);
            assert_eq!(prefix.as_deref(), Some("data"));
        }
        _ => panic!("expected Filename"),
    }
}

#[test]
fn cli_parse_filename_without_prefix() {
    match parse(&["cspend", "filename", "1"]) {
        CliCommand::Filename { page, prefix } => {
            assert_eq!(page, 1);
            assert!(prefix.is_none());
        }
        _ => panic!("expected Filename"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["cspend", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_rejects_zero_args() {
    assert!(Cli::try_parse_from(["cspend"]).is_err());
}
