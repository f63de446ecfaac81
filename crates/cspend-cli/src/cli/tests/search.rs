//! Tests for the search subcommand arguments.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use cspend_core::params::ParamValue;
use std::path::PathBuf;

#[test]
fn cli_parse_search_defaults() {
    match parse(&["cspend", "search", "Пушкин"]) {
        CliCommand::Search {
            query,
            dir,
            prefix,
            key,
            params,
            base_url,
            json,
        } => {
            assert_eq!(query, "Пушкин");
            assert_eq!(dir, PathBuf::from("downloads"));
            assert!(prefix.is_none());
            assert_eq!(key, "productsearchlist");
            assert!(params.is_empty());
            assert!(base_url.is_none());
            assert!(!json);
        }
        _ => panic!("expected Search"),
    }
}

#[test]
fn cli_parse_search_all_options() {
    match parse(&[
        "cspend",
        "search",
        "book",
        "--dir",
        "pushkin",
        "-p",
        "data",
        "--key",
        "q",
        "--param",
        "customerregion=77",
        "--param",
        "daterange=01.01.2015-31.12.2015",
        "--base-url",
        "http://localhost:9000/search/?",
        "--json",
    ]) {
        CliCommand::Search {
            query,
            dir,
            prefix,
            key,
            params,
            base_url,
            json,
        } => {
            assert_eq!(query, "book");
            assert_eq!(dir, PathBuf::from("pushkin"));
            assert_eq!(prefix.as_deref(), Some("data"));
            assert_eq!(key, "q");
            assert_eq!(
                params,
                vec![
                    ("customerregion".to_string(), ParamValue::Int(77)),
                    (
                        "daterange".to_string(),
                        ParamValue::Str("01.01.2015-31.12.2015".into())
                    ),
                ]
            );
            assert_eq!(base_url.as_deref(), Some("http://localhost:9000/search/?"));
            assert!(json);
        }
        _ => panic!("expected Search"),
    }
}

#[test]
fn cli_parse_search_rejects_bad_param() {
    assert!(Cli::try_parse_from(["cspend", "search", "x", "--param", "novalue"]).is_err());
}
