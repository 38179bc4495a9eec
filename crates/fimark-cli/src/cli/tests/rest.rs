//! Tests for the check and completions subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[test]
fn cli_parse_check() {
    match parse(&["fimark", "check", "src/a.py", "src/b.py"]) {
        CliCommand::Check { style, paths } => {
            assert!(style.is_none());
            assert_eq!(
                paths,
                vec![PathBuf::from("src/a.py"), PathBuf::from("src/b.py")]
            );
        }
        _ => panic!("expected Check"),
    }
}

#[test]
fn cli_parse_check_style() {
    match parse(&["fimark", "check", "--style", "html", "page.tpl"]) {
        CliCommand::Check { style, paths } => {
            assert_eq!(style.as_deref(), Some("html"));
            assert_eq!(paths, vec![PathBuf::from("page.tpl")]);
        }
        _ => panic!("expected Check with --style"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["fimark", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_completions_zsh() {
    match parse(&["fimark", "completions", "zsh"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Zsh),
        _ => panic!("expected Completions for zsh"),
    }
}
