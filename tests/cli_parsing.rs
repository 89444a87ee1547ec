use clap::Parser;
use std::path::PathBuf;

use menu_cache::cli::{Cli, Commands};

#[test]
fn test_parse_get_with_threshold() {
    let cli = Cli::try_parse_from(["menu-cache", "get", "bistro", "--max-age-hours", "1.5"]).unwrap();

    match cli.command {
        Commands::Get { tenant, max_age_hours } => {
            assert_eq!(tenant, "bistro");
            assert_eq!(max_age_hours, Some(1.5));
        }
        other => panic!("Wrong command: {other:?}"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_refresh_force_and_global_flags() {
    let cli = Cli::try_parse_from([
        "menu-cache",
        "refresh",
        "bistro",
        "--url",
        "https://bistro.example/menu",
        "--force",
        "--json",
        "--config",
        "custom.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Refresh { tenant, url, force } => {
            assert_eq!(tenant, "bistro");
            assert_eq!(url, "https://bistro.example/menu");
            assert!(force);
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_refresh_requires_url() {
    assert!(Cli::try_parse_from(["menu-cache", "refresh", "bistro"]).is_err());
}

#[test]
fn test_parse_update_repeated_offers() {
    let cli = Cli::try_parse_from([
        "menu-cache",
        "update",
        "bistro",
        "--restaurant-name",
        "Bistro 42",
        "--offer",
        "Kids eat free",
        "--offer",
        "2 for 1 Tuesdays",
    ])
    .unwrap();

    match cli.command {
        Commands::Update {
            restaurant_name,
            offers,
            items_file,
            ..
        } => {
            assert_eq!(restaurant_name.as_deref(), Some("Bistro 42"));
            assert_eq!(offers, vec!["Kids eat free", "2 for 1 Tuesdays"]);
            assert!(items_file.is_none());
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_create_requires_items_file() {
    assert!(Cli::try_parse_from(["menu-cache", "create", "bistro"]).is_err());

    let cli = Cli::try_parse_from(["menu-cache", "create", "bistro", "--items-file", "items.json"]).unwrap();
    assert!(matches!(cli.command, Commands::Create { .. }));
}

#[test]
fn test_parse_delete() {
    let cli = Cli::try_parse_from(["menu-cache", "-j", "delete", "bistro"]).unwrap();
    assert!(cli.json);
    assert!(matches!(cli.command, Commands::Delete { ref tenant } if tenant == "bistro"));
}
