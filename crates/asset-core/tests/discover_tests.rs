//! Tests for asset discovery

use asset_core::{DiscoveredAsset, Discoverer, IgnoreRule, SyncConfig};
use asset_fs::NormalizedPath;
use asset_test_utils::AssetProject;
use pretty_assertions::assert_eq;

fn discover(project: &AssetProject, config: &SyncConfig) -> Vec<DiscoveredAsset> {
    Discoverer::new(NormalizedPath::new(project.root()), config)
        .discover()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn keys(assets: &[DiscoveredAsset]) -> Vec<String> {
    assets.iter().map(|a| a.local_key.to_string()).collect()
}

#[test]
fn test_default_roots_in_configuration_order() {
    let project = AssetProject::new();
    project.write("public/images/b.png", b"B");
    project.write("app/assets/images/icons/x.svg", b"X");
    project.write("app/assets/images/a.png", b"A");

    let assets = discover(&project, &SyncConfig::default());

    assert_eq!(
        keys(&assets),
        vec![
            "app/assets/images/a.png",
            "app/assets/images/icons/x.svg",
            "public/images/b.png",
        ]
    );
    let public: Vec<_> = assets.iter().map(|a| a.public_path.to_string()).collect();
    assert_eq!(public, vec!["images/a.png", "images/icons/x.svg", "images/b.png"]);
    assert_eq!(assets[1].format(), Some("svg"));
}

#[test]
fn test_missing_roots_yield_nothing() {
    let project = AssetProject::new();
    assert!(discover(&project, &SyncConfig::default()).is_empty());
}

#[test]
fn test_ignored_directories_are_pruned() {
    let project = AssetProject::new();
    project.write("public/images/ok.png", b"ok");
    project.write("public/images/.svn/entries/x.png", b"svn");
    project.write("public/images/nested/CVS/Root", b"cvs");
    project.write("public/images/nested/.htaccess", b"deny");
    project.write("public/images/nested/keep.gif", b"gif");

    let assets = discover(&project, &SyncConfig::default());

    assert_eq!(
        keys(&assets),
        vec!["public/images/nested/keep.gif", "public/images/ok.png"]
    );
}

#[test]
fn test_custom_pattern_prunes_matching_directory() {
    let project = AssetProject::new();
    project.write("public/images/tmp-cache/deep/a.png", b"a");
    project.write("public/images/real.png", b"r");

    let mut config = SyncConfig::default();
    config.ignore_files.push(IgnoreRule::parse("/^tmp-/").unwrap());

    assert_eq!(keys(&discover(&project, &config)), vec!["public/images/real.png"]);
}

#[test]
fn test_exact_rule_does_not_match_substrings() {
    let project = AssetProject::new();
    project.write("public/images/.github/badge.png", b"b");

    let assets = discover(&project, &SyncConfig::default());

    assert_eq!(keys(&assets), vec!["public/images/.github/badge.png"]);
}

#[test]
fn test_overlapping_roots_yield_duplicates() {
    let project = AssetProject::new();
    project.write("public/images/a.png", b"a");

    let config = SyncConfig {
        static_image_dirs: vec!["public".into(), "public/images".into()],
        ..SyncConfig::default()
    };
    let assets = discover(&project, &config);

    assert_eq!(keys(&assets), vec!["public/images/a.png", "public/images/a.png"]);
    assert_eq!(assets[0].public_path.as_str(), "public/images/a.png");
    assert_eq!(assets[1].public_path.as_str(), "images/a.png");
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_not_followed() {
    let project = AssetProject::new();
    project.write("elsewhere/secret.png", b"s");
    project.write("public/images/a.png", b"a");
    std::os::unix::fs::symlink(project.path("elsewhere"), project.path("public/images/linked"))
        .unwrap();

    let assets = discover(&project, &SyncConfig::default());

    assert_eq!(keys(&assets), vec!["public/images/a.png"]);
}

#[test]
fn test_current_dir_components_are_ignored_in_roots() {
    let project = AssetProject::new();
    project.write("public/images/a.png", b"a");

    let config = SyncConfig {
        static_image_dirs: vec!["./public/./images".into()],
        ..SyncConfig::default()
    };
    let assets = discover(&project, &config);

    assert_eq!(keys(&assets), vec!["public/images/a.png"]);
    assert_eq!(assets[0].public_path.as_str(), "images/a.png");
}
