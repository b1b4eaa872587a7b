mod check;
mod listing;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use stickerboard_core::gateway::cache_key;
use stickerboard_core::{
    decode_layout, default_layout, encode_layout_pretty, resolve_layout, BoardConfig,
    LayoutGateway, LoadedLayout, Orientation,
};

use crate::check::{check_layout, CheckReport};
use crate::listing::{read_folder, FileCache, FsFetcher};

#[derive(Parser)]
#[command(
    name = "stickerboard-cli",
    version,
    about = "Layout tools for sticker board content folders"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Layout {
        /// Board config JSON, the same object the page manifest embeds.
        #[arg(long, global = true, env = "STICKERBOARD_CONFIG")]
        config: Option<PathBuf>,
        #[arg(
            long,
            global = true,
            env = "STICKERBOARD_IMAGE_BASE",
            default_value = "/images"
        )]
        image_base: String,
        #[command(subcommand)]
        command: LayoutCommand,
    },
}

#[derive(Subcommand)]
enum LayoutCommand {
    /// Print the scattered default layout for a folder.
    Defaults { dir: PathBuf },
    /// Validate an exported layout document against a folder.
    Check {
        dir: PathBuf,
        file: PathBuf,
        #[arg(long)]
        edit_mode: bool,
    },
    /// Resolve a folder's layout the way the board does on load.
    Resolve {
        dir: PathBuf,
        /// Public site root that published layout paths resolve against.
        #[arg(long, env = "STICKERBOARD_PUBLIC_ROOT", default_value = "public")]
        root: PathBuf,
        #[arg(long, default_value = "landscape", value_parser = parse_orientation)]
        orientation: Orientation,
        /// File standing in for the browser cache entry.
        #[arg(long)]
        cache: Option<PathBuf>,
    },
}

fn parse_orientation(value: &str) -> Result<Orientation, String> {
    Orientation::parse(value).ok_or_else(|| format!("expected portrait or landscape, got {value}"))
}

async fn load_config(path: Option<&Path>) -> Result<BoardConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path).await?;
            Ok(BoardConfig::from_json(&raw)?)
        }
        None => Ok(BoardConfig::default()),
    }
}

async fn check_file(
    dir: &Path,
    file: &Path,
    edit_mode: bool,
    image_base: &str,
    config: &BoardConfig,
) -> Result<(CheckReport, usize), Box<dyn std::error::Error>> {
    let folder = read_folder(dir, image_base).await?;
    let raw = tokio::fs::read_to_string(file).await?;
    let document = decode_layout(&raw)?;
    let report = check_layout(&folder.items, &document, config.y_max_for(edit_mode));
    Ok((report, document.len()))
}

async fn resolve_folder(
    dir: &Path,
    root: &Path,
    orientation: Orientation,
    cache: Option<&Path>,
    image_base: &str,
    config: &BoardConfig,
) -> Result<(LoadedLayout, String), Box<dyn std::error::Error>> {
    let folder = read_folder(dir, image_base).await?;
    let key = cache_key(&config.cache_key_prefix, &folder.content_set, orientation);
    let cache = FileCache::open(key, cache).await?;
    let gateway = LayoutGateway::new(folder.content_set.clone(), cache, config);
    let loaded = gateway.load(orientation, &FsFetcher::new(root)).await;
    log::info!(
        "{} {}: {:?} with {} overrides",
        folder.content_set,
        orientation,
        loaded.origin,
        loaded.overrides.len()
    );
    let resolved = resolve_layout(&folder.items, &loaded.overrides);
    let document = encode_layout_pretty(&resolved)?;
    Ok((loaded, document))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    flexi_logger::Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .start()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Layout {
            config,
            image_base,
            command,
        } => {
            let config = load_config(config.as_deref()).await?;
            match command {
                LayoutCommand::Defaults { dir } => {
                    let folder = read_folder(&dir, &image_base).await?;
                    if folder.items.is_empty() {
                        log::warn!("{} has no items", dir.display());
                    }
                    let layout = default_layout(&folder.items);
                    println!("{}", encode_layout_pretty(&layout)?);
                    log::info!(
                        "publish as {}/{}/layout-<orientation>.json",
                        config.layout_base.trim_end_matches('/'),
                        folder.content_set
                    );
                }
                LayoutCommand::Check {
                    dir,
                    file,
                    edit_mode,
                } => {
                    let (report, entries) =
                        check_file(&dir, &file, edit_mode, &image_base, &config).await?;
                    print!("{report}");
                    if !report.is_clean() {
                        eprintln!("{} has problems", file.display());
                        std::process::exit(1);
                    }
                    println!("{}: {entries} entries ok", file.display());
                }
                LayoutCommand::Resolve {
                    dir,
                    root,
                    orientation,
                    cache,
                } => {
                    let (_, document) = resolve_folder(
                        &dir,
                        &root,
                        orientation,
                        cache.as_deref(),
                        &image_base,
                        &config,
                    )
                    .await?;
                    println!("{document}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerboard_core::LayoutOrigin;

    fn write_folder(root: &Path) -> PathBuf {
        let dir = root.join("trip");
        std::fs::create_dir(&dir).expect("mkdir");
        std::fs::write(dir.join("a.jpg"), b"jpg").expect("write");
        std::fs::write(dir.join("b.md"), "caption").expect("write");
        dir
    }

    #[tokio::test]
    async fn resolve_follows_configured_layout_base() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = write_folder(root.path());
        let public = root.path().join("public");
        let published = public.join("content").join("trip");
        std::fs::create_dir_all(&published).expect("mkdir");
        std::fs::write(
            published.join("layout-portrait.json"),
            r#"{"a": {"x": 20, "y": 30, "rotation": 4}}"#,
        )
        .expect("write");
        let config_path = root.path().join("config.json");
        std::fs::write(&config_path, r#"{"layoutBase": "/content"}"#).expect("write");

        let config = load_config(Some(config_path.as_path())).await.expect("config");
        let (loaded, document) = resolve_folder(
            &dir,
            &public,
            Orientation::Portrait,
            None,
            "/images",
            &config,
        )
        .await
        .expect("resolve");
        assert_eq!(loaded.origin, LayoutOrigin::Published);
        let resolved = decode_layout(&document).expect("valid");
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved["a"].x, 20.0);

        let defaults = resolve_folder(
            &dir,
            &public,
            Orientation::Portrait,
            None,
            "/images",
            &BoardConfig::default(),
        )
        .await
        .expect("resolve");
        assert_eq!(defaults.0.origin, LayoutOrigin::Defaults);
    }

    #[tokio::test]
    async fn resolve_reads_cache_file_under_configured_prefix() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = write_folder(root.path());
        let cache_path = root.path().join("cached.json");
        std::fs::write(&cache_path, r#"{"b": {"x": 60, "y": 10, "rotation": 0}}"#)
            .expect("write");
        let config = BoardConfig::from_json(r#"{"cacheKeyPrefix": "site.layout"}"#)
            .expect("config");

        let (loaded, _) = resolve_folder(
            &dir,
            root.path(),
            Orientation::Landscape,
            Some(cache_path.as_path()),
            "/images",
            &config,
        )
        .await
        .expect("resolve");
        assert_eq!(loaded.origin, LayoutOrigin::Cached);
        assert_eq!(loaded.overrides["b"].x, 60.0);
    }

    #[tokio::test]
    async fn check_uses_configured_edit_height() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = write_folder(root.path());
        let file = root.path().join("layout.json");
        std::fs::write(&file, r#"{"a": {"x": 50, "y": 250, "rotation": 0}}"#).expect("write");

        let tall = BoardConfig::from_json(r#"{"yMaxEdit": 300}"#).expect("config");
        let (report, entries) = check_file(&dir, &file, true, "/images", &tall)
            .await
            .expect("check");
        assert_eq!(entries, 1);
        assert!(report.is_clean());

        let (report, _) = check_file(&dir, &file, true, "/images", &BoardConfig::default())
            .await
            .expect("check");
        assert!(!report.is_clean());
    }
}
