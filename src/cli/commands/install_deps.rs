//! install-deps command - Install gum into ~/.pr-cli/bin
//!
//! # Flow
//!
//! 1. Refuse when a gum not managed by pr-cli is on `PATH` (unless `--ignore-system`)
//! 2. Compare the managed installation with the latest GitHub release
//! 3. Download the archive for this platform, unpack it with `tar`, and
//!    move the binary into place

use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context as _, Result};
use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::cli::Context;
use crate::core::paths::PrCliPaths;
use crate::process;
use crate::ui::output::{self, Verbosity};

const LATEST_RELEASE_URL: &str = "https://api.github.com/repos/charmbracelet/gum/releases/latest";
const ARCHIVE_SUFFIX: &str = ".tar.gz";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct ReleaseAsset {
    name: String,
    browser_download_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    assets: Vec<ReleaseAsset>,
}

/// Dotted numeric version, compared component-wise.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Version(Vec<u64>);

impl Version {
    /// Parse `v0.14.1`, `0.14.1` or `0.14.1-rc1`. Non-numeric parts are ignored.
    fn parse(text: &str) -> Option<Self> {
        let text = text.trim().trim_start_matches('v');
        let core = text.split(['-', '+']).next().unwrap_or_default();
        let parts = core
            .split('.')
            .map(|part| part.parse().ok())
            .collect::<Option<Vec<u64>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self(parts))
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| {
                let a = self.0.get(i).copied().unwrap_or(0);
                let b = other.0.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Version of the managed gum installation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Installed {
    None,
    Unknown,
    Version(Version),
}

/// Extract the version from `gum --version` output.
fn parse_gum_version(output: &str) -> Option<Version> {
    let pattern = Regex::new(r"gum version (v?[0-9.-]+)(?:$| )").ok()?;
    let captures = pattern.captures(output)?;
    Version::parse(captures.get(1)?.as_str())
}

fn installed_version(gum: &Path, verbosity: Verbosity) -> Installed {
    let output = match process::capture(&gum.to_string_lossy(), ["--version"], None) {
        Ok(output) => output,
        Err(e) => {
            tracing::debug!(error = %e, "no managed gum installation");
            output::print("ℹ No existing gum installation in target directory", verbosity);
            return Installed::None;
        }
    };
    match parse_gum_version(&output) {
        Some(version) => {
            output::print(
                format!("ℹ Existing gum installation is version {}", output.trim()),
                verbosity,
            );
            Installed::Version(version)
        }
        None => {
            tracing::debug!(%output, "unrecognized gum version output");
            Installed::Unknown
        }
    }
}

/// Release asset naming for this platform, e.g. `Linux_x86_64`.
fn platform_tag(os: &str, arch: &str) -> Option<String> {
    let os = match os {
        "linux" => "Linux",
        "macos" => "Darwin",
        "freebsd" => "Freebsd",
        _ => return None,
    };
    let arch = match arch {
        "x86_64" => "x86_64",
        "aarch64" => "arm64",
        "x86" => "i386",
        _ => return None,
    };
    Some(format!("{os}_{arch}"))
}

fn find_asset<'a>(assets: &'a [ReleaseAsset], platform: &str) -> Option<&'a ReleaseAsset> {
    let needle = format!("_{platform}");
    assets
        .iter()
        .find(|asset| asset.name.contains(&needle) && asset.name.ends_with(ARCHIVE_SUFFIX))
}

/// Should the latest release replace `installed`?
fn needs_install(installed: &Installed, latest: Option<&Version>, force: bool) -> bool {
    if force {
        return true;
    }
    match (installed, latest) {
        (Installed::Version(current), Some(latest)) => current < latest,
        _ => true,
    }
}

/// The `gum` binary in an unpacked archive: at the top or one directory down.
fn find_binary(dir: &Path) -> Result<PathBuf> {
    let top = dir.join("gum");
    if top.is_file() {
        return Ok(top);
    }
    for entry in std::fs::read_dir(dir)? {
        let candidate = entry?.path().join("gum");
        if candidate.is_file() {
            return Ok(candidate);
        }
    }
    bail!("The downloaded archive does not contain a gum binary")
}

async fn fetch_latest_release(client: &Client) -> Result<Release> {
    let release = client
        .get(LATEST_RELEASE_URL)
        .header(USER_AGENT, concat!("pr-cli/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    Ok(release)
}

async fn download(client: &Client, url: &str, destination: &Path) -> Result<()> {
    let mut response = client
        .get(url)
        .header(USER_AGENT, concat!("pr-cli/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?
        .error_for_status()?;
    let mut file = tokio::fs::File::create(destination).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

fn move_into_place(binary: &Path, target: &Path) -> Result<()> {
    if std::fs::rename(binary, target).is_err() {
        // different filesystems
        std::fs::copy(binary, target)?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(target, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

async fn install(paths: &PrCliPaths, ignore_system: bool, force: bool, verbosity: Verbosity) -> Result<()> {
    let gum_install = paths.gum_path();

    if let Ok(system) = which::which("gum") {
        output::print(format!("ℹ found gum installation: {}", system.display()), verbosity);
        if !ignore_system && system != gum_install {
            bail!("Existing gum installation is not managed by pr-cli. To install anyway, use --ignore-system");
        }
    }

    let installed = installed_version(&gum_install, verbosity);

    let bin_dir = paths.bin_dir();
    output::status(format!("Creating {} if needed", bin_dir.display()), verbosity);
    std::fs::create_dir_all(&bin_dir)
        .with_context(|| format!("Failed to create {}", bin_dir.display()))?;

    let platform = platform_tag(std::env::consts::OS, std::env::consts::ARCH).ok_or_else(|| {
        anyhow!(
            "No gum release for {}_{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    })?;
    output::print(format!("ℹ OS type: {platform}"), verbosity);

    let client = Client::new();
    let release = fetch_latest_release(&client)
        .await
        .context("Failed to look up the latest gum release")?;
    output::print(format!("Latest version is {}", release.tag_name), verbosity);

    if !needs_install(&installed, Version::parse(&release.tag_name).as_ref(), force) {
        output::success("Installed version >= the latest version. Nothing to do!", verbosity);
        return Ok(());
    }

    let asset = find_asset(&release.assets, &platform)
        .ok_or_else(|| anyhow!("Unable to find matching release file"))?;
    output::print(format!("Found release file {}", asset.name), verbosity);

    let temp = tempfile::Builder::new()
        .prefix("pr-cli-gum-")
        .tempdir()
        .context("Failed to create temporary directory")?;
    let archive = temp.path().join(&asset.name);

    output::status("Downloading...", verbosity);
    download(&client, &asset.browser_download_url, &archive)
        .await
        .with_context(|| format!("Failed to download {}", asset.browser_download_url))?;

    output::status("Extracting...", verbosity);
    process::run(
        "tar",
        [
            OsStr::new("-xzf"),
            archive.as_os_str(),
            OsStr::new("-C"),
            temp.path().as_os_str(),
        ],
        None,
    )?;

    output::status(format!("Moving gum binary to {}", gum_install.display()), verbosity);
    move_into_place(&find_binary(temp.path())?, &gum_install)?;

    tracing::debug!(path = %temp.path().display(), "removing download directory");
    temp.close()?;
    output::success(format!("Installed gum {}", release.tag_name), verbosity);
    Ok(())
}

/// Install or upgrade the pr-cli managed gum.
pub fn install_deps(ctx: &Context, ignore_system: bool, force: bool) -> Result<()> {
    let paths = PrCliPaths::from_home().context("Unable to determine HOME directory")?;
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(install(&paths, ignore_system, force, ctx.verbosity()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str) -> ReleaseAsset {
        ReleaseAsset {
            name: name.into(),
            browser_download_url: format!("https://example.com/{name}"),
        }
    }

    mod version {
        use super::*;

        #[test]
        fn parses_tags() {
            assert_eq!(Version::parse("v0.14.1"), Some(Version(vec![0, 14, 1])));
            assert_eq!(Version::parse("0.14.1-rc1"), Some(Version(vec![0, 14, 1])));
            assert_eq!(Version::parse("latest"), None);
            assert_eq!(Version::parse(""), None);
        }

        #[test]
        fn compares_numerically() {
            let older = Version::parse("v0.9.0").unwrap();
            let newer = Version::parse("v0.14.0").unwrap();
            assert!(older < newer);
            assert_eq!(
                Version::parse("1.2").unwrap().cmp(&Version::parse("1.2.0").unwrap()),
                Ordering::Equal
            );
        }

        #[test]
        fn from_gum_output() {
            assert_eq!(
                parse_gum_version("gum version v0.14.5 (4e9ec3c)"),
                Some(Version(vec![0, 14, 5]))
            );
            assert_eq!(parse_gum_version("gum version 0.8.0"), Some(Version(vec![0, 8, 0])));
            assert_eq!(parse_gum_version("something else"), None);
        }
    }

    #[test]
    fn platform_names_match_release_assets() {
        assert_eq!(platform_tag("linux", "x86_64").as_deref(), Some("Linux_x86_64"));
        assert_eq!(platform_tag("macos", "aarch64").as_deref(), Some("Darwin_arm64"));
        assert_eq!(platform_tag("windows", "x86_64"), None);
    }

    #[test]
    fn picks_archive_for_platform() {
        let assets = vec![
            asset("checksums.txt"),
            asset("gum_0.14.5_Linux_x86_64.rpm"),
            asset("gum_0.14.5_Linux_x86_64.tar.gz"),
            asset("gum_0.14.5_Darwin_arm64.tar.gz"),
        ];
        assert_eq!(
            find_asset(&assets, "Linux_x86_64").map(|a| a.name.as_str()),
            Some("gum_0.14.5_Linux_x86_64.tar.gz")
        );
        assert_eq!(
            find_asset(&assets, "Darwin_arm64").map(|a| a.name.as_str()),
            Some("gum_0.14.5_Darwin_arm64.tar.gz")
        );
        assert!(find_asset(&assets, "Linux_arm64").is_none());
    }

    #[test]
    fn install_decision() {
        let latest = Version::parse("v0.14.0").unwrap();
        let same = Installed::Version(latest.clone());
        let old = Installed::Version(Version::parse("v0.13.0").unwrap());

        assert!(!needs_install(&same, Some(&latest), false));
        assert!(needs_install(&same, Some(&latest), true));
        assert!(needs_install(&old, Some(&latest), false));
        assert!(needs_install(&Installed::None, Some(&latest), false));
        assert!(needs_install(&Installed::Unknown, Some(&latest), false));
        assert!(needs_install(&same, None, false));
    }

    #[test]
    fn release_json() {
        let release: Release = serde_json::from_str(
            r#"{"tag_name":"v0.14.5","name":"v0.14.5","assets":[
                {"name":"gum_0.14.5_Linux_x86_64.tar.gz","browser_download_url":"https://x/y","size":1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(release.tag_name, "v0.14.5");
        assert_eq!(release.assets.len(), 1);
    }

    #[test]
    fn finds_binary_in_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("gum_0.14.5_Linux_x86_64");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("gum"), "").unwrap();
        assert_eq!(find_binary(dir.path()).unwrap(), nested.join("gum"));

        let empty = tempfile::tempdir().unwrap();
        assert!(find_binary(empty.path()).is_err());
    }
}
