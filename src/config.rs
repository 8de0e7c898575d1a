use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser};

const DEFAULT_FLUTTER_BIN: &str = "flutter";
const DEFAULT_FIREBASE_BIN: &str = "firebase";
const DEFAULT_CONSTANTS_PATH: &str = "scripts/version.dart";

/// Build output directory produced by `flutter build web`, relative to the
/// project root.
pub const WEB_OUTPUT_DIR: &str = "build/web";
/// Entry HTML file inside the build output.
pub const ENTRY_HTML: &str = "index.html";
/// Redirect page shipped alongside the app, relative to the project root.
pub const REDIRECT_SOURCE: &str = "web/redirect.html";

#[derive(Debug, Parser)]
#[command(
    name = "webship",
    version,
    about = "Build, version-stamp, and deploy a Flutter web app to Firebase Hosting."
)]
pub struct Cli {
    /// Version token stamped into the build (e.g. 1.2.3).
    pub version: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Flutter project directory. All fixed paths resolve against it.
    #[arg(long, env = "WEBSHIP_PROJECT_ROOT", default_value = ".")]
    pub project_root: PathBuf,

    /// Dart source file overwritten with the version constant.
    #[arg(
        long,
        env = "WEBSHIP_CONSTANTS_PATH",
        default_value = DEFAULT_CONSTANTS_PATH
    )]
    pub constants_path: PathBuf,

    /// Flutter binary name or path.
    #[arg(long, env = "WEBSHIP_FLUTTER_BIN", default_value = DEFAULT_FLUTTER_BIN)]
    pub flutter_bin: String,

    /// Firebase CLI binary name or path.
    #[arg(long, env = "WEBSHIP_FIREBASE_BIN", default_value = DEFAULT_FIREBASE_BIN)]
    pub firebase_bin: String,

    /// Run everything except the final `firebase deploy`.
    #[arg(long)]
    pub skip_deploy: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub version: String,
    pub project_root: PathBuf,
    pub constants_file: PathBuf,
    pub web_output_dir: PathBuf,
    pub entry_html: PathBuf,
    pub redirect_source: PathBuf,
    pub redirect_dest: PathBuf,
    pub flutter_bin: PathBuf,
    /// `None` when the deploy step is skipped.
    pub firebase_bin: Option<PathBuf>,
}

impl Config {
    pub fn from_cli() -> Result<Self> {
        let cli = Cli::parse();
        Config::from_parts(cli.version, cli.common)
    }

    fn from_parts(version: String, common: CommonArgs) -> Result<Self> {
        validate_version(&version)?;

        let project_root = common.project_root;
        if !project_root.is_dir() {
            return Err(anyhow!(
                "project root {} is not a directory",
                project_root.display()
            ));
        }

        let flutter_bin = resolve_tool(&common.flutter_bin)?;
        let firebase_bin = if common.skip_deploy {
            None
        } else {
            Some(resolve_tool(&common.firebase_bin)?)
        };

        let web_output_dir = project_root.join(WEB_OUTPUT_DIR);
        Ok(Self {
            version,
            constants_file: project_root.join(common.constants_path),
            entry_html: web_output_dir.join(ENTRY_HTML),
            redirect_source: project_root.join(REDIRECT_SOURCE),
            redirect_dest: web_output_dir.join("redirect.html"),
            web_output_dir,
            project_root,
            flutter_bin,
            firebase_bin,
        })
    }
}

/// Rejects version tokens that would corrupt the generated Dart declaration
/// or the stamped filename. Raw interpolation downstream relies on this.
pub fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() {
        return Err(anyhow!("version must not be empty"));
    }
    if let Some(bad) = version.chars().find(|c| {
        matches!(c, '\'' | '"' | '\\') || c.is_whitespace() || std::path::is_separator(*c)
    }) {
        return Err(anyhow!(
            "version must not contain {bad:?}: it is embedded in generated Dart source and in the stamped filename"
        ));
    }
    Ok(())
}

fn resolve_tool(name: &str) -> Result<PathBuf> {
    which::which(name).with_context(|| format!("`{name}` not found (is it installed and on PATH?)"))
}
