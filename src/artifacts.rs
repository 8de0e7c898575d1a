use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Fixed name of the compiled script emitted by `flutter build web`.
pub const SCRIPT_NAME: &str = "main.dart.js";

/// Filename with the version token inserted before the final extension,
/// so browsers and CDNs treat every release as a fresh asset.
pub fn versioned_script_name(version: &str) -> String {
    format!("main.dart.{version}.js")
}

/// Overwrites the Dart constants file with a single `debugVersion`
/// declaration. Whatever the file held before is discarded.
pub fn write_version_constant(path: &Path, version: &str) -> Result<()> {
    let declaration = format!("String debugVersion = '{version}';");
    fs::write(path, declaration)
        .with_context(|| format!("failed to write version constant to {}", path.display()))
}

/// Replaces every literal `main.dart.js` reference in the entry HTML with
/// the version-qualified name and writes the file back. The write happens
/// even when nothing matched; the returned count lets the caller decide
/// what a zero means.
pub fn stamp_entry_html(path: &Path, version: &str) -> Result<usize> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read entry point {}", path.display()))?;
    let replacements = content.matches(SCRIPT_NAME).count();
    let stamped = content.replace(SCRIPT_NAME, &versioned_script_name(version));
    fs::write(path, stamped)
        .with_context(|| format!("failed to write entry point {}", path.display()))?;
    Ok(replacements)
}

/// Renames the fixed-name script inside `web_dir` to its version-qualified
/// name. The artifact must exist, i.e. the build step must have produced it.
pub fn rename_script_artifact(web_dir: &Path, version: &str) -> Result<PathBuf> {
    let source = web_dir.join(SCRIPT_NAME);
    let target = web_dir.join(versioned_script_name(version));
    fs::rename(&source, &target).with_context(|| {
        format!(
            "failed to rename {} to {}",
            source.display(),
            target.display()
        )
    })?;
    Ok(target)
}

/// Copies the auxiliary redirect page into the build output.
pub fn copy_redirect_page(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest).with_context(|| {
        format!("failed to copy {} to {}", source.display(), dest.display())
    })?;
    Ok(())
}
