use anyhow::{Result, bail};

use crate::artifacts::{
    SCRIPT_NAME, copy_redirect_page, rename_script_artifact, stamp_entry_html,
    versioned_script_name, write_version_constant,
};
use crate::config::Config;
use crate::tools::Toolchain;

/// Runs the full build-stamp-deploy sequence once. Any step failure halts
/// the pipeline; there is no retry and no rollback.
pub fn deploy_once(config: &Config) -> Result<()> {
    let toolchain = Toolchain::new(&config.flutter_bin, &config.project_root);

    println!("Cleaning previous build output");
    toolchain.clean()?;

    println!(
        "Stamping version {} into {}",
        config.version,
        config.constants_file.display()
    );
    write_version_constant(&config.constants_file, &config.version)?;

    println!("Building web release");
    toolchain.build_web()?;

    println!("Copying redirect page into {}", config.web_output_dir.display());
    copy_redirect_page(&config.redirect_source, &config.redirect_dest)?;

    let versioned = versioned_script_name(&config.version);
    println!(
        "Rewriting {} to reference {versioned}",
        config.entry_html.display()
    );
    let replacements = stamp_entry_html(&config.entry_html, &config.version)?;
    if replacements == 0 {
        bail!(
            "{} does not reference {SCRIPT_NAME}; refusing to publish an unstamped build",
            config.entry_html.display()
        );
    }

    println!("Renaming {SCRIPT_NAME} to {versioned}");
    rename_script_artifact(&config.web_output_dir, &config.version)?;

    match &config.firebase_bin {
        Some(firebase) => {
            println!("Deploying to Firebase Hosting");
            toolchain.deploy(firebase)?;
            println!("Deployed version {}", config.version);
        }
        None => println!("Skipping deploy (--skip-deploy)"),
    }

    Ok(())
}
