use crate::routes::{Route, routes};
use crate::{SiteError, page};
use std::fs;
use std::path::Path;
use tidemark_config::SiteConfig;
use tracing::{debug, info};

/// Builds the whole site into the output directory.
///
/// The output dir is cleared first. Static files copy verbatim, posts
/// render through the markdown pipeline into the shell template, and the
/// index route copies the shell itself. Dotfiles never reach the output.
pub fn build(config: &SiteConfig) -> Result<(), SiteError> {
    let out_dir = &config.output_dir;
    if out_dir.exists() {
        fs::remove_dir_all(out_dir)?;
    }
    fs::create_dir_all(out_dir)?;

    let template = fs::read_to_string(&config.template)?;
    let all = routes(config)?;
    info!(routes = all.len(), out = %out_dir.display(), "building site");

    for route in all {
        let target = match &route {
            Route::Index { .. } => out_dir.join("index.html"),
            other => out_dir.join(other.path().trim_start_matches('/')),
        };
        if is_hidden(&target) {
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        match route {
            Route::Static { file, .. } => {
                fs::copy(&file, &target)?;
                debug!(file = %file.display(), "copied static file");
            }
            Route::Post { file, .. } => {
                let markdown = fs::read_to_string(&file)?;
                let html = page::render_page(&template, &markdown)?;
                fs::write(&target, html)?;
                debug!(file = %file.display(), "rendered post");
            }
            Route::Index { .. } => {
                fs::copy(&config.template, &target)?;
            }
        }
    }

    Ok(())
}

fn is_hidden(target: &Path) -> bool {
    target
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}
