//! The I/O layer around the parsing core: route enumeration, page
//! templating, CSS minification, and the file-copy build driver.

pub mod build;
pub mod css;
pub mod page;
pub mod routes;

use std::path::PathBuf;
use thiserror::Error;

pub use build::build;
pub use css::minify_css;
pub use page::{MAIN_SLOT, render_page};
pub use routes::{Route, routes};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to walk {dir}: {source}")]
    Walk {
        dir: PathBuf,
        source: walkdir::Error,
    },
    #[error("Path escapes the site root: {0}")]
    NonRelativePath(PathBuf),
    #[error(transparent)]
    Render(#[from] tidemark_render::RenderError),
}
