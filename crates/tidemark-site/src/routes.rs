use crate::SiteError;
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};
use tidemark_config::SiteConfig;
use walkdir::WalkDir;

/// One addressable page or asset of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A file under the public dir, served/copied verbatim at the root.
    Static { path: String, file: PathBuf },
    /// A markdown post, rendered into the HTML shell under `/p/`.
    Post { path: String, file: PathBuf },
    /// The site index, backed by the shell template itself.
    Index { path: String },
}

impl Route {
    pub fn path(&self) -> &str {
        match self {
            Route::Static { path, .. } | Route::Post { path, .. } | Route::Index { path } => path,
        }
    }
}

/// Enumerates every route of the site: public files first, then posts,
/// then the index. Sorted within each group so builds are deterministic.
pub fn routes(config: &SiteConfig) -> Result<Vec<Route>, SiteError> {
    let mut out = Vec::new();

    for file in files_under(&config.public_dir)? {
        let url = url_path(&file, &config.public_dir)?;
        out.push(Route::Static {
            path: format!("/{url}"),
            file,
        });
    }

    for file in files_under(&config.posts_dir)? {
        let url = url_path(&file, &config.posts_dir)?.with_extension("html");
        out.push(Route::Post {
            path: format!("/p/{url}"),
            file,
        });
    }

    out.push(Route::Index {
        path: "/".to_string(),
    });

    Ok(out)
}

fn files_under(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| SiteError::Walk {
            dir: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// URL-shaped relative path of `file` below `root`, `/`-separated on every
/// platform.
fn url_path(file: &Path, root: &Path) -> Result<RelativePathBuf, SiteError> {
    let rel = file.strip_prefix(root).unwrap_or(file);
    RelativePathBuf::from_path(rel).map_err(|_| SiteError::NonRelativePath(file.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn site_with(posts: &[(&str, &str)], public: &[(&str, &str)]) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig {
            posts_dir: dir.path().join("posts"),
            public_dir: dir.path().join("public"),
            output_dir: dir.path().join("dist"),
            template: dir.path().join("index.html"),
            ..SiteConfig::default()
        };
        std::fs::create_dir_all(&config.posts_dir).unwrap();
        std::fs::create_dir_all(&config.public_dir).unwrap();
        for (name, content) in posts {
            let path = config.posts_dir.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        for (name, content) in public {
            let path = config.public_dir.join(name);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }
        (dir, config)
    }

    #[test]
    fn posts_map_to_html_urls() {
        let (_dir, config) = site_with(&[("hello.md", "# hi")], &[]);
        let all = routes(&config).unwrap();
        assert_eq!(all.len(), 2);
        assert!(matches!(
            &all[0],
            Route::Post { path, .. } if path == "/p/hello.html"
        ));
        assert_eq!(all[1], Route::Index { path: "/".to_string() });
    }

    #[test]
    fn public_files_come_before_posts_and_index_is_last() {
        let (_dir, config) = site_with(&[("a.md", "x")], &[("style.css", "a{}")]);
        let all = routes(&config).unwrap();
        assert!(matches!(&all[0], Route::Static { path, .. } if path == "/style.css"));
        assert!(matches!(&all[1], Route::Post { .. }));
        assert!(matches!(&all[2], Route::Index { .. }));
    }

    #[test]
    fn nested_files_keep_their_directories() {
        let (_dir, config) = site_with(&[("notes/deep.md", "x")], &[("img/logo.png", "png")]);
        let all = routes(&config).unwrap();
        assert!(
            all.iter()
                .any(|r| matches!(r, Route::Static { path, .. } if path == "/img/logo.png"))
        );
        assert!(
            all.iter()
                .any(|r| matches!(r, Route::Post { path, .. } if path == "/p/notes/deep.html"))
        );
    }

    #[test]
    fn missing_posts_dir_is_an_error() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig {
            posts_dir: dir.path().join("nope"),
            public_dir: dir.path().join("missing-too"),
            ..SiteConfig::default()
        };
        assert!(matches!(routes(&config), Err(SiteError::Walk { .. })));
    }
}
