//! Static project template
//!
//! The directory tree and files of a generated project. File bodies are
//! embedded from `templates/react/` at compile time; the only substitution is
//! the app name in the HTML title.

pub mod materialize;

pub use materialize::{create_directories, write_files};

/// Placeholder replaced with the application name in template bodies
pub const APP_NAME_PLACEHOLDER: &str = "{{app_name}}";

/// A directory to create, relative to the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirSpec {
    pub path: &'static str,
}

/// A file to write, relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: &'static str,
    pub content: String,
}

const DIRECTORIES: &[DirSpec] = &[
    DirSpec { path: "src" },
    DirSpec { path: "src/components" },
    DirSpec { path: "src/constants" },
    DirSpec { path: "src/data" },
    DirSpec { path: "src/helpers" },
    DirSpec { path: "src/stylesheets" },
    DirSpec { path: "static" },
    DirSpec { path: "static/images" },
];

const FILES: &[(&str, &str)] = &[
    (
        "tsconfig.json",
        include_str!("../../templates/react/tsconfig.json"),
    ),
    (
        "src/index.html",
        include_str!("../../templates/react/src/index.html"),
    ),
    (
        "src/index.d.ts",
        include_str!("../../templates/react/src/index.d.ts"),
    ),
    ("src/App.tsx", include_str!("../../templates/react/src/App.tsx")),
    (
        "src/components/main.tsx",
        include_str!("../../templates/react/src/components/main.tsx"),
    ),
    (
        "src/stylesheets/main.scss",
        include_str!("../../templates/react/src/stylesheets/main.scss"),
    ),
    (".gitignore", include_str!("../../templates/react/gitignore")),
];

/// Directories of a generated project, in creation order
pub fn directories() -> &'static [DirSpec] {
    DIRECTORIES
}

/// Files of a generated project, in write order, rendered for `app_name`
pub fn files(app_name: &str) -> Vec<FileSpec> {
    FILES
        .iter()
        .map(|&(path, body)| FileSpec {
            path,
            content: body.replace(APP_NAME_PLACEHOLDER, app_name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_table_sizes() {
        assert_eq!(directories().len(), 8);
        assert_eq!(files("demo").len(), 7);
    }

    #[test]
    fn test_html_title_uses_app_name() {
        let files = files("demo");
        let html = files.iter().find(|f| f.path == "src/index.html").unwrap();
        assert!(html.content.contains("<title>demo</title>"));
        assert!(!html.content.contains(APP_NAME_PLACEHOLDER));
    }

    #[test]
    fn test_stylesheet_is_empty() {
        let files = files("demo");
        let scss = files
            .iter()
            .find(|f| f.path == "src/stylesheets/main.scss")
            .unwrap();
        assert!(scss.content.is_empty());
    }

    #[test]
    fn test_every_file_lives_in_a_listed_directory() {
        for file in files("demo") {
            if let Some((parent, _)) = file.path.rsplit_once('/') {
                assert!(
                    directories().iter().any(|d| d.path == parent),
                    "{} has no directory entry",
                    file.path
                );
            }
        }
    }
}
