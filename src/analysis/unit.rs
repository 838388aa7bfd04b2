//! Compilation unit: every source file of a run, parsed once and kept alive.
//!
//! The unit provides:
//! - Parallel loading and parsing of the discovered files
//! - Pulling in files reached through relative imports
//! - The syntax pre-flight check over all files
//! - Cross-file lookup of named type declarations
//! - Paths relative to the invocation directory for output keys

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::{
    get_analyzer, LanguageAnalyzer, ModuleLink, ModuleLinkKind, ParsedFile, TypeDeclaration,
};
use crate::error::{DocgenError, Result};

/// How many `export ... from` hops a type lookup follows.
const MAX_REEXPORT_DEPTH: usize = 8;

/// All source files of a run.
///
/// The requested files come first, in discovery order, followed by the
/// files they import. Only the requested files are documented.
#[derive(Debug)]
pub struct CompilationUnit {
    /// Base directory for relative path rendering.
    base_dir: PathBuf,
    files: Vec<ParsedFile>,
    targets: usize,
}

impl CompilationUnit {
    /// Read and parse `paths`, then every file reachable from them through
    /// relative imports and re-exports.
    ///
    /// Order of `paths` is kept as discovery order. Files are parsed in
    /// parallel; the first I/O or parser failure aborts.
    pub fn load<P: AsRef<Path>>(base_dir: P, paths: &[PathBuf]) -> Result<Self> {
        let mut unit = Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            files: parse_files(paths)?,
            targets: paths.len(),
        };
        unit.load_dependencies()?;

        tracing::debug!(
            files = unit.files.len(),
            targets = unit.targets,
            "loaded compilation unit"
        );
        Ok(unit)
    }

    /// Build a unit from in-memory sources. Every source is a target.
    pub fn from_sources<P, I, S>(base_dir: P, sources: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = (PathBuf, S)>,
        S: AsRef<str>,
    {
        let files = sources
            .into_iter()
            .map(|(path, source)| analyzer_for_path(&path)?.parse(&path, source.as_ref().as_bytes()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            targets: files.len(),
            files,
        })
    }

    /// Breadth-first walk over relative module links, parsing each newly
    /// reached file once.
    fn load_dependencies(&mut self) -> Result<()> {
        let mut known: HashSet<PathBuf> = self.files.iter().map(|f| f.path.clone()).collect();
        let mut start = 0;

        loop {
            let mut pending = Vec::new();
            for file in &self.files[start..] {
                for link in self.analyzer(file)?.module_links(file)? {
                    if !link.is_relative() {
                        continue;
                    }
                    let found = module_candidates(&file.path, &link.specifier)
                        .into_iter()
                        .find(|candidate| candidate.is_file());
                    match found {
                        Some(path) => {
                            if known.insert(path.clone()) {
                                pending.push(path);
                            }
                        }
                        None => tracing::debug!(
                            specifier = %link.specifier,
                            from = %file.path.display(),
                            "relative import does not name a source file"
                        ),
                    }
                }
            }

            if pending.is_empty() {
                return Ok(());
            }
            start = self.files.len();
            self.files.extend(parse_files(&pending)?);
        }
    }

    /// Get the base directory.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Every file of the unit, imported files included.
    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }

    /// The requested files, in discovery order.
    pub fn targets(&self) -> &[ParsedFile] {
        &self.files[..self.targets]
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Analyzer responsible for a file of this unit.
    pub fn analyzer(&self, file: &ParsedFile) -> Result<&'static dyn LanguageAnalyzer> {
        analyzer_for_path(&file.path)
    }

    /// Fail on the first syntax error anywhere in the unit.
    pub fn check_syntax(&self) -> Result<()> {
        for file in &self.files {
            let analyzer = self.analyzer(file)?;
            if let Some(issue) = analyzer.syntax_issues(file).into_iter().next() {
                return Err(DocgenError::Syntax {
                    path: file.path.clone(),
                    line: issue.line,
                    message: issue.message,
                });
            }
        }
        Ok(())
    }

    /// Path of `file` relative to the base directory, as used for output keys.
    pub fn relative_path(&self, file: &ParsedFile) -> String {
        file.path
            .strip_prefix(&self.base_dir)
            .unwrap_or(&file.path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Find the interface or type alias that `name` refers to in `origin`.
    ///
    /// Lookup order:
    /// 1. A declaration in `origin` itself.
    /// 2. A relative import of `name` in `origin`, followed to the unit file
    ///    it names and through that file's re-exports.
    /// 3. Any other file of the unit, in order, for names that are not
    ///    imported or are imported from a package or path alias.
    ///
    /// Within a file the first declaration in source order wins.
    pub fn find_type_declaration<'a>(
        &'a self,
        name: &str,
        origin: &'a ParsedFile,
    ) -> Result<Option<(&'a ParsedFile, TypeDeclaration<'a>)>> {
        if let Some(found) = self.local_type_declaration(origin, name)? {
            return Ok(Some(found));
        }

        let links = self.analyzer(origin)?.module_links(origin)?;
        let import = links
            .iter()
            .filter(|link| link.kind == ModuleLinkKind::Import)
            .find_map(|link| {
                link.names
                    .iter()
                    .find(|n| n.local == name)
                    .map(|n| (link, n.imported.as_str()))
            });

        match import {
            Some((link, imported)) if link.is_relative() => {
                self.exported_type_declaration(origin, link, imported, MAX_REEXPORT_DEPTH)
            }
            _ => {
                for file in self.files.iter().filter(|f| !std::ptr::eq(*f, origin)) {
                    if let Some(found) = self.local_type_declaration(file, name)? {
                        return Ok(Some(found));
                    }
                }
                Ok(None)
            }
        }
    }

    /// Unit file a relative specifier written in `from` refers to.
    pub fn resolve_module(&self, from: &ParsedFile, specifier: &str) -> Option<&ParsedFile> {
        module_candidates(&from.path, specifier)
            .into_iter()
            .find_map(|candidate| self.files.iter().find(|f| f.path == candidate))
    }

    /// Follow `link` from `from` to the declaration exported as `name`.
    fn exported_type_declaration<'a>(
        &'a self,
        from: &ParsedFile,
        link: &ModuleLink,
        name: &str,
        depth: usize,
    ) -> Result<Option<(&'a ParsedFile, TypeDeclaration<'a>)>> {
        let Some(target) = self.resolve_module(from, &link.specifier) else {
            tracing::debug!(
                specifier = %link.specifier,
                from = %from.path.display(),
                "imported module is not part of the unit"
            );
            return Ok(None);
        };

        if let Some(found) = self.local_type_declaration(target, name)? {
            return Ok(Some(found));
        }
        if depth == 0 {
            return Ok(None);
        }

        for reexport in self.analyzer(target)?.module_links(target)? {
            if reexport.kind != ModuleLinkKind::ReExport || !reexport.is_relative() {
                continue;
            }
            let forwarded = if reexport.wildcard {
                Some(name)
            } else {
                reexport
                    .names
                    .iter()
                    .find(|n| n.local == name)
                    .map(|n| n.imported.as_str())
            };
            let Some(forwarded) = forwarded else {
                continue;
            };
            if let Some(found) = self.exported_type_declaration(target, &reexport, forwarded, depth - 1)? {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    fn local_type_declaration<'a>(
        &'a self,
        file: &'a ParsedFile,
        name: &str,
    ) -> Result<Option<(&'a ParsedFile, TypeDeclaration<'a>)>> {
        let analyzer = self.analyzer(file)?;
        let found = analyzer.type_declarations(file)?.into_iter().find(|decl| {
            decl.node
                .child_by_field_name("name")
                .map(|n| file.node_text(n) == name)
                .unwrap_or(false)
        });
        Ok(found.map(|decl| (file, decl)))
    }
}

fn parse_files(paths: &[PathBuf]) -> Result<Vec<ParsedFile>> {
    paths
        .par_iter()
        .map(|path| {
            let source = fs::read(path).map_err(|source| DocgenError::Io {
                path: path.clone(),
                source,
            })?;
            analyzer_for_path(path)?.parse(path, &source)
        })
        .collect()
}

fn analyzer_for_path(path: &Path) -> Result<&'static dyn LanguageAnalyzer> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    get_analyzer(ext).ok_or_else(|| DocgenError::UnsupportedFile {
        path: path.to_path_buf(),
    })
}

/// Files a relative specifier written in `from` may name, in resolution order.
fn module_candidates(from: &Path, specifier: &str) -> Vec<PathBuf> {
    let dir = from.parent().unwrap_or_else(|| Path::new(""));
    let base = normalize(&dir.join(specifier));

    let mut candidates = Vec::new();
    let ext = base.extension().and_then(|e| e.to_str());
    if ext.map(|e| get_analyzer(e).is_some()).unwrap_or(false) {
        candidates.push(base.clone());
    }
    // `./Button.js` names the compiled output of `./Button.ts(x)`.
    let stem = match ext {
        Some("js") | Some("jsx") => base.with_extension(""),
        _ => base.clone(),
    };
    for suffix in [".ts", ".tsx", ".d.ts"] {
        candidates.push(with_suffix(&stem, suffix));
    }
    for index in ["index.ts", "index.tsx"] {
        candidates.push(base.join(index));
    }
    candidates
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_keeps_discovery_order() {
        let temp = TempDir::new().unwrap();
        let b = temp.path().join("b.tsx");
        let a = temp.path().join("a.ts");
        fs::write(&b, "export const B = 1;\n").unwrap();
        fs::write(&a, "export const a = 1;\n").unwrap();

        let unit = CompilationUnit::load(temp.path(), &[b.clone(), a.clone()]).unwrap();

        assert_eq!(unit.len(), 2);
        assert_eq!(unit.files()[0].path, b);
        assert_eq!(unit.relative_path(&unit.files()[0]), "b.tsx");
        assert_eq!(unit.relative_path(&unit.files()[1]), "a.ts");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.tsx");
        let err = CompilationUnit::load(temp.path(), &[missing]).unwrap_err();
        assert!(matches!(err, DocgenError::Io { .. }));
    }

    #[test]
    fn test_check_syntax_reports_file_and_line() {
        let unit = CompilationUnit::from_sources(
            "",
            vec![
                (PathBuf::from("ok.tsx"), "export const A = 1;\n"),
                (PathBuf::from("bad.tsx"), "\n\nconst = ;\n"),
            ],
        )
        .unwrap();

        match unit.check_syntax().unwrap_err() {
            DocgenError::Syntax { path, line, .. } => {
                assert_eq!(path, PathBuf::from("bad.tsx"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_find_type_declaration_prefers_origin_file() {
        let unit = CompilationUnit::from_sources(
            "",
            vec![
                (PathBuf::from("types.ts"), "export interface Props { a: string }\n"),
                (PathBuf::from("Button.tsx"), "interface Props { b: number }\n"),
            ],
        )
        .unwrap();

        let origin = &unit.files()[1];
        let (file, _) = unit.find_type_declaration("Props", origin).unwrap().unwrap();
        assert_eq!(file.path, PathBuf::from("Button.tsx"));

        let (file, _) = unit
            .find_type_declaration("Props", &unit.files()[0])
            .unwrap()
            .unwrap();
        assert_eq!(file.path, PathBuf::from("types.ts"));
    }

    #[test]
    fn test_find_type_declaration_across_files() {
        let unit = CompilationUnit::from_sources(
            "",
            vec![
                (PathBuf::from("Button.tsx"), "export const Button = () => null;\n"),
                (PathBuf::from("types.ts"), "export type ButtonProps = { a: string };\n"),
            ],
        )
        .unwrap();

        let found = unit
            .find_type_declaration("ButtonProps", &unit.files()[0])
            .unwrap();
        assert!(found.is_some());
        assert!(unit
            .find_type_declaration("Missing", &unit.files()[0])
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_type_declaration_follows_imports() {
        let unit = CompilationUnit::from_sources(
            "",
            vec![
                (PathBuf::from("A.tsx"), "interface Props { a: string }\n"),
                (
                    PathBuf::from("B.tsx"),
                    "import { Props } from './types';\nimport { Shape as Outline } from './shapes';\n",
                ),
                (PathBuf::from("types.ts"), "export interface Props { b: number }\n"),
                (PathBuf::from("shapes/index.ts"), "export * from './outline';\n"),
                (PathBuf::from("shapes/outline.ts"), "export type Shape = { c: boolean };\n"),
            ],
        )
        .unwrap();
        let origin = &unit.files()[1];

        let (file, _) = unit.find_type_declaration("Props", origin).unwrap().unwrap();
        assert_eq!(file.path, PathBuf::from("types.ts"));

        let (file, decl) = unit.find_type_declaration("Outline", origin).unwrap().unwrap();
        assert_eq!(file.path, PathBuf::from("shapes/outline.ts"));
        assert_eq!(decl.kind, crate::analysis::TypeDeclarationKind::TypeAlias);
    }

    #[test]
    fn test_find_type_declaration_import_from_missing_module() {
        let unit = CompilationUnit::from_sources(
            "",
            vec![
                (PathBuf::from("A.tsx"), "interface Props { a: string }\n"),
                (PathBuf::from("B.tsx"), "import { Props } from './elsewhere';\n"),
            ],
        )
        .unwrap();

        assert!(unit
            .find_type_declaration("Props", &unit.files()[1])
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_load_pulls_in_imported_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("cards")).unwrap();
        fs::create_dir_all(root.join("shared")).unwrap();
        fs::write(
            root.join("cards/Card.tsx"),
            "import React from 'react';\nimport { CardProps } from './types';\nimport './card.css';\n",
        )
        .unwrap();
        fs::write(
            root.join("cards/types.ts"),
            "import { Theme } from '../shared';\nexport interface CardProps { theme: Theme }\n",
        )
        .unwrap();
        fs::write(root.join("shared/index.ts"), "export type Theme = 'light' | 'dark';\n").unwrap();
        fs::write(root.join("cards/card.css"), ".card {}\n").unwrap();

        let unit = CompilationUnit::load(root, &[root.join("cards/Card.tsx")]).unwrap();

        assert_eq!(unit.targets().len(), 1);
        let loaded: Vec<String> = unit.files().iter().map(|f| unit.relative_path(f)).collect();
        assert_eq!(loaded, vec!["cards/Card.tsx", "cards/types.ts", "shared/index.ts"]);
    }

    #[test]
    fn test_module_candidates() {
        let candidates = module_candidates(Path::new("src/cards/Card.tsx"), "../shared/theme.js");
        assert_eq!(candidates[0], PathBuf::from("src/shared/theme.ts"));
        assert_eq!(candidates[1], PathBuf::from("src/shared/theme.tsx"));
        assert!(candidates.contains(&PathBuf::from("src/shared/theme.js/index.ts")));

        let candidates = module_candidates(Path::new("Card.tsx"), "./types.ts");
        assert_eq!(candidates[0], PathBuf::from("types.ts"));
    }
}
