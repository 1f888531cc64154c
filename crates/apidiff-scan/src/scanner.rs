//! Walks two directory forests in step and diffs the files they share.
//!
//! Entries are visited in sorted name order so the event stream is the same
//! on every run. A directory or file that cannot be read is recorded in
//! [`DiffReport::skipped`] and the walk continues.

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use apidiff_engine::{DiffEngine, DiffEvent, EventSink};
use apidiff_types::Node;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::digest::ContentDigest;
use crate::error::{ScanError, ScanResult};
use crate::flatten::{diff_forests, report_one_sided};
use crate::report::{DiffReport, SkippedUnit};
use crate::source::{DeclarationSource, JsonTreeSource};

/// Which root a one-sided entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Old,
    New,
}

/// Pairs two directory trees of declaration dumps and diffs them.
pub struct Scanner {
    engine: DiffEngine,
    config: ScanConfig,
    source: Box<dyn DeclarationSource>,
}

impl Scanner {
    /// A scanner reading JSON dumps with the configured extensions.
    pub fn new(engine: DiffEngine, config: ScanConfig) -> Self {
        let source = Box::new(JsonTreeSource::new(config.extensions.clone()));
        Self {
            engine,
            config,
            source,
        }
    }

    /// Replace the declaration source.
    pub fn with_source(mut self, source: Box<dyn DeclarationSource>) -> Self {
        self.source = source;
        self
    }

    pub fn engine(&self) -> &DiffEngine {
        &self.engine
    }

    /// Compare every declaration dump under `old_root` with its counterpart
    /// under `new_root`.
    pub fn scan(&self, old_root: &Path, new_root: &Path) -> ScanResult<DiffReport> {
        for root in [old_root, new_root] {
            if !root.is_dir() {
                return Err(ScanError::NotADirectory(root.to_path_buf()));
            }
        }

        let mut run = Run {
            scanner: self,
            old_root,
            new_root,
            sink: EventSink::new(),
            report: DiffReport::new(old_root, new_root),
        };
        run.pair_dirs(Path::new(""));

        let mut report = run.report;
        report.events = run.sink.into_events();
        info!(
            compared = report.files_compared,
            one_sided = report.files_one_sided,
            events = report.events.len(),
            breaking = report.breaking().count(),
            skipped = report.skipped.len(),
            "scan complete"
        );
        Ok(report)
    }

    /// Diff two individual declaration dumps.
    pub fn diff_files(&self, old_path: &Path, new_path: &Path) -> ScanResult<Vec<DiffEvent>> {
        let old = self.load(old_path, None)?;
        let new = self.load(new_path, None)?;
        let mut sink = EventSink::new();
        diff_forests(&self.engine, &old, &new, &mut sink);
        Ok(sink.into_events())
    }

    fn read(&self, path: &Path) -> ScanResult<Vec<u8>> {
        fs::read(path).map_err(|e| ScanError::io(path, e))
    }

    /// Load a forest; declarations without a file location get `relative`.
    fn load(&self, path: &Path, relative: Option<&Path>) -> ScanResult<Vec<Node>> {
        let bytes = self.read(path)?;
        self.decode(path, &bytes, relative)
    }

    fn decode(&self, path: &Path, bytes: &[u8], relative: Option<&Path>) -> ScanResult<Vec<Node>> {
        let mut forest = self.source.load(path, bytes)?;
        if let Some(relative) = relative {
            let file = relative.to_string_lossy();
            for root in &mut forest {
                fill_location(root, &file);
            }
        }
        Ok(forest)
    }
}

fn fill_location(node: &mut Node, file: &str) {
    if node.location.file.is_empty() {
        node.location.file = file.to_string();
    }
    for slot in [&mut node.members, &mut node.parameters, &mut node.children] {
        for child in slot.iter_mut().flatten() {
            fill_location(child, file);
        }
    }
}

/// State of one `scan` call.
struct Run<'a> {
    scanner: &'a Scanner,
    old_root: &'a Path,
    new_root: &'a Path,
    sink: EventSink,
    report: DiffReport,
}

impl Run<'_> {
    fn skip(&mut self, path: PathBuf, error: &ScanError) {
        warn!(path = %path.display(), %error, "skipping");
        self.report.skipped.push(SkippedUnit {
            path,
            reason: error.to_string(),
        });
    }

    fn list(&mut self, dir: &Path) -> Option<BTreeSet<OsString>> {
        match fs::read_dir(dir) {
            Ok(entries) => {
                let mut names = BTreeSet::new();
                for entry in entries {
                    match entry {
                        Ok(entry) => {
                            names.insert(entry.file_name());
                        }
                        Err(e) => self.skip(dir.to_path_buf(), &ScanError::io(dir, e)),
                    }
                }
                Some(names)
            }
            Err(e) => {
                self.skip(dir.to_path_buf(), &ScanError::io(dir, e));
                None
            }
        }
    }

    /// Pair the entries of `relative` under both roots.
    fn pair_dirs(&mut self, relative: &Path) {
        let old_dir = self.old_root.join(relative);
        let new_dir = self.new_root.join(relative);
        let (Some(old_names), Some(new_names)) = (self.list(&old_dir), self.list(&new_dir)) else {
            return;
        };

        for name in old_names.union(&new_names) {
            let rel = relative.join(name);
            let old_path = self.old_root.join(&rel);
            let new_path = self.new_root.join(&rel);

            match (old_names.contains(name), new_names.contains(name)) {
                (true, true) => match (old_path.is_dir(), new_path.is_dir()) {
                    (true, true) => self.pair_dirs(&rel),
                    (false, false) => self.pair_files(&rel),
                    // A file replaced by a directory or the reverse.
                    _ => {
                        self.one_sided(&rel, Side::Old);
                        self.one_sided(&rel, Side::New);
                    }
                },
                (true, false) => self.one_sided(&rel, Side::Old),
                _ => self.one_sided(&rel, Side::New),
            }
        }
    }

    fn pair_files(&mut self, relative: &Path) {
        let old_path = self.old_root.join(relative);
        let new_path = self.new_root.join(relative);
        if !self.scanner.source.accepts(&old_path) {
            return;
        }

        let old_bytes = match self.scanner.read(&old_path) {
            Ok(bytes) => bytes,
            Err(e) => return self.skip(old_path, &e),
        };
        let new_bytes = match self.scanner.read(&new_path) {
            Ok(bytes) => bytes,
            Err(e) => return self.skip(new_path, &e),
        };

        let old_digest = ContentDigest::of(&old_bytes);
        let new_digest = ContentDigest::of(&new_bytes);
        if self.scanner.config.skip_identical && old_digest == new_digest {
            debug!(path = %relative.display(), digest = %old_digest.short(), "identical, skipped");
            return;
        }

        let old = match self.scanner.decode(&old_path, &old_bytes, Some(relative)) {
            Ok(forest) => forest,
            Err(e) => return self.skip(old_path, &e),
        };
        let new = match self.scanner.decode(&new_path, &new_bytes, Some(relative)) {
            Ok(forest) => forest,
            Err(e) => return self.skip(new_path, &e),
        };

        let before = self.sink.len();
        diff_forests(&self.scanner.engine, &old, &new, &mut self.sink);
        self.report.files_compared += 1;
        debug!(
            path = %relative.display(),
            old = %old_digest.short(),
            new = %new_digest.short(),
            events = self.sink.len() - before,
            "compared"
        );
    }

    /// Report every accepted file under `relative` on one side only.
    fn one_sided(&mut self, relative: &Path, side: Side) {
        let root = match side {
            Side::Old => self.old_root,
            Side::New => self.new_root,
        };
        let start = root.join(relative);

        let walker = WalkDir::new(&start)
            .follow_links(self.scanner.config.follow_links)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| start.clone());
                    let error = match e.into_io_error() {
                        Some(io) => ScanError::io(&path, io),
                        None => ScanError::io(&path, std::io::Error::other("filesystem loop")),
                    };
                    self.skip(path, &error);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.scanner.source.accepts(entry.path()) {
                continue;
            }

            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let forest = match self.scanner.load(entry.path(), Some(rel)) {
                Ok(forest) => forest,
                Err(e) => {
                    self.skip(entry.path().to_path_buf(), &e);
                    continue;
                }
            };
            report_one_sided(&self.scanner.engine, &forest, side == Side::New, &mut self.sink);
            self.report.files_one_sided += 1;
            debug!(path = %rel.display(), ?side, "one-sided file");
        }
    }
}
