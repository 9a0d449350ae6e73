use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

pub mod io;

pub mod error;

mod util;
pub use util::is_instance_name;

pub mod graph;
pub use graph::*;

pub use error::{ParseError, ScanError};
pub use io::{EdgeErrorPolicy, InstanceStats};

/// One output line of a directory scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub nodes: usize,
    pub edges: usize,
    pub max_degree: usize,
    /// 1-indexed, as in the instance file
    pub max_vertex: Option<u64>,
    pub min_degree: usize,
    /// 1-indexed, as in the instance file
    pub min_vertex: Option<u64>,
    #[serde(skip)]
    pub malformed_lines: Vec<String>,
}

impl FileReport {
    pub fn new(file: String, stats: InstanceStats) -> Self {
        FileReport {
            file,
            nodes: stats.nodes,
            edges: stats.edges,
            max_degree: stats.max_degree(),
            max_vertex: stats.degrees.max_vertex().map(|v| v as u64 + 1),
            min_degree: stats.degrees.min_degree(),
            min_vertex: stats.degrees.min_vertex().map(|v| v as u64 + 1),
            malformed_lines: stats.malformed_lines,
        }
    }
}

/// `<filename>\t<max_degree>`
impl std::fmt::Display for FileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        return write!(f, "{}\t{}", self.file, self.max_degree);
    }
}

/// Maximum vertex degree of every instance file in one directory.
#[derive(Clone, Debug)]
pub struct DegreeScanner {
    pub dir: PathBuf,
    pub sorted: bool,
    pub policy: EdgeErrorPolicy,
}

impl DegreeScanner {
    pub const DEFAULT_DIR: &'static str = "./inst/color3/";

    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        DegreeScanner { dir: dir.into(), sorted: false, policy: EdgeErrorPolicy::default() }
    }

    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        return self;
    }

    pub fn policy(mut self, policy: EdgeErrorPolicy) -> Self {
        self.policy = policy;
        return self;
    }

    /// Names and paths of the files that will be scanned, no recursion.
    /// Enumeration order unless `sorted`.
    pub fn instance_files(&self) -> Result<Vec<(String, PathBuf)>, ScanError> {
        let read_dir_err = |source| ScanError::ReadDir { path: self.dir.clone(), source };
        let mut files = vec![];
        for entry in std::fs::read_dir(&self.dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_instance_name(&name) {
                debug!("skipping {name}");
                continue;
            }
            let path = entry.path();
            if path.is_dir() {
                debug!("skipping directory {name}");
                continue;
            }
            files.push((name, path));
        }
        if self.sorted {
            files.sort();
        }
        return Ok(files);
    }

    /// Scans the files one after another and hands each report to `f`. Stops at the first error.
    pub fn scan_each<F: FnMut(FileReport)>(&self, f: F) -> Result<(), ScanError> {
        return self.scan_each_with(|_, _| {}, f);
    }

    /// Like `scan_each`; `on_malformed(file, line)` sees every malformed edge line as soon as it is
    /// read, including those of a file that later fails.
    pub fn scan_each_with<M, F>(&self, mut on_malformed: M, mut f: F) -> Result<(), ScanError>
    where
        M: FnMut(&str, &str),
        F: FnMut(FileReport),
    {
        for (name, path) in self.instance_files()? {
            let stats = io::scan_file_with(&path, self.policy, |line| on_malformed(&name, line))?;
            f(FileReport::new(name, stats));
        }
        return Ok(());
    }

    pub fn scan_directory(&self) -> Result<Vec<FileReport>, ScanError> {
        let mut reports = vec![];
        self.scan_each(|r| reports.push(r))?;
        return Ok(reports);
    }

    pub fn scan_file<P: AsRef<Path>>(&self, path: P) -> Result<usize, ScanError> {
        return io::scan_file(path, self.policy).map(|s| s.max_degree());
    }
}

impl Default for DegreeScanner {
    fn default() -> Self {
        DegreeScanner::new(Self::DEFAULT_DIR)
    }
}

pub mod examples {
    //! Small instance files for tests and demos.

    /// nodes 5, edges (1,2),(2,3),(2,4): degrees [1,3,1,1,0]
    pub const SMALL: &str = "c small example\np edge 5 3\ne 1 2\ne 2 3\ne 2 4\n";

    pub const NO_EDGES: &str = "p edge 4 0\n";

    /// a triangle with comments and blank lines in between
    pub const COMMENTED: &str = "c FILE: triangle\nc\n\np edge 3 3\n\ne 1 2\n  e 2 3  \nc trailing\ne 3 1\n\n";

    pub const MALFORMED: &str = "p edge 4 3\ne 1 2\ne x y\ne 3 4\n";
}
