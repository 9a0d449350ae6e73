use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fatal problems inside one instance file. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line_no}: malformed header {line:?}")]
    MalformedHeader { line_no: usize, line: String },

    #[error("line {line_no}: header declares no vertices")]
    EmptyHeader { line_no: usize },

    #[error("line {line_no}: edge before header")]
    HeaderMissing { line_no: usize },

    #[error("no header line found")]
    NoHeader,

    #[error("line {line_no}: vertex {vertex} out of range 1..={nnodes}")]
    VertexOutOfRange { line_no: usize, vertex: i64, nnodes: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot list directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: std::io::Error },

    #[error("cannot read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("{}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
}

impl ScanError {
    /// Attach the file name to a parse failure; read failures become `Io`.
    pub fn in_file(path: &Path, err: ParseError) -> Self {
        let path = path.to_path_buf();
        match err {
            ParseError::Io(source) => ScanError::Io { path, source },
            source => ScanError::Parse { path, source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ScanError::ReadDir { path, .. } | ScanError::Io { path, .. } | ScanError::Parse { path, .. } => path,
        }
    }
}

#[test]
fn test_messages() {
    let e = ScanError::in_file(Path::new("inst/g.col"), ParseError::VertexOutOfRange { line_no: 3, vertex: 7, nnodes: 5 });
    assert_eq!(e.to_string(), "inst/g.col: line 3: vertex 7 out of range 1..=5");
    assert_eq!(e.path(), Path::new("inst/g.col"));

    let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
    let e = ScanError::in_file(Path::new("x"), ParseError::Io(io));
    assert!(matches!(e, ScanError::Io { .. }));
    assert_eq!(e.to_string(), "cannot read x: boom");
}
