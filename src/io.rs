use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{ParseError, ScanError};
use crate::graph::*;

/// What to do with an edge line whose endpoints do not parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeErrorPolicy {
    /// report the line and leave the degrees alone
    #[default]
    Skip,
    /// report the line, then count the edge with the endpoints remembered from
    /// earlier edge lines, like the old stats script did
    ReuseLast,
}

/// `p edge <nodes> <edges>`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub nodes: usize,
    pub declared_edges: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Header(&'a str),
    Edge(&'a str),
    Other,
}

impl<'a> Line<'a> {
    /// Only the first character matters, so `problem ...` is a header as well.
    pub fn classify(raw: &'a str) -> Self {
        let line = raw.trim();
        match line.chars().next() {
            None => Line::Blank,
            Some('p') => Line::Header(line),
            Some('e') => Line::Edge(line),
            Some(_) => Line::Other,
        }
    }
}

/// Fields are separated by single spaces; field 2 is the vertex count.
pub fn parse_header(line: &str, line_no: usize) -> Result<Header, ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();
    let nodes: usize = match fields.get(2).map(|f| f.parse()) {
        Some(Ok(n)) => n,
        _ => return Err(ParseError::MalformedHeader { line_no, line: line.to_string() }),
    };
    if nodes == 0 {
        return Err(ParseError::EmptyHeader { line_no });
    }
    let declared_edges = fields.get(3).and_then(|f| f.parse().ok());
    return Ok(Header { nodes, declared_edges });
}

/// Both endpoints of an edge line, 1-indexed as written. `None` where a field is missing or not an integer.
pub fn parse_edge(line: &str) -> [Option<i64>; 2] {
    let mut fields = line.split_whitespace().skip(1);
    let v1 = fields.next().and_then(|f| f.parse().ok());
    let v2 = fields.next().and_then(|f| f.parse().ok());
    return [v1, v2];
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceStats {
    pub nodes: usize,
    pub declared_edges: Option<usize>,
    /// edge lines since the last header, counted or not
    pub edge_lines: usize,
    /// edge lines whose endpoints were counted
    pub edges: usize,
    /// raw text of every edge line that failed to parse
    pub malformed_lines: Vec<String>,
    pub degrees: DegreeTable,
}

impl InstanceStats {
    pub fn max_degree(&self) -> usize {
        return self.degrees.max_degree();
    }

    fn new(header: Header) -> Self {
        InstanceStats {
            nodes: header.nodes,
            declared_edges: header.declared_edges,
            edge_lines: 0,
            edges: 0,
            malformed_lines: vec![],
            degrees: DegreeTable::new_disconnected(header.nodes),
        }
    }
}

/// Line-at-a-time state machine over one instance. Nothing is counted until a header was seen.
#[derive(Debug)]
pub struct InstanceScanner {
    policy: EdgeErrorPolicy,
    stats: Option<InstanceStats>,
    // every malformed edge line of the input, across header resets
    malformed: Vec<String>,
    // endpoints of earlier edge lines, for ReuseLast
    last: [Option<i64>; 2],
}

impl InstanceScanner {
    pub fn new(policy: EdgeErrorPolicy) -> Self {
        InstanceScanner { policy, stats: None, malformed: vec![], last: [None, None] }
    }

    /// Malformed edge lines seen so far, oldest first.
    pub fn malformed_lines(&self) -> &[String] {
        return &self.malformed;
    }

    pub fn feed_line(&mut self, raw: &str, line_no: usize) -> Result<(), ParseError> {
        match Line::classify(raw) {
            Line::Header(line) => {
                let header = parse_header(line, line_no)?;
                if self.stats.is_some() {
                    debug!("line {line_no}: header resets the degree table");
                }
                self.stats = Some(InstanceStats::new(header));
            }
            Line::Edge(line) => self.feed_edge(line, line_no)?,
            Line::Blank | Line::Other => {}
        }
        return Ok(());
    }

    fn feed_edge(&mut self, line: &str, line_no: usize) -> Result<(), ParseError> {
        let stats = match self.stats.as_mut() {
            Some(s) => s,
            None => return Err(ParseError::HeaderMissing { line_no }),
        };
        stats.edge_lines += 1;
        let parsed = parse_edge(line);
        let endpoints = if parsed[0].is_some() && parsed[1].is_some() {
            self.last = parsed;
            parsed
        } else {
            warn!("line {line_no}: cannot parse edge {line:?}");
            self.malformed.push(line.to_string());
            match self.policy {
                EdgeErrorPolicy::Skip => return Ok(()),
                EdgeErrorPolicy::ReuseLast => {
                    // the endpoints are read in order and the first failure stops the line,
                    // so a good second field after a bad first one is never taken
                    if parsed[0].is_some() {
                        self.last[0] = parsed[0];
                    }
                    self.last
                }
            }
        };
        let (v1, v2) = match endpoints {
            [Some(v1), Some(v2)] => (v1, v2),
            _ => {
                debug!("line {line_no}: no earlier endpoints to reuse");
                return Ok(());
            }
        };
        let a = to_node(v1, stats.nodes, line_no)?;
        let b = to_node(v2, stats.nodes, line_no)?;
        stats.degrees.add_edge(a, b);
        stats.edges += 1;
        return Ok(());
    }

    pub fn finish(self) -> Result<InstanceStats, ParseError> {
        let mut stats = self.stats.ok_or(ParseError::NoHeader)?;
        stats.malformed_lines = self.malformed;
        return Ok(stats);
    }
}

/// 1-indexed vertex from the file to zero-indexed node.
fn to_node(vertex: i64, nnodes: usize, line_no: usize) -> Result<Node, ParseError> {
    if vertex < 1 || vertex as u64 > nnodes as u64 || vertex > Node::MAX as i64 {
        return Err(ParseError::VertexOutOfRange { line_no, vertex, nnodes });
    }
    return Ok((vertex - 1) as Node);
}

pub fn scan_reader<R: BufRead>(reader: R, policy: EdgeErrorPolicy) -> Result<InstanceStats, ParseError> {
    return scan_reader_with(reader, policy, |_| {});
}

/// Like `scan_reader`, but hands every malformed edge line to `on_malformed` as soon as it is read,
/// so lines before a fatal error are reported too.
pub fn scan_reader_with<R, F>(reader: R, policy: EdgeErrorPolicy, mut on_malformed: F) -> Result<InstanceStats, ParseError>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut scanner = InstanceScanner::new(policy);
    for (i, line) in reader.lines().enumerate() {
        let before = scanner.malformed_lines().len();
        let fed = scanner.feed_line(&line?, i + 1);
        for bad in &scanner.malformed_lines()[before..] {
            on_malformed(bad);
        }
        fed?;
    }
    return scanner.finish();
}

pub fn scan_str(content: &str, policy: EdgeErrorPolicy) -> Result<InstanceStats, ParseError> {
    return scan_reader(content.as_bytes(), policy);
}

/// Reads one instance file. The file is closed again before this returns, on errors too.
pub fn scan_file<P: AsRef<Path>>(path: P, policy: EdgeErrorPolicy) -> Result<InstanceStats, ScanError> {
    return scan_file_with(path, policy, |_| {});
}

pub fn scan_file_with<P, F>(path: P, policy: EdgeErrorPolicy, on_malformed: F) -> Result<InstanceStats, ScanError>
where
    P: AsRef<Path>,
    F: FnMut(&str),
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScanError::Io { path: path.to_path_buf(), source })?;
    let stats = scan_reader_with(BufReader::new(file), policy, on_malformed).map_err(|e| ScanError::in_file(path, e))?;
    info!("read instance {} with {} vertices and {} edges", path.display(), stats.nodes, stats.edges);
    if let Some(declared) = stats.declared_edges {
        if declared != stats.edge_lines {
            warn!("{}: header declares {} edges, found {} edge lines", path.display(), declared, stats.edge_lines);
        }
    }
    return Ok(stats);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::examples;

    #[test]
    fn classify_lines() {
        assert_eq!(Line::classify(""), Line::Blank);
        assert_eq!(Line::classify("   \t "), Line::Blank);
        assert_eq!(Line::classify("  p edge 5 3 "), Line::Header("p edge 5 3"));
        assert_eq!(Line::classify("e 1 2\n"), Line::Edge("e 1 2"));
        assert_eq!(Line::classify("c comment"), Line::Other);
        assert_eq!(Line::classify("x 1 2"), Line::Other);
    }

    #[test]
    fn header_fields() {
        assert_eq!(parse_header("p edge 5 3", 1).unwrap(), Header { nodes: 5, declared_edges: Some(3) });
        assert_eq!(parse_header("p col 11", 1).unwrap(), Header { nodes: 11, declared_edges: None });
        assert_eq!(parse_header("p edge 4 x", 1).unwrap(), Header { nodes: 4, declared_edges: None });
        // single spaces only: a double space shifts the fields
        assert!(matches!(parse_header("p edge  5 3", 2), Err(ParseError::MalformedHeader { line_no: 2, .. })));
        assert!(matches!(parse_header("p edge", 1), Err(ParseError::MalformedHeader { .. })));
        assert!(matches!(parse_header("p edge -3 1", 1), Err(ParseError::MalformedHeader { .. })));
        assert!(matches!(parse_header("p edge 0 0", 7), Err(ParseError::EmptyHeader { line_no: 7 })));
    }

    #[test]
    fn edge_fields() {
        assert_eq!(parse_edge("e 1 2"), [Some(1), Some(2)]);
        assert_eq!(parse_edge("e\t3    4"), [Some(3), Some(4)]);
        assert_eq!(parse_edge("e x y"), [None, None]);
        assert_eq!(parse_edge("e 5 y"), [Some(5), None]);
        assert_eq!(parse_edge("e 5"), [Some(5), None]);
        assert_eq!(parse_edge("e"), [None, None]);
    }

    #[test]
    fn small_instance() {
        let s = scan_str(examples::SMALL, EdgeErrorPolicy::Skip).unwrap();
        assert_eq!(s.degrees.degrees(), &[1, 3, 1, 1, 0]);
        assert_eq!(s.max_degree(), 3);
        assert_eq!(s.nodes, 5);
        assert_eq!(s.declared_edges, Some(3));
        assert_eq!(s.edges, 3);
        assert_eq!(s.degrees.degree_sum(), 2 * s.edges);
        assert!(s.malformed_lines.is_empty());
    }

    #[test]
    fn no_edges() {
        let s = scan_str(examples::NO_EDGES, EdgeErrorPolicy::Skip).unwrap();
        assert_eq!(s.max_degree(), 0);
        assert_eq!(s.edges, 0);
    }

    #[test]
    fn comments_and_blank_lines() {
        let s = scan_str(examples::COMMENTED, EdgeErrorPolicy::Skip).unwrap();
        assert_eq!(s.degrees.degrees(), &[2, 2, 2]);
        assert_eq!(s.max_degree(), 2);
    }

    #[test]
    fn malformed_edge_skip() {
        let s = scan_str(examples::MALFORMED, EdgeErrorPolicy::Skip).unwrap();
        assert_eq!(s.malformed_lines, vec!["e x y".to_string()]);
        assert_eq!(s.degrees.degrees(), &[1, 1, 1, 1]);
        assert_eq!(s.edges, 2);
        assert_eq!(s.edge_lines, 3);
        assert_eq!(s.degrees.degree_sum(), 2 * s.edges);
    }

    #[test]
    fn malformed_edge_reuse_last() {
        // e x y counts (1,2) a second time
        let s = scan_str(examples::MALFORMED, EdgeErrorPolicy::ReuseLast).unwrap();
        assert_eq!(s.malformed_lines, vec!["e x y".to_string()]);
        assert_eq!(s.degrees.degrees(), &[2, 2, 1, 1]);
        assert_eq!(s.max_degree(), 2);
        assert_eq!(s.edges, 3);
    }

    #[test]
    fn reuse_last_half_parsed() {
        let input = "p edge 4 3\ne 1 2\ne 3 y\n";
        let s = scan_str(input, EdgeErrorPolicy::ReuseLast).unwrap();
        // (3, 2): first endpoint fresh, second one stale
        assert_eq!(s.degrees.degrees(), &[1, 2, 1, 0]);

        let s = scan_str(input, EdgeErrorPolicy::Skip).unwrap();
        assert_eq!(s.degrees.degrees(), &[1, 1, 0, 0]);
    }

    #[test]
    fn reuse_last_bad_first_field() {
        // the bad first field stops the line, so the good 3 is not taken either
        let input = "p edge 4 3\ne 1 2\ne x 3\n";
        let s = scan_str(input, EdgeErrorPolicy::ReuseLast).unwrap();
        assert_eq!(s.degrees.degrees(), &[2, 2, 0, 0]);
        assert_eq!(s.edges, 2);

        // a later good line still counts normally
        let s = scan_str("p edge 4 3\ne 1 2\ne x 3\ne 3 4\n", EdgeErrorPolicy::ReuseLast).unwrap();
        assert_eq!(s.degrees.degrees(), &[2, 2, 1, 1]);
    }

    #[test]
    fn reuse_last_missing_second_field() {
        let s = scan_str("p edge 4 2\ne 1 2\ne 4\n", EdgeErrorPolicy::ReuseLast).unwrap();
        assert_eq!(s.degrees.degrees(), &[1, 2, 0, 1]);
    }

    #[test]
    fn reuse_last_without_history() {
        let s = scan_str("p edge 3 2\ne a b\ne 1 3\n", EdgeErrorPolicy::ReuseLast).unwrap();
        assert_eq!(s.degrees.degrees(), &[1, 0, 1]);
        assert_eq!(s.edges, 1);
        assert_eq!(s.malformed_lines.len(), 1);
    }

    #[test]
    fn edge_before_header() {
        let r = scan_str("c x\ne 1 2\np edge 2 1\n", EdgeErrorPolicy::Skip);
        assert!(matches!(r, Err(ParseError::HeaderMissing { line_no: 2 })));
        let r = scan_str("e a b\n", EdgeErrorPolicy::ReuseLast);
        assert!(matches!(r, Err(ParseError::HeaderMissing { line_no: 1 })));
    }

    #[test]
    fn no_header() {
        assert!(matches!(scan_str("", EdgeErrorPolicy::Skip), Err(ParseError::NoHeader)));
        assert!(matches!(scan_str("c only comments\n\n", EdgeErrorPolicy::Skip), Err(ParseError::NoHeader)));
    }

    #[test]
    fn vertex_out_of_range() {
        let r = scan_str("p edge 3 1\ne 1 4\n", EdgeErrorPolicy::Skip);
        assert!(matches!(r, Err(ParseError::VertexOutOfRange { line_no: 2, vertex: 4, nnodes: 3 })));
        let r = scan_str("p edge 3 1\ne 0 1\n", EdgeErrorPolicy::Skip);
        assert!(matches!(r, Err(ParseError::VertexOutOfRange { vertex: 0, .. })));
        let r = scan_str("p edge 3 1\ne -1 2\n", EdgeErrorPolicy::Skip);
        assert!(matches!(r, Err(ParseError::VertexOutOfRange { vertex: -1, .. })));
    }

    #[test]
    fn second_header_resets() {
        let input = "p edge 3 2\ne 1 2\ne 1 3\ne q r\np edge 2 1\ne 1 2\n";
        let s = scan_str(input, EdgeErrorPolicy::Skip).unwrap();
        assert_eq!(s.nodes, 2);
        assert_eq!(s.degrees.degrees(), &[1, 1]);
        assert_eq!(s.edges, 1);
        // reported lines survive the reset
        assert_eq!(s.malformed_lines, vec!["e q r".to_string()]);
    }

    #[test]
    fn stale_endpoints_checked_against_new_header() {
        let input = "p edge 5 2\ne 4 5\np edge 2 1\ne ? ?\n";
        let r = scan_str(input, EdgeErrorPolicy::ReuseLast);
        assert!(matches!(r, Err(ParseError::VertexOutOfRange { line_no: 4, vertex: 4, nnodes: 2 })));
        assert!(scan_str(input, EdgeErrorPolicy::Skip).is_ok());
    }

    #[test]
    fn malformed_lines_reported_before_fatal_error() {
        let input = "p edge 3 3\ne 1 2\ne a b\ne 1 q\ne 1 9\ne z z\n";
        let mut seen = vec![];
        let r = scan_reader_with(input.as_bytes(), EdgeErrorPolicy::Skip, |l| seen.push(l.to_string()));
        assert!(matches!(r, Err(ParseError::VertexOutOfRange { line_no: 5, vertex: 9, .. })));
        assert_eq!(seen, vec!["e a b".to_string(), "e 1 q".to_string()]);
    }

    #[test]
    fn malformed_lines_reported_in_order() {
        let mut seen = vec![];
        let s = scan_reader_with(examples::MALFORMED.as_bytes(), EdgeErrorPolicy::Skip, |l| seen.push(l.to_string())).unwrap();
        assert_eq!(seen, s.malformed_lines);
    }

    #[test]
    fn read_error_propagates() {
        let r = scan_reader(&b"p edge 2 1\ne 1 \xff\n"[..], EdgeErrorPolicy::Skip);
        assert!(matches!(r, Err(ParseError::Io(_))));
    }

    #[test]
    fn scan_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.col");
        let r = scan_file(&path, EdgeErrorPolicy::Skip);
        assert!(matches!(r, Err(ScanError::Io { .. })));
    }
}
