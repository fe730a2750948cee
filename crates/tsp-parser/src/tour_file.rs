//! TSPLIB95 tour-file reader/writer: the `TOUR_SECTION` format used both for `TOUR_FILE` (a
//! fixed starting tour) and `OUTPUT_TOUR_FILE` (the best tour found).

use std::{fs, path::Path};

use thiserror::Error;
use tsp_core::instance::node::Node;

#[derive(Error, Debug)]
pub enum TourFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid node index: {0}")]
    InvalidNodeIndex(String),
    #[error("file has no TOUR_SECTION")]
    MissingTourSection,
}

/// Reads the node sequence out of a `TOUR_SECTION`, converting TSPLIB's 1-based indices to the
/// 0-based [`Node`] indices used internally. Stops at the first `-1` line.
pub fn read_tour_file<P: AsRef<Path>>(path: P) -> Result<Vec<Node>, TourFileError> {
    let content = fs::read_to_string(path)?;

    let mut in_section = false;
    let mut tour = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !in_section {
            if line == "TOUR_SECTION" {
                in_section = true;
            }
            continue;
        }

        let token = line
            .split_ascii_whitespace()
            .next()
            .unwrap_or(line);
        let value: i64 = token
            .parse()
            .map_err(|_| TourFileError::InvalidNodeIndex(line.to_string()))?;
        if value == -1 {
            break;
        }
        tour.push(Node(value as usize - 1));
    }

    if !in_section {
        return Err(TourFileError::MissingTourSection);
    }
    Ok(tour)
}

/// Writes `tour` as a TSPLIB tour file, optionally annotating the tour's length in a `COMMENT`
/// line the way LKH-style solvers do.
pub fn write_tour_file<P: AsRef<Path>>(
    path: P,
    name: &str,
    tour: &[Node],
    length: Option<i64>,
) -> Result<(), TourFileError> {
    let mut out = String::new();
    out.push_str(&format!("NAME: {name}\n"));
    out.push_str("TYPE: TOUR\n");
    if let Some(length) = length {
        out.push_str(&format!("COMMENT: Length = {length}\n"));
    }
    out.push_str(&format!("DIMENSION: {}\n", tour.len()));
    out.push_str("TOUR_SECTION\n");
    for node in tour {
        out.push_str(&format!("{}\n", node.0 + 1));
    }
    out.push_str("-1\n");
    out.push_str("EOF\n");

    fs::write(path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_small_tour() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tour");
        let tour = vec![Node(0), Node(2), Node(1), Node(3)];

        write_tour_file(&path, "test", &tour, Some(42)).unwrap();
        let read_back = read_tour_file(&path).unwrap();

        assert_eq!(read_back, tour);
    }

    #[test]
    fn missing_tour_section_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.tour");
        fs::write(&path, "NAME: test\nEOF\n").unwrap();

        assert!(matches!(
            read_tour_file(&path),
            Err(TourFileError::MissingTourSection)
        ));
    }
}
