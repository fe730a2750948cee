//! Parsing of TSPLIB95 data sections: node coordinates, explicit edge weights, and the optional
//! CVRP/HCP sections (depot, demand, fixed edges, display data).
//!
//! A single instance file may carry several data sections back to back (a CVRP file typically has
//! `NODE_COORD_SECTION`, `DEMAND_SECTION` and `DEPOT_SECTION` in sequence); [`parse_data_sections`]
//! loops over them until it reaches the terminating `EOF` line or the end of the file.

use memchr::memchr;
use tsp_core::{
    instance::{InstanceMetadata, distance::Distance, edge::UnEdge, matrix::EdgeDataMatrix, node::Node},
    tsp_lib_spec::{EdgeWeightType, TSPDataKeyword},
};

use crate::{
    FileContent, ParserError,
    data::{distance_function::get_distance_function, explicit::parse_edge_weight_section},
    metadata::parse_data_keyword,
};

mod distance_function;
mod explicit;

/// Parses every data section of a TSP instance file starting at the section named by
/// `data_keyword`, filling in the coordinate/depot/demand/fixed-edge fields of `metadata` as it
/// goes, and returning the resulting distance matrix.
pub fn parse_data_sections(
    file_content: &FileContent,
    index_in_map: &mut usize,
    mut data_keyword: TSPDataKeyword,
    metadata: &mut InstanceMetadata,
) -> Result<EdgeDataMatrix<Distance>, ParserError> {
    let dimension = metadata.dimension;
    let mut distances: Option<EdgeDataMatrix<Distance>> = None;

    loop {
        match data_keyword {
            TSPDataKeyword::NODE_COORD_SECTION => {
                let coords = parse_node_coord_section(file_content, index_in_map, dimension)?;
                if metadata.edge_weight_type != EdgeWeightType::EXPLICIT {
                    let distance_fn = get_distance_function(metadata.edge_weight_type);
                    distances = Some(EdgeDataMatrix::slow_new_from_distance_function(
                        dimension,
                        |a, b| distance_fn(coords[a.0], coords[b.0]),
                    ));
                }
                metadata.coordinates = Some(coords);
            }
            TSPDataKeyword::EDGE_WEIGHT_SECTION => {
                let format = metadata.edge_weight_format.ok_or(ParserError::UnsupportedSection {
                    section: "EDGE_WEIGHT_SECTION without an EDGE_WEIGHT_FORMAT",
                })?;
                distances = Some(parse_edge_weight_section(
                    file_content,
                    index_in_map,
                    dimension,
                    format,
                )?);
            }
            TSPDataKeyword::DEPOT_SECTION => {
                metadata.depot = parse_depot_section(file_content, index_in_map)?;
            }
            TSPDataKeyword::DEMAND_SECTION => {
                metadata.demands = Some(parse_demand_section(file_content, index_in_map, dimension)?);
            }
            TSPDataKeyword::FIXED_EDGES_SECTION => {
                metadata.fixed_edges = parse_fixed_edges_section(file_content, index_in_map)?;
            }
            TSPDataKeyword::DISPLAY_DATA_SECTION => {
                let coords = parse_node_coord_section(file_content, index_in_map, dimension)?;
                if metadata.coordinates.is_none() {
                    metadata.coordinates = Some(coords);
                }
            }
            TSPDataKeyword::EDGE_DATA_SECTION | TSPDataKeyword::TOUR_SECTION => {
                return Err(ParserError::UnsupportedSection {
                    section: "EDGE_DATA_SECTION/TOUR_SECTION in a problem file",
                });
            }
        }

        match next_section_keyword(file_content, index_in_map)? {
            Some(next) => data_keyword = next,
            None => break,
        }
    }

    distances.ok_or(ParserError::UnsupportedSection {
        section: "instance has no EDGE_WEIGHT_SECTION or NODE_COORD_SECTION",
    })
}

/// Scans forward past blank lines to find the next section keyword line, returning `None` once
/// an `EOF` line (or the end of the file) is reached.
fn next_section_keyword(
    file_content: &FileContent,
    index_in_map: &mut usize,
) -> Result<Option<TSPDataKeyword>, ParserError> {
    loop {
        if *index_in_map >= file_content.len() {
            return Ok(None);
        }
        let Some(index_newline) = memchr(b'\n', &file_content[*index_in_map..]) else {
            let line = trimmed_line(file_content, *index_in_map, file_content.len());
            *index_in_map = file_content.len();
            return if line.is_empty() || line == "EOF" {
                Ok(None)
            } else {
                Ok(Some(parse_data_keyword(line)?))
            };
        };

        let line = trimmed_line(file_content, *index_in_map, *index_in_map + index_newline);
        *index_in_map += index_newline + 1;

        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            return Ok(None);
        }
        return Ok(Some(parse_data_keyword(line)?));
    }
}

fn trimmed_line(file_content: &FileContent, start: usize, end: usize) -> &str {
    // SAFETY: TSPLIB instance files are expected to be valid UTF-8.
    unsafe { std::str::from_utf8_unchecked(&file_content[start..end]) }.trim()
}

/// Reads `dimension` node coordinate triples (2D instances carry a zero `z`).
fn parse_node_coord_section(
    file_content: &FileContent,
    index_in_map: &mut usize,
    dimension: usize,
) -> Result<Vec<(f64, f64, f64)>, ParserError> {
    let mut coords = Vec::with_capacity(dimension);

    while coords.len() < dimension {
        let Some(index_newline) = memchr(b'\n', &file_content[*index_in_map..]) else {
            return Err(ParserError::UnexpectedEof("NODE_COORD_SECTION"));
        };
        let line = trimmed_line(file_content, *index_in_map, *index_in_map + index_newline);
        *index_in_map += index_newline + 1;
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_ascii_whitespace();
        let _node_index = parts.next();
        let x: f64 = parts
            .next()
            .ok_or(ParserError::UnexpectedEof("NODE_COORD_SECTION x"))?
            .parse()
            .map_err(|_| ParserError::UnexpectedEof("NODE_COORD_SECTION x"))?;
        let y: f64 = parts
            .next()
            .ok_or(ParserError::UnexpectedEof("NODE_COORD_SECTION y"))?
            .parse()
            .map_err(|_| ParserError::UnexpectedEof("NODE_COORD_SECTION y"))?;
        let z: f64 = match parts.next() {
            Some(z) => z.parse().unwrap_or(0.0),
            None => 0.0,
        };

        coords.push((x, y, z));
    }

    Ok(coords)
}

/// Reads a `DEPOT_SECTION`: one node index per line, terminated by `-1`. Only the first depot is
/// kept; TSPLIB CVRP instances conventionally declare exactly one.
fn parse_depot_section(
    file_content: &FileContent,
    index_in_map: &mut usize,
) -> Result<Option<Node>, ParserError> {
    let mut depot = None;
    loop {
        let Some(index_newline) = memchr(b'\n', &file_content[*index_in_map..]) else {
            return Err(ParserError::UnexpectedEof("DEPOT_SECTION"));
        };
        let line = trimmed_line(file_content, *index_in_map, *index_in_map + index_newline);
        *index_in_map += index_newline + 1;
        if line.is_empty() {
            continue;
        }
        let value: i64 = line
            .parse()
            .map_err(|_| ParserError::UnexpectedEof("DEPOT_SECTION"))?;
        if value == -1 {
            break;
        }
        if depot.is_none() {
            depot = Some(Node(value as usize - 1));
        }
    }
    Ok(depot)
}

/// Reads a `DEMAND_SECTION`: `dimension` lines of `node_id demand`, 1-indexed.
fn parse_demand_section(
    file_content: &FileContent,
    index_in_map: &mut usize,
    dimension: usize,
) -> Result<Vec<u32>, ParserError> {
    let mut demands = vec![0u32; dimension];
    let mut seen = 0;
    while seen < dimension {
        let Some(index_newline) = memchr(b'\n', &file_content[*index_in_map..]) else {
            return Err(ParserError::UnexpectedEof("DEMAND_SECTION"));
        };
        let line = trimmed_line(file_content, *index_in_map, *index_in_map + index_newline);
        *index_in_map += index_newline + 1;
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split_ascii_whitespace();
        let node_id: usize = parts
            .next()
            .ok_or(ParserError::UnexpectedEof("DEMAND_SECTION node id"))?
            .parse()
            .map_err(|_| ParserError::UnexpectedEof("DEMAND_SECTION node id"))?;
        let demand: u32 = parts
            .next()
            .ok_or(ParserError::UnexpectedEof("DEMAND_SECTION demand"))?
            .parse()
            .map_err(|_| ParserError::UnexpectedEof("DEMAND_SECTION demand"))?;
        demands[node_id - 1] = demand;
        seen += 1;
    }
    Ok(demands)
}

/// Reads a `FIXED_EDGES_SECTION`: one `from to` pair per line, terminated by `-1`.
fn parse_fixed_edges_section(
    file_content: &FileContent,
    index_in_map: &mut usize,
) -> Result<Vec<UnEdge>, ParserError> {
    let mut edges = Vec::new();
    loop {
        let Some(index_newline) = memchr(b'\n', &file_content[*index_in_map..]) else {
            return Err(ParserError::UnexpectedEof("FIXED_EDGES_SECTION"));
        };
        let line = trimmed_line(file_content, *index_in_map, *index_in_map + index_newline);
        *index_in_map += index_newline + 1;
        if line.is_empty() {
            continue;
        }
        if line.trim_start().starts_with('-') {
            break;
        }
        let mut parts = line.split_ascii_whitespace();
        let from: usize = parts
            .next()
            .ok_or(ParserError::UnexpectedEof("FIXED_EDGES_SECTION from"))?
            .parse()
            .map_err(|_| ParserError::UnexpectedEof("FIXED_EDGES_SECTION from"))?;
        let to: usize = parts
            .next()
            .ok_or(ParserError::UnexpectedEof("FIXED_EDGES_SECTION to"))?
            .parse()
            .map_err(|_| ParserError::UnexpectedEof("FIXED_EDGES_SECTION to"))?;
        edges.push(UnEdge::new(Node(from - 1), Node(to - 1)));
    }
    Ok(edges)
}

/// Reads `count` whitespace/newline-separated integers, tolerating the values being wrapped
/// across an arbitrary number of lines (as explicit edge weight matrices commonly are).
pub(crate) fn read_ints(
    file_content: &FileContent,
    index_in_map: &mut usize,
    count: usize,
    section: &'static str,
) -> Result<Vec<i64>, ParserError> {
    let mut values = Vec::with_capacity(count);
    let mut i = *index_in_map;
    while values.len() < count {
        while i < file_content.len() && file_content[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= file_content.len() {
            return Err(ParserError::UnexpectedEof(section));
        }
        let start = i;
        if file_content[i] == b'-' {
            i += 1;
        }
        while i < file_content.len() && file_content[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            return Err(ParserError::UnexpectedEof(section));
        }
        // SAFETY: the scanned range only ever contains the ASCII bytes `-` and `0`..=`9`.
        let token = unsafe { std::str::from_utf8_unchecked(&file_content[start..i]) };
        let value: i64 = token.parse().map_err(|_| ParserError::UnexpectedEof(section))?;
        values.push(value);
    }
    *index_in_map = i;
    Ok(values)
}
