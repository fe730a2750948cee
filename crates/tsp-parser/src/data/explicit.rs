//! `EDGE_WEIGHT_SECTION` parsing: explicit edge weight matrices in any of the nine TSPLIB95
//! `EdgeWeightFormat` layouts.

use tsp_core::{
    instance::{distance::Distance, matrix::EdgeDataMatrix, node::Node},
    tsp_lib_spec::EdgeWeightFormat,
};

use crate::{ParserError, data::read_ints};

/// Parses an `EDGE_WEIGHT_SECTION` of the given `format` into a full `dimension x dimension`
/// matrix, reading exactly as many integers as the format requires and advancing
/// `index_in_map` past them.
pub fn parse_edge_weight_section(
    bytes: &[u8],
    index_in_map: &mut usize,
    dimension: usize,
    format: EdgeWeightFormat,
) -> Result<EdgeDataMatrix<Distance>, ParserError> {
    let count = value_count(dimension, format);
    let values = read_ints(bytes, index_in_map, count, "EDGE_WEIGHT_SECTION")?;

    let mut matrix = EdgeDataMatrix::new_from_dimension_with_value(dimension, Distance::ZERO);
    let mut it = values.into_iter();

    match format {
        EdgeWeightFormat::FUNCTION => {
            return Err(ParserError::UnsupportedSection {
                section: "EDGE_WEIGHT_SECTION with FUNCTION format",
            });
        }
        EdgeWeightFormat::FULL_MATRIX => {
            for i in 0..dimension {
                for j in 0..dimension {
                    matrix.set_data(Node(i), Node(j), Distance(it.next().unwrap() as i32));
                }
            }
        }
        EdgeWeightFormat::UPPER_ROW | EdgeWeightFormat::UPPER_DIAG_ROW => {
            let diag = format == EdgeWeightFormat::UPPER_DIAG_ROW;
            for i in 0..dimension {
                let start = if diag { i } else { i + 1 };
                for j in start..dimension {
                    matrix.set_data_symmetric(Node(i), Node(j), Distance(it.next().unwrap() as i32));
                }
            }
        }
        EdgeWeightFormat::LOWER_ROW | EdgeWeightFormat::LOWER_DIAG_ROW => {
            let diag = format == EdgeWeightFormat::LOWER_DIAG_ROW;
            for i in 0..dimension {
                let end = if diag { i + 1 } else { i };
                for j in 0..end {
                    matrix.set_data_symmetric(Node(i), Node(j), Distance(it.next().unwrap() as i32));
                }
            }
        }
        EdgeWeightFormat::UPPER_COL | EdgeWeightFormat::UPPER_DIAG_COL => {
            let diag = format == EdgeWeightFormat::UPPER_DIAG_COL;
            for j in 0..dimension {
                let end = if diag { j + 1 } else { j };
                for i in 0..end {
                    matrix.set_data_symmetric(Node(i), Node(j), Distance(it.next().unwrap() as i32));
                }
            }
        }
        EdgeWeightFormat::LOWER_COL | EdgeWeightFormat::LOWER_DIAG_COL => {
            let diag = format == EdgeWeightFormat::LOWER_DIAG_COL;
            for j in 0..dimension {
                let start = if diag { j } else { j + 1 };
                for i in start..dimension {
                    matrix.set_data_symmetric(Node(i), Node(j), Distance(it.next().unwrap() as i32));
                }
            }
        }
    }

    Ok(matrix)
}

fn value_count(dimension: usize, format: EdgeWeightFormat) -> usize {
    match format {
        EdgeWeightFormat::FUNCTION => 0,
        EdgeWeightFormat::FULL_MATRIX => dimension * dimension,
        EdgeWeightFormat::UPPER_ROW
        | EdgeWeightFormat::LOWER_ROW
        | EdgeWeightFormat::UPPER_COL
        | EdgeWeightFormat::LOWER_COL => dimension * (dimension - 1) / 2,
        EdgeWeightFormat::UPPER_DIAG_ROW
        | EdgeWeightFormat::LOWER_DIAG_ROW
        | EdgeWeightFormat::UPPER_DIAG_COL
        | EdgeWeightFormat::LOWER_DIAG_COL => dimension * (dimension + 1) / 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_matrix_round_trips_a_small_asymmetric_instance() {
        let input = b"0 1 2\n3 0 4\n5 6 0\nEOF\n";
        let mut index = 0;
        let matrix =
            parse_edge_weight_section(input, &mut index, 3, EdgeWeightFormat::FULL_MATRIX)
                .unwrap();
        assert_eq!(matrix.get_data(Node(0), Node(1)), Distance(1));
        assert_eq!(matrix.get_data(Node(1), Node(0)), Distance(3));
        assert_eq!(matrix.get_data(Node(2), Node(1)), Distance(6));
    }

    #[test]
    fn upper_row_fills_symmetrically() {
        let input = b"1 2 3\nEOF\n";
        let mut index = 0;
        let matrix = parse_edge_weight_section(input, &mut index, 3, EdgeWeightFormat::UPPER_ROW)
            .unwrap();
        assert_eq!(matrix.get_data(Node(0), Node(1)), Distance(1));
        assert_eq!(matrix.get_data(Node(1), Node(0)), Distance(1));
        assert_eq!(matrix.get_data(Node(0), Node(2)), Distance(2));
        assert_eq!(matrix.get_data(Node(1), Node(2)), Distance(3));
        assert_eq!(matrix.get_data(Node(0), Node(0)), Distance::ZERO);
    }

    #[test]
    fn lower_diag_row_includes_diagonal() {
        let input = b"0\n1 0\n2 3 0\nEOF\n";
        let mut index = 0;
        let matrix =
            parse_edge_weight_section(input, &mut index, 3, EdgeWeightFormat::LOWER_DIAG_ROW)
                .unwrap();
        assert_eq!(matrix.get_data(Node(1), Node(0)), Distance(1));
        assert_eq!(matrix.get_data(Node(2), Node(0)), Distance(2));
        assert_eq!(matrix.get_data(Node(2), Node(1)), Distance(3));
    }
}
