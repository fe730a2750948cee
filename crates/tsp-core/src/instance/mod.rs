use crate::{
    instance::{distance::Distance, matrix::EdgeDataMatrix, node::Node},
    tsp_lib_spec::{
        DisplayDataType, EdgeDataFormat, EdgeWeightFormat, EdgeWeightType, NodeCoordType,
        ProblemType,
    },
};

pub mod distance;
pub mod edge;
pub mod matrix;
pub mod node;

pub use edge::UnEdge;

/// A loaded TSP(-like) instance: its metadata plus the fully materialized cost matrix.
///
/// Matches both symmetric and asymmetric instances; `distances` is row-major and, for symmetric
/// instances, mirrored across the diagonal at load time so that lookups never need to branch on
/// direction.
#[derive(Debug, Clone)]
pub struct TSPInstance {
    metadata: InstanceMetadata,
    distances: EdgeDataMatrix<Distance>,
}

impl TSPInstance {
    /// Panics if `distances.dimension()` does not match `metadata.dimension`.
    pub fn new(distances: EdgeDataMatrix<Distance>, metadata: InstanceMetadata) -> Self {
        assert_eq!(
            distances.dimension(),
            metadata.dimension,
            "distance matrix dimension does not match metadata dimension"
        );
        Self {
            metadata,
            distances,
        }
    }

    pub fn metadata(&self) -> &InstanceMetadata {
        &self.metadata
    }

    pub fn dimension(&self) -> usize {
        self.metadata.dimension
    }

    #[inline(always)]
    pub fn distance(&self, from: Node, to: Node) -> Distance {
        self.distances.get_data(from, to)
    }

    pub fn distances(&self) -> &EdgeDataMatrix<Distance> {
        &self.distances
    }

    pub fn is_symmetric(&self) -> bool {
        !matches!(self.metadata.problem_type, ProblemType::ATSP | ProblemType::SOP)
    }
}

#[derive(Debug, Clone)]
pub struct InstanceMetadata {
    pub name: String,
    pub problem_type: ProblemType,
    pub comment: Option<String>,
    pub dimension: usize,
    pub capacity: Option<usize>,
    pub edge_weight_type: EdgeWeightType,
    pub edge_weight_format: Option<EdgeWeightFormat>,
    pub edge_data_format: Option<EdgeDataFormat>,
    /// Defaults to NO_COORDS
    pub node_coord_type: NodeCoordType,
    pub display_data_type: Option<DisplayDataType>,
    /// Coordinates, present whenever `node_coord_type` is not `NO_COORDS`. Used only for display
    /// and for the coordinate-driven distance formulas at load time; the solver itself only ever
    /// consults the materialized distance matrix.
    pub coordinates: Option<Vec<(f64, f64, f64)>>,
    /// Edges that must appear in every tour, parsed from `FIXED_EDGES_SECTION`.
    pub fixed_edges: Vec<UnEdge>,
    /// `CVRP` depot node, parsed from `DEPOT_SECTION`. Unused by the TSP solver proper.
    pub depot: Option<Node>,
    /// `CVRP` per-node demand, parsed from `DEMAND_SECTION`. Unused by the TSP solver proper.
    pub demands: Option<Vec<u32>>,
}

impl InstanceMetadata {
    pub fn new(name: String, problem_type: ProblemType, dimension: usize) -> Self {
        Self {
            name,
            problem_type,
            comment: None,
            dimension,
            capacity: None,
            edge_weight_type: EdgeWeightType::EUC_2D,
            edge_weight_format: None,
            edge_data_format: None,
            node_coord_type: NodeCoordType::NO_COORDS,
            display_data_type: None,
            coordinates: None,
            fixed_edges: Vec::new(),
            depot: None,
            demands: None,
        }
    }
}
