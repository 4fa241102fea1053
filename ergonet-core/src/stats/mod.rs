//! The closed catalogue of change statistics.
//!
//! A change statistic is a pure function returning the difference
//! `z(G + tie) - z(G)` of one sufficient statistic when the tie `(i, j)`
//! is added to a graph that does not contain it. Deletion deltas are the
//! caller's responsibility: the accept/reject kernel removes the tie
//! first, evaluates the addition delta on the reduced graph and negates
//! the inner product.
//!
//! Effects are a tagged enumeration rather than function-pointer tables:
//! each variant carries its own parameters (decay `lambda`, attribute
//! index, attribute pair, exponent) and a single dispatch switches on the
//! tag. Every variant documents the statistic `z` it differentiates, so
//! correctness is testable by from-scratch recomputation.

mod alternating;
mod attribute;
mod bipartite;
mod dyadic;
mod structural;

use crate::graph::{ConsistencyError, Graph, GraphMode, NodeId, TrackedList};


/// Whether an effect requires, forbids, or ignores a graph property.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Requirement {
    /// The property may be present or absent.
    Any,
    /// The property must be present.
    Must,
    /// The property must be absent.
    MustNot,
}

impl Requirement {
    /// Whether a graph with the property state `present` satisfies this
    /// requirement.
    #[must_use]
    pub const fn accepts(self, present: bool) -> bool {
        match self {
            Self::Any => true,
            Self::Must => present,
            Self::MustNot => !present,
        }
    }
}

/// The network-type and network-mode filters attached to every effect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EffectScope {
    /// Requirement on `Graph::is_directed`.
    pub directed: Requirement,
    /// Requirement on `Graph::is_bipartite`.
    pub two_mode: Requirement,
}

impl EffectScope {
    const fn new(directed: Requirement, two_mode: Requirement) -> Self {
        Self { directed, two_mode }
    }

    /// Whether the effect may be evaluated on `graph`.
    #[must_use]
    pub fn accepts(&self, graph: &Graph) -> bool {
        self.directed.accepts(graph.is_directed()) && self.two_mode.accepts(graph.is_bipartite())
    }
}

const DIRECTED: EffectScope = EffectScope::new(Requirement::Must, Requirement::MustNot);
const UNDIRECTED_ONE_MODE: EffectScope = EffectScope::new(Requirement::MustNot, Requirement::MustNot);
const UNDIRECTED_ANY_MODE: EffectScope = EffectScope::new(Requirement::MustNot, Requirement::Any);
const ONE_MODE: EffectScope = EffectScope::new(Requirement::Any, Requirement::MustNot);
const TWO_MODE: EffectScope = EffectScope::new(Requirement::MustNot, Requirement::Must);
const ANY_GRAPH: EffectScope = EffectScope::new(Requirement::Any, Requirement::Any);

/// One configured effect of the model.
///
/// Structural variants reference only the graph; attribute variants carry
/// the index of a column of the matching kind; dyadic-covariate variants
/// carry a tuple of continuous column indices; alternating variants carry
/// the decay parameter `lambda > 1`.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Effect {
    // -- directed structural ------------------------------------------------
    /// Arc count; the density term of a directed model.
    Arc,
    /// Number of mutually connected dyads.
    Reciprocity,
    /// Nodes with incoming but no outgoing arcs.
    Sink,
    /// Nodes with outgoing but no incoming arcs.
    Source,
    /// Nodes with no ties at all (any mode).
    Isolates,
    /// Sum over nodes of `C(in-degree, 2)`.
    InTwoStars,
    /// Sum over nodes of `C(out-degree, 2)`.
    OutTwoStars,
    /// Number of directed two-paths.
    TwoPaths,
    /// Number of transitively closed triads.
    TransitiveTriangles,
    /// Number of cyclically closed triads.
    CyclicTriangles,
    /// Geometrically weighted in-degree distribution.
    AltInStars {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Geometrically weighted out-degree distribution.
    AltOutStars {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating k-triangles, transitive closure form.
    AltKTrianglesT {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating k-triangles, cyclic closure form.
    AltKTrianglesC {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating k-triangles over shared-source two-paths.
    AltKTrianglesD {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating k-triangles over shared-target two-paths.
    AltKTrianglesU {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating independent two-paths, mixed orientation.
    AltTwoPathsT {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating independent two-paths, shared-source orientation.
    AltTwoPathsD {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating independent two-paths, shared-target orientation.
    AltTwoPathsU {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Sum of the mixed and shared-source alternating two-path statistics.
    AltTwoPathsTD {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    // -- undirected structural ----------------------------------------------
    /// Edge count; the density term of an undirected model.
    Edge,
    /// Sum over nodes of `C(degree, 2)`.
    TwoStars,
    /// Number of closed triangles.
    Triangles,
    /// Geometrically weighted degree distribution.
    AltStars {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating k-triangles.
    AltKTriangles {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating independent two-paths.
    AltTwoPaths {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    // -- bipartite structural -----------------------------------------------
    /// Number of four-cycles.
    FourCycles,
    /// Sum over mode-A nodes of `C(degree, 2)`.
    BipartiteTwoStarsA,
    /// Sum over mode-B nodes of `C(degree, 2)`.
    BipartiteTwoStarsB,
    /// Geometrically weighted mode-A degree distribution.
    BipartiteAltStarsA {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Geometrically weighted mode-B degree distribution.
    BipartiteAltStarsB {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating k-cycles anchored on pairs of mode-A nodes.
    BipartiteAltKCyclesA {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating k-cycles anchored on pairs of mode-B nodes.
    BipartiteAltKCyclesB {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating four-cycle counts over pairs of mode-A nodes.
    BipartiteAltK4CyclesA {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Alternating four-cycle counts over pairs of mode-B nodes.
    BipartiteAltK4CyclesB {
        /// Decay parameter, greater than one.
        lambda: f64,
    },
    /// Sum over nodes of the four-cycle count through the node raised to a
    /// fractional power.
    BipartiteFourCyclesNodePower {
        /// Exponent in `(0, 1]`.
        alpha: f64,
    },
    // -- one-mode attribute -------------------------------------------------
    /// Sender main effect of a binary attribute.
    Sender {
        /// Binary column index.
        attr: usize,
    },
    /// Receiver main effect of a binary attribute.
    Receiver {
        /// Binary column index.
        attr: usize,
    },
    /// Joint sender-and-receiver effect of a binary attribute.
    Interaction {
        /// Binary column index.
        attr: usize,
    },
    /// Undirected main effect of a binary attribute.
    Activity {
        /// Binary column index.
        attr: usize,
    },
    /// Categorical homophily.
    Matching {
        /// Categorical column index.
        attr: usize,
    },
    /// Categorical homophily on reciprocated dyads.
    MatchingReciprocity {
        /// Categorical column index.
        attr: usize,
    },
    /// Categorical heterophily.
    Mismatching {
        /// Categorical column index.
        attr: usize,
    },
    /// Categorical heterophily on reciprocated dyads.
    MismatchingReciprocity {
        /// Categorical column index.
        attr: usize,
    },
    /// Continuous sender covariate.
    ContinuousSender {
        /// Continuous column index.
        attr: usize,
    },
    /// Continuous receiver covariate.
    ContinuousReceiver {
        /// Continuous column index.
        attr: usize,
    },
    /// Absolute attribute difference.
    Diff {
        /// Continuous column index.
        attr: usize,
    },
    /// Attribute sum.
    Sum {
        /// Continuous column index.
        attr: usize,
    },
    /// Absolute attribute difference on reciprocated dyads.
    DiffReciprocity {
        /// Continuous column index.
        attr: usize,
    },
    /// Sign of the sender-minus-receiver attribute difference.
    DiffSign {
        /// Continuous column index.
        attr: usize,
    },
    /// Positive part of the sender-minus-receiver difference.
    DiffDirectionalSR {
        /// Continuous column index.
        attr: usize,
    },
    /// Positive part of the receiver-minus-sender difference.
    DiffDirectionalRS {
        /// Continuous column index.
        attr: usize,
    },
    /// Jaccard similarity of two set attributes.
    JaccardSimilarity {
        /// Set column index.
        attr: usize,
    },
    /// Product of two binary attributes across the dyad.
    BinaryPairInteraction {
        /// Binary column index read on the sender side.
        attr_first: usize,
        /// Binary column index read on the receiver side.
        attr_second: usize,
    },
    // -- bipartite attribute ------------------------------------------------
    /// Binary main effect on the mode-A endpoint.
    BipartiteActivityA {
        /// Binary column index.
        attr: usize,
    },
    /// Binary main effect on the mode-B endpoint.
    BipartiteActivityB {
        /// Binary column index.
        attr: usize,
    },
    /// Continuous sums over mode-A two-path pairs.
    BipartiteTwoPathSumA {
        /// Continuous column index.
        attr: usize,
    },
    /// Continuous sums over mode-B two-path pairs.
    BipartiteTwoPathSumB {
        /// Continuous column index.
        attr: usize,
    },
    /// Continuous absolute differences over mode-A two-path pairs.
    BipartiteTwoPathDiffA {
        /// Continuous column index.
        attr: usize,
    },
    /// Continuous absolute differences over mode-B two-path pairs.
    BipartiteTwoPathDiffB {
        /// Continuous column index.
        attr: usize,
    },
    /// Categorical matches over mode-A two-path pairs.
    BipartiteTwoPathMatchingA {
        /// Categorical column index.
        attr: usize,
    },
    /// Categorical matches over mode-B two-path pairs.
    BipartiteTwoPathMatchingB {
        /// Categorical column index.
        attr: usize,
    },
    /// Power-damped shared-partner homophily over mode-A pairs.
    BipartiteNodematchAlphaA {
        /// Categorical column index.
        attr: usize,
        /// Exponent in `(0, 1]`.
        alpha: f64,
    },
    /// Power-damped shared-partner homophily over mode-B pairs.
    BipartiteNodematchAlphaB {
        /// Categorical column index.
        attr: usize,
        /// Exponent in `(0, 1]`.
        alpha: f64,
    },
    /// Geometrically damped shared-partner homophily over mode-A pairs.
    BipartiteNodematchBetaA {
        /// Categorical column index.
        attr: usize,
        /// Damping factor in `(0, 1]`.
        beta: f64,
    },
    /// Geometrically damped shared-partner homophily over mode-B pairs.
    BipartiteNodematchBetaB {
        /// Categorical column index.
        attr: usize,
        /// Damping factor in `(0, 1]`.
        beta: f64,
    },
    // -- dyadic covariates --------------------------------------------------
    /// Great-circle distance from latitude/longitude attributes.
    GeoDistance {
        /// Continuous column index holding latitude in degrees.
        lat: usize,
        /// Continuous column index holding longitude in degrees.
        lon: usize,
    },
    /// Natural logarithm of the great-circle distance.
    LogGeoDistance {
        /// Continuous column index holding latitude in degrees.
        lat: usize,
        /// Continuous column index holding longitude in degrees.
        lon: usize,
    },
    /// Euclidean distance from three coordinate attributes.
    EuclideanDistance {
        /// Continuous column index for the first coordinate.
        x: usize,
        /// Continuous column index for the second coordinate.
        y: usize,
        /// Continuous column index for the third coordinate.
        z: usize,
    },
}

impl Effect {
    /// The canonical effect name, as written in configuration files and
    /// output headers.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Arc => "Arc",
            Self::Reciprocity => "Reciprocity",
            Self::Sink => "Sink",
            Self::Source => "Source",
            Self::Isolates => "Isolates",
            Self::InTwoStars => "InTwoStars",
            Self::OutTwoStars => "OutTwoStars",
            Self::TwoPaths => "TwoPaths",
            Self::TransitiveTriangles => "TransitiveTriangles",
            Self::CyclicTriangles => "CyclicTriangles",
            Self::AltInStars { .. } => "AltInStars",
            Self::AltOutStars { .. } => "AltOutStars",
            Self::AltKTrianglesT { .. } => "AltKTrianglesT",
            Self::AltKTrianglesC { .. } => "AltKTrianglesC",
            Self::AltKTrianglesD { .. } => "AltKTrianglesD",
            Self::AltKTrianglesU { .. } => "AltKTrianglesU",
            Self::AltTwoPathsT { .. } => "AltTwoPathsT",
            Self::AltTwoPathsD { .. } => "AltTwoPathsD",
            Self::AltTwoPathsU { .. } => "AltTwoPathsU",
            Self::AltTwoPathsTD { .. } => "AltTwoPathsTD",
            Self::Edge => "Edge",
            Self::TwoStars => "TwoStars",
            Self::Triangles => "Triangles",
            Self::AltStars { .. } => "AltStars",
            Self::AltKTriangles { .. } => "AltKTriangles",
            Self::AltTwoPaths { .. } => "AltTwoPaths",
            Self::FourCycles => "FourCycles",
            Self::BipartiteTwoStarsA => "BipartiteTwoStarsA",
            Self::BipartiteTwoStarsB => "BipartiteTwoStarsB",
            Self::BipartiteAltStarsA { .. } => "BipartiteAltStarsA",
            Self::BipartiteAltStarsB { .. } => "BipartiteAltStarsB",
            Self::BipartiteAltKCyclesA { .. } => "BipartiteAltKCyclesA",
            Self::BipartiteAltKCyclesB { .. } => "BipartiteAltKCyclesB",
            Self::BipartiteAltK4CyclesA { .. } => "BipartiteAltK4CyclesA",
            Self::BipartiteAltK4CyclesB { .. } => "BipartiteAltK4CyclesB",
            Self::BipartiteFourCyclesNodePower { .. } => "BipartiteFourCyclesNodePower",
            Self::Sender { .. } => "Sender",
            Self::Receiver { .. } => "Receiver",
            Self::Interaction { .. } => "Interaction",
            Self::Activity { .. } => "Activity",
            Self::Matching { .. } => "Matching",
            Self::MatchingReciprocity { .. } => "MatchingReciprocity",
            Self::Mismatching { .. } => "Mismatching",
            Self::MismatchingReciprocity { .. } => "MismatchingReciprocity",
            Self::ContinuousSender { .. } => "ContinuousSender",
            Self::ContinuousReceiver { .. } => "ContinuousReceiver",
            Self::Diff { .. } => "Diff",
            Self::Sum { .. } => "Sum",
            Self::DiffReciprocity { .. } => "DiffReciprocity",
            Self::DiffSign { .. } => "DiffSign",
            Self::DiffDirectionalSR { .. } => "DiffDirectionalSR",
            Self::DiffDirectionalRS { .. } => "DiffDirectionalRS",
            Self::JaccardSimilarity { .. } => "JaccardSimilarity",
            Self::BinaryPairInteraction { .. } => "BinaryPairInteraction",
            Self::BipartiteActivityA { .. } => "BipartiteActivityA",
            Self::BipartiteActivityB { .. } => "BipartiteActivityB",
            Self::BipartiteTwoPathSumA { .. } => "BipartiteTwoPathSumA",
            Self::BipartiteTwoPathSumB { .. } => "BipartiteTwoPathSumB",
            Self::BipartiteTwoPathDiffA { .. } => "BipartiteTwoPathDiffA",
            Self::BipartiteTwoPathDiffB { .. } => "BipartiteTwoPathDiffB",
            Self::BipartiteTwoPathMatchingA { .. } => "BipartiteTwoPathMatchingA",
            Self::BipartiteTwoPathMatchingB { .. } => "BipartiteTwoPathMatchingB",
            Self::BipartiteNodematchAlphaA { .. } => "BipartiteNodematchAlphaA",
            Self::BipartiteNodematchAlphaB { .. } => "BipartiteNodematchAlphaB",
            Self::BipartiteNodematchBetaA { .. } => "BipartiteNodematchBetaA",
            Self::BipartiteNodematchBetaB { .. } => "BipartiteNodematchBetaB",
            Self::GeoDistance { .. } => "GeoDistance",
            Self::LogGeoDistance { .. } => "LogGeoDistance",
            Self::EuclideanDistance { .. } => "EuclideanDistance",
        }
    }

    /// The network-type and network-mode filters of this effect.
    #[must_use]
    pub const fn scope(&self) -> EffectScope {
        match self {
            Self::Arc
            | Self::Reciprocity
            | Self::Sink
            | Self::Source
            | Self::InTwoStars
            | Self::OutTwoStars
            | Self::TwoPaths
            | Self::TransitiveTriangles
            | Self::CyclicTriangles
            | Self::AltInStars { .. }
            | Self::AltOutStars { .. }
            | Self::AltKTrianglesT { .. }
            | Self::AltKTrianglesC { .. }
            | Self::AltKTrianglesD { .. }
            | Self::AltKTrianglesU { .. }
            | Self::AltTwoPathsT { .. }
            | Self::AltTwoPathsD { .. }
            | Self::AltTwoPathsU { .. }
            | Self::AltTwoPathsTD { .. }
            | Self::Sender { .. }
            | Self::Receiver { .. }
            | Self::Interaction { .. }
            | Self::MatchingReciprocity { .. }
            | Self::MismatchingReciprocity { .. }
            | Self::ContinuousSender { .. }
            | Self::ContinuousReceiver { .. }
            | Self::DiffReciprocity { .. }
            | Self::DiffSign { .. }
            | Self::DiffDirectionalSR { .. }
            | Self::DiffDirectionalRS { .. } => DIRECTED,
            Self::TwoStars
            | Self::Triangles
            | Self::AltStars { .. }
            | Self::AltKTriangles { .. }
            | Self::AltTwoPaths { .. }
            | Self::Activity { .. } => UNDIRECTED_ONE_MODE,
            Self::Edge => UNDIRECTED_ANY_MODE,
            Self::Isolates => ANY_GRAPH,
            Self::Matching { .. }
            | Self::Mismatching { .. }
            | Self::Diff { .. }
            | Self::Sum { .. }
            | Self::JaccardSimilarity { .. }
            | Self::BinaryPairInteraction { .. } => ONE_MODE,
            Self::FourCycles
            | Self::BipartiteTwoStarsA
            | Self::BipartiteTwoStarsB
            | Self::BipartiteAltStarsA { .. }
            | Self::BipartiteAltStarsB { .. }
            | Self::BipartiteAltKCyclesA { .. }
            | Self::BipartiteAltKCyclesB { .. }
            | Self::BipartiteAltK4CyclesA { .. }
            | Self::BipartiteAltK4CyclesB { .. }
            | Self::BipartiteFourCyclesNodePower { .. }
            | Self::BipartiteActivityA { .. }
            | Self::BipartiteActivityB { .. }
            | Self::BipartiteTwoPathSumA { .. }
            | Self::BipartiteTwoPathSumB { .. }
            | Self::BipartiteTwoPathDiffA { .. }
            | Self::BipartiteTwoPathDiffB { .. }
            | Self::BipartiteTwoPathMatchingA { .. }
            | Self::BipartiteTwoPathMatchingB { .. }
            | Self::BipartiteNodematchAlphaA { .. }
            | Self::BipartiteNodematchAlphaB { .. }
            | Self::BipartiteNodematchBetaA { .. }
            | Self::BipartiteNodematchBetaB { .. } => TWO_MODE,
            Self::GeoDistance { .. } | Self::LogGeoDistance { .. } | Self::EuclideanDistance { .. } => {
                ANY_GRAPH
            }
        }
    }
}

/// Evaluates the change statistic of `effect` for adding the tie
/// `(i, j)`.
///
/// The graph must not contain the tie; for a deletion delta, remove the
/// tie first and negate the result. The endpoints must be distinct and,
/// for bipartite graphs, lie in opposite modes; either endpoint order is
/// accepted for undirected effects.
#[must_use]
pub fn change_statistic(graph: &Graph, i: NodeId, j: NodeId, effect: &Effect) -> f64 {
    debug_assert!(!graph.has_tie(i, j), "change statistics require the tie to be absent");
    let attrs = graph.attributes();
    match *effect {
        Effect::Arc | Effect::Edge => 1.0,
        Effect::Reciprocity => structural::reciprocity(graph, i, j),
        Effect::Sink => structural::sink(graph, i, j),
        Effect::Source => structural::source(graph, i, j),
        Effect::Isolates => structural::isolates(graph, i, j),
        Effect::InTwoStars => f64::from(graph.in_degree(j)),
        Effect::OutTwoStars => f64::from(graph.out_degree(i)),
        Effect::TwoPaths => structural::two_paths(graph, i, j),
        Effect::TransitiveTriangles => structural::transitive_triangles(graph, i, j),
        Effect::CyclicTriangles => f64::from(graph.mixed_two_paths(j, i)),
        Effect::AltInStars { lambda } => alternating::alt_in_stars(graph, j, lambda),
        Effect::AltOutStars { lambda } => alternating::alt_out_stars(graph, i, lambda),
        Effect::AltKTrianglesT { lambda } => alternating::alt_ktriangles_t(graph, i, j, lambda),
        Effect::AltKTrianglesC { lambda } => alternating::alt_ktriangles_c(graph, i, j, lambda),
        Effect::AltKTrianglesD { lambda } => alternating::alt_ktriangles_d(graph, i, j, lambda),
        Effect::AltKTrianglesU { lambda } => alternating::alt_ktriangles_u(graph, i, j, lambda),
        Effect::AltTwoPathsT { lambda } => alternating::alt_two_paths_t(graph, i, j, lambda),
        Effect::AltTwoPathsD { lambda } => alternating::alt_two_paths_d(graph, i, j, lambda),
        Effect::AltTwoPathsU { lambda } => alternating::alt_two_paths_u(graph, i, j, lambda),
        Effect::AltTwoPathsTD { lambda } => {
            alternating::alt_two_paths_t(graph, i, j, lambda)
                + alternating::alt_two_paths_d(graph, i, j, lambda)
        }
        Effect::TwoStars => f64::from(graph.degree(i) + graph.degree(j)),
        Effect::Triangles => f64::from(graph.common_neighbours(i, j)),
        Effect::AltStars { lambda } => {
            alternating::alt_stars(graph, i, lambda) + alternating::alt_stars(graph, j, lambda)
        }
        Effect::AltKTriangles { lambda } => alternating::alt_ktriangles(graph, i, j, lambda),
        Effect::AltTwoPaths { lambda } => alternating::alt_two_paths(graph, i, j, lambda),
        Effect::FourCycles => bipartite::four_cycles(graph, i, j),
        Effect::BipartiteTwoStarsA => bipartite::two_stars(graph, i, j, true),
        Effect::BipartiteTwoStarsB => bipartite::two_stars(graph, i, j, false),
        Effect::BipartiteAltStarsA { lambda } => bipartite::alt_stars(graph, i, j, lambda, true),
        Effect::BipartiteAltStarsB { lambda } => bipartite::alt_stars(graph, i, j, lambda, false),
        Effect::BipartiteAltKCyclesA { lambda } => {
            bipartite::alt_kcycles(graph, i, j, lambda, true)
        }
        Effect::BipartiteAltKCyclesB { lambda } => {
            bipartite::alt_kcycles(graph, i, j, lambda, false)
        }
        Effect::BipartiteAltK4CyclesA { lambda } => {
            bipartite::alt_k4cycles(graph, i, j, lambda, true)
        }
        Effect::BipartiteAltK4CyclesB { lambda } => {
            bipartite::alt_k4cycles(graph, i, j, lambda, false)
        }
        Effect::BipartiteFourCyclesNodePower { alpha } => {
            bipartite::four_cycles_node_power(graph, i, j, alpha)
        }
        Effect::Sender { attr } => attribute::binary_indicator(attrs, attr, i),
        Effect::Receiver { attr } => attribute::binary_indicator(attrs, attr, j),
        Effect::Interaction { attr } => {
            attribute::binary_indicator(attrs, attr, i) * attribute::binary_indicator(attrs, attr, j)
        }
        Effect::Activity { attr } => {
            attribute::binary_indicator(attrs, attr, i) + attribute::binary_indicator(attrs, attr, j)
        }
        Effect::Matching { attr } => attribute::matching(attrs, attr, i, j),
        Effect::MatchingReciprocity { attr } => {
            attribute::matching(attrs, attr, i, j) * structural::reciprocity(graph, i, j)
        }
        Effect::Mismatching { attr } => attribute::mismatching(attrs, attr, i, j),
        Effect::MismatchingReciprocity { attr } => {
            attribute::mismatching(attrs, attr, i, j) * structural::reciprocity(graph, i, j)
        }
        Effect::ContinuousSender { attr } => attribute::continuous_or_zero(attrs, attr, i),
        Effect::ContinuousReceiver { attr } => attribute::continuous_or_zero(attrs, attr, j),
        Effect::Diff { attr } => attribute::abs_diff(attrs, attr, i, j),
        Effect::Sum { attr } => attribute::sum(attrs, attr, i, j),
        Effect::DiffReciprocity { attr } => {
            attribute::abs_diff(attrs, attr, i, j) * structural::reciprocity(graph, i, j)
        }
        Effect::DiffSign { attr } => attribute::diff_sign(attrs, attr, i, j),
        Effect::DiffDirectionalSR { attr } => attribute::diff_positive(attrs, attr, i, j),
        Effect::DiffDirectionalRS { attr } => attribute::diff_positive(attrs, attr, j, i),
        Effect::JaccardSimilarity { attr } => attribute::jaccard(attrs, attr, i, j),
        Effect::BinaryPairInteraction {
            attr_first,
            attr_second,
        } => attribute::binary_pair(graph, attrs, attr_first, attr_second, i, j),
        Effect::BipartiteActivityA { attr } => {
            attribute::binary_indicator(attrs, attr, bipartite::side_a(graph, i, j))
        }
        Effect::BipartiteActivityB { attr } => {
            attribute::binary_indicator(attrs, attr, bipartite::side_b(graph, i, j))
        }
        Effect::BipartiteTwoPathSumA { attr } => {
            bipartite::two_path_sum(graph, i, j, attr, true)
        }
        Effect::BipartiteTwoPathSumB { attr } => {
            bipartite::two_path_sum(graph, i, j, attr, false)
        }
        Effect::BipartiteTwoPathDiffA { attr } => {
            bipartite::two_path_diff(graph, i, j, attr, true)
        }
        Effect::BipartiteTwoPathDiffB { attr } => {
            bipartite::two_path_diff(graph, i, j, attr, false)
        }
        Effect::BipartiteTwoPathMatchingA { attr } => {
            bipartite::two_path_matching(graph, i, j, attr, true)
        }
        Effect::BipartiteTwoPathMatchingB { attr } => {
            bipartite::two_path_matching(graph, i, j, attr, false)
        }
        Effect::BipartiteNodematchAlphaA { attr, alpha } => {
            bipartite::nodematch_alpha(graph, i, j, attr, alpha, true)
        }
        Effect::BipartiteNodematchAlphaB { attr, alpha } => {
            bipartite::nodematch_alpha(graph, i, j, attr, alpha, false)
        }
        Effect::BipartiteNodematchBetaA { attr, beta } => {
            bipartite::nodematch_beta(graph, i, j, attr, beta, true)
        }
        Effect::BipartiteNodematchBetaB { attr, beta } => {
            bipartite::nodematch_beta(graph, i, j, attr, beta, false)
        }
        Effect::GeoDistance { lat, lon } => dyadic::geo_distance(attrs, lat, lon, i, j),
        Effect::LogGeoDistance { lat, lon } => dyadic::log_geo_distance(attrs, lat, lon, i, j),
        Effect::EuclideanDistance { x, y, z } => dyadic::euclidean_distance(attrs, x, y, z, i, j),
    }
}

/// Evaluates each effect's sufficient statistic on the whole graph,
/// relative to the empty graph on the same node set.
///
/// The statistics are accumulated as change-statistic sums along an
/// insertion path from the empty graph, which is exact for every effect
/// in the catalogue: `z(G) - z(empty)` telescopes over the ties.
///
/// # Errors
/// Propagates a [`ConsistencyError`] if the graph's tie set cannot be
/// replayed, which indicates a corrupted store.
pub fn sufficient_statistics(
    graph: &Graph,
    effects: &[Effect],
) -> Result<Vec<f64>, ConsistencyError> {
    let mut replay = match graph.mode() {
        GraphMode::Directed => Graph::directed(graph.node_count()),
        GraphMode::Undirected => Graph::undirected(graph.node_count()),
        GraphMode::Bipartite { mode_a, mode_b } => Graph::bipartite(mode_a, mode_b),
    };
    replay.set_attributes(graph.attributes().clone());
    let mut sums = vec![0.0; effects.len()];
    for (from, to) in graph.iter_ties() {
        for (sum, effect) in sums.iter_mut().zip(effects) {
            *sum += change_statistic(&replay, from, to, effect);
        }
        replay.insert_dyad(from, to, TrackedList::None)?;
    }
    Ok(sums)
}
