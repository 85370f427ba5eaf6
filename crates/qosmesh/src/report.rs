//! Human-readable result rendering

use qosmesh_routing::{
    path_bandwidths, required_bandwidth, MetricAggregator, PathMetrics, SolveReport,
};
use qosmesh_topology::{GraphAccessor, NodeId};
use std::fmt;

/// Format a path as `1 -> 2 -> 3`
pub fn format_path(path: &[NodeId]) -> String {
    path.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Text summary of an optimizer run
pub struct SolveSummary<'a, G: ?Sized> {
    graph: &'a G,
    source: NodeId,
    target: NodeId,
    report: &'a SolveReport,
}

impl<'a, G: GraphAccessor + ?Sized> SolveSummary<'a, G> {
    pub fn new(graph: &'a G, source: NodeId, target: NodeId, report: &'a SolveReport) -> Self {
        Self {
            graph,
            source,
            target,
            report,
        }
    }

    fn write_ants(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Ants: {} completed, {} abandoned",
            self.report.completed_ants, self.report.abandoned_ants
        )
    }
}

impl<G: GraphAccessor + ?Sized> fmt::Display for SolveSummary<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (path, metrics) = match (&self.report.best_path, &self.report.best_metrics) {
            (Some(path), Some(metrics)) => (path, metrics),
            _ => {
                writeln!(f, "No path from {} to {}", self.source, self.target)?;
                return self.write_ants(f);
            }
        };

        writeln!(f, "Path: {}", format_path(path))?;
        writeln!(f, "Hops: {}", path.len().saturating_sub(1))?;
        writeln!(f, "Total delay: {:.3} ms", metrics.total_delay_ms)?;
        writeln!(
            f,
            "Reliability cost: {:.4} (success probability {:.4})",
            metrics.reliability_cost,
            metrics.success_probability()
        )?;
        writeln!(f, "Bandwidth cost: {:.4}", metrics.bandwidth_cost)?;
        writeln!(f, "Fitness: {:.4}", self.report.best_fitness)?;
        writeln!(f, "{}", path_bandwidths(self.graph, path))?;
        writeln!(f, "{}", required_bandwidth(self.graph, path))?;
        self.write_ants(f)
    }
}

/// Text summary of a random baseline path
pub struct RandomPathSummary<'a, G: ?Sized> {
    graph: &'a G,
    source: NodeId,
    target: NodeId,
    path: Option<(&'a [NodeId], PathMetrics)>,
}

impl<'a, G: GraphAccessor + ?Sized> RandomPathSummary<'a, G> {
    pub fn new(graph: &'a G, source: NodeId, target: NodeId, path: Option<&'a [NodeId]>) -> Self {
        let path = path.map(|path| (path, MetricAggregator::new(graph).evaluate(path)));
        Self {
            graph,
            source,
            target,
            path,
        }
    }
}

impl<G: GraphAccessor + ?Sized> fmt::Display for RandomPathSummary<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (path, metrics) = match &self.path {
            Some(found) => found,
            None => return writeln!(f, "No random path from {} to {}", self.source, self.target),
        };

        writeln!(f, "Random path: {}", format_path(path))?;
        writeln!(f, "Total delay: {:.3} ms", metrics.total_delay_ms)?;
        writeln!(f, "Reliability cost: {:.4}", metrics.reliability_cost)?;
        writeln!(f, "Bandwidth cost: {:.4}", metrics.bandwidth_cost)?;
        writeln!(f, "{}", path_bandwidths(self.graph, path))
    }
}

/// Render the outcome of an optimizer run
pub fn render_solve<G: GraphAccessor + ?Sized>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    report: &SolveReport,
) -> String {
    SolveSummary::new(graph, source, target, report).to_string()
}

/// Render a random baseline path
pub fn render_random_path<G: GraphAccessor + ?Sized>(
    graph: &G,
    source: NodeId,
    target: NodeId,
    path: Option<&[NodeId]>,
) -> String {
    RandomPathSummary::new(graph, source, target, path).to_string()
}
