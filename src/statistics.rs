//! Statistics about repeated solver runs and the benchmark
//! harness emitting them as CSV.

use custom_debug_derive::Debug;
use std::io::Write;

use crate::debug::opt_fmt;
use crate::graph::Graph;
use crate::solver::{solve, ColoringResult, Strategy};
use crate::Error;

/// One benchmark run, one CSV row.
#[derive(Debug)]
pub struct BenchRecord {
    pub run: usize,
    pub seconds: f64,
    pub success: bool,
    pub nodes: u64,
    pub backtracks: u64,
}

impl BenchRecord {
    fn from_result(run: usize, result: &ColoringResult) -> Self {
        BenchRecord {
            run,
            seconds: result.seconds,
            success: result.success,
            nodes: result.nodes,
            backtracks: result.backtracks,
        }
    }

    fn csv_row(&self) -> String {
        format!(
            "{},{:.10},{},{},{}",
            self.run, self.seconds, self.success as u8, self.nodes, self.backtracks
        )
    }
}

#[derive(Debug, Default)]
pub struct BenchSummary {
    records: Vec<BenchRecord>,
    #[debug(with = "opt_fmt")]
    max_seconds: Option<f64>,
}

impl BenchSummary {
    pub fn runs(&self) -> usize {
        self.records.len()
    }

    pub fn successes(&self) -> usize {
        self.records.iter().filter(|record| record.success).count()
    }

    pub fn average_seconds(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            let total: f64 = self.records.iter().map(|record| record.seconds).sum();
            total / self.records.len() as f64
        }
    }

    fn summary_row(&self) -> String {
        format!(
            "avg,{:.10},ok={}/{},,",
            self.average_seconds(),
            self.successes(),
            self.runs()
        )
    }
}

/// Solve the same instance `runs` times, streaming one CSV row per
/// run and a terminating aggregate row to `out`.
pub fn run_bench(
    graph: &Graph,
    k: usize,
    strategy: &Strategy,
    runs: usize,
    max_seconds: f64,
    out: &mut impl Write,
) -> Result<BenchSummary, Error> {
    let runs = runs.max(1);
    let mut summary = BenchSummary {
        records: Vec::with_capacity(runs),
        max_seconds: if max_seconds > 0.0 {
            Some(max_seconds)
        } else {
            None
        },
    };

    writeln!(out, "run,time,success,nodes,backtracks")?;

    for run in 0..runs {
        let result = solve(graph, k, strategy, max_seconds)?;
        let record = BenchRecord::from_result(run, &result);
        writeln!(out, "{}", record.csv_row())?;
        summary.records.push(record);
    }

    writeln!(out, "{}", summary.summary_row())?;
    Ok(summary)
}

#[cfg(test)]
mod test {
    use super::*;

    fn triangle() -> Graph {
        let mut graph = Graph::new(3);
        graph.add_edge(0, 1).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(0, 2).unwrap();
        graph
    }

    #[test]
    fn test_bench_csv_shape() {
        let graph = triangle();
        let mut out = Vec::new();

        let summary = run_bench(&graph, 3, &Strategy::Serial, 3, 0.0, &mut out).unwrap();

        assert_eq!(3, summary.runs());
        assert_eq!(3, summary.successes());

        let csv = String::from_utf8(out).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(5, lines.len());
        assert_eq!("run,time,success,nodes,backtracks", lines[0]);
        assert!(lines[1].starts_with("0,"));
        assert!(lines[3].starts_with("2,"));
        assert!(lines[1].ends_with(",1,3,0"));
        assert!(lines[4].starts_with("avg,"));
        assert!(lines[4].ends_with(",ok=3/3,,"));
    }

    #[test]
    fn test_bench_records_failures() {
        let graph = triangle();
        let mut out = Vec::new();

        let summary = run_bench(&graph, 2, &Strategy::Serial, 2, 0.0, &mut out).unwrap();

        assert_eq!(2, summary.runs());
        assert_eq!(0, summary.successes());
        assert!(String::from_utf8(out).unwrap().contains(",ok=0/2,,"));
    }

    #[test]
    fn test_zero_runs_clamps_to_one() {
        let graph = triangle();
        let mut out = Vec::new();

        let summary = run_bench(&graph, 3, &Strategy::Serial, 0, 0.0, &mut out).unwrap();
        assert_eq!(1, summary.runs());
    }
}
