//! Synthetic graph generators for the gen mode.

use rand::{distributions::Bernoulli, rngs::StdRng, Rng, SeedableRng};

use crate::{graph::Graph, Error};

/// A fully specified generator invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GenSpec {
    Complete { n: usize },
    Cycle { n: usize },
    Grid { rows: usize, cols: usize },
    Random { n: usize, p: f64, seed: u64 },
    Bipartite { left: usize, right: usize, p: f64, seed: u64 },
}

pub fn build(spec: GenSpec) -> Result<Graph, Error> {
    match spec {
        GenSpec::Complete { n } => Ok(make_complete(n)),
        GenSpec::Cycle { n } => make_cycle(n),
        GenSpec::Grid { rows, cols } => make_grid(rows, cols),
        GenSpec::Random { n, p, seed } => make_random_gnp(n, p, seed),
        GenSpec::Bipartite {
            left,
            right,
            p,
            seed,
        } => make_bipartite_random(left, right, p, seed),
    }
}

pub fn make_complete(n: usize) -> Graph {
    let mut graph = Graph::new(n);
    for i in 0..n {
        for j in i + 1..n {
            graph.add_edge(i, j).expect("generated index is in range");
        }
    }
    graph
}

pub fn make_cycle(n: usize) -> Result<Graph, Error> {
    if n < 3 {
        return Err(Error::ConfigError("cycle needs n >= 3".to_string()));
    }

    let mut graph = Graph::new(n);
    for i in 0..n {
        graph
            .add_edge(i, (i + 1) % n)
            .expect("generated index is in range");
    }
    Ok(graph)
}

pub fn make_grid(rows: usize, cols: usize) -> Result<Graph, Error> {
    if rows == 0 || cols == 0 {
        return Err(Error::ConfigError(
            "grid needs positive rows and cols".to_string(),
        ));
    }

    let mut graph = Graph::new(rows * cols);
    let id = |r: usize, c: usize| r * cols + c;

    for r in 0..rows {
        for c in 0..cols {
            if r + 1 < rows {
                graph
                    .add_edge(id(r, c), id(r + 1, c))
                    .expect("generated index is in range");
            }
            if c + 1 < cols {
                graph
                    .add_edge(id(r, c), id(r, c + 1))
                    .expect("generated index is in range");
            }
        }
    }
    Ok(graph)
}

fn edge_coin(p: f64) -> Result<Bernoulli, Error> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::ConfigError("p must be in [0, 1]".to_string()));
    }
    Ok(Bernoulli::new(p).expect("probability already validated"))
}

pub fn make_random_gnp(n: usize, p: f64, seed: u64) -> Result<Graph, Error> {
    let coin = edge_coin(p)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut graph = Graph::new(n);
    for i in 0..n {
        for j in i + 1..n {
            if rng.sample(coin) {
                graph.add_edge(i, j).expect("generated index is in range");
            }
        }
    }
    Ok(graph)
}

pub fn make_bipartite_random(left: usize, right: usize, p: f64, seed: u64) -> Result<Graph, Error> {
    let coin = edge_coin(p)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut graph = Graph::new(left + right);
    for i in 0..left {
        for j in 0..right {
            if rng.sample(coin) {
                graph
                    .add_edge(i, left + j)
                    .expect("generated index is in range");
            }
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_complete() {
        let k5 = make_complete(5);
        assert_eq!(5, k5.size());
        assert_eq!(10, k5.number_edges());
        assert!(k5.degrees().iter().all(|&d| d == 4));
    }

    #[test]
    fn test_cycle() {
        let c6 = make_cycle(6).unwrap();
        assert_eq!(6, c6.size());
        assert_eq!(6, c6.number_edges());
        assert!(c6.degrees().iter().all(|&d| d == 2));

        assert!(matches!(make_cycle(2), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_grid() {
        let grid = make_grid(3, 3).unwrap();
        assert_eq!(9, grid.size());
        assert_eq!(12, grid.number_edges());

        assert!(matches!(make_grid(0, 4), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_random_gnp_extremes() {
        let empty = make_random_gnp(6, 0.0, 7).unwrap();
        assert_eq!(0, empty.number_edges());

        let full = make_random_gnp(6, 1.0, 7).unwrap();
        assert_eq!(15, full.number_edges());

        assert!(matches!(
            make_random_gnp(6, 1.5, 7),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_random_gnp_is_reproducible() {
        let first = make_random_gnp(20, 0.4, 123).unwrap();
        let second = make_random_gnp(20, 0.4, 123).unwrap();
        assert_eq!(first, second);

        let other_seed = make_random_gnp(20, 0.4, 124).unwrap();
        assert_ne!(first, other_seed);
    }

    #[test]
    fn test_bipartite_random_extremes() {
        let full = make_bipartite_random(3, 4, 1.0, 1).unwrap();
        assert_eq!(7, full.size());
        assert_eq!(12, full.number_edges());
        // All edges cross the cut.
        for (start, end) in full.iterate_edges() {
            assert!((start < 3) != (end < 3));
        }

        let empty = make_bipartite_random(3, 4, 0.0, 1).unwrap();
        assert_eq!(0, empty.number_edges());
    }
}
