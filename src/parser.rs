//! Parser for graphs in the edge-list text format:
//! a header line `n m` followed by m lines `u v`,
//! whitespace separated. Vertices may be stored
//! 1-based; the parser shifts them on read.

use std::convert::TryFrom;
use std::io::BufRead;

use crate::{
    graph::{Graph, GraphError, VertexIndex},
    Error,
};

pub type Input<'a> = &'a str;
pub type ParseError<'a> = nom::error::VerboseError<Input<'a>>;
pub type ParseResult<'a, O> = nom::IResult<Input<'a>, O, ParseError<'a>>;

fn parse_header(input: Input<'_>) -> ParseResult<'_, (usize, usize)> {
    use nom::{
        character::complete::{multispace0, multispace1, u64},
        combinator::map,
        sequence::{pair, preceded},
    };

    let numbers = pair(preceded(multispace0, u64), preceded(multispace1, u64));
    map(numbers, |(n, m)| (n as usize, m as usize))(input)
}

fn parse_edge(input: Input<'_>) -> ParseResult<'_, (i64, i64)> {
    use nom::{
        character::complete::{i64, multispace0, multispace1},
        sequence::{pair, preceded},
    };

    pair(preceded(multispace0, i64), preceded(multispace1, i64))(input)
}

fn complete_line<'a, O>(
    parser: impl FnMut(Input<'a>) -> ParseResult<'a, O>,
    line: &'a str,
) -> Result<O, Error> {
    use nom::{character::complete::multispace0, combinator::all_consuming, sequence::terminated};

    let (_, parsed) = all_consuming(terminated(parser, multispace0))(line)?;
    Ok(parsed)
}

fn resolve_vertex(raw: i64, one_based: bool) -> Result<VertexIndex, Error> {
    let shifted = if one_based { raw - 1 } else { raw };
    VertexIndex::try_from(shifted).map_err(|_| Error::from(GraphError(shifted)))
}

/// Read a graph in the edge-list format. Exactly the m edges announced
/// by the header are read; blank lines are skipped and anything after
/// the last edge is ignored.
pub fn parse_edge_list<B: BufRead>(input: B, one_based: bool) -> Result<Graph, Error> {
    let mut lines = input.lines().filter(|line| match line {
        Ok(content) => !content.trim().is_empty(),
        Err(_) => true,
    });

    let header = lines
        .next()
        .ok_or_else(|| Error::FormatError("missing `n m` header line".to_string()))??;
    let (n, m) = complete_line(parse_header, &header)?;

    let mut graph = Graph::new(n);

    for edge in 0..m {
        let line = lines.next().ok_or_else(|| {
            Error::FormatError(format!("header announced {} edges, found {}", m, edge))
        })??;
        let (raw_start, raw_end) = complete_line(parse_edge, &line)?;

        let start = resolve_vertex(raw_start, one_based)?;
        let end = resolve_vertex(raw_end, one_based)?;
        graph.add_edge(start, end)?;
    }

    Ok(graph)
}
