use std::{io::BufRead, str::FromStr};

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{digit1, line_ending, not_line_ending, space0, space1},
    combinator::{map, map_res, opt},
    number::complete::double,
};
use num::{Integer, Unsigned};
use ordered_float::OrderedFloat;

#[derive(Clone, Debug)]
pub struct Graph {
    pub number_of_vertices: usize,
    pub arcs: Vec<Arc>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Arc {
    pub from: usize,
    pub to: usize,
    pub weight: OrderedFloat<f64>,
}

#[derive(Clone, Debug)]
enum Line {
    Blank,
    Comment,
    Problem {
        number_of_vertices: usize,
        number_of_arcs: usize,
    },
    Arc(Arc),
}

/// Reads a graph in the `c` / `p <vertices> <arcs>` / `a <from> <to> <weight>`
/// line format. Returns `None` if a line does not parse, an arc comes before
/// the problem line, an endpoint is out of range, a weight is negative or not
/// finite, or the number of arcs differs from the problem line.
pub fn read_graph(input: &mut std::io::BufReader<impl std::io::Read>) -> Option<Graph> {
    let mut problem: Option<(usize, usize)> = None;
    let mut arcs = Vec::default();

    let mut line = String::default();
    loop {
        line.clear();
        let Ok(bytes) = input.read_line(&mut line) else {
            return None;
        };
        if bytes == 0 {
            break;
        }
        let Ok((residual, parsed)) = graph_line(line.as_str()) else {
            return None;
        };
        if residual != "" {
            return None;
        }

        match parsed {
            Line::Blank | Line::Comment => {}
            Line::Problem {
                number_of_vertices,
                number_of_arcs,
            } => {
                if problem.is_some() {
                    return None;
                }
                problem = Some((number_of_vertices, number_of_arcs));
                arcs.reserve(number_of_arcs);
            }
            Line::Arc(arc) => {
                let Some((number_of_vertices, _)) = problem else {
                    return None;
                };
                if arc.from >= number_of_vertices || arc.to >= number_of_vertices {
                    return None;
                }
                if !arc.weight.is_finite() || arc.weight < OrderedFloat(0.0) {
                    return None;
                }
                arcs.push(arc);
            }
        }
    }

    let (number_of_vertices, number_of_arcs) = problem?;
    if arcs.len() != number_of_arcs {
        return None;
    }
    return Some(Graph {
        number_of_vertices,
        arcs,
    });
}

fn graph_line(input: &str) -> IResult<&str, Line> {
    // <line> ::= <comment> | <problem> | <arc> | <blank>
    alt((
        map(comment, |_| Line::Comment),
        problem,
        map(arc, Line::Arc),
        map(blank, |_| Line::Blank),
    ))
    .parse(input)
}

fn comment(input: &str) -> IResult<&str, String> {
    // <comment> ::= "c" <any_sequence_of_characters_other_than_EOL> [<EOL>]
    map((tag("c"), not_line_ending, opt(line_ending)), |(_, comment, _)| {
        str::to_string(str::trim_start(comment))
    })
    .parse(input)
}

fn problem(input: &str) -> IResult<&str, Line> {
    // <problem> ::= "p" <oneOrMoreSpace> <unsigned_integer> <oneOrMoreSpace> <unsigned_integer> <zeroOrMoreSpace> [<EOL>]
    map(
        (
            tag("p"),
            space1,
            unsigned_integer,
            space1,
            unsigned_integer,
            space0,
            opt(line_ending),
        ),
        |(_, _, number_of_vertices, _, number_of_arcs, _, _)| Line::Problem {
            number_of_vertices,
            number_of_arcs,
        },
    )
    .parse(input)
}

fn arc(input: &str) -> IResult<&str, Arc> {
    // <arc> ::= "a" <oneOrMoreSpace> <vertex> <oneOrMoreSpace> <vertex> <oneOrMoreSpace> <weight> <zeroOrMoreSpace> [<EOL>]
    map(
        (
            tag("a"),
            space1,
            unsigned_integer,
            space1,
            unsigned_integer,
            space1,
            weight,
            space0,
            opt(line_ending),
        ),
        |(_, _, from, _, to, _, weight, _, _)| Arc { from, to, weight },
    )
    .parse(input)
}

fn blank(input: &str) -> IResult<&str, ()> {
    // <blank> ::= <zeroOrMoreSpace> <EOL>
    map((space0, line_ending), |_| ()).parse(input)
}

fn weight(input: &str) -> IResult<&str, OrderedFloat<f64>> {
    map(double, OrderedFloat).parse(input)
}

fn unsigned_integer<UIntT: Integer + Unsigned + FromStr>(input: &str) -> IResult<&str, UIntT> {
    // <unsigned_integer> ::= <digit> | <digit><unsigned_integer>
    map_res(digit1, str::parse).parse(input)
}
