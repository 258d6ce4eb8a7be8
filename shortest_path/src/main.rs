use std::{io::BufReader, process::ExitCode};

use dijkstra::dijkstra;
use read_graph::read_graph;

mod dijkstra;
mod read_graph;

fn main() -> ExitCode {
    let source = match std::env::args().nth(1) {
        None => 0,
        Some(argument) => match argument.parse::<usize>() {
            Ok(source) => source,
            Err(_) => {
                eprintln!("invalid source vertex: {}", argument);
                return ExitCode::FAILURE;
            }
        },
    };

    let Some(graph) = read_graph(&mut BufReader::new(std::io::stdin())) else {
        eprintln!("malformed graph input");
        return ExitCode::FAILURE;
    };

    eprintln!(
        "number_of_vertices={} number_of_arcs={} source={}",
        graph.number_of_vertices,
        graph.arcs.len(),
        source
    );

    let start_time = std::time::Instant::now();
    let shortest_paths = match dijkstra(&graph, source) {
        Ok(shortest_paths) => shortest_paths,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    eprintln!("  SETTLED  DECREASE   TIME(ms)");
    eprintln!(
        "{:9} {:9} {:10.3}",
        shortest_paths.number_of_settled_vertices,
        shortest_paths.number_of_decrease_keys,
        start_time.elapsed().as_secs_f64() * 1e3
    );

    for (vertex, distance) in shortest_paths.distance.iter().enumerate() {
        if distance.is_infinite() {
            println!("{} INF", vertex);
        } else {
            println!("{} {}", vertex, distance);
        }
    }

    return ExitCode::SUCCESS;
}
