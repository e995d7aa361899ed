use log::info;
use maxflow::graph::compute_max_flow;

fn main() {
    env_logger::init();

    let edges = vec![
        ("S", "A", 5),
        ("S", "B", 4),
        ("A", "D", 1),
        ("A", "C", 3),
        ("C", "D", 2),
        ("C", "B", 1),
        ("C", "E", 2),
        ("C", "F", 3),
        ("B", "F", 2),
        ("D", "G", 3),
        ("E", "G", 2),
        ("E", "t", 2),
        ("G", "t", 5),
    ];
    let (source, sink) = ("S", "t");
    info!("running Edmonds-Karp on {} edges", edges.len());

    let result = match compute_max_flow(edges, &source, &sink) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    println!("{}", "=".repeat(60));
    println!("FORD-FULKERSON (EDMONDS-KARP)");
    println!("{}", "=".repeat(60));
    println!("\nSource: {}", source);
    println!("Sink: {}", sink);
    println!("\nAugmenting paths found:\n");

    for path in &result.paths {
        println!("Iteration {}: {}", path.index, path.vertices.join(" → "));
        println!("  Flow along path: {}", path.bottleneck);
        println!();
    }

    let cut: Vec<String> = result
        .min_cut
        .edges
        .iter()
        .map(|(u, v, c)| format!("{}→{} ({})", u, v, c))
        .collect();
    println!("Minimum cut: {}", cut.join(", "));

    println!("{}", "=".repeat(60));
    println!("MAXIMUM FLOW: {}", result.total_flow);
    println!("{}", "=".repeat(60));
}
