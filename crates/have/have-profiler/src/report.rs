use crate::tree::{ProfileNode, ProfileReport};

fn millis(cycles: u64, cpu_freq: u64) -> f64 {
    if cpu_freq == 0 {
        return 0.0;
    }
    (cycles as f64 / cpu_freq as f64) * 1000.0
}

fn display_name(node: &ProfileNode) -> &str {
    match &node.location {
        Some(loc) => loc.display_name(),
        None => &node.id,
    }
}

/// Prints one line per node, indented by tree depth, in the style of
/// `print_stage_table`'s fixed-width columns: id, call count, total cycles,
/// average cycles, milliseconds, percentage (two decimal places).
pub fn print_tree(report: &ProfileReport) {
    println!(
        "  {:<32} {:>10} {:>14} {:>12} {:>10}  {:>7}",
        "Section", "calls", "cycles", "avg cycles", "ms", "% root"
    );
    println!("  {}", "\u{2500}".repeat(92));
    print_node(report, report.root, 0);
}

fn print_node(report: &ProfileReport, index: usize, depth: usize) {
    let node = &report.nodes[index];
    if index != report.root {
        let avg = if node.call_count > 0 {
            node.total_cycles / node.call_count
        } else {
            0
        };
        let indent = "  ".repeat(depth);
        let name = format!("{indent}{}", display_name(node));
        println!(
            "  {:<32} {:>10} {:>14} {:>12} {:>10.3}  {:>6.2}%",
            name,
            node.call_count,
            node.total_cycles,
            avg,
            millis(node.total_cycles, report.cpu_freq),
            node.percentage
        );
    }
    for &child in &node.children {
        print_node(report, child, depth + 1);
    }
}

/// Prints every non-root node as a flat list ordered by total cycles
/// descending, regardless of nesting.
pub fn print_list(report: &ProfileReport) {
    println!(
        "  {:<32} {:>10} {:>14} {:>12} {:>10}  {:>7}",
        "Section", "calls", "cycles", "avg cycles", "ms", "% root"
    );
    println!("  {}", "\u{2500}".repeat(92));

    let mut indices: Vec<usize> = (0..report.nodes.len()).filter(|&i| i != report.root).collect();
    indices.sort_by(|&a, &b| report.nodes[b].total_cycles.cmp(&report.nodes[a].total_cycles));

    for index in indices {
        let node = &report.nodes[index];
        let avg = if node.call_count > 0 {
            node.total_cycles / node.call_count
        } else {
            0
        };
        println!(
            "  {:<32} {:>10} {:>14} {:>12} {:>10.3}  {:>6.2}%",
            display_name(node),
            node.call_count,
            node.total_cycles,
            avg,
            millis(node.total_cycles, report.cpu_freq),
            node.percentage
        );
    }
}
