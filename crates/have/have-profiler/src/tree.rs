use crate::location::{OwnedProfileLocation, ProfileLocation};
use crate::record::{ProfileRecord, RecordType};
use crate::registry::LocationRegistry;

pub const ROOT_ID: &str = "ROOT";

/// A node in the reconstructed call tree. Stored in a flat `Vec` addressed
/// by index rather than via child/parent pointers — the same index-first
/// discipline the ring buffer itself uses, and it sidesteps the aliasing
/// rules a pointer-linked tree would otherwise fight.
#[derive(Debug, Clone)]
pub struct ProfileNode {
    pub id: String,
    pub location: Option<OwnedProfileLocation>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub call_count: u64,
    pub total_cycles: u64,
    pub percentage: f64,
}

impl ProfileNode {
    fn root() -> Self {
        Self {
            id: ROOT_ID.to_string(),
            location: None,
            parent: None,
            children: Vec::new(),
            call_count: 0,
            total_cycles: 0,
            percentage: 0.0,
        }
    }

    fn add_call(&mut self, cycles: u64) {
        self.total_cycles += cycles;
        self.call_count += 1;
    }
}

/// Output of [`reconstruct`]: the flat arena plus the root's index (always
/// `0`) for convenience.
pub struct ProfileReport {
    pub nodes: Vec<ProfileNode>,
    pub root: usize,
    pub cpu_freq: u64,
}

struct StackEntry {
    node: usize,
    start_cycles: u64,
}

/// Replays `records` (in ring slot order) against `registry` to rebuild the
/// nested call tree, per the begin/end stack-machine semantics: `ProfilerEnd`
/// must observe depth 1 on entry and 0 on exit, `SectionEnd` must match the
/// `location.id` pushed by its `SectionBegin`. Any violation is a fatal
/// programming error in the instrumented program, not a recoverable input
/// error, so this panics rather than returning a `Result`.
pub fn reconstruct(
    records: &[ProfileRecord],
    registry: &LocationRegistry,
    cpu_freq: u64,
    path_trim: Option<&str>,
) -> ProfileReport {
    let mut nodes = vec![ProfileNode::root()];
    let mut stack: Vec<StackEntry> = Vec::new();

    for record in records {
        match record.record_type {
            RecordType::ProfilerStart => {
                stack.push(StackEntry {
                    node: 0,
                    start_cycles: record.cycles,
                });
            }
            RecordType::ProfilerEnd => {
                assert_eq!(stack.len(), 1, "ProfilerEnd observed at depth != 1");
                let entry = stack.pop().unwrap();
                assert_eq!(entry.node, 0, "ProfilerEnd popped a non-root frame");
                let delta = record.cycles.wrapping_sub(entry.start_cycles);
                nodes[0].add_call(delta);
                break;
            }
            RecordType::SectionBegin => {
                let top = stack.last().expect("SectionBegin with no open frame").node;
                let location = registry.get(record.location_id);
                let owned = match path_trim {
                    Some(prefix) => location.with_trimmed_path(prefix),
                    None => location.with_trimmed_path(""),
                };
                let id = owned.id();
                let child = find_or_create_child(&mut nodes, top, &id, owned);
                stack.push(StackEntry {
                    node: child,
                    start_cycles: record.cycles,
                });
            }
            RecordType::SectionEnd => {
                let entry = stack.pop().expect("SectionEnd with no open frame");
                let expected_id = registry.get(record.location_id).id();
                assert_eq!(
                    nodes[entry.node].id, expected_id,
                    "SectionEnd location does not match its SectionBegin"
                );
                let delta = record.cycles.wrapping_sub(entry.start_cycles);
                nodes[entry.node].add_call(delta);
            }
        }
    }

    let root_total = nodes[0].total_cycles.max(1);
    for node in &mut nodes {
        node.percentage = node.total_cycles as f64 / root_total as f64 * 100.0;
    }

    ProfileReport {
        nodes,
        root: 0,
        cpu_freq,
    }
}

fn find_or_create_child(
    nodes: &mut Vec<ProfileNode>,
    parent: usize,
    id: &str,
    location: OwnedProfileLocation,
) -> usize {
    if let Some(&existing) = nodes[parent].children.iter().find(|&&c| nodes[c].id == id) {
        return existing;
    }
    let index = nodes.len();
    nodes.push(ProfileNode {
        id: id.to_string(),
        location: Some(location),
        parent: Some(parent),
        children: Vec::new(),
        call_count: 0,
        total_cycles: 0,
        percentage: 0.0,
    });
    nodes[parent].children.push(index);
    index
}
