//! Topology path helpers.
//!
//! Entities are addressed by slash-joined paths built from ordinal position
//! at construction time: a network is `<network>`, a node
//! `<network>/<node>`, a term point `<network>/<node>/<tp>`. The separator
//! count therefore classifies a path without any lookup, which the layout
//! engines rely on when deciding whether a parent/child reference points at
//! a node or at a term point.
//!
//! Deep-mode node splitting appends a numeric `::<n>` suffix to cloned
//! paths; [`base_path`] strips it again when the original entity (for
//! example a node's own term points) has to be recovered.

/// Path separator between network, node, and term point segments.
pub const SEPARATOR: char = '/';

/// Suffix separator appended to split (cloned) node paths.
pub const SPLIT_MARK: &str = "::";

/// What kind of entity a path addresses, judged by separator count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Network,
    Node,
    TermPoint,
}

/// Classify a path by its separator count.
pub fn kind(path: &str) -> PathKind {
    match path.matches(SEPARATOR).count() {
        0 => PathKind::Network,
        1 => PathKind::Node,
        _ => PathKind::TermPoint,
    }
}

/// Whether the path addresses a node (exactly one separator).
pub fn is_node(path: &str) -> bool {
    kind(path) == PathKind::Node
}

/// Whether the path addresses a term point (two separators).
pub fn is_term_point(path: &str) -> bool {
    kind(path) == PathKind::TermPoint
}

/// Join a parent path and a child name.
pub fn join(parent: &str, name: &str) -> String {
    format!("{parent}{SEPARATOR}{name}")
}

/// The last path segment (the entity's own name).
pub fn name_of(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// The network segment of a path.
pub fn network_of(path: &str) -> &str {
    path.split(SEPARATOR).next().unwrap_or(path)
}

/// The node path a term point path belongs to.
///
/// Returns the path unchanged when it has no term point segment.
pub fn node_path_of(tp_path: &str) -> &str {
    match tp_path.rfind(SEPARATOR) {
        Some(pos) if is_term_point(tp_path) => &tp_path[..pos],
        _ => tp_path,
    }
}

/// Strip a deep-mode `::<n>` split suffix, if present.
pub fn base_path(path: &str) -> &str {
    match path.find(SPLIT_MARK) {
        Some(pos) => &path[..pos],
        None => path,
    }
}

/// Append a split suffix for the `ordinal`-th clone of a path.
pub fn split_path(path: &str, ordinal: u64) -> String {
    format!("{path}{SPLIT_MARK}{ordinal}")
}
