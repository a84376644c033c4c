//! Logging and debugging facilities for BlendInt.
//!
//! This module provides:
//! - Target names used by the `tracing` instrumentation
//! - Debug visualization for object trees
//! - Performance spans for profiling
//!
//! # Tracing Integration
//!
//! BlendInt logs through the `tracing` crate. Nothing is printed unless the
//! application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("blendint=debug,blendint_core=info")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use blendint_core::ObjectTree;
//! use blendint_core::logging::{DescribeNode, ObjectTreeDebug};
//!
//! struct Named(&'static str);
//!
//! impl DescribeNode for Named {
//!     fn node_name(&self) -> &str { self.0 }
//!     fn node_type(&self) -> &str { "Named" }
//! }
//!
//! let mut tree = ObjectTree::new();
//! let root = tree.insert(Named("window"));
//! let child = tree.insert(Named("button"));
//! tree.push_back(root, child).unwrap();
//!
//! let text = ObjectTreeDebug::new().format_subtree(&tree, root).unwrap();
//! assert!(text.contains("button"));
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::object::{ObjectError, ObjectId, ObjectResult, ObjectTree};

/// Target names for log filtering.
pub mod targets {
    /// Object tree target.
    pub const OBJECT: &str = "blendint_core::object";
    /// Signal/slot target.
    pub const SIGNAL: &str = "blendint_core::signal";
    /// View tree and update protocol target.
    pub const VIEW: &str = "blendint::view";
    /// Layout solver target.
    pub const LAYOUT: &str = "blendint::layout";
    /// Event dispatch target.
    pub const DISPATCH: &str = "blendint::dispatch";
    /// Frame and dialog target.
    pub const FRAME: &str = "blendint::frame";
    /// Theme loading target.
    pub const THEME: &str = "blendint::theme";
    /// Performance spans.
    pub const PERF: &str = "blendint::perf";
}

/// What the tree printer needs to know about a node.
pub trait DescribeNode {
    /// Human-readable name. Empty names print as `(unnamed)`.
    fn node_name(&self) -> &str;
    /// Short type name.
    fn node_type(&self) -> &str;
    /// Extra detail appended after the type, such as geometry.
    fn node_detail(&self) -> Option<String> {
        None
    }
}

/// Style options for object tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for object tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Whether to show type names.
    pub show_types: bool,
    /// Whether to show [`DescribeNode::node_detail`].
    pub show_details: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_types: true,
            show_details: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_details: true,
            ..Default::default()
        }
    }

    /// Options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_types: false,
            show_details: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing object trees.
#[derive(Debug, Clone, Default)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every root of the tree.
    pub fn format_all<T: DescribeNode>(&self, tree: &ObjectTree<T>) -> String {
        let mut output = String::new();
        let roots = tree.roots();
        let _ = writeln!(output, "Object Tree ({} total objects):", tree.len());
        if roots.is_empty() {
            output.push_str("  (empty)\n");
        }
        for root in roots {
            let _ = self.format_subtree_into(tree, root, 0, true, &mut output);
        }
        output
    }

    /// Format a subtree starting from `root`.
    pub fn format_subtree<T: DescribeNode>(
        &self,
        tree: &ObjectTree<T>,
        root: ObjectId,
    ) -> ObjectResult<String> {
        if !tree.contains(root) {
            return Err(ObjectError::InvalidObjectId);
        }
        let mut output = String::new();
        let _ = self.format_subtree_into(tree, root, 0, true, &mut output);
        Ok(output)
    }

    fn format_subtree_into<T: DescribeNode>(
        &self,
        tree: &ObjectTree<T>,
        id: ObjectId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let Some(node) = tree.get(id) else {
            return Ok(());
        };

        output.push_str(&self.build_prefix(depth, is_last));

        let name = node.node_name();
        output.push_str(if name.is_empty() { "(unnamed)" } else { name });

        if self.options.show_ids {
            write!(output, " [{:?}]", id)?;
        }
        if self.options.show_types {
            let type_name = node.node_type();
            let short_type = type_name.rsplit("::").next().unwrap_or(type_name);
            write!(output, " ({short_type})")?;
        }
        if self.options.show_details
            && let Some(detail) = node.node_detail()
        {
            write!(output, " {detail}")?;
        }
        output.push('\n');

        let count = tree.child_count(id);
        for (i, child) in tree.children(id).enumerate() {
            self.format_subtree_into(tree, child, depth + 1, i + 1 == count, output)?;
        }
        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
