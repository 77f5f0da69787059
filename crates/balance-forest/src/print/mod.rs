//! Tree-dump rendering shared by the AVL tree and the array heaps.
//!
//! A node prints as its head line followed by one row per present child:
//!
//! ```text
//! 4
//! ├─ 2
//! │  └─ 1
//! └─ 5
//! ```

/// Renders one child subtree given the indentation prefix for its lines.
pub type Subtree<'a> = dyn Fn(&str) -> String + 'a;

/// Appends the child rows of a binary node to `head`.
///
/// `tab` is the prefix of the node's own nested lines. The right child, or
/// the left one when it is alone, gets the closing `└─` branch.
pub fn render_node(
    head: String,
    tab: &str,
    left: Option<&Subtree>,
    right: Option<&Subtree>,
) -> String {
    let mut out = head;
    for (child, closing) in [(left, right.is_none()), (right, true)] {
        if let Some(child) = child {
            push_row(&mut out, tab, child, closing);
        }
    }
    out
}

fn push_row(out: &mut String, tab: &str, child: &Subtree, closing: bool) {
    let rail = if closing { ' ' } else { '│' };
    let text = child(&format!("{tab}{rail}  "));
    out.push('\n');
    out.push_str(tab);
    if text.is_empty() {
        out.push('│');
        return;
    }
    out.push_str(if closing { "└─ " } else { "├─ " });
    out.push_str(&text);
}
