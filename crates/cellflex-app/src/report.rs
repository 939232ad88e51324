// ABOUTME: Plain-text dump of a settled widget tree.
// ABOUTME: Prints every widget with its size, classes, style, table rows, and dividers.

use std::fmt::{self, Write};

use cellflex_layout::{WidgetId, WidgetTree};

/// Write the whole tree, roots first, children indented below their parent
pub fn render(tree: &WidgetTree, out: &mut impl Write) -> fmt::Result {
    for &root in tree.roots() {
        render_widget(tree, root, 0, out)?;
    }
    Ok(())
}

fn render_widget(tree: &WidgetTree, id: WidgetId, depth: usize, out: &mut impl Write) -> fmt::Result {
    let Ok(element) = tree.get(id) else {
        return Ok(());
    };
    let indent = "  ".repeat(depth);
    writeln!(
        out,
        "{}{} [{:?}] {}x{}",
        indent, element.name, element.kind, element.client_size.width, element.client_size.height
    )?;
    if !element.classes.is_empty() {
        writeln!(out, "{}  class: {}", indent, element.classes)?;
    }
    if !element.style.is_empty() {
        writeln!(out, "{}  style: {}", indent, element.style)?;
    }

    if let Some(table) = tree.table(id) {
        for (i, row) in table.rows.iter().enumerate() {
            let widths: Vec<&str> = row
                .cells
                .iter()
                .map(|c| c.style.get("width").unwrap_or("-"))
                .collect();
            writeln!(
                out,
                "{}  row {}: height {} widths [{}]",
                indent,
                i,
                row.style.get("height").unwrap_or("-"),
                widths.join(", ")
            )?;
        }
    }
    if let Some(split) = tree.split(id) {
        let dividers: Vec<String> = split
            .dividers()
            .iter()
            .map(|d| format!("{:.1}", d.t))
            .collect();
        writeln!(out, "{}  dividers: [{}]", indent, dividers.join(", "))?;
    }

    for &child in &element.children {
        render_widget(tree, child, depth + 1, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellflex_core::{LayoutConfig, WidgetDescriptor, WidgetKind};

    #[test]
    fn renders_nested_widgets() {
        let mut tree = WidgetTree::new(LayoutConfig::default());
        tree.create(WidgetDescriptor::new("main", WidgetKind::Split))
            .unwrap();
        tree.create(WidgetDescriptor::new("left", WidgetKind::TableRow).parent("main"))
            .unwrap();
        tree.create(
            WidgetDescriptor::new("cell", WidgetKind::Label)
                .parent("left")
                .flex(1.0, 0.0),
        )
        .unwrap();
        tree.create(WidgetDescriptor::new("right", WidgetKind::Widget).parent("main"))
            .unwrap();
        tree.run_until_idle();

        let mut out = String::new();
        render(&tree, &mut out).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "main [Split] 1200x800");
        assert!(lines.contains(&"  dividers: [600.0]"));
        assert!(lines.contains(&"  left [TableRow] 597x800"));
        assert!(lines.contains(&"    row 0: height - widths [100%]"));
        assert!(lines.contains(&"    cell [Label] 0x0"));
        assert!(out.contains("width: 597px;"));
    }

    #[test]
    fn empty_tree_renders_nothing() {
        let tree = WidgetTree::new(LayoutConfig::default());
        let mut out = String::new();
        render(&tree, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
