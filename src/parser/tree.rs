use scraper::ElementRef;

/// Read-only navigation over an element tree.
///
/// Implementors only supply the primitive accessors; the query helpers walk
/// the tree in document order on top of them.
pub trait TreeNode: Copy {
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
    /// Concatenated text of the node and everything below it.
    fn text_content(&self) -> String;
    fn element_children(&self) -> impl Iterator<Item = Self>;
    fn following_siblings(&self) -> impl Iterator<Item = Self>;

    fn children_matching<P>(&self, pred: P) -> Vec<Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.element_children().filter(|n| pred(n)).collect()
    }

    /// Pre-order walk below `self` (the node itself is not a candidate).
    fn descendants_matching<P>(&self, pred: P) -> Vec<Self>
    where
        P: Fn(&Self) -> bool,
    {
        let mut found = Vec::new();
        collect_below(*self, &pred, &mut found);
        found
    }

    fn first_descendant<P>(&self, pred: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool,
    {
        find_below(*self, &pred)
    }

    fn next_sibling_matching<P>(&self, pred: P) -> Option<Self>
    where
        P: Fn(&Self) -> bool,
    {
        self.following_siblings().find(|n| pred(n))
    }
}

fn collect_below<N, P>(node: N, pred: &P, found: &mut Vec<N>)
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    for child in node.element_children() {
        if pred(&child) {
            found.push(child);
        }
        collect_below(child, pred, found);
    }
}

fn find_below<N, P>(node: N, pred: &P) -> Option<N>
where
    N: TreeNode,
    P: Fn(&N) -> bool,
{
    for child in node.element_children() {
        if pred(&child) {
            return Some(child);
        }
        if let Some(hit) = find_below(child, pred) {
            return Some(hit);
        }
    }
    None
}

impl<'a> TreeNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn element_children(&self) -> impl Iterator<Item = Self> {
        self.children().filter_map(ElementRef::wrap)
    }

    fn following_siblings(&self) -> impl Iterator<Item = Self> {
        self.next_siblings().filter_map(ElementRef::wrap)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const DOC: &str = r#"<html><body>
        <div id="a" class="box">
            <p class="x">one</p>
            <div class="box inner"><p class="x">two <b>bold</b></p></div>
            <p class="y">three</p>
        </div>
        <p class="x">four</p>
    </body></html>"#;

    fn ids<'a>(nodes: &[ElementRef<'a>]) -> Vec<String> {
        nodes.iter().map(|n| n.text_content().trim().to_string()).collect()
    }

    #[test]
    fn descendants_in_document_order() {
        let doc = Html::parse_document(DOC);
        let root = doc.root_element();
        let xs = root.descendants_matching(|n| n.has_class("x"));
        assert_eq!(ids(&xs), vec!["one", "two bold", "four"]);
    }

    #[test]
    fn nested_boxes_both_found() {
        let doc = Html::parse_document(DOC);
        let boxes = doc.root_element().descendants_matching(|n| n.has_class("box"));
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].attribute("id"), Some("a"));
        assert!(boxes[1].has_class("inner"));
    }

    #[test]
    fn children_only_direct() {
        let doc = Html::parse_document(DOC);
        let outer = doc
            .root_element()
            .first_descendant(|n| n.attribute("id") == Some("a"))
            .unwrap();
        let direct = outer.children_matching(|n| n.tag_name() == "p");
        assert_eq!(ids(&direct), vec!["one", "three"]);
    }

    #[test]
    fn sibling_skips_non_matching() {
        let doc = Html::parse_document(DOC);
        let first = doc
            .root_element()
            .first_descendant(|n| n.has_class("x"))
            .unwrap();
        let y = first.next_sibling_matching(|n| n.has_class("y")).unwrap();
        assert_eq!(y.text_content(), "three");
        assert!(y.next_sibling_matching(|n| n.has_class("x")).is_none());
    }

    #[test]
    fn first_descendant_excludes_self() {
        let doc = Html::parse_document(DOC);
        let outer = doc
            .root_element()
            .first_descendant(|n| n.has_class("box"))
            .unwrap();
        let inner = outer.first_descendant(|n| n.has_class("box")).unwrap();
        assert!(inner.has_class("inner"));
    }

    #[test]
    fn walk_reaches_deeply_nested_nodes() {
        let html = format!(
            "<html><body>{}<span class=\"leaf\">deep</span>{}<span class=\"leaf\">after</span></body></html>",
            "<div>".repeat(200),
            "</div>".repeat(200)
        );
        let doc = Html::parse_document(&html);
        let root = doc.root_element();
        let leaves = root.descendants_matching(|n| n.has_class("leaf"));
        assert_eq!(ids(&leaves), vec!["deep", "after"]);
        let first = root.first_descendant(|n| n.has_class("leaf")).unwrap();
        assert_eq!(first.text_content(), "deep");
    }
}
