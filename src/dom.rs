// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A simple reference-counted DOM, provided as a ready-to-use
//! `TreeSink` for callers who don't want to wire up their own.
//!
//! This is sufficient as a static parse tree; it is not meant to back
//! a live, mutable document.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::mem;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use crate::interface::{
    create_element, AppendNode, AppendText, ElemName, ElementFlags, ExpandedName, NextParserState,
    NodeOrText, QuirksMode, Tracer, TreeSink,
};
use crate::tendril::StrTendril;
use crate::{expanded_name, local_name, ns, Attribute, LocalName, QualName};

/// The kind of an [`Element`] node that needs bookkeeping beyond its
/// tag name and attributes.
pub enum ElementEnum {
    Normal,
    /// A `script` element and its "already started" flag.
    /// <https://html.spec.whatwg.org/multipage/#already-started>
    Script(Cell<bool>),
    /// A `template` element and the `#document-fragment` holding its
    /// contents.
    /// <https://html.spec.whatwg.org/multipage/#template-contents>
    Template(Handle),
    /// An `annotation-xml` element in the MathML namespace, with
    /// whether its start tag had an `encoding` attribute that was an
    /// ASCII case-insensitive match for `"text/html"` or
    /// `"application/xhtml+xml"`.
    /// <https://html.spec.whatwg.org/multipage/embedded-content.html#math:annotation-xml>
    AnnotationXml(bool),
}

/// The different kinds of nodes in the DOM.
pub enum NodeData {
    /// The `Document` itself, or a `#document-fragment`.
    Document,

    /// A `DOCTYPE` with name, public id, and system id.
    Doctype {
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    },

    /// A text node.
    Text { contents: RefCell<StrTendril> },

    /// A comment.
    Comment { contents: StrTendril },

    /// An element with attributes.
    Element {
        name: QualName,
        kind: ElementEnum,
        attrs: RefCell<Vec<Attribute>>,
    },

    /// A processing instruction.
    ProcessingInstruction {
        target: StrTendril,
        contents: StrTendril,
    },
}

/// A DOM node.
pub struct Node {
    pub data: NodeData,
    pub parent: Cell<Option<WeakHandle>>,
    pub children: RefCell<Vec<Handle>>,
}

impl Node {
    fn new(data: NodeData) -> Rc<Node> {
        Rc::new(Node {
            data,
            parent: Cell::new(None),
            children: RefCell::new(Vec::new()),
        })
    }
}

/// Reference to a DOM node.
#[derive(Clone)]
pub struct Handle(Rc<Node>);

impl Deref for Handle {
    type Target = Node;
    fn deref(&self) -> &Node {
        &self.0
    }
}

impl Handle {
    fn ptr_eq(&self, other: &Handle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Weak reference to a DOM node, used for parent back-links.
pub type WeakHandle = Weak<Node>;

fn new_handle(data: NodeData) -> Handle {
    Handle(Node::new(data))
}

fn append(new_parent: &Handle, child: Handle) {
    let previous_parent = child.parent.replace(Some(Rc::downgrade(&new_parent.0)));
    assert!(previous_parent.is_none());
    new_parent.children.borrow_mut().push(child);
}

fn get_parent_and_index(target: &Handle) -> Option<(Handle, usize)> {
    let weak = target.parent.take()?;
    let parent = Handle(weak.upgrade().expect("dangling weak pointer"));
    target.parent.set(Some(weak));
    let i = parent
        .children
        .borrow()
        .iter()
        .position(|child| child.ptr_eq(target))
        .expect("have parent but couldn't find in parent's children!");
    Some((parent, i))
}

fn append_to_existing_text(prev: &Handle, text: &str) -> bool {
    match prev.data {
        NodeData::Text { ref contents } => {
            contents.borrow_mut().push_slice(text);
            true
        },
        _ => false,
    }
}

fn remove_from_parent(target: &Handle) {
    if let Some((parent, i)) = get_parent_and_index(target) {
        parent.children.borrow_mut().remove(i);
        target.parent.set(None);
    }
}

/// The DOM itself: the result of parsing.
pub struct RcDom {
    /// The `Document` node.
    pub document: Handle,

    /// Parse errors encountered, in document order.
    pub errors: RefCell<Vec<Cow<'static, str>>>,

    /// The document's quirks mode.
    pub quirks_mode: Cell<QuirksMode>,
}

impl Default for RcDom {
    fn default() -> RcDom {
        RcDom {
            document: new_handle(NodeData::Document),
            errors: RefCell::new(Vec::new()),
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
        }
    }
}

impl RcDom {
    /// Walk every `Tracer`-visible handle reachable from the document,
    /// for consumers embedding this DOM in a garbage-collected host.
    pub fn trace_handles(&self, tracer: &dyn Tracer<Handle = Handle>) {
        fn walk(node: &Handle, tracer: &dyn Tracer<Handle = Handle>) {
            tracer.trace_handle(node);
            if let NodeData::Element {
                kind: ElementEnum::Template(ref contents),
                ..
            } = node.data
            {
                tracer.trace_handle(contents);
                walk(contents, tracer);
            }
            for child in node.children.borrow().iter() {
                walk(child, tracer);
            }
        }
        walk(&self.document, tracer);
    }
}

impl TreeSink for RcDom {
    type Output = Self;
    type Handle = Handle;

    fn finish(self) -> Self {
        populate_selectedcontent(&self.document);
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.errors.borrow_mut().push(msg);
    }

    fn get_document(&self) -> Handle {
        self.document.clone()
    }

    fn get_template_contents(&self, target: &Handle) -> Handle {
        match target.data {
            NodeData::Element {
                kind: ElementEnum::Template(ref contents),
                ..
            } => contents.clone(),
            _ => panic!("not a template element!"),
        }
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        self.quirks_mode.set(mode);
    }

    fn same_node(&self, x: &Handle, y: &Handle) -> bool {
        x.ptr_eq(y)
    }

    fn elem_name<'a>(&'a self, target: &'a Handle) -> ElemName<'a> {
        match target.data {
            NodeData::Element { ref name, .. } => ElemName::Borrowed(name.expanded()),
            _ => panic!("not an element!"),
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Handle {
        let kind = match name.expanded() {
            expanded_name!(html "script") => ElementEnum::Script(Cell::new(false)),
            expanded_name!(html "template") => ElementEnum::Template(new_handle(NodeData::Document)),
            expanded_name!(mathml "annotation-xml") => ElementEnum::AnnotationXml(
                attrs
                    .iter()
                    .find(|attr| attr.name.expanded() == expanded_name!("", "encoding"))
                    .is_some_and(|attr| {
                        attr.value.eq_ignore_ascii_case("text/html")
                            || attr.value.eq_ignore_ascii_case("application/xhtml+xml")
                    }),
            ),
            _ => ElementEnum::Normal,
        };
        new_handle(NodeData::Element {
            name,
            kind,
            attrs: RefCell::new(attrs),
        })
    }

    fn create_comment(&self, text: StrTendril) -> Handle {
        new_handle(NodeData::Comment { contents: text })
    }

    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Handle {
        new_handle(NodeData::ProcessingInstruction {
            target,
            contents: data,
        })
    }

    fn has_parent_node(&self, node: &Handle) -> bool {
        let parent = node.parent.take();
        let has_parent = parent.is_some();
        node.parent.set(parent);
        has_parent
    }

    fn append(&self, parent: &Handle, child: NodeOrText<Handle>) {
        if let AppendText(ref text) = child {
            if let Some(h) = parent.children.borrow().last() {
                if append_to_existing_text(h, text) {
                    return;
                }
            }
        }

        append(
            parent,
            match child {
                AppendText(text) => new_handle(NodeData::Text {
                    contents: RefCell::new(text),
                }),
                AppendNode(node) => node,
            },
        );
    }

    fn append_before_sibling(&self, sibling: &Handle, child: NodeOrText<Handle>) {
        let (parent, i) =
            get_parent_and_index(sibling).expect("append_before_sibling called on node without parent");

        let child = match (child, i) {
            (AppendText(text), 0) => new_handle(NodeData::Text {
                contents: RefCell::new(text),
            }),
            (AppendText(text), i) => {
                let children = parent.children.borrow();
                let prev = &children[i - 1];
                if append_to_existing_text(prev, &text) {
                    return;
                }
                new_handle(NodeData::Text {
                    contents: RefCell::new(text),
                })
            },
            (AppendNode(node), _) => node,
        };

        remove_from_parent(&child);
        child.parent.set(Some(Rc::downgrade(&parent.0)));
        parent.children.borrow_mut().insert(i, child);
    }

    fn append_based_on_parent_node(&self, element: &Handle, prev_element: &Handle, child: NodeOrText<Handle>) {
        if self.has_parent_node(element) {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        append(
            &self.document,
            new_handle(NodeData::Doctype {
                name,
                public_id,
                system_id,
            }),
        );
    }

    fn add_attrs_if_missing(&self, target: &Handle, attrs: Vec<Attribute>) {
        let mut existing = match target.data {
            NodeData::Element { ref attrs, .. } => attrs.borrow_mut(),
            _ => panic!("not an element"),
        };

        let existing_names = existing
            .iter()
            .map(|e| e.name.clone())
            .collect::<HashSet<_>>();
        existing.extend(
            attrs
                .into_iter()
                .filter(|attr| !existing_names.contains(&attr.name)),
        );
    }

    fn remove_from_parent(&self, target: &Handle) {
        remove_from_parent(target);
    }

    fn reparent_children(&self, node: &Handle, new_parent: &Handle) {
        let mut children = node.children.borrow_mut();
        let mut new_children = new_parent.children.borrow_mut();
        for child in children.iter() {
            let previous_parent = child.parent.replace(Some(Rc::downgrade(&new_parent.0)));
            assert!(node.ptr_eq(&Handle(
                previous_parent.unwrap().upgrade().expect("dangling weak")
            )));
        }
        new_children.extend(mem::take(&mut *children));
    }

    fn mark_script_already_started(&self, target: &Handle) {
        match target.data {
            NodeData::Element {
                kind: ElementEnum::Script(ref started),
                ..
            } => started.set(true),
            _ => panic!("not a script element!"),
        }
    }

    fn complete_script(&self, _node: &Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn is_mathml_annotation_xml_integration_point(&self, handle: &Handle) -> bool {
        match handle.data {
            NodeData::Element {
                kind: ElementEnum::AnnotationXml(is_integration_point),
                ..
            } => is_integration_point,
            _ => unreachable!("is_mathml_annotation_xml_integration_point called on non-element"),
        }
    }
}

fn find_child(node: &Handle, name: ExpandedName<'_>) -> Option<Handle> {
    node.children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, NodeData::Element { name: n, .. } if n.expanded() == name))
        .cloned()
}

fn deep_clone(node: &Handle) -> Handle {
    let data = match node.data {
        NodeData::Text { ref contents } => NodeData::Text {
            contents: RefCell::new(contents.borrow().clone()),
        },
        NodeData::Comment { ref contents } => NodeData::Comment {
            contents: contents.clone(),
        },
        NodeData::Element {
            ref name,
            ref attrs,
            ..
        } => NodeData::Element {
            name: name.clone(),
            kind: ElementEnum::Normal,
            attrs: RefCell::new(attrs.borrow().clone()),
        },
        NodeData::ProcessingInstruction {
            ref target,
            ref contents,
        } => NodeData::ProcessingInstruction {
            target: target.clone(),
            contents: contents.clone(),
        },
        NodeData::Doctype { .. } | NodeData::Document => unreachable!("not cloneable"),
    };
    let clone = new_handle(data);
    for child in node.children.borrow().iter() {
        append(&clone, deep_clone(child));
    }
    clone
}

/// Walk the finished tree and, for every `<select>`, populate each of
/// its `<selectedcontent>` descendants with a deep clone of the
/// selected (or, absent a `selected` attribute, first) `<option>`.
///
/// This runs once, at the very end of parsing; a `<select>` nested
/// inside another `<select>`'s `<selectedcontent>` is not possible
/// (the clone contains no `<select>`), so there is nothing to
/// deduplicate across nesting.
fn populate_selectedcontent(document: &Handle) {
    fn walk(node: &Handle) {
        if matches!(&node.data, NodeData::Element { name, .. } if name.expanded() == expanded_name!(html "select"))
        {
            fill_select(node);
        }
        for child in node.children.borrow().iter() {
            walk(child);
        }
    }
    walk(document);
}

fn fill_select(select: &Handle) {
    let option = select
        .children
        .borrow()
        .iter()
        .find(|child| {
            matches!(&child.data, NodeData::Element { name, attrs, .. }
                if name.expanded() == expanded_name!(html "option")
                    && attrs.borrow().iter().any(|a| a.name.local == local_name!("selected")))
        })
        .cloned()
        .or_else(|| find_child(select, expanded_name!(html "option")));

    let Some(option) = option else { return };

    for child in select.children.borrow().iter() {
        if matches!(&child.data, NodeData::Element { name, .. } if name.expanded() == expanded_name!(html "selectedcontent"))
        {
            let mut existing = child.children.borrow_mut();
            for stale in existing.drain(..) {
                stale.parent.set(None);
            }
            drop(existing);
            for grandchild in option.children.borrow().iter() {
                append(child, deep_clone(grandchild));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{create_element, ElementFlags};

    fn elem(sink: &RcDom, local: LocalName) -> Handle {
        create_element(
            sink,
            QualName::new(None, ns!(html), local),
            vec![],
        )
    }

    #[test]
    fn append_text_merges_adjacent_nodes() {
        let dom = RcDom::default();
        let body = elem(&dom, local_name!("body"));
        dom.append(&body, AppendText(StrTendril::from_slice("a")));
        dom.append(&body, AppendText(StrTendril::from_slice("b")));
        assert_eq!(body.children.borrow().len(), 1);
        match &body.children.borrow()[0].data {
            NodeData::Text { contents } => assert_eq!(&**contents.borrow(), "ab"),
            _ => panic!("expected text node"),
        }
    }

    #[test]
    fn remove_from_parent_detaches_child() {
        let dom = RcDom::default();
        let parent = elem(&dom, local_name!("div"));
        let child = elem(&dom, local_name!("span"));
        dom.append(&parent, AppendNode(child.clone()));
        assert!(dom.has_parent_node(&child));
        dom.remove_from_parent(&child);
        assert!(!dom.has_parent_node(&child));
        assert!(parent.children.borrow().is_empty());
    }

    #[test]
    fn selectedcontent_gets_selected_option() {
        let dom = RcDom::default();
        let select = elem(&dom, local_name!("select"));

        let opt1 = elem(&dom, local_name!("option"));
        dom.append(&opt1, AppendText(StrTendril::from_slice("one")));
        dom.append(&select, AppendNode(opt1));

        let opt2 = create_element(
            &dom,
            QualName::new(None, ns!(html), local_name!("option")),
            vec![Attribute {
                name: QualName::new(None, ns!(), local_name!("selected")),
                value: StrTendril::from_slice(""),
            }],
        );
        dom.append(&opt2, AppendText(StrTendril::from_slice("two")));
        dom.append(&select, AppendNode(opt2));

        let selectedcontent = elem(&dom, local_name!("selectedcontent"));
        dom.append(&select, AppendNode(selectedcontent.clone()));

        fill_select(&select);

        assert_eq!(selectedcontent.children.borrow().len(), 1);
        match &selectedcontent.children.borrow()[0].data {
            NodeData::Text { contents } => assert_eq!(&**contents.borrow(), "two"),
            _ => panic!("expected text node"),
        }
    }
}
