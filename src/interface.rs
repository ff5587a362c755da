// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Types shared between the tokenizer and the tree builder: qualified
//! names, attributes, and the `TreeSink` contract a consumer implements
//! to receive tree mutations.

use std::borrow::Cow;
use std::fmt;

use crate::tendril::StrTendril;
use crate::{LocalName, Namespace, Prefix};

/// <https://www.w3.org/TR/REC-xml-names/#dt-expname>
#[derive(Copy, Clone, Eq, Hash)]
pub struct ExpandedName<'a> {
    pub ns: &'a Namespace,
    pub local: &'a LocalName,
}

impl<'a, 'b> PartialEq<ExpandedName<'a>> for ExpandedName<'b> {
    fn eq(&self, other: &ExpandedName<'a>) -> bool {
        self.ns == other.ns && self.local == other.local
    }
}

impl<'a> fmt::Debug for ExpandedName<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.ns.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}:{}", self.ns, self.local)
        }
    }
}

/// Build an [`ExpandedName`] for use in match patterns, e.g.
/// `expanded_name!(html "template")` or `expanded_name!("", "type")`.
#[macro_export]
macro_rules! expanded_name {
    ("", $local:tt) => {
        $crate::interface::ExpandedName {
            ns: &$crate::ns!(),
            local: &$crate::local_name!($local),
        }
    };
    ($ns:ident $local:tt) => {
        $crate::interface::ExpandedName {
            ns: &$crate::ns!($ns),
            local: &$crate::local_name!($local),
        }
    };
}

/// Build a [`QualName`] in any of the forms used across this crate:
/// `qualname!(html, "script")`, `qualname!("", "type")`, or
/// `qualname!("xlink" xlink "href")`.
#[macro_export]
macro_rules! qualname {
    ($ns:ident, $local:expr) => {
        $crate::QualName::new(None, $crate::ns!($ns), $crate::local_name!($local))
    };
    ("", $local:expr) => {
        $crate::QualName::new(None, $crate::ns!(), $crate::local_name!($local))
    };
    ($prefix:tt $ns:tt $local:tt) => {
        $crate::QualName::new(
            Some($crate::namespace_prefix!($prefix)),
            $crate::ns!($ns),
            $crate::local_name!($local),
        )
    };
}

/// A name with a namespace, used for both tags and attributes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct QualName {
    pub prefix: Option<Prefix>,
    pub ns: Namespace,
    pub local: LocalName,
}

impl QualName {
    #[inline]
    pub fn new(prefix: Option<Prefix>, ns: Namespace, local: LocalName) -> QualName {
        QualName { prefix, ns, local }
    }

    #[inline]
    pub fn expanded(&self) -> ExpandedName {
        ExpandedName {
            ns: &self.ns,
            local: &self.local,
        }
    }
}

/// A tag attribute, e.g. `class="foo"`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug, Hash)]
pub struct Attribute {
    pub name: QualName,
    pub value: StrTendril,
}

/// The three quirks modes defined by the HTML standard; derived from
/// the document's `DOCTYPE` and affecting a small number of
/// tree-construction decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuirksMode {
    Quirks,
    LimitedQuirks,
    NoQuirks,
}

pub use self::QuirksMode::{LimitedQuirks, NoQuirks, Quirks};

/// Something which can be inserted into the DOM: either a new node, or
/// a run of text to be appended to (or merged with) the previous
/// sibling if it is already a text node.
pub enum NodeOrText<Handle> {
    AppendNode(Handle),
    AppendText(StrTendril),
}

pub use self::NodeOrText::{AppendNode, AppendText};

/// Whether the tree builder should push the new element onto the
/// stack of open elements.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct ElementFlags {
    pub template: bool,
    pub mathml_annotation_xml_integration_point: bool,
}

impl Default for ElementFlags {
    fn default() -> ElementFlags {
        ElementFlags {
            template: false,
            mathml_annotation_xml_integration_point: false,
        }
    }
}

/// A way for the tree builder to notify a garbage-collected DOM
/// implementation which handles it is keeping alive, without forcing
/// every consumer to implement full tracing support.
pub trait Tracer {
    type Handle;
    fn trace_handle(&self, node: &Self::Handle);
}

/// A reference-counted, interior-mutable node's representation of its
/// own tag name; returned by [`TreeSink::elem_name`] to avoid an
/// unconditional clone on every namespace/scope query.
pub enum ElemName<'a> {
    Borrowed(ExpandedName<'a>),
    Owned(QualName),
}

impl<'a> ElemName<'a> {
    pub fn expanded(&self) -> ExpandedName {
        match self {
            ElemName::Borrowed(name) => *name,
            ElemName::Owned(name) => name.expanded(),
        }
    }

    pub fn ns(&self) -> &Namespace {
        match self {
            ElemName::Borrowed(name) => name.ns,
            ElemName::Owned(name) => &name.ns,
        }
    }

    pub fn local_name(&self) -> &LocalName {
        match self {
            ElemName::Borrowed(name) => name.local,
            ElemName::Owned(name) => &name.local,
        }
    }
}

/// The interface a consumer implements to receive tree mutations from
/// the tree builder. Mirrors the "tree construction" operations of the
/// HTML standard; every method is a single atomic mutation.
pub trait TreeSink {
    /// The result of `finish()`, usually a completed document or
    /// fragment.
    type Output;

    /// Handle to a DOM node that this sink creates and owns.
    type Handle: Clone;

    /// Consume this sink and return the constructed output.
    fn finish(self) -> Self::Output;

    /// Signal a parse error.
    fn parse_error(&self, msg: Cow<'static, str>);

    /// Set the document's quirks mode.
    fn set_quirks_mode(&self, mode: QuirksMode);

    /// Get a handle to the `Document` node.
    fn get_document(&self) -> Self::Handle;

    /// Do two handles refer to the same underlying node?
    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool;

    /// The name of the given element, as an expanded name.
    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> ElemName<'a>;

    /// Create an element.
    ///
    /// When creating a `script` element, this sets the `already
    /// started` flag; when creating a `template` element, it also
    /// creates the implicit `#document-fragment` that holds the
    /// template's contents.
    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle;

    /// Create a comment node.
    fn create_comment(&self, text: StrTendril) -> Self::Handle;

    /// Create a Processing Instruction node.
    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Self::Handle;

    /// Append a node as the last child of the given node. If this
    /// would produce adjacent sibling text nodes, it is instead
    /// merged into the existing text node.
    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>);

    /// Append a node before the given sibling, or as the last child of
    /// the sibling's parent if it has no parent. This is used to
    /// implement foster parenting.
    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>);

    /// Foster-parent a node: if `element` (the last `<table>` on the
    /// stack of open elements) currently has a parent, insert `child`
    /// immediately before it; otherwise append `child` as the last
    /// child of `prev_element` (the open element just below the
    /// `<table>`). See
    /// <https://html.spec.whatwg.org/multipage/#foster-parent>.
    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    );

    /// Append a `DOCTYPE` element to the `Document` node.
    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    );

    /// Whether `node` has a parent.
    fn has_parent_node(&self, node: &Self::Handle) -> bool;

    /// Add each attribute to the given element, if no attribute with
    /// that name already exists. Used when an `<html>` or `<body>` tag
    /// is encountered a second time.
    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Attribute>);

    /// Detach the given node from its parent.
    fn remove_from_parent(&self, target: &Self::Handle);

    /// Remove all the children of `node` and append them to `new_parent`.
    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle);

    /// Get the template contents of a `template` element.
    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle;

    /// Mark a `script` element's "already started" flag.
    fn mark_script_already_started(&self, node: &Self::Handle);

    /// Associate a form-associated element with its owner `form`, per
    /// <https://html.spec.whatwg.org/multipage/#form-associated-element>.
    /// `nodes` is the pair of nodes the standard's "unsafe" same-home-subtree
    /// check consults (the element's insertion-point parent, and the
    /// previous sibling at the point of foster parenting, if any). A sink
    /// that doesn't model form ownership can leave this a no-op.
    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    /// Called whenever the line number changes.
    fn set_current_line(&self, _line_number: u64) {}

    /// Indicate that a `script` element is "ready to be parser
    /// executed" and return whether the caller should stop parsing
    /// until the script has run.
    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    /// Whether `node`'s name is `annotation-xml` and its `encoding`
    /// attribute is a case-insensitive match for `"text/html"` or
    /// `"application/xhtml+xml"`.
    fn is_mathml_annotation_xml_integration_point(&self, handle: &Self::Handle) -> bool;

    /// Pop a node off the stack of open elements. Used by the
    /// MathML/SVG integration-point rules, which need to act on the
    /// popped node without going through the tokenizer.
    fn pop(&self, _node: &Self::Handle) {}
}

/// Whether the caller should pause parsing to run a `script` element
/// before resuming, or keep going immediately.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum NextParserState {
    Continue,
    Suspend,
}

/// Helper calling `TreeSink::create_element` with default flags.
pub fn create_element<Sink: TreeSink>(
    sink: &Sink,
    name: QualName,
    attrs: Vec<Attribute>,
) -> Sink::Handle {
    sink.create_element(name, attrs, ElementFlags::default())
}
