// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The fragment parsing driver:
//! <https://html.spec.whatwg.org/multipage/#parsing-html-fragments>.
//!
//! Builds on [`crate::driver`], adding the final step the algorithm
//! calls for but that a generic `TreeSink` can't perform on its own:
//! discarding the synthetic `html` root and reparenting its children
//! onto the caller's document node.

use std::borrow::Cow;

use tendril::stream::TendrilSink;
use tendril::StrTendril;

use crate::driver::{self, ParseOpts};
use crate::tokenizer::TokenizerResult;
use crate::tree_builder::TreeSink;
use crate::{Attribute, QualName};

/// Parse an HTML fragment with a fresh context element created from
/// `context_name`/`context_attrs`.
///
/// The returned value implements `tendril::TendrilSink`; feed it input
/// and call `.finish()` (or `.one(..)`) to get the sink's `Output`,
/// with the context element's children already unwrapped from the
/// synthetic `html` root the algorithm requires internally.
pub fn parse_fragment<Sink>(
    sink: Sink,
    opts: ParseOpts,
    context_name: QualName,
    context_attrs: Vec<Attribute>,
) -> FragmentParser<Sink>
where
    Sink: TreeSink,
{
    let context_element = crate::interface::create_element(&sink, context_name, context_attrs);
    parse_fragment_for_element(sink, opts, context_element, None)
}

/// Like [`parse_fragment`], but with an existing context element, and
/// optionally a form-associated element to seed the tree builder's
/// `form` pointer.
pub fn parse_fragment_for_element<Sink>(
    sink: Sink,
    opts: ParseOpts,
    context_element: Sink::Handle,
    form_element: Option<Sink::Handle>,
) -> FragmentParser<Sink>
where
    Sink: TreeSink,
{
    FragmentParser {
        inner: driver::parse_fragment_for_element(sink, opts, context_element, form_element),
    }
}

/// An HTML fragment parser, ready to receive Unicode input through the
/// `tendril::TendrilSink` trait's methods.
pub struct FragmentParser<Sink>
where
    Sink: TreeSink,
{
    inner: driver::Parser<Sink>,
}

impl<Sink: TreeSink> TendrilSink<tendril::fmt::UTF8> for FragmentParser<Sink> {
    fn process(&mut self, t: StrTendril) {
        self.inner.input_buffer.push_back(t);
        while let TokenizerResult::Script(_) = self.inner.tokenizer.feed(&self.inner.input_buffer) {}
    }

    fn error(&mut self, desc: Cow<'static, str>) {
        self.inner.tokenizer.sink.sink.parse_error(desc)
    }

    type Output = Sink::Output;

    fn finish(self) -> Self::Output {
        while let TokenizerResult::Script(_) =
            self.inner.tokenizer.feed(&self.inner.input_buffer)
        {}
        assert!(self.inner.input_buffer.is_empty());
        self.inner.tokenizer.end();

        // Move the `Sink` out of the `Tokenizer`/`TreeBuilder` nesting
        // so `TreeSink::finish` can consume it by value.
        let tree_builder = self.inner.tokenizer.sink;
        tree_builder.unwrap_fragment();
        tree_builder.sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::RcDom;
    use crate::{local_name, ns};

    #[test]
    fn unwraps_synthetic_html_root() {
        let sink = RcDom::default();
        let context = QualName::new(None, ns!(html), local_name!("body"));
        let dom = parse_fragment(sink, ParseOpts::default(), context, vec![])
            .one(StrTendril::from_slice("<p>hi</p>"));

        // The document node's children are the fragment's own
        // top-level nodes, not a leftover `html` wrapper.
        let children = dom.document.children.borrow();
        assert_eq!(children.len(), 1);
        match &children[0].data {
            crate::dom::NodeData::Element { name, .. } => {
                assert_eq!(name.local, local_name!("p"))
            },
            _ => panic!("expected a <p> element"),
        }
    }
}
