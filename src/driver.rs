// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! High-level interface to the parser: wires a decoder, tokenizer, and
//! tree builder together and exposes a `tendril::TendrilSink` so the
//! input can be fed incrementally or all at once.

use crate::buffer_queue::BufferQueue;
use crate::tokenizer::{Tokenizer, TokenizerOpts, TokenizerResult};
use crate::tree_builder::{TreeBuilder, TreeBuilderOpts, TreeSink};

use std::borrow::Cow;

use tendril;
use tendril::stream::{TendrilSink, Utf8LossyDecoder};
use tendril::StrTendril;

use crate::encoding::EncodingSniffer;

/// All-encompassing options struct for the parser.
#[derive(Clone, Default)]
pub struct ParseOpts {
    /// Tokenizer options.
    pub tokenizer: TokenizerOpts,

    /// Tree builder options.
    pub tree_builder: TreeBuilderOpts,
}

/// Parse an HTML document.
///
/// The returned value implements `tendril::TendrilSink` so that
/// Unicode input may be provided incrementally, or all at once with
/// the `one` method.
///
/// If your input is bytes of unknown encoding, use
/// [`parse_document_from_bytes`] instead, which runs the full
/// encoding-sniffing algorithm.
pub fn parse_document<Sink>(sink: Sink, opts: ParseOpts) -> Parser<Sink>
where
    Sink: TreeSink,
{
    let tb = TreeBuilder::new(sink, opts.tree_builder);
    let tok = Tokenizer::new(tb, opts.tokenizer);
    Parser {
        tokenizer: tok,
        input_buffer: BufferQueue::default(),
    }
}

/// Parse an HTML document from a byte stream of unknown encoding,
/// running the full `<https://html.spec.whatwg.org/multipage/parsing.html#determining-the-character-encoding>`
/// algorithm: BOM sniffing, an optional transport-layer declaration,
/// a `<meta>` prescan of the first 1024 bytes, and a fallback to
/// windows-1252.
pub fn parse_document_from_bytes<Sink>(
    sink: Sink,
    opts: ParseOpts,
    bytes: &[u8],
    transport_layer_encoding: Option<&str>,
) -> (Parser<Sink>, &'static encoding_rs::Encoding)
where
    Sink: TreeSink,
{
    let mut sniffer = EncodingSniffer::new();
    if let Some(label) = transport_layer_encoding {
        sniffer.set_transport_layer_encoding(label);
    }
    let encoding = sniffer.sniff(bytes);
    let mut parser = parse_document(sink, opts);
    let (text, _, _) = encoding.decode(bytes);
    parser.process(StrTendril::from_slice(&text));
    (parser, encoding)
}

/// Like [`crate::fragment::parse_fragment_for_element`], but
/// lower-level: the returned `Parser` still has the synthetic `html`
/// root the fragment parsing algorithm requires internally, instead of
/// discarding it. Prefer [`crate::fragment`] unless you have a reason
/// to see that root.
///
/// `form_element`, if given, seeds the tree builder's `form` pointer so
/// it starts non-empty, matching
/// <https://html.spec.whatwg.org/multipage/parsing.html#html-fragment-parsing-algorithm>.
pub fn parse_fragment_for_element<Sink>(
    sink: Sink,
    opts: ParseOpts,
    context_element: Sink::Handle,
    form_element: Option<Sink::Handle>,
) -> Parser<Sink>
where
    Sink: TreeSink,
{
    let tb = TreeBuilder::new_for_fragment(sink, context_element, form_element, opts.tree_builder);
    let scripting_enabled = opts.tree_builder.scripting_enabled;
    let tok_opts = TokenizerOpts {
        initial_state: Some(tb.tokenizer_state_for_context_elem(scripting_enabled)),
        ..opts.tokenizer
    };
    let tok = Tokenizer::new(tb, tok_opts);
    Parser {
        tokenizer: tok,
        input_buffer: BufferQueue::default(),
    }
}

/// An HTML parser, ready to receive Unicode input through the
/// `tendril::TendrilSink` trait's methods.
pub struct Parser<Sink>
where
    Sink: TreeSink,
{
    pub tokenizer: Tokenizer<TreeBuilder<Sink::Handle, Sink>>,
    pub input_buffer: BufferQueue,
}

impl<Sink: TreeSink> TendrilSink<tendril::fmt::UTF8> for Parser<Sink> {
    fn process(&mut self, t: StrTendril) {
        self.input_buffer.push_back(t);
        // TODO: suspend properly instead of spinning through scripts.
        while let TokenizerResult::Script(_) = self.tokenizer.feed(&self.input_buffer) {}
    }

    fn error(&mut self, desc: Cow<'static, str>) {
        self.tokenizer.sink.sink.parse_error(desc)
    }

    type Output = Sink::Output;

    fn finish(self) -> Self::Output {
        // `Tokenizer`/`TreeBuilder` are driven entirely through shared
        // references (interior mutability), so consuming `self` here
        // needs no further `mut`.
        while let TokenizerResult::Script(_) = self.tokenizer.feed(&self.input_buffer) {}
        assert!(self.input_buffer.is_empty());
        self.tokenizer.end();
        self.tokenizer.sink.sink.finish()
    }
}

impl<Sink: TreeSink> Parser<Sink> {
    /// Wrap this parser into a `TendrilSink` that accepts UTF-8 bytes.
    ///
    /// Use this when your input is bytes already known to be UTF-8.
    /// Decoding is lossy, like `String::from_utf8_lossy`.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_utf8(self) -> Utf8LossyDecoder<Self> {
        Utf8LossyDecoder::new(self)
    }
}
