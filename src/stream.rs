// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A tree-free view of the tokenizer: an [`Iterator`] of coalesced
//! [`StreamEvent`]s, for callers who want start/end/text/comment/doctype
//! events without paying for tree construction.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::mem;

use crate::buffer_queue::BufferQueue;
use crate::interface::Attribute;
use crate::tendril::StrTendril;
use crate::tokenizer::{
    Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use crate::LocalName;

/// One tagged event yielded by [`TokenStream`].
///
/// `Text` events are already coalesced: adjacent character tokens (and
/// the tokenizer's null-character replacement) are merged into a single
/// event, flushed whenever a non-text token arrives.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Start {
        name: LocalName,
        attrs: Vec<Attribute>,
        self_closing: bool,
    },
    End {
        name: LocalName,
    },
    Text(StrTendril),
    Comment(StrTendril),
    Doctype {
        name: Option<StrTendril>,
        public_id: Option<StrTendril>,
        system_id: Option<StrTendril>,
    },
}

/// A `TokenSink` that never builds a tree: it just turns tokens into
/// [`StreamEvent`]s and queues them for the adapter to hand out.
struct StreamSink {
    events: RefCell<VecDeque<StreamEvent>>,
    pending_text: RefCell<StrTendril>,
}

impl StreamSink {
    fn new() -> StreamSink {
        StreamSink {
            events: RefCell::new(VecDeque::new()),
            pending_text: RefCell::new(StrTendril::new()),
        }
    }

    fn flush_text(&self) {
        let mut pending = self.pending_text.borrow_mut();
        if !pending.is_empty() {
            let text = mem::replace(&mut *pending, StrTendril::new());
            self.events.borrow_mut().push_back(StreamEvent::Text(text));
        }
    }

    fn pop_event(&self) -> Option<StreamEvent> {
        self.events.borrow_mut().pop_front()
    }
}

impl TokenSink for StreamSink {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            Token::CharacterTokens(text) => {
                self.pending_text.borrow_mut().push_tendril(&text);
            },
            Token::NullCharacterToken => {
                self.pending_text.borrow_mut().push_char('\0');
            },
            Token::TagToken(Tag {
                kind,
                name,
                self_closing,
                attrs,
            }) => {
                self.flush_text();
                let event = match kind {
                    TagKind::StartTag => StreamEvent::Start {
                        name,
                        attrs,
                        self_closing,
                    },
                    TagKind::EndTag => StreamEvent::End { name },
                };
                self.events.borrow_mut().push_back(event);
            },
            Token::CommentToken(text) => {
                self.flush_text();
                self.events.borrow_mut().push_back(StreamEvent::Comment(text));
            },
            Token::DoctypeToken(dt) => {
                self.flush_text();
                self.events.borrow_mut().push_back(StreamEvent::Doctype {
                    name: dt.name,
                    public_id: dt.public_id,
                    system_id: dt.system_id,
                });
            },
            Token::EOFToken => self.flush_text(),
            Token::ParseError(_) => {},
        }
        TokenSinkResult::Continue
    }

    fn end(&self) {
        self.flush_text();
    }
}

/// Drives the tokenizer over a complete input and hands out the
/// resulting events one at a time, without constructing a tree.
///
/// The underlying tokenizer has no public per-token suspension point (its
/// `feed`/`end` pair runs to completion over whatever is in the input
/// buffer), so the whole input is tokenized up front, into the queue
/// `next()` drains; from the caller's side this is indistinguishable from
/// a generator that yields one event per `next()` call, since nothing is
/// observable until the corresponding event is pulled.
pub struct TokenStream {
    tokenizer: Tokenizer<StreamSink>,
    drained: bool,
}

impl TokenStream {
    /// Tokenize `input` under `opts`, ready to be drained through
    /// `Iterator`.
    pub fn new(input: StrTendril, opts: TokenizerOpts) -> TokenStream {
        let buffer = BufferQueue::new();
        buffer.push_back(input);
        let tokenizer = Tokenizer::new(StreamSink::new(), opts);
        tokenizer.feed(&buffer);
        assert!(buffer.is_empty(), "stream adapter does not suspend on scripts");
        tokenizer.end();
        TokenStream {
            tokenizer,
            drained: false,
        }
    }
}

impl Iterator for TokenStream {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<StreamEvent> {
        if self.drained {
            return None;
        }
        let event = self.tokenizer.sink.pop_event();
        if event.is_none() {
            self.drained = true;
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_name;

    fn events(input: &str) -> Vec<StreamEvent> {
        TokenStream::new(StrTendril::from_slice(input), TokenizerOpts::default()).collect()
    }

    #[test]
    fn coalesces_adjacent_text() {
        let evs = events("foo<b>bar</b>baz");
        assert_eq!(
            evs,
            vec![
                StreamEvent::Text(StrTendril::from_slice("foo")),
                StreamEvent::Start {
                    name: local_name!("b"),
                    attrs: vec![],
                    self_closing: false,
                },
                StreamEvent::Text(StrTendril::from_slice("bar")),
                StreamEvent::End {
                    name: local_name!("b"),
                },
                StreamEvent::Text(StrTendril::from_slice("baz")),
            ]
        );
    }

    #[test]
    fn emits_comment_and_doctype_events() {
        let evs = events("<!DOCTYPE html><!--hi-->");
        assert_eq!(
            evs,
            vec![
                StreamEvent::Doctype {
                    name: Some(StrTendril::from_slice("html")),
                    public_id: None,
                    system_id: None,
                },
                StreamEvent::Comment(StrTendril::from_slice("hi")),
            ]
        );
    }

    #[test]
    fn does_not_construct_a_tree() {
        // Misnested tags pass through untouched: no adoption agency, no
        // implied end tags, nothing but the raw tag stream.
        let evs = events("<b><i>x</b></i>");
        assert_eq!(
            evs,
            vec![
                StreamEvent::Start {
                    name: local_name!("b"),
                    attrs: vec![],
                    self_closing: false,
                },
                StreamEvent::Start {
                    name: local_name!("i"),
                    attrs: vec![],
                    self_closing: false,
                },
                StreamEvent::Text(StrTendril::from_slice("x")),
                StreamEvent::End { name: local_name!("b") },
                StreamEvent::End { name: local_name!("i") },
            ]
        );
    }
}
