// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A browser-grade HTML5 tokenizer and tree-construction engine.
//!
//! This crate implements the WHATWG HTML standard's parsing algorithms:
//! encoding sniffing, tokenization, and tree construction, including
//! fragment parsing. It deliberately stops at the DOM boundary: CSS
//! selector matching, layout, and script execution are out of scope.
//!
//! The pieces:
//!
//! - [`encoding`] sniffs the byte encoding of a document and decodes it
//!   to UTF-8.
//! - [`tokenizer`] implements the tokenizer state machine.
//! - [`tree_builder`] implements the tree construction insertion modes.
//! - [`driver`] wires a decoder, tokenizer, and tree builder together
//!   into a single `Parser`, for both document and fragment parsing.
//! - [`dom`] is a reference `TreeSink` built on `Rc`/`RefCell`.
//! - [`stream`] is a tree-free iterator over coalesced tokenizer events,
//!   for callers that only need a simplified event view.

pub use tendril;

pub use crate::interface::{
    create_element, Attribute, ElemName, ElementFlags, ExpandedName, NextParserState, NodeOrText,
    QualName, QuirksMode, Tracer, TreeSink,
};
pub use crate::interface::{AppendNode, AppendText, LimitedQuirks, NoQuirks, Quirks};
pub use crate::smallcharset::SmallCharSet;

include!(concat!(env!("OUT_DIR"), "/atoms_generated.rs"));

#[macro_use]
mod macros;

pub mod buffer_queue;
pub mod data;
pub mod dom;
pub mod driver;
pub mod encoding;
pub mod fragment;
pub mod interface;
pub mod smallcharset;
pub mod stream;
pub mod tokenizer;
pub mod tree_builder;
mod util;
