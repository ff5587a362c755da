use std::cell::RefCell;
use std::mem::replace;

use html5engine::tendril::StrTendril;
use html5engine::tokenizer::{
    BufferQueue, CharacterTokens, CommentToken, Doctype, DoctypeToken, EndTag, NullCharacterToken,
    StartTag, Tag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5engine::{ns, Attribute, QualName};

/// Collects every token the tokenizer emits, merging adjacent character
/// tokens the way the tree builder's own callers expect.
#[derive(Default)]
struct TokenLogger {
    tokens: RefCell<Vec<Token>>,
    current_str: RefCell<StrTendril>,
}

impl TokenLogger {
    fn finish_str(&self) {
        let mut current = self.current_str.borrow_mut();
        if !current.is_empty() {
            let s = replace(&mut *current, StrTendril::new());
            self.tokens.borrow_mut().push(CharacterTokens(s));
        }
    }

    fn into_tokens(self) -> Vec<Token> {
        self.finish_str();
        self.tokens.into_inner()
    }
}

impl TokenSink for TokenLogger {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            CharacterTokens(b) => self.current_str.borrow_mut().push_slice(&b),
            NullCharacterToken => self.current_str.borrow_mut().push_char('\0'),
            other => {
                self.finish_str();
                self.tokens.borrow_mut().push(other);
            },
        }
        TokenSinkResult::Continue
    }
}

fn tokenize(input: &str) -> Vec<Token> {
    let sink = TokenLogger::default();
    let tok = Tokenizer::new(sink, TokenizerOpts::default());
    let buffer = BufferQueue::new();
    buffer.push_back(StrTendril::from_slice(input));
    let _ = tok.feed(&buffer);
    tok.end();
    tok.sink.into_tokens()
}

#[test]
fn tokenizes_plain_text() {
    let tokens = tokenize("hello, world");
    assert_eq!(
        tokens,
        vec![CharacterTokens(StrTendril::from_slice("hello, world"))]
    );
}

#[test]
fn tokenizes_a_start_and_end_tag() {
    let tokens = tokenize("<p>hi</p>");
    assert_eq!(
        tokens,
        vec![
            TagToken(Tag {
                kind: StartTag,
                name: "p".into(),
                self_closing: false,
                attrs: vec![],
            }),
            CharacterTokens(StrTendril::from_slice("hi")),
            TagToken(Tag {
                kind: EndTag,
                name: "p".into(),
                self_closing: false,
                attrs: vec![],
            }),
        ]
    );
}

#[test]
fn tokenizes_attributes() {
    let tokens = tokenize("<a href='x'>");
    assert_eq!(
        tokens,
        vec![TagToken(Tag {
            kind: StartTag,
            name: "a".into(),
            self_closing: false,
            attrs: vec![Attribute {
                name: QualName::new(None, ns!(), "href".into()),
                value: StrTendril::from_slice("x"),
            }],
        })]
    );
}

#[test]
fn tokenizes_a_comment() {
    let tokens = tokenize("<!-- hi -->");
    assert_eq!(
        tokens,
        vec![CommentToken(StrTendril::from_slice(" hi "))]
    );
}

#[test]
fn tokenizes_a_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(
        tokens,
        vec![DoctypeToken(Doctype {
            name: Some(StrTendril::from_slice("html")),
            public_id: None,
            system_id: None,
            force_quirks: false,
        })]
    );
}

#[test]
fn decodes_named_character_references() {
    // A regression check for the named-entity prefix table build.rs
    // generates: without every proper prefix of "amp;" present, the
    // longest-match scan in `do_named` can't even get past the first
    // character.
    let tokens = tokenize("a &amp; b");
    assert_eq!(
        tokens,
        vec![CharacterTokens(StrTendril::from_slice("a & b"))]
    );
}

#[test]
fn decodes_numeric_character_references() {
    let tokens = tokenize("&#65;&#x42;");
    assert_eq!(tokens, vec![CharacterTokens(StrTendril::from_slice("AB"))]);
}
