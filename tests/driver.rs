use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use html5engine::dom::{NodeData, RcDom};
use html5engine::driver::{self, ParseOpts};
use html5engine::interface::{ElemName, ElementFlags, NodeOrText, QuirksMode};
use html5engine::tendril::{StrTendril, TendrilSink};
use html5engine::tree_builder::TreeSink;
use html5engine::{expanded_name, local_name, ns, Attribute, QualName};

/// A minimal `TreeSink`, in the style of a caller who wants their own
/// node representation instead of [`RcDom`]: handles are opaque ids and
/// every mutation is a no-op except element bookkeeping, enough to
/// exercise the driver without depending on `dom`.
#[derive(Default)]
struct IdSink {
    next_id: Cell<usize>,
    names: RefCell<HashMap<usize, QualName>>,
}

impl IdSink {
    fn get_id(&self) -> usize {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

impl TreeSink for IdSink {
    type Handle = usize;
    type Output = Self;

    fn finish(self) -> Self {
        self
    }

    fn get_document(&self) -> usize {
        0
    }

    fn get_template_contents(&self, target: &usize) -> usize {
        target + 1
    }

    fn same_node(&self, x: &usize, y: &usize) -> bool {
        x == y
    }

    fn elem_name<'a>(&'a self, target: &'a usize) -> ElemName<'a> {
        ElemName::Owned(self.names.borrow().get(target).expect("not an element").clone())
    }

    fn create_element(&self, name: QualName, _attrs: Vec<Attribute>, _flags: ElementFlags) -> usize {
        let id = self.get_id();
        self.names.borrow_mut().insert(id, name);
        id
    }

    fn create_comment(&self, _text: StrTendril) -> usize {
        self.get_id()
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> usize {
        self.get_id()
    }

    fn append(&self, _parent: &usize, _child: NodeOrText<usize>) {}
    fn append_before_sibling(&self, _sibling: &usize, _child: NodeOrText<usize>) {}
    fn append_based_on_parent_node(&self, _element: &usize, _prev_element: &usize, _child: NodeOrText<usize>) {}
    fn append_doctype_to_document(&self, _name: StrTendril, _public_id: StrTendril, _system_id: StrTendril) {}
    fn has_parent_node(&self, _node: &usize) -> bool {
        false
    }
    fn add_attrs_if_missing(&self, target: &usize, _attrs: Vec<Attribute>) {
        assert!(self.names.borrow().contains_key(target), "not an element");
    }
    fn remove_from_parent(&self, _target: &usize) {}
    fn reparent_children(&self, _node: &usize, _new_parent: &usize) {}
    fn mark_script_already_started(&self, _node: &usize) {}
    fn parse_error(&self, _msg: Cow<'static, str>) {}
    fn set_quirks_mode(&self, _mode: QuirksMode) {}
    fn is_mathml_annotation_xml_integration_point(&self, _handle: &usize) -> bool {
        false
    }
}

#[test]
fn driver_survives_a_script_element() {
    // Mirrors https://github.com/servo/html5ever/issues/716: a custom
    // sink whose `complete_script` default (`Continue`) must not get
    // the driver's incremental feed loop stuck on `TokenizerResult::Script`.
    let test_case = "<meta charset=\"UTF-8\" /><meta charset=\"UTF-8\" /> other stuff <script>1</script> tail";
    let mut parser = driver::parse_document(IdSink::default(), ParseOpts::default());
    parser.process(test_case.into());
    parser.finish();
}

#[test]
fn parse_document_from_bytes_sniffs_utf8_bom() {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(b"<p>hi</p>");
    let (parser, encoding) =
        driver::parse_document_from_bytes(RcDom::default(), ParseOpts::default(), &bytes, None);
    assert_eq!(encoding.name(), "UTF-8");
    let dom = parser.finish();
    assert_eq!(dom.quirks_mode.get(), QuirksMode::Quirks);
}

#[test]
fn parse_document_from_bytes_sniffs_meta_charset() {
    // windows-1252 encodes U+00E9 (é) as the single byte 0xE9; nothing
    // about the <meta> tag itself requires non-ASCII bytes, so the rest
    // of the document can stay plain ASCII.
    let bytes: Vec<u8> = b"<meta charset=\"windows-1252\"><p>caf"
        .iter()
        .copied()
        .chain([0xE9u8, b'<', b'/', b'p', b'>'])
        .collect();
    let (_parser, encoding) = driver::parse_document_from_bytes(
        RcDom::default(),
        ParseOpts::default(),
        &bytes,
        None,
    );
    assert_eq!(encoding.name(), "windows-1252");
}

#[test]
fn fragment_parsing_unwraps_the_synthetic_root() {
    let sink = RcDom::default();
    let context = QualName::new(None, ns!(html), local_name!("body"));
    let dom = html5engine::fragment::parse_fragment(sink, ParseOpts::default(), context, vec![])
        .one(StrTendril::from_slice("<span>hi</span>"));

    let children = dom.document.children.borrow();
    assert_eq!(children.len(), 1);
    match &children[0].data {
        NodeData::Element { name, .. } => assert_eq!(name.expanded(), expanded_name!(html "span")),
        _ => panic!("expected a <span> element"),
    }
}
