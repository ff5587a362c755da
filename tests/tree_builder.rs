use html5engine::dom::{ElementEnum, Handle, NodeData, RcDom};
use html5engine::driver::{self, ParseOpts};
use html5engine::tendril::{StrTendril, TendrilSink};
use html5engine::{expanded_name, LimitedQuirks, NoQuirks, Quirks};

fn parse(input: &str) -> RcDom {
    driver::parse_document(RcDom::default(), ParseOpts::default())
        .one(StrTendril::from_slice(input))
}

fn find<'a>(node: &'a Handle, local: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if name.local == *local {
            return Some(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find(child, local) {
            return Some(found);
        }
    }
    None
}

fn text_of(node: &Handle) -> String {
    let mut out = String::new();
    for child in node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            out.push_str(&contents.borrow());
        }
    }
    out
}

#[test]
fn builds_implied_html_head_body() {
    let dom = parse("<title>hi</title>");
    let html = find(&dom.document, "html").expect("html element");
    assert!(find(&html, "head").is_some());
    let body = find(&html, "body").expect("body element");
    // <title> belongs in <head>, not <body>, even with no explicit tags.
    assert!(find(&body, "title").is_none());
}

#[test]
fn reparents_misnested_formatting_elements() {
    // The adoption agency algorithm must close <b> when </a> is seen
    // with <a> still open, winding up with <b> nested inside <a> twice.
    let dom = parse("<a><b>1<p>2</a>3</p>");
    let html = find(&dom.document, "html").unwrap();
    let body = find(&html, "body").unwrap();
    assert!(find(&body, "a").is_some());
    assert!(find(&body, "p").is_some());
    let p = find(&body, "p").unwrap();
    assert!(find(&p, "a").is_some(), "adoption agency should clone <a> into <p>");
}

#[test]
fn foster_parents_text_out_of_table() {
    let dom = parse("<table>stray text</table>");
    let html = find(&dom.document, "html").unwrap();
    let body = find(&html, "body").unwrap();
    // Character data can't live directly in <table>; it's foster
    // parented to before the table.
    assert_eq!(text_of(&body), "stray text");
}

#[test]
fn quirks_mode_from_missing_doctype() {
    let dom = parse("<p>no doctype here");
    assert_eq!(dom.quirks_mode.get(), Quirks);
}

#[test]
fn no_quirks_mode_from_html5_doctype() {
    let dom = parse("<!DOCTYPE html><p>modern</p>");
    assert_eq!(dom.quirks_mode.get(), NoQuirks);
}

#[test]
fn limited_quirks_mode_from_html4_transitional_doctype() {
    let dom = parse(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\" \
         \"http://www.w3.org/TR/html4/loose.dtd\"><p>x</p>",
    );
    assert_eq!(dom.quirks_mode.get(), LimitedQuirks);
}

#[test]
fn template_contents_is_a_separate_fragment() {
    let dom = parse("<template><p>inside</p></template>");
    let html = find(&dom.document, "html").unwrap();
    let template = find(&html, "template").unwrap();
    match &template.data {
        NodeData::Element {
            kind: ElementEnum::Template(contents),
            ..
        } => {
            assert!(find(contents, "p").is_some());
        },
        _ => panic!("expected a template element"),
    }
    // The <p> must not also show up in the main tree.
    let body = find(&html, "body").unwrap();
    assert!(find(&body, "p").is_none());
}

#[test]
fn script_already_started_flag_is_set() {
    let dom = parse("<script>1</script>");
    let html = find(&dom.document, "html").unwrap();
    let script = find(&html, "script").unwrap();
    match &script.data {
        NodeData::Element {
            kind: ElementEnum::Script(started),
            ..
        } => assert!(started.get()),
        _ => panic!("expected a script element"),
    }
}

#[test]
fn mathml_annotation_xml_integration_point_recognizes_html_encoding() {
    let dom = parse(
        "<math><annotation-xml encoding=\"text/html\"><div>x</div></annotation-xml></math>",
    );
    let html = find(&dom.document, "html").unwrap();
    let math = find(&html, "math").unwrap();
    let annotation = find(&math, "annotation-xml").unwrap();
    match &annotation.data {
        NodeData::Element { name, .. } => assert_eq!(name.expanded(), expanded_name!(mathml "annotation-xml")),
        _ => panic!(),
    }
    // Being a recognized integration point means ordinary HTML content
    // (like <div>) is allowed straight inside, rather than being parsed
    // under MathML's foreign-content rules.
    assert!(find(&annotation, "div").is_some());
}
