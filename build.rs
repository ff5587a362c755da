// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Deserialize;

static NAMESPACES: &[(&str, &str)] = &[
    ("", ""),
    ("*", "*"),
    ("html", "http://www.w3.org/1999/xhtml"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
    ("xmlns", "http://www.w3.org/2000/xmlns/"),
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("svg", "http://www.w3.org/2000/svg"),
    ("mathml", "http://www.w3.org/1998/Math/MathML"),
];

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();

    write_atoms(&out_dir, &manifest_dir);
    write_named_entities(&out_dir, &manifest_dir);
}

/// Generate the interned-atom types (`LocalName`, `Prefix`, `Namespace`)
/// and the `ns!`/`local_name!`/`namespace_prefix!`/`namespace_url!`
/// macros used throughout the tokenizer and tree builder.
fn write_atoms(out_dir: &str, manifest_dir: &str) {
    let generated = Path::new(out_dir).join("atoms_generated.rs");
    let mut generated = BufWriter::new(File::create(generated).unwrap());

    let local_names = Path::new(manifest_dir).join("local_names.txt");
    let mut local_names_atom = string_cache_codegen::AtomType::new("LocalName", "local_name!");
    for line in BufReader::new(File::open(local_names).unwrap()).lines() {
        let local_name = line.unwrap();
        let local_name = local_name.trim();
        if local_name.is_empty() {
            continue;
        }
        local_names_atom.atom(local_name);
        local_names_atom.atom(&local_name.to_ascii_lowercase());
    }
    local_names_atom
        .with_macro_doc("Get an interned `LocalName` for a known HTML/SVG/MathML tag or attribute name.")
        .write_to(&mut generated)
        .unwrap();

    string_cache_codegen::AtomType::new("Prefix", "namespace_prefix!")
        .with_macro_doc("Get an interned `Prefix`.")
        .atoms(NAMESPACES.iter().map(|&(prefix, _url)| prefix))
        .write_to(&mut generated)
        .unwrap();

    string_cache_codegen::AtomType::new("Namespace", "namespace_url!")
        .with_macro_doc("Get an interned `Namespace`.")
        .atoms(NAMESPACES.iter().map(|&(_prefix, url)| url))
        .write_to(&mut generated)
        .unwrap();

    writeln!(
        generated,
        "#[macro_export]\nmacro_rules! ns {{"
    )
    .unwrap();
    for &(prefix, url) in NAMESPACES {
        writeln!(
            generated,
            "    ({prefix}) => {{ $crate::namespace_url!({url:?}) }};",
            prefix = prefix,
            url = url,
        )
        .unwrap();
    }
    writeln!(generated, "}}").unwrap();
}

#[derive(Deserialize)]
#[serde(transparent)]
struct RawEntities(BTreeMap<String, (u32, u32)>);

/// Generate a `phf::Map<&'static str, (u32, u32)>` named-entity table
/// from `entities.json` (the WHATWG HTML5 named character reference
/// list), included by `src/data.rs`.
fn write_named_entities(out_dir: &str, manifest_dir: &str) {
    let entities_path = Path::new(manifest_dir).join("entities.json");
    println!("cargo:rerun-if-changed={}", entities_path.display());

    let file = File::open(&entities_path).unwrap();
    let entities: RawEntities = serde_json::from_reader(BufReader::new(file)).unwrap();

    // The tokenizer's named character reference state machine matches
    // one character at a time and needs to know, after each one,
    // whether it's still on a possible entity name; so every proper
    // prefix of a real entity name must also be a key, mapped to the
    // (0, 0) sentinel when it isn't itself a complete entity.
    let mut entities: BTreeMap<String, (u32, u32)> = entities.0;
    for key in entities.keys().cloned().collect::<Vec<_>>() {
        for n in 1..key.len() {
            entities.entry(key[..n].to_string()).or_insert((0, 0));
        }
    }
    entities.insert(String::new(), (0, 0));

    let out_path = Path::new(out_dir).join("named_entities.rs");
    let mut out = BufWriter::new(File::create(out_path).unwrap());

    writeln!(
        out,
        "/// The WHATWG HTML5 named character reference table, keyed by the\n\
         /// entity name as it appears after the leading `&` (including the\n\
         /// trailing `;` for entities that require one), plus every proper\n\
         /// prefix of such a name mapped to `(0, 0)`. The value is the one\n\
         /// or two resulting code points; the second is 0 when unused.\n\
         pub static NAMED_ENTITIES: phf::Map<&'static str, (u32, u32)> = "
    )
    .unwrap();

    let mut builder = phf_codegen::Map::new();
    for (name, (c1, c2)) in &entities {
        builder.entry(name.as_str(), &format!("({c1}, {c2})"));
    }
    writeln!(out, "{};", builder.build()).unwrap();
}
