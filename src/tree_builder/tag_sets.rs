// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named sets of tags, used throughout the tree builder for scope
//! queries ("has an element in *x* scope") and for generating implied
//! end tags. Every set is a `fn(ExpandedName) -> bool`, so they compose
//! with `in_scope`/`elem_in`/`generate_implied_end_tags` without
//! allocating.

/// Declare a tag set as a plain function.
///
/// `declare_tag_set!(name = "a" "b" "c")` matches any of the given tag
/// names in the HTML namespace. `declare_tag_set!(name = [base] - "a"
/// "b")` matches `base` except for the given HTML tags; this is used
/// to carve `special_tag`-like exceptions.
macro_rules! declare_tag_set {
    ($name:ident = $($tag:tt)+) => {
        pub(super) fn $name(name: crate::ExpandedName) -> bool {
            declare_tag_set!(@match name { $($tag)+ })
        }
    };

    (@match $name:ident { [$base:ident] - $($excl:tt)+ }) => {
        $base($name) && !declare_tag_set!(@match $name { $($excl)+ })
    };

    (@match $name:ident { $($tag:tt)+ }) => {
        matches!(
            $name,
            $(expanded_name!(html $tag))|+
        )
    };
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope>
pub(super) fn default_scope(name: crate::ExpandedName) -> bool {
    matches!(
        name,
        expanded_name!(html "applet")
            | expanded_name!(html "caption")
            | expanded_name!(html "html")
            | expanded_name!(html "table")
            | expanded_name!(html "td")
            | expanded_name!(html "th")
            | expanded_name!(html "marquee")
            | expanded_name!(html "object")
            | expanded_name!(html "template")
            | expanded_name!(mathml "mi")
            | expanded_name!(mathml "mo")
            | expanded_name!(mathml "mn")
            | expanded_name!(mathml "ms")
            | expanded_name!(mathml "mtext")
            | expanded_name!(mathml "annotation-xml")
            | expanded_name!(svg "foreignObject")
            | expanded_name!(svg "desc")
            | expanded_name!(svg "title")
    )
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-list-item-scope>
pub(super) fn list_item_scope(name: crate::ExpandedName) -> bool {
    default_scope(name) || matches!(name, expanded_name!(html "ol") | expanded_name!(html "ul"))
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-button-scope>
pub(super) fn button_scope(name: crate::ExpandedName) -> bool {
    default_scope(name) || matches!(name, expanded_name!(html "button"))
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-table-scope>
pub(super) fn table_scope(name: crate::ExpandedName) -> bool {
    matches!(
        name,
        expanded_name!(html "html") | expanded_name!(html "table") | expanded_name!(html "template")
    )
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-select-scope>
///
/// Note this is defined negatively: every element is in select scope
/// except `optgroup` and `option`.
pub(super) fn select_scope(name: crate::ExpandedName) -> bool {
    !matches!(name, expanded_name!(html "optgroup") | expanded_name!(html "option"))
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#special>
pub(super) fn special_tag(name: crate::ExpandedName) -> bool {
    matches!(
        name,
        expanded_name!(html "address")
            | expanded_name!(html "applet")
            | expanded_name!(html "area")
            | expanded_name!(html "article")
            | expanded_name!(html "aside")
            | expanded_name!(html "base")
            | expanded_name!(html "basefont")
            | expanded_name!(html "bgsound")
            | expanded_name!(html "blockquote")
            | expanded_name!(html "body")
            | expanded_name!(html "br")
            | expanded_name!(html "button")
            | expanded_name!(html "caption")
            | expanded_name!(html "center")
            | expanded_name!(html "col")
            | expanded_name!(html "colgroup")
            | expanded_name!(html "dd")
            | expanded_name!(html "details")
            | expanded_name!(html "dir")
            | expanded_name!(html "div")
            | expanded_name!(html "dl")
            | expanded_name!(html "dt")
            | expanded_name!(html "embed")
            | expanded_name!(html "fieldset")
            | expanded_name!(html "figcaption")
            | expanded_name!(html "figure")
            | expanded_name!(html "footer")
            | expanded_name!(html "form")
            | expanded_name!(html "frame")
            | expanded_name!(html "frameset")
            | expanded_name!(html "h1")
            | expanded_name!(html "h2")
            | expanded_name!(html "h3")
            | expanded_name!(html "h4")
            | expanded_name!(html "h5")
            | expanded_name!(html "h6")
            | expanded_name!(html "head")
            | expanded_name!(html "header")
            | expanded_name!(html "hgroup")
            | expanded_name!(html "hr")
            | expanded_name!(html "html")
            | expanded_name!(html "iframe")
            | expanded_name!(html "img")
            | expanded_name!(html "input")
            | expanded_name!(html "keygen")
            | expanded_name!(html "li")
            | expanded_name!(html "link")
            | expanded_name!(html "listing")
            | expanded_name!(html "main")
            | expanded_name!(html "marquee")
            | expanded_name!(html "menu")
            | expanded_name!(html "meta")
            | expanded_name!(html "nav")
            | expanded_name!(html "noembed")
            | expanded_name!(html "noframes")
            | expanded_name!(html "noscript")
            | expanded_name!(html "object")
            | expanded_name!(html "ol")
            | expanded_name!(html "p")
            | expanded_name!(html "param")
            | expanded_name!(html "plaintext")
            | expanded_name!(html "pre")
            | expanded_name!(html "script")
            | expanded_name!(html "search")
            | expanded_name!(html "section")
            | expanded_name!(html "select")
            | expanded_name!(html "source")
            | expanded_name!(html "style")
            | expanded_name!(html "summary")
            | expanded_name!(html "table")
            | expanded_name!(html "tbody")
            | expanded_name!(html "td")
            | expanded_name!(html "template")
            | expanded_name!(html "textarea")
            | expanded_name!(html "tfoot")
            | expanded_name!(html "th")
            | expanded_name!(html "thead")
            | expanded_name!(html "title")
            | expanded_name!(html "tr")
            | expanded_name!(html "track")
            | expanded_name!(html "ul")
            | expanded_name!(html "wbr")
            | expanded_name!(html "xmp")
            | expanded_name!(mathml "mi")
            | expanded_name!(mathml "mo")
            | expanded_name!(mathml "mn")
            | expanded_name!(mathml "ms")
            | expanded_name!(mathml "mtext")
            | expanded_name!(mathml "annotation-xml")
            | expanded_name!(svg "foreignObject")
            | expanded_name!(svg "desc")
            | expanded_name!(svg "title")
    )
}

/// `td` or `th`, used when closing the current cell.
pub(super) fn td_th(name: crate::ExpandedName) -> bool {
    matches!(name, expanded_name!(html "td") | expanded_name!(html "th"))
}

/// <https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags>
pub(super) fn cursory_implied_end(name: crate::ExpandedName) -> bool {
    matches!(
        name,
        expanded_name!(html "dd")
            | expanded_name!(html "dt")
            | expanded_name!(html "li")
            | expanded_name!(html "optgroup")
            | expanded_name!(html "option")
            | expanded_name!(html "p")
            | expanded_name!(html "rb")
            | expanded_name!(html "rp")
            | expanded_name!(html "rt")
            | expanded_name!(html "rtc")
    )
}

/// The "thoroughly" variant of implied end tags, used when popping the
/// remaining open elements at the end of the document.
pub(super) fn thorough_implied_end(name: crate::ExpandedName) -> bool {
    cursory_implied_end(name)
        || matches!(
            name,
            expanded_name!(html "caption")
                | expanded_name!(html "colgroup")
                | expanded_name!(html "tbody")
                | expanded_name!(html "td")
                | expanded_name!(html "tfoot")
                | expanded_name!(html "th")
                | expanded_name!(html "thead")
                | expanded_name!(html "tr")
        )
}

/// `h1` through `h6`.
pub(super) fn heading_tag(name: crate::ExpandedName) -> bool {
    matches!(
        name,
        expanded_name!(html "h1")
            | expanded_name!(html "h2")
            | expanded_name!(html "h3")
            | expanded_name!(html "h4")
            | expanded_name!(html "h5")
            | expanded_name!(html "h6")
    )
}
