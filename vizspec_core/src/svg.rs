// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small owned SVG element tree, used as the SVG render target.

use std::fmt::{self, Write as _};

use kurbo::Size;
use peniko::Brush;

/// An SVG element: a tag, ordered attributes, children and optional text content.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgElement {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<SvgElement>,
    text: Option<String>,
}

impl SvgElement {
    /// Creates an element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// A `<g>` group.
    pub fn group() -> Self {
        Self::new("g")
    }

    /// A `<path>` with the given path data.
    pub fn path(d: impl fmt::Display) -> Self {
        Self::new("path").attr("d", d)
    }

    /// Sets an attribute, replacing an earlier value of the same name.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Sets an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        let name = name.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Sets `fill` (and `fill-opacity` when translucent) from a brush.
    #[must_use]
    pub fn fill(self, brush: &Brush) -> Self {
        self.paint("fill", brush)
    }

    /// Sets `stroke`, `stroke-width` (and `stroke-opacity` when translucent) from a brush.
    #[must_use]
    pub fn stroke(self, brush: &Brush, width: f64) -> Self {
        self.paint("stroke", brush).attr("stroke-width", width)
    }

    fn paint(mut self, name: &str, brush: &Brush) -> Self {
        let (value, opacity) = svg_paint(brush);
        self.set_attr(name, value);
        if let Some(o) = opacity {
            self.set_attr(format!("{name}-opacity"), o);
        }
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element in place.
    pub fn push(&mut self, child: Self) {
        self.children.push(child);
    }

    /// Sets the text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// The tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// An attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v.as_str()))
    }

    /// Child elements.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Text content.
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Serializes the element and its subtree.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            let _ = write!(out, r#" {name}="{}""#, escape_xml(value));
        }
        if self.children.is_empty() && self.text.is_none() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        if let Some(text) = &self.text {
            out.push_str(&escape_xml(text));
        }
        for child in &self.children {
            child.write_to(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

/// Something SVG elements can be appended to.
pub trait SvgContainer {
    /// Appends a rendered element.
    fn append(&mut self, element: SvgElement);

    /// Removes the first element equal to `element`; returns whether one was found.
    fn remove(&mut self, element: &SvgElement) -> bool;
}

impl SvgContainer for SvgElement {
    fn append(&mut self, element: SvgElement) {
        self.push(element);
    }

    fn remove(&mut self, element: &SvgElement) -> bool {
        remove_first(&mut self.children, element)
    }
}

/// An in-memory SVG document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SvgDocument {
    size: Size,
    elements: Vec<SvgElement>,
}

impl SvgDocument {
    /// Creates an empty document of the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            elements: Vec::new(),
        }
    }

    /// Top-level elements, in append order.
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Serializes the whole document.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        let (w, h) = (self.size.width, self.size.height);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#
        );
        for el in &self.elements {
            el.write_to(&mut out);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }
}

impl SvgContainer for SvgDocument {
    fn append(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    fn remove(&mut self, element: &SvgElement) -> bool {
        remove_first(&mut self.elements, element)
    }
}

fn remove_first(elements: &mut Vec<SvgElement>, element: &SvgElement) -> bool {
    match elements.iter().position(|e| e == element) {
        Some(index) => {
            elements.remove(index);
            true
        }
        None => false,
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (value, opacity)
        }
        _ => ("none".to_owned(), None),
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
