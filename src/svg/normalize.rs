//! SVG document normalization.
//!
//! Two passes over the XML event stream:
//!
//! 1. **Geometry extraction** — read-only scan that decodes every
//!    SVG-namespace `path` element's `d` attribute and folds segment
//!    endpoints into a [`BoundingBox`]. Decoding everything up front means
//!    malformed path data fails the file before any output is written.
//! 2. **Rewrite** — re-reads the stream and writes it back, translating
//!    every path by the negated minimum corner, recomputing the root
//!    `viewBox`/`width`/`height`, and dropping `transform` from `g`
//!    elements. When the box is invalid (no paths, empty `d`, lone
//!    move-to) the rewrite degrades to a pure passthrough.
//!
//! The `rotationCenter` comment strip is a raw-text post-process on the
//! written file, not a DOM operation: such metadata comments sit outside
//! element boundaries and are not worth trusting to an XML round-trip.

use std::borrow::Cow;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::LazyLock;

use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};
use regex::Regex;

use super::bounds::BoundingBox;
use super::error::NormalizeError;
use super::path::PathData;

/// The SVG element namespace. Only `path` and `g` elements bound to this
/// namespace are inspected; everything else passes through untouched.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Vendor metadata comment marking a rotation pivot; stale after
/// normalization, removed wherever it appears in the serialized text.
/// ASCII whitespace class: the crate is built without `unicode-perl`.
static ROTATION_CENTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--[ \t\r\n]*rotationCenter[^>]*?-->").unwrap());

/// Leading decimal number of a size attribute (`"100px"` -> `"100"`).
static LEADING_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t\r\n]*([0-9]*\.?[0-9]+)").unwrap());

// ============================================================================
// Public surface
// ============================================================================

/// Normalize one SVG file from `input` to `output`.
///
/// The structured rewrite is fully computed in memory before the output
/// file is created, so a failing file leaves no partial output behind.
/// The comment strip then reopens the written file as raw text.
pub fn normalize_file(input: &Path, output: &Path) -> Result<(), NormalizeError> {
    let content = fs::read_to_string(input)?;
    let serialized = normalize_svg(&content)?;
    fs::write(output, &serialized)?;
    strip_rotation_center_in_file(output)
}

/// Normalize an SVG document held in memory, returning the serialized
/// bytes (XML declaration included, comment strip *not* applied).
pub fn normalize_svg(content: &str) -> Result<Vec<u8>, NormalizeError> {
    let (bbox, path_count) = scan_geometry(content)?;
    // Validity gate: zero paths and a degenerate box short-circuit the
    // same way - serialize unchanged
    let bbox = (path_count > 0 && bbox.is_valid()).then_some(bbox);
    rewrite_document(content, bbox.as_ref())
}

/// Read-only geometry pass: decode every SVG `path` and fold segment
/// endpoints into a bounding box. Returns the box (possibly still the
/// invalid sentinel) and the number of `path` elements seen.
pub fn scan_geometry(content: &str) -> Result<(BoundingBox, usize), NormalizeError> {
    let mut reader = NsReader::from_str(content);
    let mut bbox = BoundingBox::new();
    let mut path_count = 0usize;

    loop {
        match reader.read_resolved_event()? {
            (ns, Event::Start(e)) | (ns, Event::Empty(e)) => {
                if is_svg_element(&ns, &e, b"path") {
                    path_count += 1;
                    if let Some(d) = attribute_value(&e, b"d")?
                        && !d.is_empty()
                    {
                        PathData::parse(&d)?.fold_into(&mut bbox);
                    }
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
    }

    Ok((bbox, path_count))
}

// ============================================================================
// Rewrite pass
// ============================================================================

/// Stream the document back out, rewriting `svg`/`path`/`g` start tags
/// when `bbox` is present. Any input XML declaration is replaced by a
/// canonical UTF-8 one; if the input had none, one is prepended.
fn rewrite_document(content: &str, bbox: Option<&BoundingBox>) -> Result<Vec<u8>, NormalizeError> {
    let mut reader = NsReader::from_str(content);
    let mut writer = Writer::new(Cursor::new(Vec::with_capacity(content.len() + 64)));
    let mut wrote_decl = false;
    let mut seen_root = false;

    loop {
        match reader.read_resolved_event()? {
            (_, Event::Decl(_)) => {
                if !wrote_decl {
                    writer.write_event(Event::Decl(utf8_declaration()))?;
                    wrote_decl = true;
                }
            }
            (_, Event::Eof) => break,
            (ns, event) => {
                if !wrote_decl {
                    writer.write_event(Event::Decl(utf8_declaration()))?;
                    writer.write_event(Event::Text(BytesText::new("\n")))?;
                    wrote_decl = true;
                }
                match event {
                    Event::Start(e) => {
                        let is_root = !seen_root;
                        seen_root = true;
                        match rewrite_start(&ns, &e, is_root, bbox)? {
                            Some(out) => writer.write_event(Event::Start(out))?,
                            None => writer.write_event(Event::Start(e))?,
                        }
                    }
                    Event::Empty(e) => {
                        let is_root = !seen_root;
                        seen_root = true;
                        match rewrite_start(&ns, &e, is_root, bbox)? {
                            Some(out) => writer.write_event(Event::Empty(out))?,
                            None => writer.write_event(Event::Empty(e))?,
                        }
                    }
                    other => writer.write_event(other)?,
                }
            }
        }
    }

    Ok(writer.into_inner().into_inner())
}

fn utf8_declaration() -> BytesDecl<'static> {
    BytesDecl::new("1.0", Some("utf-8"), None)
}

/// Rebuild a start tag if normalization touches it.
///
/// Returns `None` when the element passes through byte-identically. The
/// root element, `path` elements and `g` elements can all coincide (a
/// root-level `path` still receives the size attributes), so the checks
/// compose over one attribute loop.
fn rewrite_start(
    ns: &ResolveResult<'_>,
    e: &BytesStart<'_>,
    is_root: bool,
    bbox: Option<&BoundingBox>,
) -> Result<Option<BytesStart<'static>>, NormalizeError> {
    let Some(bbox) = bbox else {
        return Ok(None);
    };
    let is_path = is_svg_element(ns, e, b"path");
    let is_g = is_svg_element(ns, e, b"g");
    if !is_root && !is_path && !is_g {
        return Ok(None);
    }

    let dx = -bbox.min_x;
    let dy = -bbox.min_y;
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut out = BytesStart::new(name);
    let (mut saw_viewbox, mut saw_width, mut saw_height) = (false, false, false);

    for attr in e.attributes() {
        let attr = attr?;
        let key = attr.key.as_ref();
        if is_path && key == b"d" {
            let d = attr.unescape_value()?;
            if d.is_empty() {
                out.push_attribute(attr);
            } else {
                let translated = PathData::parse(&d)?.translate(dx, dy);
                out.push_attribute(("d", translated.to_string().as_str()));
            }
        } else if is_g && key == b"transform" {
            // dropped: the old transform is meaningless after translation
        } else if is_root && key == b"viewBox" {
            out.push_attribute(("viewBox", view_box_value(bbox).as_str()));
            saw_viewbox = true;
        } else if is_root && key == b"width" {
            let original = attr.unescape_value()?;
            out.push_attribute(("width", plain_size(Some(&original), bbox.width()).as_str()));
            saw_width = true;
        } else if is_root && key == b"height" {
            let original = attr.unescape_value()?;
            out.push_attribute(("height", plain_size(Some(&original), bbox.height()).as_str()));
            saw_height = true;
        } else {
            out.push_attribute(attr);
        }
    }

    if is_root {
        if !saw_viewbox {
            out.push_attribute(("viewBox", view_box_value(bbox).as_str()));
        }
        if !saw_width {
            out.push_attribute(("width", plain_size(None, bbox.width()).as_str()));
        }
        if !saw_height {
            out.push_attribute(("height", plain_size(None, bbox.height()).as_str()));
        }
    }

    Ok(Some(out))
}

fn view_box_value(bbox: &BoundingBox) -> String {
    format!("0 0 {} {}", bbox.width(), bbox.height())
}

// ============================================================================
// Size attributes
// ============================================================================

/// Root `width`/`height` attribute state.
enum SizeAttr<'a> {
    Absent,
    /// The attribute starts with a decimal number (possibly followed by a
    /// unit suffix such as `px` or `%`).
    Numeric(&'a str),
    Malformed,
}

impl<'a> SizeAttr<'a> {
    fn classify(value: Option<&'a str>) -> Self {
        match value {
            None => Self::Absent,
            Some(v) => match LEADING_NUMBER_RE.captures(v) {
                Some(caps) => Self::Numeric(caps.get(1).map_or(v, |m| m.as_str())),
                None => Self::Malformed,
            },
        }
    }
}

/// Render the replacement value for a root size attribute.
///
/// Every branch substitutes the freshly computed dimension. The numeric
/// prefix of the original value is matched only so that unit suffixes are
/// recognized and stripped; its parsed value is discarded, keeping
/// `width`/`height` consistent with the rewritten `viewBox`.
fn plain_size(original: Option<&str>, computed: f64) -> String {
    match SizeAttr::classify(original) {
        SizeAttr::Numeric(prefix) => {
            crate::debug!("normalize"; "size `{}` replaced by computed dimension", prefix);
            format!("{computed}")
        }
        SizeAttr::Absent | SizeAttr::Malformed => format!("{computed}"),
    }
}

// ============================================================================
// Comment stripping
// ============================================================================

/// Remove every `rotationCenter` comment from serialized text.
pub fn strip_rotation_center(text: &str) -> Cow<'_, str> {
    ROTATION_CENTER_RE.replace_all(text, "")
}

fn strip_rotation_center_in_file(path: &Path) -> Result<(), NormalizeError> {
    let text = fs::read_to_string(path)?;
    fs::write(path, strip_rotation_center(&text).as_bytes())?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn is_svg_element(ns: &ResolveResult<'_>, e: &BytesStart<'_>, local: &[u8]) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(n)) if *n == SVG_NS.as_bytes())
        && e.local_name().as_ref() == local
}

fn attribute_value(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, NormalizeError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
