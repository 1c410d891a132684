//! Reading paths out of SVG documents and writing a morph sequence back out.
//!
//! Only `<path>` elements are read. Everything about them except `d` is kept as
//! opaque attributes.

use crate::colors::to_hex;
use crate::frame::RenderFrame;
use crate::path::Path;
use crate::path_collection::{Attributes, PathCollection};
use anyhow::{bail, Context, Result};
use kurbo::BezPath;
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Fraction of the drawing size added around the paths.
const VIEW_PADDING: f64 = 0.05;
/// Arrow length relative to width + height of the drawing.
const ARROW_SCALE: f64 = 0.03;
const STROKE_SCALE: f64 = 0.002;

pub fn load_svg(path: &std::path::Path) -> Result<PathCollection> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))?;
    parse_svg(&content).with_context(|| format!("Could not parse {}", path.display()))
}

pub fn parse_svg(content: &str) -> Result<PathCollection> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut collection = PathCollection::new();
    let mut path_elements = 0;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let local_name = e.local_name();
                let tag = reader.decoder().decode(local_name.as_ref())?;
                if tag == "svg" {
                    collection.document_attributes = read_attributes(&reader, e)?;
                } else if tag == "path" {
                    path_elements += 1;
                    let attributes = read_attributes(&reader, e)?;
                    push_path_element(&mut collection, attributes, path_elements);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!("XML error at position {}: {}", reader.buffer_position(), e),
            _ => {}
        }
        buffer.clear();
    }

    debug!("Read {} paths from {} <path> elements", collection.len(), path_elements);
    Ok(collection)
}

/// Adds every sub path of one `<path>` element. Elements without usable data are skipped.
fn push_path_element(collection: &mut PathCollection, mut attributes: Attributes, element: usize) {
    let data = match attributes.remove("d") {
        Some(data) => data,
        None => {
            warn!("Skipping <path> element #{} without path data", element);
            return;
        }
    };
    let bezpath = match BezPath::from_svg(&data) {
        Ok(bezpath) => bezpath,
        Err(err) => {
            warn!("Skipping <path> element #{} with invalid data: {:?}", element, err);
            return;
        }
    };
    let sub_paths = Path::from_bezpath(&bezpath);
    if sub_paths.len() > 1 {
        debug!("<path> element #{} split into {} sub paths", element, sub_paths.len());
    }
    for sub_path in sub_paths {
        collection.push(sub_path, attributes.clone());
    }
}

fn read_attributes(reader: &Reader<&[u8]>, element: &BytesStart) -> Result<Attributes> {
    let mut attributes = Attributes::new();
    for attr in element.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

/// Writes the frame as a standalone SVG document: one stroked path per frame plus the start arrows.
pub fn write_svg(frame: &RenderFrame) -> String {
    let (x, y, width, height) = match frame.bounding_box() {
        Some(bounds) => {
            let pad_x = bounds.width() * VIEW_PADDING;
            let pad_y = bounds.height() * VIEW_PADDING;
            (
                bounds.min_x() - pad_x,
                bounds.min_y() - pad_y,
                bounds.width() + 2.0 * pad_x,
                bounds.height() + 2.0 * pad_y,
            )
        }
        None => (0.0, 0.0, 1.0, 1.0),
    };
    let stroke_width = STROKE_SCALE * (width + height);
    let arrow_length = ARROW_SCALE * (width + height);

    let mut output = String::new();
    output.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n",
        x, y, width, height
    ));
    for (path, color) in frame.iter() {
        output.push_str(&format!(
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            path.to_bezpath().to_svg(),
            to_hex(color),
            stroke_width
        ));
    }
    for marker in &frame.markers {
        let tip = marker.tip(arrow_length);
        output.push_str(&format!(
            "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            marker.position.x,
            marker.position.y,
            tip.x,
            tip.y,
            to_hex(marker.color),
            2.0 * stroke_width
        ));
    }
    output.push_str("</svg>\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_utilities::types::*;
    use crate::session::Session;

    const DOCUMENT: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <g>
    <path id="outer" fill="#ff0000" d="M 0 0 L 10 0 L 10 10 L 0 10 Z"/>
    <path id="pair" d="M 20 20 C 25 15 30 15 35 20 L 35 30 Z M 50 50 L 60 50 L 55 60 Z"></path>
    <path id="broken" d="M 0 0 X 1 2"/>
    <rect width="5" height="5"/>
  </g>
</svg>
"##;

    #[test]
    fn test_parse_paths_and_attributes() {
        let collection = parse_svg(DOCUMENT).unwrap();
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.document_attributes.get("width").map(String::as_str), Some("100"));

        let outer = collection.get(0).unwrap();
        assert_eq!(outer.len(), 4);
        assert!(outer.is_closed(1e-9));
        let attributes = collection.attributes(0).unwrap();
        assert_eq!(attributes.get("id").map(String::as_str), Some("outer"));
        assert_eq!(attributes.get("fill").map(String::as_str), Some("#ff0000"));
        assert!(attributes.get("d").is_none());

        // Two sub paths of the same element share its attributes
        assert_eq!(collection.get(1).unwrap().len(), 3);
        assert!(!collection.get(1).unwrap().segments()[0].is_line());
        assert_eq!(collection.get(2).unwrap().len(), 3);
        assert_eq!(collection.attributes(2).unwrap().get("id").map(String::as_str), Some("pair"));
    }

    #[test]
    fn test_quadratic_commands_become_cubics() {
        let collection = parse_svg(r#"<svg><path d="M 0 0 Q 3 3 6 0 Z"/></svg>"#).unwrap();
        let path = collection.get(0).unwrap();
        assert_eq!(path.len(), 2);
        assert!(path.is_continuous(1e-9));
        let curve = path.segments()[0];
        assert!(!curve.is_line());
        assert_eq!(curve.start(), CanvasPoint::new(0.0, 0.0));
        assert_eq!(curve.end(), CanvasPoint::new(6.0, 0.0));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(parse_svg("<svg><path d=\"M 0 0 L 1 1 Z\"></svg>").is_err());
        assert!(load_svg(std::path::Path::new("/nonexistent/shapes.svg")).is_err());
    }

    #[test]
    fn test_write_svg() {
        let mut session = Session::default();
        session.load(parse_svg(DOCUMENT).unwrap());
        session.set_path1_index(1);
        session.set_path2_index(2);
        session.set_between(2);
        let output = write_svg(&session.frame().unwrap());

        assert!(output.starts_with("<?xml"));
        assert_eq!(output.matches("<path ").count(), 4);
        assert_eq!(output.matches("<line ").count(), 2);

        // The written document reads back as the same number of paths
        let again = parse_svg(&output).unwrap();
        assert_eq!(again.len(), 4);
        assert_eq!(again.get(0).unwrap().segments()[0].start(), CanvasPoint::new(20.0, 20.0));
    }
}
