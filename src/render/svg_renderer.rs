use std::fmt::Display;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, PolylinePrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive,
};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Serializes frames into standalone SVG documents.
///
/// The last rendered document is kept so exports can reuse it without
/// re-serializing the frame.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: Option<String>,
    frames_rendered: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    #[must_use]
    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    /// Produces the full document, XML prolog included.
    pub fn serialize(frame: &RenderFrame) -> ChartResult<String> {
        frame.validate()?;

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, Some("no"))))
            .map_err(xml_error)?;

        let width = frame.viewport.width.to_string();
        let height = frame.viewport.height.to_string();
        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", SVG_NAMESPACE));
        root.push_attribute(("xmlns:xlink", XLINK_NAMESPACE));
        root.push_attribute(("version", "1.1"));
        root.push_attribute(("id", frame.document_id.as_str()));
        root.push_attribute(("width", width.as_str()));
        root.push_attribute(("height", height.as_str()));
        writer.write_event(Event::Start(root)).map_err(xml_error)?;

        write_group(&mut writer, "axes", |writer| {
            frame
                .lines
                .iter()
                .try_for_each(|line| write_line(writer, line))
        })?;
        write_group(&mut writer, "series", |writer| {
            frame
                .polylines
                .iter()
                .try_for_each(|polyline| write_path(writer, polyline))
        })?;
        write_group(&mut writer, "markers", |writer| {
            frame
                .circles
                .iter()
                .try_for_each(|circle| write_circle(writer, circle))
        })?;
        write_group(&mut writer, "labels", |writer| {
            frame
                .texts
                .iter()
                .try_for_each(|text| write_text(writer, text))
        })?;

        writer
            .write_event(Event::End(BytesEnd::new("svg")))
            .map_err(xml_error)?;

        String::from_utf8(writer.into_inner()).map_err(xml_error)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let document = Self::serialize(frame)?;
        debug!(
            document_id = %frame.document_id,
            bytes = document.len(),
            "serialized svg document"
        );
        self.document = Some(document);
        self.frames_rendered += 1;
        Ok(())
    }
}

type SvgWriter = Writer<Vec<u8>>;

fn write_group<F>(writer: &mut SvgWriter, class: &str, body: F) -> ChartResult<()>
where
    F: FnOnce(&mut SvgWriter) -> ChartResult<()>,
{
    let mut group = BytesStart::new("g");
    group.push_attribute(("class", class));
    writer.write_event(Event::Start(group)).map_err(xml_error)?;
    body(writer)?;
    writer
        .write_event(Event::End(BytesEnd::new("g")))
        .map_err(xml_error)
}

fn write_line(writer: &mut SvgWriter, line: &LinePrimitive) -> ChartResult<()> {
    let mut element = BytesStart::new("line");
    push_number(&mut element, "x1", line.x1);
    push_number(&mut element, "y1", line.y1);
    push_number(&mut element, "x2", line.x2);
    push_number(&mut element, "y2", line.y2);
    push_stroke(&mut element, line.color, line.stroke_width);
    writer.write_event(Event::Empty(element)).map_err(xml_error)
}

fn write_path(writer: &mut SvgWriter, polyline: &PolylinePrimitive) -> ChartResult<()> {
    let mut element = BytesStart::new("path");
    element.push_attribute(("id", polyline.id.as_str()));
    let data = path_data(&polyline.points);
    element.push_attribute(("d", data.as_str()));
    element.push_attribute(("fill", "none"));
    push_stroke(&mut element, polyline.color, polyline.stroke_width);
    writer.write_event(Event::Empty(element)).map_err(xml_error)
}

fn write_circle(writer: &mut SvgWriter, circle: &CirclePrimitive) -> ChartResult<()> {
    let mut element = BytesStart::new("circle");
    push_number(&mut element, "cx", circle.cx);
    push_number(&mut element, "cy", circle.cy);
    push_number(&mut element, "r", circle.radius);
    let fill = circle.fill.to_hex();
    element.push_attribute(("fill", fill.as_str()));
    push_number(&mut element, "fill-opacity", circle.fill.alpha);
    if let Some((color, width)) = circle.stroke {
        push_stroke(&mut element, color, width);
    }
    writer.write_event(Event::Empty(element)).map_err(xml_error)
}

fn write_text(writer: &mut SvgWriter, text: &TextPrimitive) -> ChartResult<()> {
    let mut element = BytesStart::new("text");
    push_number(&mut element, "x", text.x);
    push_number(&mut element, "y", text.y);
    push_number(&mut element, "font-size", text.font_size_px);
    element.push_attribute(("font-family", "sans-serif"));
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    element.push_attribute(("text-anchor", anchor));
    let fill = text.color.to_hex();
    element.push_attribute(("fill", fill.as_str()));
    push_number(&mut element, "fill-opacity", text.color.alpha);
    if text.rotation_deg != 0.0 {
        let transform = format!(
            "rotate({} {} {})",
            format_number(text.rotation_deg),
            format_number(text.x),
            format_number(text.y)
        );
        element.push_attribute(("transform", transform.as_str()));
    }
    if text.underline {
        element.push_attribute(("text-decoration", "underline"));
    }
    writer.write_event(Event::Start(element)).map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(&text.text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("text")))
        .map_err(xml_error)
}

fn push_stroke(element: &mut BytesStart<'_>, color: Color, width: f64) {
    let stroke = color.to_hex();
    element.push_attribute(("stroke", stroke.as_str()));
    push_number(element, "stroke-opacity", color.alpha);
    push_number(element, "stroke-width", width);
}

fn push_number(element: &mut BytesStart<'_>, key: &str, value: f64) {
    let formatted = format_number(value);
    element.push_attribute((key, formatted.as_str()));
}

/// `M x,y L x,y ...`; an empty point list yields an empty path.
#[must_use]
pub fn path_data(points: &[(f64, f64)]) -> String {
    let mut data = String::with_capacity(points.len() * 16);
    for (index, (x, y)) in points.iter().enumerate() {
        if index > 0 {
            data.push(' ');
        }
        data.push(if index == 0 { 'M' } else { 'L' });
        data.push_str(&format_number(*x));
        data.push(',');
        data.push_str(&format_number(*y));
    }
    data
}

/// Fixed three-decimal rendering with trailing zeros trimmed.
fn format_number(value: f64) -> String {
    let mut text = format!("{value:.3}");
    if text.contains('.') {
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    if text == "-0" {
        text = "0".to_owned();
    }
    text
}

fn xml_error<E: Display>(err: E) -> ChartError {
    ChartError::Export(format!("svg serialization failed: {err}"))
}
