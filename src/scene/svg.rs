//! SVG serialization of scenes and composed viewport frames, plus PNG output.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Color, Point, Size},
        error::{MorphError, MorphResult},
    },
    scene::scene::{Scene, Shape, ShapeKind, TextAlign},
};

const FONT_FAMILY: &str = "sans-serif";

/// One section drawn into a frame, with its hosted scene if any.
#[derive(Clone, Debug)]
pub struct FrameLayer<'a> {
    pub section: String,
    /// Top-left of the section's container in viewport coordinates.
    pub origin: Point,
    pub size: Size,
    pub opacity: f64,
    pub scene: Option<&'a Scene>,
}

/// A transient proxy circle drawn above every section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProxyMark {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
}

/// Everything visible in the viewport at one instant.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub size: Size,
    pub background: Color,
    pub layers: Vec<FrameLayer<'a>>,
    pub proxies: Vec<ProxyMark>,
}

pub fn scene_to_svg(scene: &Scene, background: Option<Color>) -> String {
    let size = scene.size();
    let mut out = String::new();
    open_svg(&mut out, size);
    if let Some(bg) = background {
        write_background(&mut out, size, bg);
    }
    write_scene(&mut out, scene, 0);
    out.push_str("</svg>\n");
    out
}

pub fn frame_to_svg(frame: &Frame<'_>) -> String {
    let mut out = String::new();
    open_svg(&mut out, frame.size);
    write_background(&mut out, frame.size, frame.background);

    for (idx, layer) in frame.layers.iter().enumerate() {
        if layer.opacity <= 0.0 {
            continue;
        }
        let _ = writeln!(
            out,
            r#"<g id="{}" transform="translate({} {})" opacity="{}">"#,
            escape(&layer.section),
            num(layer.origin.x),
            num(layer.origin.y),
            num(layer.opacity.clamp(0.0, 1.0)),
        );
        if let Some(scene) = layer.scene {
            write_scene(&mut out, scene, idx);
        }
        out.push_str("</g>\n");
    }

    if !frame.proxies.is_empty() {
        out.push_str("<g id=\"overlay\">\n");
        for p in &frame.proxies {
            let _ = writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
                num(p.center.x),
                num(p.center.y),
                num(p.radius),
                rgb(p.color),
                num(p.color.alpha()),
            );
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

/// Parses and rasterizes an SVG document into straight-alpha RGBA8 pixels.
pub fn rasterize(svg: &str) -> MorphResult<(u32, u32, Vec<u8>)> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let opts = usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = size.width().ceil().max(1.0) as u32;
    let height = size.height().ceil().max(1.0) as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MorphError::render(format!("failed to allocate {width}x{height} pixmap")))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u32;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
    Ok((width, height, data))
}

/// Writes `svg` to `path`, rasterizing to PNG when the extension is `.png`.
pub fn write_output(svg: &str, path: &Path) -> MorphResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        let (width, height, data) = rasterize(svg)?;
        image::save_buffer_with_format(
            path,
            &data,
            width,
            height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
    } else {
        std::fs::write(path, svg).with_context(|| format!("write svg '{}'", path.display()))?;
    }
    Ok(())
}

fn open_svg(out: &mut String, size: Size) {
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(size.width),
        h = num(size.height),
    );
}

fn write_background(out: &mut String, size: Size, color: Color) {
    let _ = writeln!(
        out,
        r#"<rect width="{}" height="{}" fill="{}"/>"#,
        num(size.width),
        num(size.height),
        rgb(color),
    );
}

fn write_scene(out: &mut String, scene: &Scene, layer: usize) {
    for (idx, shape) in scene.shapes().iter().enumerate() {
        if shape.visible {
            write_shape(out, shape, &format!("{}-{layer}-{idx}", scene.viz()));
        }
    }
}

fn write_shape(out: &mut String, shape: &Shape, id: &str) {
    let paint = paint_attrs(shape);
    match &shape.kind {
        ShapeKind::Circle { center, radius } => {
            let _ = writeln!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}"{paint}/>"#,
                num(center.x),
                num(center.y),
                num(*radius),
            );
        }
        ShapeKind::Text {
            anchor,
            text,
            font_px,
            align,
        } => {
            let anchor_attr = match align {
                TextAlign::Start => "start",
                TextAlign::Middle => "middle",
            };
            let _ = writeln!(
                out,
                r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" text-anchor="{anchor_attr}"{paint}>{}</text>"#,
                num(anchor.x),
                num(anchor.y),
                num(*font_px),
                escape(text),
            );
        }
        ShapeKind::ArcText {
            center,
            radius,
            start_deg,
            end_deg,
            text,
            font_px,
        } => {
            let path_id = format!("arc-{id}");
            let _ = writeln!(
                out,
                r#"<path id="{path_id}" d="{}" fill="none"/>"#,
                arc_path(*center, *radius, *start_deg, *end_deg),
            );
            let _ = writeln!(
                out,
                r##"<text font-family="{FONT_FAMILY}" font-size="{}"{paint}><textPath xlink:href="#{path_id}" href="#{path_id}">{}</textPath></text>"##,
                num(*font_px),
                escape(text),
            );
        }
    }
}

fn paint_attrs(shape: &Shape) -> String {
    let mut attrs = format!(r#" fill="{}""#, rgb(shape.fill));
    let fill_opacity = shape.fill_opacity * shape.fill.alpha();
    if fill_opacity < 1.0 {
        let _ = write!(attrs, r#" fill-opacity="{}""#, num(fill_opacity));
    }
    if let Some(stroke) = shape.stroke {
        let _ = write!(
            attrs,
            r#" stroke="{}" stroke-width="{}" stroke-opacity="{}""#,
            rgb(stroke.color),
            num(stroke.width),
            num(stroke.opacity * stroke.color.alpha()),
        );
    }
    attrs
}

/// Circular arc between two angles measured clockwise from 12 o'clock.
pub fn arc_path(center: Point, radius: f64, start_deg: f64, end_deg: f64) -> String {
    let at = |deg: f64| {
        let a = deg.to_radians();
        Point::new(center.x + radius * a.sin(), center.y - radius * a.cos())
    };
    let (p0, p1) = (at(start_deg), at(end_deg));
    let large = u8::from((end_deg - start_deg).abs() > 180.0);
    let sweep = u8::from(end_deg > start_deg);
    format!(
        "M {} {} A {r} {r} 0 {large} {sweep} {} {}",
        num(p0.x),
        num(p0.y),
        num(p1.x),
        num(p1.y),
        r = num(radius),
    )
}

fn rgb(c: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
}

fn num(v: f64) -> String {
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded}")
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/scene/svg.rs"]
mod tests;
