/// Vector-path markup for a rendered scene
use std::fmt::Write;

use crate::config::SceneConfig;
use crate::pipeline::RenderOutput;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// One `<path>` per polygon, in draw order
pub fn paths(output: &RenderOutput, stroke: &str, stroke_width: f32) -> String {
    let mut markup = String::new();
    for (polygon, color) in output.iter() {
        let mut vertices = polygon.vertices.iter();
        let Some(first) = vertices.next() else {
            continue;
        };

        let mut d = format!("M{} {}", first.x, first.y);
        for v in vertices {
            // Writing into a String cannot fail
            let _ = write!(d, " L{} {}", v.x, v.y);
        }
        d.push_str(" Z");

        let _ = write!(
            markup,
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            d,
            color,
            escape(stroke),
            stroke_width
        );
    }
    markup
}

/// A standalone SVG document, padded by the stroke width on every side
pub fn document(output: &RenderOutput, config: &SceneConfig) -> String {
    let padding = config.stroke_width * 2.0;
    format!(
        r#"<svg xmlns="{}" width="{}" height="{}">{}</svg>"#,
        SVG_NS,
        config.width as f32 + padding,
        config.height as f32 + padding,
        paths(output, &config.stroke, config.stroke_width)
    )
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
