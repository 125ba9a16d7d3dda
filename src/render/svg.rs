use crate::models::BitMatrix;
use std::fmt::Write;

/// Render an SVG document `size` pixels wide with one unit per module.
///
/// `logo_href` (a URL or data URI) is placed at the centre, scaled to
/// `logo_size_ratio` of the symbol.
pub fn render_svg(
    matrix: &BitMatrix,
    size: u32,
    logo_href: Option<&str>,
    logo_size_ratio: f32,
) -> String {
    let n = matrix.width();
    let mut svg = String::with_capacity(128 + matrix.count_ones() * 48);

    let _ = write!(
        svg,
        r#"<svg width="{size}" height="{size}" viewBox="0 0 {n} {n}" xmlns="http://www.w3.org/2000/svg">"#
    );

    for y in 0..matrix.height() {
        for x in 0..n {
            if matrix.get(x, y) {
                let _ = write!(
                    svg,
                    r#"<rect x="{x}" y="{y}" width="1" height="1" fill="black"/>"#
                );
            }
        }
    }

    if let Some(href) = logo_href {
        let logo_size = n as f32 * logo_size_ratio;
        let offset = (n as f32 - logo_size) / 2.0;
        let _ = write!(
            svg,
            r#"<image href="{}" x="{offset}" y="{offset}" width="{logo_size}" height="{logo_size}" preserveAspectRatio="xMidYMid slice"/>"#,
            escape_attribute(href)
        );
    }

    svg.push_str("</svg>");
    svg
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{BitstreamEncoder, MatrixBuilder};
    use crate::models::ECLevel;

    #[test]
    fn test_svg_structure() {
        let stream = BitstreamEncoder::encode("RenderTest", ECLevel::M).unwrap();
        let matrix = MatrixBuilder::build(&stream);
        let svg = render_svg(&matrix, 300, None, 0.0);

        assert!(svg.starts_with(r#"<svg width="300" height="300" viewBox="0 0 21 21""#));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), matrix.count_ones());
        assert!(svg.contains(r#"<rect x="0" y="0" width="1" height="1" fill="black"/>"#));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn test_svg_logo() {
        let matrix = BitMatrix::square(20);
        let svg = render_svg(&matrix, 200, Some("logo.png?a=1&b=\"2\""), 0.25);
        assert!(svg.contains(r#"href="logo.png?a=1&amp;b=&quot;2&quot;""#));
        assert!(svg.contains(r#"x="7.5" y="7.5" width="5" height="5""#));
        assert!(!svg.contains("<rect"));
    }
}
