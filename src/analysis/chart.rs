//! Bar chart rendering
//!
//! One function writing a self-contained SVG file: the rendering seam of
//! the pipeline. Everything upstream only hands over labels, counts and an
//! optional bar to highlight.

use std::io::Write;
use std::path::Path;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 70.0;

const BAR_FILL: &str = "#336699";
const HIGHLIGHT_FILL: &str = "#aa3333";

/// Renders a bar chart to an SVG file
///
/// `labels` and `counts` must have the same length; `highlight` picks one
/// bar to draw in the highlight color.
pub fn render_bar_chart(
    labels: &[String],
    counts: &[u64],
    y_label: &str,
    highlight: Option<usize>,
    path: &Path,
) -> std::io::Result<()> {
    let bars = labels.len().min(counts.len());
    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);

    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let step = if bars > 0 { plot_width / bars as f64 } else { plot_width };
    let bar_width = step * 0.8;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
         viewBox=\"0 0 {} {}\" font-family=\"sans-serif\">\n",
        WIDTH, HEIGHT, WIDTH, HEIGHT
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
        WIDTH, HEIGHT
    ));

    // Axes
    let axis_bottom = MARGIN_TOP + plot_height;
    svg.push_str(&format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\"/>\n",
        MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, axis_bottom
    ));
    svg.push_str(&format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"black\"/>\n",
        MARGIN_LEFT,
        axis_bottom,
        MARGIN_LEFT + plot_width,
        axis_bottom
    ));

    // Y-axis ticks at zero and the maximum
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"11\">0</text>\n",
        MARGIN_LEFT - 6.0,
        axis_bottom + 4.0
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"end\" font-size=\"11\">{}</text>\n",
        MARGIN_LEFT - 6.0,
        MARGIN_TOP + 4.0,
        max_count
    ));
    svg.push_str(&format!(
        "<text x=\"16\" y=\"{}\" text-anchor=\"middle\" font-size=\"12\" \
         transform=\"rotate(-90 16 {})\">{}</text>\n",
        HEIGHT / 2.0,
        HEIGHT / 2.0,
        escape_text(y_label)
    ));

    for i in 0..bars {
        let x = MARGIN_LEFT + i as f64 * step + (step - bar_width) / 2.0;
        let height = counts[i] as f64 / max_count as f64 * plot_height;
        let y = axis_bottom - height;
        let fill = if highlight == Some(i) {
            HIGHLIGHT_FILL
        } else {
            BAR_FILL
        };

        svg.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
            x, y, bar_width, height, fill
        ));

        let label_x = x + bar_width / 2.0;
        let label_y = axis_bottom + 10.0;
        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"end\" font-size=\"10\" \
             transform=\"rotate(-90 {:.2} {:.2})\">{}</text>\n",
            label_x,
            label_y,
            label_x,
            label_y,
            escape_text(&labels[i])
        ));
    }

    svg.push_str("</svg>\n");

    let mut file = std::fs::File::create(path)?;
    file.write_all(svg.as_bytes())?;
    Ok(())
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{:02}:00", i)).collect()
    }

    #[test]
    fn test_renders_svg_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");

        render_bar_chart(&labels(3), &[1, 4, 2], "posts", None, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
        assert!(content.contains("00:00"));
        assert!(content.contains("posts"));
        assert!(!content.contains(HIGHLIGHT_FILL));
    }

    #[test]
    fn test_highlighted_bar_uses_highlight_fill() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");

        render_bar_chart(&labels(3), &[1, 4, 2], "posts", Some(1), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(HIGHLIGHT_FILL));
    }

    #[test]
    fn test_empty_data_still_renders() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");

        render_bar_chart(&[], &[], "posts", None, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<svg"));
    }

    #[test]
    fn test_y_label_escaped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chart.svg");

        render_bar_chart(&labels(1), &[1], "a < b", None, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("a &lt; b"));
    }
}
