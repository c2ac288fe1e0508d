//! SVG bar chart of match scores, rendered with plotters.

use anyhow::anyhow;
use plotters::prelude::*;

use crate::errors::AppError;
use crate::models::matching::MatchResult;

const BAR_HEIGHT_PX: u32 = 36;
const CHART_WIDTH_PX: u32 = 900;

/// Renders a horizontal bar chart of the ranked scores as an SVG string.
/// One bar per result, best match on top, x-axis fixed to [0, 1].
pub fn render_score_chart(results: &[MatchResult]) -> Result<String, AppError> {
    let n = results.len().max(1);
    let height = 120 + BAR_HEIGHT_PX * n as u32;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH_PX, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AppError::Internal(anyhow!("chart rendering failed: {e}")))?;

        let mut chart = ChartBuilder::on(&root)
            .caption("Match scores", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0f32..1f32, 0f32..n as f32)
            .map_err(|e| AppError::Internal(anyhow!("chart rendering failed: {e}")))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .disable_y_axis()
            .x_desc("cosine similarity")
            .draw()
            .map_err(|e| AppError::Internal(anyhow!("chart rendering failed: {e}")))?;

        // Bars, best match at the top. Negative scores render as zero-width;
        // the axis matches the original chart's [0, 1] window.
        chart
            .draw_series(results.iter().enumerate().map(|(i, r)| {
                let y = (n - 1 - i) as f32;
                let width = r.score.clamp(0.0, 1.0);
                Rectangle::new([(0.0, y + 0.15), (width, y + 0.85)], BLUE.filled())
            }))
            .map_err(|e| AppError::Internal(anyhow!("chart rendering failed: {e}")))?;

        // Candidate names drawn just inside each bar row.
        chart
            .draw_series(results.iter().enumerate().map(|(i, r)| {
                let y = (n - 1 - i) as f32;
                let label = format!("{} ({:.2})", r.name, r.score);
                Text::new(label, (0.01, y + 0.55), ("sans-serif", 14).into_font().color(&BLACK))
            }))
            .map_err(|e| AppError::Internal(anyhow!("chart rendering failed: {e}")))?;

        root.present()
            .map_err(|e| AppError::Internal(anyhow!("chart rendering failed: {e}")))?;
    }

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn make_result(name: &str, score: f32) -> MatchResult {
        MatchResult {
            document_id: Uuid::new_v4(),
            filename: format!("{name}.pdf"),
            name: name.to_string(),
            email: None,
            phone: None,
            score,
            clients: vec![],
        }
    }

    #[test]
    fn test_chart_is_svg() {
        let svg = render_score_chart(&[make_result("Jane Doe", 0.87)]).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_chart_labels_candidates() {
        let svg =
            render_score_chart(&[make_result("Jane Doe", 0.87), make_result("John Smith", 0.42)])
                .unwrap();
        assert!(svg.contains("Jane Doe"));
        assert!(svg.contains("John Smith"));
    }

    #[test]
    fn test_empty_results_still_render() {
        let svg = render_score_chart(&[]).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_negative_scores_do_not_panic() {
        let svg = render_score_chart(&[make_result("Odd One", -0.3)]).unwrap();
        assert!(svg.contains("Odd One"));
    }
}
