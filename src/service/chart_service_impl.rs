use crate::common::*;

use crate::enums::chart_kind::*;

use crate::traits::service_traits::chart_service::*;

use plotters::prelude::*;

#[derive(Debug, Clone, new)]
pub struct ChartServiceImpl;

impl ChartServiceImpl {
    #[doc = "Helper function to determine the Y-axis upper bound with padding"]
    fn calculate_y_max(&self, values: &[i64]) -> i64 {
        if values.is_empty() {
            return 100;
        }

        let max_val: i64 = *values.iter().max().unwrap_or(&100);
        let padding: i64 = ((max_val as f64) * 0.1).max(1.0) as i64;

        max_val + padding
    }
}

#[doc = "천 단위 구분 기호를 붙여주는 함수"]
fn format_with_commas(value: i64) -> String {
    let s: String = value.to_string();
    let mut result: String = String::new();
    let mut count: i32 = 0;
    for c in s.chars().rev() {
        if c.is_ascii_digit() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            count += 1;
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[async_trait]
impl ChartService for ChartServiceImpl {
    #[doc = r#"
        그룹별 집계 결과를 막대/카운트/히스토그램 차트로 렌더링해주는 함수.

        1. 라벨/값 길이와 공백 여부를 검증
        2. 출력 경로의 부모 디렉토리가 없으면 생성
        3. plotters (동기 API) 렌더링을 `spawn_blocking` 으로 감싸 실행
        4. 차트 종류에 따라 막대 간격과 값 라벨 표시 여부를 달리함

        동일 경로의 기존 파일은 덮어쓴다.
    "#]
    #[allow(clippy::too_many_arguments)]
    async fn render_group_chart(
        &self,
        chart_kind: ChartKind,
        title: &str,
        x_labels: Vec<String>,
        y_values: Vec<i64>,
        output_path: &std::path::Path,
        x_desc: &str,
        y_desc: &str,
        canvas_size: (u32, u32),
    ) -> anyhow::Result<()> {
        if x_labels.len() != y_values.len() {
            return Err(anyhow!(
                "[ChartServiceImpl->render_group_chart] X labels and Y data must have the same length: {} vs {}",
                x_labels.len(),
                y_values.len()
            ));
        }

        if x_labels.is_empty() {
            return Err(anyhow!(
                "[ChartServiceImpl->render_group_chart] Cannot generate chart with empty data"
            ));
        }

        /* Create parent directory if it doesn't exist */
        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let output_path_str: String = output_path.to_string_lossy().to_string();
        let title: String = title.to_string();
        let x_desc: String = x_desc.to_string();
        let y_desc: String = y_desc.to_string();

        /* Calculate the Y bound before moving into the closure */
        let y_max: i64 = self.calculate_y_max(&y_values);

        let handle: tokio::task::JoinHandle<Result<(), anyhow::Error>> =
            tokio::task::spawn_blocking(move || {
                /* ---- 여기부터는 동기 코드 (plotters) ---- */
                let root =
                    BitMapBackend::new(&output_path_str, canvas_size).into_drawing_area();
                root.fill(&RGBColor(20, 20, 20))?;

                let mut chart = ChartBuilder::on(&root)
                    .caption(
                        &title,
                        ("sans-serif", 32)
                            .into_font()
                            .color(&RGBColor(240, 240, 240)),
                    )
                    .margin(30)
                    .x_label_area_size(70)
                    .y_label_area_size(90)
                    .build_cartesian_2d((0..x_labels.len()).into_segmented(), 0i64..y_max)?;

                let bar_color: RGBColor = RGBColor(0, 191, 255);
                let grid_color: RGBColor = RGBColor(60, 60, 60);
                let text_color: RGBColor = RGBColor(200, 200, 200);

                chart
                    .configure_mesh()
                    .x_desc(&x_desc)
                    .y_desc(&y_desc)
                    .x_labels(x_labels.len())
                    .y_labels(10)
                    .disable_x_mesh()
                    .axis_style(ShapeStyle::from(&RGBColor(120, 120, 120)).stroke_width(2))
                    .light_line_style(ShapeStyle::from(&grid_color).stroke_width(1))
                    .bold_line_style(ShapeStyle::from(&grid_color).stroke_width(2))
                    .x_label_style(("sans-serif", 16).into_font().color(&text_color))
                    .y_label_style(("sans-serif", 22).into_font().color(&text_color))
                    .x_label_formatter(&|x| match x {
                        SegmentValue::CenterOf(i) | SegmentValue::Exact(i)
                            if *i < x_labels.len() =>
                        {
                            x_labels[*i].clone()
                        }
                        _ => String::new(),
                    })
                    .y_label_formatter(&|y| format_with_commas(*y))
                    .draw()?;

                chart.draw_series(
                    Histogram::vertical(&chart)
                        .style(bar_color.filled())
                        .margin(get_bar_margin(chart_kind))
                        .data(y_values.iter().enumerate().map(|(i, &v)| (i, v))),
                )?;

                /* 카운트 차트는 막대 위에 값 라벨을 표기한다 */
                if chart_kind == ChartKind::CountPlot {
                    chart.draw_series(y_values.iter().enumerate().map(|(i, &v)| {
                        Text::new(
                            format_with_commas(v),
                            (SegmentValue::CenterOf(i), v),
                            ("sans-serif", 16).into_font().color(&text_color),
                        )
                    }))?;
                }

                root.present()?;
                Ok(())
            });

        let drawing_result: Result<(), anyhow::Error> = handle.await.context(
            "[ChartServiceImpl->render_group_chart] blocking task join failed (panic/cancelled)",
        )?;

        drawing_result.context("[ChartServiceImpl->render_group_chart] drawing/present failed")?;

        info!("Chart generated successfully: {:?}", output_path);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn y_max_has_padding_above_largest_value() {
        let service = ChartServiceImpl::new();

        assert_eq!(service.calculate_y_max(&[]), 100);
        assert!(service.calculate_y_max(&[1000, 500]) > 1000);
        assert_eq!(service.calculate_y_max(&[0]), 1);
    }

    #[test]
    fn format_with_commas_groups_digits() {
        assert_eq!(format_with_commas(0), "0");
        assert_eq!(format_with_commas(999), "999");
        assert_eq!(format_with_commas(1000), "1,000");
        assert_eq!(format_with_commas(1234567), "1,234,567");
    }

    #[tokio::test]
    async fn render_rejects_mismatched_lengths() {
        let service = ChartServiceImpl::new();
        let path: PathBuf = env::temp_dir().join("chart_mismatch.png");

        let result = service
            .render_group_chart(
                ChartKind::Bar,
                "test",
                vec!["a".to_string()],
                vec![1, 2],
                &path,
                "x",
                "y",
                (500, 500),
            )
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn render_rejects_empty_data() {
        let service = ChartServiceImpl::new();
        let path: PathBuf = env::temp_dir().join("chart_empty.png");

        let result = service
            .render_group_chart(ChartKind::Bar, "test", vec![], vec![], &path, "x", "y", (500, 500))
            .await;

        assert!(result.is_err());
    }
}
