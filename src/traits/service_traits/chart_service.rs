use crate::common::*;

use crate::enums::chart_kind::*;

#[async_trait]
pub trait ChartService {
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
    ) -> anyhow::Result<()>;
}
