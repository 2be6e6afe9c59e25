#[doc = r#"
    집계 결과를 시각화할 때 사용하는 차트 종류.

    * `Bar` - 일반 막대 차트
    * `CountPlot` - 막대 위에 값 라벨이 붙는 카운트 차트
    * `Histogram` - 막대 사이 간격이 없는 분포 차트
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    CountPlot,
    Histogram,
}

#[doc = "차트 종류별 막대 사이 간격(픽셀)을 반환해주는 함수"]
pub fn get_bar_margin(chart_kind: ChartKind) -> u32 {
    match chart_kind {
        ChartKind::Bar => 12,
        ChartKind::CountPlot => 12,
        ChartKind::Histogram => 0,
    }
}
