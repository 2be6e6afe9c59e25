use crate::common::*;

#[doc = r#"
    집계 핸들러의 공통 응답 DTO

    # Fields
    * `summary` - 집계 결과. count 계열은 key→count 매핑, sum 계열은 record 배열
    * `plot_url` - 렌더링된 차트 이미지의 조회 경로 (`/plots/<파일명>`)
"#]
#[derive(Debug, Clone, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct PlotResponse {
    pub summary: Value,
    pub plot_url: String,
}
