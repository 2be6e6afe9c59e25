use crate::common::*;

use crate::utils_modules::io_utils::*;

use crate::dto::{api_error::*, group_total::*, plot_response::*};

use crate::enums::chart_kind::*;

use crate::traits::service_traits::{aggregation_service::*, chart_service::*};

/* top-N 계열 핸들러가 공통으로 사용하는 그룹 상한 */
const TOP_GROUP_LIMIT: usize = 10;

#[derive(Debug, new)]
pub struct MainController<A: AggregationService, C: ChartService> {
    aggregation_service: A,
    chart_service: C,
    plot_output_dir: PathBuf,
}

impl<A, C> MainController<A, C>
where
    A: AggregationService + Send + Sync,
    C: ChartService + Send + Sync,
{
    #[doc = r#"
        count 계열 핸들러의 공통 마무리 로직.

        1. 카운트 맵을 라벨/값 축으로 분리
        2. 차트를 고정 경로에 렌더링 (기존 파일은 덮어씀)
        3. key→count 매핑을 summary 로 하는 응답을 구성
    "#]
    async fn render_count_summary(
        &self,
        counts: BTreeMap<String, u64>,
        chart_kind: ChartKind,
        title: &str,
        file_name: &str,
        x_desc: &str,
        canvas_size: (u32, u32),
    ) -> Result<PlotResponse, ApiError> {
        let x_labels: Vec<String> = counts.keys().cloned().collect();
        let y_values: Vec<i64> = counts.values().map(|&v| v as i64).collect();

        let plot_path: PathBuf = self.plot_output_dir.join(file_name);

        self.chart_service
            .render_group_chart(
                chart_kind,
                title,
                x_labels,
                y_values,
                &plot_path,
                x_desc,
                "Count",
                canvas_size,
            )
            .await?;

        Ok(PlotResponse::new(
            convert_json_from_struct(&counts)?,
            format!("/plots/{}", file_name),
        ))
    }

    #[doc = r#"
        sum 계열 핸들러의 공통 마무리 로직.

        합산 결과(내림차순 정렬됨)를 막대 차트로 렌더링하고,
        {키컬럼: 키, 값컬럼: 합계} record 배열을 summary 로 하는 응답을 구성한다.
    "#]
    async fn render_sum_summary(
        &self,
        totals: Vec<GroupTotal>,
        title: &str,
        file_name: &str,
        key_column: &str,
        value_column: &str,
        canvas_size: (u32, u32),
    ) -> Result<PlotResponse, ApiError> {
        let x_labels: Vec<String> = totals.iter().map(|t| t.key.clone()).collect();
        let y_values: Vec<i64> = totals.iter().map(|t| t.total).collect();

        let plot_path: PathBuf = self.plot_output_dir.join(file_name);

        self.chart_service
            .render_group_chart(
                ChartKind::Bar,
                title,
                x_labels,
                y_values,
                &plot_path,
                key_column,
                value_column,
                canvas_size,
            )
            .await?;

        Ok(PlotResponse::new(
            group_totals_to_records(&totals, key_column, value_column),
            format!("/plots/{}", file_name),
        ))
    }

    #[doc = "성별 인원수 집계"]
    pub async fn plot_gender_count(&self) -> Result<PlotResponse, ApiError> {
        let counts: BTreeMap<String, u64> =
            self.aggregation_service.count_by(|r| r.gender.clone());

        self.render_count_summary(
            counts,
            ChartKind::CountPlot,
            "Count of Individuals by Gender",
            "gender_count.png",
            "Gender",
            (500, 500),
        )
        .await
    }

    #[doc = "성별 매출액 합계"]
    pub async fn plot_gender_sales(&self) -> Result<PlotResponse, ApiError> {
        let totals: Vec<GroupTotal> = self
            .aggregation_service
            .sum_by(|r| r.gender.clone(), |r| r.amount);

        self.render_sum_summary(
            totals,
            "Total Sales Amount by Gender",
            "gender_sales.png",
            "Gender",
            "Amount",
            (500, 500),
        )
        .await
    }

    #[doc = "연령대별 매출액 합계"]
    pub async fn plot_age_group_sales(&self) -> Result<PlotResponse, ApiError> {
        let totals: Vec<GroupTotal> = self
            .aggregation_service
            .sum_by(|r| r.age_group.clone(), |r| r.amount);

        self.render_sum_summary(
            totals,
            "Total Sales Amount by Age Group",
            "age_group_sales.png",
            "Age Group",
            "Amount",
            (600, 600),
        )
        .await
    }

    #[doc = "주문 건수 상위 10개 주"]
    pub async fn plot_state_orders(&self) -> Result<PlotResponse, ApiError> {
        let totals: Vec<GroupTotal> = self
            .aggregation_service
            .sum_by(|r| r.state.clone(), |r| r.orders as i64);
        let top_totals: Vec<GroupTotal> =
            self.aggregation_service.top_n(totals, TOP_GROUP_LIMIT);

        self.render_sum_summary(
            top_totals,
            "Total Number of Orders From States",
            "state_orders.png",
            "State",
            "Orders",
            (1600, 500),
        )
        .await
    }

    #[doc = "매출액 상위 10개 주"]
    pub async fn plot_state_sales(&self) -> Result<PlotResponse, ApiError> {
        let totals: Vec<GroupTotal> = self
            .aggregation_service
            .sum_by(|r| r.state.clone(), |r| r.amount);
        let top_totals: Vec<GroupTotal> =
            self.aggregation_service.top_n(totals, TOP_GROUP_LIMIT);

        self.render_sum_summary(
            top_totals,
            "Total Sales Amount by States",
            "state_sales.png",
            "State",
            "Amount",
            (1600, 500),
        )
        .await
    }

    #[doc = "결혼 여부 분포"]
    pub async fn plot_marital_status(&self) -> Result<PlotResponse, ApiError> {
        let counts: BTreeMap<String, u64> = self
            .aggregation_service
            .count_by(|r| r.marital_status.to_string());

        self.render_count_summary(
            counts,
            ChartKind::CountPlot,
            "Distribution of Marital Status Among Customers",
            "marital_status.png",
            "Marital_Status",
            (600, 600),
        )
        .await
    }

    #[doc = "직업군 분포"]
    pub async fn plot_occupation(&self) -> Result<PlotResponse, ApiError> {
        let counts: BTreeMap<String, u64> =
            self.aggregation_service.count_by(|r| r.occupation.clone());

        self.render_count_summary(
            counts,
            ChartKind::CountPlot,
            "Distribution of Customers by Occupation",
            "occupation.png",
            "Occupation",
            (600, 600),
        )
        .await
    }

    #[doc = "상품 카테고리 분포"]
    pub async fn plot_product_category(&self) -> Result<PlotResponse, ApiError> {
        let counts: BTreeMap<String, u64> = self
            .aggregation_service
            .count_by(|r| r.product_category.clone());

        self.render_count_summary(
            counts,
            ChartKind::CountPlot,
            "Distribution of Product Categories",
            "product_category.png",
            "Product_Category",
            (1200, 600),
        )
        .await
    }

    #[doc = "주문 건수 상위 10개 상품 카테고리"]
    pub async fn plot_top_products(&self) -> Result<PlotResponse, ApiError> {
        let totals: Vec<GroupTotal> = self
            .aggregation_service
            .sum_by(|r| r.product_category.clone(), |r| r.orders as i64);
        let top_totals: Vec<GroupTotal> =
            self.aggregation_service.top_n(totals, TOP_GROUP_LIMIT);

        self.render_sum_summary(
            top_totals,
            "Top 10 Products by Total Orders",
            "top_products.png",
            "Product_Category",
            "Orders",
            (2000, 500),
        )
        .await
    }

    #[doc = "주문 건수 상위 10개 상품 ID"]
    pub async fn plot_most_ordered_products(&self) -> Result<PlotResponse, ApiError> {
        let totals: Vec<GroupTotal> = self
            .aggregation_service
            .sum_by(|r| r.product_id.clone(), |r| r.orders as i64);
        let top_totals: Vec<GroupTotal> =
            self.aggregation_service.top_n(totals, TOP_GROUP_LIMIT);

        self.render_sum_summary(
            top_totals,
            "Top 10 Most Ordered Products by ID",
            "most_ordered_products.png",
            "Product_ID",
            "Orders",
            (1200, 700),
        )
        .await
    }

    #[doc = "주별 레코드 분포 (히스토그램)"]
    pub async fn plot_state_distribution(&self) -> Result<PlotResponse, ApiError> {
        let counts: BTreeMap<String, u64> =
            self.aggregation_service.count_by(|r| r.state.clone());

        self.render_count_summary(
            counts,
            ChartKind::Histogram,
            "Distribution of Orders by State",
            "state_distribution.png",
            "State",
            (2000, 1000),
        )
        .await
    }

    #[doc = r#"
        렌더링된 차트 파일을 조회해주는 함수.

        출력 디렉토리 바깥을 가리키는 파일명(경로 구분자, `..`)은 존재하지 않는
        파일과 동일하게 취급한다. 파일이 없으면 404 로 응답한다.
    "#]
    pub async fn get_plot_file(&self, file_name: &str) -> Result<Response, ApiError> {
        if file_name.contains(['/', '\\']) || file_name.contains("..") {
            return Err(ApiError::NotFound(file_name.to_string()));
        }

        let file_path: PathBuf = self.plot_output_dir.join(file_name);

        match tokio::fs::read(&file_path).await {
            Ok(bytes) => {
                Ok(([(header::CONTENT_TYPE, "image/png")], bytes).into_response())
            }
            Err(_) => Err(ApiError::NotFound(file_name.to_string())),
        }
    }
}

#[doc = "루트 경로의 환영 메시지 핸들러"]
async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Diwali Sales Analysis API!" }))
}

async fn gender_count_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_gender_count().await.map(Json)
}

async fn gender_sales_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_gender_sales().await.map(Json)
}

async fn age_group_sales_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_age_group_sales().await.map(Json)
}

async fn state_orders_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_state_orders().await.map(Json)
}

async fn state_sales_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_state_sales().await.map(Json)
}

async fn marital_status_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_marital_status().await.map(Json)
}

async fn occupation_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_occupation().await.map(Json)
}

async fn product_category_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_product_category().await.map(Json)
}

async fn top_products_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_top_products().await.map(Json)
}

async fn most_ordered_products_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_most_ordered_products().await.map(Json)
}

async fn state_distribution_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
) -> Result<Json<PlotResponse>, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.plot_state_distribution().await.map(Json)
}

#[doc = "차트 파일 조회 핸들러"]
async fn get_plot_handler<A, C>(
    State(controller): State<Arc<MainController<A, C>>>,
    UrlPath(file_name): UrlPath<String>,
) -> Result<Response, ApiError>
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    controller.get_plot_file(&file_name).await
}

#[doc = r#"
    전체 라우팅 테이블을 구성해주는 함수.

    모든 집계 엔드포인트는 GET 이며 파라미터를 받지 않는다. 컨트롤러는 Arc 로
    공유되어 각 요청 핸들러에 주입된다.
"#]
pub fn build_app_router<A, C>(controller: Arc<MainController<A, C>>) -> Router
where
    A: AggregationService + Send + Sync + 'static,
    C: ChartService + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/plot/gender-count", get(gender_count_handler::<A, C>))
        .route("/plot/gender-sales", get(gender_sales_handler::<A, C>))
        .route("/plot/age-group-sales", get(age_group_sales_handler::<A, C>))
        .route("/plot/state-orders", get(state_orders_handler::<A, C>))
        .route("/plot/state-sales", get(state_sales_handler::<A, C>))
        .route("/plot/marital-status", get(marital_status_handler::<A, C>))
        .route("/plot/occupation", get(occupation_handler::<A, C>))
        .route("/plot/product-category", get(product_category_handler::<A, C>))
        .route("/plot/top-products", get(top_products_handler::<A, C>))
        .route(
            "/plot/most-ordered-products",
            get(most_ordered_products_handler::<A, C>),
        )
        .route(
            "/plot/state-distribution",
            get(state_distribution_handler::<A, C>),
        )
        .route("/plots/{filename}", get(get_plot_handler::<A, C>))
        .with_state(controller)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::sales::sales_record::*;
    use crate::service::{aggregation_service_impl::*, chart_service_impl::*};

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router(plot_dir: PathBuf) -> Router {
        let dataset: Vec<SalesRecord> = vec![SalesRecord::new(
            "M".to_string(),
            "26-35".to_string(),
            "Karnataka".to_string(),
            0,
            "IT".to_string(),
            "Electronics".to_string(),
            "P001".to_string(),
            2,
            100,
        )];

        let controller = Arc::new(MainController::new(
            AggregationServiceImpl::new(Arc::new(dataset)),
            ChartServiceImpl::new(),
            plot_dir,
        ));

        build_app_router(controller)
    }

    #[tokio::test]
    async fn root_returns_welcome_message() {
        let app: Router = test_router(env::temp_dir().join("plots_root_test"));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json_body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json_body["message"],
            "Welcome to the Diwali Sales Analysis API!"
        );
    }

    #[tokio::test]
    async fn missing_plot_file_returns_not_found() {
        let app: Router = test_router(env::temp_dir().join("plots_missing_test"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/plots/nonexistent.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json_body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json_body["error"], "File not found");
    }

    #[tokio::test]
    async fn traversal_file_names_are_treated_as_not_found() {
        let app: Router = test_router(env::temp_dir().join("plots_traversal_test"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/plots/..%2Fsecret.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn existing_plot_file_is_served_as_png() {
        let plot_dir: PathBuf = env::temp_dir().join("plots_serve_test");
        fs::create_dir_all(&plot_dir).unwrap();
        fs::write(plot_dir.join("gender_count.png"), b"fake-png-bytes").unwrap();

        let app: Router = test_router(plot_dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/plots/gender_count.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/png"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"fake-png-bytes");
    }
}
