/*
Author      : Seunghwan Shin
Create date : 2025-10-00
Description : Diwali sales analysis HTTP API

History     : 2025-10-00 Seunghwan Shin       # [v.1.0.0] first create
*/

mod common;
mod external_deps;
mod prelude;
use common::*;

mod repository;
use repository::csv_sales_repository_impl::*;

mod env_configuration;

mod traits;
use traits::repository_traits::sales_repository::*;

mod model;
use model::configs::{dataset_config::*, total_config::*};
use model::sales::sales_record::*;

mod dto;

mod enums;

mod utils_modules;
use utils_modules::logger_utils::*;

mod service;
use service::{aggregation_service_impl::*, chart_service_impl::*};

mod controller;
use controller::main_controller::*;

#[tokio::main]
async fn main() {
    /* 전역로거 설정 및 초기 설정 */
    dotenv().ok();
    set_global_logger();

    info!("Sales analysis API start!");

    let dataset_config: &DatasetConfig = get_dataset_config_info();

    /* 1. 데이터셋 준비 - 실패 시 서비스는 기동하지 않는다 */
    let sales_repository: CsvSalesRepositoryImpl =
        CsvSalesRepositoryImpl::new(dataset_config.csv_file_path().to_string());

    let dataset: Vec<SalesRecord> = sales_repository.load_dataset().await.unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while preparing the sales dataset.";
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    /* 2. 차트 출력 디렉토리 생성 */
    let plot_output_dir: PathBuf = PathBuf::from(dataset_config.plot_output_dir());
    fs::create_dir_all(&plot_output_dir).unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while creating the plot output directory.";
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    /* 3. 의존 주입 */
    let aggregation_service: AggregationServiceImpl =
        AggregationServiceImpl::new(Arc::new(dataset));
    let chart_service: ChartServiceImpl = ChartServiceImpl::new();

    let main_controller: Arc<MainController<AggregationServiceImpl, ChartServiceImpl>> =
        Arc::new(MainController::new(
            aggregation_service,
            chart_service,
            plot_output_dir,
        ));

    /* 4. HTTP 서버 기동 */
    let app: Router = build_app_router(main_controller);

    let listen_addr: String = format!(
        "{}:{}",
        get_system_config_info().listen_host(),
        get_system_config_info().listen_port()
    );

    let listener: TcpListener = TcpListener::bind(&listen_addr).await.unwrap_or_else(|e| {
        let err_msg: &str = "[main] An issue occurred while binding the listen address.";
        error!("{} {:?}", err_msg, e);
        panic!("{} {:?}", err_msg, e)
    });

    info!("Listening on {}", listen_addr);

    axum::serve(listener, app).await.unwrap_or_else(|e| {
        error!("{:?}", e);
        panic!("{:?}", e)
    });
}
