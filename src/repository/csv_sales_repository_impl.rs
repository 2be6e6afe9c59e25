use crate::common::*;

use crate::model::sales::sales_record::*;

use crate::traits::repository_traits::sales_repository::*;

/* 원본 데이터에 섞여 들어오는 무관/공백 컬럼. 헤더에 반드시 존재해야 하며 정제 시 버려진다 */
const DROPPED_COLUMNS: [&str; 2] = ["Status", "unnamed1"];

#[derive(Debug, Clone, new)]
pub struct CsvSalesRepositoryImpl {
    csv_file_path: String,
}

#[doc = r#"
    CSV 한 행을 정제 전 상태로 받아주는 타입.

    모든 필드가 Option 으로 선언되어 있어 결측값이 있는 행도 일단 파싱은 되며,
    정제 단계(`clean_row`)에서 결측 여부를 판단해 버린다. `amount` 는 소수값으로
    들어올 수 있으므로 f64 로 받은 뒤 정수로 절삭한다.
"#]
#[derive(Debug, Deserialize)]
struct RawSalesRow {
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Age Group")]
    age_group: Option<String>,
    #[serde(rename = "State")]
    state: Option<String>,
    #[serde(rename = "Marital_Status")]
    marital_status: Option<u8>,
    #[serde(rename = "Occupation")]
    occupation: Option<String>,
    #[serde(rename = "Product_Category")]
    product_category: Option<String>,
    #[serde(rename = "Product_ID")]
    product_id: Option<String>,
    #[serde(rename = "Orders")]
    orders: Option<u64>,
    #[serde(rename = "Amount")]
    amount: Option<f64>,
}

impl CsvSalesRepositoryImpl {
    #[doc = r#"
        CSV 원본 바이트를 문자열로 디코딩해주는 함수.

        UTF-8(BOM 허용)을 먼저 시도하고, 디코딩에 실패하면 WINDOWS-1252 로 재시도한다.
        WINDOWS-1252 디코딩은 실패하지 않으므로 이 함수는 항상 문자열을 반환한다.
    "#]
    fn decode_csv_bytes(&self, raw_bytes: &[u8]) -> String {
        let without_bom: &[u8] = raw_bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(raw_bytes);

        match std::str::from_utf8(without_bom) {
            Ok(text) => text.to_string(),
            Err(_) => {
                warn!(
                    "[CsvSalesRepositoryImpl->decode_csv_bytes] '{}' is not valid UTF-8. Falling back to WINDOWS-1252",
                    self.csv_file_path
                );
                let (decoded, _, _) = WINDOWS_1252.decode(without_bom);
                decoded.into_owned()
            }
        }
    }

    #[doc = r#"
        정제 시 버려지는 컬럼들이 헤더에 실제로 존재하는지 검증해주는 함수.

        원본 데이터 계약상 `Status`, `unnamed1` 두 컬럼은 항상 존재해야 하며,
        없으면 기동 시점의 치명적 오류로 처리한다.
    "#]
    fn verify_dropped_columns(&self, headers: &csv::StringRecord) -> anyhow::Result<()> {
        for column in DROPPED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(anyhow!(
                    "[CsvSalesRepositoryImpl->verify_dropped_columns] Expected column '{}' is missing from '{}'",
                    column,
                    self.csv_file_path
                ));
            }
        }
        Ok(())
    }

    #[doc = r#"
        정제 전 행을 정제된 `SalesRecord` 로 변환해주는 함수.

        모델링된 컬럼 중 하나라도 결측(None 또는 공백 문자열)이면 None 을 반환하여
        해당 행을 버린다. `amount` 는 소수부를 버리고 정수로 절삭한다(반올림 아님).
    "#]
    fn clean_row(raw_row: RawSalesRow) -> Option<SalesRecord> {
        let gender: String = non_blank(raw_row.gender)?;
        let age_group: String = non_blank(raw_row.age_group)?;
        let state: String = non_blank(raw_row.state)?;
        let marital_status: u8 = raw_row.marital_status?;
        let occupation: String = non_blank(raw_row.occupation)?;
        let product_category: String = non_blank(raw_row.product_category)?;
        let product_id: String = non_blank(raw_row.product_id)?;
        let orders: u64 = raw_row.orders?;
        let amount: i64 = raw_row.amount? as i64;

        Some(SalesRecord::new(
            gender,
            age_group,
            state,
            marital_status,
            occupation,
            product_category,
            product_id,
            orders,
            amount,
        ))
    }
}

#[doc = "공백만 있는 값을 결측으로 취급해주는 헬퍼 함수"]
fn non_blank(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.trim().is_empty())
}

#[async_trait]
impl SalesRepository for CsvSalesRepositoryImpl {
    #[doc = r#"
        CSV 원본을 읽어 정제된 데이터셋을 만들어주는 함수.

        1. 파일 바이트를 읽는다 (읽기 실패는 치명적 오류)
        2. UTF-8 → WINDOWS-1252 순서로 디코딩
        3. 버려질 컬럼(`Status`, `unnamed1`)의 존재를 검증
        4. 각 행을 파싱하고, 결측값이 있는 행은 제거
        5. `Amount` 를 정수로 절삭

        # Returns
        * `anyhow::Result<Vec<SalesRecord>>` - 정제된 판매 레코드 목록
    "#]
    async fn load_dataset(&self) -> anyhow::Result<Vec<SalesRecord>> {
        let raw_bytes: Vec<u8> = tokio::fs::read(&self.csv_file_path)
            .await
            .with_context(|| {
                format!(
                    "[CsvSalesRepositoryImpl->load_dataset] Failed to read '{}'",
                    self.csv_file_path
                )
            })?;

        let decoded: String = self.decode_csv_bytes(&raw_bytes);

        let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(decoded.as_bytes());

        let headers: csv::StringRecord = reader.headers()?.clone();
        self.verify_dropped_columns(&headers)?;

        let mut dataset: Vec<SalesRecord> = Vec::new();
        let mut dropped_rows: usize = 0;

        for row in reader.deserialize::<RawSalesRow>() {
            let raw_row: RawSalesRow = row.map_err(|e| {
                anyhow!(
                    "[CsvSalesRepositoryImpl->load_dataset] Malformed row in '{}': {}",
                    self.csv_file_path,
                    e
                )
            })?;

            match Self::clean_row(raw_row) {
                Some(record) => dataset.push(record),
                None => dropped_rows += 1,
            }
        }

        if dataset.is_empty() {
            warn!(
                "[CsvSalesRepositoryImpl->load_dataset] '{}' produced an empty dataset",
                self.csv_file_path
            );
        }

        info!(
            "Dataset prepared: {} records loaded, {} rows dropped for missing values",
            dataset.len(),
            dropped_rows
        );

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Product_ID,Gender,Age Group,Marital_Status,State,Occupation,Product_Category,Orders,Amount,Status,unnamed1\n";

    fn write_temp_csv(name: &str, content: &[u8]) -> String {
        let path: PathBuf = env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn load_dataset_cleans_rows_and_truncates_amount() {
        let mut csv_content = String::from(HEADER);
        csv_content.push_str("P001,M,26-35,0,Karnataka,IT,Electronics,2,23952.75,,\n");
        csv_content.push_str("P002,F,,1,Kerala,Aviation,Food,1,5000.0,,\n");
        csv_content.push_str("P003,F,18-25,1,Kerala,Aviation,Food,3,1999.0,,\n");

        let path = write_temp_csv("sales_repo_clean.csv", csv_content.as_bytes());
        let repository = CsvSalesRepositoryImpl::new(path);

        let dataset = repository.load_dataset().await.unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].product_id, "P001");
        assert_eq!(dataset[0].amount, 23952);
        assert_eq!(dataset[1].gender, "F");
    }

    #[tokio::test]
    async fn load_dataset_fails_when_dropped_column_is_absent() {
        let csv_content =
            "Product_ID,Gender,Age Group,Marital_Status,State,Occupation,Product_Category,Orders,Amount,Status\n";

        let path = write_temp_csv("sales_repo_missing_col.csv", csv_content.as_bytes());
        let repository = CsvSalesRepositoryImpl::new(path);

        let result = repository.load_dataset().await;

        assert!(result.is_err());
        assert!(format!("{:?}", result.unwrap_err()).contains("unnamed1"));
    }

    #[tokio::test]
    async fn load_dataset_decodes_windows_1252_fallback() {
        let mut csv_content: Vec<u8> = HEADER.as_bytes().to_vec();
        /* 0xE9 = 'é' (WINDOWS-1252), 단독으로는 유효한 UTF-8 이 아니다 */
        csv_content.extend_from_slice(b"P001,M,26-35,0,K\xE9rala,IT,Electronics,2,100.0,,\n");

        let path = write_temp_csv("sales_repo_enc.csv", &csv_content);
        let repository = CsvSalesRepositoryImpl::new(path);

        let dataset = repository.load_dataset().await.unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].state, "K\u{e9}rala");
    }

    #[tokio::test]
    async fn load_dataset_fails_for_missing_file() {
        let repository = CsvSalesRepositoryImpl::new("no_such_file.csv".to_string());
        assert!(repository.load_dataset().await.is_err());
    }
}
