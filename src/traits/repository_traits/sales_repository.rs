use crate::common::*;

use crate::model::sales::sales_record::*;

#[async_trait]
pub trait SalesRepository {
    async fn load_dataset(&self) -> anyhow::Result<Vec<SalesRecord>>;
}
