use crate::common::*;

use crate::dto::group_total::*;

use crate::model::sales::sales_record::*;

pub trait AggregationService {
    fn record_count(&self) -> usize;

    fn count_by<K>(&self, key_fn: K) -> BTreeMap<String, u64>
    where
        K: Fn(&SalesRecord) -> String;

    fn sum_by<K, V>(&self, key_fn: K, value_fn: V) -> Vec<GroupTotal>
    where
        K: Fn(&SalesRecord) -> String,
        V: Fn(&SalesRecord) -> i64;

    fn top_n(&self, totals: Vec<GroupTotal>, limit: usize) -> Vec<GroupTotal>;
}
