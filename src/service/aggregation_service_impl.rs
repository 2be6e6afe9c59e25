use crate::common::*;

use crate::dto::group_total::*;

use crate::model::sales::sales_record::*;

use crate::traits::service_traits::aggregation_service::*;

#[derive(Debug, Clone, new)]
pub struct AggregationServiceImpl {
    dataset: Arc<Vec<SalesRecord>>,
}

impl AggregationService for AggregationServiceImpl {
    fn record_count(&self) -> usize {
        self.dataset.len()
    }

    #[doc = r#"
        데이터셋을 키 함수로 그룹핑하여 그룹별 레코드 수를 세주는 함수.

        결과는 키 오름차순으로 정렬된 맵이며, 모든 카운트의 합은 전체 레코드 수와 같다.
    "#]
    fn count_by<K>(&self, key_fn: K) -> BTreeMap<String, u64>
    where
        K: Fn(&SalesRecord) -> String,
    {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();

        for record in self.dataset.iter() {
            *counts.entry(key_fn(record)).or_insert(0) += 1;
        }

        counts
    }

    #[doc = r#"
        데이터셋을 키 함수로 그룹핑하고 값 함수를 합산해주는 함수.

        합산값 내림차순으로 정렬하며, 같은 값이면 키 오름차순으로 정렬해
        결과가 항상 결정적이 되도록 한다.
    "#]
    fn sum_by<K, V>(&self, key_fn: K, value_fn: V) -> Vec<GroupTotal>
    where
        K: Fn(&SalesRecord) -> String,
        V: Fn(&SalesRecord) -> i64,
    {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();

        for record in self.dataset.iter() {
            *totals.entry(key_fn(record)).or_insert(0) += value_fn(record);
        }

        let mut sorted_totals: Vec<GroupTotal> = totals
            .into_iter()
            .map(|(key, total)| GroupTotal::new(key, total))
            .collect();

        sorted_totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));

        sorted_totals
    }

    #[doc = "합산 결과 상위 `limit` 개 그룹만 남겨주는 함수"]
    fn top_n(&self, totals: Vec<GroupTotal>, limit: usize) -> Vec<GroupTotal> {
        totals.into_iter().take(limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(
        gender: &str,
        state: &str,
        product_id: &str,
        orders: u64,
        amount: i64,
    ) -> SalesRecord {
        SalesRecord::new(
            gender.to_string(),
            "26-35".to_string(),
            state.to_string(),
            0,
            "IT".to_string(),
            "Electronics".to_string(),
            product_id.to_string(),
            orders,
            amount,
        )
    }

    fn sample_service() -> AggregationServiceImpl {
        let dataset: Vec<SalesRecord> = vec![
            sample_record("M", "Karnataka", "P001", 2, 100),
            sample_record("F", "Kerala", "P002", 1, 400),
            sample_record("F", "Karnataka", "P001", 3, 250),
        ];
        AggregationServiceImpl::new(Arc::new(dataset))
    }

    #[test]
    fn count_by_gender_matches_expected_mapping() {
        let service = sample_service();

        let counts: BTreeMap<String, u64> = service.count_by(|r| r.gender.clone());

        assert_eq!(counts.get("F"), Some(&2));
        assert_eq!(counts.get("M"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn count_by_totals_equal_record_count() {
        let service = sample_service();

        let counts: BTreeMap<String, u64> = service.count_by(|r| r.state.clone());
        let total: u64 = counts.values().sum();

        assert_eq!(total as usize, service.record_count());
    }

    #[test]
    fn sum_by_gender_amount_sums_per_group() {
        let dataset: Vec<SalesRecord> = vec![
            sample_record("M", "Karnataka", "P001", 1, 100),
            sample_record("M", "Kerala", "P002", 1, 250),
        ];
        let service = AggregationServiceImpl::new(Arc::new(dataset));

        let totals: Vec<GroupTotal> = service.sum_by(|r| r.gender.clone(), |r| r.amount);

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0], GroupTotal::new("M".to_string(), 350));
    }

    #[test]
    fn sum_by_sorts_descending_with_key_tiebreak() {
        let dataset: Vec<SalesRecord> = vec![
            sample_record("M", "Kerala", "P001", 1, 100),
            sample_record("M", "Karnataka", "P002", 1, 100),
            sample_record("M", "Bihar", "P003", 1, 900),
        ];
        let service = AggregationServiceImpl::new(Arc::new(dataset));

        let totals: Vec<GroupTotal> = service.sum_by(|r| r.state.clone(), |r| r.amount);

        assert_eq!(totals[0].key, "Bihar");
        assert_eq!(totals[1].key, "Karnataka");
        assert_eq!(totals[2].key, "Kerala");
        assert!(totals[0].total >= totals[1].total);
    }

    #[test]
    fn top_n_truncates_without_changing_included_totals() {
        let dataset: Vec<SalesRecord> = (0..15)
            .map(|i| sample_record("M", &format!("State{:02}", i), "P001", 1, (i as i64) * 10))
            .collect();
        let service = AggregationServiceImpl::new(Arc::new(dataset));

        let all_totals: Vec<GroupTotal> = service.sum_by(|r| r.state.clone(), |r| r.amount);
        let top: Vec<GroupTotal> = service.top_n(all_totals.clone(), 10);

        assert_eq!(top.len(), 10);
        assert_eq!(top.as_slice(), &all_totals[..10]);
    }

    #[test]
    fn top_n_is_bounded_by_distinct_group_count() {
        let service = sample_service();

        let totals: Vec<GroupTotal> = service.sum_by(|r| r.state.clone(), |r| r.amount);
        let top: Vec<GroupTotal> = service.top_n(totals, 10);

        assert_eq!(top.len(), 2);
    }

    #[test]
    fn aggregations_are_idempotent() {
        let service = sample_service();

        let first = service.sum_by(|r| r.product_id.clone(), |r| r.orders as i64);
        let second = service.sum_by(|r| r.product_id.clone(), |r| r.orders as i64);

        assert_eq!(first, second);
        assert_eq!(
            service.count_by(|r| r.gender.clone()),
            service.count_by(|r| r.gender.clone())
        );
    }
}
