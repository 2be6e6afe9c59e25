use crate::common::*;

#[doc = r#"
    그룹핑 키 하나에 대한 합산 결과를 담는 DTO

    # Fields
    * `key` - 그룹핑 키 값 (예: 주 이름, 상품 ID)
    * `total` - 해당 그룹의 합산값 (Amount 합계 또는 Orders 합계)
"#]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters, new)]
#[getset(get = "pub", set = "pub")]
pub struct GroupTotal {
    pub key: String,
    pub total: i64,
}

impl GroupTotal {
    #[doc = "{키컬럼: 키, 값컬럼: 합계} 형태의 JSON 오브젝트로 변환해주는 함수"]
    pub fn to_record_json(&self, key_column: &str, value_column: &str) -> Value {
        let mut record: serde_json::Map<String, Value> = serde_json::Map::new();
        record.insert(key_column.to_string(), Value::String(self.key.clone()));
        record.insert(value_column.to_string(), Value::from(self.total));
        Value::Object(record)
    }
}

#[doc = "합산 결과 목록을 record 형태의 JSON 배열로 변환해주는 함수"]
pub fn group_totals_to_records(
    totals: &[GroupTotal],
    key_column: &str,
    value_column: &str,
) -> Value {
    Value::Array(
        totals
            .iter()
            .map(|t| t.to_record_json(key_column, value_column))
            .collect(),
    )
}
