use crate::common::*;

#[doc = r#"
    정제가 끝난 판매 레코드 하나를 표현하는 타입.

    핸들러가 참조할 수 있는 스키마는 이 구조체가 전부이며, 로드 시점에 한 번
    검증된다. 결측값이 있는 행은 로드 단계에서 이미 제거되었으므로 모든 필드는
    항상 채워져 있고, `amount` 는 소수부를 버린 정수값이다.

    # Fields
    * `gender` - 구매자 성별
    * `age_group` - 연령대 구간
    * `state` - 거주 지역(주)
    * `marital_status` - 결혼 여부 (0/1)
    * `occupation` - 직업군
    * `product_category` - 상품 카테고리
    * `product_id` - 상품 식별자
    * `orders` - 주문 건수
    * `amount` - 구매 금액 (정수 절삭)
"#]
#[derive(Debug, Clone, Serialize, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct SalesRecord {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Age Group")]
    pub age_group: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Marital_Status")]
    pub marital_status: u8,
    #[serde(rename = "Occupation")]
    pub occupation: String,
    #[serde(rename = "Product_Category")]
    pub product_category: String,
    #[serde(rename = "Product_ID")]
    pub product_id: String,
    #[serde(rename = "Orders")]
    pub orders: u64,
    #[serde(rename = "Amount")]
    pub amount: i64,
}
