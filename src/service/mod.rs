pub mod aggregation_service_impl;
pub mod chart_service_impl;
