pub mod api_error;
pub mod group_total;
pub mod plot_response;
