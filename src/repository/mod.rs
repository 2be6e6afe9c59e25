pub mod csv_sales_repository_impl;
