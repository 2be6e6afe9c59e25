pub mod sales_record;
