pub mod dataset_config;
pub mod system_config;
pub mod total_config;
