use crate::common::*;

#[derive(Debug, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
pub struct DatasetConfig {
    pub csv_file_path: String,
    pub plot_output_dir: String,
}
