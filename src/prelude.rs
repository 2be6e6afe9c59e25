pub use std::{
    collections::BTreeMap,
    env, fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

pub use anyhow::{anyhow, Context};
pub use async_trait::async_trait;
pub use derive_new::new;
pub use dotenv::dotenv;
pub use getset::{Getters, Setters};
pub use log::{error, info, warn};
pub use serde::{de::DeserializeOwned, Deserialize, Serialize};
pub use serde_json::{json, Value};
