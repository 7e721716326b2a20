use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct PropertyDataset {
    pub id: String,
    pub src: DataSource,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(
    untagged,
    expecting = "Invalid or missing data source. Specify either a remote source with `url:` and `headers:` or a local path with `path:` under `src:` of the dataset")
]
pub enum DataSource {
    URL {
        url: Url,
        #[serde(default)]
        headers: HashMap<String, String>,
    },
    File {
        path: String
    }
}
