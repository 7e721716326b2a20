use common::types::dataset::{DataSource, PropertyDataset};
use log::info;
use std::fmt;
use std::fmt::Display;
use std::fs::{create_dir_all, File};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Download the property table if the config points at a URL, otherwise
/// hand the local path through untouched.
pub async fn fetch_dataset(
    dataset: PropertyDataset
) -> Result<FetchStepOutput, FetchError> {
    match dataset.clone().src {
        DataSource::URL { url, headers } => {
            let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis();
            let path_str = format!("./data/datasets/{}/imports/{}.csv", dataset.id, timestamp);
            let path = Path::new(&path_str);
            create_dir_all(path.parent().unwrap())?;
            let mut file = File::create(path)?;

            let client = reqwest::Client::new();
            let mut request = client.get(url.clone());
            for (name, value) in &headers {
                request = request.header(name.as_str(), value.as_str());
            }
            let response = request.send().await?;
            let mut content = Cursor::new(response.bytes().await?);
            std::io::copy(&mut content, &mut file)?;

            info!(target: "dataset", "Downloaded property table from {}", url);
            Ok(FetchStepOutput {
                dataset,
                path: path.to_path_buf(),
            })
        },
        DataSource::File { path } => {
            Ok(FetchStepOutput {
                dataset,
                path: PathBuf::from(path),
            })
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    Reqwest(#[from] reqwest::Error),
    File(#[from] std::io::Error)
}

impl Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let err: &dyn Display = match self {
            FetchError::Reqwest(err) => err,
            FetchError::File(err) => err
        };
        write!(f, "{}", err)
    }
}


pub struct FetchStepOutput {
    pub(crate) dataset: PropertyDataset,
    pub(crate) path: PathBuf
}
