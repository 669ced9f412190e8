use crate::state::messages::{LoadRequest, LoadResponse};
use aotui_core::loader::{DatasetLoader, DatasetSources, LoadError};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns the dataset loader and answers [`LoadRequest`]s off the UI loop.
pub struct LoaderWorker {
    loader: DatasetLoader,
    requests: mpsc::Receiver<LoadRequest>,
    responses: mpsc::Sender<LoadResponse>,
    is_loading: Arc<AtomicBool>,
}

impl LoaderWorker {
    pub fn new(
        sources: DatasetSources,
        requests: mpsc::Receiver<LoadRequest>,
        responses: mpsc::Sender<LoadResponse>,
    ) -> Self {
        Self {
            loader: DatasetLoader::new(sources),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                LoadRequest::LoadDataset => self.handle_load_dataset().await,
            };

            debug!("load request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| LoadResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send load response: {e}");
                break;
            }
        }
    }

    async fn handle_load_dataset(&self) -> Result<LoadResponse, LoadError> {
        let sources = self.loader.sources();
        debug!("loading {} and {}", sources.matches, sources.world);
        let dataset = self.loader.load().await?;
        Ok(LoadResponse::DatasetLoaded { dataset: Box::new(dataset) })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(LoadResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(80));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(LoadResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(LoadResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_files_come_back_as_error_response() {
        let (req_tx, req_rx) = mpsc::channel(4);
        let (resp_tx, mut resp_rx) = mpsc::channel(64);
        let worker = LoaderWorker::new(
            DatasetSources {
                matches: "/no/such/matches.csv".into(),
                world: "/no/such/world.geojson".into(),
            },
            req_rx,
            resp_tx,
        );
        let handle = tokio::spawn(worker.run());
        req_tx.send(LoadRequest::LoadDataset).await.unwrap();

        let mut final_spinner = None;
        let message = loop {
            match resp_rx.recv().await.unwrap() {
                LoadResponse::LoadingStateChanged { loading_state } => {
                    if !loading_state.is_loading {
                        final_spinner = Some(loading_state.spinner_char);
                    }
                }
                LoadResponse::Error { message } => break message,
                LoadResponse::DatasetLoaded { .. } => panic!("load should fail"),
            }
        };
        assert!(message.contains("/no/such/"));
        assert_eq!(final_spinner, Some(ERROR_CHAR));
        handle.abort();
    }
}
